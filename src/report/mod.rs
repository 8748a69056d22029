//! Report output
//!
//! Consumes the finalized corpus as an ordered sequence of render-ready
//! records and produces the single self-contained HTML artifact.

mod assets;
mod html;

pub use html::{render_report, write_report};
