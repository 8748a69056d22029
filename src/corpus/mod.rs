//! Image corpus: extraction, deduplication, ordering
//!
//! # Components
//!
//! - `ImageRecord`: one extracted image with its owning post's metadata
//! - `extract_records`: turns a kept post into records, in attachment order
//! - `Corpus`: the run-wide deduplicated collection and its render order

mod builder;
mod record;

pub use builder::Corpus;
pub use record::{extract_records, image_identifier, ImageRecord};
