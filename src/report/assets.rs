//! Embedded stylesheet and curation script
//!
//! The report is self-contained: everything the browser-side curation tool
//! needs ships inside the document. The script consumes only the rendered
//! blocks' data attributes (identifier, author, image URL, timestamp) and
//! produces nothing the harvester reads back.

/// Report stylesheet
pub const STYLE: &str = r#"
div.tweet { display: inline-block; width: 160px; font-size: 0.6em; }
div.nofollow { background-color: #ffeeee; }
div.follow { background-color: #eeffee; }
div.marked { background-color: #eeeeff; }
img#viewer { height: 500px; max-width: 1000px; }
"#;

/// Curation mini-tool
///
/// Mark/unmark blocks, hide whole accounts, then "Showtime": unmarked blocks
/// are removed and the remaining ones are tagged one by one through the text
/// field, grouped by tag for export. Marks survive reloads via localStorage.
pub const SCRIPT: &str = r#"
const STORAGE_KEY = 'plumage-marked';

function savedMarks() {
    try {
        return new Set(JSON.parse(localStorage.getItem(STORAGE_KEY)) || []);
    } catch (e) {
        return new Set();
    }
}

function persistMarks() {
    let ids = [];
    for (let div of document.getElementsByClassName('marked')) {
        ids.push(div.id);
    }
    localStorage.setItem(STORAGE_KEY, JSON.stringify(ids));
}

function filterTweeter(name) {
    document.querySelectorAll('[data-tweeter="' + name + '"]').forEach(
        function (tweet) {
            tweet.remove();
        }
    );
    persistMarks();
}

function mark(ident) {
    let div = document.getElementById(ident);
    if (div.classList.contains('marked')) {
        div.classList.remove('marked');
    } else {
        div.classList.add('marked');
    }
    persistMarks();
}

// Remove unmarked tweets, return marked tweets with url set
function cleanup() {
    let interesting = [];
    let unused = [];
    let tweets = document.getElementById('tweets');
    for (let tweet of tweets.getElementsByClassName('tweet')) {
        if (!tweet.classList.contains('marked')) {
            unused.push(tweet);
        } else {
            interesting.push(tweet);
        }
    }
    for (let tweet of unused) {
        tweet.remove();
    }
    for (let tweet of interesting) {
        tweet.url = tweet.attributes['data-url'].value;
    }
    return interesting;
}

function render() {
    let todo = cleanup();
    let done = getDone();

    function renderTodo() {
        let text = "";
        for (let tweet of todo) {
            text += tweet.url + ":orig\n";
        }
        return text;
    }

    function renderDone() {
        let text = "";
        for (let key of [...done.keys()].sort()) {
            text += key + "\n";
            for (let tweet of done.get(key)) {
                text += tweet.url + ":orig\n";
            }
            text += "\n";
        }
        return text;
    }

    document.getElementById('todo').innerText = renderTodo();
    document.getElementById('done').innerText = renderDone();
    showCurrent();
    document.location.hash = 'sorter';
    document.getElementById('reader').focus();
}

function getCurrent() {
    return document.getElementsByClassName('marked')[0];
}

function getDone() {
    return document.getElementById('done').items;
}

function showCurrent() {
    let viewer = document.getElementById('viewer');
    let viewerlink = document.getElementById('viewerlink');
    let current = getCurrent();
    if (current) {
        viewerlink.href = current.url + ':orig';
        viewer.src = current.url;
    } else {
        viewer.remove();
    }
}

function processInput() {
    let current = getCurrent();
    current.remove();
    persistMarks();
    let field = document.getElementById('reader');
    let text = field.value;
    field.value = '';
    let chars = text
        .split(',')
        .sort()
        .map((s) => s.charAt(0).toUpperCase() + s.slice(1))
        .join(' & ');
    let existing = null;
    let done = getDone();
    if (done.has(chars)) {
        existing = done.get(chars);
    } else {
        existing = [];
    }
    existing.push(current);
    if (chars) {
        getDone().set(chars, existing);
    }
    render();
}

window.onload = function() {
    for (let ident of savedMarks()) {
        let div = document.getElementById(ident);
        if (div) {
            div.classList.add('marked');
        }
    }
    document.getElementById('done').items = new Map();
    document.getElementById('sorterform').addEventListener(
        'submit',
        function (event) {
            event.preventDefault();
            processInput();
        }
    );
}
"#;
