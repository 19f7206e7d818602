//! Heading-line extraction from raw page text.
//!
//! The default scan keeps every line starting with `#`, exactly as wiki pages
//! are authored. The markdown scan parses the page first so that `#` lines
//! inside code blocks don't turn into sidebar entries.

use pulldown_cmark::{Event, Options, Parser, Tag};

/// How heading lines are picked out of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingScan {
    /// Every line beginning with `#`.
    #[default]
    Lines,
    /// Only ATX headings recognised by a CommonMark parser.
    Markdown,
}

impl HeadingScan {
    /// Returns the heading lines of `text` in document order.
    ///
    /// A leading byte-order mark is ignored so the first line still counts.
    #[must_use]
    pub fn heading_lines(self, text: &str) -> Vec<&str> {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        match self {
            Self::Lines => line_headings(text),
            Self::Markdown => markdown_headings(text),
        }
    }
}

fn line_headings(text: &str) -> Vec<&str> {
    text.lines().filter(|line| line.starts_with('#')).collect()
}

/// ATX heading lines, skipping fenced/indented code and setext headings.
fn markdown_headings(text: &str) -> Vec<&str> {
    let mut headings = Vec::new();

    for (event, range) in Parser::new_ext(text, Options::all()).into_offset_iter() {
        let Event::Start(Tag::Heading { .. }) = event else {
            continue;
        };

        let Some(rest) = text.get(range.start..) else {
            continue;
        };
        let line = rest.split('\n').next().unwrap_or("").trim_end_matches('\r');

        // Setext headings start at their text, not at a marker run
        if line.starts_with('#') {
            headings.push(line);
        }
    }

    headings
}
