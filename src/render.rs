//! Sidebar markup generation from an [`Outline`].
//!
//! Each node becomes a `<summary>` link into its page section; nodes with
//! children are wrapped in a collapsible `<details>` block whose children sit
//! in a nested `<blockquote>`. Anchors follow the wiki's in-page convention:
//! the first `Title` on a page is `Page#Title`, later duplicates are
//! `Page#Title-1`, `Page#Title-2`, and so on.

use std::collections::HashMap;
use std::fmt::Write;

use crate::outline::{Outline, ROOT};

pub const DEFAULT_INDENT_WIDTH: usize = 8;

/// Per-document occurrence counts used to disambiguate duplicate titles.
#[derive(Debug, Default)]
pub struct AnchorNames {
    seen: HashMap<String, usize>,
}

impl AnchorNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link name for the next heading titled `title` on `document`.
    pub fn next(&mut self, document: &str, title: &str) -> String {
        if let Some(count) = self.seen.get_mut(title) {
            let name = format!("{document}#{title}-{count}");
            *count += 1;
            name
        } else {
            self.seen.insert(title.to_string(), 1);
            format!("{document}#{title}")
        }
    }
}

/// Renders `outline` with the default indentation.
#[must_use]
pub fn render(outline: &Outline, link_prefix: &str) -> String {
    render_indented(outline, link_prefix, DEFAULT_INDENT_WIDTH)
}

/// Renders `outline`, indenting `indent_width` spaces per tree level.
#[must_use]
pub fn render_indented(outline: &Outline, link_prefix: &str, indent_width: usize) -> String {
    let mut renderer = Renderer {
        outline,
        link_prefix,
        indent_width,
        anchors: AnchorNames::new(),
        markup: String::new(),
    };
    renderer.node(ROOT, 0);
    renderer.markup
}

struct Renderer<'a> {
    outline: &'a Outline,
    link_prefix: &'a str,
    indent_width: usize,
    anchors: AnchorNames,
    markup: String,
}

impl Renderer<'_> {
    fn node(&mut self, id: usize, depth: usize) {
        let indent = depth * self.indent_width;
        let inner = indent + self.indent_width;

        if self.outline.node(id).children.is_empty() {
            self.summary(id, indent);
            return;
        }

        self.line(indent, "<details>");
        self.summary(id, indent);
        self.line(inner, "<blockquote>");
        let outline = self.outline;
        for (child, _) in outline.children(id) {
            self.node(child, depth + 1);
        }
        self.line(inner, "</blockquote>");
        self.line(indent, "</details>");
    }

    fn summary(&mut self, id: usize, indent: usize) {
        let link_name = self.link_name(id);
        let title = &self.outline.node(id).title;
        writeln!(
            self.markup,
            "{:indent$}<summary><a href=\"{}/{}\">{}</a></summary>",
            "",
            escape(self.link_prefix),
            escape(&link_name),
            escape(title),
        )
        .unwrap();
    }

    fn link_name(&mut self, id: usize) -> String {
        let document = self.outline.name();
        if id == ROOT {
            return document.to_string();
        }
        self.anchors.next(document, &self.outline.node(id).title)
    }

    fn line(&mut self, indent: usize, tag: &str) {
        writeln!(self.markup, "{:indent$}{tag}", "").unwrap();
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
