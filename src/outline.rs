//! Outline construction from the ordered heading lines of one document.
//!
//! The document itself is the root (level 0). Heading levels are relative
//! markers rather than literal depths: a heading nests under the nearest
//! preceding heading with a strictly smaller level, and a jump of several
//! levels (`#` straight to `###`) nests directly under the previous heading
//! without synthetic intermediate nodes. Tree depth is therefore bounded by
//! the deepest level seen, never by the size of the jumps.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Deepest heading level recognised (`###`).
pub const MAX_HEADING_LEVEL: u8 = 3;

/// Title given to headings with no text after the marker run.
pub const UNTITLED: &str = "undefined";

/// Arena index of the document root.
pub const ROOT: usize = 0;

/// A heading line split into its level and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingLine<'a> {
    /// Count of leading `#` characters, 1 to 3
    pub level: u8,
    /// Text after the first space, or [`UNTITLED`]
    pub title: &'a str,
}

/// Parses a raw heading line.
///
/// Returns `None` for lines without a leading `#` and for headings deeper
/// than [`MAX_HEADING_LEVEL`].
#[must_use]
pub fn parse_heading_line(line: &str) -> Option<HeadingLine<'_>> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    let level = u8::try_from(hashes)
        .ok()
        .filter(|level| (1..=MAX_HEADING_LEVEL).contains(level))?;

    let title = line
        .split_once(' ')
        .map(|(_, rest)| rest)
        .filter(|rest| !rest.trim().is_empty())
        .unwrap_or(UNTITLED);

    Some(HeadingLine { level, title })
}

/// A node in the outline arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    /// Heading text with the marker run and one following space stripped.
    pub title: String,
    /// 0 for the document root, otherwise the count of leading `#`.
    pub level: u8,
    /// Index of the owning node; `None` only for the root.
    pub parent: Option<usize>,
    /// Indices of child nodes in document order.
    pub children: Vec<usize>,
}

/// Heading tree of a single document, stored as an index arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    nodes: Vec<HeadingNode>,
}

impl Outline {
    /// Builds the outline of `document_name` from its heading lines in order.
    pub fn build<I, S>(document_name: &str, heading_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outline = Self {
            nodes: vec![HeadingNode {
                title: document_name.to_string(),
                level: 0,
                parent: None,
                children: Vec::new(),
            }],
        };

        let mut last_entry = ROOT;
        for line in heading_lines {
            let line = line.as_ref();
            let Some(heading) = parse_heading_line(line) else {
                tracing::debug!(
                    document = document_name,
                    line,
                    "skipping line that is not a heading of level 1 to {MAX_HEADING_LEVEL}"
                );
                continue;
            };

            let parent = outline.parent_for(heading.level, last_entry);
            let id = outline.nodes.len();
            outline.nodes.push(HeadingNode {
                title: heading.title.to_string(),
                level: heading.level,
                parent: Some(parent),
                children: Vec::new(),
            });
            outline.nodes[parent].children.push(id);
            last_entry = id;
        }

        outline
    }

    /// Chooses the parent of a new heading given the previously added node.
    fn parent_for(&self, level: u8, last_entry: usize) -> usize {
        let last = &self.nodes[last_entry];
        match level.cmp(&last.level) {
            Ordering::Equal => last.parent.unwrap_or(ROOT),
            Ordering::Greater => last_entry,
            Ordering::Less => {
                let mut ancestor = last.parent.unwrap_or(ROOT);
                while self.nodes[ancestor].level >= level {
                    match self.nodes[ancestor].parent {
                        Some(up) => ancestor = up,
                        None => break,
                    }
                }
                ancestor
            }
        }
    }

    #[must_use]
    pub fn root(&self) -> &HeadingNode {
        &self.nodes[ROOT]
    }

    /// Document name, i.e. the root title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.root().title
    }

    /// # Panics
    ///
    /// Panics if `id` is not an index of this outline.
    #[must_use]
    pub fn node(&self, id: usize) -> &HeadingNode {
        &self.nodes[id]
    }

    /// Children of `id` with their arena indices, in document order.
    pub fn children(&self, id: usize) -> impl Iterator<Item = (usize, &HeadingNode)> {
        self.nodes[id]
            .children
            .iter()
            .map(|&child| (child, &self.nodes[child]))
    }

    /// Number of headings, excluding the root.
    #[must_use]
    pub fn heading_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of parent hops from `id` up to the root.
    #[must_use]
    pub fn depth(&self, id: usize) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent].parent;
        }
        depth
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        (0..self.nodes.len())
            .map(|id| self.depth(id))
            .max()
            .unwrap_or(0)
    }

    /// Nested, serializable view of the outline.
    #[must_use]
    pub fn to_tree(&self) -> OutlineTree<'_> {
        self.subtree(ROOT)
    }

    fn subtree(&self, id: usize) -> OutlineTree<'_> {
        let node = &self.nodes[id];
        OutlineTree {
            title: &node.title,
            level: node.level,
            children: node.children.iter().map(|&c| self.subtree(c)).collect(),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: usize) -> fmt::Result {
        let node = &self.nodes[id];
        writeln!(
            f,
            "{:indent$}{} - {}",
            "",
            node.title,
            node.level,
            indent = usize::from(node.level)
        )?;
        for &child in &node.children {
            self.fmt_node(f, child)?;
        }
        Ok(())
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, ROOT)
    }
}

/// Borrowed nested form of an [`Outline`], used for JSON output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct OutlineTree<'a> {
    pub title: &'a str,
    pub level: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineTree<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(outline: &Outline, id: usize) -> Vec<&str> {
        outline
            .children(id)
            .map(|(_, node)| node.title.as_str())
            .collect()
    }

    fn child_id(outline: &Outline, id: usize, title: &str) -> usize {
        outline
            .children(id)
            .find(|(_, node)| node.title == title)
            .map(|(child, _)| child)
            .unwrap()
    }

    fn lines_for(levels: &[u8]) -> Vec<String> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| format!("{} H{i}", "#".repeat(usize::from(level))))
            .collect()
    }

    #[test]
    fn test_parse_heading_line() {
        assert_eq!(
            parse_heading_line("# Title"),
            Some(HeadingLine {
                level: 1,
                title: "Title"
            })
        );
        assert_eq!(
            parse_heading_line("### Deep Title here"),
            Some(HeadingLine {
                level: 3,
                title: "Deep Title here"
            })
        );
        // Only one space is stripped
        assert_eq!(parse_heading_line("##  Spaced").unwrap().title, " Spaced");
    }

    #[test]
    fn test_missing_title_falls_back() {
        assert_eq!(parse_heading_line("##").unwrap().title, UNTITLED);
        assert_eq!(parse_heading_line("## ").unwrap().title, UNTITLED);
        assert_eq!(parse_heading_line("#   ").unwrap().title, UNTITLED);
        // No space at all: the whole line is the marker run plus junk
        assert_eq!(parse_heading_line("#hashtag").unwrap().title, UNTITLED);

        let outline = Outline::build("Page", ["##"]);
        assert_eq!(titles(&outline, ROOT), vec![UNTITLED]);
    }

    #[test]
    fn test_rejects_deep_and_non_headings() {
        assert_eq!(parse_heading_line("#### Too deep"), None);
        assert_eq!(parse_heading_line("###### Way too deep"), None);
        assert_eq!(parse_heading_line("plain text"), None);
        assert_eq!(parse_heading_line(""), None);
    }

    #[test]
    fn test_deep_headings_are_skipped() {
        let outline = Outline::build("Page", ["# A", "#### Ignored", "## B"]);
        assert_eq!(outline.heading_count(), 2);
        let a = child_id(&outline, ROOT, "A");
        assert_eq!(titles(&outline, a), vec!["B"]);
    }

    #[test]
    fn test_empty_document() {
        let outline = Outline::build("Page", Vec::<&str>::new());
        assert_eq!(outline.name(), "Page");
        assert_eq!(outline.root().level, 0);
        assert_eq!(outline.root().parent, None);
        assert!(outline.root().children.is_empty());
        assert_eq!(outline.heading_count(), 0);
        assert_eq!(outline.max_depth(), 0);
    }

    #[test]
    fn test_siblings_share_parent() {
        let outline = Outline::build("Page", ["# A", "## B", "## C", "## D"]);
        let a = child_id(&outline, ROOT, "A");
        assert_eq!(titles(&outline, a), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_tie_break_irregular_levels() {
        // Levels [1, 3, 2, 1]
        let outline = Outline::build("Page", ["# A", "### B", "## C", "# D"]);
        assert_eq!(titles(&outline, ROOT), vec!["A", "D"]);
        let a = child_id(&outline, ROOT, "A");
        assert_eq!(titles(&outline, a), vec!["B", "C"]);
        let b = child_id(&outline, a, "B");
        assert!(outline.node(b).children.is_empty());
        assert_eq!(outline.node(b).level, 3);
        assert_eq!(outline.depth(b), 2);
    }

    #[test]
    fn test_level_jump_nests_under_previous() {
        let outline = Outline::build("Page", ["# A", "### B", "### C"]);
        let a = child_id(&outline, ROOT, "A");
        assert_eq!(titles(&outline, a), vec!["B", "C"]);
        assert_eq!(outline.max_depth(), 2);
    }

    #[test]
    fn test_document_starting_below_top_level() {
        let outline = Outline::build("Page", ["### A", "## B", "# C", "### D"]);
        assert_eq!(titles(&outline, ROOT), vec!["A", "B", "C"]);
        let c = child_id(&outline, ROOT, "C");
        assert_eq!(titles(&outline, c), vec!["D"]);
    }

    #[test]
    fn test_walk_up_stops_at_smaller_level() {
        let outline = Outline::build("Page", ["# A", "## B", "### C", "## D", "### E", "# F"]);
        assert_eq!(titles(&outline, ROOT), vec!["A", "F"]);
        let a = child_id(&outline, ROOT, "A");
        assert_eq!(titles(&outline, a), vec!["B", "D"]);
        let b = child_id(&outline, a, "B");
        assert_eq!(titles(&outline, b), vec!["C"]);
        let d = child_id(&outline, a, "D");
        assert_eq!(titles(&outline, d), vec!["E"]);
    }

    #[test]
    fn test_depth_never_exceeds_max_level() {
        // Every level sequence of length 1..=6 over levels 1..=3
        for len in 1..=6u32 {
            for code in 0..3usize.pow(len) {
                let mut levels = Vec::new();
                let mut rest = code;
                for _ in 0..len {
                    levels.push(u8::try_from(rest % 3).unwrap() + 1);
                    rest /= 3;
                }
                let outline = Outline::build("Page", lines_for(&levels));
                let max_level = usize::from(*levels.iter().max().unwrap());
                assert!(
                    outline.max_depth() <= max_level,
                    "levels {levels:?} produced depth {}",
                    outline.max_depth()
                );
                assert_eq!(outline.heading_count(), levels.len());
                assert_eq!(outline.depth(ROOT), 0);
            }
        }
    }

    #[test]
    fn test_preorder_matches_document_order() {
        let levels = [2, 1, 3, 3, 2, 1, 1, 3, 2, 2];
        let outline = Outline::build("Page", lines_for(&levels));

        fn preorder<'a>(outline: &'a Outline, id: usize, out: &mut Vec<&'a str>) {
            for (child, node) in outline.children(id) {
                out.push(&node.title);
                preorder(outline, child, out);
            }
        }
        let mut seen = Vec::new();
        preorder(&outline, ROOT, &mut seen);

        let expected: Vec<String> = (0..levels.len()).map(|i| format!("H{i}")).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_display_lists_levels() {
        let outline = Outline::build("Page", ["# A", "## B"]);
        assert_eq!(outline.to_string(), "Page - 0\n A - 1\n  B - 2\n");
    }

    #[test]
    fn test_tree_serializes_nested() {
        let outline = Outline::build("Page", ["# A", "## B", "# C"]);
        let json = serde_json::to_value(outline.to_tree()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Page",
                "level": 0,
                "children": [
                    { "title": "A", "level": 1, "children": [{ "title": "B", "level": 2 }] },
                    { "title": "C", "level": 1 }
                ]
            })
        );
    }
}
