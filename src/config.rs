//! Run configuration for sidebar generation.

use std::path::PathBuf;

use crate::headings::HeadingScan;
use crate::render::DEFAULT_INDENT_WIDTH;

pub const DEFAULT_WIKI_DIR: &str = "./wiki";
pub const DEFAULT_OUTPUT: &str = "_Sidebar.md";
pub const DEFAULT_EXTENSION: &str = "md";

/// Files starting with this are generated wiki parts (`_Sidebar`, `_Footer`).
pub const INTERNAL_PREFIX: char = '_';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarConfig {
    /// Directory holding the wiki's pages.
    pub wiki_dir: PathBuf,
    /// Output file name, created inside `wiki_dir`.
    pub output: String,
    /// Base of every link, conventionally `<repo>/wiki/`.
    pub link_prefix: String,
    /// Page extensions to include, without the dot.
    pub extensions: Vec<String>,
    /// Spaces of indentation per tree level.
    pub indent_width: usize,
    pub scan: HeadingScan,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            wiki_dir: PathBuf::from(DEFAULT_WIKI_DIR),
            output: DEFAULT_OUTPUT.to_string(),
            link_prefix: String::new(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            indent_width: DEFAULT_INDENT_WIDTH,
            scan: HeadingScan::default(),
        }
    }
}

impl SidebarConfig {
    /// Default configuration linking into the wiki of `repo`.
    #[must_use]
    pub fn for_repo(repo: &str) -> Self {
        Self {
            link_prefix: link_prefix(repo),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.wiki_dir.join(&self.output)
    }
}

/// `https://github.com/o/r` -> `https://github.com/o/r/wiki/`
#[must_use]
pub fn link_prefix(repo: &str) -> String {
    format!("{repo}/wiki/")
}

/// Clone URL of the wiki belonging to `repo`.
#[must_use]
pub fn wiki_clone_url(repo: &str) -> String {
    format!("{repo}.wiki.git")
}
