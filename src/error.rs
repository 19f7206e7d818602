//! Error types for sidebar generation

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while generating a sidebar
#[derive(Debug)]
pub enum SidebarError {
    /// Wiki directory does not exist
    MissingWiki { path: PathBuf },
    /// Wiki directory could not be listed
    ListDir { path: PathBuf, source: io::Error },
    /// A page could not be read as UTF-8 text
    Read { path: PathBuf, source: io::Error },
    /// The output file could not be written
    Write { path: PathBuf, source: io::Error },
    /// A page task panicked or was cancelled
    Join { path: PathBuf, message: String },
}

impl fmt::Display for SidebarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SidebarError::MissingWiki { path } => {
                write!(f, "Wiki directory '{}' not found", path.display())
            }
            SidebarError::ListDir { path, source } => {
                write!(f, "Failed to list '{}': {source}", path.display())
            }
            SidebarError::Read { path, source } => {
                write!(f, "Failed to read '{}': {source}", path.display())
            }
            SidebarError::Write { path, source } => {
                write!(f, "Failed to write '{}': {source}", path.display())
            }
            SidebarError::Join { path, message } => {
                write!(f, "Processing '{}' aborted: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for SidebarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SidebarError::ListDir { source, .. }
            | SidebarError::Read { source, .. }
            | SidebarError::Write { source, .. } => Some(source),
            SidebarError::MissingWiki { .. } | SidebarError::Join { .. } => None,
        }
    }
}
