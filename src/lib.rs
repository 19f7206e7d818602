//! Collapsible sidebar generation for GitHub wikis.
//!
//! Every page's `#`, `##` and `###` headings become a nested outline, which is
//! rendered as `<details>` blocks linking back into the page's sections. The
//! fragments of all pages are concatenated into the wiki's `_Sidebar.md`.
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod headings;
pub mod outline;
pub mod render;
pub mod wiki;

pub use config::SidebarConfig;
pub use error::SidebarError;
pub use headings::HeadingScan;
pub use outline::{HeadingNode, Outline};
pub use render::{render, render_indented};
pub use wiki::{BatchReport, generate};
