#![warn(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wiki_sidebar::config::{self, SidebarConfig};
use wiki_sidebar::render::DEFAULT_INDENT_WIDTH;
use wiki_sidebar::{BatchReport, HeadingScan, SidebarError};

#[derive(Parser)]
#[command(author, version, about = "Generate a collapsible sidebar for a GitHub wiki", long_about = None)]
struct Cli {
    /// Repository URL; links point to `<REPO>/wiki/`
    #[arg(long)]
    repo: String,

    /// Output file name, written inside the wiki directory
    #[arg(long, default_value = config::DEFAULT_OUTPUT)]
    out: String,

    /// Local checkout of the wiki
    #[arg(long, default_value = config::DEFAULT_WIKI_DIR)]
    wiki: PathBuf,

    /// Page extensions to include (repeatable)
    #[arg(long = "ext", value_name = "EXT", default_value = config::DEFAULT_EXTENSION)]
    extensions: Vec<String>,

    /// Spaces of indentation per nesting level
    #[arg(long, default_value_t = DEFAULT_INDENT_WIDTH)]
    indent: usize,

    /// Parse pages as markdown so `#` lines inside code blocks are ignored
    #[arg(long)]
    skip_code_blocks: bool,

    /// Print every page's outline as JSON on stdout
    #[arg(long)]
    outline: bool,
}

impl Cli {
    fn into_config(self) -> SidebarConfig {
        SidebarConfig {
            wiki_dir: self.wiki,
            output: self.out,
            extensions: self.extensions,
            indent_width: self.indent,
            scan: if self.skip_code_blocks {
                HeadingScan::Markdown
            } else {
                HeadingScan::Lines
            },
            ..SidebarConfig::for_repo(&self.repo)
        }
    }
}

/// Pretty JSON array of every rendered page's outline, in output order.
fn outline_json(report: &BatchReport) -> serde_json::Result<String> {
    let trees: Vec<_> = report
        .rendered
        .iter()
        .map(|doc| doc.outline.to_tree())
        .collect();
    serde_json::to_string_pretty(&trees)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let print_outline = cli.outline;
    let clone_url = config::wiki_clone_url(&cli.repo);
    let config = cli.into_config();

    let report = match wiki_sidebar::generate(&config).await {
        Err(SidebarError::MissingWiki { path }) => bail!(
            "wiki directory '{}' not found; clone it first with `git clone {clone_url} {}`",
            path.display(),
            path.display()
        ),
        result => result.context("failed to generate sidebar")?,
    };

    if print_outline {
        println!("{}", outline_json(&report)?);
    }

    if !report.is_success() {
        bail!(
            "{} of {} pages could not be processed",
            report.failures.len(),
            report.failures.len() + report.rendered.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["wiki-sidebar", "--repo", "https://github.com/acme/widgets"])
            .unwrap();
        assert!(!cli.outline);
        let config = cli.into_config();
        assert_eq!(config, SidebarConfig::for_repo("https://github.com/acme/widgets"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "wiki-sidebar",
            "--repo",
            "https://github.com/acme/widgets",
            "--out",
            "Sidebar.md",
            "--wiki",
            "/tmp/widgets.wiki",
            "--ext",
            "md",
            "--ext",
            "markdown",
            "--indent",
            "4",
            "--skip-code-blocks",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.output, "Sidebar.md");
        assert_eq!(config.wiki_dir, PathBuf::from("/tmp/widgets.wiki"));
        assert_eq!(config.extensions, vec!["md", "markdown"]);
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.scan, HeadingScan::Markdown);
        assert_eq!(config.link_prefix, "https://github.com/acme/widgets/wiki/");
    }

    #[test]
    fn test_outline_json_lists_pages_in_order() {
        let config = SidebarConfig::for_repo("r");
        let report = BatchReport {
            rendered: vec![
                wiki_sidebar::wiki::render_document("Apple", "# Varieties\n## Gala\n", &config),
                wiki_sidebar::wiki::render_document("Home", "Welcome!\n", &config),
            ],
            failures: Vec::new(),
        };

        let json: serde_json::Value = serde_json::from_str(&outline_json(&report).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {
                    "title": "Apple",
                    "level": 0,
                    "children": [{
                        "title": "Varieties",
                        "level": 1,
                        "children": [{ "title": "Gala", "level": 2 }]
                    }]
                },
                { "title": "Home", "level": 0 }
            ])
        );
    }

    #[test]
    fn test_outline_json_empty_report() {
        assert_eq!(outline_json(&BatchReport::default()).unwrap(), "[]");
    }

    #[test]
    fn test_cli_requires_repo() {
        assert!(Cli::try_parse_from(["wiki-sidebar"]).is_err());
    }
}
