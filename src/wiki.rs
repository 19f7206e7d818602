//! Wiki directory handling: page discovery and the per-page pipeline.
//!
//! Pages are read and rendered concurrently, one task per page, and their
//! fragments are appended to the output strictly in file name order. A page
//! that fails is reported and skipped; the rest of the batch still lands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::{INTERNAL_PREFIX, SidebarConfig};
use crate::error::SidebarError;
use crate::outline::Outline;
use crate::render::render_indented;

/// A wiki page eligible for the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name without extension; also the page's link name.
    pub name: String,
    pub file_name: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct RenderedDocument {
    pub name: String,
    pub outline: Outline,
    pub markup: String,
}

/// Outcome of a [`generate`] run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Pages written to the output, in output order.
    pub rendered: Vec<RenderedDocument>,
    /// Pages that were skipped.
    pub failures: Vec<SidebarError>,
}

impl BatchReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Page name for `file_name`, or `None` if the file is not a sidebar source.
#[must_use]
pub fn document_name(file_name: &str, config: &SidebarConfig) -> Option<String> {
    if file_name.starts_with(INTERNAL_PREFIX) || file_name == config.output {
        return None;
    }

    let path = Path::new(file_name);
    let extension = path.extension()?.to_str()?;
    if !config.extensions.iter().any(|ext| ext == extension) {
        return None;
    }

    path.file_stem()?.to_str().map(str::to_string)
}

/// Lists the eligible pages of the wiki directory, sorted by file name.
///
/// # Errors
///
/// Returns [`SidebarError::ListDir`] if the directory cannot be read.
pub async fn discover_documents(config: &SidebarConfig) -> Result<Vec<Document>, SidebarError> {
    let list_err = |source| SidebarError::ListDir {
        path: config.wiki_dir.clone(),
        source,
    };

    let mut entries = fs::read_dir(&config.wiki_dir).await.map_err(list_err)?;
    let mut documents = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
        let path = entry.path();
        if !fs::metadata(&path).await.is_ok_and(|meta| meta.is_file()) {
            continue;
        }

        let Ok(file_name) = entry.file_name().into_string() else {
            tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };

        if let Some(name) = document_name(&file_name, config) {
            documents.push(Document {
                name,
                file_name,
                path,
            });
        }
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(documents)
}

/// Turns page text into its sidebar fragment.
#[must_use]
pub fn render_document(name: &str, text: &str, config: &SidebarConfig) -> RenderedDocument {
    let outline = Outline::build(name, config.scan.heading_lines(text));
    tracing::debug!(document = name, "outline:\n{outline}");

    let markup = render_indented(&outline, &config.link_prefix, config.indent_width);

    RenderedDocument {
        name: name.to_string(),
        outline,
        markup,
    }
}

async fn process_document(
    document: &Document,
    config: &SidebarConfig,
) -> Result<RenderedDocument, SidebarError> {
    let text = fs::read_to_string(&document.path)
        .await
        .map_err(|source| SidebarError::Read {
            path: document.path.clone(),
            source,
        })?;

    Ok(render_document(&document.name, &text, config))
}

/// Regenerates the sidebar file from every page of the wiki directory.
///
/// The output is truncated first, then each page's fragment is appended in
/// file name order. Pages that fail are logged and listed in the report.
///
/// # Errors
///
/// Fails only for batch-level problems: a missing or unlistable wiki
/// directory, or an output file that cannot be written.
pub async fn generate(config: &SidebarConfig) -> Result<BatchReport, SidebarError> {
    let exists = fs::try_exists(&config.wiki_dir)
        .await
        .map_err(|source| SidebarError::ListDir {
            path: config.wiki_dir.clone(),
            source,
        })?;
    if !exists {
        return Err(SidebarError::MissingWiki {
            path: config.wiki_dir.clone(),
        });
    }

    let output = config.output_path();
    let write_err = |source| SidebarError::Write {
        path: output.clone(),
        source,
    };

    fs::write(&output, "").await.map_err(write_err)?;

    let documents = discover_documents(config).await?;
    tracing::debug!(count = documents.len(), "discovered wiki pages");

    let shared = Arc::new(config.clone());
    let mut tasks = Vec::new();
    for document in documents {
        let path = document.path.clone();
        let config = Arc::clone(&shared);
        tasks.push((
            path,
            tokio::spawn(async move { process_document(&document, &config).await }),
        ));
    }

    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&output)
        .await
        .map_err(write_err)?;

    let mut report = BatchReport::default();
    for (path, task) in tasks {
        let result = task.await.unwrap_or_else(|e| {
            Err(SidebarError::Join {
                path,
                message: e.to_string(),
            })
        });

        match result {
            Ok(rendered) => {
                file.write_all(rendered.markup.as_bytes())
                    .await
                    .map_err(write_err)?;
                report.rendered.push(rendered);
            }
            Err(error) => {
                tracing::warn!(%error, "skipping page");
                report.failures.push(error);
            }
        }
    }

    file.flush().await.map_err(write_err)?;

    tracing::info!(
        output = %output.display(),
        pages = report.rendered.len(),
        failed = report.failures.len(),
        "Finished generating sidebar"
    );

    Ok(report)
}
