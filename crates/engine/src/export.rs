// Export: render the active branch as a standalone page sized to a preset.
//
// The page carries a "CollabWrite" header above the document body. `auto`
// keeps the content's natural size; A1–A5 fix the page in CSS pixels.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::FmtWriter;
use serde::Serialize;
use tracing::{error, info};

use collabwrite_common::types::{Orientation, PageDimensions, PageLayout};

pub const EXPORT_HEADER: &str = "CollabWrite";
pub const DEFAULT_EXPORT_FILE: &str = "document.html";

/// What was written by a successful export.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub layout: PageLayout,
    pub dimensions: Option<PageDimensions>,
    pub orientation: Orientation,
    pub bytes: usize,
}

/// Write `content` to `out_path` as a page of `layout`.
///
/// Returns `Ok(None)` and writes nothing when there is no content to render.
pub fn export_document(
    title: &str,
    content: &str,
    layout: PageLayout,
    out_path: &Path,
) -> Result<Option<ExportArtifact>> {
    if content.trim().is_empty() {
        error!(path = %out_path.display(), "could not find document content to export");
        return Ok(None);
    }

    let page = render_page(title, content, layout);
    if let Some(parent) = out_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export directory `{}`", parent.display()))?;
    }
    fs::write(out_path, &page)
        .with_context(|| format!("failed to write export `{}`", out_path.display()))?;

    let dimensions = layout.dimensions();
    let artifact = ExportArtifact {
        path: out_path.to_path_buf(),
        layout,
        dimensions,
        orientation: dimensions.map(PageDimensions::orientation).unwrap_or(Orientation::Portrait),
        bytes: page.len(),
    };
    info!(path = %out_path.display(), %layout, bytes = artifact.bytes, "document exported");
    Ok(Some(artifact))
}

/// Full HTML page for `content` (markdown with inline HTML).
pub fn render_page(title: &str, content: &str, layout: PageLayout) -> String {
    let mut body = String::new();
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    html::push_html(&mut body, parser);

    let page_css = match layout.dimensions() {
        Some(PageDimensions { width, height }) => format!(
            "@page {{ size: {width}px {height}px; margin: 0; }}\n\
             .page {{ width: {width}px; min-height: {height}px; box-sizing: border-box; }}"
        ),
        None => ".page { width: 100%; }".to_string(),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         {page_css}\n\
         .page {{ padding: 2rem; font-family: Inter, sans-serif; }}\n\
         .export-header {{ padding: 20px; text-align: center; \
         border-bottom: 1px solid #ccc; margin-bottom: 20px; }}\n\
         .export-header h1 {{ font-size: 24px; font-weight: bold; margin: 0; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <div class=\"export-header\"><h1>{EXPORT_HEADER}</h1></div>\n\
         <div class=\"page\" data-layout=\"{layout}\">\n\
         {body}\
         </div>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = pulldown_cmark_escape::escape_html(FmtWriter(&mut escaped), text);
    escaped
}
