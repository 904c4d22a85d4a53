//! Text extraction: document bytes to an ordered sequence of lines.
//!
//! Page-based buffers go through the lopdf backend, whose fragments are
//! regrouped into lines page by page. Flow-text buffers yield one line per
//! paragraph. Either way the result is trimmed and free of blank lines.

mod backend;
mod content;
mod flow;
mod fonts;
mod lines;

pub use backend::{decode_text_simple, LopdfBackend, PageBackend, RenderMode};
pub use flow::extract_paragraphs;
pub use fonts::FontMetrics;
pub use lines::{group_fragments_into_lines, merge_line, TextFragment};

use crate::detect::DocumentFormat;
use crate::error::{Error, Result};
use crate::model::RawLine;
use crate::parser::ParseOptions;

/// Extract the reconstructed lines of a document buffer.
pub fn extract_lines(
    data: &[u8],
    format: DocumentFormat,
    options: &ParseOptions,
) -> Result<Vec<RawLine>> {
    let texts = match format {
        DocumentFormat::PageBased => extract_page_lines(data, options)?,
        DocumentFormat::FlowText => extract_paragraphs(data)?,
    };

    let lines = RawLine::from_texts(texts);
    log::debug!("Extracted {} lines ({})", lines.len(), format);
    for line in &lines {
        log::trace!("line {}: {}", line.index, line.text);
    }
    Ok(lines)
}

/// Open and read a page-based buffer, retrying at most once in reduced mode.
fn extract_page_lines(data: &[u8], options: &ParseOptions) -> Result<Vec<String>> {
    let mut mode = options.render_mode;
    loop {
        match read_pages(data, mode) {
            Ok(lines) => return Ok(lines),
            Err(err) => match options.retry_mode(mode) {
                Some(next) => {
                    log::warn!("{:?} render failed ({}), retrying in {:?} mode", mode, err, next);
                    mode = next;
                }
                None => return Err(into_extraction(err)),
            },
        }
    }
}

/// Read every page of the buffer with the given engine configuration.
pub fn read_pages(data: &[u8], mode: RenderMode) -> Result<Vec<String>> {
    let backend = LopdfBackend::load_bytes(data, mode)?;
    read_backend(&backend)
}

/// Reconstruct the lines of every page of a backend, in page order.
pub fn read_backend<B: PageBackend>(backend: &B) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for index in 0..backend.page_count() {
        let fragments = backend.page_fragments(index)?;
        if fragments.is_empty() {
            log::warn!("Page {} yielded no text", index + 1);
        }
        lines.extend(group_fragments_into_lines(fragments));
    }
    Ok(lines)
}

fn into_extraction(err: Error) -> Error {
    match err {
        Error::Io(e) => Error::Extraction(e.to_string()),
        other => other,
    }
}
