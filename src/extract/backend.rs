//! Page-based backend abstraction layer.
//!
//! Provides a trait-based interface over the rendering engine, isolating
//! the concrete PDF library (lopdf) from line reconstruction.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::content::ContentInterpreter;
use super::fonts::FontMetrics;
use super::lines::TextFragment;
use crate::error::{Error, Result};

/// Capability set of the rendering engine used for each open attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Embedded font encodings and width tables are honored.
    #[default]
    Full,
    /// Degraded configuration: the buffer is salvaged before loading,
    /// embedded font programs are ignored and text is decoded with the
    /// simple UTF-16BE / UTF-8 / Latin-1 decoder.
    Reduced,
}

/// Abstract interface for a page-based document.
pub trait PageBackend {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Positioned fragments of the page at `index` (0-based), in content-stream order.
    fn page_fragments(&self, index: usize) -> Result<Vec<TextFragment>>;
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PageBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: Vec<ObjectId>,
    mode: RenderMode,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice with the given capability set.
    pub fn load_bytes(data: &[u8], mode: RenderMode) -> Result<Self> {
        let doc = match mode {
            RenderMode::Full => LopdfDocument::load_mem(data)?,
            RenderMode::Reduced => LopdfDocument::load_mem(salvage(data))?,
        };

        let pages: BTreeMap<u32, ObjectId> = doc.get_pages();
        Ok(Self {
            doc,
            pages: pages.into_values().collect(),
            mode,
        })
    }

    /// Capability set this backend was opened with.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Get page content stream, concatenating content arrays.
    fn page_content(&self, page_id: ObjectId) -> Result<Option<Vec<u8>>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without a content stream simply has no text
            Err(_) => return Ok(None),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(Some(stream_bytes(s))),
                Object::Array(arr) => Ok(Some(self.concat_streams(arr))),
                _ => Err(Error::Extraction("invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(Some(self.concat_streams(arr))),
            Object::Stream(s) => Ok(Some(stream_bytes(s))),
            _ => Err(Error::Extraction("invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    content.extend_from_slice(&stream_bytes(s));
                    content.push(b' ');
                }
            }
        }
        content
    }

    fn page_font_metrics(&self, page_id: ObjectId) -> BTreeMap<Vec<u8>, FontMetrics<'_>> {
        let mut metrics = BTreeMap::new();
        let Ok(fonts) = self.doc.get_page_fonts(page_id) else {
            log::warn!("Could not read font resources of page {:?}", page_id);
            return metrics;
        };

        for (name, dict) in fonts {
            let font = match self.mode {
                RenderMode::Full => FontMetrics::from_dictionary(&self.doc, dict),
                RenderMode::Reduced => FontMetrics::system(dict),
            };
            metrics.insert(name, font);
        }
        metrics
    }
}

impl PageBackend for LopdfBackend {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_fragments(&self, index: usize) -> Result<Vec<TextFragment>> {
        let page_id = *self.pages.get(index).ok_or_else(|| {
            Error::Extraction(format!(
                "page {} is out of range (document has {} pages)",
                index + 1,
                self.pages.len()
            ))
        })?;

        let Some(content) = self.page_content(page_id)? else {
            log::warn!("Page {} has no content stream", index + 1);
            return Ok(Vec::new());
        };

        let content = lopdf::content::Content::decode(&content)?;
        let fonts = self.page_font_metrics(page_id);
        let interpreter = ContentInterpreter::new(&self.doc, &fonts, self.mode);
        Ok(interpreter.run(&content.operations))
    }
}

/// Decoded stream data; unfiltered streams are returned as stored.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Cut leading bytes before the `%PDF-` header and trailing bytes after the last `%%EOF`.
pub(crate) fn salvage(data: &[u8]) -> &[u8] {
    let start = find(data, b"%PDF-").unwrap_or(0);
    let data = &data[start..];
    match rfind(data, b"%%EOF") {
        Some(end) => &data[..end + 5],
        None => data,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    // Try UTF-8
    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
