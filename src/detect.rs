//! Document format tags and byte-level format detection.

use crate::error::{Error, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use std::str::FromStr;

/// Format tag declared by the caller for a document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Discrete pages of positioned text fragments (PDF).
    PageBased,
    /// Continuous paragraphs without positioning (DOCX).
    FlowText,
}

impl DocumentFormat {
    /// Map a file extension (without the dot) to a format tag.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::PageBased),
            "docx" | "doc" => Ok(Self::FlowText),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Map a file path to a format tag using its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// MIME type conventionally associated with the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PageBased => "application/pdf",
            Self::FlowText => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" | "page" | "page-based" => Ok(Self::PageBased),
            "docx" | "doc" | "flow" | "flow-text" => Ok(Self::FlowText),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageBased => write!(f, "page-based"),
            Self::FlowText => write!(f, "flow-text"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// ZIP local file header: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// Main body part of a word-processor container.
pub(crate) const DOCX_BODY: &str = "word/document.xml";

/// Sniff the format of a byte buffer.
///
/// # Returns
/// * `Ok(DocumentFormat::PageBased)` for data starting with `%PDF-`
/// * `Ok(DocumentFormat::FlowText)` for a ZIP container holding `word/document.xml`
/// * `Err(Error::UnsupportedFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocumentFormat> {
    if data.starts_with(PDF_MAGIC) {
        return Ok(DocumentFormat::PageBased);
    }

    if data.starts_with(ZIP_MAGIC) && zip_contains(data, DOCX_BODY) {
        return Ok(DocumentFormat::FlowText);
    }

    Err(Error::UnsupportedFormat("unrecognized content".to_string()))
}

/// Sniff the format of a file on disk.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentFormat> {
    let mut data = Vec::new();
    std::fs::File::open(path)?.read_to_end(&mut data)?;
    detect_format_from_bytes(&data)
}

fn zip_contains(data: &[u8], name: &str) -> bool {
    let Ok(mut archive) = zip::ZipArchive::new(Cursor::new(data)) else {
        return false;
    };
    let found = archive.by_name(name).is_ok();
    found
}
