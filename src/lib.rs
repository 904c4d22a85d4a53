//! # unresume
//!
//! Heuristic résumé parser for Rust.
//!
//! This library reconstructs the text lines of a résumé document (PDF or
//! DOCX), partitions them into sections and turns each section into
//! structured entries: personal info, education, experience, projects and
//! skills.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unresume::{parse, render, DocumentFormat};
//!
//! fn main() -> unresume::Result<()> {
//!     let data = std::fs::read("resume.pdf")?;
//!     let record = parse(&data, DocumentFormat::PageBased)?;
//!
//!     println!("{}", record.personal.name);
//!     println!("{}", render::to_json(&record, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction**: page-based documents are rebuilt line by line from
//!   positioned text fragments; flow-text documents yield one line per
//!   paragraph.
//! - **Section splitting**: header keywords route lines into buckets.
//! - **Field parsing**: pattern heuristics per section (dates, locations,
//!   degrees, bullets, delimiters).
//!
//! Parsing is a pure function of the input: the same bytes always produce
//! the same record, and every list in the record has at least one entry.

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, DocumentFormat};
pub use error::{Error, Result};
pub use extract::{extract_lines, RenderMode};
pub use model::{
    EducationBuilder, EducationEntry, ExperienceBuilder, ExperienceEntry, PersonalInfo,
    ProjectBuilder, ProjectEntry, RawLine, ResumeRecord, SkillGroup,
};
pub use parser::{
    parse_lines, parse_text, split_sections, ParseOptions, ResumeParser, Section, SectionBuckets,
};
pub use render::JsonFormat;

use std::path::Path;

/// Parse document bytes of the declared format into a résumé record.
///
/// # Example
///
/// ```no_run
/// use unresume::{parse, DocumentFormat};
///
/// let data = std::fs::read("resume.docx").unwrap();
/// let record = parse(&data, DocumentFormat::FlowText).unwrap();
/// println!("{} projects", record.projects.len());
/// ```
pub fn parse(data: &[u8], format: DocumentFormat) -> Result<ResumeRecord> {
    ResumeParser::new().parse_bytes(data, format)
}

/// Parse document bytes with custom options.
///
/// # Example
///
/// ```no_run
/// use unresume::{parse_with_options, DocumentFormat, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_min_content_chars(200)
///     .without_fallback();
/// let data = std::fs::read("resume.pdf").unwrap();
/// let record = parse_with_options(&data, DocumentFormat::PageBased, options).unwrap();
/// ```
pub fn parse_with_options(
    data: &[u8],
    format: DocumentFormat,
    options: ParseOptions,
) -> Result<ResumeRecord> {
    ResumeParser::with_options(options).parse_bytes(data, format)
}

/// Parse a file, taking the format from its extension (`.pdf`, `.docx`, `.doc`).
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ResumeRecord> {
    ResumeParser::new().parse_file(path)
}

/// Parse a résumé and render it as JSON.
///
/// # Example
///
/// ```no_run
/// use unresume::{to_json, DocumentFormat, JsonFormat};
///
/// let data = std::fs::read("resume.pdf").unwrap();
/// let json = to_json(&data, DocumentFormat::PageBased, JsonFormat::Pretty).unwrap();
/// std::fs::write("resume.json", json).unwrap();
/// ```
pub fn to_json(data: &[u8], format: DocumentFormat, json_format: JsonFormat) -> Result<String> {
    let record = parse(data, format)?;
    render::to_json(&record, json_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let err = parse_file("resume.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io() {
        let err = parse_file("/definitely/not/here/resume.pdf").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
