//! Résumé parsing: section splitting and per-section field heuristics.

mod education;
mod experience;
mod options;
mod patterns;
mod personal;
mod projects;
mod section;
mod skills;

pub use education::parse_education;
pub use experience::{assign_title_company, parse_experience};
pub use options::{ParseOptions, DEFAULT_MIN_CONTENT_CHARS};
pub use personal::parse_personal;
pub use projects::parse_projects;
pub use section::{detect_header, split_sections, Section, SectionBuckets};
pub use skills::parse_skills;

use std::path::Path;

use crate::detect::DocumentFormat;
use crate::error::{Error, Result};
use crate::extract::extract_lines;
use crate::model::{RawLine, ResumeRecord};

/// Résumé parser over document bytes.
///
/// Stages run strictly in sequence: extraction, the content-length check,
/// section splitting and then the field parsers.
#[derive(Debug, Clone, Default)]
pub struct ResumeParser {
    options: ParseOptions,
}

impl ResumeParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Set the minimum amount of extracted text.
    pub fn min_content_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_min_content_chars(chars);
        self
    }

    /// Disable the reduced-mode retry.
    pub fn without_fallback(mut self) -> Self {
        self.options = self.options.without_fallback();
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Extract the lines of a document and check there is enough of them.
    pub fn extract(&self, data: &[u8], format: DocumentFormat) -> Result<Vec<RawLine>> {
        let lines = extract_lines(data, format, &self.options)?;
        check_content(&lines, self.options.min_content_chars)?;
        Ok(lines)
    }

    /// Parse document bytes of the declared format.
    pub fn parse_bytes(&self, data: &[u8], format: DocumentFormat) -> Result<ResumeRecord> {
        let lines = self.extract(data, format)?;
        Ok(parse_lines(&lines))
    }

    /// Parse a file, taking the format from its extension.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ResumeRecord> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let data = std::fs::read(path)?;
        self.parse_bytes(&data, format)
    }
}

/// Reject extractions shorter than `required` characters (newline-joined).
fn check_content(lines: &[RawLine], required: usize) -> Result<()> {
    let found = content_chars(lines);
    if found < required {
        return Err(Error::InsufficientContent { found, required });
    }
    Ok(())
}

fn content_chars(lines: &[RawLine]) -> usize {
    let chars: usize = lines.iter().map(|l| l.text.chars().count()).sum();
    chars + lines.len().saturating_sub(1)
}

/// Run splitting and field parsing over extracted lines.
pub fn parse_lines(lines: &[RawLine]) -> ResumeRecord {
    let buckets = split_sections(lines);

    let record = ResumeRecord {
        personal: parse_personal(&buckets.header),
        education: parse_education(&buckets.education),
        experience: parse_experience(&buckets.experience),
        projects: parse_projects(&buckets.projects),
        skills: parse_skills(&buckets.skills),
    };

    log::debug!(
        "Parsed record: name={:?}, {} education, {} experience, {} projects, {} skill groups",
        record.personal.name,
        record.education.len(),
        record.experience.len(),
        record.projects.len(),
        record.skills.len()
    );
    record
}

/// Parse already-extracted, newline-separated text.
pub fn parse_text(text: &str) -> ResumeRecord {
    parse_lines(&RawLine::from_texts(text.lines()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jake Ryan
123-456-7890 | jake@su.edu | linkedin.com/in/jake | github.com/jake
EDUCATION
Southwestern University
Bachelor of Arts in Computer Science
Georgetown, TX
Aug 2018 – May 2021
EXPERIENCE
Software Engineer — Acme Corp
Jun 2021 - Present
• Built a pipeline
• Reduced latency by 40%
PROJECTS
Gitlytics | Python, Flask
• Visualized GitHub data
TECHNICAL SKILLS
Languages: Python, Java, C++
Frameworks: React, Flask
";

    #[test]
    fn test_parse_text_end_to_end() {
        let record = parse_text(RESUME);
        assert_eq!(record.personal.name, "Jake Ryan");
        assert_eq!(record.personal.github, "github.com/jake");
        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].school, "Southwestern University");
        assert_eq!(record.experience[0].company, "Acme Corp");
        assert_eq!(record.projects[0].name, "Gitlytics");
        assert_eq!(record.projects[0].tech, "Python, Flask");
        assert_eq!(record.skills.len(), 2);
    }

    #[test]
    fn test_parse_text_is_idempotent() {
        assert_eq!(parse_text(RESUME), parse_text(RESUME));
    }

    #[test]
    fn test_empty_text_is_placeholder() {
        let record = parse_text("");
        assert_eq!(record, ResumeRecord::placeholder());
        assert!(record.is_fully_covered());
    }

    #[test]
    fn test_content_check() {
        let lines = RawLine::from_texts(["abc", "de"]);
        // "abc\nde"
        assert_eq!(content_chars(&lines), 6);
        assert!(check_content(&lines, 6).is_ok());
        match check_content(&lines, 50) {
            Err(Error::InsufficientContent { found, required }) => {
                assert_eq!(found, 6);
                assert_eq!(required, 50);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(check_content(&[], 0).is_ok());
    }

    #[test]
    fn test_builder_options() {
        let parser = ResumeParser::new().min_content_chars(10).without_fallback();
        assert_eq!(parser.options().min_content_chars, 10);
        assert!(!parser.options().fallback);
    }
}
