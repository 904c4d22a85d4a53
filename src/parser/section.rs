//! Section header detection and line partitioning.
//!
//! Headers are recognized with an ordered table of keyword patterns: the
//! first entry whose pattern matches wins, subject to a confidence gate on
//! line length and capitalization. Header lines are consumed and never
//! appear in any bucket.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::RawLine;

/// Stripped lines longer than this are always content.
const MAX_HEADER_CHARS: usize = 70;

/// Stripped lines shorter than this pass the confidence gate outright.
const SHORT_HEADER_CHARS: usize = 40;

/// Longer headers must carry the keyword within this many leading characters.
const KEYWORD_LEAD_CHARS: usize = 5;

/// A named résumé section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Contact and identity block before the first header
    Header,
    Education,
    Experience,
    Projects,
    Skills,
    Certifications,
    Summary,
}

impl Section {
    /// All sections in bucket order.
    pub const ALL: [Section; 7] = [
        Section::Header,
        Section::Education,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Certifications,
        Section::Summary,
    ];

    /// Lower-case key of the section.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
            Section::Summary => "summary",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Header keyword table in priority order.
static SECTION_TABLE: Lazy<Vec<(Section, Regex)>> = Lazy::new(|| {
    [
        (
            Section::Education,
            r"(?i)\b(education|academic\s*background|qualifications?)\b",
        ),
        (
            Section::Experience,
            r"(?i)\b(experience|employment|work\s*history|professional\s*experience|internships?)\b",
        ),
        (
            Section::Projects,
            r"(?i)\b(projects?|personal\s*projects?|academic\s*projects?|side\s*projects?)\b",
        ),
        (
            Section::Skills,
            r"(?i)\b(skills?|technical\s*skills?|technologies|core\s*competenc|proficienc|tools?\s*(?:&|and)\s*technolog)",
        ),
        (
            Section::Certifications,
            r"(?i)\b(certifications?|licenses?|awards?|honors?|achievements?)\b",
        ),
        (
            Section::Summary,
            r"(?i)\b(summary|objective|profile|about\s*me)\b",
        ),
    ]
    .into_iter()
    .map(|(section, pattern)| (section, Regex::new(pattern).unwrap()))
    .collect()
});

static DECORATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—_=:]").unwrap());

/// Detect whether a line is a section header, and for which section.
pub fn detect_header(line: &str) -> Option<Section> {
    let stripped = DECORATION.replace_all(line, "");
    let stripped = stripped.trim();
    let len = stripped.chars().count();
    if len == 0 || len > MAX_HEADER_CHARS {
        return None;
    }

    let confident = len < SHORT_HEADER_CHARS || is_all_caps(stripped);

    for (section, pattern) in SECTION_TABLE.iter() {
        let Some(m) = pattern.find(stripped) else {
            continue;
        };
        if confident || stripped[..m.start()].chars().count() < KEYWORD_LEAD_CHARS {
            return Some(*section);
        }
    }
    None
}

fn is_all_caps(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase()) && !text.chars().any(|c| c.is_lowercase())
}

/// Lines of a document partitioned by section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionBuckets {
    pub header: Vec<RawLine>,
    pub education: Vec<RawLine>,
    pub experience: Vec<RawLine>,
    pub projects: Vec<RawLine>,
    pub skills: Vec<RawLine>,
    pub certifications: Vec<RawLine>,
    pub summary: Vec<RawLine>,
}

impl SectionBuckets {
    /// Lines of one section.
    pub fn get(&self, section: Section) -> &[RawLine] {
        match section {
            Section::Header => &self.header,
            Section::Education => &self.education,
            Section::Experience => &self.experience,
            Section::Projects => &self.projects,
            Section::Skills => &self.skills,
            Section::Certifications => &self.certifications,
            Section::Summary => &self.summary,
        }
    }

    fn bucket_mut(&mut self, section: Section) -> &mut Vec<RawLine> {
        match section {
            Section::Header => &mut self.header,
            Section::Education => &mut self.education,
            Section::Experience => &mut self.experience,
            Section::Projects => &mut self.projects,
            Section::Skills => &mut self.skills,
            Section::Certifications => &mut self.certifications,
            Section::Summary => &mut self.summary,
        }
    }

    /// Total number of content lines across all sections, summary counted once.
    pub fn line_count(&self) -> usize {
        Section::ALL
            .iter()
            .map(|s| self.get(*s).len())
            .sum::<usize>()
            - self.summary.len()
    }
}

/// Partition lines into section buckets in a single pass.
///
/// Summary lines are also appended to the header bucket once the pass ends.
pub fn split_sections(lines: &[RawLine]) -> SectionBuckets {
    let mut buckets = SectionBuckets::default();
    let mut current = Section::Header;

    for line in lines {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(section) = detect_header(text) {
            log::trace!("Section header {:?} -> {}", text, section);
            current = section;
            continue;
        }

        buckets.bucket_mut(current).push(RawLine::new(line.index, text));
    }

    if !buckets.summary.is_empty() {
        let summary = buckets.summary.clone();
        buckets.header.extend(summary);
    }

    for section in Section::ALL {
        log::debug!("Section {}: {} lines", section, buckets.get(section).len());
    }
    buckets
}
