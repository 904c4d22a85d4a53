//! Education section parser.

use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::{
    find_date_range, find_gpa, find_location, has_degree, is_bullet, strip_bullet,
    strip_entry_noise,
};
use crate::model::{EducationBuilder, EducationEntry, RawLine};

static COURSEWORK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(coursework|courses|relevant)\b").unwrap());
static COURSEWORK_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i).*?(?:coursework|courses|relevant\s*coursework)\s*[:–—\-]?\s*").unwrap()
});
static COURSEWORK_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(coursework|courses)\b").unwrap());
static COURSEWORK_BULLET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i).*?(?:coursework|courses)\s*[:–—\-]?\s*").unwrap());

/// School lines are between these lengths (exclusive).
const SCHOOL_LEN: (usize, usize) = (2, 100);

/// Parse the education bucket. Always returns at least one entry.
pub fn parse_education(lines: &[RawLine]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut current: Option<EducationBuilder> = None;

    for line in lines {
        let text = line.text.as_str();
        let date = find_date_range(text);
        let degree = has_degree(text);
        let bullet = is_bullet(text);
        let gpa = find_gpa(text);
        let coursework = COURSEWORK_LINE.is_match(text);

        let opens_entry = match &current {
            None => degree || date.is_some(),
            Some(open) => degree && open.has_degree(),
        };
        if opens_entry {
            if let Some(open) = current.take() {
                entries.push(open.build());
            }
        }
        let entry = current.get_or_insert_with(EducationBuilder::new);

        if let Some(date) = date {
            if !entry.has_dates() {
                entry.dates(date);
            }
        }
        if !entry.has_location() {
            if let Some(location) = find_location(text) {
                entry.location(location);
            }
        }

        if degree {
            entry.degree(strip_entry_noise(text));
        } else if let Some(gpa) = gpa {
            entry.append_coursework(gpa, " | ");
        } else if coursework {
            entry.coursework(COURSEWORK_PREFIX.replace(text, "").trim());
        } else if bullet {
            let item = strip_bullet(text);
            if COURSEWORK_BULLET.is_match(&item) {
                entry.coursework(COURSEWORK_BULLET_PREFIX.replace(&item, "").trim());
            } else if !item.is_empty() {
                entry.append_coursework(&item, ", ");
            }
        } else if !entry.has_school() {
            if let Some(school) = school_candidate(text) {
                entry.school(school);
            }
        }
    }

    if let Some(open) = current {
        entries.push(open.build());
    }
    if entries.is_empty() {
        entries.push(EducationEntry::default());
    }
    log::debug!("Parsed {} education entries", entries.len());
    entries
}

/// Cleaned school name of a plain line, unless nothing is left once
/// dates, location and separators are removed.
fn school_candidate(text: &str) -> Option<String> {
    let len = text.chars().count();
    if len <= SCHOOL_LEN.0 || len >= SCHOOL_LEN.1 {
        return None;
    }
    let school = strip_entry_noise(text);
    (!school.is_empty()).then_some(school)
}
