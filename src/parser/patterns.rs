//! Shared line patterns for the field parsers.

use once_cell::sync::Lazy;
use regex::Regex;

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

pub(crate) static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap());

pub(crate) static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{2,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}").unwrap()
});

pub(crate) static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").unwrap());

pub(crate) static GITHUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)github\.com/[\w-]+").unwrap());

/// Bare personal-site domains such as `jake.dev/blog`.
pub(crate) static PORTFOLIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?[\w-]+\.(?:com|io|dev|me|org|net)(?:/\S*)?").unwrap()
});

pub(crate) static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://\S+").unwrap());

/// `Jan 2020 – May 2024`, `01/2020 - 12/2023`, `2019 to Present`, ...
pub(crate) static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i){m}\.?\s*\d{{2,4}}\s*[-–—to]+\s*(?:{m}\.?\s*\d{{2,4}}|Present|Current|Now|Ongoing)|\d{{1,2}}/\d{{4}}\s*[-–—to]+\s*(?:\d{{1,2}}/\d{{4}}|Present|Current)|\d{{4}}\s*[-–—to]+\s*(?:\d{{4}}|Present|Current)",
        m = MONTH
    );
    Regex::new(&pattern).unwrap()
});

/// Full degree words match in any case, abbreviations only as written.
///
/// Matching abbreviations case-insensitively would make ordinary words such
/// as "as" and "ma" open education entries, so this deliberately departs from
/// a fully case-insensitive degree pattern.
pub(crate) static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?i:Bachelor|Master|Doctor|Associate|Diploma)|B\.?S\.?c?|B\.?A\.?|B\.?E\.?|B\.?Tech|M\.?S\.?c?|M\.?A\.?|M\.?B\.?A\.?|M\.?E\.?|M\.?Tech|Ph\.?D\.?|A\.?A\.?|A\.?S\.?)\b",
    )
    .unwrap()
});

/// Trailing `City, ST` or `City, State`.
pub(crate) static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-zA-Z\s]+,\s*(?:[A-Z]{2}|[A-Z][a-z]+))\s*$").unwrap()
});

pub(crate) static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-–—*▪▸►◦○⬥✦✓→]\s|^\d+[.)]\s").unwrap());

pub(crate) static GPA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:GPA|CGPA|Grade)\s*:?\s*[\d.]+(?:\s*/\s*[\d.]+)?\b").unwrap()
});

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[|·•]").unwrap());

pub(crate) fn is_bullet(line: &str) -> bool {
    BULLET.is_match(line)
}

/// Line text without its leading bullet glyph or list number.
pub(crate) fn strip_bullet(line: &str) -> String {
    BULLET.replace(line, "").trim().to_string()
}

pub(crate) fn find_date_range(line: &str) -> Option<&str> {
    DATE_RANGE.find(line).map(|m| m.as_str())
}

pub(crate) fn has_degree(line: &str) -> bool {
    DEGREE.is_match(line)
}

pub(crate) fn find_gpa(line: &str) -> Option<&str> {
    GPA.find(line).map(|m| m.as_str())
}

/// The trailing location of a line, if any.
pub(crate) fn find_location(line: &str) -> Option<String> {
    LOCATION
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

pub(crate) fn strip_date_range(line: &str) -> String {
    DATE_RANGE.replace(line, "").into_owned()
}

pub(crate) fn strip_location(line: &str) -> String {
    LOCATION.replace(line, "").into_owned()
}

pub(crate) fn strip_separators(line: &str) -> String {
    SEPARATORS.replace_all(line, "").into_owned()
}

/// Remove the date range, trailing location and `|·•` separators, then trim.
pub(crate) fn strip_entry_noise(line: &str) -> String {
    let text = strip_date_range(line);
    let text = strip_location(&text);
    strip_separators(&text).trim().to_string()
}
