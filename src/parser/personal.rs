//! Personal-info extraction from the header block.

use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::{EMAIL, GITHUB, LINKEDIN, PHONE, PORTFOLIO, URL};
use crate::model::{PersonalInfo, RawLine};

static NAME_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[|·•,\-–—]").unwrap());
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{3}").unwrap());

/// Parse the header bucket into contact fields and a name.
pub fn parse_personal(lines: &[RawLine]) -> PersonalInfo {
    let all_text = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let first = |re: &Regex| {
        re.find(&all_text)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    PersonalInfo {
        name: find_name(lines).unwrap_or_default(),
        email: first(&EMAIL),
        phone: first(&PHONE),
        linkedin: first(&LINKEDIN),
        github: first(&GITHUB),
    }
}

/// First header line that still looks like a name once contact details are removed.
fn find_name(lines: &[RawLine]) -> Option<String> {
    lines.iter().find_map(|line| {
        let cleaned = clean_name_candidate(&line.text);
        is_plausible_name(&cleaned).then_some(cleaned)
    })
}

fn clean_name_candidate(line: &str) -> String {
    let mut text = line.to_string();
    for re in [&*EMAIL, &*PHONE, &*LINKEDIN, &*GITHUB, &*PORTFOLIO, &*URL] {
        text = re.replace_all(&text, "").into_owned();
    }
    NAME_PUNCTUATION.replace_all(&text, "").trim().to_string()
}

fn is_plausible_name(text: &str) -> bool {
    let len = text.chars().count();
    (2..50).contains(&len) && !DIGIT_RUN.is_match(text) && !text.contains('@')
}
