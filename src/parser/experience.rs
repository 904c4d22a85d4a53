//! Experience section parser.
//!
//! An entry opens on the first line of the bucket and on every non-bullet
//! line carrying a date range once the open entry already has dates.
//! Bullets always attach to the open entry; plain lines after a complete
//! entry are ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::{find_date_range, find_location, is_bullet, strip_bullet, strip_location};
use crate::model::{ExperienceBuilder, ExperienceEntry, RawLine};

static AT_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+at\s+").unwrap());
static DASH_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[|–—]\s*|\s+-\s+").unwrap());
static COMMA_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s+").unwrap());

/// Parse the experience bucket. Always returns at least one entry.
pub fn parse_experience(lines: &[RawLine]) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ExperienceBuilder> = None;

    for line in lines {
        let text = line.text.as_str();

        if is_bullet(text) {
            current
                .get_or_insert_with(ExperienceBuilder::new)
                .bullet(strip_bullet(text));
            continue;
        }

        if let Some(date) = find_date_range(text) {
            if current.as_ref().map_or(true, |open| open.has_dates()) {
                if let Some(open) = current.take() {
                    entries.push(open.build());
                }
            }
            let entry = current.get_or_insert_with(ExperienceBuilder::new);
            entry.dates(date);
            if !entry.has_location() {
                if let Some(location) = find_location(text) {
                    entry.location(location);
                }
            }
            let rest = remainder(&text.replacen(date, "", 1));
            if !rest.is_empty() {
                assign_title_company(entry, &rest);
            }
            continue;
        }

        match current.as_mut() {
            None => {
                let entry = current.insert(ExperienceBuilder::new());
                if let Some(location) = find_location(text) {
                    entry.location(location);
                }
                let rest = remainder(text);
                if !rest.is_empty() {
                    assign_title_company(entry, &rest);
                }
            }
            Some(entry) if !entry.has_title() || !entry.has_company() => {
                if !entry.has_location() {
                    if let Some(location) = find_location(text) {
                        entry.location(location);
                    }
                }
                let rest = remainder(text);
                if rest.is_empty() {
                    continue;
                }
                if !entry.has_title() {
                    assign_title_company(entry, &rest);
                } else {
                    entry.company(rest);
                }
            }
            // Complete entry: stray prose is ignored
            Some(_) => {}
        }
    }

    if let Some(open) = current {
        entries.push(open.build());
    }
    if entries.is_empty() {
        entries.push(ExperienceEntry::default());
    }
    log::debug!("Parsed {} experience entries", entries.len());
    entries
}

/// Line text without its location, trimmed of whitespace and dangling
/// `|·•` separators.
fn remainder(text: &str) -> String {
    strip_location(text)
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '|' | '·' | '•'))
        .to_string()
}

/// Split `text` into title and company, trying "at", then pipe/dashes, then
/// a comma followed by a capital letter. The first splitter that yields two
/// non-empty sides wins.
pub fn assign_title_company(entry: &mut ExperienceBuilder, text: &str) {
    let split = split_on(&AT_SPLIT, text)
        .or_else(|| split_on(&DASH_SPLIT, text))
        .or_else(|| split_before_capital(text));

    match split {
        Some((title, company)) => {
            entry.title(title).company(company);
        }
        None if !entry.has_title() => {
            entry.title(text);
        }
        None if !entry.has_company() => {
            entry.company(text);
        }
        None => {}
    }
}

fn split_on(re: &Regex, text: &str) -> Option<(String, String)> {
    join_parts(re.split(text).collect())
}

fn split_before_capital(text: &str) -> Option<(String, String)> {
    let mut parts = Vec::new();
    let mut start = 0;
    for m in COMMA_SPLIT.find_iter(text) {
        let next_is_capital = text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase());
        if next_is_capital {
            parts.push(&text[start..m.start()]);
            start = m.end();
        }
    }
    parts.push(&text[start..]);
    join_parts(parts)
}

/// First part is the title, the rest joined with spaces is the company.
fn join_parts(parts: Vec<&str>) -> Option<(String, String)> {
    let (first, rest) = parts.split_first()?;
    let title = first.trim();
    let company = rest.join(" ").trim().to_string();
    if title.is_empty() || company.is_empty() {
        return None;
    }
    Some((title.to_string(), company))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(texts: &[&str]) -> Vec<ExperienceEntry> {
        parse_experience(&RawLine::from_texts(texts.iter().copied()))
    }

    fn split(text: &str) -> (String, String) {
        let mut builder = ExperienceBuilder::new();
        assign_title_company(&mut builder, text);
        let entry = builder.build();
        (entry.title, entry.company)
    }

    #[test]
    fn test_title_dash_company_then_dates() {
        let entries = parse(&[
            "Software Engineer — Acme Corp",
            "Jun 2021 - Present",
            "• Built a pipeline",
            "• Reduced latency by 40%",
        ]);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.title, "Software Engineer");
        assert_eq!(e.company, "Acme Corp");
        assert_eq!(e.dates, "Jun 2021 - Present");
        assert_eq!(e.bullets, vec!["Built a pipeline", "Reduced latency by 40%"]);
    }

    #[test]
    fn test_dated_lines_open_entries() {
        let entries = parse(&[
            "Backend Engineer at Initech | Jan 2020 – May 2021",
            "- Migrated billing",
            "Intern at Globex | May 2019 – Aug 2019 | Springfield, IL",
            // Complete entry: a trailing prose line is not captured
            "Worked on the internal wiki",
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Backend Engineer");
        assert_eq!(entries[0].company, "Initech");
        assert_eq!(entries[0].bullets, vec!["Migrated billing"]);
        assert_eq!(entries[1].title, "Intern");
        assert_eq!(entries[1].company, "Globex");
        assert_eq!(entries[1].location, "Springfield, IL");
        assert_eq!(entries[1].bullets, vec![String::new()]);
    }

    #[test]
    fn test_description_between_dated_entries_is_ignored() {
        let entries = parse(&[
            "Engineer at Acme | Jan 2020 - Dec 2021",
            "Led the platform team for two years",
            "Analyst at Globex | Feb 2018 - Mar 2019",
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Engineer");
        assert_eq!(entries[0].company, "Acme");
        assert_eq!(entries[1].title, "Analyst");
        assert_eq!(entries[1].company, "Globex");
        assert_eq!(entries[1].dates, "Feb 2018 - Mar 2019");
    }

    #[test]
    fn test_title_line_after_complete_entry_is_not_carried() {
        let entries = parse(&[
            "Research Assistant — Texas A&M University",
            "Jun 2020 – Present",
            "• Developed a REST API",
            "Support Specialist | Southwestern University",
            "Sep 2018 – Present",
            "• Set up campus computers",
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].bullets, vec!["Developed a REST API"]);
        assert_eq!(entries[1].title, "");
        assert_eq!(entries[1].company, "");
        assert_eq!(entries[1].dates, "Sep 2018 – Present");
        assert_eq!(entries[1].bullets, vec!["Set up campus computers"]);
    }

    #[test]
    fn test_second_line_fills_company() {
        let entries = parse(&["Research Assistant", "Southwestern University", "2020 - 2021"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Research Assistant");
        assert_eq!(entries[0].company, "Southwestern University");
        assert_eq!(entries[0].dates, "2020 - 2021");
    }

    #[test]
    fn test_splitters() {
        assert_eq!(split("Engineer at Acme"), ("Engineer".into(), "Acme".into()));
        assert_eq!(split("Engineer | Acme"), ("Engineer".into(), "Acme".into()));
        assert_eq!(split("Engineer - Acme"), ("Engineer".into(), "Acme".into()));
        assert_eq!(split("Engineer, Acme Corp"), ("Engineer".into(), "Acme Corp".into()));
        // Hyphenated words and lower-case continuations are not splits
        assert_eq!(split("Full-Stack Developer"), ("Full-Stack Developer".into(), "".into()));
        assert_eq!(split("Tutor, part time"), ("Tutor, part time".into(), "".into()));
    }

    #[test]
    fn test_rest_joined_with_spaces() {
        assert_eq!(
            split("Engineer | Platform | Acme"),
            ("Engineer".into(), "Platform Acme".into())
        );
    }

    #[test]
    fn test_empty_bucket_placeholder() {
        let entries = parse(&[]);
        assert_eq!(entries, vec![ExperienceEntry::default()]);
        assert_eq!(entries[0].bullets, vec![String::new()]);
    }

    #[test]
    fn test_bullet_before_any_header() {
        let entries = parse(&["• Orphan bullet"]);
        assert_eq!(entries[0].bullets, vec!["Orphan bullet"]);
        assert_eq!(entries[0].title, "");
    }
}
