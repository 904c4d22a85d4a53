//! Projects section parser.

use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::{find_date_range, is_bullet, strip_bullet, strip_separators};
use crate::model::{ProjectBuilder, ProjectEntry, RawLine};

static PAREN_TECH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)\s*$").unwrap());
static NAME_TECH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s*[|–—]\s*(.+)$").unwrap());

/// Project header lines are between these lengths (exclusive).
const HEADER_LEN: (usize, usize) = (2, 120);

/// Parse the projects bucket. Always returns at least one entry.
pub fn parse_projects(lines: &[RawLine]) -> Vec<ProjectEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ProjectBuilder> = None;

    for line in lines {
        let text = line.text.as_str();

        if is_bullet(text) {
            current
                .get_or_insert_with(ProjectBuilder::new)
                .bullet(strip_bullet(text));
            continue;
        }

        let len = text.chars().count();
        if len <= HEADER_LEN.0 || len >= HEADER_LEN.1 {
            continue;
        }

        if let Some(open) = current.take() {
            if open.has_name() || open.has_bullets() {
                entries.push(open.build());
            }
        }
        current = Some(project_header(text));
    }

    if let Some(open) = current {
        entries.push(open.build());
    }
    if entries.is_empty() {
        entries.push(ProjectEntry::default());
    }
    log::debug!("Parsed {} project entries", entries.len());
    entries
}

/// Start an entry from a header line: `Name (Tech)`, `Name | Tech` or just `Name`.
fn project_header(text: &str) -> ProjectBuilder {
    let mut entry = ProjectBuilder::new();

    let mut rest = match find_date_range(text) {
        Some(date) => text
            .replacen(date, "", 1)
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '|' | '·' | '•' | '–' | '—'))
            .trim()
            .to_string(),
        None => text.to_string(),
    };

    if let Some(caps) = PAREN_TECH.captures(&rest) {
        entry.tech(caps[1].trim());
        let whole = caps[0].to_string();
        rest = rest.replacen(&whole, "", 1).trim().to_string();
    }

    match NAME_TECH.captures(&rest) {
        Some(caps) => {
            entry.name(caps[1].trim());
            if !entry.has_tech() {
                entry.tech(caps[2].trim());
            }
        }
        None => {
            entry.name(strip_separators(&rest).trim());
        }
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(texts: &[&str]) -> Vec<ProjectEntry> {
        parse_projects(&RawLine::from_texts(texts.iter().copied()))
    }

    #[test]
    fn test_pipe_tech_and_dates() {
        let entries = parse(&[
            "Gitlytics | Python, Flask, React | June 2020 - Present",
            "• Developed a full-stack web application",
            "• Implemented GitHub OAuth",
        ]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Gitlytics");
        assert_eq!(entries[0].tech, "Python, Flask, React");
        assert_eq!(entries[0].bullets.len(), 2);
    }

    #[test]
    fn test_parenthesized_tech() {
        let entries = parse(&["Simple Paintball (Spigot API, Java, Maven)", "- Built a plugin"]);
        assert_eq!(entries[0].name, "Simple Paintball");
        assert_eq!(entries[0].tech, "Spigot API, Java, Maven");
        assert_eq!(entries[0].bullets, vec!["Built a plugin"]);
    }

    #[test]
    fn test_every_header_line_opens_entry() {
        let entries = parse(&["Compiler", "• Lexer", "Raytracer", "Kernel"]);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Compiler", "Raytracer", "Kernel"]);
        assert_eq!(entries[1].bullets, vec![String::new()]);
    }

    #[test]
    fn test_short_lines_skipped() {
        let entries = parse(&["ab", "Website"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Website");
    }

    #[test]
    fn test_empty_bucket_placeholder() {
        assert_eq!(parse(&[]), vec![ProjectEntry::default()]);
    }
}
