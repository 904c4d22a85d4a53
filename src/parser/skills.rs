//! Skills section parser.

use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::{is_bullet, strip_bullet, BULLET};
use crate::model::{RawLine, SkillGroup};

static CATEGORY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:–—]+?)\s*[:–—]\s*(.+)$").unwrap());
static CATEGORY_DECORATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•\-*]").unwrap());
static LEADING_GLYPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-–—*]\s*").unwrap());

/// Category given to bullet skills that appear before any named group.
const DEFAULT_CATEGORY: &str = "Skills";

/// Parse the skills bucket. Always returns at least one group.
pub fn parse_skills(lines: &[RawLine]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();

    for line in lines {
        let text = line.text.as_str();

        if let Some(group) = category_group(text) {
            groups.push(group);
            continue;
        }

        if is_bullet(text) {
            let item = strip_bullet(text);
            match groups.last_mut() {
                Some(last) => {
                    last.items.push_str(", ");
                    last.items.push_str(&item);
                }
                None => groups.push(SkillGroup::new(DEFAULT_CATEGORY, item)),
            }
        } else if text.chars().count() > 3 {
            let items = LEADING_GLYPH.replace(text, "");
            groups.push(SkillGroup::new("", items.trim()));
        }
    }

    if groups.is_empty() {
        groups.push(SkillGroup::default());
    }
    log::debug!("Parsed {} skill groups", groups.len());
    groups
}

/// `Category: items` / `Category — items` with both sides non-empty.
fn category_group(text: &str) -> Option<SkillGroup> {
    let caps = CATEGORY_LINE.captures(text)?;
    let category = BULLET.replace(&caps[1], "");
    let category = CATEGORY_DECORATION.replace_all(&category, "");
    let category = category.trim();
    let items = caps[2].trim();
    if category.is_empty() || items.is_empty() {
        return None;
    }
    Some(SkillGroup::new(category, items))
}
