//! Record-level types.

use serde::{Deserialize, Serialize};

/// A single reconstructed line of document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    /// Position of the line in the extracted sequence (0-based)
    pub index: usize,
    /// Trimmed, non-empty line text
    pub text: String,
}

impl RawLine {
    /// Create a new raw line.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Number the given texts in order, dropping blanks.
    pub fn from_texts<I, S>(texts: I) -> Vec<RawLine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .enumerate()
            .map(|(index, text)| RawLine { index, text })
            .collect()
    }
}

/// Identity and contact block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

impl PersonalInfo {
    /// Check if no field carries text.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty()
            && self.linkedin.is_empty()
            && self.github.is_empty()
    }
}

/// One school/degree entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub location: String,
    pub dates: String,
    /// Coursework, GPA and activity notes folded into one string
    pub coursework: String,
}

impl EducationEntry {
    /// Check if no field carries text.
    pub fn is_empty(&self) -> bool {
        self.school.is_empty()
            && self.degree.is_empty()
            && self.location.is_empty()
            && self.dates.is_empty()
            && self.coursework.is_empty()
    }
}

/// One position held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    /// Never empty: `[""]` when no bullets were found
    pub bullets: Vec<String>,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            dates: String::new(),
            bullets: vec![String::new()],
        }
    }
}

impl ExperienceEntry {
    /// Check if no field carries text.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.company.is_empty()
            && self.location.is_empty()
            && self.dates.is_empty()
            && self.bullets.iter().all(|b| b.is_empty())
    }
}

/// One project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub tech: String,
    /// Never empty: `[""]` when no bullets were found
    pub bullets: Vec<String>,
}

impl Default for ProjectEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            tech: String::new(),
            bullets: vec![String::new()],
        }
    }
}

impl ProjectEntry {
    /// Check if no field carries text.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.tech.is_empty() && self.bullets.iter().all(|b| b.is_empty())
    }
}

/// A category of skills; `items` keeps the source's free-text list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: String,
}

impl SkillGroup {
    /// Create a new skill group.
    pub fn new(category: impl Into<String>, items: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            items: items.into(),
        }
    }

    /// Check if no field carries text.
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.items.is_empty()
    }
}

/// The structured résumé produced by one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub personal: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillGroup>,
}

impl ResumeRecord {
    /// A record with an empty personal block and one placeholder per list.
    pub fn placeholder() -> Self {
        Self {
            personal: PersonalInfo::default(),
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry::default()],
            projects: vec![ProjectEntry::default()],
            skills: vec![SkillGroup::default()],
        }
    }

    /// Check if nothing at all was recognized.
    pub fn is_blank(&self) -> bool {
        self.personal.is_empty()
            && self.education.iter().all(EducationEntry::is_empty)
            && self.experience.iter().all(ExperienceEntry::is_empty)
            && self.projects.iter().all(ProjectEntry::is_empty)
            && self.skills.iter().all(SkillGroup::is_empty)
    }

    /// Check that every list field holds at least one entry.
    pub fn is_fully_covered(&self) -> bool {
        !self.education.is_empty()
            && !self.experience.is_empty()
            && !self.projects.is_empty()
            && !self.skills.is_empty()
    }
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_lines_from_texts() {
        let lines = RawLine::from_texts(["  Jake Ryan ", "", "   ", "jake@su.edu"]);
        assert_eq!(
            lines,
            vec![RawLine::new(0, "Jake Ryan"), RawLine::new(1, "jake@su.edu")]
        );
    }

    #[test]
    fn test_placeholder_record() {
        let record = ResumeRecord::placeholder();
        assert!(record.is_blank());
        assert!(record.is_fully_covered());
        assert_eq!(record.experience[0].bullets, vec![String::new()]);
        assert_eq!(record.projects[0].bullets, vec![String::new()]);
    }

    #[test]
    fn test_serialized_field_names() {
        let record = ResumeRecord::placeholder();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["personal"]["linkedin"].is_string());
        assert!(value["education"][0]["coursework"].is_string());
        assert!(value["experience"][0]["bullets"].is_array());
        assert!(value["projects"][0]["tech"].is_string());
        assert!(value["skills"][0]["items"].is_string());
    }
}
