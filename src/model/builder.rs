//! Accumulators for entries that are still open during a parse.
//!
//! A builder collects fields while its entry is the current one and is
//! consumed by `build()` when the entry closes.

use super::record::{EducationEntry, ExperienceEntry, ProjectEntry};

/// Open education entry.
#[derive(Debug, Clone, Default)]
pub struct EducationBuilder {
    school: String,
    degree: String,
    location: String,
    dates: String,
    coursework: String,
}

impl EducationBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_school(&self) -> bool {
        !self.school.is_empty()
    }

    pub fn has_degree(&self) -> bool {
        !self.degree.is_empty()
    }

    pub fn has_dates(&self) -> bool {
        !self.dates.is_empty()
    }

    pub fn has_location(&self) -> bool {
        !self.location.is_empty()
    }

    pub fn school(&mut self, school: impl Into<String>) -> &mut Self {
        self.school = school.into();
        self
    }

    pub fn degree(&mut self, degree: impl Into<String>) -> &mut Self {
        self.degree = degree.into();
        self
    }

    pub fn location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = location.into();
        self
    }

    pub fn dates(&mut self, dates: impl Into<String>) -> &mut Self {
        self.dates = dates.into();
        self
    }

    /// Replace the coursework text.
    pub fn coursework(&mut self, coursework: impl Into<String>) -> &mut Self {
        self.coursework = coursework.into();
        self
    }

    /// Append to the coursework text using `separator` when it is non-empty.
    pub fn append_coursework(&mut self, text: &str, separator: &str) -> &mut Self {
        if !self.coursework.is_empty() {
            self.coursework.push_str(separator);
        }
        self.coursework.push_str(text);
        self
    }

    /// Close the entry.
    pub fn build(self) -> EducationEntry {
        EducationEntry {
            school: self.school,
            degree: self.degree,
            location: self.location,
            dates: self.dates,
            coursework: self.coursework,
        }
    }
}

/// Open experience entry.
#[derive(Debug, Clone, Default)]
pub struct ExperienceBuilder {
    title: String,
    company: String,
    location: String,
    dates: String,
    bullets: Vec<String>,
}

impl ExperienceBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn has_company(&self) -> bool {
        !self.company.is_empty()
    }

    pub fn has_dates(&self) -> bool {
        !self.dates.is_empty()
    }

    pub fn has_location(&self) -> bool {
        !self.location.is_empty()
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn company(&mut self, company: impl Into<String>) -> &mut Self {
        self.company = company.into();
        self
    }

    pub fn location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = location.into();
        self
    }

    pub fn dates(&mut self, dates: impl Into<String>) -> &mut Self {
        self.dates = dates.into();
        self
    }

    pub fn bullet(&mut self, bullet: impl Into<String>) -> &mut Self {
        self.bullets.push(bullet.into());
        self
    }

    /// Close the entry, substituting the `[""]` placeholder for no bullets.
    pub fn build(self) -> ExperienceEntry {
        ExperienceEntry {
            title: self.title,
            company: self.company,
            location: self.location,
            dates: self.dates,
            bullets: placeholder_if_empty(self.bullets),
        }
    }
}

/// Open project entry.
#[derive(Debug, Clone, Default)]
pub struct ProjectBuilder {
    name: String,
    tech: String,
    bullets: Vec<String>,
}

impl ProjectBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn has_tech(&self) -> bool {
        !self.tech.is_empty()
    }

    pub fn has_bullets(&self) -> bool {
        !self.bullets.is_empty()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn tech(&mut self, tech: impl Into<String>) -> &mut Self {
        self.tech = tech.into();
        self
    }

    pub fn bullet(&mut self, bullet: impl Into<String>) -> &mut Self {
        self.bullets.push(bullet.into());
        self
    }

    /// Close the entry, substituting the `[""]` placeholder for no bullets.
    pub fn build(self) -> ProjectEntry {
        ProjectEntry {
            name: self.name,
            tech: self.tech,
            bullets: placeholder_if_empty(self.bullets),
        }
    }
}

fn placeholder_if_empty(bullets: Vec<String>) -> Vec<String> {
    if bullets.is_empty() {
        vec![String::new()]
    } else {
        bullets
    }
}
