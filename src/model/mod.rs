//! Résumé record types.
//!
//! The record is the only output of the parser. Every list field holds at
//! least one entry so consumers never branch on emptiness; entries are
//! assembled through the builders and are not mutated once
//! emitted.

mod builder;
mod record;

pub use builder::{EducationBuilder, ExperienceBuilder, ProjectBuilder};
pub use record::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, RawLine, ResumeRecord,
    SkillGroup,
};
