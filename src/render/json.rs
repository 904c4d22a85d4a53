//! JSON rendering for résumé records.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a record (or section buckets) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResumeRecord, SkillGroup};

    #[test]
    fn test_to_json_pretty() {
        let mut record = ResumeRecord::placeholder();
        record.personal.name = "Jake Ryan".to_string();
        record.skills = vec![SkillGroup::new("Languages", "Rust, Go")];

        let json = to_json(&record, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"personal\""));
        assert!(json.contains("\"coursework\""));
        assert!(json.contains("Jake Ryan"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&ResumeRecord::placeholder(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(json.contains("\"bullets\":[\"\"]"));
    }

    #[test]
    fn test_json_round_trip() {
        let record = ResumeRecord::placeholder();
        let json = to_json(&record, JsonFormat::Compact).unwrap();
        let back: ResumeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
