//! Student record model

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Maximum name length, in characters.
pub const NAME_MAX: usize = 63;
/// Maximum grade length, in characters.
pub const GRADE_MAX: usize = 7;

/// A single student record.
///
/// `grade` is plaintext in memory; the SQLite backend stores it as cipher
/// output, the text backend stores it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub grade: String,
}

impl Student {
    pub fn new(id: i64, name: impl Into<String>, age: i64, grade: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }

    /// Length-only bounds check. Character content is deliberately not
    /// validated; the text format's lack of escaping is a documented quirk
    /// of that encoding, not a property of the record itself.
    pub fn validate(&self) -> Result<()> {
        if self.name.chars().count() > NAME_MAX {
            return Err(RosterError::InvalidRecord(format!(
                "name longer than {NAME_MAX} characters"
            )));
        }
        validate_grade(&self.grade)
    }
}

/// Bounds check for a grade value on its own (update path).
pub fn validate_grade(grade: &str) -> Result<()> {
    if grade.chars().count() > GRADE_MAX {
        return Err(RosterError::InvalidRecord(format!(
            "grade longer than {GRADE_MAX} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        let s = Student::new(1, "a".repeat(NAME_MAX), 20, "A+");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_long_name() {
        let s = Student::new(1, "a".repeat(NAME_MAX + 1), 20, "A+");
        assert!(matches!(s.validate(), Err(RosterError::InvalidRecord(_))));
    }

    #[test]
    fn test_validate_rejects_long_grade() {
        let s = Student::new(1, "Alice", 20, "A+++++++");
        assert!(matches!(s.validate(), Err(RosterError::InvalidRecord(_))));
    }

    #[test]
    fn test_character_content_is_not_validated() {
        let s = Student::new(1, "comma, inc.", 20, "A+");
        assert!(s.validate().is_ok());
    }
}
