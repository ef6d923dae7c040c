//! Student record model.

use serde::{Deserialize, Serialize};

/// A single student record.
///
/// Fields absent from a request body deserialize to their zero values
/// (`""` / `0`); unknown fields are ignored. Field contents are not
/// validated beyond JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    /// Unique key within the store
    pub id: String,
    /// Display name
    pub name: String,
    /// Age in years (no range restriction)
    pub age: i64,
    /// Contact address (no format restriction)
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_decode_as_zero_values() {
        let student: Student = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert_eq!(student.id, "s1");
        assert_eq!(student.name, "");
        assert_eq!(student.age, 0);
        assert_eq!(student.email, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let student: Student =
            serde_json::from_str(r#"{"id": "s1", "name": "Ann", "grade": "A"}"#).unwrap();
        assert_eq!(student.id, "s1");
        assert_eq!(student.name, "Ann");
    }

    #[test]
    fn test_wrong_field_type_is_a_parse_error() {
        let result: Result<Student, _> = serde_json::from_str(r#"{"id": "s1", "age": "ten"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_age_is_accepted() {
        let student: Student = serde_json::from_str(r#"{"id": "s1", "age": -3}"#).unwrap();
        assert_eq!(student.age, -3);
    }
}
