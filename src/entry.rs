use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Date format matching the en-AU short numeric locale, e.g. `16/10/2026`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: String,
}

impl Entry {
    pub fn new(text: String, now: DateTime<Local>) -> Self {
        Entry {
            id: now.timestamp_millis(),
            text,
            date: now.format(DATE_FORMAT).to_string(),
        }
    }

    /// Reads one element of a stored snapshot. Fields of the wrong type, and
    /// elements that are not objects at all, fall back to empty values.
    pub fn from_value(value: &Value) -> Self {
        let string_field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Entry {
            id: value.get("id").and_then(Value::as_i64).unwrap_or(0),
            text: string_field("text"),
            date: string_field("date"),
        }
    }

    /// The `"[date] text"` line shown in the list and written to exports.
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.date, self.text)
    }

    pub fn is_renderable(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn is_exportable(&self) -> bool {
        !self.text.is_empty() && !self.date.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_uses_millis_and_au_date() {
        let now = Local.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        let entry = Entry::new("hello".to_string(), now);
        assert_eq!(entry.id, now.timestamp_millis());
        assert_eq!(entry.date, "05/01/2024");
        assert_eq!(entry.display_line(), "[05/01/2024] hello");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let entry: Entry = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(entry.id, 7);
        assert!(!entry.is_renderable());
        assert!(!entry.is_exportable());
    }

    #[test]
    fn test_from_value_is_lenient() {
        let entry = Entry::from_value(&serde_json::json!({"id": 3, "text": null, "date": 12}));
        assert_eq!(entry.id, 3);
        assert!(!entry.is_renderable());
        assert_eq!(entry.date, "");

        let entry = Entry::from_value(&serde_json::json!(5));
        assert_eq!(entry.id, 0);
        assert!(!entry.is_exportable());

        let entry = Entry::from_value(&serde_json::json!({"id": 1.5, "text": "kept"}));
        assert_eq!(entry.id, 0);
        assert_eq!(entry.text, "kept");
    }

    #[test]
    fn test_exportable_requires_date() {
        let entry = Entry {
            id: 1,
            text: "no date".to_string(),
            date: String::new(),
        };
        assert!(entry.is_renderable());
        assert!(!entry.is_exportable());
    }
}
