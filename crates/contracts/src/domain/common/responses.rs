use serde::{Deserialize, Serialize};

use crate::shared::lenient;

/// Body returned by create endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    #[serde(default, deserialize_with = "lenient::count")]
    pub id: Option<i64>,
}

/// Error body returned by rejected writes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// First non-empty human readable text
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_text() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Duplicate design"}"#).unwrap();
        assert_eq!(body.text(), Some("Duplicate design"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":" "}"#).unwrap();
        assert_eq!(body.text(), None);
    }

    #[test]
    fn test_created_response_accepts_string_id() {
        let created: CreatedResponse = serde_json::from_str(r#"{"id":"15"}"#).unwrap();
        assert_eq!(created.id, Some(15));
    }
}
