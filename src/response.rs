//! Handler response model
//!
//! Serialized as `{"message": "OK", "analysis": {...}}` or
//! `{"message": "Error", "error": "..."}`. The outcome enum makes a response
//! with both or neither of `analysis`/`error` unrepresentable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub summary: String,
    pub key_findings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Analysis(Analysis),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub message: Status,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl AnalysisResponse {
    pub fn ok(summary: String, key_findings: Vec<String>) -> Self {
        Self {
            message: Status::Ok,
            outcome: Outcome::Analysis(Analysis {
                summary,
                key_findings,
            }),
        }
    }

    pub const fn error(description: String) -> Self {
        Self {
            message: Status::Error,
            outcome: Outcome::Error(description),
        }
    }

    pub const fn analysis(&self) -> Option<&Analysis> {
        match &self.outcome {
            Outcome::Analysis(analysis) => Some(analysis),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_description(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error(description) => Some(description),
            Outcome::Analysis(_) => None,
        }
    }

    /// Compact JSON encoding, as returned to the caller
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            r#"{"message":"Error","error":"Internal server error"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_shape() {
        let response = AnalysisResponse::ok(
            "Received your message: hi".to_string(),
            vec!["No file was uploaded".to_string()],
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "OK",
                "analysis": {
                    "summary": "Received your message: hi",
                    "keyFindings": ["No file was uploaded"]
                }
            })
        );
    }

    #[test]
    fn test_error_shape() {
        let response = AnalysisResponse::error("boom".to_string());
        assert_eq!(response.to_json(), r#"{"message":"Error","error":"boom"}"#);
        assert!(response.analysis().is_none());
        assert_eq!(response.error_description(), Some("boom"));
    }

    #[test]
    fn test_exactly_one_outcome_key() {
        let value = serde_json::to_value(AnalysisResponse::ok("s".to_string(), vec![])).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_parse_back() {
        let parsed: AnalysisResponse =
            serde_json::from_str(r#"{"message":"Error","error":"bad"}"#).unwrap();
        assert_eq!(parsed, AnalysisResponse::error("bad".to_string()));
    }
}
