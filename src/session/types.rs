// Session types: call records, history, outcomes

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::roles::Role;

/// Record of one model invocation.
///
/// `output_json` is attached once the output (or a manual correction) has
/// parsed; the record is then appended to history and not touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    pub role: Role,
    pub model: String,
    pub timestamp: DateTime<Local>,
    /// Leading characters of the ticket text
    pub ticket_context_preview: String,
    /// Follow-up or corrective note sent with the prompt
    pub extra_context: String,
    pub output_raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_json: Option<Value>,
}

impl CallResult {
    pub fn with_output_json(mut self, value: Value) -> Self {
        self.output_json = Some(value);
        self
    }
}

/// Ordered call records of one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    entries: Vec<CallResult>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated record. Records without parsed output are refused.
    pub fn push(&mut self, result: CallResult) -> anyhow::Result<()> {
        if result.output_json.is_none() {
            anyhow::bail!("Only validated call results can be added to history");
        }
        self.entries.push(result);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CallResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&CallResult> {
        self.entries.last()
    }

    /// Parsed output of the most recent record
    pub fn final_artifact(&self) -> Option<&Value> {
        self.latest().and_then(|r| r.output_json.as_ref())
    }
}

/// Paths written on acceptance
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedArtifacts {
    pub final_path: PathBuf,
    pub history_path: PathBuf,
    pub history_len: usize,
}

/// Why a session ended without saving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitReason {
    /// Automatic retries exhausted and the user declined another round
    RepeatedCallFailures,
    /// Model returned invalid JSON and the user chose to quit
    InvalidModelOutput,
    /// The pasted correction did not parse either
    InvalidManualFix,
    /// User quit at the review prompt
    UserQuit,
}

impl QuitReason {
    pub fn message(&self) -> &'static str {
        match self {
            QuitReason::RepeatedCallFailures => "Quit without saving due to repeated errors.",
            QuitReason::InvalidModelOutput => "Quit without saving due to invalid JSON.",
            QuitReason::InvalidManualFix => "Quit without saving: correction was not valid JSON.",
            QuitReason::UserQuit => "Quit without saving.",
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Accepted(PersistedArtifacts),
    Quit(QuitReason),
}

impl SessionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SessionOutcome::Accepted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(raw: &str) -> CallResult {
        CallResult {
            role: Role::Reviewer,
            model: "gemini-2.5-flash".to_string(),
            timestamp: Local::now(),
            ticket_context_preview: "ticket".to_string(),
            extra_context: String::new(),
            output_raw: raw.to_string(),
            output_json: None,
        }
    }

    #[test]
    fn test_history_refuses_unvalidated_records() {
        let mut history = SessionHistory::new();
        assert!(history.push(record("oops")).is_err());
        assert!(history.is_empty());
    }

    #[test]
    fn test_final_artifact_is_latest_parsed_output() {
        let mut history = SessionHistory::new();
        history
            .push(record("{}").with_output_json(json!({"v": 1})))
            .unwrap();
        history
            .push(record("{}").with_output_json(json!({"v": 2})))
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.final_artifact(), Some(&json!({"v": 2})));
    }

    #[test]
    fn test_call_result_field_names() {
        let value =
            serde_json::to_value(record("[]").with_output_json(json!([]))).unwrap();
        for key in [
            "role",
            "model",
            "timestamp",
            "ticket_context_preview",
            "extra_context",
            "output_raw",
            "output_json",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["role"], "reviewer");
    }

    #[test]
    fn test_history_serializes_as_array() {
        let mut history = SessionHistory::new();
        history.push(record("1").with_output_json(json!(1))).unwrap();
        let value = serde_json::to_value(&history).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 1);
    }
}
