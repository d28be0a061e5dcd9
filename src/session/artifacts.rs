// Persistence of accepted sessions
//
// Writes `<ticket>-<role>-<timestamp>-final.json` and `...-history.json`.
// Both documents are serialized before anything touches disk, and a final
// file is removed again if its history could not be written.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::{PersistedArtifacts, SessionHistory};
use crate::roles::Role;

/// Acceptance timestamp format used in artifact file names
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name stem shared by both documents
    pub fn stem(ticket_base: &str, role: Role, accepted_at: DateTime<Local>) -> String {
        format!(
            "{}-{}-{}",
            ticket_base,
            role,
            accepted_at.format(ARTIFACT_TIMESTAMP_FORMAT)
        )
    }

    /// Persist the final artifact (last parsed output) and the full history.
    pub fn persist(
        &self,
        ticket_base: &str,
        role: Role,
        history: &SessionHistory,
        accepted_at: DateTime<Local>,
    ) -> Result<PersistedArtifacts> {
        let final_value = history
            .final_artifact()
            .context("Cannot persist a session without a validated result")?;

        let final_json =
            serde_json::to_string_pretty(final_value).context("Failed to serialize final artifact")?;
        let history_json =
            serde_json::to_string_pretty(history).context("Failed to serialize history")?;

        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create artifacts directory {}", self.dir.display())
        })?;

        let stem = Self::stem(ticket_base, role, accepted_at);
        let final_path = self.dir.join(format!("{}-final.json", stem));
        let history_path = self.dir.join(format!("{}-history.json", stem));

        write_file(&final_path, &final_json)?;
        if let Err(e) = write_file(&history_path, &history_json) {
            let _ = fs::remove_file(&final_path);
            return Err(e);
        }

        info!(
            "Persisted {} ({} history entries)",
            final_path.display(),
            history.len()
        );

        Ok(PersistedArtifacts {
            final_path,
            history_path,
            history_len: history.len(),
        })
    }
}

/// Write via a sibling temp file so a crash never leaves a truncated document
fn write_file(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CallResult;
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn accepted_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn history_with(values: &[Value]) -> SessionHistory {
        let mut history = SessionHistory::new();
        for value in values {
            history
                .push(CallResult {
                    role: Role::Architect,
                    model: "gemini-2.5-flash".to_string(),
                    timestamp: accepted_at(),
                    ticket_context_preview: "T1".to_string(),
                    extra_context: String::new(),
                    output_raw: value.to_string(),
                    output_json: Some(value.clone()),
                })
                .unwrap();
        }
        history
    }

    #[test]
    fn test_stem_format() {
        assert_eq!(
            ArtifactStore::stem("T1", Role::Architect, accepted_at()),
            "T1-architect-20260314-092653"
        );
    }

    #[test]
    fn test_persist_writes_both_documents() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().join("nested/artifacts"));
        let history = history_with(&[json!({"v": 1}), json!({"v": 2})]);

        let persisted = store
            .persist("T1", Role::Architect, &history, accepted_at())
            .unwrap();

        assert_eq!(persisted.history_len, 2);
        assert!(persisted
            .final_path
            .ends_with("T1-architect-20260314-092653-final.json"));
        assert!(persisted
            .history_path
            .ends_with("T1-architect-20260314-092653-history.json"));

        let final_value: Value =
            serde_json::from_str(&fs::read_to_string(&persisted.final_path).unwrap()).unwrap();
        assert_eq!(final_value, json!({"v": 2}));

        let history_value: Value =
            serde_json::from_str(&fs::read_to_string(&persisted.history_path).unwrap()).unwrap();
        let entries = history_value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["output_json"], final_value);

        // No temp files left behind
        let names: Vec<_> = fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_empty_history_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().join("artifacts"));
        let result = store.persist("T1", Role::Reviewer, &SessionHistory::new(), accepted_at());
        assert!(result.is_err());
        assert!(!store.dir().exists());
    }
}
