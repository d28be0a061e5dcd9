// Status record and ticket documents
//
// The status file names the active ticket; the ticket itself lives at
// `<tickets_dir>/<ticket>.md`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::parse_document;
use crate::errors::CrewError;

/// YAML happily reads `ticket: 42` as a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    ticket: Option<Scalar>,
}

/// Parsed process-status record
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub ticket: String,
}

impl Status {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CrewError::StatusNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read status file {}", path.display()))?;

        let invalid = |reason: String| CrewError::InvalidStatus {
            path: path.to_path_buf(),
            reason,
        };

        let raw: RawStatus = parse_document(path, &contents).map_err(|e| invalid(e.to_string()))?;
        let ticket = raw
            .ticket
            .map(Scalar::into_string)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| invalid("missing 'ticket' field".to_string()))?;

        Ok(Self { ticket })
    }
}

/// A ticket document loaded for one session
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl Ticket {
    pub fn path_for(tickets_dir: &Path, name: &str) -> PathBuf {
        tickets_dir.join(format!("{}.md", name))
    }

    pub fn load(tickets_dir: &Path, name: &str) -> Result<Self> {
        let path = Self::path_for(tickets_dir, name);
        if !path.is_file() {
            return Err(CrewError::TicketNotFound { path }.into());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read ticket {}", path.display()))?;

        Ok(Self {
            name: name.to_string(),
            path,
            content,
        })
    }

    /// File name without the `.md` extension, used in artifact names
    pub fn base_name(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone());
        file_name
            .strip_suffix(".md")
            .map(str::to_string)
            .unwrap_or(file_name)
    }
}

/// Read the status record and load the ticket it names
pub fn load_active_ticket(status_path: &Path, tickets_dir: &Path) -> Result<Ticket> {
    let status = Status::load(status_path)?;
    Ticket::load(tickets_dir, &status.ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn downcast(err: &anyhow::Error) -> &CrewError {
        err.downcast_ref::<CrewError>().expect("expected a CrewError")
    }

    #[test]
    fn test_status_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status.yaml");
        fs::write(&path, "ticket: T1\nphase: design\n").unwrap();
        assert_eq!(Status::load(&path).unwrap().ticket, "T1");
    }

    #[test]
    fn test_status_numeric_ticket() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status.yaml");
        fs::write(&path, "ticket: 42\n").unwrap();
        assert_eq!(Status::load(&path).unwrap().ticket, "42");
    }

    #[test]
    fn test_status_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status.toml");
        fs::write(&path, "ticket = \"ABC-7\"\n").unwrap();
        assert_eq!(Status::load(&path).unwrap().ticket, "ABC-7");
    }

    #[test]
    fn test_status_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Status::load(&dir.path().join("status.yaml")).unwrap_err();
        assert!(matches!(downcast(&err), CrewError::StatusNotFound { .. }));
    }

    #[test]
    fn test_status_missing_ticket_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status.yaml");
        fs::write(&path, "phase: design\n").unwrap();
        let err = Status::load(&path).unwrap_err();
        assert!(matches!(downcast(&err), CrewError::InvalidStatus { .. }));
    }

    #[test]
    fn test_ticket_load_and_base_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("T1.md"), "# Build a shop\n").unwrap();
        let ticket = Ticket::load(dir.path(), "T1").unwrap();
        assert_eq!(ticket.content, "# Build a shop\n");
        assert_eq!(ticket.base_name(), "T1");
    }

    #[test]
    fn test_ticket_missing() {
        let dir = TempDir::new().unwrap();
        let err = Ticket::load(dir.path(), "T9").unwrap_err();
        match downcast(&err) {
            CrewError::TicketNotFound { path } => assert!(path.ends_with("T9.md")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_active_ticket() {
        let dir = TempDir::new().unwrap();
        let tickets = dir.path().join("tickets");
        fs::create_dir_all(&tickets).unwrap();
        fs::write(tickets.join("T1.md"), "ticket text").unwrap();
        let status = dir.path().join("status.yaml");
        fs::write(&status, "ticket: T1\n").unwrap();

        let ticket = load_active_ticket(&status, &tickets).unwrap();
        assert_eq!(ticket.name, "T1");
        assert_eq!(ticket.content, "ticket text");
    }
}
