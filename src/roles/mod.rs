// Pipeline roles and their prompt templates
//
// Each role selects a fixed instruction template bundled at compile time.
// Templates demand strictly valid JSON with a role-specific top-level shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CrewError;

/// One stage of the planning pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    HighPlanner,
    FeaturePlanner,
    Architect,
    Implementer,
    Reviewer,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::HighPlanner,
        Role::FeaturePlanner,
        Role::Architect,
        Role::Implementer,
        Role::Reviewer,
    ];

    /// Identifier used at the prompt and in artifact file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HighPlanner => "highplanner",
            Role::FeaturePlanner => "featureplanner",
            Role::Architect => "architect",
            Role::Implementer => "implementer",
            Role::Reviewer => "reviewer",
        }
    }

    /// The instruction template sent ahead of the ticket text
    pub fn prompt(&self) -> &'static str {
        match self {
            Role::HighPlanner => include_str!("../../data/prompts/highplanner.md"),
            Role::FeaturePlanner => include_str!("../../data/prompts/featureplanner.md"),
            Role::Architect => include_str!("../../data/prompts/architect.md"),
            Role::Implementer => include_str!("../../data/prompts/implementer.md"),
            Role::Reviewer => include_str!("../../data/prompts/reviewer.md"),
        }
    }

    /// "highplanner/featureplanner/architect/implementer/reviewer"
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == wanted)
            .ok_or_else(|| CrewError::UnknownRole(s.trim().to_string()))
    }
}

/// Look up a template by role name, with a generic fallback for unknown names.
pub fn prompt_for(name: &str) -> String {
    match name.parse::<Role>() {
        Ok(role) => role.prompt().to_string(),
        Err(_) => format!("You are acting as {}.", name.trim()),
    }
}
