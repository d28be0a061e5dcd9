// Entry flow: config → credential → ticket → role → session

use anyhow::Result;
use crossterm::style::Stylize;
use std::sync::Arc;

use super::args::Args;
use super::prompter::Prompter;
use crate::config::{load_config, Config};
use crate::providers::{LlmProvider, RoleClient};
use crate::roles::Role;
use crate::session::{Session, SessionOutcome};
use crate::workspace::load_active_ticket;

/// Run one interactive session.
///
/// `make_provider` is called at most once, after the role has been accepted,
/// so an unknown role never reaches the model.
pub async fn execute<F>(
    args: &Args,
    prompter: &mut dyn Prompter,
    make_provider: F,
) -> Result<SessionOutcome>
where
    F: FnOnce(&Config, String) -> Result<Arc<dyn LlmProvider>>,
{
    let loaded = load_config(&args.config)?;
    if loaded.used_defaults() {
        prompter.say(&format!(
            "{} {} not found. Using defaults.",
            "⚠".yellow().bold(),
            args.config.display()
        ));
    }
    let config = loaded.config;

    let api_key = config.api_key()?;

    let ticket = load_active_ticket(&args.status, &config.tickets_dir)?;
    prompter.say(&format!(
        "Current ticket: {} ({})",
        ticket.name.as_str().bold(),
        ticket.path.display()
    ));
    prompter.say(&format!(
        "Using model: {} (provider={})",
        config.model, config.provider
    ));

    let role = select_role(args.role.as_deref(), prompter)?;

    let provider = make_provider(&config, api_key)?;
    let client = RoleClient::new(provider, &config);

    Session::new(&client, prompter, &config, role, &ticket)
        .run()
        .await
}

/// Take the role from `--role` or ask for it; unknown names are an error.
pub fn select_role(preset: Option<&str>, prompter: &mut dyn Prompter) -> Result<Role> {
    let answer = match preset {
        Some(role) => role.to_string(),
        None => prompter.ask(&format!("Choose role ({}): ", Role::choices()))?,
    };
    Ok(answer.parse::<Role>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CrewError;
    use crate::testing::ScriptedPrompter;

    #[test]
    fn test_select_role_prompts() {
        let mut prompter = ScriptedPrompter::new(["Architect"]);
        assert_eq!(select_role(None, &mut prompter).unwrap(), Role::Architect);
        assert!(prompter.prompts[0].contains("highplanner/featureplanner"));
    }

    #[test]
    fn test_select_role_preset_skips_prompt() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert_eq!(
            select_role(Some("reviewer"), &mut prompter).unwrap(),
            Role::Reviewer
        );
        assert!(prompter.prompts.is_empty());
    }

    #[test]
    fn test_select_role_unknown() {
        let mut prompter = ScriptedPrompter::new(["pilot"]);
        let err = select_role(None, &mut prompter).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CrewError>(),
            Some(CrewError::UnknownRole(r)) if r == "pilot"
        ));
    }
}
