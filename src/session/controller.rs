// Interactive session controller
//
// Drives one role over one ticket: call the model (with automatic retries),
// validate the JSON, let the user accept / follow up / quit, and persist on
// acceptance. The loop runs over an explicit `State` so every transition is
// visible in one match.

use anyhow::Result;
use chrono::Local;
use crossterm::style::Stylize;
use std::time::Duration;
use tracing::{debug, warn};

use super::artifacts::ArtifactStore;
use super::types::{CallResult, QuitReason, SessionHistory, SessionOutcome};
use super::validator::try_parse;
use crate::cli::Prompter;
use crate::config::Config;
use crate::providers::RoleClient;
use crate::roles::Role;
use crate::workspace::Ticket;

/// Extra context sent after the model produced invalid JSON
pub const INVALID_JSON_NOTE: &str =
    "Your last output was not valid JSON. Please try again with strictly valid JSON.";

const RETRY_PROMPT: &str = "Retry manually? [y]es / [n]o (quit without saving)\n> ";
const INVALID_JSON_PROMPT: &str = "\nOptions: [r]etry AI  [f]ix manually  [q]uit\n> ";
const REVIEW_PROMPT: &str = "\nOptions: [a]ccept  [f]ollow-up  [q]uit without saving\n> ";
const MANUAL_FIX_PROMPT: &str = "Paste corrected JSON:\n> ";
const FOLLOW_UP_PROMPT: &str = "Enter your follow-up or clarification:\n> ";

#[derive(Debug)]
enum State {
    /// Ask the model, retrying automatically and then manually
    Calling,
    /// Check the output of a fresh call
    Validating(CallResult),
    /// Show the latest parsed result and wait for the user
    AwaitingDecision,
    Accepted,
    Quit(QuitReason),
}

/// One interactive session for a role over a ticket
pub struct Session<'a> {
    client: &'a RoleClient,
    prompter: &'a mut dyn Prompter,
    store: ArtifactStore,
    role: Role,
    ticket: &'a Ticket,
    max_retries: u32,
    retry_delay: Duration,
}

impl<'a> Session<'a> {
    pub fn new(
        client: &'a RoleClient,
        prompter: &'a mut dyn Prompter,
        config: &Config,
        role: Role,
        ticket: &'a Ticket,
    ) -> Self {
        Self {
            client,
            prompter,
            store: ArtifactStore::new(config.artifacts_dir.clone()),
            role,
            ticket,
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay(),
        }
    }

    /// Run until the user accepts or quits.
    ///
    /// Nothing is written unless the session ends in `Accepted`.
    pub async fn run(mut self) -> Result<SessionOutcome> {
        let mut history = SessionHistory::new();
        let mut extra_context = String::new();
        let mut state = State::Calling;

        loop {
            debug!("Session state: {:?}", state);
            state = match state {
                State::Calling => match self.call_with_retries(&extra_context).await? {
                    Some(result) => State::Validating(result),
                    None => State::Quit(QuitReason::RepeatedCallFailures),
                },

                State::Validating(result) => match try_parse(&result.output_raw) {
                    Some(value) => {
                        history.push(result.with_output_json(value))?;
                        State::AwaitingDecision
                    }
                    None => self.handle_invalid_json(result, &mut history, &mut extra_context)?,
                },

                State::AwaitingDecision => {
                    self.show_draft(&history)?;
                    match self.choose(REVIEW_PROMPT, &["a", "f", "q"])?.as_str() {
                        "a" => State::Accepted,
                        "f" => {
                            extra_context = self.prompter.ask(FOLLOW_UP_PROMPT)?;
                            State::Calling
                        }
                        _ => State::Quit(QuitReason::UserQuit),
                    }
                }

                State::Accepted => {
                    let persisted = self.store.persist(
                        &self.ticket.base_name(),
                        self.role,
                        &history,
                        Local::now(),
                    )?;
                    self.prompter.say(&format!(
                        "{} Accepted.\n   Final saved to {}\n   History saved to {}",
                        "✓".green().bold(),
                        persisted.final_path.display(),
                        persisted.history_path.display()
                    ));
                    return Ok(SessionOutcome::Accepted(persisted));
                }

                State::Quit(reason) => {
                    self.prompter.say(reason.message());
                    return Ok(SessionOutcome::Quit(reason));
                }
            };
        }
    }

    /// Up to `max_retries` automatic attempts per round; after each failed
    /// round the user decides whether to start another.
    ///
    /// Returns `None` when the user gives up.
    async fn call_with_retries(&mut self, extra_context: &str) -> Result<Option<CallResult>> {
        loop {
            for attempt in 1..=self.max_retries {
                match self
                    .client
                    .invoke(self.role, &self.ticket.content, extra_context)
                    .await
                {
                    Ok(result) => return Ok(Some(result)),
                    Err(e) => {
                        warn!(
                            "Model call failed (attempt {}/{}): {:#}",
                            attempt, self.max_retries, e
                        );
                        self.prompter.say(&format!(
                            "\n{} AI call failed (attempt {}/{}): {:#}",
                            "✗".red().bold(),
                            attempt,
                            self.max_retries,
                            e
                        ));
                        if attempt < self.max_retries {
                            self.prompter.say(&format!(
                                "Retrying in {}s...",
                                self.retry_delay.as_secs_f64()
                            ));
                            tokio::time::sleep(self.retry_delay).await;
                        }
                    }
                }
            }

            if self.choose(RETRY_PROMPT, &["y", "n"])? == "n" {
                return Ok(None);
            }
        }
    }

    /// Invalid model output: retry with a corrective note, take a manual
    /// correction, or quit. The failed call is only recorded if the manual
    /// correction parses.
    fn handle_invalid_json(
        &mut self,
        mut result: CallResult,
        history: &mut SessionHistory,
        extra_context: &mut String,
    ) -> Result<State> {
        self.prompter.say(&format!(
            "\n{} Invalid JSON received from AI.",
            "⚠".yellow().bold()
        ));
        self.prompter
            .say(&format!("Raw output:\n{}", result.output_raw));

        let next = match self.choose(INVALID_JSON_PROMPT, &["r", "f", "q"])?.as_str() {
            "r" => {
                *extra_context = INVALID_JSON_NOTE.to_string();
                State::Calling
            }
            "f" => {
                let manual = self.prompter.ask(MANUAL_FIX_PROMPT)?;
                match try_parse(&manual) {
                    Some(value) => {
                        result.output_json = Some(value);
                        history.push(result)?;
                        State::AwaitingDecision
                    }
                    None => {
                        self.prompter
                            .say(&format!("{} Still invalid.", "✗".red().bold()));
                        State::Quit(QuitReason::InvalidManualFix)
                    }
                }
            }
            _ => State::Quit(QuitReason::InvalidModelOutput),
        };
        Ok(next)
    }

    fn show_draft(&mut self, history: &SessionHistory) -> Result<()> {
        let value = history
            .final_artifact()
            .ok_or_else(|| anyhow::anyhow!("No validated result to review"))?;
        let pretty = serde_json::to_string_pretty(value)?;
        self.prompter
            .say(&format!("\n{}", "--- AI Draft (validated JSON) ---".cyan().bold()));
        self.prompter.say(&pretty);
        Ok(())
    }

    /// Ask until the answer is one of `options`; anything else re-prompts.
    fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<String> {
        loop {
            let answer = self.prompter.ask(prompt)?.trim().to_lowercase();
            if options.contains(&answer.as_str()) {
                return Ok(answer);
            }
            self.prompter.say("Invalid option, try again.");
        }
    }
}
