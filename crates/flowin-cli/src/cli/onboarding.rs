//! `flowin onboarding` commands.

use std::str::FromStr;

use anyhow::Result;
use clap::{Args, Subcommand};
use flowin_core::{
    params::{BatchCreateTasks, FirstTask, DEFAULT_ESTIMATE_MINUTES},
    CreateResult, OperationStatus, Priority,
};

use super::Cli;

/// A first task written as `TITLE[:MINUTES[:PRIORITY]]`.
///
/// Colons inside the title are kept; only trailing segments that parse as a
/// duration or a priority are split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstTaskSpec {
    pub title: String,
    pub minutes: u32,
    pub priority: Priority,
}

impl FromStr for FirstTaskSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut title = s;
        let mut minutes = DEFAULT_ESTIMATE_MINUTES;
        let mut priority = Priority::default();

        if let Some((rest, last)) = title.rsplit_once(':') {
            if let Ok(parsed) = last.trim().parse::<Priority>() {
                if let Some((head, mins)) = rest.rsplit_once(':') {
                    if let Ok(parsed_minutes) = mins.trim().parse::<u32>() {
                        title = head;
                        minutes = parsed_minutes;
                        priority = parsed;
                    }
                }
            } else if let Ok(parsed_minutes) = last.trim().parse::<u32>() {
                title = rest;
                minutes = parsed_minutes;
            }
        }

        let title = title.trim();
        if title.is_empty() {
            return Err(format!("Missing task title in '{s}'"));
        }
        Ok(FirstTaskSpec {
            title: title.to_string(),
            minutes,
            priority,
        })
    }
}

impl From<FirstTaskSpec> for FirstTask {
    fn from(val: FirstTaskSpec) -> Self {
        FirstTask {
            title: val.title,
            estimated_minutes: val.minutes,
            priority: val.priority,
        }
    }
}

/// Create the first one to three tasks and finish onboarding
#[derive(Args)]
pub struct FirstTasksArgs {
    #[arg(
        required = true,
        help = "Tasks as TITLE[:MINUTES[:PRIORITY]], e.g. 'Write report:45:high'"
    )]
    pub tasks: Vec<FirstTaskSpec>,
}

impl From<FirstTasksArgs> for BatchCreateTasks {
    fn from(val: FirstTasksArgs) -> Self {
        BatchCreateTasks {
            tasks: val.tasks.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Subcommand)]
pub enum OnboardingCommands {
    /// Show onboarding progress
    #[command(alias = "s")]
    Status,
    /// Mark the demo as watched
    Demo,
    /// Create the first tasks and complete onboarding
    #[command(alias = "f")]
    FirstTasks(FirstTasksArgs),
}

impl Cli {
    pub async fn handle_onboarding_command(&self, command: OnboardingCommands) -> Result<()> {
        let user = self.user().await?;
        match command {
            OnboardingCommands::Status => match self.planner.onboarding_status(&user).await? {
                Some(state) => self.render(state),
                None => self.render(OperationStatus::success(
                    "Onboarding not started yet. Run 'flowin onboarding demo' to begin.",
                )),
            },
            OnboardingCommands::Demo => {
                let state = self.planner.complete_demo(&user).await?;
                self.render(state)
            }
            OnboardingCommands::FirstTasks(args) => {
                let tasks = self.planner.create_first_tasks(&user, &args.into()).await?;
                self.render(CreateResult::new(tasks))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_task_spec_forms() {
        let full: FirstTaskSpec = "Write report:45:high".parse().unwrap();
        assert_eq!(full.title, "Write report");
        assert_eq!(full.minutes, 45);
        assert_eq!(full.priority, Priority::High);

        let minutes_only: FirstTaskSpec = "Inbox zero:20".parse().unwrap();
        assert_eq!(minutes_only.minutes, 20);
        assert_eq!(minutes_only.priority, Priority::Medium);

        let bare: FirstTaskSpec = "Call Bob".parse().unwrap();
        assert_eq!(bare.minutes, DEFAULT_ESTIMATE_MINUTES);
    }

    #[test]
    fn test_first_task_spec_keeps_colons_in_title() {
        let spec: FirstTaskSpec = "Agenda: Q3 review:60".parse().unwrap();
        assert_eq!(spec.title, "Agenda: Q3 review");
        assert_eq!(spec.minutes, 60);

        let spec: FirstTaskSpec = "Note: high".parse().unwrap();
        assert_eq!(spec.title, "Note: high");
        assert_eq!(spec.minutes, DEFAULT_ESTIMATE_MINUTES);
    }

    #[test]
    fn test_first_task_spec_requires_title() {
        assert!(":30:low".parse::<FirstTaskSpec>().is_err());
    }
}
