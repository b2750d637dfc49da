use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};

use pulse_digest::DigestOrchestrator;
use pulse_persist::{PersistenceClient, Project, ProjectUpdate};

#[derive(Parser)]
#[command(name = "pulse", about = "Community message digests with cost accounting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a project for monitoring
    SetupProject {
        /// Project name
        #[arg(long, short)]
        name: String,
        /// Chat-platform group or channel to collect from
        #[arg(long, short)]
        group: String,
        /// Start the project active
        #[arg(long, short, action = clap::ArgAction::Set, default_value_t = true)]
        active: bool,
    },
    /// List all configured projects
    ListProjects,
    /// Change a project's name, group or active flag
    UpdateProject {
        /// Project name
        #[arg(long, short)]
        project: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        new_group: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// List generated digests for a project
    ListSummaries {
        /// Project name
        #[arg(long, short)]
        project: String,
    },
    /// Project the cost of a digest without generating one
    EstimateCost {
        /// Project name
        #[arg(long, short)]
        project: String,
        /// Days of history to cover
        #[arg(long, short, default_value_t = 7)]
        days: i64,
    },
    /// Generate and persist a digest for a project window
    GenerateSummary {
        /// Project name
        #[arg(long, short)]
        project: String,
        /// Days of history to cover
        #[arg(long, short, default_value_t = 7)]
        days: i64,
        /// Write the digest to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

pub async fn run(
    cli: Cli,
    store: Arc<dyn PersistenceClient>,
    orchestrator: DigestOrchestrator,
) -> Result<()> {
    match cli.command {
        Command::SetupProject {
            name,
            group,
            active,
        } => {
            let project = store.create_project(&name, &group, active).await?;
            println!("Project '{}' set up", project.name);
            println!("  group:  {}", project.chat_group);
            println!("  status: {}", status(&project));
        }

        Command::ListProjects => {
            let projects = store.get_all_projects().await?;
            if projects.is_empty() {
                println!("No projects configured yet");
                return Ok(());
            }
            println!("Configured projects:");
            for project in projects {
                println!(
                    "  {} ({}) - {}",
                    project.name,
                    project.chat_group,
                    status(&project)
                );
            }
        }

        Command::UpdateProject {
            project,
            new_name,
            new_group,
            active,
        } => {
            let existing = require_project(store.as_ref(), &project).await?;
            let update = ProjectUpdate {
                name: new_name,
                chat_group: new_group,
                is_active: active,
            };
            if update.is_empty() {
                bail!("No updates specified");
            }
            let updated = store
                .update_project(existing.id, update)
                .await?
                .with_context(|| format!("Project '{}' disappeared during update", project))?;
            println!("Project '{}' updated", project);
            println!("  name:   {}", updated.name);
            println!("  group:  {}", updated.chat_group);
            println!("  status: {}", status(&updated));
        }

        Command::ListSummaries { project } => {
            let project = require_project(store.as_ref(), &project).await?;
            let summaries = store.list_summaries(project.id).await?;
            if summaries.is_empty() {
                println!("No summaries for '{}' yet", project.name);
                return Ok(());
            }
            println!("Summaries for '{}':", project.name);
            for summary in summaries {
                println!(
                    "  {}  [{} .. {}]  {} messages, ${:.2}",
                    summary.created_at.format("%Y-%m-%d %H:%M"),
                    summary.date_range_start.format("%Y-%m-%d"),
                    summary.date_range_end.format("%Y-%m-%d"),
                    summary.message_count,
                    summary.actual_cost
                );
            }
        }

        Command::EstimateCost { project, days } => {
            let project = require_project(store.as_ref(), &project).await?;
            let end = Utc::now();
            let start = end - Duration::days(days);

            let est = orchestrator.estimate_cost(&project, start, end).await?;
            println!("Cost estimate for '{}' ({} days):", project.name, days);
            println!("  total cost:       ${:.2}", est.total_cost);
            println!("  messages:         {}", est.message_count);
            println!("  cost per message: ${:.4}", est.cost_per_message);
            println!("  estimated tokens: {}", est.estimated_tokens);
        }

        Command::GenerateSummary {
            project,
            days,
            output,
        } => {
            let project = require_project(store.as_ref(), &project).await?;
            let end = Utc::now();
            let start = end - Duration::days(days);

            println!("Generating summary for '{}' ({} days)...", project.name, days);
            let summary = orchestrator.generate_summary(&project, start, end).await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &summary.content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Summary saved to {}", path.display());
                }
                None => {
                    println!("\n{}\n", "=".repeat(50));
                    println!("{}", summary.content);
                    println!("{}", "=".repeat(50));
                }
            }
            println!("Messages covered: {}", summary.message_count);
            println!("Actual cost:      ${:.2}", summary.actual_cost);
        }
    }

    Ok(())
}

async fn require_project(store: &dyn PersistenceClient, name: &str) -> Result<Project> {
    store
        .get_project_by_name(name)
        .await?
        .with_context(|| format!("Project '{}' not found", name))
}

fn status(project: &Project) -> &'static str {
    if project.is_active {
        "active"
    } else {
        "inactive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_summary_defaults() {
        let cli = Cli::parse_from(["pulse", "generate-summary", "--project", "aurora"]);
        match cli.command {
            Command::GenerateSummary {
                project,
                days,
                output,
            } => {
                assert_eq!(project, "aurora");
                assert_eq!(days, 7);
                assert!(output.is_none());
            }
            _ => panic!("expected generate-summary"),
        }
    }
}
