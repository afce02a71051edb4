use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a sprint and assign user stories to it
    CreateSprint {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
        /// Sprint title (3 to 100 characters)
        #[arg(short, long)]
        title: String,
        /// Sprint start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Sprint end date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// User story identifier; repeat for several stories
        #[arg(short = 'u', long = "story")]
        stories: Vec<String>,
    },
    /// Assign user stories to a sprint and refresh sprint badges
    AssignSprint {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
        /// Sprint identifier
        #[arg(short, long)]
        sprint: String,
        /// User story identifier; repeat for several stories
        #[arg(short = 'u', long = "story")]
        stories: Vec<String>,
    },
    /// Mark a sprint as done and clear its task badges
    CompleteSprint {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
        /// Sprint identifier
        #[arg(short, long)]
        sprint: String,
    },
    /// Repair drifted sprint/user-story back-references
    SyncStories {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
    },
    /// Clear stale sprint badges left by completed sprints
    CleanupBadges {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
    },
    /// Delete a sprint and detach the stories referencing it
    DeleteSprint {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
        /// Sprint identifier
        #[arg(short, long)]
        sprint: String,
    },
    /// Print a sprint status report
    SprintReport {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
        /// Sprint identifier
        #[arg(short, long)]
        sprint: String,
    },
    /// Export the full backlog snapshot to YAML
    ExportBacklog {
        /// Path to store config YAML
        #[arg(short, long)]
        config: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_sprint_collects_repeated_story_args() {
        let args = CliArgs::parse_from([
            "cockpit",
            "assign-sprint",
            "-c",
            "store.yaml",
            "-s",
            "sp-1",
            "-u",
            "us-1",
            "-u",
            "us-2",
        ]);

        if let Commands::AssignSprint {
            config,
            sprint,
            stories,
        } = args.command
        {
            assert_eq!(config, "store.yaml");
            assert_eq!(sprint, "sp-1");
            assert_eq!(stories, vec!["us-1".to_string(), "us-2".to_string()]);
        } else {
            panic!("expected assign-sprint command");
        }
    }

    #[test]
    fn assign_sprint_accepts_empty_story_set() {
        let args = CliArgs::parse_from([
            "cockpit",
            "assign-sprint",
            "-c",
            "store.yaml",
            "-s",
            "sp-1",
        ]);

        if let Commands::AssignSprint { stories, .. } = args.command {
            assert!(stories.is_empty());
        } else {
            panic!("expected assign-sprint command");
        }
    }

    #[test]
    fn create_sprint_parses_dates_and_stories() {
        let args = CliArgs::parse_from([
            "cockpit",
            "create-sprint",
            "-c",
            "store.yaml",
            "-t",
            "Sprint 7",
            "--start",
            "2026-03-02",
            "--end",
            "2026-03-13",
            "-u",
            "us-1",
        ]);

        if let Commands::CreateSprint {
            title,
            start,
            end,
            stories,
            ..
        } = args.command
        {
            assert_eq!(title, "Sprint 7");
            assert_eq!(start, "2026-03-02");
            assert_eq!(end, "2026-03-13");
            assert_eq!(stories, vec!["us-1".to_string()]);
        } else {
            panic!("expected create-sprint command");
        }
    }

    #[test]
    fn sync_stories_requires_only_config() {
        let args = CliArgs::parse_from(["cockpit", "sync-stories", "-c", "store.yaml"]);

        if let Commands::SyncStories { config } = args.command {
            assert_eq!(config, "store.yaml");
        } else {
            panic!("expected sync-stories command");
        }
    }
}
