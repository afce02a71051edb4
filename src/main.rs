mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};

use crate::commands::base_commands::{CliArgs, Commands};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    match args.command {
        Commands::CreateSprint {
            config,
            title,
            start,
            end,
            stories,
        } => {
            commands::create_sprint_cmd::run(&config, &title, &start, &end, &stories).await;
        }
        Commands::AssignSprint {
            config,
            sprint,
            stories,
        } => {
            commands::assign_sprint_cmd::run(&config, &sprint, &stories).await;
        }
        Commands::CompleteSprint { config, sprint } => {
            commands::complete_sprint_cmd::run(&config, &sprint).await;
        }
        Commands::SyncStories { config } => {
            commands::sync_stories_cmd::run(&config).await;
        }
        Commands::CleanupBadges { config } => {
            commands::cleanup_badges_cmd::run(&config).await;
        }
        Commands::DeleteSprint { config, sprint } => {
            commands::delete_sprint_cmd::run(&config, &sprint).await;
        }
        Commands::SprintReport { config, sprint } => {
            commands::sprint_report_cmd::run(&config, &sprint).await;
        }
        Commands::ExportBacklog { config, output } => {
            commands::export_backlog_cmd::run(&config, &output).await;
        }
        Commands::Completions { shell } => {
            let mut cli = CliArgs::command();
            let name = cli.get_name().to_string();
            clap_complete::generate(shell, &mut cli, name, &mut std::io::stdout());
        }
    }
}
