//! TaskList command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `TaskListService` use cases.
//! - Print the resulting view snapshot.

mod cli;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use log::info;
use render::render_view;
use std::process::ExitCode;
use tasklist_core::{init_logging, TaskListConfig, TaskListService};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("tasklist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, String> {
    let config = resolve_config(&cli);

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", log_dir.display()))?;
        init_logging(&config.log_level, log_dir)?;
    }

    execute(cli.command, &config)
}

/// Runs one subcommand against the list described by `config`.
fn execute(command: Command, config: &TaskListConfig) -> Result<String, String> {
    let mut service = TaskListService::open_with_config(&config).map_err(|err| {
        format!(
            "failed to open task list at `{}`: {err}",
            config.db_path.display()
        )
    })?;

    let notice = match command {
        Command::Add { text } => match service.add_task(&text.join(" ")) {
            Some(id) => format!("added {id}"),
            None => "ignored empty task".to_string(),
        },
        Command::Toggle { id } => found_notice(service.toggle_task(id), "toggled", id),
        Command::Delete { id } => found_notice(service.delete_task(id), "deleted", id),
        Command::ClearCompleted => format!("cleared {}", service.clear_completed()),
        Command::List { filter } => {
            service.set_filter(filter);
            String::new()
        }
    };

    info!(
        "event=cli_command module=cli status=ok total={}",
        service.tasks().len()
    );

    let mut output = String::new();
    if !notice.is_empty() {
        output.push_str(&notice);
        output.push('\n');
    }
    output.push_str(&render_view(&service.view()));
    Ok(output)
}

fn resolve_config(cli: &Cli) -> TaskListConfig {
    let mut config = TaskListConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(slot) = cli.slot.as_deref().map(str::trim).filter(|slot| !slot.is_empty()) {
        config.slot_key = slot.to_string();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config
}

fn found_notice(found: bool, verb: &str, id: i64) -> String {
    if found {
        format!("{verb} {id}")
    } else {
        format!("no task with id {id}")
    }
}
