// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zenchat - a terminal chat assistant backed by Gemini.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod render;
mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Zenchat - a terminal chat assistant backed by Gemini.
#[derive(Parser, Debug)]
#[command(name = "zenchat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive chat (default).
    Shell,
    /// Print the stored conversation.
    History,
    /// Clear the stored conversation.
    Reset,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match zenchat_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            zenchat_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.assistant.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(config).await,
        Commands::History => commands::run_history(config).await,
        Commands::Reset => commands::run_reset(config).await,
        Commands::Config => commands::run_config(&config),
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so they never interleave with the conversation on stdout.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "zenchat={log_level},zenchat_agent={log_level},zenchat_gemini={log_level},zenchat_storage={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["zenchat"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["zenchat", "history"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::History)));
        let cli = Cli::try_parse_from(["zenchat", "reset"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Reset)));
        assert!(Cli::try_parse_from(["zenchat", "serve"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
