// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zenchat shell` command implementation.
//!
//! Launches an interactive REPL over the conversation controller with a
//! colored prompt, readline history and slash commands for attachments,
//! resets and theme switching.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use zenchat_agent::{
    ConversationController, ConversationStore, Persona, SubmitOutcome, is_accepted,
};
use zenchat_config::ZenConfig;
use zenchat_core::{Message, ProviderAdapter, ZenError};
use zenchat_gemini::{API_KEY_ENV, GeminiProvider};

use crate::commands::open_storage;
use crate::render;

/// A parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Text to submit. May be empty when only an attachment is sent.
    Send(String),
    Attach(PathBuf),
    /// A path with an extension outside the accepted set.
    Rejected(PathBuf),
    Detach,
    New,
    Theme,
    History,
    Help,
    Quit,
    Unknown(String),
}

/// Interprets one line of input.
pub fn parse_command(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ShellCommand::Send(trimmed.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "attach" if !arg.is_empty() => {
            let path = PathBuf::from(arg);
            if is_accepted(&path) {
                ShellCommand::Attach(path)
            } else {
                ShellCommand::Rejected(path)
            }
        }
        "detach" => ShellCommand::Detach,
        "new" => ShellCommand::New,
        "theme" => ShellCommand::Theme,
        "history" => ShellCommand::History,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(trimmed.to_string()),
    }
}

const HELP: &[(&str, &str)] = &[
    ("/attach <path>", "attach an image, PDF, text or Word file"),
    ("/detach", "drop the pending attachment"),
    ("/new", "start a new conversation"),
    ("/theme", "switch between light and dark"),
    ("/history", "print the conversation"),
    ("/quit", "leave the shell"),
];

/// Runs the `zenchat shell` interactive REPL.
pub async fn run_shell(config: ZenConfig) -> Result<(), ZenError> {
    let storage = open_storage(&config).await?;

    let provider: Arc<dyn ProviderAdapter + Send + Sync> =
        Arc::new(GeminiProvider::new(&config).inspect_err(|_| {
            eprintln!(
                "error: Gemini API key required. Set via: config `gemini.api_key`, ZENCHAT_GEMINI_API_KEY or {API_KEY_ENV} env var"
            );
        })?);

    let persona = Persona::resolve(&config.assistant).await;
    let controller = ConversationController::new(
        provider,
        ConversationStore::new(storage.clone()),
        persona,
        config.ui.default_theme,
    )
    .await;

    let mut rl = DefaultEditor::new()
        .map_err(|e| ZenError::Internal(format!("failed to initialize readline: {e}")))?;

    let name = controller.persona().name.clone();
    println!("{}", format!("{name} - zenchat").bold().green());
    println!(
        "Type {} for commands, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );
    print_log(&controller).await;

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let command = parse_command(&line);
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(&line);
                }
                if !handle_command(&controller, command).await {
                    break;
                }
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    storage.close().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Handles one parsed command. Returns `false` when the shell should exit.
async fn handle_command(controller: &ConversationController, command: ShellCommand) -> bool {
    let theme = controller.theme().await;
    match command {
        ShellCommand::Quit => return false,
        ShellCommand::Send(text) => send(controller, &text).await,
        ShellCommand::Attach(path) => match controller.attach(&path).await {
            Ok(preview) => println!("{}", render::render_preview(&preview, theme)),
            Err(e) => eprintln!("{}: {e}", "error".red()),
        },
        ShellCommand::Rejected(path) => {
            eprintln!(
                "{}: unsupported file type: {}",
                "error".red(),
                path.display()
            );
        }
        ShellCommand::Detach => {
            if controller.detach().await {
                println!("{}", "attachment removed".dimmed());
            }
        }
        ShellCommand::New => {
            controller.reset().await;
            print_log(controller).await;
        }
        ShellCommand::Theme => {
            let theme = controller.toggle_theme().await;
            println!("{}", format!("theme: {theme}").dimmed());
        }
        ShellCommand::History => print_log(controller).await,
        ShellCommand::Help => {
            for (usage, description) in HELP {
                println!("  {:<16} {description}", usage.yellow());
            }
        }
        ShellCommand::Unknown(input) => {
            eprintln!("{}: unknown command {input}", "error".red());
        }
    }
    true
}

/// Whether a submission would reach the endpoint rather than be ignored.
fn will_send(text: &str, has_attachment: bool) -> bool {
    !text.trim().is_empty() || has_attachment
}

async fn send(controller: &ConversationController, text: &str) {
    if !will_send(text, controller.pending_attachment().await.is_some()) {
        return;
    }
    let name = &controller.persona().name;
    let indicator = format!("{name} is thinking...");
    print!("{}", indicator.dimmed());
    let _ = std::io::stdout().flush();

    let outcome = controller.submit(text).await;

    // Clear the indicator line.
    print!("\r{}\r", " ".repeat(indicator.chars().count()));
    let _ = std::io::stdout().flush();

    let theme = controller.theme().await;
    match outcome {
        SubmitOutcome::Replied(bot) | SubmitOutcome::Failed(bot) => {
            println!("{}", render::render_message(&Message::Bot(bot), name, theme));
        }
        SubmitOutcome::Ignored => {}
        SubmitOutcome::Busy => eprintln!("{}", "a reply is still pending".yellow()),
        SubmitOutcome::Discarded => debug!("reply discarded after reset"),
    }
}

async fn print_log(controller: &ConversationController) {
    let log = controller.log().await;
    let theme = controller.theme().await;
    let name = &controller.persona().name;
    debug!(messages = log.len(), "printing conversation");
    for message in log.iter() {
        println!("{}", render::render_message(message, name, theme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_sent_trimmed() {
        assert_eq!(
            parse_command("  hello there  "),
            ShellCommand::Send("hello there".into())
        );
    }

    #[test]
    fn empty_line_sends_empty_text() {
        assert_eq!(parse_command("   "), ShellCommand::Send(String::new()));
    }

    #[test]
    fn blank_line_without_attachment_sends_nothing() {
        assert!(!will_send("   ", false));
        assert!(will_send("", true));
        assert!(will_send("hi", false));
    }

    #[test]
    fn attach_checks_extension() {
        assert_eq!(
            parse_command("/attach ./notes/report.PDF"),
            ShellCommand::Attach(PathBuf::from("./notes/report.PDF"))
        );
        assert_eq!(
            parse_command("/attach song.mp3"),
            ShellCommand::Rejected(PathBuf::from("song.mp3"))
        );
    }

    #[test]
    fn attach_without_path_is_unknown() {
        assert_eq!(
            parse_command("/attach"),
            ShellCommand::Unknown("/attach".into())
        );
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command("/detach"), ShellCommand::Detach);
        assert_eq!(parse_command("/new"), ShellCommand::New);
        assert_eq!(parse_command("/theme"), ShellCommand::Theme);
        assert_eq!(parse_command("/history"), ShellCommand::History);
        assert_eq!(parse_command("/help"), ShellCommand::Help);
        assert_eq!(parse_command("/quit"), ShellCommand::Quit);
        assert_eq!(parse_command(" /exit "), ShellCommand::Quit);
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/summon dragons"),
            ShellCommand::Unknown("/summon dragons".into())
        );
    }
}
