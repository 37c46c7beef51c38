//! CLI binary for the check-in scheduler.

use anyhow::Context;
use checkin::catalog::format_tip_for_display;
use checkin::format::format_time_until_next;
use checkin::store::FileStore;
use checkin::{AdviceScheduler, CheckinConfig, ScheduledAdvice};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

/// Periodic mental health check-ins with notification and email delivery.
#[derive(Parser)]
#[command(name = "checkin", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding persisted scheduler state.
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Run the scheduler until Ctrl+C.
    Run,

    /// Show whether advice is enabled and when the next one is due.
    Status,

    /// List advice history, newest first.
    History {
        /// Only show unread advice.
        #[arg(long)]
        unread: bool,
    },

    /// Generate and deliver advice immediately.
    SendNow,

    /// Mark one advice as read.
    MarkRead {
        /// Advice id as shown by `history`.
        id: String,
    },

    /// Mark all advice as read.
    MarkAllRead,

    /// Turn periodic advice on.
    Enable,

    /// Turn periodic advice off.
    Disable,

    /// Store the email recipient for advice emails.
    SetContact { email: String, name: String },

    /// Send a sample advice email to the stored contact.
    TestEmail,

    /// Clear all scheduler state.
    Reset,

    /// Write the default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(CheckinConfig::default_config_path);

    let command = match cli.command.unwrap_or(Command::Run) {
        Command::InitConfig { force } => return init_config(&config_path, force),
        command => command,
    };

    let config = CheckinConfig::load_or_default(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    let _log_guard = checkin::logging::init(&config.logging)?;

    let store = match cli.store_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location(),
    };
    info!("using state store at {}", store.root().display());
    let scheduler = AdviceScheduler::builder(config, Arc::new(store)).build()?;

    match command {
        Command::Run => run(&scheduler).await?,
        Command::Status => print_status(&scheduler),
        Command::History { unread } => {
            let advice = if unread {
                scheduler.unread_advice()
            } else {
                scheduler.advice_history()
            };
            if advice.is_empty() {
                println!("No advice yet.");
            }
            for item in &advice {
                print_advice(item);
            }
        }
        Command::SendNow => {
            let advice = scheduler.send_now();
            print_advice(&advice);
            scheduler.wait_for_pending_emails().await;
        }
        Command::MarkRead { id } => scheduler.mark_as_read(&id),
        Command::MarkAllRead => scheduler.mark_all_as_read(),
        Command::Enable => scheduler.set_enabled(true),
        Command::Disable => scheduler.set_enabled(false),
        Command::SetContact { email, name } => scheduler.set_user_info(&email, &name),
        Command::TestEmail => {
            if scheduler.send_test_email().await {
                println!("Test email sent.");
            } else {
                anyhow::bail!("test email was not sent; check the contact and [email] config");
            }
        }
        Command::Reset => {
            scheduler.reset();
            println!("Scheduler state cleared.");
        }
        Command::InitConfig { .. } => unreachable!("init-config is handled before loading config"),
    }

    Ok(())
}

async fn run(scheduler: &AdviceScheduler) -> anyhow::Result<()> {
    if !scheduler.request_notification_permission() {
        info!("system notifications unavailable, advice is still logged and emailed");
    }

    let mut events = scheduler.subscribe();
    scheduler.start();
    print_status(scheduler);
    println!("Press Ctrl+C to stop.\n");

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("waiting for Ctrl+C")?;
                info!("received Ctrl+C, shutting down...");
                break;
            }
            event = events.recv() => match event {
                Ok(advice) => print_advice(&advice),
                Err(RecvError::Lagged(skipped)) => info!("missed {skipped} advice event(s)"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    scheduler.destroy();
    scheduler.wait_for_pending_emails().await;
    Ok(())
}

fn init_config(path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    CheckinConfig::default().save_to_file(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn print_status(scheduler: &AdviceScheduler) {
    let state = scheduler.state();
    let unread = state.advice_history.iter().filter(|a| !a.is_read).count();
    println!(
        "Check-ins {} | {} in history, {unread} unread",
        if state.is_enabled { "enabled" } else { "disabled" },
        state.advice_history.len()
    );
    if state.is_enabled {
        println!(
            "Next check-in in {}",
            format_time_until_next(scheduler.time_until_next())
        );
    }
}

fn print_advice(advice: &ScheduledAdvice) {
    let marker = if advice.is_read { " " } else { "*" };
    let millis = i64::try_from(advice.timestamp).unwrap_or(i64::MAX);
    let sent = chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| advice.timestamp.to_string());
    println!("{marker} {} ({sent})", advice.id);
    println!("{}\n", advice.personal_message);
    println!("{}\n", format_tip_for_display(&advice.tip));
    if let Some(affirmation) = &advice.affirmation {
        println!("{affirmation}");
    }
    if let Some(prompt) = &advice.check_in_prompt {
        println!("Reflection: {prompt}");
    }
    println!();
}
