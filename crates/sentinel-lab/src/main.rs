mod cli;
mod config;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use payload_codec::{Pacing, TransformConsole};
use session_journal::LogEntry;
use signature_engine::InspectorConsole;

use crate::cli::{Cli, Commands};
use crate::config::Config;

/// Envelope for `--json` output.
#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.
    let mut cfg = config::load(&cli.config)?;
    if let Some(level) = cli.log_level {
        cfg.logging.level = level;
    }

    // 3. Init tracing-subscriber. Diagnostics go to stderr so they never
    //    interleave with one-shot output or the TUI.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        config_file = %cli.config.display(),
        "sentinel-lab starting"
    );

    match cli.command {
        Some(Commands::Encode {
            payload,
            no_delay,
            json,
        }) => run_transform(Direction::Encode, payload, no_delay, json, &cfg).await,
        Some(Commands::Decode {
            payload,
            no_delay,
            json,
        }) => run_transform(Direction::Decode, payload, no_delay, json, &cfg).await,
        Some(Commands::Inspect {
            method,
            path,
            payload,
            json,
        }) => run_inspect(&method, &path, &payload, json),
        None => tui::run(cfg).await,
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Encode,
    Decode,
}

/// Run a one-shot staged transform, printing each step as it becomes due.
async fn run_transform(
    direction: Direction,
    payload: String,
    no_delay: bool,
    json: bool,
    cfg: &Config,
) -> Result<()> {
    // JSON output is for machines; pacing would only slow it down.
    let pacing = if no_delay || json {
        Pacing::ZERO
    } else {
        cfg.pacing.to_pacing()
    };

    let mut console = TransformConsole::new(pacing);
    console.set_buffer(payload);

    let steps = match direction {
        Direction::Encode => console.encode_sequence(),
        Direction::Decode => console.decode_sequence(),
    };

    for step in steps {
        if !step.after.is_zero() {
            tokio::time::sleep(step.after).await;
        }
        if !json {
            println!(
                "[{}] » {}",
                chrono::Utc::now().format("%H:%M:%S"),
                step.message
            );
        }
        console.apply(step);
    }

    if json {
        // Chronological order for machine consumption.
        let entries: Vec<&LogEntry> = console.journal().iter().rev().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: entries,
            })?
        );
    }

    Ok(())
}

/// Run a one-shot inspection and print the verdict.
fn run_inspect(method: &str, path: &str, payload: &str, json: bool) -> Result<()> {
    let mut console = InspectorConsole::new().context("failed to compile signature rules")?;
    let verdict = console.submit(method, path, payload);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: &verdict,
            })?
        );
    } else if verdict.allowed {
        println!("ALLOWED {method} {path}");
    } else {
        println!(
            "BLOCKED [{}] {method} {path} - {}",
            verdict
                .severity
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            verdict.reason.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
