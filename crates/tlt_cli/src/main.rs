//! Tap Latency Tester - terminal frontend.
//!
//! Plays a metronome click in the terminal, records a tap for every
//! Enter keypress, and displays the tempo the user is actually tapping
//! at alongside the averaged beat-to-tap latency.

mod emitter;
mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncBufReadExt;

use tlt_core::analysis::{Reading, TimestampMs};
use tlt_core::clock::SystemClock;
use tlt_core::config::ConfigManager;
use tlt_core::logging::{init_tracing, LogLevel};
use tlt_core::models::SessionState;
use tlt_core::session::Session;

use emitter::TerminalBeatEmitter;

#[derive(Parser)]
#[command(name = "tap-latency-tester")]
#[command(about = "Metronome-driven tap tempo and input latency tester")]
#[command(version)]
struct Cli {
    /// Metronome tempo in BPM (overrides the config file)
    #[arg(long)]
    bpm: Option<f64>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Samples kept in the averaging window
    #[arg(long)]
    window: Option<usize>,

    /// Taps required before readings are shown
    #[arg(long)]
    min_samples: Option<usize>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Print each reading as a JSON line instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = ConfigManager::new(&config_path);
    config
        .load_or_create()
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let mut settings = config.settings().clone();
    if let Some(window) = cli.window {
        settings.analysis.window_size = window;
    }
    if let Some(min_samples) = cli.min_samples {
        settings.analysis.min_samples = min_samples;
    }
    settings.validate();

    let mut session = Session::new(
        &settings,
        Arc::new(SystemClock::new()),
        Arc::new(TerminalBeatEmitter),
    );

    if let Some(bpm) = cli.bpm {
        // Invalid tempo keeps the prior (config) value in effect.
        if let Err(err) = session.set_tempo(bpm) {
            tracing::warn!(
                "{err}; keeping {} BPM",
                session.reading().configured_bpm
            );
        }
    }

    let mut state_rx = session.subscribe();
    let ui = tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            match *state_rx.borrow() {
                SessionState::CountingDown(n) => println!("{n}..."),
                SessionState::Running => {
                    println!("Go - press Enter on every click. q then Enter quits.")
                }
                SessionState::Idle => break,
            }
        }
    });

    session.start().context("starting session")?;

    let mut taps: Vec<TimestampMs> = Vec::new();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        // Taps during the countdown are deliberately dropped.
        if let Some(tapped_at) = session.record_tap() {
            taps.push(tapped_at);
            print_reading(&session.reading(), cli.json);
        }
    }

    session.stop();
    session.join().await;
    let _ = ui.await;

    print_summary(&taps, settings.analysis.warmup_skip);
    Ok(())
}

/// Default config location under the platform config dir.
fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tap-latency-tester")
        .join("config.toml")
}

fn print_reading(reading: &Reading, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(reading) {
            println!("{line}");
        }
        return;
    }

    if !reading.ready {
        println!(
            "  warming up ({}/{} taps)",
            reading.sample_count, reading.min_samples
        );
        return;
    }

    // Ready implies the tempo is available; latency needs only two
    // taps, so it is too.
    let detected = reading.detected_bpm.unwrap_or(f64::NAN);
    let latency = reading.latency_ms.unwrap_or(f64::NAN);
    let in_beat = reading.latency_in_beat_ms.unwrap_or(f64::NAN);
    println!(
        "  tapping {detected:.1} BPM (metronome {:.1}) | latency {latency:+.1} ms | {in_beat:.1} ms into beat",
        reading.configured_bpm
    );
}

fn print_summary(taps: &[TimestampMs], warmup_skip: usize) {
    println!("--- session over: {} taps recorded ---", taps.len());
    match summary::session_tempo(taps, warmup_skip) {
        Some(bpm) => println!(
            "whole-session tempo ({warmup_skip} warm-up intervals discarded): {bpm:.1} BPM"
        ),
        None => println!("not enough taps for a whole-session tempo"),
    }
}
