//! `gaitlink-cli` – GaitLink Command Line Interface
//!
//! This binary is the single entry point ("ignition switch") for the GaitLink
//! stack.  It:
//!
//! 1. Initialises structured logging (and optional OTLP export) before the
//!    async runtime exists.
//! 2. Loads `~/.gaitlink/config.toml`, writing the defaults on first run.
//! 3. Boots the event bus, relay ingest endpoint, execution monitor, motion
//!    preview and cockpit UI as independent tasks.
//! 4. Intercepts **Ctrl-C** and shuts the stack down.

mod config;
mod telemetry;

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use colored::Colorize;
use tracing::{error, info};

use gaitlink_bridge::{EventBus, FrameRouter, IngestServer, SubscriptionTable};
use gaitlink_cockpit::CockpitServer;
use gaitlink_core::PlaybackCommand;
use gaitlink_monitor::{action_topics, run_monitor, ExecutionMonitor};
use gaitlink_preview::{run_preview, KnotSampler, PlaybackEngine, PreviewPanel};

use crate::config::Config;

fn main() {
    // Structured logging first; the guard flushes pending spans on exit.
    let _telemetry = telemetry::init_tracing("gaitlink");

    print_banner();
    let cfg = load_config();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}: {}", "Failed to start async runtime".red(), e);
            std::process::exit(1);
        }
    };
    runtime.block_on(run(cfg));
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot sequence
// ─────────────────────────────────────────────────────────────────────────────

async fn run(cfg: Config) {
    println!("{}", "═══════════════════════════════════════".bold());
    println!("{}", "        GaitLink Boot Sequence         ".bold().cyan());
    println!("{}", "═══════════════════════════════════════".bold());

    // ── Step 1 – Event bus ─────────────────────────────────────────────────
    print!("  [1/5] {} … ", "Starting event bus".bold());
    std::io::stdout().flush().ok();
    let bus = Arc::new(EventBus::default());
    let table = SubscriptionTable::new();
    println!("{}", "OK".green());

    // ── Step 2 – Relay ingest endpoint ─────────────────────────────────────
    let ingest_addr = SocketAddr::from(([0, 0, 0, 0], cfg.ingest_port));
    print!(
        "  [2/5] {} {} … ",
        "Binding relay ingest on".bold(),
        format!("ws://localhost:{}", cfg.ingest_port).yellow()
    );
    std::io::stdout().flush().ok();
    let ingest = IngestServer::new(FrameRouter::new(Arc::clone(&bus), Arc::clone(&table)));
    tokio::spawn(async move {
        if let Err(e) = ingest.run(ingest_addr).await {
            error!(error = %e, "ingest endpoint failed");
        }
    });
    println!("{}", "OK".green());

    // ── Step 3 – Execution monitor ─────────────────────────────────────────
    let topics = action_topics(&cfg.action_namespace);
    print!(
        "  [3/5] {} {} … ",
        "Watching action namespace".bold(),
        cfg.action_namespace.yellow()
    );
    std::io::stdout().flush().ok();
    tokio::spawn(run_monitor(
        Arc::clone(&bus),
        Arc::clone(&table),
        ExecutionMonitor::new(),
        topics,
    ));
    println!("{}", "OK".green());

    // ── Step 4 – Motion preview ────────────────────────────────────────────
    print!(
        "  [4/5] {} {} … ",
        "Previewing goals from".bold(),
        cfg.goal_topic.yellow()
    );
    std::io::stdout().flush().ok();
    let engine = PlaybackEngine::new(Box::new(KnotSampler::new(cfg.preview_rate)));
    let mut panel = PreviewPanel::new(
        engine,
        Arc::clone(&table),
        &cfg.goal_topic,
        &cfg.robot_state_topic,
        cfg.auto_play,
    );
    panel.handle_command(PlaybackCommand::SetSpeed(cfg.playback_speed));
    tokio::spawn(run_preview(Arc::clone(&bus), panel));
    println!("{}", "OK".green());

    // ── Step 5 – Cockpit UI ────────────────────────────────────────────────
    print!(
        "  [5/5] {} {} … ",
        "Serving cockpit UI on".bold(),
        format!("http://localhost:{}", cfg.cockpit_port).yellow()
    );
    std::io::stdout().flush().ok();
    let cockpit = CockpitServer::new(Arc::clone(&bus)).with_port(cfg.cockpit_port);
    tokio::spawn(async move {
        if let Err(e) = cockpit.run().await {
            error!(error = %e, "cockpit server failed");
        }
    });
    println!("{}", "OK".green());

    println!("{}", "═══════════════════════════════════════".bold());
    println!(
        "  {} GaitLink is {}. Press {} to stop.",
        "✓".green().bold(),
        "RUNNING".green().bold(),
        "Ctrl-C".bold()
    );
    println!("{}", "═══════════════════════════════════════".bold());
    println!();
    info!(
        ingest_port = cfg.ingest_port,
        cockpit_port = cfg.cockpit_port,
        "stack running"
    );

    // ── Shutdown ───────────────────────────────────────────────────────────
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            println!();
            println!("{}", "⚠  Ctrl-C received – shutting down.".yellow().bold());
            info!("shutdown requested");
        }
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load `~/.gaitlink/config.toml`, writing the defaults on first run.
fn load_config() -> Config {
    match config::load() {
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            cfg
        }
        Ok(None) => {
            let cfg = Config::default();
            match config::save(&cfg) {
                Ok(()) => println!(
                    "  No configuration found – defaults written to {}",
                    config::config_path().display().to_string().bold()
                ),
                Err(e) => println!("{}: {}", "Error saving defaults".red(), e),
            }
            let mut cfg = cfg;
            config::apply_env_overrides(&mut cfg);
            cfg
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            let mut cfg = Config::default();
            config::apply_env_overrides(&mut cfg);
            cfg
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("{}", r#"   ____       _ _   _     _       _    "#.bold().cyan());
    println!("{}", r#"  / ___| __ _(_) |_| |   (_)_ __ | | __"#.bold().cyan());
    println!("{}", r#" | |  _ / _` | | __| |   | | '_ \| |/ /"#.bold().cyan());
    println!("{}", r#" | |_| | (_| | | |_| |___| | | | |   < "#.bold().cyan());
    println!("{}", r#"  \____|\__,_|_|\__|_____|_|_| |_|_|\_\"#.bold().cyan());
    println!();
    println!(
        "  {} {}",
        "GaitLink".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Legged-robot motion preview & execution dashboard");
    println!();
}
