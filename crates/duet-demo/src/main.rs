//! Duet demo - main entry point.
//!
//! Loads configuration, builds the selected demo menu and drives it from
//! stdin lines. Dialogs are printed whenever the menu becomes visible.

use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use duet_core::{load_config, load_config_from, MenuConfig};
use duet_demo::{render_dialog, Command, CommandError, DemoApp, MenuKind, Reply};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "duet", about = "Two-stage menu demo")]
struct Args {
    /// Menu to start with.
    #[arg(long, value_enum, default_value_t = MenuKind::Numbers)]
    menu: MenuKind,

    /// Override the settle delay in milliseconds.
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Config file. Defaults to <config dir>/duet/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

// =============================================================================
// Configuration
// =============================================================================

/// Resolve the menu config, falling back to defaults on any error.
fn resolve_config(args: &Args) -> MenuConfig {
    let loaded = match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Config error: {} - using defaults", e);
            MenuConfig::default()
        }
    };

    if let Some(ms) = args.settle_ms {
        config.settle_delay_ms = ms;
    }
    config
}

// =============================================================================
// Input
// =============================================================================

/// Read stdin on a dedicated OS thread and forward lines.
///
/// Blocking reads must stay off the runtime thread, or the settle timer
/// would never fire while waiting for input.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("stdin closed");
    });

    rx
}

// =============================================================================
// Main Loop
// =============================================================================

async fn run(kind: MenuKind, config: MenuConfig) {
    let mut app = DemoApp::new(kind, config);
    let mut lines = spawn_stdin_reader();
    let mut visibility = app.menu().subscribe_visibility();
    let mut shown = false;
    let mut printed_stage = None;

    println!("{} menu ready (o to open, h for help)", kind.name());

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(CommandError::Empty) => continue,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match app.handle(command) {
                    Ok(Reply::Quiet) => {}
                    Ok(Reply::Print(text)) => println!("{}", text),
                    Ok(Reply::Switched(kind)) => {
                        visibility = app.menu().subscribe_visibility();
                        shown = false;
                        printed_stage = None;
                        println!("{} menu ready", kind.name());
                    }
                    Ok(Reply::Quit) => break,
                    Err(e) => println!("error: {}", e),
                }
            }
            changed = visibility.changed() => {
                if changed.is_err() {
                    visibility = app.menu().subscribe_visibility();
                    continue;
                }
                // A zero settle delay coalesces hide and show into one
                // change, so a stage switch alone also counts as a new dialog.
                let visible = *visibility.borrow_and_update();
                let stage = app.menu().stage();
                if visible && (!shown || printed_stage != Some(stage)) {
                    print!("{}", render_dialog(&app.menu().snapshot()));
                    printed_stage = Some(stage);
                } else if !visible && shown {
                    println!("(closed)");
                    printed_stage = None;
                }
                shown = visible;
            }
        }
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> anyhow::Result<()> {
    // Initialize logging. Stdout belongs to the dialogs.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args);
    tracing::info!(
        "Duet demo starting: {} menu, settle {:?}",
        args.menu.name(),
        config.settle_delay()
    );

    // The settle timer needs a runtime with time enabled.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    rt.block_on(run(args.menu, config));

    tracing::info!("Duet demo exiting");
    Ok(())
}
