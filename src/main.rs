// RestoreConfig - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml / messages.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Headless restoration, or eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use restoreconfig::app;
pub use restoreconfig::core;
pub use restoreconfig::platform;
pub use restoreconfig::ui;
pub use restoreconfig::util;

use clap::Parser;
use crate::core::diagnostics::TracingDiagnostics;
use crate::core::restore::{ProgressSink, RestorationRoutine};
use platform::command::{CommandRestorer, NotConfigured};
use platform::os::PlatformIdentity;
use std::path::PathBuf;
use std::sync::Arc;

/// RestoreConfig - restore the browser and certificate-store configuration
/// used by the signing application.
#[derive(Parser, Debug)]
#[command(name = "RestoreConfig", version, about)]
struct Cli {
    /// Restoration program to run (overrides [restore] command in config.toml).
    #[arg(short = 'c', long = "command")]
    command: Option<PathBuf>,

    /// Arguments for the restoration program, after `--`.
    #[arg(last = true)]
    args: Vec<String>,

    /// Directory holding config.toml and messages.toml.
    #[arg(long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Run the restoration in the terminal instead of opening a window.
    #[arg(long = "headless")]
    headless: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Prints each progress line to stdout (headless mode).
struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

fn main() {
    let cli = Cli::parse();

    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_dir);
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        headless = cli.headless,
        platform = PlatformIdentity::current().name(),
        "RestoreConfig starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    // Restoration program: CLI override > config.toml > not configured.
    let routine: Arc<dyn RestorationRoutine> = match (cli.command, config.restore_command) {
        (Some(program), _) => Arc::new(CommandRestorer::new(program, cli.args)),
        (None, Some(program)) => Arc::new(CommandRestorer::new(program, config.restore_args)),
        (None, None) => {
            tracing::warn!("No restoration program configured");
            Arc::new(NotConfigured)
        }
    };

    if cli.headless {
        if let Err(e) = app::restore::run_headless(routine.as_ref(), &mut StdoutSink) {
            tracing::error!(error = %e, "Restoration failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let (messages, message_warnings) = platform::config::load_messages(&config_dir);
    for warning in &message_warnings {
        tracing::warn!(warning = %warning, "Message table warning");
    }

    let title = messages.get(crate::core::messages::WINDOW_TITLE).to_string();
    let font_size = config.font_size;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(util::constants::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(util::constants::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply_font_size(&cc.egui_ctx, font_size);
            let panel = app::panel::RestorationPanel::new(
                Box::new(gui::ViewportWindow::new(cc.egui_ctx.clone())),
                routine,
                Box::new(TracingDiagnostics),
                Box::new(PlatformIdentity::current()),
            );
            Ok(Box::new(gui::RestoreConfigApp::new(panel, messages)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch RestoreConfig GUI: {e}");
        std::process::exit(1);
    }
}
