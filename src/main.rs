//! deployrc CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use deployrc::cli::{Cli, CommandDispatcher};
use deployrc::config::process_env;
use deployrc::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("deployrc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deployrc=info"))
    };

    // Logs share stderr with warnings so stdout stays parseable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("deployrc starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let working_dir = std::env::current_dir().unwrap_or_default();

    let mut ui = create_ui(output_mode);
    let dispatcher = CommandDispatcher::new(working_dir, process_env());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(e.exit_code())
        }
    }
}
