//! syncscope CLI — menu front end for the concurrency scenarios.
//!
//! Three modes:
//! - **Shell mode**: `syncscope [flags] race|sync|deadlock|all` — run, save report, exit
//! - **REPL mode**: `syncscope [flags]` — interactive menu (if stdin is TTY)
//! - **Pipe mode**: `printf '1\n4\n' | syncscope` — selections line-by-line from stdin

mod commands;
mod console;
mod menu;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use syncscope_concurrency::{MenuChoice, ScenarioRunner};
use syncscope_core::{EventLog, Result, ScenarioConfig, CONFIG_FILE_NAME};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use console::ConsoleSink;

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if matches.subcommand_name() == Some("init-config") {
        process::exit(run_init_config());
    }

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let log = Arc::new(EventLog::with_sink(ConsoleSink));
    let runner = ScenarioRunner::new(log, config);

    let result = match matches.subcommand_name() {
        Some(name) => run_shell_mode(&runner, name),
        None if io::stdin().is_terminal() => menu::run_repl(&runner),
        None => menu::run_pipe(&runner, io::stdin().lock(), &mut io::stdout()),
    };

    // Leaked deadlock workers die with the process.
    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "syncscope=debug"
    } else {
        "syncscope=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// File settings (explicit `--config`, else `./syncscope.toml` if present),
/// then command-line overrides.
fn load_config(matches: &clap::ArgMatches) -> Result<ScenarioConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ScenarioConfig::from_file(Path::new(path))?,
        None if Path::new(CONFIG_FILE_NAME).exists() => {
            ScenarioConfig::from_file(Path::new(CONFIG_FILE_NAME))?
        }
        None => ScenarioConfig::default(),
    };

    if let Some(&threads) = matches.get_one::<usize>("threads") {
        config.num_threads = threads;
    }
    if let Some(&iterations) = matches.get_one::<u64>("iterations") {
        config.iterations = iterations;
    }
    if let Some(&timeout) = matches.get_one::<u64>("timeout-ms") {
        config.wait_timeout_ms = timeout;
    }
    if let Some(&hold) = matches.get_one::<u64>("hold-ms") {
        config.hold_delay_ms = hold;
    }
    if let Some(report) = matches.get_one::<String>("report") {
        config.report_path = PathBuf::from(report);
    }

    config.validate()?;
    tracing::debug!(target: "syncscope::cli", ?config, "Configuration loaded");
    Ok(config)
}

fn run_shell_mode(runner: &ScenarioRunner, subcommand: &str) -> Result<()> {
    let scenarios: &[MenuChoice] = match subcommand {
        "race" => &[MenuChoice::Race],
        "sync" => &[MenuChoice::Sync],
        "deadlock" => &[MenuChoice::Deadlock],
        _ => &[MenuChoice::Race, MenuChoice::Sync, MenuChoice::Deadlock],
    };
    for choice in scenarios {
        runner.run(*choice)?;
    }
    menu::handle_line(runner, MenuChoice::SaveAndExit.key(), &mut io::stdout())?;
    Ok(())
}

fn run_init_config() -> i32 {
    let path = Path::new(CONFIG_FILE_NAME);
    match ScenarioConfig::write_default_if_missing(path) {
        Ok(true) => {
            println!("Wrote {}", path.display());
            0
        }
        Ok(false) => {
            println!("{} already exists, leaving it unchanged", path.display());
            0
        }
        Err(e) => {
            eprintln!("Failed to write {}: {}", path.display(), e);
            1
        }
    }
}
