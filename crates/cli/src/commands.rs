//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("syncscope")
        .about("Race, lock and deadlock scenarios on a shared counter")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: ./syncscope.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .help("Workers for the race and sync scenarios")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("iterations")
                .long("iterations")
                .short('n')
                .help("Increments per worker")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Deadlock scenario: bounded wait per worker in milliseconds")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("hold-ms")
                .long("hold-ms")
                .help("Deadlock scenario: pause between lock acquisitions in milliseconds")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .short('o')
                .help("Report file (default: report.txt)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show diagnostic logging on stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("race").about("Run the race scenario, then save the report"))
        .subcommand(Command::new("sync").about("Run the sync scenario, then save the report"))
        .subcommand(
            Command::new("deadlock").about("Run the deadlock scenario, then save the report"),
        )
        .subcommand(Command::new("all").about("Run all three scenarios, then save the report"))
        .subcommand(
            Command::new("init-config")
                .about("Write a default syncscope.toml to the current directory"),
        )
}
