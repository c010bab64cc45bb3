//! lodge — line-oriented console for the lodgedb record store.
//!
//! Two modes:
//! - **REPL mode**: `lodge [flags]` — interactive prompt (if stdin is a TTY)
//! - **Pipe mode**: `echo "create User" | lodge` — line-by-line from stdin

mod repl;

use std::io::IsTerminal;
use std::process;

use clap::{Arg, ArgAction, Command};
use lodgedb::Lodge;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let mut lodge = match open_store(&matches) {
        Ok(lodge) => lodge,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let exit_code = if std::io::stdin().is_terminal() {
        repl::run_repl(&mut lodge)
    } else {
        repl::run_pipe(&mut lodge)
    };
    process::exit(exit_code);
}

fn build_cli() -> Command {
    Command::new("lodge")
        .about("Line-oriented console for the lodgedb record store")
        .arg(
            Arg::new("file")
                .long("file")
                .value_name("PATH")
                .default_value("lodge.json")
                .help("Backing JSON file"),
        )
        .arg(
            Arg::new("strict-load")
                .long("strict-load")
                .action(ArgAction::SetTrue)
                .help("Fail on corrupt or unknown entries instead of skipping them"),
        )
        .arg(
            Arg::new("strict-keys")
                .long("strict-keys")
                .action(ArgAction::SetTrue)
                .help("Reject duplicate record keys instead of overwriting"),
        )
}

fn open_store(matches: &clap::ArgMatches) -> Result<Lodge, String> {
    let path = matches
        .get_one::<String>("file")
        .map(|s| s.as_str())
        .unwrap_or("lodge.json");

    let mut builder = Lodge::builder().path(path);
    if matches.get_flag("strict-load") {
        builder = builder.strict_load();
    }
    if matches.get_flag("strict-keys") {
        builder = builder.strict_keys();
    }
    builder
        .open()
        .map_err(|e| format!("Failed to open store: {}", e))
}
