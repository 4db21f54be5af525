use anyhow::Context;
use clap::Parser;
use cvfs::init::{default_data_dir, initialize};
use std::io::{self, IsTerminal};

mod args;
mod cli;

use args::{Cli, LogLevel};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.log_level);

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let mut ctx = initialize(&data_dir)
        .with_context(|| format!("could not open data dir {}", data_dir.display()))?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    cli::run_repl(&mut ctx.api, stdin.lock(), &mut stdout, interactive)?;
    Ok(())
}

fn setup_tracing(log_level: LogLevel) {
    if let Some(level) = log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
