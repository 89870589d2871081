use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use compare_stats::{Cli, Comparator};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        eprintln!("compare-stats {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if cli.dirs.len() < 2 {
        let usage = Cli::command().render_usage();
        eprintln!("{usage}");
        eprintln!("2 or more results directories are required to proceed");
        return ExitCode::from(2);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let comparator = Comparator::new(cli.recursive);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    comparator.compare(&cli.dirs, &mut out)?;
    Ok(())
}
