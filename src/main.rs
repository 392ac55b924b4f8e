// src/main.rs

mod cli;

use clap::Parser;
use cli::Args;
use git_range_history::{renderer, GitRepository, HistoryWalker, Query};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error as _;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    let start_time = Instant::now();

    let code = match run(&args) {
        Ok(Some(output)) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("No git history found for selection.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error searching history: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    };

    tracing::debug!(elapsed = ?start_time.elapsed(), "finished");
    code
}

fn run(args: &Args) -> git_range_history::Result<Option<String>> {
    let mut query = Query::new(args.direction.into());
    if let Some(anchor) = &args.anchor {
        query = query.anchor(anchor.as_str());
    }
    if let Some(range) = args.range()? {
        query = query.range(range);
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{pos}/{len} commits]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let walker = HistoryWalker::new(GitRepository::new()).with_progress(bar);
    let record = walker.find(&args.file, &query)?;

    let file = args.file.display().to_string();
    Ok(record.map(|record| renderer::render_change(&record, &file, args.context)))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("git_range_history=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
