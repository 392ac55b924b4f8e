// src/cli.rs

use clap::Parser;
use git_range_history::{Direction, LineRange};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File whose history to search
    pub file: PathBuf,

    /// Which way through the history to search
    #[arg(short, long, value_enum, default_value_t = Mode::Older)]
    pub direction: Mode,

    /// Commit to continue from; it is excluded from the search
    #[arg(short, long)]
    pub anchor: Option<String>,

    /// First line of the tracked range (1-based)
    #[arg(long, requires = "end")]
    pub start: Option<usize>,

    /// Last line of the tracked range (inclusive)
    #[arg(long, requires = "start")]
    pub end: Option<usize>,

    /// Lines of context around changes in the rendered diff
    #[arg(long, default_value_t = 3)]
    pub context: usize,

    /// Log the walk at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn range(&self) -> git_range_history::Result<Option<LineRange>> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => LineRange::new(start, end).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum Mode {
    /// Find the most recent commit that changed the range
    Older,
    /// Find the next commit after the anchor that changes the range
    Newer,
}

impl From<Mode> for Direction {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Older => Direction::Older,
            Mode::Newer => Direction::Newer,
        }
    }
}
