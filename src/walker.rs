// src/walker.rs

use crate::differ::{LineDiffer, SimilarDiffer};
use crate::error::{Error, Result};
use crate::mapper::{translate, Side};
use crate::model::{ChangeRecord, CommitRef, Direction, LineRange, Snapshot};
use crate::repository::{relative_path, LogBounds, RepositoryAccessor, Revision};
use indicatif::ProgressBar;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// What to search for in a file's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub direction: Direction,
    /// Boundary commit, excluded from the search.
    pub anchor: Option<String>,
    /// Tracked lines. When absent, the whole file as committed at the first
    /// candidate examined, not the working-tree copy: line numbers read off
    /// a file with uncommitted edits may not match.
    pub range: Option<LineRange>,
}

impl Query {
    pub fn new(direction: Direction) -> Self {
        Self { direction, anchor: None, range: None }
    }

    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn range(mut self, range: LineRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Shared flag that stops a running search before its next candidate.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Direction {
    fn bounds(self, anchor: Option<&str>) -> LogBounds {
        let anchor = anchor.map(str::to_string);
        match self {
            Direction::Older => LogBounds { after: None, before: anchor },
            Direction::Newer => LogBounds { after: anchor, before: None },
        }
    }

    // The log is oldest first: going back in time starts from its newest end.
    fn next_candidate(self, candidates: &mut VecDeque<CommitRef>) -> Option<CommitRef> {
        match self {
            Direction::Older => candidates.pop_back(),
            Direction::Newer => candidates.pop_front(),
        }
    }

    /// Revisions holding the known and the discovered side of the range.
    fn revisions(self, hash: &str) -> (Revision<'_>, Revision<'_>) {
        match self {
            Direction::Older => (Revision::At(hash), Revision::ParentOf(hash)),
            Direction::Newer => (Revision::ParentOf(hash), Revision::At(hash)),
        }
    }

    /// Orders a known/discovered pair as (before the commit, at the commit).
    fn chronological<T>(self, known: T, discovered: T) -> (T, T) {
        match self {
            Direction::Older => (discovered, known),
            Direction::Newer => (known, discovered),
        }
    }
}

/// Finds the nearest commit in a file's history that changed a line range.
pub struct HistoryWalker<R, D = SimilarDiffer> {
    repository: R,
    differ: D,
    progress: ProgressBar,
    cancel: CancelFlag,
}

impl<R: RepositoryAccessor> HistoryWalker<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            differ: SimilarDiffer::default(),
            progress: ProgressBar::hidden(),
            cancel: CancelFlag::default(),
        }
    }
}

impl<R: RepositoryAccessor, D: LineDiffer> HistoryWalker<R, D> {
    pub fn with_differ<E: LineDiffer>(self, differ: E) -> HistoryWalker<R, E> {
        HistoryWalker {
            repository: self.repository,
            differ,
            progress: self.progress,
            cancel: self.cancel,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Walks the history of `file_path` in `query.direction` and returns the
    /// first commit whose change overlaps the tracked range, or `None` when
    /// no candidate does.
    pub fn find(&self, file_path: &Path, query: &Query) -> Result<Option<ChangeRecord>> {
        let direction = query.direction;

        // 1. Resolve the repository and the path inside it
        let root = self.repository.resolve_root(file_path)?;
        let path = relative_path(&root, file_path).ok_or_else(|| Error::PathNotTracked {
            path: file_path.display().to_string(),
        })?;

        // 2. Load the candidates between the bounds
        let bounds = direction.bounds(query.anchor.as_deref());
        let mut candidates: VecDeque<_> = self.repository.log(&root, &path, &bounds)?.into();
        debug!(path = %path, ?direction, candidates = candidates.len(), "starting walk");
        self.progress.set_length(candidates.len() as u64);
        self.progress.set_message(path.clone());

        let mut tracked = query.range;

        // 3. Replay the candidates until one touches the range
        while let Some(commit) = direction.next_candidate(&mut candidates) {
            if self.cancel.is_cancelled() {
                self.progress.abandon_with_message("cancelled");
                return Err(Error::Cancelled);
            }
            debug!(commit = commit.short_hash(), range = ?tracked, "checking commit");

            let (known_revision, discovered_revision) = direction.revisions(&commit.hash);
            let known = self.repository.show_at(&root, known_revision, &path)?;
            let discovered = self.repository.show_at(&root, discovered_revision, &path)?;
            self.progress.inc(1);

            let (before, after) = direction.chronological(known, discovered);
            let Some(before) = before else {
                // The file is created here: everything in it is new.
                let after = Snapshot::new(&commit.hash, &path, after.unwrap_or_default());
                let range = match direction {
                    Direction::Older => tracked.unwrap_or_else(|| LineRange::full(after.line_count())),
                    Direction::Newer => LineRange::full(after.line_count()),
                };
                info!(commit = commit.short_hash(), %range, "range introduced with the file");
                self.progress.finish_and_clear();
                return Ok(Some(ChangeRecord {
                    before: String::new(),
                    after: after.slice(range),
                    before_range: range,
                    after_range: range,
                    commit,
                }));
            };
            let after = after.unwrap_or_else(|| {
                warn!(commit = commit.short_hash(), path = %path, "file deleted by commit");
                String::new()
            });

            let before = Snapshot::new(format!("{}~1", commit.hash), &path, before);
            let after = Snapshot::new(&commit.hash, &path, after);
            let (known, discovered) = match direction {
                Direction::Older => (&after, &before),
                Direction::Newer => (&before, &after),
            };

            let range = tracked.unwrap_or_else(|| LineRange::full(known.line_count()));
            let diff = self.differ.diff(&known.text, &discovered.text);
            let translation = translate(&diff, range, Side::Left);
            // An empty known side can only gain lines, and those fill the range.
            let grown = known.line_count() == 0 && discovered.line_count() > 0;

            if translation.touched || grown {
                let mapped = if grown {
                    LineRange::full(discovered.line_count())
                } else {
                    translation.mapped
                };
                let found = if translation.empty {
                    String::new()
                } else {
                    discovered.slice(mapped)
                };
                let (before_range, after_range) = direction.chronological(range, mapped);
                let (before, after) = direction.chronological(known.slice(range), found);
                info!(
                    commit = commit.short_hash(),
                    %before_range,
                    %after_range,
                    emptied = translation.empty,
                    "found change to range"
                );
                self.progress.finish_and_clear();
                return Ok(Some(ChangeRecord {
                    before,
                    after,
                    before_range,
                    after_range,
                    commit,
                }));
            }

            trace!(from = %range, to = %translation.mapped, "range carried past commit");
            tracked = Some(translation.mapped);
        }

        self.progress.finish_and_clear();
        debug!(path = %path, "no commit touches the range");
        Ok(None)
    }
}
