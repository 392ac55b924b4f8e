// src/memory.rs

use crate::error::{Error, Result};
use crate::model::CommitRef;
use crate::repository::{bounded_history, ChainEntry, LogBounds, RepositoryAccessor, Revision};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A linear history held in memory. Each commit carries the full set of
/// files, so a file's content is simply looked up per commit.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    root: PathBuf,
    commits: Vec<(CommitRef, BTreeMap<String, String>)>,
    reads: AtomicUsize,
}

impl MemoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), ..Self::default() }
    }

    /// Appends a commit that writes `content` to `path`, or deletes `path`
    /// when `content` is `None`. Other files carry over from the previous commit.
    pub fn commit(mut self, hash: &str, path: &str, content: Option<&str>) -> Self {
        let mut files = self.commits.last().map(|(_, files)| files.clone()).unwrap_or_default();
        match content {
            Some(content) => files.insert(path.to_string(), content.to_string()),
            None => files.remove(path),
        };

        let commit = CommitRef {
            hash: hash.to_string(),
            author_name: "Fixture Author".to_string(),
            author_email: "fixture@example.com".to_string(),
            timestamp: 1_700_000_000 + self.commits.len() as i64 * 60,
            summary: format!("update {path}"),
        };
        self.commits.push((commit, files));
        self
    }

    /// Number of snapshots served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn index_of(&self, hash: &str) -> Option<usize> {
        self.commits.iter().position(|(commit, _)| commit.hash == hash)
    }
}

impl RepositoryAccessor for MemoryRepository {
    fn resolve_root(&self, path: &Path) -> Result<PathBuf> {
        if path.starts_with(&self.root) {
            Ok(self.root.clone())
        } else {
            Err(Error::RepositoryNotFound { path: path.to_path_buf() })
        }
    }

    fn log(&self, _root: &Path, relative_path: &str, bounds: &LogBounds) -> Result<Vec<CommitRef>> {
        let mut previous = None;
        let chain: Vec<_> = self
            .commits
            .iter()
            .map(|(commit, files)| {
                let content = files.get(relative_path);
                let touches = content != previous;
                previous = content;
                ChainEntry { commit: commit.clone(), touches }
            })
            .collect();

        bounded_history(&chain, relative_path, bounds)
    }

    fn show_at(&self, _root: &Path, revision: Revision<'_>, relative_path: &str) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        let hash = match revision {
            Revision::At(hash) | Revision::ParentOf(hash) => hash,
        };
        let index = self.index_of(hash).ok_or_else(|| Error::SnapshotUnavailable {
            commit: hash.to_string(),
            path: relative_path.to_string(),
            source: git2::Error::from_str("no such commit"),
        })?;

        let index = match revision {
            Revision::At(_) => index,
            Revision::ParentOf(_) if index == 0 => return Ok(None),
            Revision::ParentOf(_) => index - 1,
        };
        Ok(self.commits[index].1.get(relative_path).cloned())
    }
}
