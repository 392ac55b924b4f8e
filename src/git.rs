// src/git.rs

use crate::error::{Error, Result};
use crate::model::CommitRef;
use crate::repository::{bounded_history, ChainEntry, LogBounds, RepositoryAccessor, Revision};
use git2::{Commit, ErrorCode, Oid, Repository, Sort};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `RepositoryAccessor` over a git working tree, opened afresh for each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitRepository;

impl GitRepository {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryAccessor for GitRepository {
    fn resolve_root(&self, path: &Path) -> Result<PathBuf> {
        let not_found = || Error::RepositoryNotFound { path: path.to_path_buf() };

        let start = path
            .ancestors()
            .find(|candidate| candidate.is_dir())
            .unwrap_or(Path::new("."));
        let repo = Repository::discover(start).map_err(|err| match err.code() {
            ErrorCode::NotFound => not_found(),
            _ => Error::Git(err),
        })?;

        // bare repositories have no working tree to resolve paths against
        let workdir = repo.workdir().ok_or_else(not_found)?;
        Ok(workdir.canonicalize().unwrap_or_else(|_| workdir.to_path_buf()))
    }

    fn log(&self, root: &Path, relative_path: &str, bounds: &LogBounds) -> Result<Vec<CommitRef>> {
        let repo = Repository::open(root)?;

        // Anchors may be abbreviated; the chain is keyed by full hashes.
        let bounds = LogBounds {
            after: bounds.after.as_deref().map(|rev| full_hash(&repo, rev)).transpose()?,
            before: bounds.before.as_deref().map(|rev| full_hash(&repo, rev)).transpose()?,
        };

        let tip = match &bounds.before {
            Some(hash) => Oid::from_str(hash)?,
            None => match repo.head() {
                Ok(head) => head.peel_to_commit()?.id(),
                Err(err) if err.code() == ErrorCode::UnbornBranch => {
                    return Err(Error::PathNotTracked { path: relative_path.to_string() });
                }
                Err(err) => return Err(err.into()),
            },
        };

        // 1. Collect the first-parent chain from the tip, oldest first
        let mut revwalk = repo.revwalk()?;
        revwalk.push(tip)?;
        revwalk.simplify_first_parent()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;

        let mut chain = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            let blob = blob_id(&commit, relative_path)?;
            let parent_blob = match commit.parent_count() {
                0 => None,
                _ => blob_id(&commit.parent(0)?, relative_path)?,
            };
            chain.push(ChainEntry {
                commit: commit_ref(&commit),
                touches: blob != parent_blob,
            });
        }
        chain.reverse();

        // 2. Keep the commits that touch the file within the bounds
        let commits = bounded_history(&chain, relative_path, &bounds)?;
        debug!(
            path = relative_path,
            chain = chain.len(),
            candidates = commits.len(),
            "loaded file history"
        );
        Ok(commits)
    }

    fn show_at(&self, root: &Path, revision: Revision<'_>, relative_path: &str) -> Result<Option<String>> {
        let hash = match revision {
            Revision::At(hash) | Revision::ParentOf(hash) => hash,
        };
        let unavailable = |source: git2::Error| Error::SnapshotUnavailable {
            commit: hash.to_string(),
            path: relative_path.to_string(),
            source,
        };

        let repo = Repository::open(root)?;
        let commit = repo
            .revparse_single(hash)
            .and_then(|object| object.peel_to_commit())
            .map_err(unavailable)?;
        let commit = match revision {
            Revision::At(_) => commit,
            Revision::ParentOf(_) if commit.parent_count() == 0 => return Ok(None),
            Revision::ParentOf(_) => commit.parent(0).map_err(unavailable)?,
        };

        let tree = commit.tree().map_err(unavailable)?;
        let entry = match tree.get_path(Path::new(relative_path)) {
            Ok(entry) => entry,
            Err(err) if err.code() == ErrorCode::NotFound => return Ok(None),
            Err(err) => return Err(unavailable(err)),
        };
        let blob = entry
            .to_object(&repo)
            .and_then(|object| object.peel_to_blob())
            .map_err(unavailable)?;

        Ok(Some(String::from_utf8_lossy(blob.content()).into_owned()))
    }
}

fn full_hash(repo: &Repository, revision: &str) -> Result<String> {
    repo.revparse_single(revision)
        .and_then(|object| object.peel_to_commit())
        .map(|commit| commit.id().to_string())
        .map_err(|_| Error::UnknownRevision { revision: revision.to_string() })
}

fn blob_id(commit: &Commit, relative_path: &str) -> Result<Option<Oid>> {
    match commit.tree()?.get_path(Path::new(relative_path)) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn commit_ref(commit: &Commit) -> CommitRef {
    let author = commit.author();
    CommitRef {
        hash: commit.id().to_string(),
        author_name: author.name().unwrap_or("Unknown").to_string(),
        author_email: author.email().unwrap_or("").to_string(),
        timestamp: author.when().seconds(),
        summary: commit.summary().unwrap_or("").to_string(),
    }
}
