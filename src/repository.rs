// src/repository.rs

use crate::error::{Error, Result};
use crate::model::CommitRef;
use std::path::{Path, PathBuf};

/// A file's content as of a commit, or as of that commit's first parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision<'a> {
    At(&'a str),
    ParentOf(&'a str),
}

/// Limits on the per-file log. Both bounds exclude the named commit itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBounds {
    /// Only commits newer than this one.
    pub after: Option<String>,
    /// Only commits older than this one; the walk starts from it instead of HEAD.
    pub before: Option<String>,
}

/// Read access to a version-controlled file history.
pub trait RepositoryAccessor {
    /// Root of the working tree enclosing `path`.
    fn resolve_root(&self, path: &Path) -> Result<PathBuf>;

    /// Commits touching `relative_path` within `bounds`, oldest first.
    fn log(&self, root: &Path, relative_path: &str, bounds: &LogBounds) -> Result<Vec<CommitRef>>;

    /// Content of `relative_path` at `revision`; `None` when the path (or the
    /// parent commit) does not exist there.
    fn show_at(&self, root: &Path, revision: Revision<'_>, relative_path: &str)
        -> Result<Option<String>>;
}

/// One commit of a linear, first-parent history.
#[derive(Debug, Clone)]
pub struct ChainEntry {
    pub commit: CommitRef,
    /// Whether the commit changed the file under inspection.
    pub touches: bool,
}

/// Applies `bounds` to a linear history ordered oldest first and keeps the
/// commits that touch the file.
pub fn bounded_history(chain: &[ChainEntry], path: &str, bounds: &LogBounds) -> Result<Vec<CommitRef>> {
    if !chain.iter().any(|entry| entry.touches) {
        return Err(Error::PathNotTracked { path: path.to_string() });
    }

    let position = |revision: &String| {
        chain
            .iter()
            .position(|entry| entry.commit.hash == *revision)
            .ok_or_else(|| Error::UnknownRevision { revision: revision.clone() })
    };

    let lower = match &bounds.after {
        Some(after) => position(after)? + 1,
        None => 0,
    };
    let upper = match &bounds.before {
        Some(before) => position(before)?,
        None => chain.len(),
    };

    Ok(chain
        .get(lower..upper)
        .unwrap_or_default()
        .iter()
        .filter(|entry| entry.touches)
        .map(|entry| entry.commit.clone())
        .collect())
}

/// `path` relative to `root`, with forward slashes.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let path = canonical(path);
    let relative = path.strip_prefix(canonical(root)).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

// Canonicalizes through the nearest existing ancestor, so deleted files
// still resolve against a canonical root.
fn canonical(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => canonical(parent).join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn entry(hash: &str, touches: bool) -> ChainEntry {
        ChainEntry {
            commit: CommitRef {
                hash: hash.to_string(),
                author_name: "Ada".to_string(),
                author_email: "ada@example.com".to_string(),
                timestamp: 0,
                summary: String::new(),
            },
            touches,
        }
    }

    #[fixture]
    fn chain() -> Vec<ChainEntry> {
        vec![
            entry("c1", true),
            entry("c2", false),
            entry("c3", true),
            entry("c4", true),
            entry("c5", false),
        ]
    }

    fn hashes(commits: Vec<CommitRef>) -> Vec<String> {
        commits.into_iter().map(|c| c.hash).collect()
    }

    #[rstest]
    #[case(None, None, vec!["c1", "c3", "c4"])]
    #[case(Some("c2"), None, vec!["c3", "c4"])]
    #[case(Some("c3"), None, vec!["c4"])]
    #[case(None, Some("c3"), vec!["c1"])]
    #[case(None, Some("c5"), vec!["c1", "c3", "c4"])]
    #[case(Some("c1"), Some("c4"), vec!["c3"])]
    #[case(Some("c4"), Some("c2"), vec![])]
    fn filters_touching_commits_within_bounds(
        chain: Vec<ChainEntry>,
        #[case] after: Option<&str>,
        #[case] before: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let bounds = LogBounds {
            after: after.map(String::from),
            before: before.map(String::from),
        };
        let commits = bounded_history(&chain, "f.txt", &bounds).unwrap();
        assert_eq!(hashes(commits), expected);
    }

    #[rstest]
    fn unknown_anchor_is_reported(chain: Vec<ChainEntry>) {
        let bounds = LogBounds { after: Some("nope".to_string()), before: None };
        assert!(matches!(
            bounded_history(&chain, "f.txt", &bounds),
            Err(Error::UnknownRevision { revision }) if revision == "nope"
        ));
    }

    #[test]
    fn history_without_touches_is_untracked() {
        let chain = vec![entry("c1", false), entry("c2", false)];
        assert!(matches!(
            bounded_history(&chain, "f.txt", &LogBounds::default()),
            Err(Error::PathNotTracked { .. })
        ));
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/definitely/not/here");
        let path = root.join("src").join("lib.rs");
        assert_eq!(relative_path(root, &path).as_deref(), Some("src/lib.rs"));
        assert_eq!(relative_path(root, Path::new("/elsewhere/lib.rs")), None);
        assert_eq!(relative_path(root, root), None);
    }
}
