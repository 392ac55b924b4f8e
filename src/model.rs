// src/model.rs

use std::fmt;

/// A contiguous block of lines, 1-indexed, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Builds a range, rejecting `start == 0` and `start > end`.
    pub fn new(start: usize, end: usize) -> crate::Result<Self> {
        if start == 0 || start > end {
            return Err(crate::Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole span of a file with `line_count` lines. An empty file still
    /// yields `{1, 1}` so the range invariant holds.
    pub fn full(line_count: usize) -> Self {
        Self { start: 1, end: line_count.max(1) }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// File content as of a specific commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub commit: String,
    pub path: String,
    pub text: String,
}

impl Snapshot {
    pub fn new(commit: impl Into<String>, path: impl Into<String>, text: impl Into<String>) -> Self {
        Self { commit: commit.into(), path: path.into(), text: text.into() }
    }

    /// Lines with their terminators attached. Empty text has no lines and a
    /// trailing newline does not open an extra one.
    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.text)
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Text of the lines covered by `range`, clipped to the snapshot's length.
    pub fn slice(&self, range: LineRange) -> String {
        let lines = self.lines();
        let start = (range.start - 1).min(lines.len());
        let end = range.end.min(lines.len());
        lines[start..end].concat()
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// One span of a line diff between a reference and a target text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    /// Lines present in both, in 1:1 correspondence.
    Unchanged(usize),
    /// Lines present only in the target.
    Inserted(usize),
    /// Lines present only in the reference.
    Removed(usize),
}

impl DiffOp {
    pub fn count(&self) -> usize {
        match *self {
            DiffOp::Unchanged(n) | DiffOp::Inserted(n) | DiffOp::Removed(n) => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    /// Author time, seconds since the epoch.
    pub timestamp: i64,
    /// First line of the commit message.
    pub summary: String,
}

impl CommitRef {
    pub fn short_hash(&self) -> &str {
        &self.hash[..self.hash.len().min(7)]
    }
}

/// Which way through the file's history a search goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Back in time: the range is known at a commit, discovered before it.
    Older,
    /// Forward in time: the range is known before a commit, discovered at it.
    Newer,
}

/// The commit found by a search, with both sides of the tracked range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub commit: CommitRef,
    pub before: String,
    pub after: String,
    pub before_range: LineRange,
    pub after_range: LineRange,
}

impl ChangeRecord {
    /// Query that resumes the search further back in time from this commit.
    pub fn continue_older(&self) -> crate::walker::Query {
        crate::walker::Query {
            direction: Direction::Older,
            anchor: Some(self.commit.hash.clone()),
            range: Some(self.before_range),
        }
    }

    /// Query that resumes the search further forward in time from this commit.
    pub fn continue_newer(&self) -> crate::walker::Query {
        crate::walker::Query {
            direction: Direction::Newer,
            anchor: Some(self.commit.hash.clone()),
            range: Some(self.after_range),
        }
    }
}
