#![allow(dead_code)]

use assert_fs::TempDir;
use git2::{Oid, Repository, Signature, Time};
use rstest::fixture;
use std::path::{Path, PathBuf};

/// A throwaway git repository with a linear history built commit by commit.
pub struct GitFixture {
    pub dir: TempDir,
    pub repo: Repository,
    commits: i64,
}

#[fixture]
pub fn git_fixture() -> GitFixture {
    GitFixture::new()
}

impl GitFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("Failed to init repository");
        Self { dir, repo, commits: 0 }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Writes `content` to `relative` (or deletes it for `None`) and commits
    /// the change, returning the new commit's hash.
    pub fn commit(&mut self, relative: &str, content: Option<&str>, message: &str) -> String {
        let file = self.path(relative);
        let mut index = self.repo.index().expect("Failed to open index");
        match content {
            Some(content) => {
                if let Some(parent) = file.parent() {
                    std::fs::create_dir_all(parent).expect("Failed to create directories");
                }
                std::fs::write(&file, content).expect("Failed to write file");
                index.add_path(Path::new(relative)).expect("Failed to stage file");
            }
            None => {
                std::fs::remove_file(&file).expect("Failed to delete file");
                index.remove_path(Path::new(relative)).expect("Failed to unstage file");
            }
        }
        index.write().expect("Failed to write index");

        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let time = Time::new(1_700_000_000 + self.commits * 60, 0);
        let signature =
            Signature::new("Ada Lovelace", "ada@example.com", &time).expect("Failed to sign");
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        let oid: Oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("Failed to commit");
        self.commits += 1;
        oid.to_string()
    }
}

pub fn numbered_lines(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("line {i}\n")).collect()
}
