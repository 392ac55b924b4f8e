// src/lib.rs

//! Finds the commit that last changed (or next changes) a range of lines in a
//! file, following the range through the file's history.

pub mod differ;
pub mod error;
pub mod git;
pub mod mapper;
pub mod memory;
pub mod model;
pub mod renderer;
pub mod repository;
pub mod walker;

pub use differ::{LineDiffer, SimilarDiffer};
pub use error::{Error, Result};
pub use git::GitRepository;
pub use mapper::{translate, Side, Translation};
pub use memory::MemoryRepository;
pub use model::{ChangeRecord, CommitRef, DiffOp, Direction, LineRange, Snapshot};
pub use repository::{LogBounds, RepositoryAccessor, Revision};
pub use walker::{CancelFlag, HistoryWalker, Query};
