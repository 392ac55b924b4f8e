// src/differ.rs

use crate::model::{split_lines, DiffOp};
use similar::{capture_diff_slices, Algorithm};

/// Computes a line diff from a reference text to a target text.
pub trait LineDiffer {
    /// Spans in document order; `Removed` lines exist only in `reference`,
    /// `Inserted` lines only in `target`.
    fn diff(&self, reference: &str, target: &str) -> Vec<DiffOp>;
}

/// Line differ backed by the `similar` crate.
#[derive(Debug, Clone, Copy)]
pub struct SimilarDiffer {
    algorithm: Algorithm,
}

impl SimilarDiffer {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }
}

impl Default for SimilarDiffer {
    fn default() -> Self {
        Self::new(Algorithm::Myers)
    }
}

impl LineDiffer for SimilarDiffer {
    fn diff(&self, reference: &str, target: &str) -> Vec<DiffOp> {
        let old = split_lines(reference);
        let new = split_lines(target);

        let mut ops = Vec::new();
        for op in capture_diff_slices(self.algorithm, &old, &new) {
            match op {
                similar::DiffOp::Equal { len, .. } => push(&mut ops, DiffOp::Unchanged(len)),
                similar::DiffOp::Delete { old_len, .. } => push(&mut ops, DiffOp::Removed(old_len)),
                similar::DiffOp::Insert { new_len, .. } => push(&mut ops, DiffOp::Inserted(new_len)),
                similar::DiffOp::Replace { old_len, new_len, .. } => {
                    push(&mut ops, DiffOp::Removed(old_len));
                    push(&mut ops, DiffOp::Inserted(new_len));
                }
            }
        }
        ops
    }
}

// Merges a span into the previous one when both are of the same kind.
fn push(ops: &mut Vec<DiffOp>, op: DiffOp) {
    if op.count() == 0 {
        return;
    }
    match (ops.last_mut(), op) {
        (Some(DiffOp::Unchanged(n)), DiffOp::Unchanged(m))
        | (Some(DiffOp::Inserted(n)), DiffOp::Inserted(m))
        | (Some(DiffOp::Removed(n)), DiffOp::Removed(m)) => *n += m,
        _ => ops.push(op),
    }
}
