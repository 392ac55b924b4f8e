// src/mapper.rs

use crate::model::{DiffOp, LineRange};

/// Which argument of the diff the tracked range belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The range lives in the first (reference) text of the diff.
    Left,
    /// The range lives in the second text; inserted and removed swap roles.
    Right,
}

/// Outcome of replaying a diff over a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    /// The range in the other text's coordinates.
    pub mapped: LineRange,
    /// Whether any inserted or removed span overlapped the range.
    pub touched: bool,
    /// Whether every line of the range was removed. `mapped` then holds the
    /// single line position where the range used to be, not a line of it.
    pub empty: bool,
}

/// Translates `range` across `diff` into the coordinates of the other text.
///
/// The cursor counts reference lines consumed so far, so a target-only span
/// seen at cursor `k` sits between reference lines `k` and `k + 1`. Spans are
/// compared against `range` itself; shifts accumulate on the returned copy.
///
/// Insertions right after the last line of the range count as touching it,
/// insertions right before its first line only shift it. Adjacent removed and
/// inserted spans form a replacement: when the removed half overlaps the
/// range, the inserted half grows it wherever it lands.
pub fn translate(diff: &[DiffOp], range: LineRange, side: Side) -> Translation {
    let mut start = range.start;
    // lines of the range still present, plus lines grown into it
    let mut kept = range.len();
    let mut touched = false;
    let mut cursor = 0usize;
    let mut replacing = false;

    for op in replacements_first(diff, side) {
        let replaced = std::mem::take(&mut replacing);
        match op {
            DiffOp::Unchanged(count) => cursor += count,
            DiffOp::Inserted(0) | DiffOp::Removed(0) => {}
            DiffOp::Inserted(count) => {
                if replaced {
                    kept += count;
                } else if cursor < range.start {
                    start += count;
                } else if cursor <= range.end {
                    touched = true;
                    kept += count;
                }
            }
            DiffOp::Removed(count) => {
                // removed reference lines are cursor + 1 ..= cursor + count
                if cursor + count < range.start {
                    start -= count;
                } else if cursor < range.end {
                    touched = true;
                    let leading = (range.start - 1).saturating_sub(cursor).min(count);
                    let inside = (cursor + count).min(range.end) - cursor.max(range.start - 1);
                    start -= leading;
                    kept = kept.saturating_sub(inside);
                    replacing = true;
                }
                cursor += count;
            }
        }
    }

    Translation {
        mapped: LineRange { start, end: start + kept.max(1) - 1 },
        touched,
        empty: kept == 0,
    }
}

// Applies the side and orders each inserted/removed pair removal first.
fn replacements_first(diff: &[DiffOp], side: Side) -> Vec<DiffOp> {
    let mut ops: Vec<DiffOp> = diff
        .iter()
        .map(|op| match side {
            Side::Left => *op,
            Side::Right => invert(*op),
        })
        .collect();
    for i in 1..ops.len() {
        if let (DiffOp::Inserted(_), DiffOp::Removed(_)) = (ops[i - 1], ops[i]) {
            ops.swap(i - 1, i);
        }
    }
    ops
}

fn invert(op: DiffOp) -> DiffOp {
    match op {
        DiffOp::Unchanged(n) => DiffOp::Unchanged(n),
        DiffOp::Inserted(n) => DiffOp::Removed(n),
        DiffOp::Removed(n) => DiffOp::Inserted(n),
    }
}
