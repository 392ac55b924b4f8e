// src/renderer.rs

use crate::model::ChangeRecord;
use chrono::{TimeZone, Utc};
use similar::TextDiff;

/// Renders a found change as a commit header followed by a unified diff of
/// the two sides of the tracked range.
pub fn render_change(record: &ChangeRecord, file: &str, context: usize) -> String {
    let commit = &record.commit;
    let date = Utc
        .timestamp_opt(commit.timestamp, 0)
        .single()
        .map(|date| date.to_rfc2822())
        .unwrap_or_default();

    let summary = match commit.summary.as_str() {
        "" => String::new(),
        summary => format!("summary: {summary}\n"),
    };
    let mut out = format!(
        "commit: {}\nauthor: {}\nauthor email: {}\ndate: {date}\n{summary}before: lines {}\nafter: lines {}\n\n",
        commit.hash, commit.author_name, commit.author_email, record.before_range, record.after_range,
    );

    let diff = TextDiff::from_lines(&record.before, &record.after);
    let unified = diff
        .unified_diff()
        .context_radius(context)
        .missing_newline_hint(false)
        .header(
            &format!("a/{file}:{}", record.before_range),
            &format!("b/{file}:{}", record.after_range),
        )
        .to_string();
    out.push_str(&unified);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommitRef, LineRange};
    use pretty_assertions::assert_eq;

    fn record() -> ChangeRecord {
        ChangeRecord {
            commit: CommitRef {
                hash: "0123456789abcdef".to_string(),
                author_name: "Ada Lovelace".to_string(),
                author_email: "ada@example.com".to_string(),
                timestamp: 0,
                summary: "Tune the engine".to_string(),
            },
            before: "a\nb\nc\n".to_string(),
            after: "a\nB\nc\n".to_string(),
            before_range: LineRange { start: 4, end: 6 },
            after_range: LineRange { start: 4, end: 6 },
        }
    }

    #[test]
    fn renders_header_and_diff() {
        let rendered = render_change(&record(), "src/engine.rs", 3);
        let expected = "\
commit: 0123456789abcdef
author: Ada Lovelace
author email: ada@example.com
date: Thu, 1 Jan 1970 00:00:00 +0000
summary: Tune the engine
before: lines 4-6
after: lines 4-6

--- a/src/engine.rs:4-6
+++ b/src/engine.rs:4-6
@@ -1,3 +1,3 @@
 a
-b
+B
 c
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn creation_renders_only_additions() {
        let mut record = record();
        record.before = String::new();
        record.commit.summary = String::new();

        let rendered = render_change(&record, "src/engine.rs", 0);

        assert!(!rendered.contains("summary:"));
        assert!(rendered.contains("+a\n+B\n+c\n"));
        let removed = rendered
            .lines()
            .filter(|line| line.starts_with('-') && !line.starts_with("---"))
            .count();
        assert_eq!(removed, 0);
    }
}
