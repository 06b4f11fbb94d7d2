//! Processing unified-diff text into aligned side-by-side sequences.
//!
//! This module turns classified diff lines (see [`crate::unified`]) into two
//! parallel sequences of [`LineRecord`]s, one per side, suitable for rendering
//! in two columns. Row `i` of the left sequence always lines up with row `i` of
//! the right sequence.
//!
//! ## Alignment
//!
//! Every content line produces exactly one row:
//!
//! - Removed lines go on the left, with a filler (`Empty`) record on the right
//! - Added lines go on the right, with a filler record on the left
//! - Context lines go on both sides with the same content
//!
//! Headers, markers and unrecognized lines produce no row at all, so the two
//! sequences always have the same length.
//!
//! ## Line Numbers
//!
//! Each side keeps its own 1-based counter that starts at 1 and only ever
//! increments. Hunk header offsets are not applied, so numbers reflect position
//! within the supplied diff rather than within the original files.
//!
//! The public types derive `Serialize` for library callers; the binary itself
//! never emits them as data.

use crate::unified::{self, DiffLine};
use serde::Serialize;

/// What a [`LineRecord`] represents on its side of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Add,
    Remove,
    Context,
    /// Placeholder keeping the two sides aligned.
    Empty,
}

/// One side (left or right) of a row in the side-by-side view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    /// The text of the line without its diff prefix or line terminator.
    ///
    /// Empty string for filler records.
    pub content: String,

    pub kind: LineKind,

    /// 1-based position on this side, or 0 for filler records.
    pub line_number: u32,
}

impl LineRecord {
    #[inline]
    fn new(content: impl Into<String>, kind: LineKind, line_number: u32) -> Self {
        Self {
            content: content.into(),
            kind,
            line_number,
        }
    }

    /// Creates a filler (placeholder) record.
    ///
    /// Fillers have no content and no line number. They sit opposite an added
    /// or removed line so both sides keep the same number of rows.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new(), LineKind::Empty, 0)
    }

    #[inline]
    #[must_use]
    pub fn removed(content: impl Into<String>, line_number: u32) -> Self {
        Self::new(content, LineKind::Remove, line_number)
    }

    #[inline]
    #[must_use]
    pub fn added(content: impl Into<String>, line_number: u32) -> Self {
        Self::new(content, LineKind::Add, line_number)
    }

    #[inline]
    #[must_use]
    pub fn context(content: impl Into<String>, line_number: u32) -> Self {
        Self::new(content, LineKind::Context, line_number)
    }

    /// Whether this is a filler record.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind == LineKind::Empty
    }
}

/// Parses unified-diff text into aligned `(left, right)` sequences.
///
/// The whole input is treated as one flat stream of hunks; file boundaries are
/// not tracked. Lines that are not removals, additions or context are skipped,
/// so this never fails.
#[must_use]
pub fn parse(diff_text: &str) -> (Vec<LineRecord>, Vec<LineRecord>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut left_num: u32 = 1;
    let mut right_num: u32 = 1;

    for (idx, line) in diff_text.lines().enumerate() {
        match unified::classify(line) {
            DiffLine::Removed(content) => {
                left.push(LineRecord::removed(content, left_num));
                right.push(LineRecord::empty());
                left_num += 1;
            }
            DiffLine::Added(content) => {
                left.push(LineRecord::empty());
                right.push(LineRecord::added(content, right_num));
                right_num += 1;
            }
            DiffLine::Context(content) => {
                left.push(LineRecord::context(content, left_num));
                right.push(LineRecord::context(content, right_num));
                left_num += 1;
                right_num += 1;
            }
            DiffLine::Unrecognized => {
                log::trace!("skipping unrecognized diff line {}: {line:?}", idx + 1);
            }
            DiffLine::FileHeader
            | DiffLine::Metadata
            | DiffLine::HunkHeader
            | DiffLine::NoNewline
            | DiffLine::Blank => {}
        }
    }

    debug_assert_eq!(left.len(), right.len());
    log::debug!("parsed {} side-by-side rows", left.len());

    (left, right)
}

/// Added and removed line counts for a parsed diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    /// Count of added lines (right side).
    pub additions: u32,

    /// Count of removed lines (left side).
    pub deletions: u32,
}

/// Counts the additions and removals in a pair of sequences produced by
/// [`parse`].
#[must_use]
pub fn summarize(left: &[LineRecord], right: &[LineRecord]) -> DiffStats {
    let count = |side: &[LineRecord], kind: LineKind| {
        side.iter().filter(|r| r.kind == kind).count() as u32
    };

    DiffStats {
        additions: count(right, LineKind::Add),
        deletions: count(left, LineKind::Remove),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A realistic single-file git diff with two hunks.
    const GIT_DIFF: &str = "\
diff --git a/src/main.rs b/src/main.rs
index 3b18e51..a9c2f04 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,4 +1,4 @@
 fn main() {
-    println!(\"hello\");
+    println!(\"hello, world\");
 }
\x20
@@ -20,3 +20,4 @@ fn helper() {
 fn helper() {
+    todo();
 }
\\ No newline at end of file
";

    fn kinds(records: &[LineRecord]) -> Vec<LineKind> {
        records.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn removal_then_addition() {
        let (left, right) = parse("-old line\n+new line\n");

        assert_eq!(left, vec![LineRecord::removed("old line", 1), LineRecord::empty()]);
        assert_eq!(right, vec![LineRecord::empty(), LineRecord::added("new line", 1)]);
    }

    #[test]
    fn single_context_line() {
        let (left, right) = parse(" same\n");

        assert_eq!(left, vec![LineRecord::context("same", 1)]);
        assert_eq!(right, vec![LineRecord::context("same", 1)]);
    }

    #[test]
    fn empty_input() {
        let (left, right) = parse("");
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn headers_only() {
        let (left, right) = parse("--- a/file\n+++ b/file\n@@ -1,1 +1,1 @@\n");
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn metadata_and_markers_produce_no_rows() {
        let input = "diff --git a/x b/x\nindex 000..111\n\n\\ No newline at end of file\nrandom noise\n";
        let (left, right) = parse(input);
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn git_diff_rows() {
        let (left, right) = parse(GIT_DIFF);

        assert_eq!(left.len(), 8);
        assert_eq!(right.len(), 8);
        assert_eq!(
            kinds(&left),
            vec![
                LineKind::Context,
                LineKind::Remove,
                LineKind::Empty,
                LineKind::Context,
                LineKind::Context,
                LineKind::Context,
                LineKind::Empty,
                LineKind::Context,
            ]
        );
        assert_eq!(
            kinds(&right),
            vec![
                LineKind::Context,
                LineKind::Empty,
                LineKind::Add,
                LineKind::Context,
                LineKind::Context,
                LineKind::Context,
                LineKind::Add,
                LineKind::Context,
            ]
        );
        assert_eq!(left[1].content, "    println!(\"hello\");");
        assert_eq!(right[2].content, "    println!(\"hello, world\");");
        // The context line consisting of a single space has empty content.
        assert_eq!(left[4].content, "");
    }

    #[test]
    fn numbering_ignores_hunk_offsets() {
        let (left, right) = parse(GIT_DIFF);

        // Second hunk claims to start at line 20, but numbering is sequential.
        assert_eq!(left[5], LineRecord::context("fn helper() {", 5));
        assert_eq!(right[5], LineRecord::context("fn helper() {", 5));
        assert_eq!(right[6], LineRecord::added("    todo();", 6));
        assert_eq!(left[7].line_number, 6);
        assert_eq!(right[7].line_number, 7);
    }

    #[test]
    fn sides_always_equal_length() {
        let inputs = [
            "",
            "-a\n-b\n-c\n",
            "+a\n+b\n",
            " a\n-b\n+c\n+d\n e\n",
            "@@ -1 +1 @@\n-x\n\\ No newline at end of file\n+y\n",
            "garbage\n\n\n",
        ];
        for input in inputs {
            let (left, right) = parse(input);
            assert_eq!(left.len(), right.len(), "input: {input:?}");
        }
    }

    #[test]
    fn fillers_mirror_changes() {
        let (left, right) = parse(" a\n-b\n-c\n+d\n e\n+f\n");

        for (l, r) in left.iter().zip(&right) {
            match l.kind {
                LineKind::Remove => assert!(r.is_empty()),
                LineKind::Context => {
                    assert_eq!(r.kind, LineKind::Context);
                    assert_eq!(r.content, l.content);
                }
                LineKind::Empty => assert_eq!(r.kind, LineKind::Add),
                LineKind::Add => panic!("additions never appear on the left"),
            }
        }
    }

    #[test]
    fn context_offset_tracks_changes() {
        let (left, right) = parse(" a\n b\n+c\n d\n e\n-f\n-g\n h\n");

        let offsets: Vec<i64> = left
            .iter()
            .zip(&right)
            .filter(|(l, _)| l.kind == LineKind::Context)
            .map(|(l, r)| i64::from(r.line_number) - i64::from(l.line_number))
            .collect();

        assert_eq!(offsets, vec![0, 0, 1, 1, -1]);
    }

    #[test]
    fn numbers_strictly_increase_per_side() {
        let (left, right) = parse(GIT_DIFF);

        for side in [&left, &right] {
            let numbers: Vec<u32> = side
                .iter()
                .filter(|r| !r.is_empty())
                .map(|r| r.line_number)
                .collect();
            assert_eq!(numbers.first(), Some(&1));
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn fillers_have_no_number_or_content() {
        let (left, right) = parse("-a\n+b\n");
        assert_eq!(left[1].line_number, 0);
        assert_eq!(left[1].content, "");
        assert_eq!(right[0].line_number, 0);
        assert_eq!(right[0].content, "");
    }

    #[test]
    fn parse_is_pure() {
        assert_eq!(parse(GIT_DIFF), parse(GIT_DIFF));
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let (left, right) = parse("-old\r\n+new\r\n same\r\n");
        assert_eq!(left[0].content, "old");
        assert_eq!(right[1].content, "new");
        assert_eq!(right[2].content, "same");
    }

    #[test]
    fn missing_trailing_newline() {
        let (left, right) = parse(" last");
        assert_eq!(left, vec![LineRecord::context("last", 1)]);
        assert_eq!(right, vec![LineRecord::context("last", 1)]);
    }

    #[test]
    fn multiple_files_are_one_stream() {
        let input = "\
--- a/one
+++ b/one
@@ -1 +1 @@
-x
--- a/two
+++ b/two
@@ -1 +1 @@
-y
";
        let (left, _) = parse(input);
        assert_eq!(left[0], LineRecord::removed("x", 1));
        assert_eq!(left[1], LineRecord::removed("y", 2));
    }

    #[test]
    fn summarize_counts() {
        let (left, right) = parse(GIT_DIFF);
        let stats = summarize(&left, &right);

        assert_eq!(stats.additions, 2);
        assert_eq!(stats.deletions, 1);
    }

    #[test]
    fn summarize_empty() {
        let stats = summarize(&[], &[]);
        assert_eq!(stats, DiffStats::default());
    }

    #[test]
    fn summarize_ignores_fillers_and_context() {
        let (left, right) = parse(" a
+b
+c
 d
");
        let stats = summarize(&left, &right);
        assert_eq!(stats, DiffStats { additions: 2, deletions: 0 });
    }

    #[test]
    fn records_serialize_with_lowercase_kind() {
        let value = serde_json::to_value(LineRecord::removed("old", 3)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"content": "old", "kind": "remove", "line_number": 3})
        );

        let value = serde_json::to_value(LineRecord::empty()).unwrap();
        assert_eq!(value["kind"], "empty");
        assert_eq!(value["line_number"], 0);
    }

    #[test]
    fn stats_serialize() {
        let (left, right) = parse("-a\n+b\n");
        let value = serde_json::to_value(summarize(&left, &right)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"additions": 1, "deletions": 1})
        );
    }
}
