//! Classification of raw unified-diff lines.
//!
//! Unified diff is the plain-text format produced by `git diff`, `diff -u` and
//! friends. Every line is identified by its leading characters:
//!
//! ```text
//! diff --git a/src/lib.rs b/src/lib.rs    <- metadata
//! index 3b18e51..a9c2f04 100644           <- metadata
//! --- a/src/lib.rs                        <- old file header
//! +++ b/src/lib.rs                        <- new file header
//! @@ -1,3 +1,3 @@                         <- hunk header
//!  fn main() {                            <- context
//! -    println!("old");                   <- removed
//! +    println!("new");                   <- added
//!  }                                      <- context
//! \ No newline at end of file             <- marker
//! ```
//!
//! This module turns each line into a [`DiffLine`] so that
//! [`crate::processor`] can build the aligned side-by-side rows without
//! looking at raw prefixes itself.

/// A single classified line of unified-diff input.
///
/// Content-bearing variants borrow the text after the one-character prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// `--- a/path` or `+++ b/path`.
    FileHeader,

    /// `diff ...` or `index ...`.
    Metadata,

    /// `@@ -a,b +c,d @@`. Declared ranges are not used for numbering.
    HunkHeader,

    /// A line present only in the old file.
    Removed(&'a str),

    /// A line present only in the new file.
    Added(&'a str),

    /// A line present in both files.
    Context(&'a str),

    /// `\ No newline at end of file`.
    NoNewline,

    /// A completely empty input line.
    Blank,

    /// Anything else. Dropped by the processor.
    Unrecognized,
}

/// Classifies one line of unified-diff input (without its line terminator).
///
/// Header prefixes are checked before the single-character `-`/`+` prefixes,
/// so `---x` is always a file header and never a removed line.
#[must_use]
pub fn classify(line: &str) -> DiffLine<'_> {
    if line.starts_with("---") || line.starts_with("+++") {
        return DiffLine::FileHeader;
    }
    if line.starts_with("diff ") || line.starts_with("index ") {
        return DiffLine::Metadata;
    }
    if line.starts_with("@@") {
        return DiffLine::HunkHeader;
    }

    if let Some(rest) = line.strip_prefix('-') {
        DiffLine::Removed(rest)
    } else if let Some(rest) = line.strip_prefix('+') {
        DiffLine::Added(rest)
    } else if let Some(rest) = line.strip_prefix(' ') {
        DiffLine::Context(rest)
    } else if line.is_empty() {
        DiffLine::Blank
    } else if line.starts_with('\\') {
        DiffLine::NoNewline
    } else {
        DiffLine::Unrecognized
    }
}
