//! # diffview
//!
//! A side-by-side terminal viewer for unified diffs.
//!
//! This crate reads the text produced by `git diff`, `diff -u` and similar
//! tools and renders it as two aligned, color-coded columns: the old file on
//! the left and the new file on the right. It does not compute diffs itself.
//!
//! ## Architecture
//!
//! The crate is organized into four modules:
//!
//! - `unified` - Classification of raw unified-diff lines
//! - `processor` - Builds the aligned left/right line sequences
//! - `highlight` - Word-level differences between paired changed lines
//! - `render` - Lays the sequences out as a two-column terminal table
//!
//! The `diffview` binary wires these to stdin and stdout.
//!
//! ## Usage
//!
//! ```no_run
//! use diffview::{RenderOptions, display, parse};
//!
//! let diff = "--- a/greeting\n+++ b/greeting\n@@ -1 +1 @@\n-hello\n+hello, world\n";
//! let (left, right) = parse(diff);
//! display(&mut std::io::stdout(), &left, &right, &RenderOptions::default())?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::Read;

mod error;
pub mod highlight;
pub mod processor;
pub mod render;
pub mod unified;

pub use error::{Error, Result};
pub use processor::{DiffStats, LineKind, LineRecord, parse, summarize};
pub use render::{RenderOptions, display, format_line, render_rows, render_summary};

/// Reads the whole diff from `reader`.
///
/// Returns [`Error::EmptyInput`] when the input is empty or whitespace-only.
/// Input that is not valid UTF-8 is reported as an I/O error.
pub fn read_diff<R: Read>(mut reader: R) -> Result<String> {
    let mut diff = String::new();
    reader.read_to_string(&mut diff)?;

    if diff.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(diff)
}
