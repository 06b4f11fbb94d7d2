//! Word-level change highlighting between paired removed and added lines.
//!
//! A removed line and an added line are paired when they sit at the same
//! offset within adjacent runs: a run of removals immediately followed by a
//! run of additions. For each pair the lines are split into whitespace
//! separated words and compared position by position. Words that differ are
//! emphasized on their own side.
//!
//! Nothing is emphasized when no word differs or when every word differs;
//! in both cases the line-level color already says everything.

use crate::processor::{LineKind, LineRecord};
use smallvec::SmallVec;

/// Most paired lines have 0-2 changed regions; inline storage avoids heap allocation.
pub type Highlights = SmallVec<[(usize, usize); 2]>;

/// Byte ranges of the whitespace separated words in `line`.
fn words(line: &str) -> SmallVec<[(usize, usize); 8]> {
    let mut words = SmallVec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, line.len()));
    }

    words
}

/// Finds the changed words between an old and a new line.
///
/// Returns `(old_regions, new_regions)` as byte ranges into each line, or
/// `None` when there is nothing useful to emphasize.
#[must_use]
pub fn changed_words(old: &str, new: &str) -> Option<(Highlights, Highlights)> {
    let old_words = words(old);
    let new_words = words(new);
    let max_len = old_words.len().max(new_words.len());

    let changed: SmallVec<[usize; 8]> = (0..max_len)
        .filter(|&i| {
            let old_word = old_words.get(i).map(|&(s, e)| &old[s..e]);
            let new_word = new_words.get(i).map(|&(s, e)| &new[s..e]);
            old_word != new_word
        })
        .collect();

    if changed.is_empty() || changed.len() == max_len {
        return None;
    }

    let regions = |line: &str, line_words: &[(usize, usize)]| {
        let picked: SmallVec<[(usize, usize); 4]> = changed
            .iter()
            .filter_map(|&i| line_words.get(i).copied())
            .collect();
        merge_regions(&picked, line.as_bytes())
    };

    Some((
        regions(old, old_words.as_slice()),
        regions(new, new_words.as_slice()),
    ))
}

/// Merges sorted regions, bridging gaps that contain only whitespace.
fn merge_regions(regions: &[(usize, usize)], bytes: &[u8]) -> Highlights {
    let mut merged = Highlights::with_capacity(regions.len());

    for &(start, end) in regions {
        if let Some((_, last_end)) = merged.last_mut() {
            if *last_end >= start || is_whitespace_only(bytes, *last_end, start) {
                *last_end = (*last_end).max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

#[inline]
fn is_whitespace_only(bytes: &[u8], start: usize, end: usize) -> bool {
    bytes
        .get(start..end)
        .is_some_and(|slice| slice.iter().all(u8::is_ascii_whitespace))
}

/// Pairs removed rows with added rows for word-level comparison.
///
/// Returns `(removed_row, added_row)` index pairs. Within a run of removals
/// followed directly by a run of additions, the k-th removal is paired with the
/// k-th addition; surplus lines on either side stay unpaired.
#[must_use]
pub fn pair_changes(left: &[LineRecord], right: &[LineRecord]) -> Vec<(usize, usize)> {
    let is_kind = |side: &[LineRecord], row: usize, kind: LineKind| {
        side.get(row).is_some_and(|r| r.kind == kind)
    };

    let num_rows = left.len().min(right.len());
    let mut pairs = Vec::new();
    let mut row = 0;

    while row < num_rows {
        let removed_start = row;
        while row < num_rows && is_kind(left, row, LineKind::Remove) {
            row += 1;
        }
        let added_start = row;
        while row < num_rows && is_kind(right, row, LineKind::Add) {
            row += 1;
        }

        let removed = added_start - removed_start;
        let added = row - added_start;
        pairs.extend((0..removed.min(added)).map(|k| (removed_start + k, added_start + k)));

        if row == removed_start {
            row += 1;
        }
    }

    pairs
}
