//! Terminal rendering of aligned side-by-side sequences.
//!
//! Rows are laid out as a borderless two-column grid with a single space
//! between the columns. Each real line is prefixed with its line number in a
//! fixed five-column field and colored by kind:
//!
//! - additions: green
//! - removals: red
//! - context: dimmed
//! - fillers: blank, unstyled
//!
//! Columns size themselves to their widest cell. When the two do not fit the
//! terminal width, each column is capped at half the width (a narrow column
//! gives its slack to the other). Overlong cells wrap onto continuation lines
//! that leave the number field blank, so no content is ever dropped.
//!
//! With color enabled, the words that differ between a paired removal and
//! addition are emphasized with a background color (see [`crate::highlight`]).

use crate::highlight::{Highlights, changed_words, pair_changes};
use crate::processor::{DiffStats, LineKind, LineRecord};
use owo_colors::OwoColorize;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::io::{self, Write};
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width used when the terminal size cannot be detected (e.g. output is piped).
const DEFAULT_WIDTH: u16 = 80;

/// Shown in place of the content of an empty line.
const EMPTY_CONTENT: &str = "∅";

/// Spaces between the left and right column.
const COLUMN_GAP: usize = 1;

/// Options for rendering the side-by-side table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Terminal width in columns.
    pub width: u16,

    /// Whether to emit ANSI styling.
    pub color: bool,

    /// Tab stops are expanded to multiples of this many columns.
    pub tab_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let width = terminal_size().map_or(DEFAULT_WIDTH, |(Width(w), _)| w);
        Self {
            width,
            color: true,
            tab_width: 8,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// A formatted, unstyled cell and what decides its style.
struct Cell {
    text: String,

    /// Display width of the line number field, or 0 for blank cells.
    gutter: usize,

    kind: LineKind,

    /// Byte ranges of `text` drawn with emphasis.
    emphasis: Highlights,
}

impl Cell {
    fn new(record: Option<&LineRecord>, tab_width: usize) -> Self {
        let record = record.filter(|r| !r.is_empty());
        Self {
            text: format_line(record, tab_width),
            gutter: record.map_or(0, |r| number_field(r.line_number).len()),
            kind: record.map_or(LineKind::Empty, |r| r.kind),
            emphasis: Highlights::new(),
        }
    }

    /// Emphasizes `regions` of the content, given as byte ranges into the
    /// tab-expanded content.
    fn emphasize(&mut self, regions: &[(usize, usize)]) {
        self.emphasis = regions
            .iter()
            .map(|&(start, end)| (start + self.gutter, end + self.gutter))
            .collect();
    }
}

fn number_field(line_number: u32) -> String {
    format!("{line_number:5} ")
}

/// Formats one side of a row, without styling.
///
/// Fillers and missing rows are blank. Real lines get a right-aligned line
/// number field followed by the content, or `∅` when the content is empty.
#[must_use]
pub fn format_line(record: Option<&LineRecord>, tab_width: usize) -> String {
    let Some(record) = record.filter(|r| !r.is_empty()) else {
        return String::new();
    };

    let content = if record.content.is_empty() {
        Cow::Borrowed(EMPTY_CONTENT)
    } else {
        expand_tabs(&record.content, tab_width)
    };
    number_field(record.line_number) + &content
}

/// Replaces tabs with spaces up to the next tab stop.
fn expand_tabs(content: &str, tab_width: usize) -> Cow<'_, str> {
    if !content.contains('\t') {
        return Cow::Borrowed(content);
    }

    let tab_width = tab_width.max(1);
    let mut expanded = String::with_capacity(content.len() + tab_width);
    let mut column = 0;

    for c in content.chars() {
        if c == '\t' {
            let fill = tab_width - column % tab_width;
            expanded.extend(std::iter::repeat_n(' ', fill));
            column += fill;
        } else {
            expanded.push(c);
            column += c.width().unwrap_or(0);
        }
    }

    Cow::Owned(expanded)
}

/// Splits a cell into visual lines at most `width` display columns wide.
///
/// Returns the indent of continuation lines and the byte range of each line.
/// Continuation lines are indented past the number field when the column is
/// wider than it. Breaks prefer the last whitespace on the line; a word that
/// does not fit on its own is split between characters. Every line holds at
/// least one character, and an empty cell yields one empty line.
fn wrap(text: &str, gutter: usize, width: usize) -> (usize, SmallVec<[(usize, usize); 2]>) {
    let width = width.max(1);
    let indent = if width > gutter { gutter } else { 0 };
    let continuation = width - indent;

    let mut lines = SmallVec::new();
    let mut start = 0;
    let mut used = 0;
    let mut budget = width;
    let mut last_break: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > budget && i > start {
            // Never break inside the number field of the first line.
            let min_break = if lines.is_empty() { gutter } else { start };
            let end = last_break
                .filter(|&b| b > min_break && text[b..i].width() + w <= continuation)
                .unwrap_or(i);

            lines.push((start, end));
            start = end;
            used = text[start..i].width();
            budget = continuation;
            last_break = None;
        }

        used += w;
        if c.is_whitespace() {
            last_break = Some(i + c.len_utf8());
        }
    }

    if start < text.len() || lines.is_empty() {
        lines.push((start, text.len()));
    }

    (indent, lines)
}

/// Picks the `(left, right)` column widths for the given natural widths.
///
/// Overflowing columns never shrink below one column.
fn column_widths(natural_left: usize, natural_right: usize, width: u16) -> (usize, usize) {
    let total = usize::from(width);
    if natural_left + COLUMN_GAP + natural_right <= total {
        return (natural_left, natural_right);
    }

    let available = total.saturating_sub(COLUMN_GAP);
    let left_share = available / 2;
    let right_share = available - left_share;

    let (left, right) = if natural_left <= left_share {
        (natural_left, available - natural_left)
    } else if natural_right <= right_share {
        (available - natural_right, natural_right)
    } else {
        (left_share, right_share)
    };
    (left.max(1), right.max(1))
}

fn paint(text: &str, kind: LineKind, emphasized: bool) -> String {
    match (kind, emphasized) {
        (LineKind::Add, false) => text.green().to_string(),
        (LineKind::Add, true) => text.black().on_green().to_string(),
        (LineKind::Remove, false) => text.red().to_string(),
        (LineKind::Remove, true) => text.black().on_red().to_string(),
        (LineKind::Context, _) => text.dimmed().to_string(),
        (LineKind::Empty, _) => text.to_string(),
    }
}

/// Styles the `start..end` slice of a cell, switching to the emphasized style
/// inside the cell's emphasis regions.
fn paint_span(cell: &Cell, (start, end): (usize, usize), color: bool) -> String {
    let text = &cell.text;
    if !color {
        return text[start..end].to_string();
    }

    let mut painted = String::new();
    let mut pos = start;

    for &(em_start, em_end) in &cell.emphasis {
        let (em_start, em_end) = (em_start.max(pos), em_end.min(end));
        if em_start >= em_end {
            continue;
        }
        if pos < em_start {
            painted.push_str(&paint(&text[pos..em_start], cell.kind, false));
        }
        painted.push_str(&paint(&text[em_start..em_end], cell.kind, true));
        pos = em_end;
    }
    if pos < end {
        painted.push_str(&paint(&text[pos..end], cell.kind, false));
    }

    painted
}

fn build_cells(
    left: &[LineRecord],
    right: &[LineRecord],
    options: &RenderOptions,
) -> Vec<(Cell, Cell)> {
    let num_rows = left.len().max(right.len());

    let mut cells: Vec<(Cell, Cell)> = (0..num_rows)
        .map(|i| {
            (
                Cell::new(left.get(i), options.tab_width),
                Cell::new(right.get(i), options.tab_width),
            )
        })
        .collect();

    if options.color {
        for (removed, added) in pair_changes(left, right) {
            let old = expand_tabs(&left[removed].content, options.tab_width);
            let new = expand_tabs(&right[added].content, options.tab_width);
            if let Some((old_regions, new_regions)) = changed_words(&old, &new) {
                cells[removed].0.emphasize(&old_regions);
                cells[added].1.emphasize(&new_regions);
            }
        }
    }

    cells
}

/// Renders the table as one string per visual line.
///
/// Both sequences are expected to have the same length; a missing row on
/// either side is rendered as a filler. A row whose cells wrap takes as many
/// lines as its taller side.
#[must_use]
pub fn render_rows(
    left: &[LineRecord],
    right: &[LineRecord],
    options: &RenderOptions,
) -> Vec<String> {
    let cells = build_cells(left, right, options);

    let natural_left = cells.iter().map(|(l, _)| l.text.width()).max().unwrap_or(0);
    let natural_right = cells.iter().map(|(_, r)| r.text.width()).max().unwrap_or(0);
    let (left_width, right_width) = column_widths(natural_left, natural_right, options.width);

    let mut rows = Vec::with_capacity(cells.len());

    for (l, r) in &cells {
        let (left_indent, left_lines) = wrap(&l.text, l.gutter, left_width);
        let (right_indent, right_lines) = wrap(&r.text, r.gutter, right_width);

        for k in 0..left_lines.len().max(right_lines.len()) {
            let mut row = String::new();
            let mut used = 0;

            if let Some(&span) = left_lines.get(k) {
                let indent = if k > 0 { left_indent } else { 0 };
                row.extend(std::iter::repeat_n(' ', indent));
                row.push_str(&paint_span(l, span, options.color));
                used = indent + l.text[span.0..span.1].width();
            }

            // A blank right cell gets no padding or separator.
            if let Some(&span) = right_lines.get(k).filter(|&&(s, e)| s < e) {
                let indent = if k > 0 { right_indent } else { 0 };
                let padding = left_width.saturating_sub(used) + COLUMN_GAP + indent;
                row.extend(std::iter::repeat_n(' ', padding));
                row.push_str(&paint_span(r, span, options.color));
            }

            rows.push(row);
        }
    }

    rows
}

/// Formats the `+additions -deletions` summary line.
#[must_use]
pub fn render_summary(stats: &DiffStats, color: bool) -> String {
    let additions = format!("+{}", stats.additions);
    let deletions = format!("-{}", stats.deletions);
    if color {
        format!("{} {}", additions.green(), deletions.red())
    } else {
        format!("{additions} {deletions}")
    }
}

/// Writes the side-by-side table to `out`, one line per visual row.
pub fn display<W: Write>(
    out: &mut W,
    left: &[LineRecord],
    right: &[LineRecord],
    options: &RenderOptions,
) -> io::Result<()> {
    for row in render_rows(left, right, options) {
        writeln!(out, "{row}")?;
    }
    out.flush()
}
