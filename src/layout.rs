//! Proportional row layout for the terminal diagram
//!
//! A row of `k` labels is drawn as `|label|label|...|`. The label areas share
//! whatever width is left after the `k + 1` divider glyphs and the row's side
//! padding. Their boundaries come from a running total of the ideal
//! fractional width, so rounding never accumulates across the row.

use crate::error::{Result, ZfspaceError};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Divider glyph between slices
pub const DIVIDER: char = '|';

/// Columns `[start, end)` of one slice.
///
/// The last column of a slice is its trailing divider; the label area is
/// `[start, end - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub start: usize,
    pub end: usize,
}

impl Slice {
    /// Columns available to the label
    pub fn label_width(&self) -> usize {
        self.end - self.start - 1
    }
}

/// Split `width` columns into `slices` equal slices with `padding` blank
/// columns on either side.
///
/// The leading divider sits at column `padding`; the slices tile
/// `[padding + 1, width - padding)` without gaps.
pub fn split_line(slices: usize, width: usize, padding: usize) -> Result<Vec<Slice>> {
    if slices == 0 {
        return Err(ZfspaceError::invalid_input("Cannot lay out a row without slices"));
    }

    let reserved = slices + 1 + 2 * padding;
    let avail = width.checked_sub(reserved).ok_or(ZfspaceError::LayoutTooNarrow {
        width,
        slices,
        padding,
    })?;

    let origin = padding + 1;
    let mut result = Vec::with_capacity(slices);
    let mut start = origin;

    for i in 0..slices {
        // floor((i + 1) * avail / slices), exact in integers
        let filled = (i + 1) * avail / slices;
        let end = origin + filled + i + 1;
        result.push(Slice { start, end });
        start = end;
    }

    Ok(result)
}

/// Side padding for the row of ranges covering `span + 1` of `snapshots`.
///
/// Larger combinations draw narrower, centered beneath the full-width rows.
pub fn row_padding(span: usize, snapshots: usize, width: usize) -> usize {
    if snapshots == 0 {
        return 0;
    }
    span * width / snapshots / 2
}

/// One label placed in its slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutCell {
    pub label: String,
    pub slice: Slice,
}

/// A laid out row, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    pub padding: usize,
    pub cells: Vec<LayoutCell>,
}

impl LayoutRow {
    pub fn new<S: AsRef<str>>(labels: &[S], width: usize, padding: usize) -> Result<Self> {
        let slices = split_line(labels.len(), width, padding)?;
        let cells = labels
            .iter()
            .zip(slices)
            .map(|(label, slice)| LayoutCell {
                label: label.as_ref().to_string(),
                slice,
            })
            .collect();

        Ok(Self { padding, cells })
    }

    /// Draw the row. Trailing padding is not emitted.
    pub fn render(&self) -> String {
        let mut line = " ".repeat(self.padding);
        line.push(DIVIDER);
        for cell in &self.cells {
            line.push_str(&center(&cell.label, cell.slice.label_width()));
            line.push(DIVIDER);
        }
        line
    }
}

/// Terminal columns taken by `label`
pub fn display_width(label: &str) -> usize {
    UnicodeWidthStr::width(label)
}

/// Center `label` in exactly `width` display columns, truncating if needed.
///
/// An odd leftover column goes to the right. Only snapshot names rely on
/// the truncation; sizes are fitted before they get here.
pub fn center(label: &str, width: usize) -> String {
    let label = truncate(label, width);
    let used = display_width(&label);
    let left = (width - used) / 2;
    let right = width - used - left;

    format!("{}{}{}", " ".repeat(left), label, " ".repeat(right))
}

fn truncate(label: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in label.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
