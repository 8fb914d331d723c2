//! Output formatting utilities

use crate::error::{Result, ZfspaceError};
use crate::layout::{display_width, row_padding, split_line, LayoutCell, LayoutRow};
use crate::matrix::ExclusiveMatrix;
use crate::size::{size2human, SizeFormat};
use std::io::Write;

/// Draws the exclusive space matrix as a centered pyramid of rows
#[derive(Debug, Clone)]
pub struct DiagramPrinter {
    width: usize,
    format: SizeFormat,
}

impl DiagramPrinter {
    pub fn new(width: usize, format: SizeFormat) -> Self {
        Self { width, format }
    }

    /// Diagram lines: the full-range bar first, single snapshots last but
    /// one, then the snapshot names.
    ///
    /// Negative cells are drawn as zero. Sizes are never truncated: a size
    /// too wide for its slice is drawn in the short format, and one that
    /// fits in neither format fails the whole diagram.
    pub fn render(&self, matrix: &ExclusiveMatrix, names: &[String]) -> Result<Vec<String>> {
        let n = names.len();
        if matrix.len() != n {
            return Err(ZfspaceError::invalid_input(format!(
                "{} snapshot names given for a matrix of {} snapshots",
                n,
                matrix.len()
            )));
        }

        let mut lines = Vec::with_capacity(n + 1);
        if n == 0 {
            return Ok(lines);
        }

        for span in (0..n).rev() {
            let padding = row_padding(span, n, self.width);
            let slices = split_line(n - span, self.width, padding)?;
            let cells = matrix
                .row(span)
                .iter()
                .zip(slices)
                .map(|(&bytes, slice)| -> Result<LayoutCell> {
                    let label = fit_size(bytes.max(0), self.format, slice.label_width())?.ok_or(
                        ZfspaceError::LayoutTooNarrow {
                            width: self.width,
                            slices: n - span,
                            padding,
                        },
                    )?;
                    Ok(LayoutCell { label, slice })
                })
                .collect::<Result<Vec<_>>>()?;
            lines.push(LayoutRow { padding, cells }.render());
        }

        lines.push(LayoutRow::new(names, self.width, 0)?.render());
        Ok(lines)
    }
}

/// Format `bytes` to fit `width` columns, trying `format` first and then
/// the short format.
fn fit_size(bytes: i128, format: SizeFormat, width: usize) -> Result<Option<String>> {
    let label = size2human(bytes, format)?;
    if display_width(&label) <= width {
        return Ok(Some(label));
    }
    if format == SizeFormat::Short {
        return Ok(None);
    }

    let short = size2human(bytes, SizeFormat::Short)?;
    Ok((display_width(&short) <= width).then_some(short))
}

/// Summary line printed above the diagram
pub fn header_line(dataset: &str, snapshots: usize, total: u64, format: SizeFormat) -> Result<String> {
    if snapshots == 0 {
        return Ok(format!("Analyzing {} ZFS dataset: no snapshots.", dataset));
    }

    let plural = if snapshots == 1 { "" } else { "s" };
    let removing = if snapshots == 1 { "it" } else { "all of them" };
    Ok(format!(
        "Analyzing {} ZFS dataset: {} snapshot{}, {} reclaimable by removing {}.",
        dataset,
        snapshots,
        plural,
        size2human(total as i128, format)?,
        removing
    ))
}

/// Pretty printer for zfspace output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print dataset list
    pub fn print_dataset_list<W: Write>(out: &mut W, datasets: &[String]) -> Result<()> {
        if datasets.is_empty() {
            writeln!(out, "No datasets found.")?;
            return Ok(());
        }

        writeln!(out, "ZFS datasets:")?;
        for (i, dataset) in datasets.iter().enumerate() {
            let prefix = if i == datasets.len() - 1 { "└─" } else { "├─" };
            writeln!(out, "{} {}", prefix, dataset)?;
        }
        Ok(())
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}
