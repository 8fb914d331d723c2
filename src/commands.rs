//! Command implementations for zfspace CLI

use crate::analysis::analyze;
use crate::cli::{Commands, OutputFormat};
use crate::config::{terminal_columns, ZfsConfig};
use crate::error::{Result, ZfspaceError};
use crate::oracle::{SnapshotSource, SpaceOracle};
use crate::output::{header_line, DiagramPrinter, JsonFormatter, PrettyPrinter};
use crate::size::SizeFormat;
use std::io::Write;

/// Options of the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub format: SizeFormat,
    pub width: usize,
    pub sequential: bool,
    pub strict: bool,
    pub json: bool,
    pub shorten: bool,
    pub progress: bool,
}

/// Execute a command, writing its output to `out`
pub fn execute_command<B, W>(command: Commands, bridge: &B, config: &ZfsConfig, out: &mut W) -> Result<()>
where
    B: SnapshotSource + SpaceOracle,
    W: Write,
{
    match command {
        Commands::Analyze {
            dataset,
            format,
            width,
            sequential,
            strict,
            json,
            no_shorten,
            no_progress,
        } => {
            let options = AnalyzeOptions {
                format: SizeFormat::parse(&format)?,
                width: terminal_columns(width),
                sequential,
                strict,
                json,
                shorten: !no_shorten,
                progress: !json && !no_progress,
            };
            analyze_command(bridge, config, &dataset, &options, out)
        }
        Commands::List { format } => list_command(bridge, &format, out),
    }
}

/// Analyze the snapshots of a dataset and draw or dump the result
pub fn analyze_command<B, W>(bridge: &B, config: &ZfsConfig, dataset: &str, options: &AnalyzeOptions, out: &mut W) -> Result<()>
where
    B: SnapshotSource + SpaceOracle,
    W: Write,
{
    let mode = config.query_mode(options.sequential);
    let analysis = analyze(bridge, dataset, mode, options.progress)?;
    analysis.check_consistency(options.strict)?;

    if options.json {
        writeln!(out, "{}", JsonFormatter::format(&analysis)?)?;
        return Ok(());
    }

    // Lay out everything before printing so a failure leaves no partial diagram
    let mut lines = vec![header_line(
        dataset,
        analysis.snapshots.len(),
        analysis.raw.total(),
        options.format,
    )?];

    if !analysis.snapshots.is_empty() {
        let printer = DiagramPrinter::new(options.width, options.format);
        lines.extend(printer.render(&analysis.exclusive, &analysis.names(options.shorten))?);
    }

    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// List datasets known to ZFS
fn list_command<B, W>(bridge: &B, format: &str, out: &mut W) -> Result<()>
where
    B: SnapshotSource,
    W: Write,
{
    let output_format = OutputFormat::parse(format).map_err(ZfspaceError::invalid_input)?;
    let datasets = bridge.datasets()?;

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_dataset_list(out, &datasets)?,
        OutputFormat::Json => writeln!(out, "{}", JsonFormatter::format(&datasets)?)?,
    }

    Ok(())
}
