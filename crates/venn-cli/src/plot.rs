use std::error::Error;
use std::fs;
use std::path::Path;

use tracing::{info, warn};
use venn_core::errors::{ErrorInfo, VennError};
use venn_core::serde::to_json_bytes;
use venn_core::{count_regions, resolve_sets, summary_lines, RegionCountReport, Table};
use venn_render::{encode_figure, write_output, OutputFormat};

use crate::args::Cli;

const BANNER: &str = "VCF Venn Diagram Plotter";

/// Reads the table, counts regions, writes the figure and prints the summary.
///
/// The figure and the optional JSON report are encoded in memory first. If
/// the report cannot be written, the figure written just before it is
/// removed again, so a failing run leaves neither file behind.
pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let style = cli.style_config()?;
    let read_opts = cli.read_options()?;
    let format = OutputFormat::from_path(&cli.output)?;

    println!("{BANNER}");
    println!("{}", "=".repeat(50));
    println!("Reading input file: {}", cli.input.display());

    let table = Table::from_path(&cli.input, &read_opts)?;
    let sets = resolve_sets(&table, &cli.resolve_options())?;
    let names = sets.names();
    println!("Found {} callers: {}", names.len(), names.join(", "));

    let counts = count_regions(&sets)?;
    info!(
        total = counts.total(),
        empty_rows = counts.empty_rows(),
        "region counts ready"
    );

    println!("Creating {}-way Venn diagram...", counts.set_count());
    let figure = encode_figure(format, &counts, &style)?;
    let report = match &cli.json {
        Some(path) => Some((path, to_json_bytes(&RegionCountReport::from(&counts))?)),
        None => None,
    };

    write_output(&cli.output, &figure)?;
    info!(path = %cli.output.display(), ?format, "wrote figure");
    if let Some((path, bytes)) = &report {
        if let Err(err) = write_json(path, bytes) {
            if let Err(cleanup) = fs::remove_file(&cli.output) {
                warn!(path = %cli.output.display(), error = %cleanup, "could not remove figure");
            }
            return Err(err.into());
        }
    }
    println!("Venn diagram saved to: {}", cli.output.display());
    if let Some((path, _)) = &report {
        println!("Region counts saved to: {}", path.display());
    }

    println!();
    println!("Variant counts:");
    for line in summary_lines(&counts) {
        println!("  {line}");
    }
    println!();
    println!("Done!");
    Ok(())
}

fn write_json(path: &Path, bytes: &[u8]) -> Result<(), VennError> {
    let failed = |err: std::io::Error| {
        VennError::Serde(
            ErrorInfo::new("venn_cli.json_write", err.to_string())
                .with_context("path", path.display().to_string())
                .with_hint("point --json at a writable file path"),
        )
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(failed)?;
        }
    }
    fs::write(path, bytes).map_err(failed)
}
