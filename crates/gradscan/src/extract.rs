use std::path::Path;

use gradscan_core::{recover, year::document_year, Recovered, ScanConfig};
use pdf_layout::LaidOutDocument;

use crate::layout::PdfPages;
use crate::output::{
    default_output_path, page_table, subtype_table, write_csv_file, JsonReport,
};
use crate::prelude::{eprintln, println, *};
use crate::App;

/// Base configuration from `--config`, then the individual flag overrides.
fn scan_config(app: &App) -> Result<ScanConfig> {
    let mut config = match &app.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if let Some(band_height) = app.band_height {
        config.band_height = band_height;
    }
    if let Some(max_bands) = app.max_bands {
        config.max_bands_per_page = max_bands;
    }

    config.validate()?;
    Ok(config)
}

fn summary_line(records: usize, source: &Path) -> String {
    format!("Extracted {} records from {}", records, source.display())
}

fn ledger_line(recovered: &Recovered, destination: &str) -> String {
    format!(
        "Ledger held {} key(s); final pass removed {} duplicate(s); wrote {}",
        recovered.ledger_size, recovered.finalized.removed, destination
    )
}

pub fn run(app: App) -> Result<()> {
    let path = app.path.clone().ok_or(Error::MissingPath)?;
    if !path.exists() {
        return Err(Error::PathNotFound(path).into());
    }

    let config = scan_config(&app)?;
    let year = document_year(&path, &config)?;

    let document = LaidOutDocument::open(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let recovered = recover(&PdfPages(document), config, &year)
        .with_context(|| format!("Nothing recovered from {}", path.display()))?;
    let rows = recovered.finalized.rows();

    if app.json {
        let report = JsonReport {
            source: path.display().to_string(),
            year: &year,
            records: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        // Stdout carries the JSON document only.
        eprintln!("{}", summary_line(rows.len(), &path));
        if app.verbose {
            eprintln!("{}", ledger_line(&recovered, "stdout"));
        }
        return Ok(());
    }

    let output = app
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&path));
    log::info!("writing {} row(s) to {}", rows.len(), output.display());
    write_csv_file(&output, &rows)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", summary_line(rows.len(), &path));
    subtype_table(&rows).printstd();

    if app.verbose {
        println!();
        page_table(&recovered.pages).printstd();
        println!("{}", ledger_line(&recovered, &output.display().to_string()));
    }

    Ok(())
}
