use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use gradscan_core::{OutputRow, PageSummary, RecordSubtype, OUTPUT_COLUMNS};

use crate::prelude::*;

/// `report.pdf` -> `report.csv`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("csv")
}

/// Write `rows` as CSV with a header row, even when `rows` is empty.
pub fn write_csv<W: Write>(writer: W, rows: &[OutputRow]) -> Result<(), Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;

    Ok(())
}

pub fn write_csv_file(path: &Path, rows: &[OutputRow]) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), rows)
}

#[derive(Debug, serde::Serialize)]
pub struct JsonReport<'a> {
    pub source: String,
    pub year: &'a str,
    pub records: &'a [OutputRow],
}

/// Records per subtype, `all` first.
pub fn subtype_counts(rows: &[OutputRow]) -> BTreeMap<RecordSubtype, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.record_subtype).or_insert(0) += 1;
    }
    counts
}

pub fn subtype_table(rows: &[OutputRow]) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Subtype".bold().cyan(),
        "Records".bold().cyan()
    ]);
    for (subtype, count) in subtype_counts(rows) {
        table.add_row(prettytable::row![subtype.label().bright_white(), count]);
    }
    table
}

pub fn page_table(pages: &[PageSummary]) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Page".bold().cyan(),
        "Bands".bold().cyan(),
        "Records".bold().cyan(),
        "Stopped".bold().cyan()
    ]);
    for page in pages {
        table.add_row(prettytable::row![
            page.page.to_string().green(),
            page.bands,
            page.accepted,
            page.end.to_string().bright_black()
        ]);
    }
    table
}
