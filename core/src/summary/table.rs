use super::series::SeriesSummary;
use crate::error::Result;
use crate::extraction::all_fields;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Last column of the summary table
pub const LOCATION_COLUMN: &str = "Location on disk";

/// Writes summaries as CSV, one row per series
///
/// Columns are the union of all field catalogs followed by
/// [`LOCATION_COLUMN`]. Fields outside a row's catalog, and missing values,
/// are left empty.
pub fn write_csv<W: Write>(summaries: &[SeriesSummary], writer: W) -> Result<()> {
    let columns = all_fields();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut headers: Vec<&str> = columns.iter().map(|spec| spec.keyword).collect();
    headers.push(LOCATION_COLUMN);
    wtr.write_record(&headers)?;

    for summary in summaries {
        let mut values: Vec<String> = columns
            .iter()
            .map(|spec| summary.get(spec.keyword).to_string())
            .collect();
        values.push(summary.location.display().to_string());
        wtr.write_record(&values)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the summary table to `path`, replacing any existing file
pub fn write_csv_file(summaries: &[SeriesSummary], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(summaries, file)?;
    info!("Wrote {} series to {}", summaries.len(), path.display());
    Ok(())
}
