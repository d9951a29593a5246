//! CSV export for the per-appliance load breakdown.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::{LoadLine, LoadTotals};

/// Column header for the load breakdown export.
const HEADER: &str = "id,name,source,quantity,wattage_w,surge_multiplier,running_w,surge_w";

/// Exports the breakdown to a CSV file, followed by a `TOTAL` row.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(lines: &[LoadLine], totals: &LoadTotals, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(lines, totals, buf)
}

/// Writes the breakdown as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(lines: &[LoadLine], totals: &LoadTotals, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for l in lines {
        wtr.write_record(&[
            l.id.clone(),
            l.name.clone(),
            l.source.as_str().to_string(),
            l.quantity.to_string(),
            format!("{:.1}", l.wattage),
            format!("{:.2}", l.surge_multiplier),
            format!("{:.1}", l.running_watts),
            format!("{:.1}", l.surge_watts),
        ])?;
    }

    let quantity: u64 = lines.iter().map(|l| u64::from(l.quantity)).sum();
    wtr.write_record(&[
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        quantity.to_string(),
        String::new(),
        String::new(),
        format!("{:.1}", totals.total_running_watts),
        format!("{:.1}", totals.total_surge_watts),
    ])?;

    wtr.flush()?;
    Ok(())
}
