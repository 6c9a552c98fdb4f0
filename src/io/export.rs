//! Export observations to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Observation;
use crate::error::AppError;

const HEADER: &str = "dimension,id,name,value,as_of,status,score,positive_band,negative_band,interpretation";

/// Write one row per observation to a CSV file.
pub fn write_observations_csv(path: &Path, observations: &[Observation]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_observations(&mut file, observations)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))
}

fn write_observations<W: Write>(out: &mut W, observations: &[Observation]) -> std::io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for o in observations {
        writeln!(
            out,
            "{},{},{},{:.4},{},{},{:.2},{},{},{}",
            o.dimension.display_name(),
            csv_field(&o.id),
            csv_field(&o.name),
            o.value,
            csv_field(&o.as_of),
            o.status_label(),
            o.score,
            csv_field(&o.positive_band),
            csv_field(&o.negative_band),
            csv_field(&o.interpretation),
        )?;
    }
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
