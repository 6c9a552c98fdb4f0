//! Read/write dashboard JSON files.
//!
//! A dashboard file is the portable form of one run: every observation, the
//! dimension means, composite, state, and signal lists. The schema is
//! `domain::Dashboard`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::Dashboard;
use crate::error::AppError;

/// Write a dashboard JSON file.
pub fn write_dashboard_json(path: &Path, dashboard: &Dashboard) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create dashboard JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, dashboard)
        .map_err(|e| AppError::new(2, format!("Failed to write dashboard JSON: {e}")))?;
    Ok(())
}

/// Read a dashboard JSON file.
pub fn read_dashboard_json(path: &Path) -> Result<Dashboard, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open dashboard JSON '{}': {e}", path.display())))?;
    let dashboard: Dashboard = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid dashboard JSON: {e}")))?;
    Ok(dashboard)
}
