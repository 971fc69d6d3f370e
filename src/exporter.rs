use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{AcceptedRecord, Delimiter, RejectedRecord};

const ACCEPTED_HEADER: [&str; 5] = ["RowId", "AccountNumber", "Name", "Amount", "Telephone"];
const REJECTED_HEADER: [&str; 6] = [
    "RowId",
    "AccountNumber",
    "Name",
    "Amount",
    "Telephone",
    "Error Reason",
];

/// Destination paths derived from the source file name.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub accepted: PathBuf,
    pub rejected: PathBuf,
    pub report: PathBuf,
}

impl OutputPaths {
    /// `debts.csv` -> `debts_cleaned.csv`, `debts_rejected.csv`, `debts_report.txt`.
    pub fn for_source(source: &Path, output_dir: Option<&Path>) -> Self {
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| source.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("import");
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv");
        Self {
            accepted: dir.join(format!("{stem}_cleaned.{ext}")),
            rejected: dir.join(format!("{stem}_rejected.csv")),
            report: dir.join(format!("{stem}_report.txt")),
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write accepted records using the input delimiter. Skipped when there are none.
pub fn write_accepted(
    records: &[AcceptedRecord],
    delimiter: Delimiter,
    path: &Path,
) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }
    ensure_parent(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_path(path)?;
    wtr.write_record(ACCEPTED_HEADER)?;
    for r in records {
        wtr.write_record([
            r.row_id.to_string(),
            r.account_number.clone(),
            r.name.clone(),
            r.amount.to_string(),
            r.phone.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(Some(path.to_path_buf()))
}

/// Write rejected records, always comma-delimited. Skipped when there are none.
pub fn write_rejected(records: &[RejectedRecord], path: &Path) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }
    ensure_parent(path)?;
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(REJECTED_HEADER)?;
    for r in records {
        wtr.write_record([
            r.row_id.to_string(),
            r.account_number.clone(),
            r.name.clone(),
            r.amount.to_string(),
            r.phone.clone(),
            r.reason.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(Some(path.to_path_buf()))
}

pub fn write_report(text: &str, path: &Path) -> Result<PathBuf> {
    ensure_parent(path)?;
    std::fs::write(path, text)?;
    Ok(path.to_path_buf())
}
