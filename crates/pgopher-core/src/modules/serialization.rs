use crate::domain::{PgopherError, PgopherResult};
use crate::modules::output::Table;
use std::fs;
use std::path::Path;

/// Shortest text that parses back to the same `f64`.
///
/// Whole numbers keep a trailing `.0`, magnitudes outside `[1e-4, 1e16)` use
/// exponent notation (`2e-18`).
pub fn format_real(value: f64) -> String {
    format!("{value:?}")
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

/// Header and rows as comma-separated text; cells are quoted only when needed.
pub fn render_csv(table: &Table) -> PgopherResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.header()).map_err(csv_failure)?;
    for row in table.rows() {
        writer.write_record(row).map_err(csv_failure)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|source| csv_failure(source.error()))?;
    String::from_utf8(bytes).map_err(csv_failure)
}

pub fn render_json(table: &Table) -> PgopherResult<String> {
    serde_json::to_string_pretty(table).map_err(|source| {
        PgopherError::invalid_input(format!("failed to serialize table as JSON: {source}"))
    })
}

fn csv_failure(source: impl std::fmt::Display) -> PgopherError {
    PgopherError::invalid_input(format!("failed to serialize table as CSV: {source}"))
}
