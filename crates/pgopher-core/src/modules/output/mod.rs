//! Tables recovered from PGopher console output.

mod linelist;
mod partition;

pub use linelist::{LINE_LIST_MARKER, LineListParser, parse_linelist};
pub use partition::{PARTITION_MARKER, PartitionFunctionParser, parse_partition_function};

use crate::domain::{ParserResult, PgopherError};
use serde::Serialize;

/// Header plus rows of string cells. Every row has exactly one cell per
/// header column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(
        report: &'static str,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> ParserResult<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(PgopherError::malformed(
                report,
                format!(
                    "row {} has {} cells but the header has {} columns",
                    index + 1,
                    row.len(),
                    header.len()
                ),
                &row.join(","),
            ));
        }
        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, label: &str) -> Option<Vec<&str>> {
        let index = self.header.iter().position(|name| name == label)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

/// Split captured output into lines.
///
/// The captured stream is a bytes literal (`b'...'` or `b"..."`) that encodes
/// line breaks as the two characters `\` `n`. The literal wrapper is removed
/// first; real line breaks are accepted as separators too.
pub(crate) fn split_captured_lines(text: &str) -> Vec<&str> {
    strip_bytes_literal(text)
        .split('\n')
        .flat_map(|line| line.split("\\n"))
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| line.strip_suffix("\\r").unwrap_or(line))
        .collect()
}

fn strip_bytes_literal(text: &str) -> &str {
    let trimmed = text.trim();
    ['\'', '"']
        .into_iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix('b')?
                .strip_prefix(quote)?
                .strip_suffix(quote)
        })
        .unwrap_or(text)
}
