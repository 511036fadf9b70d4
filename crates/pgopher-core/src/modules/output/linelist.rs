use super::{Table, split_captured_lines};
use crate::domain::{ParserResult, PgopherError};
use crate::modules::traits::OutputParser;

pub const LINE_LIST_MARKER: &str = "Line list";

const REPORT: &str = "line list";
const TRAILING_SUMMARY_LINES: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct LineListParser;

impl OutputParser for LineListParser {
    fn report(&self) -> &'static str {
        REPORT
    }

    fn parse(&self, text: &str) -> ParserResult<Table> {
        parse_linelist(text)
    }
}

/// Extract the CSV line list that follows the `Line list` marker.
///
/// The branch designator contains a comma and arrives split across the
/// third- and second-to-last fields; those two are rejoined. The last two
/// lines are summary text and never become rows.
pub fn parse_linelist(text: &str) -> ParserResult<Table> {
    let lines = split_captured_lines(text);
    let marker = lines
        .iter()
        .position(|line| line.contains(LINE_LIST_MARKER))
        .ok_or_else(|| {
            PgopherError::malformed(REPORT, format!("no '{LINE_LIST_MARKER}' marker"), text)
        })?;

    let mut remaining = lines[marker + 1..].iter();
    let header_line = remaining.next().ok_or_else(|| {
        PgopherError::malformed(REPORT, "no header line after the marker", lines[marker])
    })?;
    let header: Vec<String> = header_line.split(',').map(clean_label).collect();

    let mut rows: Vec<Vec<String>> = remaining.map(|line| split_row(line)).collect();
    rows.truncate(rows.len().saturating_sub(TRAILING_SUMMARY_LINES));

    Table::new(REPORT, header, rows)
}

fn clean_label(label: &str) -> String {
    label.chars().filter(|ch| *ch != '"' && *ch != '\\').collect()
}

/// Replace the (up to two) fields before the last one with their
/// concatenation. A single-field row gains an empty cell in front.
fn split_row(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = line.split(',').map(str::to_string).collect();
    let last = fields.len() - 1;
    let start = last.saturating_sub(2);
    let joined: String = fields.drain(start..last).collect();
    fields.insert(start, joined);
    fields
}
