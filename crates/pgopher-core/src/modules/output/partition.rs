use super::{Table, split_captured_lines};
use crate::domain::{ParserResult, PgopherError};
use crate::modules::traits::OutputParser;

pub const PARTITION_MARKER: &str = "T/K";

const REPORT: &str = "partition function";
const DIAGNOSTIC_MARKER: &str = "levels";
const COLUMN_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionFunctionParser;

impl OutputParser for PartitionFunctionParser {
    fn report(&self) -> &'static str {
        REPORT
    }

    fn parse(&self, text: &str) -> ParserResult<Table> {
        parse_partition_function(text)
    }
}

/// Extract the whitespace-separated table that follows the `T/K` header line.
///
/// Lines mentioning `levels` are diagnostics and blank lines carry nothing;
/// both are skipped. A repeated header line does not become a row.
pub fn parse_partition_function(text: &str) -> ParserResult<Table> {
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for line in split_captured_lines(text) {
        if line.contains(PARTITION_MARKER) {
            if header.is_none() {
                header = Some(header_from_marker(line)?);
            }
            continue;
        }
        if header.is_none() || line.contains(DIAGNOSTIC_MARKER) || line.trim().is_empty() {
            continue;
        }
        rows.push(line.split_whitespace().map(str::to_string).collect());
    }

    let header = header.ok_or_else(|| {
        PgopherError::malformed(REPORT, format!("no '{PARTITION_MARKER}' header line"), text)
    })?;
    Table::new(REPORT, header, rows)
}

fn header_from_marker(line: &str) -> ParserResult<Vec<String>> {
    let labels: Vec<String> = line
        .split_whitespace()
        .take(COLUMN_COUNT)
        .map(str::to_string)
        .collect();
    if labels.len() < COLUMN_COUNT {
        return Err(PgopherError::malformed(
            REPORT,
            format!("header line has fewer than {COLUMN_COUNT} labels"),
            line,
        ));
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::{PartitionFunctionParser, parse_partition_function};
    use crate::domain::PgopherError;
    use crate::modules::traits::OutputParser;

    #[test]
    fn header_comes_from_marker_line_and_levels_lines_are_skipped() {
        let text = concat!(
            "b'PGopher partition function\\n",
            "T/K  Q  levels\\n",
            "300.0  5462.1  1200\\n",
            "Using 1200 levels\\n",
            "150.0  1933.7  1200\\n",
            "\\n",
        );

        let table = parse_partition_function(text).expect("table should parse");

        assert_eq!(table.header(), ["T/K", "Q", "levels"]);
        assert_eq!(
            table.rows(),
            [vec!["300.0", "5462.1", "1200"], vec!["150.0", "1933.7", "1200"]]
        );
    }

    #[test]
    fn escaped_capture_parses_into_table() {
        let text = concat!(
            "b'Partition functions\\n",
            "T/K Q levels\\n",
            "300.0 5462.1 1200\\n",
            "150.0 1933.7 1200\\n",
            "'"
        );

        let table = parse_partition_function(text).expect("table should parse");

        assert_eq!(table.header(), ["T/K", "Q", "levels"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("Q"), Some(vec!["5462.1", "1933.7"]));
    }

    #[test]
    fn only_first_three_marker_tokens_become_labels() {
        let text = "T/K Q(T) Nlev extra columns\n9.375 12.5 40\n";
        let table = parse_partition_function(text).expect("table should parse");
        assert_eq!(table.header(), ["T/K", "Q(T)", "Nlev"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_marker_is_malformed() {
        let error = parse_partition_function("300 12.0 4\\n").expect_err("marker is required");
        assert!(matches!(
            error,
            PgopherError::MalformedOutput { report: "partition function", .. }
        ));
    }

    #[test]
    fn short_data_rows_are_malformed() {
        let error = parse_partition_function("T/K Q levels\\n300 12.0\\n")
            .expect_err("row width must match");
        assert!(matches!(error, PgopherError::MalformedOutput { .. }));
    }

    #[test]
    fn parser_trait_reports_name() {
        let parser = PartitionFunctionParser;
        assert_eq!(parser.report(), "partition function");
        assert!(parser.parse("T/K Q levels").expect("empty table").is_empty());
    }
}
