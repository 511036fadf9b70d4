use pgopher_core::domain::ParserResult;
use pgopher_core::modules::output::{Table, parse_linelist, parse_partition_function};
use pgopher_core::modules::workflow::SimulationOutput;

/// Report names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum ReportKind {
    Linelist,
    Partition,
}

#[derive(Clone, Copy)]
pub(super) struct ReportSpec {
    pub(super) kind: ReportKind,
    /// Output file name without extension.
    pub(super) file_stem: &'static str,
    pub(super) parse: fn(&str) -> ParserResult<Table>,
    pub(super) select: fn(&SimulationOutput) -> &Table,
}

pub(super) const REPORTS: [ReportSpec; 2] = [
    ReportSpec {
        kind: ReportKind::Linelist,
        file_stem: "linelist",
        parse: parse_linelist,
        select: linelist_of,
    },
    ReportSpec {
        kind: ReportKind::Partition,
        file_stem: "partition_function",
        parse: parse_partition_function,
        select: partition_function_of,
    },
];

pub(super) fn report_spec(kind: ReportKind) -> &'static ReportSpec {
    match kind {
        ReportKind::Linelist => &REPORTS[0],
        ReportKind::Partition => &REPORTS[1],
    }
}

fn linelist_of(output: &SimulationOutput) -> &Table {
    &output.linelist
}

fn partition_function_of(output: &SimulationOutput) -> &Table {
    &output.partition_function
}

#[cfg(test)]
mod tests {
    use super::{REPORTS, ReportKind, report_spec};

    #[test]
    fn report_table_is_indexed_by_kind() {
        for spec in &REPORTS {
            assert_eq!(report_spec(spec.kind).file_stem, spec.file_stem);
        }
        assert_eq!(report_spec(ReportKind::Partition).file_stem, "partition_function");
    }

    #[test]
    fn spec_parsers_match_their_report() {
        let table = (report_spec(ReportKind::Partition).parse)("T/K Q levels\n300 1.5 4\n")
            .expect("partition table should parse");
        assert_eq!(table.len(), 1);
        assert!((report_spec(ReportKind::Linelist).parse)("T/K Q levels\n").is_err());
    }
}
