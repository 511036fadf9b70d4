use crate::domain::{ParserResult, RunResult};
use crate::modules::output::Table;
use crate::modules::runner::CapturedOutput;
use std::path::Path;

/// Something that can execute PGopher against a document on disk.
pub trait ExternalRunner {
    fn executable(&self) -> &str;

    fn partition_flag(&self) -> &str;

    fn run(&self, path: &Path, flag: Option<&str>) -> RunResult<CapturedOutput>;
}

/// Turns captured console text into a table.
pub trait OutputParser {
    fn report(&self) -> &'static str;

    fn parse(&self, text: &str) -> ParserResult<Table>;
}

#[cfg(test)]
mod tests {
    use super::ExternalRunner;
    use crate::domain::{ErrorCategory, PgopherError, RunResult};
    use crate::modules::runner::CapturedOutput;
    use std::path::Path;

    struct FailingRunner;

    impl ExternalRunner for FailingRunner {
        fn executable(&self) -> &str {
            "pgo"
        }

        fn partition_flag(&self) -> &str {
            "--qtable"
        }

        fn run(&self, _path: &Path, _flag: Option<&str>) -> RunResult<CapturedOutput> {
            Err(PgopherError::ExecutableNotFound {
                name: self.executable().to_string(),
            })
        }
    }

    #[test]
    fn runner_trait_uses_shared_error_types() {
        let error = FailingRunner
            .run(Path::new("simulation.pgo"), None)
            .expect_err("runner should fail");
        assert_eq!(error.category(), ErrorCategory::IoSystemError);
        assert_eq!(error.exit_code(), 3);
        assert_eq!(error.placeholder(), "IO.EXECUTABLE_MISSING");
    }

    #[test]
    fn runner_trait_objects_are_usable() {
        let runner: &dyn ExternalRunner = &FailingRunner;
        assert_eq!(runner.partition_flag(), "--qtable");
        assert!(runner.run(Path::new("x.pgo"), Some("--qtable")).is_err());
    }
}
