use std::path::PathBuf;
use std::time::Duration;

pub type PgopherResult<T> = Result<T, PgopherError>;
pub type ParserResult<T> = PgopherResult<T>;
pub type RunResult<T> = PgopherResult<T>;

const SNIPPET_LIMIT: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PgopherError {
    #[error("unrecognized molecule type '{0}'; expected Asymmetric, Symmetric or Linear")]
    InvalidTopology(String),

    #[error("executable '{name}' was not found on the search path")]
    ExecutableNotFound { name: String },

    #[error("document file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    #[error("malformed {report} output: {reason} (near {snippet:?})")]
    MalformedOutput {
        report: &'static str,
        reason: String,
        snippet: String,
    },

    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{run} run of '{executable}' failed with {status}")]
    ProcessFailed {
        run: &'static str,
        executable: String,
        status: String,
        stderr: String,
    },

    #[error("'{executable}' did not finish within {timeout:?}")]
    Timeout {
        executable: String,
        timeout: Duration,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PgopherError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn malformed(report: &'static str, reason: impl Into<String>, raw: &str) -> Self {
        Self::MalformedOutput {
            report,
            reason: reason.into(),
            snippet: snippet(raw),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTopology(_) | Self::InvalidInput(_) | Self::FileNotFound { .. } => {
                ErrorCategory::InputValidationError
            }
            Self::ExecutableNotFound { .. } | Self::Io { .. } => ErrorCategory::IoSystemError,
            Self::MalformedOutput { .. } | Self::ProcessFailed { .. } | Self::Timeout { .. } => {
                ErrorCategory::ComputationError
            }
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::InvalidTopology(_) => "INPUT.MOL_TYPE",
            Self::InvalidInput(_) => "INPUT.PARAMETERS",
            Self::FileNotFound { .. } => "INPUT.DOCUMENT_MISSING",
            Self::ExecutableNotFound { .. } => "IO.EXECUTABLE_MISSING",
            Self::Io { .. } => "IO.FILESYSTEM",
            Self::MalformedOutput { .. } => "RUN.MALFORMED_OUTPUT",
            Self::ProcessFailed { .. } => "RUN.PROCESS_FAILED",
            Self::Timeout { .. } => "RUN.TIMEOUT",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

fn snippet(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(SNIPPET_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
