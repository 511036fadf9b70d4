mod commands;
mod dispatch;
mod helpers;

use clap::Parser;
use pgopher_core::domain::{ErrorCategory, PgopherError};

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            eprintln!("{}", error.fatal_exit_line());
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("pgopher".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::setup_logging(cli.verbose, cli.quiet);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "pgopher",
    version,
    about = "Generate PGopher documents, run pgo and collect its tables"
)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG applies when unset
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable logging entirely
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Render the PGopher document described by a parameter file
    Render(commands::RenderArgs),
    /// Run pgo for a parameter file and write the line list and partition function
    Simulate(commands::SimulateArgs),
    /// Draw a random asymmetric top and print it as a parameter file
    Random(commands::RandomArgs),
    /// Parse previously captured pgo output
    Parse(commands::ParseArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Render(args) => commands::run_render_command(args),
        CliCommand::Simulate(args) => commands::run_simulate_command(args),
        CliCommand::Random(args) => commands::run_random_command(args),
        CliCommand::Parse(args) => commands::run_parse_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Compute(#[from] PgopherError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage(_) => ErrorCategory::InputValidationError,
            Self::Compute(error) => error.category(),
            Self::Internal(_) => ErrorCategory::IoSystemError,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Usage(_) => "INPUT.CLI_USAGE",
            Self::Compute(error) => error.placeholder(),
            Self::Internal(_) => "IO.CLI",
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        match self {
            Self::Compute(error) => error.diagnostic_line(),
            _ => format!("ERROR: [{}] {}", self.placeholder(), self.to_string().trim_end()),
        }
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}
