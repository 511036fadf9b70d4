use super::CliError;
use anyhow::Context;
use pgopher_core::domain::{PgopherError, PgopherResult};
use pgopher_core::modules::output::Table;
use pgopher_core::modules::serialization::{render_csv, render_json, write_text_artifact};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Table encodings written by `simulate` and `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    pub(super) const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub(super) fn render(self, table: &Table) -> PgopherResult<String> {
        match self {
            Self::Csv => render_csv(table),
            Self::Json => render_json(table).map(|mut json| {
                json.push('\n');
                json
            }),
        }
    }
}

/// Install the stderr subscriber. Explicit `-v`/`-q` flags win over `RUST_LOG`.
pub(super) fn setup_logging(verbosity: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let filter = if quiet || verbosity > 0 {
        EnvFilter::default().add_directive(level.into())
    } else {
        EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy()
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // A subscriber may already be installed when running in-process.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

pub(super) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub(super) fn read_captured_output(path: &Path) -> PgopherResult<String> {
    fs::read_to_string(path).map_err(|source| PgopherError::io("read captured output", path, source))
}

/// Write `content` to `output`, or to stdout when no path is given.
pub(super) fn emit_text(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            write_text_artifact(path, content)
                .map_err(|source| PgopherError::io("write", path, source))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}

pub(super) fn ensure_output_dir(dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

pub(super) fn table_output_path(dir: &Path, file_stem: &str, format: TableFormat) -> PathBuf {
    dir.join(format!("{file_stem}.{}", format.extension()))
}
