//! End-to-end driver: build the document, run PGopher twice, parse both reports.

use crate::domain::{PgopherError, PgopherResult};
use crate::modules::document::{DocumentBuilder, Element};
use crate::modules::molecule::MoleculeConfig;
use crate::modules::output::{LineListParser, PartitionFunctionParser, Table};
use crate::modules::parameters::ParameterFile;
use crate::modules::random::{RandomOptions, random_molecule};
use crate::modules::runner::CapturedOutput;
use crate::modules::simulation::SimulationConfig;
use crate::modules::traits::{ExternalRunner, OutputParser};
use rand::Rng;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const DEFAULT_DOCUMENT_NAME: &str = "simulation.pgo";
pub const DOCUMENT_SUFFIX: &str = ".pgo";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    pub linelist: Table,
    pub partition_function: Table,
}

/// One simulation request: mixture settings plus the molecule to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    simulation: SimulationConfig,
    molecule: MoleculeConfig,
}

impl Simulation {
    pub fn new(simulation: SimulationConfig, molecule: MoleculeConfig) -> Self {
        Self {
            simulation,
            molecule,
        }
    }

    pub fn from_parameter_file(path: &Path) -> PgopherResult<Self> {
        Self::from_parameters(ParameterFile::read(path)?)
    }

    pub fn from_parameters(file: ParameterFile) -> PgopherResult<Self> {
        let (simulation, molecule) = file.into_configs()?;
        Ok(Self::new(simulation, molecule))
    }

    /// Random asymmetric top; the caller owns and seeds `rng`.
    pub fn from_random<R: Rng>(rng: &mut R, options: RandomOptions) -> PgopherResult<Self> {
        let molecule = random_molecule(rng, &options)?;
        let simulation = SimulationConfig::new(options.mixture, options.species);
        Ok(Self::new(simulation, molecule))
    }

    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    pub fn molecule(&self) -> &MoleculeConfig {
        &self.molecule
    }

    pub fn builder(&self) -> DocumentBuilder<'_> {
        DocumentBuilder::new(&self.simulation, &self.molecule)
    }

    pub fn to_element(&self) -> PgopherResult<Element> {
        self.builder().build()
    }

    pub fn to_xml(&self) -> PgopherResult<String> {
        self.builder().to_xml()
    }

    pub fn save_xml(&self, path: &Path) -> PgopherResult<()> {
        self.builder().save(path)
    }

    /// Run the line-list and partition-function reports.
    ///
    /// With `document` unset, the document is written to a uniquely named
    /// temporary file in the current directory that is removed afterwards,
    /// whether or not the runs succeed.
    pub fn simulate<R>(&self, runner: &R, document: Option<&Path>) -> PgopherResult<SimulationOutput>
    where
        R: ExternalRunner + ?Sized,
    {
        match document {
            Some(path) => run_reports(runner, path),
            None => {
                let cwd = std::env::current_dir()
                    .map_err(|source| PgopherError::io("read current directory", ".", source))?;
                self.simulate_in(runner, &cwd)
            }
        }
    }

    /// Like [`Simulation::simulate`] with no document path, but the
    /// temporary document lives in `scratch_dir`.
    pub fn simulate_in<R>(&self, runner: &R, scratch_dir: &Path) -> PgopherResult<SimulationOutput>
    where
        R: ExternalRunner + ?Sized,
    {
        let xml = self.to_xml()?;
        let mut file = tempfile::Builder::new()
            .prefix("pgopher-")
            .suffix(DOCUMENT_SUFFIX)
            .tempfile_in(scratch_dir)
            .map_err(|source| PgopherError::io("create temporary document in", scratch_dir, source))?;
        file.write_all(xml.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| PgopherError::io("write temporary document", file.path(), source))?;

        // Closing the handle keeps the path alive until `document` drops.
        let document = file.into_temp_path();
        run_reports(runner, &document)
    }
}

fn run_reports<R>(runner: &R, path: &Path) -> PgopherResult<SimulationOutput>
where
    R: ExternalRunner + ?Sized,
{
    let linelist = run_and_parse(runner, path, None, &LineListParser)?;
    let partition_function = run_and_parse(
        runner,
        path,
        Some(runner.partition_flag()),
        &PartitionFunctionParser,
    )?;
    info!(
        document = %path.display(),
        lines = linelist.len(),
        temperatures = partition_function.len(),
        "simulation finished"
    );
    Ok(SimulationOutput {
        linelist,
        partition_function,
    })
}

fn run_and_parse<R, P>(runner: &R, path: &Path, flag: Option<&str>, parser: &P) -> PgopherResult<Table>
where
    R: ExternalRunner + ?Sized,
    P: OutputParser,
{
    let captured = runner.run(path, flag)?;
    ensure_success(runner, parser.report(), &captured)?;
    parser.parse(&captured.stdout)
}

fn ensure_success<R>(runner: &R, run: &'static str, captured: &CapturedOutput) -> PgopherResult<()>
where
    R: ExternalRunner + ?Sized,
{
    if captured.success() {
        return Ok(());
    }
    Err(PgopherError::ProcessFailed {
        run,
        executable: runner.executable().to_string(),
        status: captured.status_text(),
        stderr: captured.stderr.trim().to_string(),
    })
}
