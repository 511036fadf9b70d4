use super::CliError;
use super::dispatch::{REPORTS, ReportKind, report_spec};
use super::helpers::*;
use pgopher_core::modules::parameters::ParameterFile;
use pgopher_core::modules::random::RandomOptions;
use pgopher_core::modules::runner::{
    DEFAULT_EXECUTABLE, DEFAULT_PARTITION_FLAG, ProcessRunner, RunnerConfig,
};
use pgopher_core::modules::workflow::{DEFAULT_DOCUMENT_NAME, Simulation};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct RenderArgs {
    /// YAML parameter file
    #[arg(value_name = "PARAMS")]
    params: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct SimulateArgs {
    /// YAML parameter file
    #[arg(value_name = "PARAMS")]
    params: PathBuf,

    /// Keep the generated document at this path instead of a temporary file
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_DOCUMENT_NAME)]
    document: Option<PathBuf>,

    /// PGopher executable name or path
    #[arg(long, default_value = DEFAULT_EXECUTABLE)]
    executable: String,

    /// Flag that asks pgo for the partition-function table
    #[arg(long, default_value = DEFAULT_PARTITION_FLAG, allow_hyphen_values = true)]
    partition_flag: String,

    /// Kill pgo runs that take longer than this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Directory receiving the line list and partition-function tables
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Table encoding
    #[arg(long, value_enum, default_value_t = TableFormat::Csv)]
    format: TableFormat,
}

#[derive(clap::Args)]
pub(super) struct RandomArgs {
    /// Seed for reproducible output; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Also draw quartic centrifugal distortion constants
    #[arg(long)]
    distortion: bool,

    /// Lower bound for rotational constants (MHz)
    #[arg(long, default_value_t = RandomOptions::default().constant_min)]
    constant_min: f64,

    /// Upper bound for rotational constants (MHz)
    #[arg(long, default_value_t = RandomOptions::default().constant_max)]
    constant_max: f64,

    /// Write the parameter file here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct ParseArgs {
    /// Which table the capture holds
    #[arg(value_enum)]
    report: ReportKind,

    /// Captured pgo stdout
    #[arg(value_name = "CAPTURED")]
    captured: PathBuf,

    /// Table encoding
    #[arg(long, value_enum, default_value_t = TableFormat::Csv)]
    format: TableFormat,

    /// Write the table here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub(super) fn run_render_command(args: RenderArgs) -> Result<i32, CliError> {
    let simulation = Simulation::from_parameter_file(&args.params)?;
    match &args.output {
        Some(path) => simulation.save_xml(path)?,
        None => emit_text(None, &simulation.to_xml()?)?,
    }
    Ok(0)
}

pub(super) fn run_simulate_command(args: SimulateArgs) -> Result<i32, CliError> {
    let simulation = Simulation::from_parameter_file(&args.params)?;

    let mut config = RunnerConfig::new(args.executable).with_partition_flag(args.partition_flag);
    if let Some(seconds) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(seconds));
    }
    let runner = ProcessRunner::new(config);
    // Fail on a missing executable before writing anything.
    runner.resolve_executable()?;

    if let Some(document) = &args.document {
        simulation.save_xml(document)?;
    }
    let output = simulation.simulate(&runner, args.document.as_deref())?;

    ensure_output_dir(&args.output_dir)?;
    for spec in &REPORTS {
        let table = (spec.select)(&output);
        let path = table_output_path(&args.output_dir, spec.file_stem, args.format);
        emit_text(Some(&path), &args.format.render(table)?)?;
        info!(report = ?spec.kind, path = %path.display(), rows = table.len(), "wrote table");
        println!("{}", path.display());
    }
    Ok(0)
}

pub(super) fn run_random_command(args: RandomArgs) -> Result<i32, CliError> {
    let mut rng = rng_from_seed(args.seed);
    let options = RandomOptions {
        constant_min: args.constant_min,
        constant_max: args.constant_max,
        distortion: args.distortion,
        ..RandomOptions::default()
    };
    let simulation = Simulation::from_random(&mut rng, options)?;
    info!(seed = ?args.seed, "generated random molecule");

    let file = ParameterFile::from_configs(simulation.simulation(), simulation.molecule());
    emit_text(args.output.as_deref(), &file.to_yaml_string()?)?;
    Ok(0)
}

pub(super) fn run_parse_command(args: ParseArgs) -> Result<i32, CliError> {
    let spec = report_spec(args.report);
    let text = read_captured_output(&args.captured)?;
    let table = (spec.parse)(&text)?;
    emit_text(args.output.as_deref(), &args.format.render(&table)?)?;
    Ok(0)
}
