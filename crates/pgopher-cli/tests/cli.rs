use pgopher_core::modules::parameters::ParameterFile;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const PARAMS: &str = r#"
mol_type: Symmetric
mixture:
  Temperature: 10.0
species:
  Name: CH3CN
  Jmax: 40
parameters:
  A: 158000.0
  B: 9198.9
trans_mom:
  a: 3.9
"#;

const CAPTURED_LINELIST: &str = concat!(
    "b'PGopher 10.1\\n",
    "Line list\\n",
    "\"J'\",\"Frequency\",\"Branch\",\"Intensity\"\\n",
    "1,18397.8,r,R(0),0.5\\n",
    "2,36795.6,r,R(1),1.25\\n",
    "Total intensity,1.75\\n",
    "'"
);

const CAPTURED_PARTITION: &str = "T/K Q levels\n300.0 5462.1 1200\nUsing 1200 levels\n150.0 1933.7 1200\n";

fn pgopher(args: &[&str], working_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pgopher"))
        .args(args)
        .current_dir(working_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("pgopher command should run")
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    fs::write(path, content).expect("file should be written");
    path.to_path_buf()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn render_prints_document_for_parameter_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("params.yml"), PARAMS);

    let output = pgopher(&["render", "params.yml"], temp.path());

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let xml = stdout_of(&output);
    assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<Mixture "));
    assert!(xml.contains("<Parameter Name=\"Temperature\" Value=\"10.0\"/>"));
    assert!(xml.contains("<Species Name=\"CH3CN\" Jmax=\"40\"/>"));
    assert!(xml.contains("<SymmetricTop Name=\"v=0\">"));
    assert!(xml.contains("<Parameter Name=\"Strength\" Value=\"3.9\"/>"));
}

#[test]
fn render_to_file_matches_stdout_rendering() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("params.yml"), PARAMS);

    let printed = pgopher(&["render", "params.yml"], temp.path());
    let saved = pgopher(&["render", "params.yml", "-o", "methyl.pgo"], temp.path());

    assert!(saved.status.success(), "stderr: {}", stderr_of(&saved));
    assert!(saved.stdout.is_empty());
    let written = fs::read_to_string(temp.path().join("methyl.pgo")).expect("document exists");
    assert_eq!(written, stdout_of(&printed));
}

#[test]
fn unknown_topology_exits_with_input_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("params.yml"), "mol_type: spherical\n");

    let output = pgopher(&["render", "params.yml"], temp.path());

    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("ERROR: [INPUT.MOL_TYPE]"), "stderr: {stderr}");
    assert!(stderr.contains("FATAL EXIT CODE: 2"));
}

#[test]
fn setting_key_that_is_not_an_attribute_name_exits_with_input_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("params.yml"), "species:\n  max J: 40\n");

    let output = pgopher(&["render", "params.yml", "-o", "bad.pgo"], temp.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("[INPUT.PARAMETERS]"));
    assert!(!temp.path().join("bad.pgo").exists());
}

#[test]
fn missing_parameter_file_exits_with_io_code() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = pgopher(&["render", "absent.yml"], temp.path());

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_of(&output).contains("[IO.FILESYSTEM]"));
}

#[test]
fn parse_linelist_writes_csv() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("capture.txt"), CAPTURED_LINELIST);

    let output = pgopher(&["parse", "linelist", "capture.txt"], temp.path());

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        "J',Frequency,Branch,Intensity\n1,18397.8,rR(0),0.5\n2,36795.6,rR(1),1.25\n"
    );
}

#[test]
fn parse_partition_writes_json_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("qtable.txt"), CAPTURED_PARTITION);

    let output = pgopher(
        &["parse", "partition", "qtable.txt", "--format", "json", "-o", "q.json"],
        temp.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join("q.json")).expect("json file exists"),
    )
    .expect("output should be valid json");
    assert_eq!(parsed["header"], serde_json::json!(["T/K", "Q", "levels"]));
    assert_eq!(parsed["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["rows"][1][1], "1933.7");
}

#[test]
fn parse_partition_accepts_bytes_literal_capture() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("qtable.txt"),
        "b'Partition functions\\nT/K Q levels\\n300.0 5462.1 1200\\n150.0 1933.7 1200\\n'\n",
    );

    let output = pgopher(&["parse", "partition", "qtable.txt"], temp.path());

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        "T/K,Q,levels\n300.0,5462.1,1200\n150.0,1933.7,1200\n"
    );
}

#[test]
fn parse_without_marker_is_a_computation_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("capture.txt"), "no table here\n");

    let output = pgopher(&["parse", "linelist", "capture.txt"], temp.path());

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr_of(&output).contains("[RUN.MALFORMED_OUTPUT]"));
}

#[test]
fn random_with_seed_is_reproducible_and_loadable() {
    let temp = TempDir::new().expect("tempdir should be created");
    let args = ["random", "--seed", "17", "--distortion"];

    let first = pgopher(&args, temp.path());
    let second = pgopher(&args, temp.path());

    assert!(first.status.success(), "stderr: {}", stderr_of(&first));
    assert_eq!(first.stdout, second.stdout);

    let file = ParameterFile::from_yaml_str(&stdout_of(&first)).expect("output should be yaml");
    let (_, molecule) = file.into_configs().expect("random parameters should build");
    let constant = |key: &str| {
        molecule
            .parameters()
            .get(key)
            .and_then(|value| value.as_f64())
            .expect("constant should be numeric")
    };
    assert!(constant("A") >= constant("B") && constant("B") >= constant("C"));
    assert!(molecule.parameters().contains_key("deltaK"));
}

#[test]
fn random_rejects_empty_constant_range() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = pgopher(
        &["random", "--constant-min", "5000", "--constant-max", "10"],
        temp.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("[INPUT.PARAMETERS]"));
}

#[test]
fn simulate_reports_missing_executable() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("params.yml"), PARAMS);

    let output = pgopher(
        &["simulate", "params.yml", "--executable", "./no-such-pgo"],
        temp.path(),
    );

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_of(&output).contains("[IO.EXECUTABLE_MISSING]"));
    assert!(!temp.path().join("linelist.csv").exists());
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = pgopher(&["frobnicate"], temp.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("[INPUT.CLI_USAGE]"));
}

#[cfg(unix)]
mod with_fake_pgo {
    use super::{PARAMS, pgopher, stderr_of, stdout_of, write_file};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const FAKE_PGO: &str = r#"#!/bin/sh
for last; do :; done
[ -f "$last" ] || exit 9
if [ "$1" = "--qtable" ]; then
printf 'T/K Q levels\n300.0 5462.1 1200\n'
else
printf 'Line list\n"J","Frequency","Branch","Intensity"\n1,18397.8,r,R(0),0.5\nTotal,0.5\n'
fi
"#;

    fn install_fake_pgo(dir: &Path) -> PathBuf {
        let path = write_file(&dir.join("pgo"), FAKE_PGO);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("script should be made executable");
        path
    }

    fn pgo_files_in(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .expect("directory should be readable")
            .map(|entry| entry.expect("entry should be readable").path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "pgo"))
            .collect()
    }

    #[test]
    fn simulate_writes_both_tables_and_cleans_up() {
        let bin = TempDir::new().expect("tempdir should be created");
        let work = TempDir::new().expect("tempdir should be created");
        let pgo = install_fake_pgo(bin.path());
        write_file(&work.path().join("params.yml"), PARAMS);

        let output = pgopher(
            &[
                "simulate",
                "params.yml",
                "--executable",
                pgo.to_str().expect("utf-8 path"),
                "--output-dir",
                "tables",
                "--timeout-secs",
                "30",
            ],
            work.path(),
        );

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        let tables = work.path().join("tables");
        assert_eq!(
            fs::read_to_string(tables.join("linelist.csv")).expect("line list written"),
            "J,Frequency,Branch,Intensity\n1,18397.8,rR(0),0.5\n"
        );
        assert_eq!(
            fs::read_to_string(tables.join("partition_function.csv"))
                .expect("partition function written"),
            "T/K,Q,levels\n300.0,5462.1,1200\n"
        );
        assert_eq!(stdout_of(&output).lines().count(), 2);
        assert!(pgo_files_in(work.path()).is_empty(), "temporary document should be removed");
    }

    #[test]
    fn simulate_keeps_requested_document() {
        let bin = TempDir::new().expect("tempdir should be created");
        let work = TempDir::new().expect("tempdir should be created");
        let pgo = install_fake_pgo(bin.path());
        write_file(&work.path().join("params.yml"), PARAMS);

        let output = pgopher(
            &[
                "simulate",
                "params.yml",
                "--executable",
                pgo.to_str().expect("utf-8 path"),
                "--document",
                "kept.pgo",
                "--format",
                "json",
            ],
            work.path(),
        );

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        assert_eq!(pgo_files_in(work.path()), [work.path().join("kept.pgo")]);
        assert!(work.path().join("linelist.json").is_file());
        assert!(work.path().join("partition_function.json").is_file());
    }
}
