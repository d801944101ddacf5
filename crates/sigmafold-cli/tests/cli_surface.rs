use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_sigmafold");
    Command::new(binary_path)
        .args(args)
        .output()
        .expect("CLI binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr should be UTF-8")
}

fn write_dataset(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("dataset.json");
    fs::write(
        &path,
        r#"
        {
          "ions": {
            "D": { "mass": 2.0 },
            "T": { "mass": 3.0 }
          },
          "reactions": {
            "D+T": {
              "energy_ev": [1.0e3, 1.0e4, 1.0e5, 1.0e6],
              "cross_section_barns": [1.0e-3, 1.0e-2, 1.0e-1, 1.0]
            }
          }
        }
        "#,
    )
    .expect("dataset file should be written");
    path
}

#[test]
fn resolve_prints_one_canonical_key_per_input() {
    let output = run_cli(&["resolve", "DT", "d(d,p)t", "p+11B→3α"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "DT: D+T".to_string(),
            "d(d,p)t: D+D→p+T".to_string(),
            "p+11B→3α: p+11B".to_string(),
        ]
    );
}

#[test]
fn resolve_failure_exits_with_the_compute_code() {
    let output = run_cli(&["resolve", "not-a-reaction"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("not-a-reaction"));
}

#[test]
fn xs_evaluates_the_builtin_dt_dataset() {
    let output = run_cli(&["xs", "D+T", "-e", "64"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let line = text.lines().next().expect("one output line");
    let mut fields = line.split_whitespace();
    let energy: f64 = fields.next().expect("energy").parse().expect("number");
    let sigma: f64 = fields.next().expect("sigma").parse().expect("number");
    assert_eq!(energy, 64.0);
    assert!((4.0e3..=6.0e3).contains(&sigma), "{sigma} mb at 64 keV");
}

#[test]
fn xs_accepts_the_remeshed_mode_and_repeated_energies() {
    let output = run_cli(&[
        "xs",
        "t(d,n)a",
        "--mode",
        "LogLogReinterpolation",
        "-e",
        "10",
        "-e",
        "64",
        "-e",
        "200",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).lines().count(), 3);
}

#[test]
fn unknown_mode_is_a_usage_error_naming_both_options() {
    let output = run_cli(&["xs", "D+T", "-e", "64", "--mode", "bogus"]);
    assert_eq!(output.status.code(), Some(2));

    let message = stderr(&output);
    assert!(message.contains("bogus"));
    assert!(message.contains("LogLogExtrapolation"));
    assert!(message.contains("LogLogReinterpolation"));
}

#[test]
fn range_reports_the_converted_bounds_of_a_dataset_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    let dataset = write_dataset(&temp);

    let output = run_cli(&[
        "range",
        "D+T",
        "--data",
        dataset.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let mut fields = text.split_whitespace();
    let low: f64 = fields.next().expect("low").parse().expect("number");
    let high: f64 = fields.next().expect("high").parse().expect("number");
    assert!((low - 0.6).abs() < 1.0e-12);
    assert!((high - 600.0).abs() < 1.0e-9);
}

#[test]
fn missing_dataset_file_is_a_data_error() {
    let output = run_cli(&["range", "D+T", "--data", "/nonexistent/dataset.json"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("dataset"));
}

#[test]
fn missing_table_in_a_dataset_is_a_data_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = temp.path().join("ions-only.json");
    fs::write(
        &path,
        r#"{ "ions": { "D": { "mass": 2.0 }, "3He": { "mass": 3.0 } } }"#,
    )
    .expect("dataset file should be written");

    let output = run_cli(&["range", "DHe3", "--data", path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("D+3He"));
}

#[test]
fn list_prints_every_canonical_key() {
    let output = run_cli(&["list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 13);
    assert!(lines.contains(&"D+T"));
    assert!(lines.contains(&"D+D→p+T"));
    assert!(lines.contains(&"D+D→n+3He"));
    assert!(lines.contains(&"D+6Li→p+7Li"));
}

#[test]
fn help_is_printed_without_an_error_exit() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("resolve"));
    assert!(text.contains("xs"));
    assert!(text.contains("range"));
}

#[test]
fn missing_arguments_are_usage_errors() {
    let output = run_cli(&["xs", "D+T"]);
    assert_eq!(output.status.code(), Some(2));

    let output = run_cli(&["resolve"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn path_is_relative_to_cwd() {
    // guards against the loader resolving --data against anything but the
    // invocation directory
    let temp = TempDir::new().expect("tempdir should be created");
    let dataset = write_dataset(&temp);
    let file_name = dataset.file_name().expect("file name");

    let binary_path = env!("CARGO_BIN_EXE_sigmafold");
    let output = Command::new(binary_path)
        .current_dir(temp.path())
        .args(["range", "D+T", "--data"])
        .arg(Path::new(file_name))
        .output()
        .expect("CLI binary should run");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}
