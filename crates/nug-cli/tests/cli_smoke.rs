use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name)
}

fn nug(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nug"))
        .args(args)
        .output()
        .expect("run nug")
}

fn path_arg(path: &PathBuf) -> String {
    path.display().to_string()
}

#[test]
fn options_prints_the_neutron_preset() {
    let output = nug(&["options"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("projectile: n") || stdout.contains("projectile: 'n'"));
    assert!(stdout.contains("scored_metric: chi-squared"));

    let output = nug(&["options", "--preset", "protons"]);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("P,INL"));
}

#[test]
fn coverage_reports_a_percentage() {
    let output = nug(&[
        "coverage", "--lower", "0", "--upper", "1", "--width", "0.2", "0.95", "0.2", "0.55",
        "0.25", "0.7",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let value: f64 = stdout.trim().parse().expect("number");
    assert!((value - 75.0).abs() < 1e-9);
}

#[test]
fn grade_prints_the_isotope_report() {
    let dir = tempdir().expect("tempdir");
    let json = dir.path().join("7Li.json");
    let output = nug(&[
        "grade",
        "--options",
        &path_arg(&fixture("options.yaml")),
        "--measurements",
        &path_arg(&fixture("exfor_small.csv")),
        "--evaluations",
        &path_arg(&fixture("evaluations")),
        "--z",
        "3",
        "--a",
        "7",
        "--symbol",
        "Li",
        "--json",
        &path_arg(&json),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Nuclide: 7Li (Z = 3, N = 4)"));
    assert!(stdout.contains("(N,TOT) [MT = 1] -> 11 points in 2 datasets"));
    assert!(stdout.contains("Energy Coverage: 100.00%"));
    assert!(stdout.contains("(N,G) [MT = 102]"));
    assert!(stdout.contains("No measurements in energy range."));

    let report = fs::read_to_string(&json).expect("json report");
    assert!(report.contains("\"label\": \"7Li\""));
}

#[test]
fn scoreboard_writes_json_and_csv() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("board");
    let output = nug(&[
        "scoreboard",
        "--options",
        &path_arg(&fixture("options.yaml")),
        "--measurements",
        &path_arg(&fixture("exfor_small.csv")),
        "--evaluations",
        &path_arg(&fixture("evaluations")),
        "--catalog",
        &path_arg(&fixture("catalog.csv")),
        "--out",
        &path_arg(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let csv = fs::read_to_string(out.join("scoreboard.csv")).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "label,N,Z,score");
    assert!(lines[1].starts_with("6Li,3,3,"));
    assert!(lines[2].starts_with("7Li,4,3,"));
    assert!(out.join("scoreboard.json").exists());
}

#[test]
fn invalid_options_fail_before_grading() {
    let dir = tempdir().expect("tempdir");
    let options = dir.path().join("options.yaml");
    let text = fs::read_to_string(fixture("options.yaml")).expect("fixture");
    fs::write(&options, text.replace("upper_energy: 4.0e6", "upper_energy: 1.0e5"))
        .expect("write");

    let output = nug(&[
        "grade",
        "--options",
        &path_arg(&options),
        "--measurements",
        &path_arg(&fixture("exfor_small.csv")),
        "--evaluations",
        &path_arg(&fixture("evaluations")),
        "--z",
        "3",
        "--a",
        "7",
        "--symbol",
        "Li",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("malformed-bounds"));
}
