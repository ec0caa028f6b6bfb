use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use lbx_core::ParameterTable;
use lbx_quark::{registry, required_keys, LAMBDAB_TO_LAMBDA1520};
use serde_json::Value;

fn lbx(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lbx"))
        .args(args)
        .output()
        .expect("run lbx")
}

fn fixture_table() -> ParameterTable {
    let info = registry::global()
        .lookup(LAMBDAB_TO_LAMBDA1520)
        .expect("builtin process");
    required_keys(info)
        .into_iter()
        .map(|key| {
            let value = match key.as_str() {
                "m_Lambdab" => 5.619,
                "m_Lambda(1520)" => 1.520,
                k if k.ends_with(" m_q") => 0.2848,
                k if k.ends_with(" m_s") => 0.5,
                k if k.ends_with(" alpha_Lambdab") => 0.443,
                k if k.ends_with(" alpha_Lambda(1520)") => 0.333,
                k if k.ends_with(" a0") => 0.5,
                k if k.ends_with(" a2") => -0.05,
                k if k.ends_with(" a4") => 0.0,
                _ => 1.0,
            };
            (key, value)
        })
        .collect()
}

fn write_params(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let table = fixture_table();
    if name.ends_with(".json") {
        fs::write(&path, serde_json::to_vec(&table).unwrap()).unwrap();
    } else {
        fs::write(&path, table.to_yaml_string().unwrap()).unwrap();
    }
    path
}

#[test]
fn processes_lists_builtin_transition() {
    let output = lbx(&["processes"]);
    assert!(output.status.success());
    let body = String::from_utf8(output.stdout).expect("utf8");
    let first: Value = serde_json::from_str(body.lines().next().expect("one line")).expect("json");
    assert_eq!(first["name"], LAMBDAB_TO_LAMBDA1520);
    assert_eq!(first["daughter"], "Lambda(1520)");
}

#[test]
fn template_lists_every_required_key() {
    let output = lbx(&["template", "--process", LAMBDAB_TO_LAMBDA1520, "--format", "json"]);
    assert!(output.status.success());
    let table = ParameterTable::from_json_slice(&output.stdout).expect("table");
    assert_eq!(table.len(), 6 + 14 * 3 + 16);
    let yaml = lbx(&["template", "--process", LAMBDAB_TO_LAMBDA1520]);
    assert!(yaml.status.success());
    let from_yaml =
        ParameterTable::from_yaml_str(&String::from_utf8(yaml.stdout).unwrap()).expect("yaml");
    assert_eq!(from_yaml, table);
}

#[test]
fn eval_prints_both_bases() {
    let dir = tempfile::tempdir().unwrap();
    let params = write_params(dir.path(), "params.yaml");
    let output = lbx(&[
        "eval",
        "--process",
        LAMBDAB_TO_LAMBDA1520,
        "--params",
        params.to_str().unwrap(),
        "--q2",
        "2.5",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["quark_model"]["form_factors"].as_object().unwrap().len(), 14);
    assert_eq!(value["equivalent"].as_object().unwrap().len(), 16);
    assert_eq!(value["equivalent"]["fTt"], 0.0);
}

#[test]
fn eval_quark_basis_does_not_need_uncertainties() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.json");
    let mut table = fixture_table();
    table.remove(&format!("{LAMBDAB_TO_LAMBDA1520} fT0 uncertainty"));
    fs::write(&path, serde_json::to_vec(&table).unwrap()).unwrap();

    let args = [
        "eval",
        "--process",
        LAMBDAB_TO_LAMBDA1520,
        "--params",
        path.to_str().unwrap(),
        "--q2",
        "1.0",
    ];
    let mut quark_args = args.to_vec();
    quark_args.extend(["--basis", "quark"]);
    let quark_only = lbx(&quark_args);
    assert!(quark_only.status.success());
    let value: Value = serde_json::from_slice(&quark_only.stdout).expect("json");
    assert!(value.get("equivalent").is_none());

    let both = lbx(&args);
    assert!(!both.status.success());
    let stderr = String::from_utf8_lossy(&both.stderr);
    assert!(stderr.contains("fT0 uncertainty"), "{stderr}");
}

#[test]
fn eval_rejects_unphysical_q2_unless_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let params = write_params(dir.path(), "params.json");
    let base = [
        "eval",
        "--process",
        LAMBDAB_TO_LAMBDA1520,
        "--params",
        params.to_str().unwrap(),
        "--q2",
        "-1.0",
    ];
    let rejected = lbx(&base);
    assert!(!rejected.status.success());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("lbx.unphysical_q2"));

    let mut allowed_args = base.to_vec();
    allowed_args.push("--allow-unphysical");
    let allowed = lbx(&allowed_args);
    assert!(allowed.status.success());
}

#[test]
fn unknown_process_fails() {
    let dir = tempfile::tempdir().unwrap();
    let params = write_params(dir.path(), "params.json");
    let output = lbx(&[
        "eval",
        "--process",
        "Lambdab->Lambda(1405)",
        "--params",
        params.to_str().unwrap(),
        "--q2",
        "1.0",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("lbx.unknown_process"));
}

#[test]
fn unknown_process_is_reported_before_reading_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let missing = missing.to_str().unwrap();
    let out = dir.path().to_str().unwrap();
    let process = "Lambdab->Lambda(1405)";
    for args in [
        vec!["eval", "--process", process, "--params", missing, "--q2", "1.0"],
        vec!["scan", "--process", process, "--params", missing, "--out", out],
    ] {
        let output = lbx(&args);
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("lbx.unknown_process"), "{}: {stderr}", args[0]);
    }
}

#[test]
fn default_scan_handles_tiny_mass_splitting() {
    let dir = tempfile::tempdir().unwrap();
    let params = dir.path().join("params.json");
    let mut table = fixture_table();
    table.insert("m_Lambda(1520)", 5.6);
    fs::write(&params, serde_json::to_vec(&table).unwrap()).unwrap();
    let out = dir.path().join("scan");
    let output = lbx(&[
        "scan",
        "--process",
        LAMBDAB_TO_LAMBDA1520,
        "--params",
        params.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--points",
        "3",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value =
        serde_json::from_slice(&fs::read(out.join("report.json")).unwrap()).expect("json");
    assert_eq!(report["grid"]["max"], 0.0);
}

#[test]
fn scan_writes_report_and_tables() {
    let dir = tempfile::tempdir().unwrap();
    let params = write_params(dir.path(), "params.yml");
    let out = dir.path().join("scan");
    let output = lbx(&[
        "scan",
        "--process",
        LAMBDAB_TO_LAMBDA1520,
        "--params",
        params.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--points",
        "5",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: Value =
        serde_json::from_slice(&fs::read(out.join("report.json")).unwrap()).expect("json");
    assert_eq!(report["points"].as_array().unwrap().len(), 5);
    assert_eq!(report["process"], LAMBDAB_TO_LAMBDA1520);

    let equiv = fs::read_to_string(out.join("equiv.csv")).unwrap();
    let mut lines = equiv.lines();
    assert!(lines.next().unwrap().starts_with("q2,fVt,fVperp"));
    assert_eq!(lines.count(), 5);
    let quark = fs::read_to_string(out.join("quark.csv")).unwrap();
    assert!(quark.lines().next().unwrap().ends_with("H5,H6"));
}
