use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("covid-charts").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("covid-charts"));
}

#[test]
fn config_prints_default_toml() {
    let mut cmd = Command::cargo_bin("covid-charts").unwrap();
    cmd.arg("config");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("start_day = 60"))
        .stdout(predicate::str::contains("[countries.y_tick_steps]"));
}

#[test]
fn countries_lists_dataset_rows() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("confirmed.csv");
    fs::write(
        &csv,
        "Country/Region,1/22/20,1/23/20\nItaly,0,1\n\"Korea, South\",1,1\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("covid-charts").unwrap();
    cmd.arg("countries").arg(&csv);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Italy\nKorea, South\n"));
}

#[test]
fn plot_with_everything_disabled_reports_skips() {
    let dir = tempdir().unwrap();
    let table = "Country/Region,1/22/20,1/23/20\nItaly,0,1\n";
    let inf = dir.path().join("confirmed.csv");
    let dea = dir.path().join("deaths.csv");
    let cfg = dir.path().join("charts.toml");
    fs::write(&inf, table).unwrap();
    fs::write(&dea, table).unwrap();
    fs::write(&cfg, "[plot.enabled]\ninfections = false\ndeaths = false\n").unwrap();

    let mut cmd = Command::cargo_bin("covid-charts").unwrap();
    cmd.current_dir(dir.path())
        .args(["plot", "--json", "--config"])
        .arg(&cfg)
        .arg("--infections")
        .arg(&inf)
        .arg("--deaths")
        .arg(&dea);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert!(arr.iter().all(|r| r["result"]["status"] == "skipped"));
}

#[test]
fn plot_rejects_missing_dataset() {
    let mut cmd = Command::cargo_bin("covid-charts").unwrap();
    cmd.args([
        "plot",
        "--infections",
        "/no/such/confirmed.csv",
        "--deaths",
        "/no/such/deaths.csv",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/confirmed.csv"));
}
