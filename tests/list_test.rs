mod common;

use common::{SCENARIO, viewer, write_dataset};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn list_groups_all_permits_newest_first() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(tmp.path(), SCENARIO);

    let out = viewer(tmp.path())
        .args(["list", "--source"])
        .arg(&data)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "2020-01-02 (1)",
            "  - #P-3 [no neighborhood]",
            "2020-01-01 (2)",
            "  - #P-1 [Mission] 10 Valencia St",
            "  - #P-2 [Mission] 20 Valencia St",
        ]
    );
}

#[test]
fn list_filters_by_positional_nhid() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(tmp.path(), SCENARIO);

    viewer(tmp.path())
        .args(["list", "mission", "--source"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("2020-01-01 (2)"))
        .stdout(predicate::str::contains("2020-01-02").not());
}

#[test]
fn list_json_carries_nhid_and_groups() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(tmp.path(), SCENARIO);

    let out = viewer(tmp.path())
        .args(["list", "--nhid", "mission", "--json", "--source"])
        .arg(&data)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&out).expect("json report");
    assert_eq!(report["ok"], true);
    let groups = report["data"]["groups"].as_array().expect("groups");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["date"], "2020-01-01");
    let records = groups[0]["records"].as_array().expect("records");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["nhid"] == "mission"));
    assert_eq!(report["data"]["total_records"], 3);
    assert_eq!(report["data"]["matched_records"], 2);
}

#[test]
fn unknown_neighborhood_is_an_empty_success() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(tmp.path(), SCENARIO);

    viewer(tmp.path())
        .args(["list", "nonexistent", "--source"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::diff("no results\n"));
}

#[test]
fn unreachable_source_fails_visibly() {
    let tmp = tempdir().expect("tempdir");

    viewer(tmp.path())
        .args(["list", "--source", "http://127.0.0.1:9/data.json"])
        .env("PERMITS_TIMEOUT_SECS", "2")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unable to load data"));
}

#[test]
fn malformed_payload_fails_visibly() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(tmp.path(), "{\"permits\": []}");

    viewer(tmp.path())
        .args(["list", "--source"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON array"));
}

#[test]
fn config_file_controls_date_fields_and_order() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(
        tmp.path(),
        r#"[
          {"neighborhood": "Mission", "filed_date": "2021-03-04T09:00:00"},
          {"neighborhood": "Mission", "filed_date": "2021-03-01"},
          {"neighborhood": "Mission"}
        ]"#,
    );
    std::fs::write(
        tmp.path().join("permits.toml"),
        "[grouping]\ndate_fields = [\"filed_date\"]\norder = \"oldest-first\"\n",
    )
    .expect("write config");

    let out = viewer(tmp.path())
        .args(["list", "--source"])
        .arg(&data)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).expect("utf8");
    let headers: Vec<&str> = text.lines().filter(|l| !l.starts_with("  ")).collect();
    assert_eq!(headers, vec!["2021-03-01 (1)", "2021-03-04 (1)", "unknown date (1)"]);
}
