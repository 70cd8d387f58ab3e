mod common;

use common::{SCENARIO, viewer, write_dataset};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn neighborhoods_lists_identifiers_with_counts() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(tmp.path(), SCENARIO);

    viewer(tmp.path())
        .args(["neighborhoods", "--source"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("(none)\tno neighborhood\t1"))
        .stdout(predicate::str::contains("mission\tMission\t2"));
}

#[test]
fn neighborhoods_on_empty_dataset() {
    let tmp = tempdir().expect("tempdir");
    let data = write_dataset(tmp.path(), "[]");

    viewer(tmp.path())
        .args(["neighborhoods", "--source"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::diff("no results\n"));
}

#[test]
fn neighborhoods_reports_missing_file() {
    let tmp = tempdir().expect("tempdir");

    viewer(tmp.path())
        .args(["neighborhoods", "--source", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to load data"));
}
