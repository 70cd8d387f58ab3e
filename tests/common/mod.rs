use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub const SCENARIO: &str = r#"[
  {"permit_number": "P-1", "neighborhood": "Mission", "date": "2020-01-01", "address": "10 Valencia St"},
  {"permit_number": "P-2", "neighborhood": "Mission", "date": "2020-01-01", "address": "20 Valencia St"},
  {"permit_number": "P-3", "neighborhood": null, "date": "2020-01-02"}
]"#;

pub fn write_dataset(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("data.json");
    fs::write(&path, body).expect("write dataset");
    path
}

/// A command isolated from the caller's config, dotenv, and PERMITS_* env.
pub fn viewer(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("permit-viewer");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("PERMITS_HOME", dir)
        .env("PERMITS_CONFIG_PATH", dir.join("permits.toml"))
        .env_remove("PERMITS_BASE_URL")
        .env_remove("PERMITS_DATA_PATH")
        .env_remove("PERMITS_TIMEOUT_SECS")
        .env_remove("PERMITS_DATE_FIELDS")
        .env_remove("PERMITS_GROUP_ORDER")
        .env_remove("RUST_LOG");
    cmd
}
