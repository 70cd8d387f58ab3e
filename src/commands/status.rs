use anyhow::Result;
use std::env;

use crate::commands::{CommandReport, resolve_location};
use crate::permits::config::{load_config, resolve_config_path};
use crate::permits::source::is_http_location;

include!(concat!(env!("OUT_DIR"), "/permits_env_keys.rs"));

fn set_env_keys(lookup: impl Fn(&str) -> bool) -> Vec<&'static str> {
    GENERATED_PERMITS_ENV_KEYS
        .iter()
        .copied()
        .filter(|key| lookup(key))
        .collect()
}

pub fn run(source_override: Option<&str>) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");
    report.detail(format!("version={}", env!("CARGO_PKG_VERSION")));

    match resolve_config_path() {
        Some(path) => report.detail(format!(
            "config_path={} (exists={})",
            path.display(),
            path.exists()
        )),
        None => report.detail("config_path=unresolved"),
    }

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            report.issue(format!("config invalid: {err:#}"));
            return Ok(report);
        }
    };

    let location = resolve_location(&cfg, source_override);
    let kind = if is_http_location(&location) { "http" } else { "file" };
    report.detail(format!("source={location} ({kind})"));
    report.detail(format!("timeout_secs={}", cfg.source.timeout_secs));
    report.detail(format!("date_fields={}", cfg.grouping.date_fields.join(",")));
    report.detail(format!("group_order={}", cfg.grouping.order.as_str()));

    let set = set_env_keys(|key| env::var_os(key).is_some());
    if set.is_empty() {
        report.detail("env_overrides=none");
    } else {
        report.detail(format!("env_overrides={}", set.join(",")));
    }
    report.attach(&cfg)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_cover_config_overrides() {
        for key in ["PERMITS_BASE_URL", "PERMITS_CONFIG_PATH", "PERMITS_GROUP_ORDER"] {
            assert!(GENERATED_PERMITS_ENV_KEYS.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn set_env_keys_filters_by_lookup() {
        let got = set_env_keys(|key| key == "PERMITS_BASE_URL");
        assert_eq!(got, vec!["PERMITS_BASE_URL"]);
    }
}
