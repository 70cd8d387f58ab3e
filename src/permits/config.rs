use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::PermitError;
use crate::permits::pipeline::GroupOrder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub data_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            data_path: "/data.json".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    /// Where the dataset lives when no `--source` override is given.
    pub fn location(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.data_path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    pub date_fields: Vec<String>,
    #[serde(default)]
    pub order: GroupOrder,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            date_fields: vec!["date".to_string()],
            order: GroupOrder::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PermitsConfig {
    pub source: SourceConfig,
    pub grouping: GroupingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialPermitsConfig {
    source: Option<SourceConfig>,
    grouping: Option<GroupingConfig>,
}

fn env_or_u64(lookup: &dyn Fn(&str) -> Option<String>, var: &str, fallback: u64) -> u64 {
    match lookup(var) {
        Some(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        None => fallback,
    }
}

fn env_or_string(lookup: &dyn Fn(&str) -> Option<String>, var: &str, fallback: &str) -> String {
    match lookup(var) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_csv(
    lookup: &dyn Fn(&str) -> Option<String>,
    var: &str,
    fallback: &[String],
) -> Vec<String> {
    match lookup(var) {
        Some(v) => {
            let out = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>();
            if out.is_empty() {
                fallback.to_vec()
            } else {
                out
            }
        }
        None => fallback.to_vec(),
    }
}

fn validate(cfg: &PermitsConfig) -> Result<(), PermitError> {
    let base = cfg.source.base_url.trim();
    if base.is_empty() {
        return Err(PermitError::InvalidConfig(
            "source.base_url cannot be empty".to_string(),
        ));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(PermitError::InvalidConfig(format!(
            "source.base_url must start with http:// or https://, got `{base}`"
        )));
    }
    if cfg.source.data_path.trim().is_empty() {
        return Err(PermitError::InvalidConfig(
            "source.data_path cannot be empty".to_string(),
        ));
    }
    if cfg.source.timeout_secs == 0 {
        return Err(PermitError::InvalidConfig(
            "source.timeout_secs must be >= 1".to_string(),
        ));
    }
    if cfg.grouping.date_fields.iter().all(|f| f.trim().is_empty()) {
        return Err(PermitError::InvalidConfig(
            "grouping.date_fields needs at least one field name".to_string(),
        ));
    }
    Ok(())
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("PERMITS_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let home = dirs::home_dir()?;
    Some(home.join(".permits").join("permits.toml"))
}

fn merge_toml(base: &mut PermitsConfig, raw: &str) -> Result<(), PermitError> {
    let parsed: PartialPermitsConfig =
        toml::from_str(raw).map_err(|err| PermitError::InvalidConfig(err.to_string()))?;
    if let Some(source) = parsed.source {
        base.source = source;
    }
    if let Some(grouping) = parsed.grouping {
        base.grouping = grouping;
    }
    Ok(())
}

fn apply_env_overrides(cfg: &mut PermitsConfig, lookup: &dyn Fn(&str) -> Option<String>) {
    cfg.source.base_url = env_or_string(lookup, "PERMITS_BASE_URL", &cfg.source.base_url);
    cfg.source.data_path = env_or_string(lookup, "PERMITS_DATA_PATH", &cfg.source.data_path);
    cfg.source.timeout_secs = env_or_u64(lookup, "PERMITS_TIMEOUT_SECS", cfg.source.timeout_secs);
    cfg.grouping.date_fields =
        env_or_csv(lookup, "PERMITS_DATE_FIELDS", &cfg.grouping.date_fields);
    if let Some(order) = lookup("PERMITS_GROUP_ORDER").and_then(|v| GroupOrder::parse(&v)) {
        cfg.grouping.order = order;
    }
}

pub fn load_config() -> Result<PermitsConfig> {
    let mut cfg = PermitsConfig::default();

    if let Some(path) = resolve_config_path()
        && path.exists()
    {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        merge_toml(&mut cfg, &raw)
            .with_context(|| format!("failed to parse permits config {}", path.display()))?;
    }

    apply_env_overrides(&mut cfg, &|var: &str| env::var(var).ok());
    validate(&cfg)?;
    Ok(cfg)
}
