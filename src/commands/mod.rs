pub mod list;
pub mod neighborhoods;
pub mod status;

use anyhow::Result;
use serde::Serialize;

use crate::permits::config::PermitsConfig;
use crate::permits::loader::{LoadState, Loader};
use crate::permits::source::source_for;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
            data: None,
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    pub fn attach(&mut self, data: &impl Serialize) -> Result<()> {
        self.data = Some(serde_json::to_value(data)?);
        Ok(())
    }
}

/// Resolve the dataset location: an explicit `--source` beats config.
pub fn resolve_location(cfg: &PermitsConfig, source_override: Option<&str>) -> String {
    match source_override.map(str::trim) {
        Some(loc) if !loc.is_empty() => loc.to_string(),
        _ => cfg.source.location(),
    }
}

/// Drive one load to its terminal state.
pub fn load_once(cfg: &PermitsConfig, location: &str, target: Option<&str>) -> LoadState {
    let source = source_for(location, cfg.source.timeout_secs);
    let mut loader = Loader::new(cfg.grouping.clone());
    loader.load(source.as_ref(), target).clone()
}
