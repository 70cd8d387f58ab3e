use anyhow::Result;

use crate::commands::{CommandReport, load_once, resolve_location};
use crate::permits::config::load_config;
use crate::permits::loader::LoadState;
use crate::permits::render::view_lines;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub nhid: Option<String>,
    pub source: Option<String>,
}

pub fn run(opts: &ListOptions) -> Result<CommandReport> {
    let cfg = load_config()?;
    let mut report = CommandReport::new("list");
    let location = resolve_location(&cfg, opts.source.as_deref());
    let target = opts.nhid.as_deref().map(str::trim).filter(|t| !t.is_empty());

    match load_once(&cfg, &location, target) {
        LoadState::Ready(view) => {
            for line in view_lines(&view) {
                report.detail(line);
            }
            report.attach(&view)?;
        }
        LoadState::Failed(failure) => {
            report.issue(format!("unable to load data: {}", failure.message));
        }
        other => {
            report.issue(format!("load did not finish (state={})", other.name()));
        }
    }

    Ok(report)
}
