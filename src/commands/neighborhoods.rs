use anyhow::Result;

use crate::commands::{CommandReport, load_once, resolve_location};
use crate::permits::config::load_config;
use crate::permits::loader::LoadState;
use crate::permits::pipeline::neighborhood_index;
use crate::permits::record::AnnotatedRecord;

#[derive(Debug, Clone, Default)]
pub struct NeighborhoodsOptions {
    pub source: Option<String>,
}

pub fn run(opts: &NeighborhoodsOptions) -> Result<CommandReport> {
    let cfg = load_config()?;
    let mut report = CommandReport::new("neighborhoods");
    let location = resolve_location(&cfg, opts.source.as_deref());

    let view = match load_once(&cfg, &location, None) {
        LoadState::Ready(view) => view,
        LoadState::Failed(failure) => {
            report.issue(format!("unable to load data: {}", failure.message));
            return Ok(report);
        }
        other => {
            report.issue(format!("load did not finish (state={})", other.name()));
            return Ok(report);
        }
    };

    let records: Vec<AnnotatedRecord> = view
        .groups
        .into_iter()
        .flat_map(|group| group.records)
        .collect();
    let index = neighborhood_index(&records);

    if index.is_empty() {
        report.detail("no results");
    }
    for entry in &index {
        let nhid = if entry.nhid.is_empty() { "(none)" } else { entry.nhid.as_str() };
        let label = entry.label.as_deref().unwrap_or("no neighborhood");
        report.detail(format!("{nhid}\t{label}\t{}", entry.count));
    }
    report.attach(&index)?;

    Ok(report)
}
