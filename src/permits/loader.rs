use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use crate::error::PermitError;
use crate::permits::config::GroupingConfig;
use crate::permits::pipeline::{
    DateGroup, annotate, filter_by_neighborhood, group_by_date, parse_payload,
};
use crate::permits::source::DataSource;

/// Everything the renderer needs from one successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedView {
    pub filter: Option<String>,
    pub total_records: usize,
    pub matched_records: usize,
    pub groups: Vec<DateGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Ready(LoadedView),
    Failed(LoadFailure),
    /// The consumer went away; any fetched data was discarded.
    Disposed,
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
            Self::Disposed => "disposed",
        }
    }
}

/// Tells a pending load that nobody is listening any more.
#[derive(Debug, Clone, Default)]
pub struct DisposeHandle(Arc<AtomicBool>);

impl DisposeHandle {
    pub fn dispose(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run the whole pipeline over a fetched payload.
pub fn prepare(
    bytes: &[u8],
    target: Option<&str>,
    grouping: &GroupingConfig,
) -> Result<LoadedView, PermitError> {
    let raw = parse_payload(bytes)?;
    let total_records = raw.len();
    let matched = filter_by_neighborhood(annotate(&raw), target);
    let matched_records = matched.len();
    let groups = group_by_date(matched, &grouping.date_fields, grouping.order);
    Ok(LoadedView {
        filter: target.map(ToOwned::to_owned),
        total_records,
        matched_records,
        groups,
    })
}

/// Owns the load lifecycle: one fetch, then a single published snapshot.
#[derive(Debug)]
pub struct Loader {
    grouping: GroupingConfig,
    state: LoadState,
    disposed: DisposeHandle,
}

impl Loader {
    pub fn new(grouping: GroupingConfig) -> Self {
        Self {
            grouping,
            state: LoadState::Idle,
            disposed: DisposeHandle::default(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn dispose_handle(&self) -> DisposeHandle {
        self.disposed.clone()
    }

    /// Fetch and prepare the dataset. Only the first call does any work.
    ///
    /// Every call that starts from `Idle` ends in `Ready`, `Failed`, or
    /// `Disposed`; a disposal seen before or after the fetch publishes no data.
    pub fn load(&mut self, source: &dyn DataSource, target: Option<&str>) -> &LoadState {
        if !matches!(self.state, LoadState::Idle) {
            debug!(state = self.state.name(), "load already started; skipping");
            return &self.state;
        }
        if self.disposed.is_disposed() {
            debug!("loader disposed before start; skipping");
            self.state = LoadState::Disposed;
            return &self.state;
        }

        let source_desc = source.describe();
        self.state = LoadState::Loading;
        info!(source = %source_desc, filter = target.unwrap_or(""), "loading permits");

        let outcome = source
            .fetch()
            .and_then(|bytes| {
                debug!(source = %source_desc, bytes = bytes.len(), "fetch complete");
                prepare(&bytes, target, &self.grouping)
            });

        if self.disposed.is_disposed() {
            debug!(source = %source_desc, "loader disposed during fetch; dropping result");
            self.state = LoadState::Disposed;
            return &self.state;
        }

        self.state = match outcome {
            Ok(view) => {
                info!(
                    total = view.total_records,
                    matched = view.matched_records,
                    groups = view.groups.len(),
                    "permits ready"
                );
                LoadState::Ready(view)
            }
            Err(err) => {
                warn!(source = %source_desc, error = %err, "permit load failed");
                LoadState::Failed(LoadFailure {
                    source: source_desc,
                    message: err.to_string(),
                })
            }
        };
        &self.state
    }
}
