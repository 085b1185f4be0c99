//! Acquisition orchestration.
//!
//! # Sequence
//! ```text
//! ready() ─┬─ first caller runs acquire(); concurrent callers await the same attempt
//!          └─ later callers get the stored outcome
//!
//! acquire():
//!     primary phase: every API resource at once, wait for all
//!         all ok      → RawDatasets (source = primary)
//!         any failure → drop every primary result
//!             fallback phase: every static file at once, wait for all
//!                 all ok      → RawDatasets (source = fallback)
//!                 any failure → AcquisitionError (terminal)
//!     → DerivedIndex::build (once)
//!     → publish Arc<DashboardData>
//! ```
//!
//! # Design Decisions
//! - No per-dataset fallback: datasets reference each other, so a snapshot
//!   always comes from exactly one source
//! - The outcome, including failure, is stored once and never reset

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config::SourceConfig;
use crate::data::loader::{LoadError, Loader};
use crate::data::model::RawDatasets;
use crate::data::snapshot::DashboardData;
use crate::data::source::{LoadRequest, Source, SourceKind};
use crate::observability::metrics;

/// Both sources failed; no data was published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "dashboard data unavailable: {} primary load(s) failed (first: {}), {} fallback load(s) failed (first: {})",
    .primary.len(),
    first(.primary),
    .fallback.len(),
    first(.fallback)
)]
pub struct AcquisitionError {
    pub primary: Vec<LoadError>,
    pub fallback: Vec<LoadError>,
}

fn first(errors: &[LoadError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

/// Owner of the dashboard data: loads it once, then hands out read-only views.
pub struct DataSession<L> {
    loader: L,
    primary: Source,
    fallback: Source,
    outcome: OnceCell<Result<Arc<DashboardData>, AcquisitionError>>,
}

impl<L: Loader> DataSession<L> {
    pub fn new(loader: L, primary: Source, fallback: Source) -> Self {
        Self {
            loader,
            primary,
            fallback,
            outcome: OnceCell::new(),
        }
    }

    /// Session over the sources described by `config`.
    pub fn from_config(loader: L, config: &SourceConfig) -> Result<Self, url::ParseError> {
        Ok(Self::new(
            loader,
            Source::primary(config)?,
            Source::fallback(config)?,
        ))
    }

    /// Load everything once. Every call returns the outcome of that one attempt.
    pub async fn ready(&self) -> Result<Arc<DashboardData>, AcquisitionError> {
        self.outcome.get_or_init(|| self.acquire()).await.clone()
    }

    /// The data, if a previous `ready()` succeeded.
    pub fn get(&self) -> Option<Arc<DashboardData>> {
        match self.outcome.get() {
            Some(Ok(data)) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.outcome.get(), Some(Ok(_)))
    }

    async fn acquire(&self) -> Result<Arc<DashboardData>, AcquisitionError> {
        let started = Instant::now();

        let (raw, source) = match self.load_phase(&self.primary).await {
            Ok(raw) => (raw, SourceKind::Primary),
            Err(primary) => {
                tracing::warn!(
                    failed = primary.len(),
                    error = %first(&primary),
                    "API not available, falling back to static JSON"
                );
                metrics::record_fallback();

                match self.load_phase(&self.fallback).await {
                    Ok(raw) => (raw, SourceKind::Fallback),
                    Err(fallback) => {
                        let err = AcquisitionError { primary, fallback };
                        tracing::error!(error = %err, "Dashboard data acquisition failed");
                        metrics::record_acquisition("failed");
                        return Err(err);
                    }
                }
            }
        };

        let data = DashboardData::new(raw, source);
        tracing::info!(
            source = %source,
            clusters = data.raw().clusters.len(),
            services = data.raw().services.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dashboard data loaded"
        );
        metrics::record_acquisition(source.as_str());
        Ok(Arc::new(data))
    }

    /// Run every load of `source` concurrently and wait for all of them.
    async fn load_phase(&self, source: &Source) -> Result<RawDatasets, Vec<LoadError>> {
        tracing::debug!(source = %source.kind(), loads = source.requests().len(), "Starting load phase");

        let results = join_all(source.requests().iter().map(|r| self.load_one(r))).await;

        let mut raw = RawDatasets::default();
        let mut errors = Vec::new();
        for (request, result) in source.requests().iter().zip(results) {
            match result {
                Ok(mut part) => raw.absorb(&mut part, request.resource.datasets),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(raw)
        } else {
            Err(errors)
        }
    }

    async fn load_one(&self, request: &LoadRequest) -> Result<RawDatasets, LoadError> {
        let started = Instant::now();
        let result = self.loader.load(request).await.and_then(|payload| {
            RawDatasets::from_payload(payload, request.resource.datasets).map_err(|e| {
                LoadError::transport(request.url.as_str(), format!("malformed payload: {e}"))
            })
        });

        metrics::record_source_load(request.source, result.is_ok(), started.elapsed());
        match &result {
            Ok(_) => tracing::debug!(url = %request.url, "Loaded"),
            Err(e) => tracing::debug!(error = %e, "Load failed"),
        }
        result
    }
}

impl<L> std::fmt::Debug for DataSession<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSession")
            .field("primary", &self.primary.kind())
            .field("fallback", &self.fallback.kind())
            .field("initialized", &self.outcome.initialized())
            .finish()
    }
}
