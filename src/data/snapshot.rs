//! The published, read-only dashboard data.

use crate::data::index::{DerivedIndex, ResolvedClusterRegion};
use crate::data::model::{Cluster, RawDatasets};
use crate::data::source::SourceKind;

/// Raw datasets plus derived indices, as produced by one successful acquisition.
///
/// Shared as `Arc<DashboardData>`; nothing hands out mutable access.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    raw: RawDatasets,
    index: DerivedIndex,
    source: SourceKind,
}

impl DashboardData {
    /// Build the derived indices over `raw` and seal the result.
    pub fn new(raw: RawDatasets, source: SourceKind) -> Self {
        let index = DerivedIndex::build(&raw);
        Self { raw, index, source }
    }

    pub fn raw(&self) -> &RawDatasets {
        &self.raw
    }

    pub fn index(&self) -> &DerivedIndex {
        &self.index
    }

    /// Which source the datasets came from.
    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn resolve_cluster_region(&self, id: &str) -> Option<&ResolvedClusterRegion> {
        self.index.resolve_cluster_region(id)
    }

    pub fn base_cluster(&self, id: &str) -> Option<&Cluster> {
        self.index.base_cluster(id)
    }

    pub fn service_id_for_app(&self, app_id: &str) -> Option<&str> {
        self.index.service_id_for_app(app_id)
    }
}
