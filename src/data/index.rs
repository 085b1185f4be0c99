//! Derived cross-reference indices.
//!
//! # Relations
//! ```text
//! ClusterRegion.base_id ──▶ Cluster.id            (display name, type, description)
//! ClusterRegion.base_id ──▶ clusterRegionRoles[]  (active / hot-standby region)
//! Service.app_id        ──▶ Service.id            (external app id → service id)
//! ```
//!
//! # Design Decisions
//! - Built once from `RawDatasets`; deterministic and never mutates its input
//! - Every lookup is a map access returning `Option`
//! - On duplicate region or cluster ids the first record wins (scan order);
//!   on duplicate app ids the last service wins

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::data::model::{Cluster, ClusterRegion, RawDatasets, RegionRoles};

/// Role of a region within its base cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionRole {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Hot-standby")]
    HotStandby,
    #[serde(rename = "—")]
    Unassigned,
}

impl RegionRole {
    fn classify(region: &str, roles: Option<&RegionRoles>) -> Self {
        if region.is_empty() {
            return RegionRole::Unassigned;
        }
        match roles {
            Some(r) if r.active.as_deref() == Some(region) => RegionRole::Active,
            Some(r) if r.hot_standby.as_deref() == Some(region) => RegionRole::HotStandby,
            _ => RegionRole::Unassigned,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionRole::Active => "Active",
            RegionRole::HotStandby => "Hot-standby",
            RegionRole::Unassigned => "—",
        }
    }
}

impl fmt::Display for RegionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cluster region joined with its base cluster and role assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedClusterRegion {
    pub id: String,
    pub base_id: String,
    pub region: String,
    /// `{base cluster name or base id}-{region}`.
    pub name: String,
    /// Base cluster type, `—` when unknown.
    #[serde(rename = "type")]
    pub kind: String,
    /// Base cluster description, empty when unknown.
    pub description: String,
    pub role: RegionRole,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ResolvedClusterRegion {
    fn join(region: &ClusterRegion, base: Option<&Cluster>, roles: Option<&RegionRoles>) -> Self {
        let base_name = base
            .and_then(|c| non_empty(&c.name))
            .unwrap_or(region.base_id.as_str());

        Self {
            id: region.id.clone(),
            base_id: region.base_id.clone(),
            region: region.region.clone(),
            name: format!("{}-{}", base_name, region.region),
            kind: base
                .and_then(|c| non_empty(&c.kind))
                .unwrap_or("—")
                .to_string(),
            description: base
                .and_then(|c| non_empty(&c.description))
                .unwrap_or_default()
                .to_string(),
            role: RegionRole::classify(&region.region, roles),
            extra: region.extra.clone(),
        }
    }
}

/// Lookup structures computed from the raw datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedIndex {
    clusters: HashMap<String, Cluster>,
    cluster_regions: HashMap<String, ResolvedClusterRegion>,
    app_id_to_service_id: HashMap<String, String>,
}

impl DerivedIndex {
    /// Build every index from `raw`.
    pub fn build(raw: &RawDatasets) -> Self {
        let mut clusters: HashMap<String, Cluster> = HashMap::with_capacity(raw.clusters.len());
        for cluster in raw.clusters.iter().filter(|c| !c.id.is_empty()) {
            clusters
                .entry(cluster.id.clone())
                .or_insert_with(|| cluster.clone());
        }

        let mut cluster_regions = HashMap::with_capacity(raw.cluster_regions.len());
        for region in raw.cluster_regions.iter().filter(|r| !r.id.is_empty()) {
            if cluster_regions.contains_key(&region.id) {
                continue;
            }
            let resolved = ResolvedClusterRegion::join(
                region,
                clusters.get(&region.base_id),
                raw.roles_for(&region.base_id),
            );
            cluster_regions.insert(region.id.clone(), resolved);
        }

        let mut app_id_to_service_id = HashMap::new();
        for service in &raw.services {
            let Some(app_id) = non_empty(&service.app_id) else {
                continue;
            };
            if let Some(previous) = app_id_to_service_id.insert(app_id.to_string(), service.id.clone()) {
                tracing::warn!(
                    app_id = %app_id,
                    previous = %previous,
                    service = %service.id,
                    "Application id declared by more than one service, keeping the last"
                );
            }
        }

        tracing::debug!(
            clusters = clusters.len(),
            cluster_regions = cluster_regions.len(),
            app_ids = app_id_to_service_id.len(),
            "Derived indices built"
        );

        Self {
            clusters,
            cluster_regions,
            app_id_to_service_id,
        }
    }

    /// Resolve a cluster region by id. `None` if no such region exists.
    pub fn resolve_cluster_region(&self, id: &str) -> Option<&ResolvedClusterRegion> {
        self.cluster_regions.get(id)
    }

    /// Base cluster by id.
    pub fn base_cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters.get(id)
    }

    /// Internal service id for an external application id.
    pub fn service_id_for_app(&self, app_id: &str) -> Option<&str> {
        self.app_id_to_service_id.get(app_id).map(String::as_str)
    }

    pub fn app_id_to_service_id(&self) -> &HashMap<String, String> {
        &self.app_id_to_service_id
    }
}
