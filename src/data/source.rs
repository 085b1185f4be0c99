//! Primary and fallback source layouts.
//!
//! # Responsibilities
//! - Describe which resources each source serves and which datasets each yields
//! - Resolve resource paths against the configured base URLs
//!
//! # Design Decisions
//! - Request lists are resolved once, at session construction
//! - The two sources group datasets differently (the static tree splits
//!   `currentRunning` into its own file); both cover all fourteen datasets

use url::Url;

use crate::config::SourceConfig;
use crate::data::model::DatasetKey;

/// Which origin a load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// API gateway.
    Primary,
    /// Static JSON tree.
    Fallback,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Primary => "primary",
            SourceKind::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetchable document and the datasets it carries.
#[derive(Debug, PartialEq, Eq)]
pub struct Resource {
    /// Path relative to the source base.
    pub path: &'static str,
    pub datasets: &'static [DatasetKey],
}

/// `GET {api_base}/v1/qcd/{resource}`.
pub static API_RESOURCES: [Resource; 9] = [
    Resource {
        path: "v1/qcd/clusters",
        datasets: &[
            DatasetKey::Clusters,
            DatasetKey::ClusterRegions,
            DatasetKey::ClusterRegionRoles,
            DatasetKey::CurrentRunning,
        ],
    },
    Resource {
        path: "v1/qcd/services",
        datasets: &[DatasetKey::Services],
    },
    Resource {
        path: "v1/qcd/deployments",
        datasets: &[DatasetKey::DeploymentAttempts],
    },
    Resource {
        path: "v1/qcd/test-runs",
        datasets: &[DatasetKey::TestRuns],
    },
    Resource {
        path: "v1/qcd/cluster-test-runs",
        datasets: &[DatasetKey::ClusterTestRuns],
    },
    Resource {
        path: "v1/qcd/promotions",
        datasets: &[DatasetKey::Promotions],
    },
    Resource {
        path: "v1/qcd/jira-tickets",
        datasets: &[DatasetKey::JiraTickets],
    },
    Resource {
        path: "v1/qcd/scorecards",
        datasets: &[DatasetKey::ScorecardWeights, DatasetKey::Scorecards],
    },
    Resource {
        path: "v1/qcd/metadata",
        datasets: &[DatasetKey::SuiteMeta, DatasetKey::StatusMeta],
    },
];

/// `{static_base}/{group}/{file}.json`.
pub static STATIC_RESOURCES: [Resource; 10] = [
    Resource {
        path: "service-health/clusters.json",
        datasets: &[
            DatasetKey::Clusters,
            DatasetKey::ClusterRegions,
            DatasetKey::ClusterRegionRoles,
        ],
    },
    Resource {
        path: "service-health/services.json",
        datasets: &[DatasetKey::Services],
    },
    Resource {
        path: "service-health/current-running.json",
        datasets: &[DatasetKey::CurrentRunning],
    },
    Resource {
        path: "service-health/deployments.json",
        datasets: &[DatasetKey::DeploymentAttempts],
    },
    Resource {
        path: "service-health/test-runs.json",
        datasets: &[DatasetKey::TestRuns],
    },
    Resource {
        path: "service-health/cluster-test-runs.json",
        datasets: &[DatasetKey::ClusterTestRuns],
    },
    Resource {
        path: "service-health/promotions.json",
        datasets: &[DatasetKey::Promotions],
    },
    Resource {
        path: "version-compare/jira-tickets.json",
        datasets: &[DatasetKey::JiraTickets],
    },
    Resource {
        path: "scorecard/scorecards.json",
        datasets: &[DatasetKey::ScorecardWeights, DatasetKey::Scorecards],
    },
    Resource {
        path: "common/metadata.json",
        datasets: &[DatasetKey::SuiteMeta, DatasetKey::StatusMeta],
    },
];

/// A single resolved load.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub source: SourceKind,
    pub resource: &'static Resource,
    pub url: Url,
}

/// A source with every request resolved.
#[derive(Debug, Clone)]
pub struct Source {
    kind: SourceKind,
    requests: Vec<LoadRequest>,
}

impl Source {
    /// Resolve `resources` against `base` (which must end in `/`).
    pub fn new(
        kind: SourceKind,
        base: &Url,
        resources: &'static [Resource],
    ) -> Result<Self, url::ParseError> {
        let requests = resources
            .iter()
            .map(|resource| {
                base.join(resource.path).map(|url| LoadRequest {
                    source: kind,
                    resource,
                    url,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { kind, requests })
    }

    /// The API gateway source.
    pub fn primary(config: &SourceConfig) -> Result<Self, url::ParseError> {
        Self::new(SourceKind::Primary, &config.api_base_url()?, &API_RESOURCES)
    }

    /// The static-file source.
    pub fn fallback(config: &SourceConfig) -> Result<Self, url::ParseError> {
        Self::new(SourceKind::Fallback, &config.static_base_url()?, &STATIC_RESOURCES)
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn requests(&self) -> &[LoadRequest] {
        &self.requests
    }
}
