//! Raw dataset records.
//!
//! Records the index builder joins on are typed; everything else is kept as
//! JSON for the renderers. Unknown fields are preserved in `extra`.
//!
//! Record fields are lenient: a missing or oddly typed field decodes to an
//! empty value instead of failing the record. Only a dataset of the wrong
//! shape (e.g. `services` that is not an array) is a decode error.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The fourteen named datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatasetKey {
    Clusters,
    ClusterRegions,
    ClusterRegionRoles,
    Services,
    CurrentRunning,
    DeploymentAttempts,
    TestRuns,
    ClusterTestRuns,
    Promotions,
    JiraTickets,
    ScorecardWeights,
    Scorecards,
    SuiteMeta,
    StatusMeta,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 14] = [
        DatasetKey::Clusters,
        DatasetKey::ClusterRegions,
        DatasetKey::ClusterRegionRoles,
        DatasetKey::Services,
        DatasetKey::CurrentRunning,
        DatasetKey::DeploymentAttempts,
        DatasetKey::TestRuns,
        DatasetKey::ClusterTestRuns,
        DatasetKey::Promotions,
        DatasetKey::JiraTickets,
        DatasetKey::ScorecardWeights,
        DatasetKey::Scorecards,
        DatasetKey::SuiteMeta,
        DatasetKey::StatusMeta,
    ];

    /// Field name of this dataset inside a payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKey::Clusters => "clusters",
            DatasetKey::ClusterRegions => "clusterRegions",
            DatasetKey::ClusterRegionRoles => "clusterRegionRoles",
            DatasetKey::Services => "services",
            DatasetKey::CurrentRunning => "currentRunning",
            DatasetKey::DeploymentAttempts => "deploymentAttempts",
            DatasetKey::TestRuns => "testRuns",
            DatasetKey::ClusterTestRuns => "clusterTestRuns",
            DatasetKey::Promotions => "promotions",
            DatasetKey::JiraTickets => "jiraTickets",
            DatasetKey::ScorecardWeights => "scorecardWeights",
            DatasetKey::Scorecards => "scorecards",
            DatasetKey::SuiteMeta => "suiteMeta",
            DatasetKey::StatusMeta => "statusMeta",
        }
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A base cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One regional deployment of a base cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRegion {
    #[serde(default)]
    pub id: String,
    /// Foreign key into `clusters` and `clusterRegionRoles`.
    #[serde(default)]
    pub base_id: String,
    #[serde(default)]
    pub region: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which region of a base cluster is active and which is on hot standby.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRoles {
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub hot_standby: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A deployable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: String,
    /// External application identifier, if the service declares one.
    /// Numeric ids are kept in their decimal form.
    #[serde(default, deserialize_with = "lenient_app_id")]
    pub app_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Every dataset as loaded, before any derived fields.
///
/// Field names match the payload keys, so a payload object (or any subset of
/// one) deserializes directly. Missing datasets default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDatasets {
    pub clusters: Vec<Cluster>,
    pub cluster_regions: Vec<ClusterRegion>,
    /// Keyed by base-cluster id. A `null` entry assigns no roles.
    pub cluster_region_roles: BTreeMap<String, Option<RegionRoles>>,
    pub services: Vec<Service>,
    pub current_running: Map<String, Value>,
    pub deployment_attempts: Vec<Value>,
    pub test_runs: Vec<Value>,
    pub cluster_test_runs: Vec<Value>,
    pub promotions: Vec<Value>,
    pub jira_tickets: Map<String, Value>,
    pub scorecard_weights: Map<String, Value>,
    pub scorecards: Map<String, Value>,
    pub suite_meta: Map<String, Value>,
    pub status_meta: Map<String, Value>,
}

fn lenient_app_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let app_id = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    Ok(app_id)
}

impl RawDatasets {
    /// Roles assigned to the regions of `base_id`, if any.
    pub fn roles_for(&self, base_id: &str) -> Option<&RegionRoles> {
        self.cluster_region_roles.get(base_id).and_then(Option::as_ref)
    }

    /// Decode the datasets named by `keys` out of one payload object.
    ///
    /// Keys absent from the payload, or set to `null`, stay empty.
    pub fn from_payload(payload: Value, keys: &[DatasetKey]) -> Result<Self, serde_json::Error> {
        let mut fields = match payload {
            Value::Object(fields) => fields,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected a JSON object, found {}",
                    json_type(&other)
                )));
            }
        };

        let mut subset = Map::new();
        for key in keys {
            match fields.remove(key.as_str()) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    subset.insert(key.as_str().to_string(), value);
                }
            }
        }
        serde_json::from_value(Value::Object(subset))
    }

    /// Move the datasets named by `keys` out of `other` into `self`.
    pub fn absorb(&mut self, other: &mut RawDatasets, keys: &[DatasetKey]) {
        use std::mem::take;
        for key in keys {
            match key {
                DatasetKey::Clusters => self.clusters = take(&mut other.clusters),
                DatasetKey::ClusterRegions => self.cluster_regions = take(&mut other.cluster_regions),
                DatasetKey::ClusterRegionRoles => {
                    self.cluster_region_roles = take(&mut other.cluster_region_roles)
                }
                DatasetKey::Services => self.services = take(&mut other.services),
                DatasetKey::CurrentRunning => self.current_running = take(&mut other.current_running),
                DatasetKey::DeploymentAttempts => {
                    self.deployment_attempts = take(&mut other.deployment_attempts)
                }
                DatasetKey::TestRuns => self.test_runs = take(&mut other.test_runs),
                DatasetKey::ClusterTestRuns => {
                    self.cluster_test_runs = take(&mut other.cluster_test_runs)
                }
                DatasetKey::Promotions => self.promotions = take(&mut other.promotions),
                DatasetKey::JiraTickets => self.jira_tickets = take(&mut other.jira_tickets),
                DatasetKey::ScorecardWeights => {
                    self.scorecard_weights = take(&mut other.scorecard_weights)
                }
                DatasetKey::Scorecards => self.scorecards = take(&mut other.scorecards),
                DatasetKey::SuiteMeta => self.suite_meta = take(&mut other.suite_meta),
                DatasetKey::StatusMeta => self.status_meta = take(&mut other.status_meta),
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
