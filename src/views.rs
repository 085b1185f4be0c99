//! Dashboard views and their routes.
//!
//! # Routes (precedence order)
//! ```text
//! #  | #/                          → Overview
//! #/clusters/{id}[/][?query]       → Cluster
//! #/services/{id}[/]               → Service
//! #/builds/{attemptId}[/]          → Build
//! #/analytics[/]                   → Analytics
//! #/reliability[/]                 → Reliability
//! #/scorecard[/]                   → Scorecard
//! #/versions[/]                    → Versions
//! ```
//!
//! Page rendering itself lives behind [`ViewRenderer`].

use std::sync::Arc;

use thiserror::Error;

use crate::data::{AcquisitionError, DashboardData, DataSession, Loader};
use crate::routing::{NavigationController, RouteError, RouteParams, RouteTable};

/// Why the dashboard could not be opened.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Routes(#[from] RouteError),
}

/// A page of the dashboard with its parameters (percent-decoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Overview,
    Cluster { cluster_id: String },
    Service { service_id: String },
    Build { attempt_id: String },
    Analytics,
    Reliability,
    Scorecard,
    Versions,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Cluster { .. } => "cluster",
            View::Service { .. } => "service",
            View::Build { .. } => "build",
            View::Analytics => "analytics",
            View::Reliability => "reliability",
            View::Scorecard => "scorecard",
            View::Versions => "versions",
        }
    }
}

/// Replaces the visible page. Implemented by the page layer.
pub trait ViewRenderer: Send + Sync {
    /// Render `view` in full from `data`.
    fn render(&self, view: &View, data: &DashboardData);

    /// Replace everything with a fatal error; no partial dashboard.
    fn render_fatal(&self, error: &AcquisitionError);
}

type ViewBuilder = fn(&RouteParams) -> View;

fn decoded(params: &RouteParams) -> String {
    params.decoded(1).unwrap_or_default()
}

static DASHBOARD_ROUTES: [(&str, ViewBuilder); 8] = [
    (r"#/?", |_| View::Overview),
    (r"#/clusters/([^/?]+)/?(\?.*)?", |p| View::Cluster {
        cluster_id: decoded(p),
    }),
    (r"#/services/([^/]+)/?", |p| View::Service {
        service_id: decoded(p),
    }),
    (r"#/builds/([^/]+)/?", |p| View::Build {
        attempt_id: decoded(p),
    }),
    (r"#/analytics/?", |_| View::Analytics),
    (r"#/reliability/?", |_| View::Reliability),
    (r"#/scorecard/?", |_| View::Scorecard),
    (r"#/versions/?", |_| View::Versions),
];

/// Route table rendering every dashboard view from `data`.
pub fn dashboard_routes(
    data: Arc<DashboardData>,
    renderer: Arc<dyn ViewRenderer>,
) -> Result<RouteTable, RouteError> {
    let mut table = RouteTable::new();
    for (pattern, build) in DASHBOARD_ROUTES.iter().copied() {
        let data = data.clone();
        let renderer = renderer.clone();
        table.add_route(pattern, move |params: &RouteParams| {
            renderer.render(&build(params), &data);
        })?;
    }
    Ok(table)
}

/// Wait for `session` and return a controller over the dashboard routes.
///
/// If acquisition failed in both phases the fatal view is rendered and no
/// route is registered.
pub async fn open_dashboard<L: Loader>(
    session: &DataSession<L>,
    renderer: Arc<dyn ViewRenderer>,
) -> Result<NavigationController, DashboardError> {
    let data = match session.ready().await {
        Ok(data) => data,
        Err(e) => {
            renderer.render_fatal(&e);
            return Err(e.into());
        }
    };
    Ok(NavigationController::new(dashboard_routes(data, renderer)?))
}
