//! End-to-end: load data, build the dashboard routes, navigate.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use qcd_dashboard::config::SourceConfig;
use qcd_dashboard::data::{AcquisitionError, DashboardData, DataSession, HttpLoader, RegionRole};
use qcd_dashboard::routing::{Dispatch, NavigationController};
use qcd_dashboard::views::{dashboard_routes, open_dashboard, DashboardError, View, ViewRenderer};

mod common;

#[derive(Default)]
struct Recorder {
    rendered: Mutex<Vec<(View, Option<RegionRole>)>>,
}

impl ViewRenderer for Recorder {
    fn render(&self, view: &View, data: &DashboardData) {
        let role = match view {
            View::Cluster { cluster_id } => data.resolve_cluster_region(cluster_id).map(|cr| cr.role),
            _ => None,
        };
        self.rendered.lock().unwrap().push((view.clone(), role));
    }

    fn render_fatal(&self, _error: &AcquisitionError) {
        panic!("data should load");
    }
}

/// Records only fatal errors; any page render is a test failure.
#[derive(Default)]
struct FatalRecorder {
    fatal: Mutex<Vec<(usize, usize)>>,
}

impl ViewRenderer for FatalRecorder {
    fn render(&self, view: &View, _data: &DashboardData) {
        panic!("no view may render after a failed load, got {:?}", view);
    }

    fn render_fatal(&self, error: &AcquisitionError) {
        self.fatal
            .lock()
            .unwrap()
            .push((error.primary.len(), error.fallback.len()));
    }
}

async fn loaded() -> Arc<DashboardData> {
    let (api, _) = common::start_path_backend(|path: String| async move {
        common::serve(common::api_payload(&path))
    })
    .await;

    let config = SourceConfig {
        api_base: format!("http://{}", api),
        ..SourceConfig::default()
    };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let session =
        DataSession::from_config(HttpLoader::with_client(client, Duration::from_secs(5)), &config)
            .unwrap();
    session.ready().await.unwrap()
}

#[tokio::test]
async fn test_navigation_after_ready() {
    let data = loaded().await;
    let recorder = Arc::new(Recorder::default());
    let mut nav = NavigationController::new(dashboard_routes(data, recorder.clone()).unwrap());

    assert_eq!(nav.start("#/"), Dispatch::Matched(0));
    assert_eq!(nav.location_changed("#/clusters/us-east-1a?tab=tests"), Dispatch::Matched(1));
    assert_eq!(nav.location_changed("#/clusters/us-west-2b/"), Dispatch::Matched(1));
    assert_eq!(nav.location_changed("#/clusters/unknown"), Dispatch::Matched(1));
    assert_eq!(nav.location_changed("#/no-such-page"), Dispatch::Unmatched);
    assert_eq!(nav.location_changed("#/builds/billing%3A1042"), Dispatch::Matched(3));

    let rendered = recorder.rendered.lock().unwrap();
    assert_eq!(
        *rendered,
        vec![
            (View::Overview, None),
            (View::Cluster { cluster_id: "us-east-1a".into() }, Some(RegionRole::Active)),
            (View::Cluster { cluster_id: "us-west-2b".into() }, Some(RegionRole::HotStandby)),
            (View::Cluster { cluster_id: "unknown".into() }, None),
            (View::Build { attempt_id: "billing:1042".into() }, None),
        ]
    );
}

#[tokio::test]
async fn test_run_loop_dispatches_each_change() {
    let data = loaded().await;
    let recorder = Arc::new(Recorder::default());
    let nav = NavigationController::new(dashboard_routes(data, recorder.clone()).unwrap());

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(nav.run("#".to_string(), rx));

    for location in ["#/analytics", "#/bogus", "#/versions/", "#/scorecard"] {
        tx.send(location.to_string()).unwrap();
    }
    drop(tx);

    let nav = handle.await.unwrap();
    assert_eq!(nav.location(), Some("#/scorecard"));

    let views: Vec<_> = recorder
        .rendered
        .lock()
        .unwrap()
        .iter()
        .map(|(v, _)| v.clone())
        .collect();
    assert_eq!(
        views,
        vec![View::Overview, View::Analytics, View::Versions, View::Scorecard]
    );
}

#[tokio::test]
async fn test_total_load_failure_renders_fatal_view() {
    let (api, _) = common::start_path_backend(|_path: String| async move { (500, "{}".to_string()) }).await;
    let (origin, _) = common::start_path_backend(|_path: String| async move { (404, "{}".to_string()) }).await;

    let config = SourceConfig {
        origin: format!("http://{}/", origin),
        api_base: format!("http://{}", api),
        ..SourceConfig::default()
    };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let session =
        DataSession::from_config(HttpLoader::with_client(client, Duration::from_secs(5)), &config)
            .unwrap();

    let recorder = Arc::new(FatalRecorder::default());
    let err = open_dashboard(&session, recorder.clone()).await.unwrap_err();

    assert!(matches!(err, DashboardError::Acquisition(_)));
    assert_eq!(*recorder.fatal.lock().unwrap(), vec![(9, 10)]);
}

#[tokio::test]
async fn test_open_dashboard_starts_at_overview() {
    let (api, _) = common::start_path_backend(|path: String| async move {
        common::serve(common::api_payload(&path))
    })
    .await;
    let config = SourceConfig {
        api_base: format!("http://{}", api),
        ..SourceConfig::default()
    };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let session =
        DataSession::from_config(HttpLoader::with_client(client, Duration::from_secs(5)), &config)
            .unwrap();

    let recorder = Arc::new(Recorder::default());
    let mut nav = open_dashboard(&session, recorder.clone()).await.unwrap();

    assert_eq!(nav.start("#"), Dispatch::Matched(0));
    assert_eq!(recorder.rendered.lock().unwrap()[0].0, View::Overview);
}
