//! Navigation controller.
//!
//! # States
//! ```text
//! Idle ──start(location)──▶ Dispatching
//!                             │  ▲
//!                location_changed(location)
//! ```
//!
//! # Design Decisions
//! - The route table is owned here, so it cannot change once dispatch begins
//! - Each evaluation either invokes one handler or does nothing
//! - Unmatched locations leave the current view untouched (no error, no redirect)
//! - Location changes are handled one at a time on the receiving task

use tokio::sync::mpsc;

use crate::observability::metrics;
use crate::routing::router::RouteTable;

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    /// No location evaluated yet.
    Idle,
    /// Evaluating every location change.
    Dispatching,
}

/// Outcome of evaluating one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The handler of the route at this index ran.
    Matched(usize),
    /// No route matched; nothing ran.
    Unmatched,
    /// The controller was not dispatching (not started, or already started).
    Ignored,
}

/// Drives dispatch from location changes.
#[derive(Debug)]
pub struct NavigationController {
    table: RouteTable,
    state: NavigationState,
    location: Option<String>,
}

impl NavigationController {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            state: NavigationState::Idle,
            location: None,
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Last location seen while dispatching, matched or not.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Begin dispatching and evaluate `location` immediately.
    ///
    /// Only the first call has an effect; later calls return [`Dispatch::Ignored`].
    pub fn start(&mut self, location: &str) -> Dispatch {
        if self.state == NavigationState::Dispatching {
            metrics::record_dispatch(Dispatch::Ignored);
            return Dispatch::Ignored;
        }
        self.state = NavigationState::Dispatching;
        tracing::info!(routes = self.table.len(), location = %location, "Navigation started");
        self.evaluate(location)
    }

    /// Re-evaluate after the location changed.
    pub fn location_changed(&mut self, location: &str) -> Dispatch {
        match self.state {
            NavigationState::Idle => {
                tracing::debug!(location = %location, "Location change before start, ignored");
                metrics::record_dispatch(Dispatch::Ignored);
                Dispatch::Ignored
            }
            NavigationState::Dispatching => self.evaluate(location),
        }
    }

    fn evaluate(&mut self, location: &str) -> Dispatch {
        self.location = Some(location.to_string());

        let outcome = match self.table.match_location(location) {
            Some(matched) => {
                tracing::debug!(location = %location, pattern = %matched.pattern, "Dispatching route");
                matched.invoke();
                Dispatch::Matched(matched.index)
            }
            None => {
                tracing::debug!(location = %location, "No route matched, view unchanged");
                Dispatch::Unmatched
            }
        };
        metrics::record_dispatch(outcome);
        outcome
    }

    /// Start at `initial`, then dispatch every location received on `changes`
    /// until the sender side is dropped.
    pub async fn run(mut self, initial: String, mut changes: mpsc::UnboundedReceiver<String>) -> Self {
        self.start(&initial);
        while let Some(location) = changes.recv().await {
            self.location_changed(&location);
        }
        tracing::info!("Location source closed, navigation stopped");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::RouteParams;
    use std::sync::{Arc, Mutex};

    fn table_with_log() -> (RouteTable, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut table = RouteTable::new();

        let l = log.clone();
        table
            .add_route(r"#/?", move |_: &RouteParams| {
                l.lock().unwrap().push("overview".to_string());
            })
            .unwrap();
        let l = log.clone();
        table
            .add_route(r"#/services/([^/]+)/?", move |p: &RouteParams| {
                l.lock().unwrap().push(format!("service:{}", p.decoded(1).unwrap_or_default()));
            })
            .unwrap();

        (table, log)
    }

    #[test]
    fn test_idle_ignores_changes() {
        let (table, log) = table_with_log();
        let mut nav = NavigationController::new(table);

        assert_eq!(nav.location_changed("#/"), Dispatch::Ignored);
        assert_eq!(nav.state(), NavigationState::Idle);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(nav.location(), None);
    }

    #[test]
    fn test_start_dispatches_immediately() {
        let (table, log) = table_with_log();
        let mut nav = NavigationController::new(table);

        assert_eq!(nav.start("#/"), Dispatch::Matched(0));
        assert_eq!(nav.state(), NavigationState::Dispatching);
        assert_eq!(*log.lock().unwrap(), vec!["overview"]);

        // second start is a no-op
        assert_eq!(nav.start("#/"), Dispatch::Ignored);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unmatched_location_is_inert() {
        let (table, log) = table_with_log();
        let mut nav = NavigationController::new(table);
        nav.start("#/services/api");

        assert_eq!(nav.location_changed("#/does/not/exist"), Dispatch::Unmatched);
        assert_eq!(nav.location(), Some("#/does/not/exist"));
        assert_eq!(*log.lock().unwrap(), vec!["service:api"]);
    }

    #[test]
    fn test_renavigation_to_same_location_redispatches() {
        let (table, log) = table_with_log();
        let mut nav = NavigationController::new(table);
        nav.start("#/services/a%2Fb");
        nav.location_changed("#/services/a%2Fb");
        assert_eq!(*log.lock().unwrap(), vec!["service:a/b", "service:a/b"]);
    }

    #[test]
    fn test_dispatch_outcomes_are_counted() {
        let recorder = metrics::testing::CountingRecorder::default();
        let (table, _log) = table_with_log();
        let mut nav = NavigationController::new(table);

        ::metrics::with_local_recorder(&recorder, || {
            nav.location_changed("#/");
            nav.start("#/");
            nav.start("#/");
            nav.location_changed("#/nowhere");
        });

        assert_eq!(recorder.count("dashboard_dispatch_total", "ignored"), 2);
        assert_eq!(recorder.count("dashboard_dispatch_total", "matched"), 1);
        assert_eq!(recorder.count("dashboard_dispatch_total", "unmatched"), 1);
    }

    #[tokio::test]
    async fn test_run_processes_changes_in_order() {
        let (table, log) = table_with_log();
        let nav = NavigationController::new(table);
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send("#/services/one".to_string()).unwrap();
        tx.send("#/nowhere".to_string()).unwrap();
        tx.send("#/services/two/".to_string()).unwrap();
        drop(tx);

        let nav = nav.run("#".to_string(), rx).await;
        assert_eq!(nav.location(), Some("#/services/two/"));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["overview", "service:one", "service:two"]
        );
    }
}
