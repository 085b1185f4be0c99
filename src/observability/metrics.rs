//! Metrics recording.
//!
//! # Metrics
//! - `dashboard_source_loads_total` (counter): loads by source, outcome
//! - `dashboard_source_load_duration_seconds` (histogram): per-load latency by source
//! - `dashboard_acquisition_fallbacks_total` (counter): primary phases abandoned
//! - `dashboard_acquisitions_total` (counter): finished acquisitions by outcome
//! - `dashboard_dispatch_total` (counter): navigation events by outcome, including ignored ones

use std::time::Duration;

use crate::data::source::SourceKind;
use crate::routing::navigation::Dispatch;

/// Record one source load.
pub fn record_source_load(source: SourceKind, success: bool, elapsed: Duration) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!(
        "dashboard_source_loads_total",
        "source" => source.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "dashboard_source_load_duration_seconds",
        "source" => source.as_str()
    )
    .record(elapsed.as_secs_f64());
}

/// Record that the primary phase failed and the fallback phase started.
pub fn record_fallback() {
    metrics::counter!("dashboard_acquisition_fallbacks_total").increment(1);
}

/// Record the end of an acquisition.
pub fn record_acquisition(outcome: &'static str) {
    metrics::counter!("dashboard_acquisitions_total", "outcome" => outcome).increment(1);
}

/// Record one navigation evaluation.
pub fn record_dispatch(dispatch: Dispatch) {
    let outcome = match dispatch {
        Dispatch::Matched(_) => "matched",
        Dispatch::Unmatched => "unmatched",
        Dispatch::Ignored => "ignored",
    };
    metrics::counter!("dashboard_dispatch_total", "outcome" => outcome).increment(1);
}
