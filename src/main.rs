//! QCD dashboard client.
//!
//! # Architecture Overview
//!
//! ```text
//!   startup                                     navigation
//!   ───────                                     ──────────
//!   config ──▶ DataSession::ready()             location fragments (stdin)
//!                 │                                    │
//!                 ├─ primary: API gateway ─┐           ▼
//!                 │   (9 resources)        │    NavigationController
//!                 └─ fallback: static tree ┤           │ first match
//!                     (10 files)           ▼           ▼
//!                              Arc<DashboardData> ──▶ handler ──▶ ViewRenderer
//!                              (raw + derived index)
//! ```
//!
//! Navigation only starts once the data is ready. If both sources fail the
//! fatal view is rendered and the process exits with an error.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use qcd_dashboard::config::resolve_config;
use qcd_dashboard::data::{AcquisitionError, DashboardData, DataSession, HttpLoader};
use qcd_dashboard::observability::logging::init_logging;
use qcd_dashboard::views::{open_dashboard, View, ViewRenderer};

#[derive(Parser)]
#[command(name = "qcd-dashboard")]
#[command(about = "Load QCD dashboard data and navigate its views", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API gateway base URL (overrides QCD_API_BASE and the config file).
    #[arg(long)]
    api_base: Option<String>,

    /// Location fragment to render first.
    #[arg(default_value = "#/")]
    location: String,
}

/// Prints a plain-text summary of each view.
struct TextRenderer;

impl ViewRenderer for TextRenderer {
    fn render(&self, view: &View, data: &DashboardData) {
        let raw = data.raw();
        println!("== {} ({} data)", view.name(), data.source());
        match view {
            View::Overview => {
                println!(
                    "clusters: {}  regions: {}  services: {}",
                    raw.clusters.len(),
                    raw.cluster_regions.len(),
                    raw.services.len()
                );
            }
            View::Cluster { cluster_id } => match data.resolve_cluster_region(cluster_id) {
                Some(cr) => {
                    println!("{} [{}] role: {}", cr.name, cr.kind, cr.role);
                    if !cr.description.is_empty() {
                        println!("{}", cr.description);
                    }
                }
                None => println!("cluster region '{}' not found", cluster_id),
            },
            View::Service { service_id } => {
                let service = raw.services.iter().find(|s| &s.id == service_id);
                match service {
                    Some(s) => println!("{} app id: {}", s.id, s.app_id.as_deref().unwrap_or("—")),
                    None => println!("service '{}' not found", service_id),
                }
            }
            View::Build { attempt_id } => {
                let attempt = raw
                    .deployment_attempts
                    .iter()
                    .find(|a| a.get("id").and_then(|id| id.as_str()) == Some(attempt_id.as_str()));
                match attempt {
                    Some(a) => println!("{}", serde_json::to_string_pretty(a).unwrap_or_default()),
                    None => println!("build attempt '{}' not found", attempt_id),
                }
            }
            View::Analytics => println!("test runs: {}", raw.test_runs.len()),
            View::Reliability => println!("cluster test runs: {}", raw.cluster_test_runs.len()),
            View::Scorecard => println!("scorecards: {}", raw.scorecards.len()),
            View::Versions => println!(
                "running versions: {}  jira tickets: {}",
                raw.current_running.len(),
                raw.jira_tickets.len()
            ),
        }
    }

    fn render_fatal(&self, error: &AcquisitionError) {
        eprintln!("Failed to load dashboard data: {}", error);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (config, api_base_overridden) =
        resolve_config(cli.config.as_deref(), cli.api_base.clone())?;
    init_logging(&config.observability)?;

    if api_base_overridden {
        tracing::debug!(api_base = %config.sources.api_base, "API base overridden");
    }

    tracing::info!(
        api_base = %config.sources.api_base,
        static_base = %config.sources.static_base,
        timeout_secs = config.sources.request_timeout_secs,
        "Configuration loaded"
    );

    let loader = HttpLoader::new(Duration::from_secs(config.sources.request_timeout_secs));
    let session = DataSession::from_config(loader, &config.sources)?;
    let renderer: Arc<dyn ViewRenderer> = Arc::new(TextRenderer);

    let controller = open_dashboard(&session, renderer).await?;
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let location = line.trim();
            if location.is_empty() {
                continue;
            }
            if tx.send(location.to_string()).is_err() {
                break;
            }
        }
    });

    controller.run(cli.location, rx).await;
    Ok(())
}
