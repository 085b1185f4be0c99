//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Per-path request counts seen by a mock backend.
#[derive(Clone, Default)]
pub struct Hits(Arc<Mutex<HashMap<String, usize>>>);

#[allow(dead_code)]
impl Hits {
    pub fn get(&self, path: &str) -> usize {
        self.0.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.lock().unwrap().values().sum()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.0.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn record(&self, path: &str) {
        *self.0.lock().unwrap().entry(path.to_string()).or_default() += 1;
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Start a mock backend on an ephemeral port whose response depends on the
/// request path. Returns its address and the hit counter.
pub async fn start_path_backend<F, Fut>(f: F) -> (SocketAddr, Hits)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Hits::default();
    let f = Arc::new(f);

    let recorded = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let hits = recorded.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let mut len = 0;
                        while !buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf[len..]).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => len += n,
                            }
                            if len == buf.len() {
                                return;
                            }
                        }

                        let head = String::from_utf8_lossy(&buf[..len]);
                        let path = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();
                        hits.record(&path);

                        let (status, body) = f(path).await;
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

/// Payload served for `path` by a healthy API gateway.
#[allow(dead_code)]
pub fn api_payload(path: &str) -> Option<&'static str> {
    Some(match path {
        "/v1/qcd/clusters" => {
            r#"{
                "clusters": [{ "id": "core-db", "name": "core-db", "type": "postgres", "description": "Primary OLTP" }],
                "clusterRegions": [
                    { "id": "us-east-1a", "baseId": "core-db", "region": "us-east-1a" },
                    { "id": "us-west-2b", "baseId": "core-db", "region": "us-west-2b" }
                ],
                "clusterRegionRoles": { "core-db": { "active": "us-east-1a", "hotStandby": "us-west-2b" } },
                "currentRunning": { "us-east-1a": { "billing": "1.4.0" } }
            }"#
        }
        "/v1/qcd/services" => r#"{ "services": [{ "id": "billing", "appId": "APP-1" }, { "id": "cron" }] }"#,
        "/v1/qcd/deployments" => r#"{ "deploymentAttempts": [{ "id": "billing:1042", "status": "succeeded" }] }"#,
        "/v1/qcd/test-runs" => r#"{ "testRuns": [] }"#,
        "/v1/qcd/cluster-test-runs" => r#"{ "clusterTestRuns": [] }"#,
        "/v1/qcd/promotions" => r#"{ "promotions": [] }"#,
        "/v1/qcd/jira-tickets" => r#"{ "jiraTickets": { "QCD-1": { "summary": "flaky smoke" } } }"#,
        "/v1/qcd/scorecards" => r#"{ "scorecardWeights": { "tests": 0.5 }, "scorecards": {} }"#,
        "/v1/qcd/metadata" => r#"{ "suiteMeta": {}, "statusMeta": {} }"#,
        _ => return None,
    })
}

/// Payload served for `path` by the static tree under `/sample-data/`.
#[allow(dead_code)]
pub fn static_payload(path: &str) -> Option<&'static str> {
    let file = path.strip_prefix("/sample-data/")?;
    Some(match file {
        "service-health/clusters.json" => {
            r#"{
                "clusters": [{ "id": "core-db", "name": "core-db-static", "type": "postgres" }],
                "clusterRegions": [{ "id": "us-east-1a", "baseId": "core-db", "region": "us-east-1a" }],
                "clusterRegionRoles": { "core-db": { "active": "us-east-1a" } }
            }"#
        }
        "service-health/services.json" => r#"{ "services": [{ "id": "billing-static", "appId": "APP-1" }] }"#,
        "service-health/current-running.json" => r#"{ "currentRunning": { "us-east-1a": {} } }"#,
        "service-health/deployments.json" => r#"{ "deploymentAttempts": [] }"#,
        "service-health/test-runs.json" => r#"{ "testRuns": [] }"#,
        "service-health/cluster-test-runs.json" => r#"{ "clusterTestRuns": [] }"#,
        "service-health/promotions.json" => r#"{ "promotions": [] }"#,
        "version-compare/jira-tickets.json" => r#"{ "jiraTickets": {} }"#,
        "scorecard/scorecards.json" => r#"{ "scorecardWeights": {}, "scorecards": {} }"#,
        "common/metadata.json" => r#"{ "suiteMeta": {}, "statusMeta": {} }"#,
        _ => return None,
    })
}

/// Respond with `payload` or 404.
#[allow(dead_code)]
pub fn serve(payload: Option<&'static str>) -> (u16, String) {
    match payload {
        Some(body) => (200, body.to_string()),
        None => (404, "{}".to_string()),
    }
}
