use std::time::Duration;

use serde::Deserialize;

use parley_core::Result;

/// Health probe result
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub healthy: bool,
    pub latency_ms: u64,
    pub error: Option<String>,
}

impl HealthReport {
    pub fn healthy(latency_ms: u64) -> Self {
        Self { healthy: true, latency_ms, error: None }
    }

    pub fn unhealthy(error: String) -> Self {
        Self { healthy: false, latency_ms: 0, error: Some(error) }
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

/// Probe `GET {base_url}/health`.
///
/// Unlike chat exchanges this is a liveness check, so it carries a timeout.
pub async fn check_health(base_url: &str, timeout: Duration) -> Result<HealthReport> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let start = std::time::Instant::now();

    let probe = async {
        let response = reqwest::get(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Ok::<_, reqwest::Error>(Err(format!("unexpected status: {}", status)));
        }
        match response.json::<HealthBody>().await {
            Ok(body) if body.status == "healthy" => Ok(Ok(())),
            Ok(body) => Ok(Err(format!("backend reports: {}", body.status))),
            Err(e) => Ok(Err(format!("malformed health response: {}", e))),
        }
    };

    let outcome = match tokio::time::timeout(timeout, probe).await {
        Err(_) => Err("health check timed out".to_string()),
        Ok(Err(e)) => Err(format!("health request failed: {}", e)),
        Ok(Ok(inner)) => inner,
    };

    let latency = start.elapsed().as_millis() as u64;
    Ok(match outcome {
        Ok(()) => HealthReport::healthy(latency),
        Err(message) => HealthReport::unhealthy(message),
    })
}
