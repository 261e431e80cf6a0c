use serde_json::Value;
use thiserror::Error;
use tracing::debug;

// ── Errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },
    #[error("server rejected {endpoint}: status {status}")]
    Server { endpoint: String, status: u16 },
}

// ── Transport ──────────────────────────────────────────────────────────

/// Seam between the transition engine and the remote store. The engine
/// only needs fire-and-forget posts; tests substitute a recording fake.
pub trait ScoreSync: Send + Sync {
    fn send(&self, endpoint: &str, payload: &Value) -> Result<(), SyncError>;
}

/// Same-origin JSON POSTs against the backing service. Response bodies
/// are never read; only the status matters. No retry and no timeout:
/// a lost write surfaces as a revert on the caller's side.
pub struct HttpSync {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSync {
    pub fn new(base_url: &str) -> Self {
        HttpSync {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        if self.base_url.is_empty() {
            format!("/{endpoint}")
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }
}

impl ScoreSync for HttpSync {
    fn send(&self, endpoint: &str, payload: &Value) -> Result<(), SyncError> {
        let url = self.endpoint_url(endpoint);
        debug!("posting {endpoint} to {url}");
        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .map_err(|e| SyncError::Network {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Server {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_base() {
        let sync = HttpSync::new("http://localhost:5000/");
        assert_eq!(sync.endpoint_url("set-score"), "http://localhost:5000/set-score");
    }

    #[test]
    fn test_endpoint_url_same_origin_default() {
        let sync = HttpSync::new("");
        assert_eq!(sync.endpoint_url("clear-score"), "/clear-score");
    }

    #[test]
    fn test_sync_error_display() {
        let err = SyncError::Server { endpoint: "set-forfeit".to_string(), status: 500 };
        assert_eq!(err.to_string(), "server rejected set-forfeit: status 500");
    }
}
