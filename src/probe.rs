//! One-shot reachability check of the registry backend at startup.

use registry::native::ReqwestTransport;
use registry::storage::MemoryStore;
use registry::{ClientConfig, RegistryApi};

/// Outcome of the startup probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamStatus {
    Reachable { records: Option<u64> },
    Unreachable(String),
}

/// Probe `/health` and `/count`, logging the result. Never fails startup.
pub async fn check_upstream(config: &ClientConfig) -> UpstreamStatus {
    let transport = match ReqwestTransport::new(&config.api_base_url) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::warn!(error = %e, "upstream probe skipped: http client unavailable");
            return UpstreamStatus::Unreachable(e.to_string());
        }
    };
    let api = RegistryApi::new(transport, MemoryStore::new(), config.clone());
    let status = probe(&api).await;
    match &status {
        UpstreamStatus::Reachable { records } => {
            tracing::info!(upstream = %config.api_base_url, ?records, "registry backend reachable");
        }
        UpstreamStatus::Unreachable(error) => {
            tracing::warn!(upstream = %config.api_base_url, %error, "registry backend unreachable; UI will report offline");
        }
    }
    status
}

async fn probe<T: registry::Transport, S: registry::storage::KeyValueStore>(api: &RegistryApi<T, S>) -> UpstreamStatus {
    match api.health().await {
        Ok(_) => UpstreamStatus::Reachable { records: api.count().await.ok() },
        Err(e) => UpstreamStatus::Unreachable(e.to_string()),
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
