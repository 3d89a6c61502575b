//! Hostname-based choice between cluster and local example runs.

use crate::config::EnvSource;
use crate::error::{OpsError, Result};
use std::fmt;
use tracing::warn;

/// Fallback when the `hostname` command is unavailable.
pub const HOSTNAME_ENV: &str = "HOSTNAME";

/// Where the example runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Cluster,
    Local,
}

impl HostMode {
    /// Cluster when `hostname` contains `marker`, local otherwise.
    pub fn for_hostname(hostname: &str, marker: &str) -> Self {
        if !marker.is_empty() && hostname.contains(marker) { HostMode::Cluster } else { HostMode::Local }
    }
}

impl fmt::Display for HostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostMode::Cluster => write!(f, "cluster"),
            HostMode::Local => write!(f, "local"),
        }
    }
}

/// Runs `hostname`, returning its trimmed output when it succeeds.
pub async fn query_hostname() -> Option<String> {
    match tokio::process::Command::new("hostname").output().await {
        Ok(output) if output.status.success() => {
            let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!name.is_empty()).then_some(name)
        }
        Ok(_) | Err(_) => None,
    }
}

/// The hostname reported by `lookup`, or else `$HOSTNAME`.
pub async fn resolve_hostname<F, Fut>(lookup: F, env: &dyn EnvSource) -> Result<String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<String>>,
{
    if let Some(name) = lookup().await {
        return Ok(name);
    }
    warn!("`hostname` unavailable, falling back to $HOSTNAME");
    env.var(HOSTNAME_ENV).ok_or_else(|| OpsError::MissingEnv(HOSTNAME_ENV.to_string()))
}

/// The current hostname, from `hostname` or else `$HOSTNAME`.
pub async fn current_hostname(env: &dyn EnvSource) -> Result<String> {
    resolve_hostname(query_hostname, env).await
}
