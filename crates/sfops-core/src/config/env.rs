//! Environment variable lookup.

use crate::error::{OpsError, Result};
use std::collections::HashMap;

/// Source of environment variables.
///
/// Operations read `SCRATCH`, `USER` and `EMAIL_DOMAIN` through this trait so
/// callers can supply values without touching the process environment.
pub trait EnvSource: Send + Sync {
    /// Returns the value of `key`, treating empty values as unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The current process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.trim().is_empty()).cloned()
    }
}

/// Looks up `key`, failing with [`OpsError::MissingEnv`] when unset.
pub fn require_var(env: &dyn EnvSource, key: &str) -> Result<String> {
    env.var(key).ok_or_else(|| OpsError::MissingEnv(key.to_string()))
}
