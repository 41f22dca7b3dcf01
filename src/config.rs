use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Limits applied to every naming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Requests with more atoms are refused before any search runs; the
    /// backbone search is exponential in the worst case.
    pub max_atoms: usize,
    /// Longest backbone that can be named. The stem table stops at 15.
    pub max_backbone: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        NamingConfig {
            max_atoms: 64,
            max_backbone: 15,
        }
    }
}

impl NamingConfig {
    /// Defaults overridden by `NOMENCLATURA_MAX_ATOMS` and
    /// `NOMENCLATURA_MAX_BACKBONE` when they hold valid numbers.
    pub fn from_env() -> Self {
        let mut config = NamingConfig::default();
        if let Some(max) = read_var("NOMENCLATURA_MAX_ATOMS") {
            config.max_atoms = max;
        }
        if let Some(max) = read_var("NOMENCLATURA_MAX_BACKBONE") {
            config.max_backbone = max.min(crate::naming::MAX_STEM);
        }
        config
    }
}

fn read_var(key: &str) -> Option<usize> {
    let value = env::var(key).ok()?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("ignoring {key}={value:?}: not a number");
            None
        }
    }
}
