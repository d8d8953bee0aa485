use std::env;

use tracing::warn;

const DEFAULT_MATCH_MINUTES: i64 = 90;

/// Host-wide defaults, read once from the environment at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Applied to fixture requests that name no timezone.
    pub default_timezone: Option<String>,
    /// Calendar event length for exported fixtures.
    pub match_minutes: i64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { default_timezone: None, match_minutes: DEFAULT_MATCH_MINUTES }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_timezone = lookup("DEFAULT_TIMEZONE").filter(|s| !s.trim().is_empty());
        let match_minutes = match lookup("DEFAULT_MATCH_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(m) if m > 0 => m,
                _ => {
                    warn!(value = %raw, "Ignoring invalid DEFAULT_MATCH_MINUTES");
                    DEFAULT_MATCH_MINUTES
                }
            },
            None => DEFAULT_MATCH_MINUTES,
        };
        Self { default_timezone, match_minutes }
    }
}
