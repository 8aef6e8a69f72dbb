//! Session configuration with TOML file support.

use agora_types::VoterAddress;
use serde::{Deserialize, Serialize};

/// Configuration for a daemon session.
///
/// Loadable from a TOML file; CLI flags and environment variables override
/// file values, which override the defaults below.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Address of the administrator driving the workflow.
    #[serde(default = "default_admin")]
    pub admin: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit machine-readable JSON result lines instead of plain text.
    #[serde(default)]
    pub json: bool,
}

fn default_admin() -> String {
    "admin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SessionConfig {
    /// Apply CLI and environment overrides on top of file (or default)
    /// values. An absent override keeps the base value.
    pub fn with_overrides(
        self,
        admin: Option<String>,
        log_level: Option<String>,
        json: bool,
    ) -> Self {
        Self {
            admin: admin.unwrap_or(self.admin),
            log_level: log_level.unwrap_or(self.log_level),
            json: json || self.json,
        }
    }

    /// The administrator address, rejecting an empty value.
    pub fn admin_address(&self) -> anyhow::Result<VoterAddress> {
        let admin = VoterAddress::new(self.admin.clone());
        anyhow::ensure!(admin.is_valid(), "admin address must be non-empty");
        Ok(admin)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            log_level: default_log_level(),
            json: false,
        }
    }
}
