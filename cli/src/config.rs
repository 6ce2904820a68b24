//! CLI configuration with TOML file support.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use soulbound_facematch::FaceMatchConfig;
use soulbound_utils::LogFormat;
use soulbound_verification::DuplicatePolicy;
use soulbound_wallet_core::ReconnectPolicy;

/// Configuration for the `soulbound` binary.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; flags and
/// `SOULBOUND_*` environment variables override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    #[serde(default)]
    pub reconnect_policy: ReconnectPolicy,

    #[serde(default)]
    pub facematch: FaceMatchConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./soulbound_data")
}

fn default_map_size_mb() -> usize {
    1024
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            duplicate_policy: DuplicatePolicy::default(),
            reconnect_policy: ReconnectPolicy::default(),
            facematch: FaceMatchConfig::default(),
        }
    }
}
