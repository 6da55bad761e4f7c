use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use payload_codec::Pacing;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Delay before the inspector's synthetic boot row is recorded.
    #[serde(default = "default_boot_delay")]
    pub boot_delay_ms: u64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pacing: PacingConfig::default(),
            boot_delay_ms: default_boot_delay(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "default_encode_lead")]
    pub encode_lead_ms: u64,
    #[serde(default = "default_decode_lead")]
    pub decode_lead_ms: u64,
    #[serde(default = "default_step")]
    pub step_ms: u64,
}

impl PacingConfig {
    pub fn to_pacing(&self) -> Pacing {
        Pacing {
            encode_lead: Duration::from_millis(self.encode_lead_ms),
            decode_lead: Duration::from_millis(self.decode_lead_ms),
            step: Duration::from_millis(self.step_ms),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            encode_lead_ms: default_encode_lead(),
            decode_lead_ms: default_decode_lead(),
            step_ms: default_step(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default-value functions used by serde
// ---------------------------------------------------------------------------

fn default_encode_lead() -> u64 {
    300
}

fn default_decode_lead() -> u64 {
    500
}

fn default_step() -> u64 {
    400
}

fn default_boot_delay() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Load configuration from a YAML file.
///
/// If the file does not exist a default configuration is returned and a
/// warning is emitted, so the lab starts with sensible defaults when no
/// config file has been written yet.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        warn!(
            path = %path.display(),
            "configuration file not found; using defaults"
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

    let config: Config = serde_yml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_pacing() {
        let cfg = Config::default();
        assert_eq!(cfg.pacing.encode_lead_ms, 300);
        assert_eq!(cfg.pacing.decode_lead_ms, 500);
        assert_eq!(cfg.pacing.step_ms, 400);
        assert_eq!(cfg.boot_delay_ms, 500);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_yaml_fills_missing_fields() {
        let cfg: Config = serde_yml::from_str("pacing:\n  step_ms: 0\n").unwrap();
        assert_eq!(cfg.pacing.step_ms, 0);
        assert_eq!(cfg.pacing.encode_lead_ms, 300);
        assert_eq!(cfg.boot_delay_ms, 500);
    }

    #[test]
    fn to_pacing_converts_milliseconds() {
        let pacing = PacingConfig::default().to_pacing();
        assert_eq!(pacing.encode_lead, Duration::from_millis(300));
        assert_eq!(pacing.step, Duration::from_millis(400));
    }
}
