use crate::error::{GoliveError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ForecastConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Slip (in days past target) still classified as `at_risk`.
    #[serde(default = "default_at_risk_window")]
    pub at_risk_window_days: i64,
    /// Floor applied to every observed phase duration.
    #[serde(default = "default_min_phase_days")]
    pub min_phase_days: f64,
    /// Count only blocked prerequisites gating the current phase.
    #[serde(default)]
    pub blockers_current_phase_only: bool,
}

fn default_at_risk_window() -> i64 {
    crate::risk::AT_RISK_WINDOW_DAYS
}

fn default_min_phase_days() -> f64 {
    1.0
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            at_risk_window_days: default_at_risk_window(),
            min_phase_days: default_min_phase_days(),
            blockers_current_phase_only: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl Config {
    /// Load `.golive/config.yaml`. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        crate::io::read_yaml(&path)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        crate::io::write_yaml(&paths::config_path(root), self)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let f = &self.forecast;

        if f.at_risk_window_days < 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "forecast.at_risk_window_days must not be negative (got {})",
                    f.at_risk_window_days
                ),
            });
        } else if f.at_risk_window_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "forecast.at_risk_window_days is 0: any slip is likely_delayed"
                    .to_string(),
            });
        }

        if !f.min_phase_days.is_finite() || f.min_phase_days <= 0.0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "forecast.min_phase_days must be positive (got {})",
                    f.min_phase_days
                ),
            });
        }

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        warnings
    }

    /// Fail on the first error-level warning.
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(GoliveError::InvalidConfig(w.message)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.forecast.at_risk_window_days, 14);
        assert_eq!(cfg.forecast.min_phase_days, 1.0);
        assert!(!cfg.forecast.blockers_current_phase_only);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("forecast:\n  at_risk_window_days: 7\n").unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.forecast.at_risk_window_days, 7);
        assert_eq!(cfg.forecast.min_phase_days, 1.0);
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.forecast.blockers_current_phase_only = true;
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert!(loaded.forecast.blockers_current_phase_only);
    }

    #[test]
    fn defaults_validate_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn negative_window_is_an_error() {
        let mut cfg = Config::default();
        cfg.forecast.at_risk_window_days = -1;
        assert!(matches!(
            cfg.ensure_valid(),
            Err(GoliveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_min_days_is_an_error() {
        let mut cfg = Config::default();
        cfg.forecast.min_phase_days = 0.0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert!(warnings[0].message.contains("min_phase_days"));
    }
}
