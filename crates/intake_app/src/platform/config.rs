use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use intake_core::{
    AcceptancePolicy, IntakeSettings, RampSettings, DEFAULT_ACCEPTED_MIME_TYPES,
    DEFAULT_FIELD_NAME, DEFAULT_MAX_FILE_SIZE_BYTES,
};
use intake_engine::{EngineSettings, RampSchedule, UploadSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment settings, read from a RON file. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    pub endpoint: String,
    pub field_name: String,
    pub accepted_mime_types: Vec<String>,
    pub max_file_size_bytes: u64,
    pub ramp_step_percent: u8,
    pub ramp_ceiling_percent: u8,
    pub ramp_interval_ms: u64,
    pub handoff_delay_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub next_view: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/api/extract-aadhaar".to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            accepted_mime_types: DEFAULT_ACCEPTED_MIME_TYPES
                .iter()
                .map(|mime| mime.to_string())
                .collect(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            ramp_step_percent: 10,
            ramp_ceiling_percent: 90,
            ramp_interval_ms: 200,
            handoff_delay_ms: 1500,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 60_000,
            next_view: "/chatbot".to_string(),
        }
    }
}

impl IntakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_name.trim().is_empty() {
            return Err(ConfigError::Invalid("field_name must not be empty".into()));
        }
        if self.ramp_step_percent == 0 {
            return Err(ConfigError::Invalid("ramp_step_percent must be positive".into()));
        }
        if !(1..=99).contains(&self.ramp_ceiling_percent) {
            return Err(ConfigError::Invalid(format!(
                "ramp_ceiling_percent must be within 1..=99, got {}",
                self.ramp_ceiling_percent
            )));
        }
        if self.ramp_interval_ms == 0 {
            return Err(ConfigError::Invalid("ramp_interval_ms must be positive".into()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid("connect_timeout_ms must be positive".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be positive".into()));
        }
        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(|err| ConfigError::Invalid(format!("endpoint {:?}: {err}", self.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "endpoint must use http or https, got {}",
                endpoint.scheme()
            )));
        }
        Ok(())
    }

    pub fn core_settings(&self) -> IntakeSettings {
        IntakeSettings {
            acceptance: AcceptancePolicy::new(&self.accepted_mime_types, self.max_file_size_bytes),
            ramp: self.ramp(),
            handoff_delay: Duration::from_millis(self.handoff_delay_ms),
            field_name: self.field_name.clone(),
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            upload: UploadSettings {
                endpoint: self.endpoint.clone(),
                connect_timeout: Duration::from_millis(self.connect_timeout_ms),
                request_timeout: Duration::from_millis(self.request_timeout_ms),
            },
            ramp: RampSchedule {
                interval: Duration::from_millis(self.ramp_interval_ms),
                max_ticks: self.ramp().ticks_to_ceiling(),
            },
        }
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new();
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    fn ramp(&self) -> RampSettings {
        RampSettings {
            step_percent: self.ramp_step_percent,
            ceiling_percent: self.ramp_ceiling_percent,
        }
    }
}

pub fn load_config(path: &Path) -> Result<IntakeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: IntakeConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid_and_matches_core_defaults() {
        let config = IntakeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.core_settings(), IntakeSettings::default());

        let engine = config.engine_settings();
        assert_eq!(engine.ramp, RampSchedule::default());
        assert_eq!(
            RampSchedule::default().max_ticks,
            RampSettings::default().ticks_to_ceiling()
        );
    }

    #[test]
    fn rejects_zero_timeouts() {
        let config = IntakeConfig {
            connect_timeout_ms: 0,
            ..IntakeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = IntakeConfig {
            request_timeout_ms: 0,
            ..IntakeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("intake.ron");
        fs::write(
            &path,
            r#"(endpoint: "https://records.example.org/upload", max_file_size_bytes: 1024)"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.endpoint, "https://records.example.org/upload");
        assert_eq!(config.max_file_size_bytes, 1024);
        assert_eq!(config.field_name, "file");
        assert_eq!(config.ramp_interval_ms, 200);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = IntakeConfig {
            next_view: "/records".to_string(),
            ..IntakeConfig::default()
        };
        let text = config.to_ron().unwrap();
        let parsed: IntakeConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("intake.ron");

        fs::write(&path, "(endpoint_url: \"http://x\")").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));

        fs::write(&path, "(ramp_ceiling_percent: 100)").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

        fs::write(&path, "(endpoint: \"ftp://example.org/upload\")").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

        fs::write(&path, "(field_name: \"  \")").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

        assert!(matches!(
            load_config(&temp.path().join("missing.ron")),
            Err(ConfigError::Io { .. })
        ));
    }
}
