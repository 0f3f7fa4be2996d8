//! Service configuration

use std::{path::PathBuf, str::FromStr};

use canteen::MIN_PICKUP_RATIO;
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "CANTEEN_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "canteen.toml";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pin the clock to this hour of today instead of following wall time
    #[serde(default)]
    pub simulated_hour: Option<u8>,

    /// Reminder tick interval in seconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,

    /// Share of reconfirmed meals assumed picked up
    #[serde(default = "default_pickup_ratio")]
    pub pickup_ratio: f64,

    /// Seed the store with the demo roster, menu and opt-ins
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,

    /// Users whose sessions receive reminders
    #[serde(default = "default_session_users")]
    pub session_users: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_interval() -> u64 {
    60
}

fn default_pickup_ratio() -> f64 {
    canteen::DEFAULT_PICKUP_RATIO
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_session_users() -> Vec<String> {
    vec!["emp123".to_string()]
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            simulated_hour: None,
            tick_interval_secs: default_tick_interval(),
            pickup_ratio: default_pickup_ratio(),
            seed_demo_data: default_seed_demo_data(),
            session_users: default_session_users(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let env = |key: &str| std::env::var(key).ok();

        let contents = match Self::find_config_file(env(CONFIG_PATH_VAR)) {
            Some(path) => Some(std::fs::read_to_string(&path)?),
            None => None,
        };

        Self::from_sources(contents.as_deref(), env)
    }

    /// Builds the configuration from file contents and an environment lookup.
    ///
    /// Defaults are overridden by the file, which is overridden by the
    /// environment.
    pub fn from_sources<F>(file: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(contents) => toml::from_str::<ServiceConfig>(contents)?,
            None => Self::default(),
        };

        if let Some(level) = env("CANTEEN_LOG_LEVEL") {
            config.log_level = level;
        }

        if let Some(hour) = env("CANTEEN_SIMULATED_HOUR") {
            config.simulated_hour = Some(parse_var("CANTEEN_SIMULATED_HOUR", &hour)?);
        }

        if let Some(interval) = env("CANTEEN_TICK_INTERVAL_SECS") {
            config.tick_interval_secs = parse_var("CANTEEN_TICK_INTERVAL_SECS", &interval)?;
        }

        if let Some(ratio) = env("CANTEEN_PICKUP_RATIO") {
            config.pickup_ratio = parse_var("CANTEEN_PICKUP_RATIO", &ratio)?;
        }

        if let Some(seed) = env("CANTEEN_SEED_DEMO_DATA") {
            config.seed_demo_data = parse_var("CANTEEN_SEED_DEMO_DATA", &seed)?;
        }

        if let Some(users) = env("CANTEEN_SESSION_USERS") {
            config.session_users = users
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(hour) = self.simulated_hour {
            if hour > 23 {
                return Err(ConfigError::invalid("simulated_hour", "must be between 0 and 23"));
            }
        }
        if !(MIN_PICKUP_RATIO..=1.0).contains(&self.pickup_ratio) {
            return Err(ConfigError::invalid(
                "pickup_ratio",
                format!("must be between {MIN_PICKUP_RATIO} and 1.0"),
            ));
        }
        if self.tick_interval_secs == 0 {
            return Err(ConfigError::invalid("tick_interval_secs", "must be positive"));
        }
        Ok(())
    }

    /// Find the config file: an explicit path, or `canteen.toml` if present
    fn find_config_file(explicit: Option<String>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            }
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("cannot parse {value:?}"),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::from_sources(None, env(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.tick_interval_secs, 60);
        assert_eq!(config.pickup_ratio, 0.97);
        assert!(config.seed_demo_data);
        assert_eq!(config.simulated_hour, None);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = r#"
            log_level = "debug"
            simulated_hour = 9
            session_users = ["emp124"]
        "#;
        let config = ServiceConfig::from_sources(
            Some(file),
            env(&[
                ("CANTEEN_SIMULATED_HOUR", "14"),
                ("CANTEEN_SESSION_USERS", "emp125, emp126,"),
            ]),
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.simulated_hour, Some(14));
        assert_eq!(config.session_users, vec!["emp125", "emp126"]);
        assert_eq!(config.tick_interval_secs, 60);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ServiceConfig::from_sources(None, env(&[("CANTEEN_SIMULATED_HOUR", "24")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "simulated_hour", .. }));

        let err = ServiceConfig::from_sources(None, env(&[("CANTEEN_PICKUP_RATIO", "0.5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "pickup_ratio", .. }));

        let err = ServiceConfig::from_sources(None, env(&[("CANTEEN_TICK_INTERVAL_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = ServiceConfig::from_sources(None, env(&[("CANTEEN_SEED_DEMO_DATA", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CANTEEN_SEED_DEMO_DATA", .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let err = ServiceConfig::from_sources(Some("tick_interval_secs = \"soon\""), env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
