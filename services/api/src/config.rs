use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all service configuration loaded from the environment at startup.
///
/// Backend settings (`PROJECT_ID`, `LOCATION`, `MODEL_NAME`) are not part of
/// this struct; the assistant reads them when each persona is first used.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// `RUST_LOG` directives, validated as an [`EnvFilter`].
    pub log_filter: String,
    /// Upper bound on a single `/chat` backend call, if any.
    pub chat_timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str = match std::env::var("BIND_ADDRESS") {
            Ok(addr) => addr,
            Err(_) => {
                let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
                let port = port.parse::<u16>().map_err(|e| {
                    ConfigError::InvalidValue("PORT".to_string(), e.to_string())
                })?;
                format!("0.0.0.0:{}", port)
            }
        };
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        EnvFilter::try_new(&log_filter).map_err(|e| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid filter: {}", log_filter, e),
            )
        })?;

        let chat_timeout = match std::env::var("CHAT_TIMEOUT_SECS") {
            Ok(secs) => {
                let secs = secs.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "CHAT_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a positive number of seconds", secs),
                    )
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            bind_address,
            log_filter,
            chat_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("PORT");
            env::remove_var("RUST_LOG");
            env::remove_var("CHAT_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:8080");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.chat_timeout, None);
    }

    #[test]
    #[serial]
    fn test_config_port_only() {
        clear_env_vars();
        unsafe {
            env::set_var("PORT", "9090");
        }

        let config = Config::from_env().expect("Config should load successfully");
        clear_env_vars();

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:9090");
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:3000");
            env::set_var("PORT", "9090");
            env::set_var("RUST_LOG", "info,webeye_core=debug");
            env::set_var("CHAT_TIMEOUT_SECS", "30");
        }

        let config = Config::from_env().expect("Config should load successfully");
        clear_env_vars();

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_filter, "info,webeye_core=debug");
        assert_eq!(config.chat_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    #[serial]
    fn test_config_invalid_port() {
        clear_env_vars();
        unsafe {
            env::set_var("PORT", "eighty");
        }

        let err = Config::from_env().unwrap_err();
        clear_env_vars();

        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "PORT"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_bind_address() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "not-a-valid-address");
        }

        let err = Config::from_env().unwrap_err();
        clear_env_vars();

        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "BIND_ADDRESS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_filter() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "webeye_core=loud");
        }

        let err = Config::from_env().unwrap_err();
        clear_env_vars();

        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_config_accepts_bare_level_and_per_target_filters() {
        for filter in ["DEBUG", "warn", "webeye_api=trace,tower_http=debug"] {
            clear_env_vars();
            unsafe {
                env::set_var("RUST_LOG", filter);
            }

            let config = Config::from_env().expect("Config should load successfully");
            clear_env_vars();

            assert_eq!(config.log_filter, filter);
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_chat_timeout() {
        for bad in ["0", "-5", "soon"] {
            clear_env_vars();
            unsafe {
                env::set_var("CHAT_TIMEOUT_SECS", bad);
            }

            let err = Config::from_env().unwrap_err();
            clear_env_vars();

            match err {
                ConfigError::InvalidValue(var, _) => assert_eq!(var, "CHAT_TIMEOUT_SECS"),
            }
        }
    }
}
