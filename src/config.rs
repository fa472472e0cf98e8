use std::env;
use thiserror::Error;

/// Search service address used when `PDFSEARCH_ENDPOINT` is not set.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/upload_pdf";

/// Result limit used when `PDFSEARCH_TOP_N` is not set.
pub const DEFAULT_TOP_N: i64 = 5;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the search client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute URL of the `upload_pdf` search endpoint.
    pub endpoint: String,
    /// Result limit pre-filled into the controller.
    pub default_top_n: i64,
    /// Optional path receiving a copy of the logs.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_top_n: DEFAULT_TOP_N,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint =
            load_env_optional("PDFSEARCH_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        reqwest::Url::parse(&endpoint)
            .map_err(|_| ConfigError::InvalidValue("PDFSEARCH_ENDPOINT".to_string()))?;

        Ok(Self {
            endpoint,
            default_top_n: load_env_optional("PDFSEARCH_TOP_N")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("PDFSEARCH_TOP_N".to_string()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_TOP_N),
            log_file: load_env_optional("PDFSEARCH_LOG_FILE"),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Load configuration from the environment, honoring a `.env` file when present.
pub fn init_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        endpoint = %config.endpoint,
        default_top_n = config.default_top_n,
        log_file = ?config.log_file,
        "Loaded configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const KEYS: [&str; 3] = ["PDFSEARCH_ENDPOINT", "PDFSEARCH_TOP_N", "PDFSEARCH_LOG_FILE"];

    /// Run `f` with the crate's variables set to `values` (in `KEYS` order), then unset them.
    fn with_env<T>(values: [Option<&str>; 3], f: impl FnOnce() -> T) -> T {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let apply = |values: [Option<&str>; 3]| {
            for (key, value) in KEYS.into_iter().zip(values) {
                // SAFETY: every test touching these variables holds `ENV_LOCK`.
                unsafe {
                    match value {
                        Some(value) => env::set_var(key, value),
                        None => env::remove_var(key),
                    }
                }
            }
        };
        apply(values);
        let result = f();
        apply([None; 3]);
        result
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = with_env([None; 3], Config::from_env).expect("defaults");
        assert_eq!(config.endpoint, "http://localhost:5000/upload_pdf");
        assert_eq!(config.default_top_n, 5);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn reads_endpoint_top_n_and_log_file() {
        let config = with_env(
            [
                Some("http://search.internal:8080/upload_pdf"),
                Some(" 12 "),
                Some("/tmp/pdfsearch.log"),
            ],
            Config::from_env,
        )
        .expect("valid config");

        assert_eq!(config.endpoint, "http://search.internal:8080/upload_pdf");
        assert_eq!(config.default_top_n, 12);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/pdfsearch.log"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = with_env([Some("  "), Some(""), Some(" ")], Config::from_env)
            .expect("blank values fall back");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.default_top_n, DEFAULT_TOP_N);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn relative_endpoint_is_rejected() {
        let err = with_env([Some("upload_pdf"), None, None], Config::from_env)
            .expect_err("relative endpoint");
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "PDFSEARCH_ENDPOINT"));
    }

    #[test]
    fn non_integer_top_n_is_rejected() {
        let err = with_env([None, Some("abc"), None], Config::from_env).expect_err("bad top_n");
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "PDFSEARCH_TOP_N"));
    }

    #[test]
    fn init_config_reads_the_environment_on_every_call() {
        let first = with_env([None, Some("17"), None], init_config).expect("first");
        let second = with_env([None, Some("9"), None], init_config).expect("second");
        assert_eq!(first.default_top_n, 17);
        assert_eq!(second.default_top_n, 9);
    }
}
