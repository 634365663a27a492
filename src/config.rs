//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `TELLERKIT_LOG_LEVEL` and `TELLERKIT_LOCALE_ENDPOINT`
//! env overrides.

use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

const DEFAULT_LOCALE_TIMEOUT_MS: u64 = crate::net::DEFAULT_FETCH_TIMEOUT.as_millis() as u64;
const DEFAULT_HOST_BUFFER: usize = 64;

/// Locale backend configuration.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Full URL of the locale-loading endpoint.
    pub endpoint: String,
    /// Per-request deadline for the locale fetch, in milliseconds.
    pub timeout_ms: u64,
}

/// Host message channel configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Queue depth between the host transport and the relay.
    pub buffer: usize,
    /// Whether the stdin JSON-lines channel is enabled.
    pub stdin: bool,
}

/// Fully-resolved widget configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub widget_name: String,
    pub log_level: String,
    pub locale: LocaleConfig,
    pub host: HostConfig,
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    widget: RawWidget,
    locale: RawLocale,
    #[serde(default)]
    host: RawHost,
}

#[derive(Deserialize)]
struct RawWidget {
    name: String,
    log_level: String,
}

#[derive(Deserialize)]
struct RawLocale {
    endpoint: String,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

#[derive(Deserialize, Default)]
struct RawHost {
    #[serde(default)]
    buffer: Option<usize>,
    #[serde(default)]
    stdin: Option<bool>,
}

/// Load the default config file and apply env overrides.
pub fn load() -> Result<Config, AppError> {
    load_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// Load a specific config file and apply env overrides.
pub fn load_from(path: &Path) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let raw: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;
    resolve(raw)
}

fn resolve(raw: RawConfig) -> Result<Config, AppError> {
    let mut config = Config {
        widget_name: raw.widget.name,
        log_level: raw.widget.log_level,
        locale: LocaleConfig {
            endpoint: raw.locale.endpoint,
            timeout_ms: raw.locale.timeout_ms.unwrap_or(DEFAULT_LOCALE_TIMEOUT_MS),
        },
        host: HostConfig {
            buffer: raw.host.buffer.unwrap_or(DEFAULT_HOST_BUFFER),
            stdin: raw.host.stdin.unwrap_or(true),
        },
    };

    if let Ok(level) = env::var("TELLERKIT_LOG_LEVEL")
        && !level.is_empty()
    {
        config.log_level = level;
    }
    if let Ok(endpoint) = env::var("TELLERKIT_LOCALE_ENDPOINT")
        && !endpoint.is_empty()
    {
        config.locale.endpoint = endpoint;
    }

    if config.locale.endpoint.is_empty() {
        return Err(AppError::Config("locale.endpoint must not be empty".into()));
    }
    if config.host.buffer == 0 {
        return Err(AppError::Config("host.buffer must be greater than 0".into()));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    // Assertions below avoid `log_level` and `locale.endpoint` — those
    // two fields are env-overridable and `env_overrides_apply` runs in
    // the same process.

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    const MINIMAL: &str = r#"
        [widget]
        name = "teller"
        log_level = "info"

        [locale]
        endpoint = "http://127.0.0.1:8090/loadLocale"
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let file = write_config(MINIMAL);
        let config = load_from(file.path()).unwrap();
        assert_eq!(config.widget_name, "teller");
        assert_eq!(config.locale.timeout_ms, 5000);
        assert_eq!(config.host.buffer, 64);
        assert!(config.host.stdin);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let file = write_config(
            r#"
            [widget]
            name = "teller"
            log_level = "debug"

            [locale]
            endpoint = "http://127.0.0.1:8090/loadLocale"
            timeout_ms = 250

            [host]
            buffer = 8
            stdin = false
        "#,
        );
        let config = load_from(file.path()).unwrap();
        assert_eq!(config.locale.timeout_ms, 250);
        assert_eq!(config.host.buffer, 8);
        assert!(!config.host.stdin);
    }

    #[test]
    fn missing_locale_section_is_an_error() {
        let file = write_config("[widget]\nname = \"teller\"\nlog_level = \"info\"\n");
        let err = load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("cannot parse"));
    }

    #[test]
    fn zero_buffer_is_rejected() {
        let file = write_config(
            r#"
            [widget]
            name = "teller"
            log_level = "info"

            [locale]
            endpoint = "http://127.0.0.1:8090/loadLocale"

            [host]
            buffer = 0
        "#,
        );
        let err = load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("host.buffer"));
    }

    #[test]
    fn env_overrides_apply() {
        // SAFETY: single mutation point for these vars in the test binary.
        unsafe {
            env::set_var("TELLERKIT_LOG_LEVEL", "trace");
            env::set_var("TELLERKIT_LOCALE_ENDPOINT", "http://127.0.0.1:9999/l10n");
        }
        let file = write_config(MINIMAL);
        let config = load_from(file.path()).unwrap();
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.locale.endpoint, "http://127.0.0.1:9999/l10n");
    }
}
