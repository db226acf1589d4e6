use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "SHELF_ENV";
const CONFIG_DIR_ENV: &str = "SHELF_CONFIG_DIR";
const ENV_PREFIX: &str = "SHELF";
/// Bare port variable set by container platforms.
const PORT_ENV: &str = "PORT";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// `SHELF_*` variables and finally `PORT`.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::current_dir()
                    .map(|cwd| cwd.join("config"))
                    .unwrap_or_else(|_| PathBuf::from("config"))
            });

        let mut settings = Self::from_dir(&config_dir, &environment)?;
        settings.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;

        Ok(settings)
    }

    /// Build settings from `base.toml` and `{environment}.toml` inside `config_dir`,
    /// overlaid with `SHELF_*` variables. Missing files are skipped.
    pub fn from_dir(config_dir: &Path, environment: &str) -> anyhow::Result<Self> {
        let parsed_environment: Environment = environment.parse()?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // The selector variable wins over anything a file declares.
        settings.environment = parsed_environment;

        Ok(settings)
    }

    /// Apply the platform `PORT` value, if any.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        if let Some(raw) = port.map(str::trim).filter(|raw| !raw.is_empty()) {
            self.server.port = raw
                .parse()
                .with_context(|| format!("invalid {} value '{}'", PORT_ENV, raw))?;
        }
        Ok(())
    }

    /// Whether the Swagger UI and raw OpenAPI document are served.
    pub fn docs_enabled(&self) -> bool {
        self.server
            .docs
            .unwrap_or(self.environment != Environment::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Explicit docs switch; unset means "on everywhere except production".
    #[serde(default)]
    pub docs: Option<bool>,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
            docs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// Fallback filter directive when `RUST_LOG` is unset.
    #[serde(default = "TelemetrySettings::default_level")]
    pub level: String,
}

impl TelemetrySettings {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shelf-settings-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_server_listens_on_8080() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.request_timeout_ms, 15000);
    }

    #[test]
    fn missing_config_dir_yields_defaults() {
        let dir = std::env::temp_dir().join("shelf-settings-does-not-exist");
        let settings = Settings::from_dir(&dir, "local").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = scratch_dir("overlay");
        std::fs::write(
            dir.join("base.toml"),
            "[server]\nport = 3000\nhost = \"127.0.0.1\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("staging.toml"),
            "[server]\nport = 4000\n\n[telemetry]\nlog_format = \"json\"\n",
        )
        .unwrap();

        let settings = Settings::from_dir(&dir, "staging").unwrap();
        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let dir = std::env::temp_dir().join("shelf-settings-does-not-exist");
        let err = Settings::from_dir(&dir, "qa").unwrap_err();
        assert!(err.to_string().contains("unsupported environment"));
    }

    #[test]
    fn port_override_replaces_configured_port() {
        let mut settings = Settings::default();
        settings.apply_port_override(Some("5050")).unwrap();
        assert_eq!(settings.server.port, 5050);

        settings.apply_port_override(None).unwrap();
        assert_eq!(settings.server.port, 5050);

        settings.apply_port_override(Some("  ")).unwrap();
        assert_eq!(settings.server.port, 5050);
    }

    #[test]
    fn port_override_rejects_garbage() {
        let mut settings = Settings::default();
        assert!(settings.apply_port_override(Some("eighty")).is_err());
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn docs_follow_environment_unless_forced() {
        let mut settings = Settings::default();
        assert!(settings.docs_enabled());

        settings.environment = Environment::Production;
        assert!(!settings.docs_enabled());

        settings.server.docs = Some(true);
        assert!(settings.docs_enabled());
    }
}
