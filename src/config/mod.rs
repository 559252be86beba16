// Configuration module entry point
// Loads settings from an optional file and the environment

mod types;

pub use types::{LoggingSettings, ServerSettings, Settings};

use crate::server::ServerOptions;

/// Default config file, looked up without extension ("httpdrone.toml", ...)
pub const DEFAULT_CONFIG_PATH: &str = "httpdrone";

/// Prefix for environment overrides, e.g. `HTTPDRONE_SERVER__PORT=8080`
const ENV_PREFIX: &str = "HTTPDRONE";

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from the given file path (extension optional).
    ///
    /// Precedence, lowest first: defaults, file, `HTTPDRONE_*` variables,
    /// then a bare `PORT` variable.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::builder(config_path)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder(
        config_path: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 1337)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")
    }

    /// Address to hand to `Server::bind`
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.server.host.as_str(), self.server.port)
    }

    pub fn server_options(&self) -> ServerOptions {
        ServerOptions {
            access_log: self.logging.access_log,
            access_log_format: self.logging.access_log_format.clone(),
            ..ServerOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn from_file(path: &str) -> Settings {
        Settings::builder(path)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = from_file("/nonexistent/httpdrone-settings");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.logging.access_log_format, "combined");
        assert!(settings.logging.access_log);
        assert_eq!(settings.logging.access_log_file, None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("httpdrone-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 8088\n\n[logging]\naccess_log = false\naccess_log_format = \"json\"\nerror_log_file = \"/var/log/httpdrone/error.log\"\n",
        )
        .unwrap();

        let settings = from_file(path.to_str().unwrap());
        assert_eq!(settings.bind_addr(), ("0.0.0.0", 8088));
        assert_eq!(
            settings.logging.error_log_file.as_deref(),
            Some("/var/log/httpdrone/error.log")
        );

        let options = settings.server_options();
        assert!(!options.access_log);
        assert_eq!(options.access_log_format, "json");
        assert!(options.handle_signals);
    }
}
