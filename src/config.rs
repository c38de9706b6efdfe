//! Client configuration
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (pubchem.toml)
//! - Environment variables (PUBCHEM__*)
//!
//! ## Example config file (pubchem.toml):
//! ```toml
//! [service]
//! base_url = "https://pubchem.ncbi.nlm.nih.gov/rest/pug"
//!
//! [http]
//! timeout_secs = 30
//! user_agent = "pubchem-query/0.1"
//!
//! [defaults]
//! format = "json"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::property::DataFormat;

/// Default PUG REST root
pub const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Remote service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Per-query defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Root URL; domains are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Defaults applied when a query does not say otherwise
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Response format
    #[serde(default)]
    pub format: DataFormat,

    /// Return bodies unparsed
    #[serde(default)]
    pub raw: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering `config_path` over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["pubchem.toml", ".pubchem.toml", "config/pubchem.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("gov", "pubchem", "pubchem-query") {
            let xdg_config = config_dir.config_dir().join("pubchem.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // PUBCHEM__HTTP__TIMEOUT_SECS=10 and friends
        builder = builder.add_source(
            Environment::with_prefix("PUBCHEM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.service.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.defaults.format, DataFormat::Json);
        assert!(!config.defaults.raw);
    }

    #[test]
    fn test_serialize_config() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[service]"));
        assert!(toml_str.contains("[http]"));
        assert!(toml_str.contains("format = \"json\""));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[service]\nbase_url = \"http://localhost:8080/rest/pug/\"\n\n[defaults]\nformat = \"xml\"\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/rest/pug");
        assert_eq!(config.defaults.format, DataFormat::Xml);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = ClientConfig::default();
        config.http.timeout_secs = 5;
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = ClientConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.http.timeout_secs, 5);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = ClientConfig::load_from(Some(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = \"soon\"\n").unwrap();

        let err = ClientConfig::load_from(Some(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("pubchem.toml");

        let err = ClientConfig::default().save(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, QueryError::Io(_)));
    }
}
