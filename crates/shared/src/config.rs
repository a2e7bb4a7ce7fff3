//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger backend configuration.
    #[serde(default)]
    pub actual: ActualConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Ledger backend (Actual Budget) configuration.
#[derive(Clone, Deserialize)]
pub struct ActualConfig {
    /// Sync server URL handed to the ledger library on init.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Sync server password.
    #[serde(default)]
    pub password: String,
    /// Budget (sync id) to download after init.
    #[serde(default)]
    pub budget_id: String,
    /// Local directory the ledger library caches budgets in.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// URL of the bridge process hosting the ledger library.
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,
}

impl Default for ActualConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            password: String::new(),
            budget_id: String::new(),
            data_dir: default_data_dir(),
            bridge_url: default_bridge_url(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for ActualConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActualConfig")
            .field("server_url", &self.server_url)
            .field("password", &"<redacted>")
            .field("budget_id", &self.budget_id)
            .field("data_dir", &self.data_dir)
            .field("bridge_url", &self.bridge_url)
            .finish()
    }
}

fn default_server_url() -> String {
    "http://localhost:5006".to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_bridge_url() -> String {
    "http://127.0.0.1:5007".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `LEDGERLINE__*` environment variables (e.g.
    /// `LEDGERLINE__ACTUAL__BUDGET_ID`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERLINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Checks that the settings needed to open the budget are present.
    ///
    /// # Errors
    ///
    /// Returns an error naming every missing setting.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let missing: Vec<&str> = [
            ("actual.password", self.actual.password.as_str()),
            ("actual.budget_id", self.actual.budget_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(config::ConfigError::Message(format!(
                "Missing required configuration: {}",
                missing.join(", ")
            )))
        }
    }

    /// Socket address string the HTTP server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
