use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.netlify.com/api/v1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Raw TOML configuration structure
/// Every section and key is optional; defaults are filled in by `Config::from_raw`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    netlify: RawNetlify,
    #[serde(default)]
    deploy: RawDeploy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    bind: Option<String>,
    port: Option<u16>,
    body_limit_bytes: Option<usize>,
    environment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNetlify {
    api_base: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeploy {
    name_prefix: Option<String>,
    max_name_len: Option<usize>,
    max_attempts: Option<u32>,
    decode_escaped_html: Option<bool>,
    cleanup_on_failure: Option<bool>,
}

/// Whether error responses may carry internal detail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::Invalid(format!(
                "Unknown environment '{}', expected 'development' or 'production'",
                other
            ))),
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub body_limit_bytes: usize,
    pub environment: Environment,
}

#[derive(Clone)]
pub struct NetlifyConfig {
    pub api_base: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

// Keeps the bearer token out of logs.
impl std::fmt::Debug for NetlifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlifyConfig")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settings that shape a single deployment
#[derive(Debug, Clone)]
pub struct DeploySettings {
    pub name_prefix: String,
    pub max_name_len: usize,
    pub max_attempts: u32,
    pub decode_escaped_html: bool,
    pub cleanup_on_failure: bool,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            name_prefix: "portfolio".to_string(),
            max_name_len: 48,
            max_attempts: 10,
            decode_escaped_html: false,
            cleanup_on_failure: true,
        }
    }
}

/// Process configuration, built once at startup and passed down explicitly
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub netlify: NetlifyConfig,
    pub deploy: DeploySettings,
}

impl Config {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let raw = match path {
            Some(p) => {
                let content = fs::read_to_string(p)?;
                toml::from_str(&content)?
            }
            None => RawConfig::default(),
        };
        let mut config = Self::from_raw(raw)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse from a TOML string without consulting the environment
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = DeploySettings::default();

        let ip: IpAddr = match raw.server.bind {
            Some(bind) => bind
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid server.bind '{}': {}", bind, e)))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let environment = match raw.server.environment {
            Some(env) => Environment::parse(&env)?,
            None => Environment::Development,
        };

        let config = Config {
            server: ServerConfig {
                addr: SocketAddr::new(ip, raw.server.port.unwrap_or(DEFAULT_PORT)),
                body_limit_bytes: raw.server.body_limit_bytes.unwrap_or(DEFAULT_BODY_LIMIT),
                environment,
            },
            netlify: NetlifyConfig {
                api_base: raw
                    .netlify
                    .api_base
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                token: raw.netlify.token.filter(|t| !t.trim().is_empty()),
                timeout: Duration::from_secs(raw.netlify.timeout_secs.unwrap_or(30)),
            },
            deploy: DeploySettings {
                name_prefix: raw.deploy.name_prefix.unwrap_or(defaults.name_prefix),
                max_name_len: raw.deploy.max_name_len.unwrap_or(defaults.max_name_len),
                max_attempts: raw.deploy.max_attempts.unwrap_or(defaults.max_attempts),
                decode_escaped_html: raw
                    .deploy
                    .decode_escaped_html
                    .unwrap_or(defaults.decode_escaped_html),
                cleanup_on_failure: raw
                    .deploy
                    .cleanup_on_failure
                    .unwrap_or(defaults.cleanup_on_failure),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `NETLIFY_TOKEN`, `NETLIFY_API_BASE`, `PORT` and `FOLIO_RELAY_ENV`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("NETLIFY_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.netlify.token = Some(token);
        }
        if let Some(base) = lookup("NETLIFY_API_BASE") {
            self.netlify.api_base = base;
        }
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid PORT '{}'", port)))?;
            self.server.addr.set_port(port);
        }
        if let Some(env) = lookup("FOLIO_RELAY_ENV") {
            self.server.environment = Environment::parse(&env)?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.deploy.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "deploy.max_attempts must be at least 1".to_string(),
            ));
        }
        // Room for a prefix plus the longest numeric suffix within the provider's 63-char limit
        if self.deploy.max_name_len == 0 || self.deploy.max_name_len > 52 {
            return Err(ConfigError::Invalid(format!(
                "deploy.max_name_len must be between 1 and 52, got {}",
                self.deploy.max_name_len
            )));
        }
        if !self.netlify.api_base.starts_with("http://")
            && !self.netlify.api_base.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "netlify.api_base must be an http(s) URL: '{}'",
                self.netlify.api_base
            )));
        }
        Ok(())
    }

    pub fn has_token(&self) -> bool {
        self.netlify.token.is_some()
    }
}
