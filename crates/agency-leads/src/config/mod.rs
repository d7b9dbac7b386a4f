use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use email_address::EmailAddress;
use secrecy::{ExposeSecret, SecretString};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the lead intake service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = LogFormat::parse(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        )?;

        // Mail credentials are checked per request, not here: the service has
        // to come up and answer health checks even when they are missing.
        let mail = MailConfig {
            api_key: env::var("RESEND_API_KEY")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::new),
            from_address: env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| default_from_address()),
            from_name: env::var("MAIL_FROM_NAME").unwrap_or_else(|_| default_from_name()),
            operator_inbox: env::var("MAIL_OPERATOR_INBOX")
                .unwrap_or_else(|_| default_operator_inbox()),
            api_base: env::var("RESEND_API_BASE").unwrap_or_else(|_| default_api_base()),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            mail,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(raw.to_string())),
        }
    }
}

/// Outbound mail settings for the Resend transport.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: Option<SecretString>,
    pub from_address: String,
    pub from_name: String,
    pub operator_inbox: String,
    pub api_base: String,
}

impl MailConfig {
    /// Formatted `From` header value.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }

    pub fn validate(&self) -> Result<(), MailConfigError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or(MailConfigError::MissingApiKey)?;
        if !key.expose_secret().starts_with("re_") {
            return Err(MailConfigError::InvalidApiKey);
        }
        if !EmailAddress::is_valid(&self.from_address) {
            return Err(MailConfigError::InvalidAddress {
                field: "MAIL_FROM_ADDRESS",
                value: self.from_address.clone(),
            });
        }
        if !EmailAddress::is_valid(&self.operator_inbox) {
            return Err(MailConfigError::InvalidAddress {
                field: "MAIL_OPERATOR_INBOX",
                value: self.operator_inbox.clone(),
            });
        }
        Ok(())
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_address: default_from_address(),
            from_name: default_from_name(),
            operator_inbox: default_operator_inbox(),
            api_base: default_api_base(),
        }
    }
}

fn default_from_address() -> String {
    "noreply@agency.example".to_string()
}

fn default_from_name() -> String {
    "Agency Bookings".to_string()
}

fn default_operator_inbox() -> String {
    "bookings@agency.example".to_string()
}

fn default_api_base() -> String {
    "https://api.resend.com".to_string()
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MailConfigError {
    #[error("RESEND_API_KEY is not set")]
    MissingApiKey,
    #[error("RESEND_API_KEY must start with 're_'")]
    InvalidApiKey,
    #[error("{field} is not a valid e-mail address: '{value}'")]
    InvalidAddress { field: &'static str, value: String },
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'json' (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidLogFormat(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
