use std::{env, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mervolt_contact::SmtpSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Mail account identifier
    #[serde(default = "default_account")]
    pub smtp_username: String,
    /// Mail account secret; left empty it only fails at send time
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_account")]
    pub from_address: String,
    /// Where contact submissions are delivered
    #[serde(default = "default_account")]
    pub contact_address: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: default_account(),
            smtp_password: String::new(),
            from_address: default_account(),
            contact_address: default_account(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmailConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn smtp_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            timeout: self.timeout(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_account() -> String {
    "mervoltelektrik@gmail.com".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. EMAIL_USER / EMAIL_PASS
    /// 2. Environment variables (MERVOLT__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MERVOLT")
                .separator("__")
                .try_parsing(true),
        );

        // Serverless-era variable names, still set on existing deployments
        if let Ok(user) = env::var("EMAIL_USER") {
            builder = builder
                .set_override("email.smtp_username", user.clone())?
                .set_override("email.from_address", user)?;
        }
        if let Ok(pass) = env::var("EMAIL_PASS") {
            builder = builder.set_override("email.smtp_password", pass)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// The SMTP secret is not checked here.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.timeout_secs == 0 {
            return Err("Email timeout must be at least 1 second".to_string());
        }
        for (label, address) in [
            ("from_address", &self.email.from_address),
            ("contact_address", &self.email.contact_address),
        ] {
            if !looks_like_address(address) {
                return Err(format!("email.{label} is not a valid address: {address}"));
            }
        }
        Ok(())
    }
}

fn looks_like_address(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
