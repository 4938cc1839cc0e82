// Configuration module
use attendance_commons::{AuthSettings, CorsSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 means one worker per CPU core
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path; empty disables the file layer
    #[serde(default)]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target level overrides, e.g. `actix_web = "debug"`
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: String::new(),
            log_to_console: default_true(),
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    0
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing file is not an error: every setting has a default or an
    /// environment variable, so a deployment can run on env vars alone. A
    /// present but malformed file is fatal.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let mut config: ServerConfig = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
            toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?
        } else {
            ServerConfig::default()
        };

        // Override with environment variables if present
        config.apply_env_overrides()?;

        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides for sensitive configuration
    ///
    /// Supported environment variables:
    /// - ATTENDANCE_HOST: Override server.host
    /// - ATTENDANCE_PORT: Override server.port
    /// - ATTENDANCE_LOG_LEVEL: Override logging.level
    /// - ATTENDANCE_LOG_FILE: Override logging.file_path
    /// - ATTENDANCE_LOG_TO_CONSOLE: Override logging.log_to_console
    /// - ATTENDANCE_COOKIE_SECURE: Override auth.cookie_secure
    /// - SUPABASE_URL: Override auth.supabase_url
    /// - SUPABASE_ANON_KEY: Override auth.supabase_anon_key
    /// - SUPABASE_SERVICE_ROLE_KEY: Override auth.supabase_service_role_key
    /// - APP_BASE_URL: Override auth.app_base_url
    /// - AUTH_COOKIE_SECRET: Override auth.session_secret
    /// - ALLOWED_EMAIL_DOMAIN: Override auth.allowed_email_domain
    ///
    /// Environment variables take precedence over config.toml values
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("ATTENDANCE_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("ATTENDANCE_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid ATTENDANCE_PORT value: {}", port_str))?;
        }

        if let Ok(level) = env::var("ATTENDANCE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(path) = env::var("ATTENDANCE_LOG_FILE") {
            self.logging.file_path = path;
        }

        if let Ok(val) = env::var("ATTENDANCE_LOG_TO_CONSOLE") {
            self.logging.log_to_console = is_truthy(&val);
        }

        if let Ok(val) = env::var("ATTENDANCE_COOKIE_SECURE") {
            self.auth.cookie_secure = is_truthy(&val);
        }

        if let Ok(url) = env::var("SUPABASE_URL") {
            self.auth.supabase_url = url;
        }

        if let Ok(key) = env::var("SUPABASE_ANON_KEY") {
            self.auth.supabase_anon_key = key;
        }

        if let Ok(key) = env::var("SUPABASE_SERVICE_ROLE_KEY") {
            self.auth.supabase_service_role_key = key;
        }

        if let Ok(url) = env::var("APP_BASE_URL") {
            self.auth.app_base_url = url;
        }

        if let Ok(secret) = env::var("AUTH_COOKIE_SECRET") {
            self.auth.session_secret = secret;
        }

        if let Ok(domain) = env::var("ALLOWED_EMAIL_DOMAIN") {
            self.auth.allowed_email_domain = domain;
        }

        Ok(())
    }

    /// Validate configuration settings
    ///
    /// Every auth setting is required: a missing identity-provider key or
    /// signing secret must stop the server rather than surface later as a
    /// broken login flow.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        let required: &[(&str, &str, &str)] = &[
            (&self.auth.supabase_url, "auth.supabase_url", "SUPABASE_URL"),
            (&self.auth.supabase_anon_key, "auth.supabase_anon_key", "SUPABASE_ANON_KEY"),
            (
                &self.auth.supabase_service_role_key,
                "auth.supabase_service_role_key",
                "SUPABASE_SERVICE_ROLE_KEY",
            ),
            (&self.auth.app_base_url, "auth.app_base_url", "APP_BASE_URL"),
            (&self.auth.session_secret, "auth.session_secret", "AUTH_COOKIE_SECRET"),
            (
                &self.auth.allowed_email_domain,
                "auth.allowed_email_domain",
                "ALLOWED_EMAIL_DOMAIN",
            ),
        ];
        for (value, key, env_var) in required {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!(
                    "{} is required (set it in config.toml or via {})",
                    key,
                    env_var
                ));
            }
        }

        Ok(())
    }
}

fn is_truthy(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1" || val.to_lowercase() == "yes"
}
