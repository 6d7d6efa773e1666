//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// File name of the identity record inside the data directory
pub const IDENTITY_FILE_NAME: &str = "identity.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Persistence configuration
    pub persistence: PersistenceConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Demo session configuration
    pub demo: DemoConfig,
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Base directory for the identity record
    pub data_dir: PathBuf,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Simulated network latency for the credential exchange
    pub login_delay: Duration,
}

/// Credentials used by the demo binary
#[derive(Clone)]
pub struct DemoConfig {
    /// Email to sign in with
    pub email: String,
    /// Password to sign in with
    pub password: String,
}

// Keep the password out of logs
impl fmt::Debug for DemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            persistence: PersistenceConfig {
                data_dir: default_data_dir(),
            },
            auth: AuthConfig {
                login_delay: Duration::from_millis(1000),
            },
            demo: DemoConfig {
                email: "analyst@example.com".to_string(),
                password: "demo".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            persistence: PersistenceConfig {
                data_dir: env::var_os("DASHBOARD_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.persistence.data_dir),
            },
            auth: AuthConfig {
                login_delay: env::var("LOGIN_DELAY_MS")
                    .ok()
                    .and_then(|ms| ms.parse().ok())
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.auth.login_delay),
            },
            demo: DemoConfig {
                email: env::var("DEMO_EMAIL").unwrap_or(defaults.demo.email),
                password: env::var("DEMO_PASSWORD").unwrap_or(defaults.demo.password),
            },
        }
    }

    /// Path of the identity record file
    pub fn identity_path(&self) -> PathBuf {
        self.persistence.data_dir.join(IDENTITY_FILE_NAME)
    }
}

// Default to ~/.intel-dashboard or the current directory
fn default_data_dir() -> PathBuf {
    if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(".intel-dashboard")
    } else {
        PathBuf::from(".intel-dashboard")
    }
}
