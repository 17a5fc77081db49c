//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables (and an
//! optional `.env` file). Every value has a default so the helpdesk starts
//! without any configuration at all.
//!
//! Business limits (attachment ceilings, issue length, duplicate window) are
//! deliberately *not* here; they are fixed constants of the ticket domain.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub store_path: String,
    pub host: String,
    pub port: u16,
    pub lookup_delay_ms: u64,
    pub student_username: String,
    pub student_password: String,
    pub staff_username: String,
    pub staff_password: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Unparseable config value, using default");
            default
        }),
        Err(_) => default,
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "helpdesk"),
            log_level: var_or("LOG_LEVEL", "api=info,services=info,db=info"),
            log_file: var_or("LOG_FILE", "helpdesk.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            store_path: var_or("STORE_PATH", "data/store"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 3000),
            lookup_delay_ms: parsed_or("LOOKUP_DELAY_MS", 500),
            student_username: var_or("STUDENT_USERNAME", "user123"),
            student_password: var_or("STUDENT_PASSWORD", "changeMe123!"),
            staff_username: var_or("STAFF_USERNAME", "admin456"),
            staff_password: var_or("STAFF_PASSWORD", "securePass789!"),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock has been poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        AppConfig::set_field(|cfg| *cfg = AppConfig::from_env());
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_store_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.store_path = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_lookup_delay_ms(value: u64) {
        AppConfig::set_field(|cfg| cfg.lookup_delay_ms = value);
    }

    pub fn set_student_credentials(username: impl Into<String>, password: impl Into<String>) {
        AppConfig::set_field(|cfg| {
            cfg.student_username = username.into();
            cfg.student_password = password.into();
        });
    }

    pub fn set_staff_credentials(username: impl Into<String>, password: impl Into<String>) {
        AppConfig::set_field(|cfg| {
            cfg.staff_username = username.into();
            cfg.staff_password = password.into();
        });
    }
}

// --- Free accessors, so call sites read `config::port()` ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn store_path() -> String {
    AppConfig::global().store_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn lookup_delay_ms() -> u64 {
    AppConfig::global().lookup_delay_ms
}

/// `(username, password)` of the student account.
pub fn student_credentials() -> (String, String) {
    let cfg = AppConfig::global();
    (cfg.student_username.clone(), cfg.student_password.clone())
}

/// `(username, password)` of the staff account.
pub fn staff_credentials() -> (String, String) {
    let cfg = AppConfig::global();
    (cfg.staff_username.clone(), cfg.staff_password.clone())
}
