use std::fmt::Write;
use std::env::VarError;
use config::ConfigError;
use serde::{Deserialize, Serialize};

///
/// The service configuration - initialised at start-up.
///
/// Only process-fixed values live here. The tunable security policy (password rules,
/// lockout thresholds, timeouts) is data, not configuration - see model::settings.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Configuration {
    pub bootstrap_handle: String,         // The handle of the factory-provisioned super-admin account.
    pub bootstrap_display_name: String,   // The display name given to that account when seeded.
}

impl Configuration {
    ///
    /// Load the service's configuration.
    ///
    pub fn from_env() -> Result<Configuration, ConfigError> {
        let mut cfg = config::Config::default();

        // Merge any environment variables with the same name as the struct fields.
        cfg.merge(config::Environment::new())?;

        // Set defaults for settings that were not specified.
        cfg.set_default("bootstrap_handle", "admin")?;
        cfg.set_default("bootstrap_display_name", "Administrator")?;

        let config: Configuration = cfg.try_into()?;

        Ok(config)
    }

    ///
    /// Pretty-print the config, one field per line.
    ///
    pub fn fmt_console(&self) -> Result<String, super::errors::WardenError> {
        // Serialise to JSON so we have fields to iterate.
        let values = serde_json::to_value(&self)?;

        // Turn into a hashmap.
        let values = values.as_object().expect("No config props");

        // Sort by keys.
        let mut sorted: Vec<_> = values.iter().collect();
        sorted.sort_by_key(|a| a.0);

        let mut output = String::new();
        for (k, v) in sorted {
            writeln!(&mut output, "{:>23}: {}", k, v).unwrap();
        }

        Ok(output)
    }
}

///
/// If the specified environment variable is not set for this process, set it to the default value specified.
///
pub fn default_env(key: &str, value: &str) {
    if let Err(VarError::NotPresent) = std::env::var(key) {
        std::env::set_var(key, value);
    }
}
