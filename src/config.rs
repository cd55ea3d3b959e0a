//! Settings for the interactive clinic driver.

use core::fmt::{Debug, Display};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CliConfig {
    /// Name of the clinic the session manages.
    pub clinic_name: String,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Start with the sample roster of doctors, patients, rooms and services.
    pub seed_demo: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            clinic_name: "Health".to_string(),
            log_filter: "info".to_string(),
            seed_demo: true,
        }
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Extract(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Load settings from `clinic.toml` and `CLINIC_*` environment variables.
pub fn get_config() -> Result<CliConfig, ConfigError> {
    Ok(Figment::from(Serialized::defaults(CliConfig::default()))
        .merge(Toml::file("clinic.toml"))
        .merge(Env::prefixed("CLINIC_"))
        .extract()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            assert_eq!(get_config().unwrap(), CliConfig::default());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "clinic.toml",
                r#"
                clinic_name = "Private Clinic"
                seed_demo = false
                "#,
            )?;
            jail.set_env("CLINIC_LOG_FILTER", "debug");
            jail.set_env("CLINIC_CLINIC_NAME", "Zdorovia");

            let config = get_config().unwrap();
            assert_eq!(config.clinic_name, "Zdorovia");
            assert_eq!(config.log_filter, "debug");
            assert!(!config.seed_demo);
            Ok(())
        });
    }

    #[test]
    fn malformed_values_are_reported() {
        Jail::expect_with(|jail| {
            jail.create_file("clinic.toml", "seed_demo = \"sometimes\"")?;
            assert!(get_config().is_err());
            Ok(())
        });
    }
}
