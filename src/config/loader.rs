//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    EngineConfig, PayrollFailurePolicy, SeedConfig, ServerConfig, UnterminatedShiftPolicy,
};

/// Loads and provides access to the engine configuration.
///
/// # File layout
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:3000"
/// timecard:
///   unterminated_shift_policy: drop        # or credit-to-range-end
/// payroll:
///   failure_policy: fail-fast              # or isolate
/// seed:
///   employees:
///     - { id: emp_001, name: Dana Reyes, pay_rate: "25.00" }
///   items:
///     - { sku: PAL-01, name: Pallet wrap, on_hand: 40, reorder_level: 5 }
/// ```
///
/// # Example
///
/// ```no_run
/// use timeclock_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/timeclock.yaml")?;
/// println!("Listening on {}", loader.server().bind_address);
/// # Ok::<(), timeclock_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid configuration YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        // An empty file is a valid, all-defaults configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: EngineConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        if let Some(bad) = config.seed.employees.iter().find(|e| e.pay_rate.is_sign_negative()) {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: format!("seed employee '{}' has a negative pay rate", bad.name),
            });
        }

        Ok(Self { config })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the policy for shifts without a closing punch.
    pub fn unterminated_shift_policy(&self) -> UnterminatedShiftPolicy {
        self.config.timecard.unterminated_shift_policy
    }

    /// Returns the payroll failure policy.
    pub fn payroll_failure_policy(&self) -> PayrollFailurePolicy {
        self.config.payroll.failure_policy
    }

    /// Returns the startup seed data.
    pub fn seed(&self) -> &SeedConfig {
        &self.config.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const FULL_CONFIG: &str = r#"
server:
  bind_address: "127.0.0.1:8080"
timecard:
  unterminated_shift_policy: credit-to-range-end
payroll:
  failure_policy: isolate
seed:
  employees:
    - id: emp_001
      name: Dana Reyes
      pay_rate: "25.00"
    - name: Sam Ortiz
      pay_rate: "31.75"
  items:
    - sku: PAL-01
      name: Pallet wrap
      on_hand: 40
      reorder_level: 5
"#;

    #[test]
    fn test_load_full_configuration() {
        let loader = ConfigLoader::from_yaml_str(FULL_CONFIG).unwrap();

        assert_eq!(loader.server().bind_address, "127.0.0.1:8080");
        assert_eq!(
            loader.unterminated_shift_policy(),
            UnterminatedShiftPolicy::CreditToRangeEnd
        );
        assert_eq!(loader.payroll_failure_policy(), PayrollFailurePolicy::Isolate);
        assert_eq!(loader.seed().employees.len(), 2);
        assert_eq!(loader.seed().employees[0].id.as_deref(), Some("emp_001"));
        assert_eq!(loader.seed().employees[1].id, None);
        assert_eq!(loader.seed().employees[1].pay_rate, Decimal::new(3175, 2));
        assert_eq!(loader.seed().items[0].reserved, 0);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let loader = ConfigLoader::from_yaml_str("server:\n  bind_address: \"0.0.0.0:9000\"\n")
            .unwrap();

        assert_eq!(loader.server().bind_address, "0.0.0.0:9000");
        assert_eq!(loader.unterminated_shift_policy(), UnterminatedShiftPolicy::Drop);
        assert_eq!(loader.payroll_failure_policy(), PayrollFailurePolicy::FailFast);
        assert!(loader.seed().employees.is_empty());
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let loader = ConfigLoader::from_yaml_str("").unwrap();
        assert_eq!(loader.server().bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = ConfigLoader::from_yaml_str("payroll:\n  failure_policy: retry\n");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_negative_seed_pay_rate_is_parse_error() {
        let yaml = "seed:\n  employees:\n    - name: Bad\n      pay_rate: \"-1.00\"\n";
        match ConfigLoader::from_yaml_str(yaml) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("negative pay rate"))
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/timeclock.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("timeclock.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_sample_configuration() {
        let loader = ConfigLoader::load("./config/timeclock.yaml").unwrap();
        assert!(!loader.seed().employees.is_empty());
    }
}
