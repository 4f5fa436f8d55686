//! Interop configuration
//!
//! Read from a TOML table; every key is optional:
//!
//! ```toml
//! tie-break = "declaration-order"
//! max-arity = 16
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::score::MAX_ARITY;

/// What to do when two overloads share the lowest score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Report `AmbiguousOverload`
    #[default]
    Reject,
    /// Pick the tied candidate declared first
    DeclarationOrder,
}

/// Overload resolution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InteropConfig {
    /// Tie handling
    pub tie_break: TieBreak,

    /// Largest argument count accepted by resolution (at most `MAX_ARITY`)
    pub max_arity: usize,
}

impl Default for InteropConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Reject,
            max_arity: MAX_ARITY,
        }
    }
}

impl InteropConfig {
    /// Load a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: InteropConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Above this, summed worst-case argument scores could reach UNCOERCIBLE
        if self.max_arity > MAX_ARITY {
            return Err(ConfigError::ValidationError(format!(
                "max-arity {} exceeds the limit of {}",
                self.max_arity, MAX_ARITY
            )));
        }
        Ok(())
    }

    /// Serialize to a TOML string
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = InteropConfig::from_toml_str("").unwrap();
        assert_eq!(config, InteropConfig::default());
        assert_eq!(config.tie_break, TieBreak::Reject);
        assert_eq!(config.max_arity, MAX_ARITY);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = InteropConfig::from_toml_str(
            r#"
tie-break = "declaration-order"
max-arity = 16
"#,
        )
        .unwrap();
        assert_eq!(config.tie_break, TieBreak::DeclarationOrder);
        assert_eq!(config.max_arity, 16);
    }

    #[test]
    fn test_reject_large_arity() {
        let err = InteropConfig::from_toml_str("max-arity = 253").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(InteropConfig::from_toml_str("max-arity = 252").is_ok());
    }

    #[test]
    fn test_reject_unknown_tie_break() {
        let err = InteropConfig::from_toml_str(r#"tie-break = "random""#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = InteropConfig {
            tie_break: TieBreak::DeclarationOrder,
            max_arity: 8,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(InteropConfig::from_toml_str(&text).unwrap(), config);
    }
}
