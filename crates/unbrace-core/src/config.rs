use serde::Deserialize;
use thiserror::Error;

/// Which characters count as an attempt to close a pending brace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CloserPolicy {
    /// Every character other than the open symbol is a closer (default).
    #[default]
    Any,
    /// Only the close symbol is a closer; everything else is skipped.
    Brace,
}

/// Configuration loading or validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is outside its acceptable range.
    #[error("{message}")]
    Invalid {
        /// Description of the validation error.
        message: String,
    },
    /// The TOML document could not be deserialized.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Scanning configuration options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The open-brace symbol (default: `{`).
    pub open: char,
    /// The close-brace symbol (default: `}`).
    pub close: char,
    /// Which characters are treated as closers.
    pub closers: CloserPolicy,
}

impl Config {
    /// Parse a TOML document and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a value is invalid.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbols are equal or whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.open == self.close {
            return Err(ConfigError::Invalid {
                message: format!(
                    "open and close must differ, both are {:?}",
                    self.open
                ),
            });
        }
        for (name, symbol) in [("open", self.open), ("close", self.close)] {
            if symbol.is_whitespace() {
                return Err(ConfigError::Invalid {
                    message: format!("{name} must not be whitespace, got {symbol:?}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open: '{',
            close: '}',
            closers: CloserPolicy::default(),
        }
    }
}
