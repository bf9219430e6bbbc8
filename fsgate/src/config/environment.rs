//! Environment variable handling for configuration overrides.
//!
//! `FSGATE_*` variables override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use fsgate::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads `FSGATE_ROOT`, `FSGATE_PUBLIC_ROOT`, `FSGATE_MAX_UPLOAD_BYTES`
    /// and `FSGATE_ALLOW_HIDDEN_UPLOADS`. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean value cannot be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(root) = Self::var("FSGATE_ROOT") {
            config.root = Some(PathBuf::from(root));
        }

        if let Some(public_root) = Self::var("FSGATE_PUBLIC_ROOT") {
            config.public_root = Some(PathBuf::from(public_root));
        }

        if let Some(bytes) = Self::var("FSGATE_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = Some(bytes.trim().parse().map_err(|_| Error::Validation {
                field: "FSGATE_MAX_UPLOAD_BYTES".into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        if let Some(val) = Self::var("FSGATE_ALLOW_HIDDEN_UPLOADS") {
            config.allow_hidden_uploads =
                Some(Self::parse_bool("FSGATE_ALLOW_HIDDEN_UPLOADS", &val)?);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
