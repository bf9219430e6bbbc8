//! Configuration validation.
//!
//! Checks are lexical; the directories are canonicalized and re-checked when
//! [`Roots`](crate::Roots) are built from the validated config.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::normalize::normalize;
use crate::path::validate::contained_relative;
use std::path::Path;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use fsgate::config::{Config, ConfigValidator};
/// use std::path::PathBuf;
///
/// let config = Config {
///     root: Some(PathBuf::from("/srv/files")),
///     public_root: Some(PathBuf::from("/srv/public")),
///     ..Default::default()
/// };
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `root` is missing or empty, a path
    /// contains a null byte, `max_upload_bytes` is zero, or the two roots are
    /// equal or nested.
    pub fn validate(config: &Config) -> Result<()> {
        let root = config.root.as_deref().ok_or_else(|| Error::Validation {
            field: "root".into(),
            message: "A root directory is required".into(),
        })?;
        Self::validate_dir_path("root", root)?;

        if let Some(ref public_root) = config.public_root {
            Self::validate_dir_path("public_root", public_root)?;
            Self::validate_disjoint(root, public_root)?;
        }

        if config.max_upload_bytes == Some(0) {
            return Err(Error::Validation {
                field: "max_upload_bytes".into(),
                message: "Must be greater than 0".into(),
            });
        }

        Ok(())
    }

    fn validate_dir_path(field: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty".into(),
            });
        }

        if path.to_string_lossy().contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        Ok(())
    }

    /// The roots must not be the same directory or contain one another.
    fn validate_disjoint(root: &Path, public_root: &Path) -> Result<()> {
        let root = normalize(root)?;
        let public_root = normalize(public_root)?;

        if contained_relative(&root, &public_root).is_some()
            || contained_relative(&public_root, &root).is_some()
        {
            return Err(Error::Validation {
                field: "public_root".into(),
                message: format!(
                    "{} overlaps with root {}",
                    public_root.display(),
                    root.display()
                ),
            });
        }

        Ok(())
    }
}
