//! Configuration schema definitions.
//!
//! Every field is optional so that partial configurations from several
//! sources can be merged; defaults are applied by the accessors.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default upload size ceiling per file (1 GiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 1024 * 1024 * 1024;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use fsgate::config::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     root: Some(PathBuf::from("/srv/files")),
///     ..Default::default()
/// };
/// assert!(!config.hidden_uploads_allowed());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory that bounds every mutation.
    pub root: Option<PathBuf>,

    /// Directory holding share links. Sharing is disabled when absent.
    pub public_root: Option<PathBuf>,

    /// Largest accepted upload, per file, in bytes.
    pub max_upload_bytes: Option<u64>,

    /// Accept uploaded file names starting with a dot.
    pub allow_hidden_uploads: Option<bool>,
}

impl Config {
    /// The effective per-file upload ceiling.
    #[must_use]
    pub fn upload_limit(&self) -> u64 {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Whether hidden upload names are accepted.
    #[must_use]
    pub fn hidden_uploads_allowed(&self) -> bool {
        self.allow_hidden_uploads.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
root: /srv/files
public_root: /srv/public
max_upload_bytes: 1048576
allow_hidden_uploads: true
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("/srv/files")));
        assert_eq!(config.public_root, Some(PathBuf::from("/srv/public")));
        assert_eq!(config.upload_limit(), 1_048_576);
        assert!(config.hidden_uploads_allowed());
    }

    #[test]
    fn test_defaults() {
        let config: Config = serde_yaml::from_str("root: /srv\n").unwrap();
        assert_eq!(config.upload_limit(), DEFAULT_MAX_UPLOAD_BYTES);
        assert!(!config.hidden_uploads_allowed());
        assert!(config.public_root.is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("root: /srv\nports: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_yaml() {
        let config = Config {
            root: Some(PathBuf::from("/a")),
            max_upload_bytes: Some(10),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
