//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use fsgate::config::{Config, ConfigMerger};
///
/// let low = Config { max_upload_bytes: Some(1), ..Default::default() };
/// let high = Config { max_upload_bytes: Some(2), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_upload_bytes, Some(2));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given lowest to highest precedence, into one config.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.root.is_some() {
            target.root.clone_from(&source.root);
        }

        if source.public_root.is_some() {
            target.public_root.clone_from(&source.public_root);
        }

        if source.max_upload_bytes.is_some() {
            target.max_upload_bytes = source.max_upload_bytes;
        }

        if source.allow_hidden_uploads.is_some() {
            target.allow_hidden_uploads = source.allow_hidden_uploads;
        }
    }
}
