//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::path::PathBuf;

fn dir_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec("[a-z]{1,8}", 1..4)
        .prop_map(|parts| PathBuf::from(format!("/{}", parts.join("/"))))
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(dir_strategy()),
        prop::option::of(dir_strategy()),
        prop::option::of(any::<u64>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(root, public_root, max_upload_bytes, allow_hidden_uploads)| Config {
                root,
                public_root,
                max_upload_bytes,
                allow_hidden_uploads,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        max_shrink_iters: 5000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins field by field when set
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.root, high.root.or(low.root));
        prop_assert_eq!(result.public_root, high.public_root.or(low.public_root));
        prop_assert_eq!(result.max_upload_bytes, high.max_upload_bytes.or(low.max_upload_bytes));
        prop_assert_eq!(
            result.allow_hidden_uploads,
            high.allow_hidden_uploads.or(low.allow_hidden_uploads)
        );
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // A public root nested under the root never validates
    #[test]
    fn nested_public_root_rejected(root in dir_strategy(), child in "[a-z]{1,8}") {
        let config = Config {
            public_root: Some(root.join(child)),
            root: Some(root),
            ..Default::default()
        };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
