//! Property-based tests for path handling.
//!
//! The validate module already covers lexical cleaning. This module focuses
//! on normalization and on resolver containment against a real directory.

use super::normalize::normalize;
use super::resolver::PathResolver;
use super::types::Roots;
use crate::error::ErrorKind;
use proptest::prelude::*;
use std::path::PathBuf;

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

// Virtual paths mixing ordinary names with separators, dots and traversal.
fn hostile_path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        3 => path_component_strategy(),
        1 => Just("..".to_string()),
        1 => Just(".".to_string()),
        1 => Just(String::new()),
    ];
    (any::<bool>(), prop::collection::vec(segment, 1..6)).prop_map(|(leading, parts)| {
        let joined = parts.join("/");
        if leading {
            format!("/{joined}")
        } else {
            joined
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // normalize(normalize(p)) == normalize(p)
    #[test]
    fn path_normalization_idempotent(path in absolute_path_strategy()) {
        if let Ok(normalized_once) = normalize(&path) {
            if let Ok(normalized_twice) = normalize(&normalized_once) {
                prop_assert_eq!(normalized_once, normalized_twice);
            }
        }
    }

    // Normalized paths never contain ".."
    #[test]
    fn normalized_paths_no_parent_refs(path in absolute_path_strategy()) {
        if let Ok(normalized) = normalize(&path) {
            let path_str = normalized.to_string_lossy();
            prop_assert!(!path_str.contains(".."));
        }
    }

    // Whatever the resolver accepts lies under the root; traversal and
    // absolute input are always bad requests.
    #[test]
    fn resolver_output_is_contained(raw in hostile_path_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path()).unwrap();
        let resolver = PathResolver::new(&roots);

        let malformed = raw.starts_with('/') || raw.split('/').any(|s| s == "..");
        match resolver.resolve_for_write(&raw) {
            Ok(resolved) => {
                prop_assert!(!malformed);
                prop_assert!(resolved.path().starts_with(roots.root()));
            }
            Err(e) => {
                prop_assert!(malformed);
                prop_assert_eq!(e.kind(), ErrorKind::BadRequest);
            }
        }

        if let Ok(resolved) = resolver.resolve_for_mkdir(&raw) {
            prop_assert!(resolved.path().starts_with(roots.root()));
            prop_assert!(resolved.path() != roots.root());
        }
    }
}
