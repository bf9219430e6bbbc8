//! Publish, list, and unpublish of share links.

#![cfg(unix)]

mod common;

use std::fs;

use common::{symlink, TestTree};
use fsgate::ErrorKind;

#[test]
fn test_full_lifecycle() {
    let tree = TestTree::new();
    tree.write("docs/guides/intro.md", "# intro");
    tree.write("readme.txt", "hi");

    tree.service.publish("docs/guides/intro.md").unwrap();
    tree.service.publish("readme.txt").unwrap();
    assert_eq!(
        tree.service.list_public().unwrap(),
        vec!["docs/guides/intro.md", "readme.txt"]
    );

    let outcome = tree.service.unpublish("docs/guides/intro.md").unwrap();
    assert_eq!(outcome.paths, vec!["docs/guides/intro.md"]);
    assert_eq!(tree.service.list_public().unwrap(), vec!["readme.txt"]);

    // Emptied ancestors are pruned, the public root survives.
    assert!(!tree.public_exists("docs"));
    assert!(tree.public().is_dir());
    // The shared file itself is untouched.
    assert_eq!(tree.read("docs/guides/intro.md"), "# intro");
}

#[test]
fn test_publish_twice_is_idempotent() {
    let tree = TestTree::new();
    tree.write("a.txt", "x");

    tree.service.publish("a.txt").unwrap();
    let again = tree.service.publish("a.txt").unwrap();

    assert_eq!(again.paths, vec!["a.txt"]);
    assert_eq!(again.warnings.len(), 1);
    assert_eq!(tree.service.list_public().unwrap(), vec!["a.txt"]);
}

#[test]
fn test_publish_conflicts_with_foreign_link() {
    let tree = TestTree::new();
    tree.write("a.txt", "x");
    tree.write("b.txt", "y");
    symlink(&tree.path("b.txt"), &tree.public_path("a.txt"));

    let err = tree.service.publish("a.txt").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        fs::read_link(tree.public_path("a.txt")).unwrap(),
        tree.path("b.txt")
    );
}

#[test]
fn test_publish_conflicts_with_regular_file() {
    let tree = TestTree::new();
    tree.write("a.txt", "x");
    fs::write(tree.public_path("a.txt"), "squatter").unwrap();

    let err = tree.service.publish("a.txt").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        fs::read_to_string(tree.public_path("a.txt")).unwrap(),
        "squatter"
    );
}

#[test]
fn test_publish_requires_regular_file() {
    let tree = TestTree::new();
    tree.mkdir("dir");

    assert_eq!(
        tree.service.publish("dir").unwrap_err().kind(),
        ErrorKind::BadRequest
    );
    assert_eq!(
        tree.service.publish("missing.txt").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_unpublish_errors() {
    let tree = TestTree::new();
    fs::create_dir(tree.public_path("dir")).unwrap();
    fs::write(tree.public_path("plain.txt"), "x").unwrap();

    assert_eq!(
        tree.service.unpublish("missing").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        tree.service.unpublish("dir").unwrap_err().kind(),
        ErrorKind::BadRequest
    );
    assert_eq!(
        tree.service.unpublish("plain.txt").unwrap_err().kind(),
        ErrorKind::BadRequest
    );
    assert!(tree.public_exists("dir"));
    assert!(tree.public_exists("plain.txt"));
}

#[test]
fn test_unpublish_keeps_non_empty_ancestors() {
    let tree = TestTree::new();
    tree.write("a/b/one.txt", "1");
    tree.write("a/two.txt", "2");
    tree.service.publish("a/b/one.txt").unwrap();
    tree.service.publish("a/two.txt").unwrap();

    tree.service.unpublish("a/b/one.txt").unwrap();

    assert!(!tree.public_exists("a/b"));
    assert!(tree.public_exists("a/two.txt"));
    assert_eq!(tree.service.list_public().unwrap(), vec!["a/two.txt"]);
}

#[test]
fn test_unpublish_after_source_deleted() {
    let tree = TestTree::new();
    tree.write("gone.txt", "x");
    tree.service.publish("gone.txt").unwrap();
    tree.service.delete("gone.txt").unwrap();

    // A dangling link is no longer listed but can still be removed.
    assert!(tree.service.list_public().unwrap().is_empty());
    tree.service.unpublish("gone.txt").unwrap();
    assert!(!tree.public_exists("gone.txt"));
}

#[test]
fn test_list_filters_and_sorts() {
    let tree = TestTree::new();
    tree.write("z.txt", "z");
    tree.write("m.txt", "m");
    tree.mkdir("folder");
    fs::write(tree.public_path("a-plain.txt"), "plain").unwrap();
    symlink(&tree.path("z.txt"), &tree.public_path("z-link"));
    symlink(&tree.path("m.txt"), &tree.public_path("m-link"));
    symlink(&tree.path("folder"), &tree.public_path("folder-link"));
    symlink(&tree.path("nope"), &tree.public_path("broken"));

    assert_eq!(
        tree.service.list_public().unwrap(),
        vec!["a-plain.txt", "m-link", "z-link"]
    );
}

#[test]
fn test_publish_blocked_by_file_in_public_tree() {
    let tree = TestTree::new();
    tree.write("docs/a.txt", "x");
    fs::write(tree.public_path("docs"), "squatter").unwrap();

    let err = tree.service.publish("docs/a.txt").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(fs::read_to_string(tree.public_path("docs")).unwrap(), "squatter");
    assert_eq!(tree.service.unpublish("docs/a.txt").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_sharing_disabled_is_forbidden() {
    let tree = TestTree::new();
    tree.write("a.txt", "x");
    let service = tree.private_service();

    assert_eq!(service.publish("a.txt").unwrap_err().kind(), ErrorKind::Forbidden);
    assert_eq!(service.unpublish("a.txt").unwrap_err().kind(), ErrorKind::Forbidden);
    assert_eq!(service.list_public().unwrap_err().kind(), ErrorKind::Forbidden);
}

#[test]
fn test_public_root_cannot_be_unpublished() {
    let tree = TestTree::new();

    assert_eq!(
        tree.service.unpublish("").unwrap_err().kind(),
        ErrorKind::Forbidden
    );
    assert!(tree.public().is_dir());
}
