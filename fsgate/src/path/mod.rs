//! Confinement of client-supplied paths.
//!
//! Clients address files with slash-separated virtual paths relative to a
//! configured root. This module turns those into absolute paths that are
//! proven, at check time, to stay inside the root.
//!
//! # Layers
//!
//! ## Validation
//!
//! [`validate`] is purely lexical. It collapses empty and `.` segments and
//! rejects `..` segments, absolute input, and null bytes before anything
//! touches the filesystem.
//!
//! ## Resolution
//!
//! [`PathResolver`] probes the filesystem without following symlinks and
//! applies the rules of each operation: what must exist, what must be free,
//! and what may never be a symlink. Ancestors are canonicalized to detect a
//! symlinked directory that leads outside the root.
//!
//! ## Normalization
//!
//! [`normalize`] handles operator-supplied root paths (tilde expansion and
//! relative paths) before the roots are canonicalized once at startup.
//!
//! # Examples
//!
//! ```no_run
//! use fsgate::path::{PathResolver, Roots};
//! use std::path::Path;
//!
//! let roots = Roots::new(Path::new("/srv/files")).unwrap();
//! let resolver = PathResolver::new(&roots);
//!
//! // Traversal never reaches the filesystem.
//! assert!(resolver.resolve_for_delete("../etc/passwd").is_err());
//!
//! // The root itself is a valid upload target.
//! let target = resolver.resolve_for_write("").unwrap();
//! assert_eq!(target.path(), roots.root());
//! ```

pub mod canonicalize;
pub mod normalize;
pub mod resolver;
mod types;
pub mod validate;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use resolver::PathResolver;
pub use types::{EntryKind, ResolvedPath, Roots, VirtualPath};
