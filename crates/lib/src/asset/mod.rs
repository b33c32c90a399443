//! Content-addressed assets.
//!
//! An asset is a build output living in a git submodule. Resolving it runs
//! its build command and binds its identity to the submodule's pinned commit
//! and the command text, so unchanged assets can be skipped downstream
//! without re-hashing the artifact bytes.
//!
//! # Submodules
//!
//! - [`resolve`] - `AssetResolver`, the build-then-fingerprint driver

pub mod resolve;
mod types;

pub use resolve::AssetResolver;
pub use types::*;
