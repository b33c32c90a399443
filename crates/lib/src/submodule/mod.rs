//! Submodule reference lookup.
//!
//! The pinned commit of a submodule is the source identity of an asset. It is
//! read from `git submodule status` in the superproject that registers it.

mod status;
mod types;

pub use status::{list_submodules, lookup_reference, parse_line, parse_status};
pub use types::*;
