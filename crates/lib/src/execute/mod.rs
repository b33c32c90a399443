//! Process execution.
//!
//! Builds and reference lookups go through the [`CommandRunner`] trait so the
//! asset resolver can be driven by a fake in tests.

mod cmd;
mod types;

pub use cmd::SystemRunner;
pub use types::*;
