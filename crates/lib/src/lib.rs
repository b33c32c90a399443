//! pinhash-lib: Core types and logic for pinhash
//!
//! This crate builds deployment assets that live in git submodules and gives
//! each one a content-addressed fingerprint:
//! - `BuildSpec`: an immutable description of one asset build
//! - `AssetResolver`: runs the build and derives the `AssetFingerprint`
//! - `Manifest`: the declared set of assets (`pinhash.json`)
//! - `LockFile`: fingerprints recorded by the last successful resolve (`pinhash.lock`)
//! - `Plan`: which assets changed since the lock was written

pub mod asset;
pub mod consts;
pub mod execute;
pub mod lock;
pub mod manifest;
pub mod plan;
pub mod platform;
pub mod submodule;
pub mod util;
