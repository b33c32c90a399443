//! Fingerprint hashing for content-addressed assets.
//!
//! An asset's identity is bound to the pinned submodule commit and to the
//! command that builds it, not to the bytes of the artifact:
//! - `AssetFingerprint`: a 64-character lowercase hex SHA-256 digest
//! - `AssetFingerprint::compute()`: digest of `reference` followed by `build_command`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::consts::{FINGERPRINT_LEN, FINGERPRINT_SHORT_LEN};

/// A deterministic identifier for one asset build.
///
/// # Format
///
/// The fingerprint is a lowercase hexadecimal string (64 characters), e.g.
/// `"9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"`.
/// Serialized as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetFingerprint(String);

/// Error returned when a string is not a valid fingerprint.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid fingerprint '{value}': expected {FINGERPRINT_LEN} lowercase hex characters")]
pub struct FingerprintParseError {
  pub value: String,
}

impl AssetFingerprint {
  /// Compute the fingerprint of a resolved reference and a build command.
  ///
  /// The reference bytes and then the command bytes are fed to a single
  /// SHA-256 accumulator with no separator between them.
  pub fn compute(reference: &str, build_command: &str) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(reference.as_bytes());
    hasher.update(build_command.as_bytes());
    AssetFingerprint(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Abbreviated form for display.
  pub fn short(&self) -> &str {
    &self.0[..FINGERPRINT_SHORT_LEN]
  }
}

impl fmt::Display for AssetFingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for AssetFingerprint {
  type Err = FingerprintParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let valid = s.len() == FINGERPRINT_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if valid {
      Ok(AssetFingerprint(s.to_string()))
    } else {
      Err(FingerprintParseError { value: s.to_string() })
    }
  }
}

impl TryFrom<String> for AssetFingerprint {
  type Error = FingerprintParseError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<AssetFingerprint> for String {
  fn from(fingerprint: AssetFingerprint) -> Self {
    fingerprint.0
  }
}
