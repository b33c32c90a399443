//! Change detection without building.
//!
//! A plan fingerprints every asset (reference lookup only) and compares the
//! result with the lock file to find the assets that need a rebuild.

use serde::Serialize;

use crate::asset::{AssetError, AssetResolver, BuildSpec};
use crate::execute::CommandRunner;
use crate::lock::{AssetStatus, LockFile};
use crate::util::hash::AssetFingerprint;

/// One asset's entry in a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAsset {
  pub name: String,
  pub reference: String,
  pub fingerprint: AssetFingerprint,
  #[serde(flatten)]
  pub status: AssetStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
  pub assets: Vec<PlannedAsset>,
}

impl Plan {
  /// Names of the assets that are new or changed.
  pub fn to_build(&self) -> Vec<&str> {
    self
      .assets
      .iter()
      .filter(|a| a.status.needs_build())
      .map(|a| a.name.as_str())
      .collect()
  }

  pub fn has_changes(&self) -> bool {
    self.assets.iter().any(|a| a.status.needs_build())
  }
}

/// Fingerprint `specs` and classify them against `lock`.
///
/// A missing lock file counts as empty: every asset is new. The first
/// failing lookup aborts the plan.
pub fn plan<R: CommandRunner>(
  resolver: &AssetResolver<R>,
  specs: &[BuildSpec],
  lock: Option<&LockFile>,
) -> Result<Plan, AssetError> {
  let mut assets = Vec::with_capacity(specs.len());

  for spec in specs {
    let (reference, fingerprint) = resolver.fingerprint(spec)?;
    let status = match lock {
      Some(lock) => lock.status(&spec.name, &fingerprint),
      None => AssetStatus::New,
    };
    assets.push(PlannedAsset {
      name: spec.name.clone(),
      reference,
      fingerprint,
      status,
    });
  }

  Ok(Plan { assets })
}
