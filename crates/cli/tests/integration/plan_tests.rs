//! Tests for `pinhash plan` and `pinhash submodules`.

#![cfg(unix)]

use predicates::prelude::*;

use crate::common::{MODULE, TestEnv, git_available};

const BUILD: &str = "echo built > build_function.zip";

#[test]
fn plan_without_lock_reports_new() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  let plan = env.json(&["plan"]);

  assert_eq!(plan["assets"][0]["name"], "api");
  assert_eq!(plan["assets"][0]["status"], "new");
  assert!(!env.artifact().exists(), "plan must not build");
}

#[test]
fn plan_after_resolve_is_unchanged() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd().arg("resolve").assert().success();

  env.pinhash_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("Nothing to build"));
  assert_eq!(env.json(&["plan"])["assets"][0]["status"], "unchanged");
}

#[test]
fn bumping_submodule_changes_plan() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd().arg("resolve").assert().success();
  let before = env.read_lock()["assets"]["api"]["fingerprint"].clone();

  let next = env.advance_submodule();
  env.pin_submodule();

  let plan = env.json(&["plan"]);
  assert_eq!(plan["assets"][0]["status"], "changed");
  assert_eq!(plan["assets"][0]["previous"], before);
  assert_eq!(plan["assets"][0]["reference"], next.as_str());
  assert_ne!(plan["assets"][0]["fingerprint"], before);
}

#[test]
fn unpinned_checkout_is_still_resolved() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  let next = env.advance_submodule();

  let submodules = env.json(&["submodules"]);
  assert_eq!(submodules[0]["state"], "modified");

  let fingerprint = env.json(&["fingerprint", "api"]);
  assert_eq!(fingerprint["reference"], next.as_str());
}

#[test]
fn submodules_lists_registered_paths() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();

  env.pinhash_cmd()
    .arg("submodules")
    .assert()
    .success()
    .stdout(predicate::str::contains(MODULE));

  let entries = env.json(&["submodules"]);
  assert_eq!(entries[0]["path"], MODULE);
  assert_eq!(entries[0]["state"], "current");
}
