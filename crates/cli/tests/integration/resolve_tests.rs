//! Tests for `pinhash resolve` and `pinhash fingerprint`.

#![cfg(unix)]

use predicates::prelude::*;

use crate::common::{MODULE, TestEnv, git, git_available};

const BUILD: &str = "echo built >> build_function.zip";

#[test]
fn resolve_builds_artifact_and_writes_lock() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd()
    .arg("resolve")
    .assert()
    .success()
    .stdout(predicate::str::contains("api"));

  assert!(env.artifact().exists());

  let pinned = git(&env.module_dir(), &["rev-parse", "HEAD"]);
  let lock = env.read_lock();
  assert_eq!(lock["version"], 1);
  assert_eq!(lock["assets"]["api"]["reference"], pinned.as_str());
  assert_eq!(lock["assets"]["api"]["fingerprint"].as_str().unwrap().len(), 64);
  assert_eq!(lock["assets"]["api"]["artifact"], "lib/assets/api/build_function.zip");
}

#[test]
fn lock_fingerprint_matches_fingerprint_command() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  let fingerprint = env.json(&["fingerprint", "api"]);
  env.pinhash_cmd().arg("resolve").assert().success();

  assert_eq!(env.read_lock()["assets"]["api"]["fingerprint"], fingerprint["fingerprint"]);
}

#[test]
fn fingerprint_does_not_build() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd()
    .args(["fingerprint", "api"])
    .assert()
    .success()
    .stdout(predicate::str::is_match("^[0-9a-f]{64}\n$").unwrap());

  assert!(!env.artifact().exists());
}

#[test]
fn fingerprint_is_stable_across_runs() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  let first = env.json(&["fingerprint", "api"]);
  let second = env.json(&["fingerprint", "api"]);

  assert_eq!(first, second);
}

#[test]
fn changing_build_command_changes_fingerprint() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();

  env.write_manifest(MODULE, BUILD);
  let before = env.json(&["fingerprint", "api"]);
  env.write_manifest(MODULE, "echo other >> build_function.zip");
  let after = env.json(&["fingerprint", "api"]);

  assert_eq!(before["reference"], after["reference"]);
  assert_ne!(before["fingerprint"], after["fingerprint"]);
}

#[test]
fn second_resolve_skips_unchanged_asset() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd().arg("resolve").assert().success();
  env.pinhash_cmd()
    .arg("resolve")
    .assert()
    .success()
    .stdout(predicate::str::contains("unchanged"));

  let content = std::fs::read_to_string(env.artifact()).unwrap();
  assert_eq!(content.lines().count(), 1, "build should have run once");
}

#[test]
fn force_rebuilds_unchanged_asset() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd().arg("resolve").assert().success();
  env.pinhash_cmd().args(["resolve", "--force"]).assert().success();

  let content = std::fs::read_to_string(env.artifact()).unwrap();
  assert_eq!(content.lines().count(), 2);
}

#[test]
fn missing_artifact_triggers_rebuild() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd().arg("resolve").assert().success();
  std::fs::remove_file(env.artifact()).unwrap();

  let outcomes = env.json(&["resolve"]);
  assert_eq!(outcomes[0]["action"], "built");
  assert!(env.artifact().exists());
}

#[test]
fn json_output_reports_skipped_assets() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  let first = env.json(&["resolve"]);
  let second = env.json(&["resolve"]);

  assert_eq!(first[0]["action"], "built");
  assert_eq!(second[0]["action"], "skipped");
  assert_eq!(first[0]["fingerprint"], second[0]["fingerprint"]);
}

#[test]
fn failing_build_reports_error_and_writes_no_lock() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, "exit 3");

  env.pinhash_cmd()
    .arg("resolve")
    .assert()
    .failure()
    .stderr(predicate::str::contains("build command failed"));

  assert!(!env.lock_path().exists());
}

#[test]
fn build_producing_nothing_is_missing_artifact() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, "true");

  env.pinhash_cmd()
    .arg("resolve")
    .assert()
    .failure()
    .stderr(predicate::str::contains("produced no artifact"));

  assert!(!env.lock_path().exists());
}

#[test]
fn unknown_submodule_fails_without_building() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest("lib/assets/missing", "touch ran_marker");

  env.pinhash_cmd()
    .arg("resolve")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no submodule registered"));

  assert!(!env.module_dir().join("ran_marker").exists());
}

#[test]
fn outside_repository_fails() {
  if !git_available() {
    return;
  }
  let env = TestEnv::without_repository();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd()
    .arg("resolve")
    .assert()
    .failure()
    .stderr(predicate::str::contains("git submodule status failed"));

  assert!(!env.artifact().exists());
}

#[test]
fn unknown_asset_name_fails() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, BUILD);

  env.pinhash_cmd()
    .args(["resolve", "console"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown asset 'console'"));
}

#[test]
fn build_runs_in_source_directory() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest(MODULE, "pwd > build_function.zip");

  env.pinhash_cmd().arg("resolve").assert().success();

  let recorded = std::fs::read_to_string(env.artifact()).unwrap();
  let expected = dunce::canonicalize(env.module_dir()).unwrap();
  assert_eq!(
    dunce::canonicalize(recorded.trim()).unwrap(),
    expected,
    "build should run inside the submodule checkout"
  );
}

#[test]
fn omitted_module_uses_normalized_source() {
  if !git_available() {
    return;
  }
  let env = TestEnv::with_submodule();
  env.write_manifest_json(&serde_json::json!({
    "version": 1,
    "assets": {
      "api": {
        "source": format!("./{MODULE}/"),
        "build": BUILD,
        "output": "build_function.zip"
      }
    }
  }));

  env.pinhash_cmd().arg("resolve").assert().success();

  let pinned = git(&env.module_dir(), &["rev-parse", "HEAD"]);
  assert!(env.artifact().exists());
  assert_eq!(env.read_lock()["assets"]["api"]["reference"], pinned.as_str());
}
