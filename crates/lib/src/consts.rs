//! Crate-wide constants.

pub const APP_NAME: &str = "pinhash";

/// Default manifest file name, looked up in the current directory.
pub const MANIFEST_FILENAME: &str = "pinhash.json";

/// Lock file name, stored next to the manifest.
pub const LOCK_FILENAME: &str = "pinhash.lock";

/// Environment variable that overrides the shell used for build commands.
pub const SHELL_ENV_VAR: &str = "PINHASH_SHELL";

/// Length of a hex-encoded SHA-256 fingerprint.
pub const FINGERPRINT_LEN: usize = 64;

/// Length of the abbreviated fingerprint shown in text output.
pub const FINGERPRINT_SHORT_LEN: usize = 12;
