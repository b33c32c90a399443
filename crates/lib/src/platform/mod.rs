pub mod paths;

/// Returns the platform triple for the current system (e.g., "aarch64-macos")
pub fn platform_triple() -> String {
  format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)
}
