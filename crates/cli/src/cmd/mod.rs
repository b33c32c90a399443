mod fingerprint;
mod info;
mod plan;
mod resolve;
mod submodules;

pub use fingerprint::cmd_fingerprint;
pub use info::cmd_info;
pub use plan::cmd_plan;
pub use resolve::cmd_resolve;
pub use submodules::cmd_submodules;
