//! CLI integration tests against real git repositories.

mod plan_tests;
mod resolve_tests;
