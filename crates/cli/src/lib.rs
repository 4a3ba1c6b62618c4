//! DocAgent CLI library: the interactive shell and start-up wiring.
//!
//! `main.rs` only parses flags and installs logging; everything it runs
//! lives here so the integration tests can drive it with in-memory I/O.

pub mod shell;
pub mod startup;

pub use shell::run_shell;
pub use startup::{banner, build_agent};
