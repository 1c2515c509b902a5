//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments with their own data and config
//! files, plus CLI assertion helpers using `assert_cmd`.

mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::NotesCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
