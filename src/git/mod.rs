//! Git operations for a freshly rendered project
//!
//! Every operation runs inside an explicit directory instead of the
//! process working directory.

mod operations;

pub use operations::{add_all, commit, init};

/// Message of the first commit in a new project
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";
