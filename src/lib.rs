pub mod error;
pub mod git;
pub mod interview;
pub mod logging;
pub mod paths;
pub mod post;
pub mod probe;
pub mod process;
pub mod render;
pub mod sandbox;
pub mod settings;
pub mod spec;
pub mod templates;
pub mod ui;

// Re-export commonly used types
pub use error::ScaffoldError;
pub use spec::{ConfigFormat, DiscoveredInterpreter, ProjectName, ProjectSpec};
