//! Invocation configuration.
//!
//! Everything the core reads from the process environment is collected
//! here once at startup, so the rest of the crate never touches
//! `std::env` directly.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, ToolConfig};

/// Required: Xcode developer directory.
pub const DEVELOPER_DIR_VAR: &str = "DEVELOPER_DIR";
/// Required: SDK root.
pub const SDKROOT_VAR: &str = "SDKROOT";
/// Optional: path to a TOML tool-config file.
pub const CONFIG_PATH_VAR: &str = "LIBTOOL_WRAPPER_CONFIG";
