//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wrapped_libtool::args::TokenRewriter;
use wrapped_libtool::config::{Config, ToolConfig};

pub const DEVELOPER_DIR: &str = "/Dev";
pub const SDK_ROOT: &str = "/SDK";

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Rewriter bound to the fixed test paths.
pub fn rewriter() -> TokenRewriter {
    TokenRewriter::new(DEVELOPER_DIR, SDK_ROOT)
}

/// Write `lines` (newline-terminated) to `dir/name` and return the path.
pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// `/bin/sh -c <script> sh`; the response file arrives as `$1`.
pub fn sh(script: &str) -> Vec<String> {
    raw_args(&["/bin/sh", "-c", script, "sh"])
}

/// Config pointing at the given archiver argv with default filtering.
pub fn config_with_archiver(archiver: Vec<String>) -> Config {
    Config {
        developer_dir: DEVELOPER_DIR.to_string(),
        sdk_root: SDK_ROOT.to_string(),
        tool: ToolConfig {
            archiver,
            ..ToolConfig::default()
        },
    }
}

/// Scratch dir for one test.
pub fn scratch() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
