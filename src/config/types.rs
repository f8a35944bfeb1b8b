use serde::Deserialize;

use crate::args::TokenRewriter;
use crate::runner::{ArchiverCommand, DiagnosticFilter, NO_GLOBAL_SYMBOLS_DIAGNOSTIC};

/// Root configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Substituted for `__BAZEL_XCODE_DEVELOPER_DIR__`.
    pub developer_dir: String,
    /// Substituted for `__BAZEL_XCODE_SDKROOT__`.
    pub sdk_root: String,
    /// Optional tool settings; defaults when no config file is given.
    pub tool: ToolConfig,
}

impl Config {
    pub fn rewriter(&self) -> TokenRewriter {
        TokenRewriter::new(self.developer_dir.as_str(), self.sdk_root.as_str())
    }
}

/// Tool settings loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Program and leading arguments for the real archiver.
    pub archiver: Vec<String>,
    /// Substrings of stderr lines that are never relayed.
    pub suppressed_diagnostics: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        let archiver = ArchiverCommand::default();
        let mut argv = vec![archiver.program().display().to_string()];
        argv.extend(archiver.args().iter().cloned());
        Self {
            archiver: argv,
            suppressed_diagnostics: vec![NO_GLOBAL_SYMBOLS_DIAGNOSTIC.to_string()],
        }
    }
}

impl ToolConfig {
    /// The archiver to invoke. Falls back to the default for an empty list,
    /// which `validate` rejects for loaded files.
    pub fn archiver_command(&self) -> ArchiverCommand {
        ArchiverCommand::from_argv(&self.archiver).unwrap_or_default()
    }

    pub fn diagnostic_filter(&self) -> DiagnosticFilter {
        DiagnosticFilter::new(self.suppressed_diagnostics.clone())
    }
}
