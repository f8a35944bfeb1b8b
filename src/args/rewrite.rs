//! Placeholder substitution for Xcode paths.
//!
//! The build orchestrator cannot know the developer dir or SDK root when
//! it writes the command line, so it emits fixed markers that are filled
//! in here from the environment.

/// Marker replaced by the `DEVELOPER_DIR` value.
pub const DEVELOPER_DIR_PLACEHOLDER: &str = "__BAZEL_XCODE_DEVELOPER_DIR__";
/// Marker replaced by the `SDKROOT` value.
pub const SDKROOT_PLACEHOLDER: &str = "__BAZEL_XCODE_SDKROOT__";

/// Replace every occurrence of both markers in `token`.
///
/// Substituted text is not rescanned for the marker it replaced, but the
/// developer dir is substituted first, so an SDK marker inside the
/// developer dir value does get expanded.
pub fn rewrite(token: &str, developer_dir: &str, sdk_root: &str) -> String {
    token
        .replace(DEVELOPER_DIR_PLACEHOLDER, developer_dir)
        .replace(SDKROOT_PLACEHOLDER, sdk_root)
}

/// A rewriter bound to one invocation's paths.
#[derive(Debug, Clone)]
pub struct TokenRewriter {
    developer_dir: String,
    sdk_root: String,
}

impl TokenRewriter {
    pub fn new(developer_dir: impl Into<String>, sdk_root: impl Into<String>) -> Self {
        Self {
            developer_dir: developer_dir.into(),
            sdk_root: sdk_root.into(),
        }
    }

    /// Rewriter that leaves every token untouched.
    pub fn identity() -> Self {
        Self::new(DEVELOPER_DIR_PLACEHOLDER, SDKROOT_PLACEHOLDER)
    }

    pub fn apply(&self, token: &str) -> String {
        rewrite(token, &self.developer_dir, &self.sdk_root)
    }
}
