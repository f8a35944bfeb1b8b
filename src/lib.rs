//! Wrapper around the platform `libtool` archiver.
//!
//! Expands params files, substitutes Xcode path placeholders, works around
//! libtool merging inputs that share a basename, and relays the archiver's
//! diagnostics and exit status.

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod response;
pub mod runner;
pub mod symlinks;

use std::io::Write;

use tracing::warn;

use crate::args::{assemble, classify, flag_registry};
use crate::config::Config;
use crate::error::Error;
use crate::response::write_response_file;
use crate::runner::run_archiver;

/// Prefix of the per-invocation scratch directory.
pub const TEMP_DIR_PREFIX: &str = "libtool_symlinks.";

/// Run one archiver invocation for `raw_args`.
///
/// The scratch directory holding symlinks and the response file is
/// removed when this returns, on success and on every error path.
pub fn run(config: &Config, raw_args: &[String], diagnostics: &mut dyn Write) -> Result<(), Error> {
    let classified = classify(raw_args, &flag_registry(), &config.rewriter())?;
    for warning in &classified.warnings {
        warn!("{}", warning);
    }

    let temp_dir = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir()
        .map_err(Error::TempDir)?;

    let assembled = assemble(&classified, temp_dir.path())?;
    let response_file = write_response_file(temp_dir.path(), &assembled.args)?;

    run_archiver(
        &config.tool.archiver_command(),
        &response_file,
        &config.tool.diagnostic_filter(),
        diagnostics,
    )?;
    Ok(())
}
