use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::runner::RunError;

/// Any failure of a wrapper invocation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("argument is not valid UTF-8: {0:?}")]
    NonUnicodeArg(OsString),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] io::Error),

    #[error(transparent)]
    Run(#[from] RunError),
}
