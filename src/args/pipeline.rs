//! Pipeline — ties classification and duplicate resolution together.

use std::path::Path;

use crate::args::classifier::ClassifyResult;
use crate::error::Error;
use crate::symlinks::{create_symlinks, has_duplicate_basenames};

/// Final argument list ready for the response file.
#[derive(Debug, Clone)]
pub struct AssembledArgs {
    /// Flags first, then inputs (or their symlinks).
    pub args: Vec<String>,
    /// Whether inputs were replaced by symlinks.
    pub symlinked: bool,
}

/// Build the archiver argument list from classified args.
///
/// If any two inputs share a basename, every input is swapped for a
/// uniquely named symlink created in `link_dir`. Otherwise the inputs are
/// appended after the flags exactly as given.
pub fn assemble(classified: &ClassifyResult, link_dir: &Path) -> Result<AssembledArgs, Error> {
    let mut args = classified.flags();
    let files = classified.files();

    let symlinked = has_duplicate_basenames(&files);
    if symlinked {
        let links = create_symlinks(link_dir, &files)?;
        args.extend(links.iter().map(|l| l.to_string_lossy().into_owned()));
    } else {
        args.extend(files);
    }

    Ok(AssembledArgs { args, symlinked })
}
