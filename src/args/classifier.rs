//! Argument classifier — raw archiver args → flags and input files.
//!
//! Rules, first match wins:
//!
//! 1. `-filelist <path>`: every line of `<path>` is an input file.
//! 2. `@<path>`: the lines of `<path>` are classified recursively.
//! 3. Single-value flags (`-o`, `-arch_only`, ...) take the next token.
//! 4. `*.a` is a library and is passed as a flag.
//! 5. Any other `-...` token is passed through as a flag.
//! 6. Everything else is an input file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::args::registry::{FlagBehavior, FlagDef};
use crate::args::rewrite::TokenRewriter;
use crate::error::Error;

/// Prefix marking a params file whose lines are more arguments.
const PARAMS_FILE_PREFIX: char = '@';
/// Suffix of static libraries handed to the archiver.
const ARCHIVE_SUFFIX: &str = ".a";

/// A classified argument. Every string has already been rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg {
    /// Dashed flag without a value, known or not.
    Flag(String),
    /// Flag that consumed the following token.
    FlagWithValue {
        flag: String,
        value: Option<String>,
    },
    /// Static library (`*.a`), forwarded with the flags.
    Archive(String),
    /// Object or other input file.
    File(String),
}

/// Result of classifying raw arguments.
#[derive(Debug, Clone, Default)]
pub struct ClassifyResult {
    /// Classified arguments in order, with params files flattened in place.
    pub args: Vec<ClassifiedArg>,
    /// Warnings produced during classification (e.g., missing values).
    pub warnings: Vec<String>,
}

impl ClassifyResult {
    /// The flags stream: everything that is not an input file, in order.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        for arg in &self.args {
            match arg {
                ClassifiedArg::Flag(s) | ClassifiedArg::Archive(s) => flags.push(s.clone()),
                ClassifiedArg::FlagWithValue { flag, value } => {
                    flags.push(flag.clone());
                    if let Some(v) = value {
                        flags.push(v.clone());
                    }
                }
                ClassifiedArg::File(_) => {}
            }
        }
        flags
    }

    /// The files stream, in order.
    pub fn files(&self) -> Vec<String> {
        self.args
            .iter()
            .filter_map(|a| match a {
                ClassifiedArg::File(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Classify raw args against the registry, rewriting every emitted token.
///
/// Params files and file lists are read from disk as they are met; a
/// missing or unreadable one fails the whole classification.
pub fn classify(
    raw_args: &[String],
    registry: &[FlagDef],
    rewriter: &TokenRewriter,
) -> Result<ClassifyResult, Error> {
    let mut result = ClassifyResult::default();
    classify_into(raw_args, registry, rewriter, &mut result)?;
    debug!(
        args = result.args.len(),
        warnings = result.warnings.len(),
        "Classified archiver arguments"
    );
    Ok(result)
}

fn classify_into(
    raw_args: &[String],
    registry: &[FlagDef],
    rewriter: &TokenRewriter,
    out: &mut ClassifyResult,
) -> Result<(), Error> {
    let mut iter = raw_args.iter();

    while let Some(arg) = iter.next() {
        if let Some(def) = registry.iter().find(|d| d.matches(arg)) {
            if !def.takes_value() {
                out.args.push(ClassifiedArg::Flag(rewriter.apply(arg)));
                continue;
            }

            let Some(value) = iter.next() else {
                out.warnings.push(format!(
                    "{}: missing required value ({})",
                    def.name, def.description
                ));
                out.args.push(ClassifiedArg::FlagWithValue {
                    flag: rewriter.apply(arg),
                    value: None,
                });
                continue;
            };

            match def.behavior {
                FlagBehavior::FileList => {
                    let path = PathBuf::from(value);
                    let lines = read_lines(&path)?;
                    debug!(path = %path.display(), files = lines.len(), "Expanding file list");
                    out.args.extend(
                        lines
                            .iter()
                            .map(|line| ClassifiedArg::File(rewriter.apply(line))),
                    );
                }
                FlagBehavior::Passthrough => {
                    out.args.push(ClassifiedArg::FlagWithValue {
                        flag: rewriter.apply(arg),
                        value: Some(rewriter.apply(value)),
                    });
                }
            }
        } else if let Some(params) = arg.strip_prefix(PARAMS_FILE_PREFIX) {
            let path = PathBuf::from(params);
            let lines = read_lines(&path)?;
            debug!(path = %path.display(), args = lines.len(), "Expanding params file");
            classify_into(&lines, registry, rewriter, out)?;
        } else {
            let token = rewriter.apply(arg);
            let classified = if token.ends_with(ARCHIVE_SUFFIX) {
                ClassifiedArg::Archive(token)
            } else if token.starts_with('-') {
                ClassifiedArg::Flag(token)
            } else {
                ClassifiedArg::File(token)
            };
            trace!(arg = ?classified, "Classified");
            out.args.push(classified);
        }
    }

    Ok(())
}

/// Read a params file or file list. Blank lines are dropped.
fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
