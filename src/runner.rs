//! Archiver subprocess runner.
//!
//! The child's stderr goes through a pipe that is drained to EOF before
//! the child is waited on; waiting first can deadlock once the pipe
//! buffer fills. Captured lines are then filtered and relayed.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{debug, trace, warn};

/// libtool prints this for archives whose members export nothing. It is
/// harmless for the builds this wrapper serves.
pub const NO_GLOBAL_SYMBOLS_DIAGNOSTIC: &str =
    "no object file members in the library define global symbols";

/// Failures of a single archiver run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Error forking process '{program}'. {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Error reading stderr of child process '{program}'. {source}")]
    Capture {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Error waiting on child process '{program}'. {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Child process '{program}' terminated with exit code {code}\nstderr:\n{stderr}")]
    ExitCode {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("Child process '{program}' terminated with signal {signal}\nstderr:\n{stderr}")]
    Signal {
        program: String,
        signal: i32,
        stderr: String,
    },
}

/// Program plus leading arguments used to reach the real archiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl ArchiverCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split `argv` into program and leading arguments. `None` if empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program, args.to_vec()))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// `<program> <args...> @<response_file>`.
    fn command(&self, response_file: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(format!("@{}", response_file.display()))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Default for ArchiverCommand {
    fn default() -> Self {
        Self::new("/usr/bin/xcrun", vec!["libtool".to_string()])
    }
}

/// Drops known-benign diagnostic lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticFilter {
    suppressed: Vec<String>,
}

impl DiagnosticFilter {
    pub fn new(suppressed: Vec<String>) -> Self {
        Self { suppressed }
    }

    pub fn is_suppressed(&self, line: &str) -> bool {
        self.suppressed.iter().any(|s| line.contains(s.as_str()))
    }

    /// Write every line of `captured` that is not suppressed to `sink`.
    pub fn forward(&self, captured: &str, sink: &mut dyn Write) -> io::Result<()> {
        for line in captured.lines() {
            if self.is_suppressed(line) {
                trace!(line, "Suppressed archiver diagnostic");
                continue;
            }
            writeln!(sink, "{line}")?;
        }
        sink.flush()
    }
}

impl Default for DiagnosticFilter {
    fn default() -> Self {
        Self::new(vec![NO_GLOBAL_SYMBOLS_DIAGNOSTIC.to_string()])
    }
}

/// Run the archiver on `response_file`, relaying filtered stderr to `diagnostics`.
///
/// Succeeds only if the archiver exits with status 0. The error for a
/// nonzero exit or a signal carries the full, unfiltered stderr.
pub fn run_archiver(
    archiver: &ArchiverCommand,
    response_file: &Path,
    filter: &DiagnosticFilter,
    diagnostics: &mut dyn Write,
) -> Result<(), RunError> {
    let program = archiver.program().display().to_string();
    let mut cmd = archiver.command(response_file);
    debug!(command = ?cmd, "Spawning archiver");

    let mut child = cmd.spawn().map_err(|source| RunError::Spawn {
        program: program.clone(),
        source,
    })?;

    // Step 1: drain stderr to EOF.
    let mut captured = Vec::new();
    let drained = match child.stderr.take() {
        Some(mut pipe) => pipe.read_to_end(&mut captured).map(|_| ()),
        None => Ok(()),
    };

    // Step 2: wait, even if draining failed, so the child is reaped.
    let waited = wait_for(&mut child);

    // Whatever was captured is relayed before any failure is reported.
    let stderr = String::from_utf8_lossy(&captured).into_owned();
    if let Err(e) = filter.forward(&stderr, diagnostics) {
        warn!(error = %e, "Failed to relay archiver diagnostics");
    }

    let status = waited.map_err(|source| RunError::Wait {
        program: program.clone(),
        source,
    })?;
    drained.map_err(|source| RunError::Capture {
        program: program.clone(),
        source,
    })?;

    debug!(status = %status, "Archiver finished");
    match status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(RunError::ExitCode {
            program,
            code,
            stderr,
        }),
        None => Err(RunError::Signal {
            program,
            signal: termination_signal(&status),
            stderr,
        }),
    }
}

fn wait_for(child: &mut Child) -> io::Result<ExitStatus> {
    loop {
        match child.wait() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or_default()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> i32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_archiver_is_xcrun_libtool() {
        let cmd = ArchiverCommand::default();
        assert_eq!(cmd.program(), Path::new("/usr/bin/xcrun"));
        assert_eq!(cmd.args(), ["libtool".to_string()]);
    }

    #[test]
    fn from_argv_splits_program() {
        let argv = vec!["/bin/ar".to_string(), "rcs".to_string()];
        let cmd = ArchiverCommand::from_argv(&argv).unwrap();
        assert_eq!(cmd.program(), Path::new("/bin/ar"));
        assert_eq!(cmd.args(), ["rcs".to_string()]);
        assert!(ArchiverCommand::from_argv(&[]).is_none());
    }

    #[test]
    fn filter_drops_benign_line_and_keeps_order() {
        let captured = "warning: one\n\
            /usr/bin/libtool: file: libfoo.a(x.o) has no symbols (no object file members in the library define global symbols)\n\
            warning: two\n";
        let mut out = Vec::new();
        DiagnosticFilter::default().forward(captured, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "warning: one\nwarning: two\n");
    }

    #[test]
    fn custom_filter_replaces_default() {
        let filter = DiagnosticFilter::new(vec!["noise".to_string()]);
        assert!(filter.is_suppressed("some noise here"));
        assert!(!filter.is_suppressed(NO_GLOBAL_SYMBOLS_DIAGNOSTIC));
    }
}
