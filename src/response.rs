//! Response file emitter.
//!
//! libtool reads `@file` as one quoted argument per line. Only `"` is
//! escaped; tokens with embedded newlines are not representable.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;

/// Name of the response file inside the invocation's temp directory.
pub const RESPONSE_FILE_NAME: &str = "libtool.params";

/// Quote one token for the response file.
pub fn quote(token: &str) -> String {
    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('"');
    for ch in token.chars() {
        if ch == '"' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Serialize `args` the way they are written to disk.
pub fn render(args: &[String]) -> String {
    args.iter().map(|a| quote(a) + "\n").collect()
}

/// Write `args` to `dir/libtool.params` and return its path.
pub fn write_response_file(dir: &Path, args: &[String]) -> Result<PathBuf, Error> {
    let path = dir.join(RESPONSE_FILE_NAME);
    let io_err = |source| Error::Io {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render(args).as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    debug!(path = %path.display(), args = args.len(), "Wrote response file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_token_is_wrapped_in_quotes() {
        assert_eq!(quote("-static"), "\"-static\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        assert_eq!(quote(r#"a"b"#), r#""a\"b""#);
    }

    #[test]
    fn backslashes_and_spaces_are_left_alone() {
        assert_eq!(quote(r"dir with space\x.o"), r#""dir with space\x.o""#);
    }

    #[test]
    fn render_writes_one_token_per_line() {
        let args = vec!["-o".to_string(), "out.a".to_string()];
        assert_eq!(render(&args), "\"-o\"\n\"out.a\"\n");
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn write_creates_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-static".to_string(), r#"x"y.o"#.to_string()];
        let path = write_response_file(dir.path(), &args).unwrap();

        assert_eq!(path, dir.path().join(RESPONSE_FILE_NAME));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "\"-static\"\n\"x\\\"y.o\"\n");
    }
}
