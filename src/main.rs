use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use anyhow::Result;

use wrapped_libtool::config::Config;
use wrapped_libtool::error::Error;
use wrapped_libtool::logging::init_tracing;

fn main() -> ExitCode {
    init_tracing();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let args = parse_args()?;
    let config = Config::from_env()?;
    let mut stderr = io::stderr();
    wrapped_libtool::run(&config, &args, &mut stderr)?;
    Ok(())
}

/// The archiver argv, minus our own executable path.
fn parse_args() -> Result<Vec<String>, Error> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from(args: impl Iterator<Item = OsString>) -> Result<Vec<String>, Error> {
    args.map(|arg| arg.into_string().map_err(Error::NonUnicodeArg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args_keeps_archiver_flags_verbatim() {
        let raw = ["-static", "-o", "out.a", "@params"];
        let parsed = parse_args_from(raw.iter().map(OsString::from)).unwrap();
        assert_eq!(parsed, raw);
    }

    #[test]
    fn parse_args_empty() {
        assert!(parse_args_from(std::iter::empty()).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn parse_args_rejects_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(b"obj/caf\xE9.o".to_vec());
        let result = parse_args_from(vec![OsString::from("-static"), bad.clone()].into_iter());

        assert!(matches!(result, Err(Error::NonUnicodeArg(arg)) if arg == bad));
    }
}
