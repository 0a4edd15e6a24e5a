//! Blocking helper for the one external command this crate runs.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use eyre::{Context, Result};

use crate::errors::CommandError;

/// Run `program args...` in `cwd` and return its standard output.
///
/// A non-zero exit becomes a [`CommandError`] carrying the captured stderr;
/// the caller decides how to report it.
pub fn run_command<S: AsRef<OsStr>>(program: &str, args: &[S], cwd: &Path) -> Result<Vec<u8>> {
    let command_line = quote_command_line(program, args);
    log::debug!("running {command_line} in {}", cwd.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .with_context(|| format!("failed to spawn {program}"))?;

    if output.status.success() {
        return Ok(output.stdout);
    }

    Err(CommandError::new(output.status.code(), command_line, output.stderr).into())
}

fn quote_command_line<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    std::iter::once(shell_quote(program))
        .chain(
            args.iter()
                .map(|arg| shell_quote(&arg.as_ref().to_string_lossy())),
        )
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote one word for a POSIX shell.
pub fn shell_quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    let safe = word
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if safe {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r#"'"'"'"#))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_leaves_safe_words_bare() {
        assert_eq!(shell_quote("ls-files"), "ls-files");
        assert_eq!(shell_quote("-z"), "-z");
        assert_eq!(shell_quote("a/b.c@d%e+f=g:h,i"), "a/b.c@d%e+f=g:h,i");
    }

    #[test]
    fn quote_wraps_unsafe_words() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("two words"), "'two words'");
        assert_eq!(shell_quote("it's"), r#"'it'"'"'s'"#);
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
    }

    #[test]
    fn returns_stdout_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_command("sh", &["-c", "printf 'a\\0b'"], dir.path()).unwrap();
        assert_eq!(out, b"a\0b");
    }

    #[test]
    fn runs_in_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), b"").unwrap();
        let out = run_command("ls", &["marker"], dir.path()).unwrap();
        assert_eq!(out, b"marker\n");
    }

    #[test]
    fn non_zero_exit_is_command_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command("sh", &["-c", "echo oops >&2; exit 3"], dir.path()).unwrap_err();
        let err = err.downcast_ref::<CommandError>().expect("command error");
        assert_eq!(err.code, Some(3));
        assert_eq!(err.stderr, b"oops\n");
        assert_eq!(err.command_line, "sh -c 'echo oops >&2; exit 3'");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command::<&str>("gitmeta-no-such-program", &[], dir.path()).unwrap_err();
        assert!(err.downcast_ref::<CommandError>().is_none());
        assert!(err.to_string().contains("gitmeta-no-such-program"));
    }
}
