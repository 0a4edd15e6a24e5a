#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use filetime::{set_file_times, FileTime};
use tempfile::TempDir;

/// True when a `git` executable can be run; tests needing one return early otherwise.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// A throwaway git work tree plus helpers to drive the `git-meta` binary in it.
pub struct TestRepo {
    _work: TempDir,
    pub root: PathBuf,
    pub cli_bin: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let repo = Self::bare_dir();
        repo.git(&["init", "-q"]);
        repo
    }

    /// A temp directory that is not a git repository.
    pub fn bare_dir() -> Self {
        let work = tempfile::tempdir().expect("tempdir");
        let root = work.path().join("repo");
        fs::create_dir_all(&root).expect("repo dir");
        Self {
            _work: work,
            root,
            cli_bin: PathBuf::from(env!("CARGO_BIN_EXE_git-meta")),
        }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Create `rel` with the given permission bits and mtime (whole seconds).
    pub fn write(&self, rel: &str, mode: u32, mtime: i64) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(&path, rel).expect("write file");
        self.set_meta(rel, mode, mtime);
        path
    }

    pub fn set_meta(&self, rel: &str, mode: u32, mtime: i64) {
        self.set_meta_precise(rel, mode, mtime, 0);
    }

    pub fn set_meta_precise(&self, rel: &str, mode: u32, secs: i64, nanos: u32) {
        let path = self.path(rel);
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod");
        let time = FileTime::from_unix_time(secs, nanos);
        set_file_times(&path, time, time).expect("utime");
    }

    /// `git add` leaves mtimes alone, so callers can pin metadata before tracking.
    pub fn track(&self, paths: &[&str]) {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        self.git(&args);
    }

    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .env("GIT_CEILING_DIRECTORIES", self.root.parent().expect("parent"))
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {:?} failed:\n{}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.cli_bin);
        cmd.current_dir(&self.root)
            .env("GIT_CEILING_DIRECTORIES", self.root.parent().expect("parent"))
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run git-meta")
    }

    /// Run and assert success, echoing output on failure.
    pub fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "git-meta {:?} failed ({:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    pub fn database(&self) -> Vec<u8> {
        fs::read(self.path(".metadata")).expect("read .metadata")
    }

    pub fn rows(&self) -> Vec<serde_json::Value> {
        serde_json::from_slice(&self.database()).expect("database is JSON")
    }

    pub fn mode(&self, rel: &str) -> u32 {
        use std::os::unix::fs::MetadataExt;
        fs::metadata(self.path(rel)).expect("stat").mode()
    }

    pub fn mtime(&self, rel: &str) -> i64 {
        use std::os::unix::fs::MetadataExt;
        fs::metadata(self.path(rel)).expect("stat").mtime()
    }

    pub fn mtime_nsec(&self, rel: &str) -> i64 {
        use std::os::unix::fs::MetadataExt;
        fs::metadata(self.path(rel)).expect("stat").mtime_nsec()
    }
}

pub fn row_paths(rows: &[serde_json::Value]) -> Vec<String> {
    rows.iter()
        .map(|row| row[0].as_str().expect("path field").to_string())
        .collect()
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|md| md.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
