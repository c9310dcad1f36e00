use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("`git {command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Unexpected git output: {0:?}")]
    Parse(String),
}

/// A working tree driven through the `git` binary.
#[derive(Debug, Clone)]
pub struct Repo {
    root: PathBuf,
}

impl Repo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run<I, S>(&self, args: I) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(&args)
            .output()?;

        if !output.status.success() {
            return Err(GitError::Failed {
                command: args
                    .iter()
                    .map(|a| a.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        log::debug!("git {:?}: {}", args, stdout);
        Ok(stdout)
    }

    pub fn commit_count(&self) -> Result<u64, GitError> {
        let out = self.run(["rev-list", "--count", "HEAD"])?;
        out.parse().map_err(|_| GitError::Parse(out))
    }

    pub fn add(&self, paths: &[&Path]) -> Result<(), GitError> {
        let mut args = vec![OsStr::new("add").to_os_string()];
        args.extend(paths.iter().map(|p| p.as_os_str().to_os_string()));
        self.run(args).map(drop)
    }

    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(["commit", "-m", message]).map(drop)
    }

    pub fn push(&self) -> Result<(), GitError> {
        self.run(["push"]).map(drop)
    }
}

pub fn auto_commit_message(changes: usize, timestamp: u64) -> String {
    format!(
        "Auto-update content ({} file{}) - {}",
        changes,
        if changes == 1 { "" } else { "s" },
        timestamp
    )
}
