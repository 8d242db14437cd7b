//! External command execution.
//!
//! Every package manager and OS utility the inventory touches is spawned
//! through [`Cmd`]. A failed command comes back as a [`CmdError`]; nothing
//! here panics, and callers decide whether a failure means "tool absent" or
//! just "no data this time".
//!
//! No timeout is applied: a hung external command hangs the run.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Why an external command produced no usable output.
#[derive(Debug, Error)]
pub enum CmdError {
    #[error("command not found: {program}")]
    NotFound { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("writing output of {program} to {}: {source}", path.display())]
    Write {
        program: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CmdError {
    /// True when the program could not be found at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CmdError::NotFound { .. })
    }
}

/// A program plus its arguments, optionally with extra search directories
/// appended to the inherited `PATH`.
///
/// ```rust,ignore
/// use app_lister::process::Cmd;
///
/// let formulae = Cmd::new("brew")
///     .args(["list", "--formula"])
///     .search_paths(["/opt/homebrew/bin"])
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    extra_paths: Vec<PathBuf>,
}

impl Cmd {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            extra_paths: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// Append directories to the child's `PATH` (after the inherited entries).
    ///
    /// Program lookup uses the augmented `PATH` too, which is what lets a run
    /// started by launchd still find Homebrew-installed tools.
    pub fn search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extra_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// The command line as a human-readable string.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Run to completion and return stdout as text.
    ///
    /// A non-zero exit status is an error; stderr is kept in the error for
    /// diagnostics and otherwise discarded.
    pub fn run(&self) -> Result<String, CmdError> {
        let stdout = self.output()?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// Run and write stdout verbatim to `dest`, creating parent directories.
    ///
    /// Nothing is written unless the command succeeds. The file gets the raw
    /// bytes; the returned text is a lossy decoding of them.
    pub fn run_to_file(&self, dest: &Path) -> Result<String, CmdError> {
        let stdout = self.output()?;
        write_output(dest, &stdout).map_err(|source| CmdError::Write {
            program: self.program_name(),
            path: dest.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    fn output(&self) -> Result<Vec<u8>, CmdError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(path) = self.augmented_path() {
            command.env("PATH", path);
        }

        let output = command.output().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                CmdError::NotFound {
                    program: self.program_name(),
                }
            } else {
                CmdError::Spawn {
                    program: self.program_name(),
                    source,
                }
            }
        })?;

        if !output.status.success() {
            return Err(CmdError::Failed {
                program: self.program_name(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    fn augmented_path(&self) -> Option<OsString> {
        if self.extra_paths.is_empty() {
            return None;
        }
        let mut paths: Vec<PathBuf> = env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();
        for extra in &self.extra_paths {
            if !paths.contains(extra) {
                paths.push(extra.clone());
            }
        }
        env::join_paths(paths).ok()
    }
}

/// Write to a file, creating its parent directories first.
pub(crate) fn write_output(dest: &Path, content: impl AsRef<[u8]>) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, content)
}
