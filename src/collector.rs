//! Dumps the platform log into a file, ready for sharing.
//!
//! On device this shells out to `logcat -d -v time` and streams its output
//! into a timestamped file. The command is overridable, which keeps the
//! collector usable on other platforms and testable off-device.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use chrono::Local;
use thiserror::Error;

/// Failure to collect the platform log into a file.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}")]
    DumpFailed { command: String, status: ExitStatus },
    #[error("failed to write log file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Collects the platform log into a timestamped file.
///
/// ```no_run
/// let path = taglog::Collector::new()
///     .with_prefix("my_app")
///     .collect_into(std::path::Path::new("/sdcard"))?;
/// # Ok::<(), taglog::CollectError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Collector {
    program: String,
    args: Vec<String>,
    prefix: String,
}

impl Default for Collector {
    fn default() -> Collector {
        Collector {
            program: "logcat".to_string(),
            args: vec!["-d".to_string(), "-v".to_string(), "time".to_string()],
            prefix: "device".to_string(),
        }
    }
}

impl Collector {
    pub fn new() -> Collector {
        Collector::default()
    }

    /// Replaces the log-dump command. Arguments are reset; set them again
    /// with [`Collector::with_args`].
    pub fn with_command<S: Into<String>>(mut self, program: S) -> Collector {
        self.program = program.into();
        self.args.clear();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Collector
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Prefix of the written file name, conventionally the package name.
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Collector {
        self.prefix = prefix.into();
        self
    }

    /// Runs the dump command and streams its output into
    /// `<dir>/<prefix>-<timestamp>-device-logs.log`, returning the path.
    ///
    /// `dir` is created if missing. An existing file of the same name is
    /// overwritten.
    pub fn collect_into(&self, dir: &Path) -> Result<PathBuf, CollectError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CollectError::Spawn {
                command: self.command_line(),
                source,
            })?;

        let path = dir.join(format!(
            "{}-{}-device-logs.log",
            self.prefix,
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        ));
        if let Err(err) = self.copy_output(&mut child, dir, &path) {
            // The pipe is no longer being read; stop the child before
            // reaping it, or a chatty dump blocks on a full pipe and
            // `wait()` never returns.
            let _ = child.kill();
            let _ = child.wait();
            let _ = fs::remove_file(&path);
            return Err(err);
        }

        let status = child.wait().map_err(|source| CollectError::Spawn {
            command: self.command_line(),
            source,
        })?;
        if !status.success() {
            // Nothing useful was dumped; do not leave a partial file around.
            let _ = fs::remove_file(&path);
            return Err(CollectError::DumpFailed {
                command: self.command_line(),
                status,
            });
        }
        Ok(path)
    }

    fn copy_output(
        &self,
        child: &mut std::process::Child,
        dir: &Path,
        path: &Path,
    ) -> Result<(), CollectError> {
        fs::create_dir_all(dir).map_err(|source| CollectError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut file = File::create(path).map_err(|source| CollectError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let stdout = child.stdout.as_mut().expect("Unreachable: stdout was piped");
        io::copy(stdout, &mut file).map_err(|source| CollectError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
