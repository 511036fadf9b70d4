//! Invocation of the external `pgo` executable.

use crate::domain::{PgopherError, RunResult};
use crate::modules::traits::ExternalRunner;
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_EXECUTABLE: &str = "pgo";
pub const DEFAULT_PARTITION_FLAG: &str = "--qtable";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How to locate and launch PGopher.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Executable name looked up on the search path, or a path to it.
    pub executable: String,
    /// Search path override; `PATH` when unset.
    pub search_path: Option<OsString>,
    /// Kill the process once it runs longer than this. Unset waits forever.
    pub timeout: Option<Duration>,
    /// Flag requesting the partition-function table.
    pub partition_flag: String,
}

impl RunnerConfig {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            ..Self::default()
        }
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_partition_flag(mut self, flag: impl Into<String>) -> Self {
        self.partition_flag = flag.into();
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            search_path: None,
            timeout: None,
            partition_flag: DEFAULT_PARTITION_FLAG.to_string(),
        }
    }
}

/// Raw result of one PGopher invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn status_text(&self) -> String {
        self.exit_code.map_or_else(
            || "terminated by signal".to_string(),
            |code| format!("exit code {code}"),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    config: RunnerConfig,
}

impl ProcessRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn resolve_executable(&self) -> RunResult<PathBuf> {
        let search_path = self
            .config
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"));
        find_executable(&self.config.executable, search_path.as_deref()).ok_or_else(|| {
            PgopherError::ExecutableNotFound {
                name: self.config.executable.clone(),
            }
        })
    }

    pub fn run_partition_function(&self, path: &Path) -> RunResult<CapturedOutput> {
        self.run(path, Some(self.config.partition_flag.as_str()))
    }

    fn spawn(&self, executable: &Path, path: &Path, flag: Option<&str>) -> RunResult<Child> {
        let mut command = Command::new(executable);
        if let Some(flag) = flag {
            command.arg(flag);
        }
        command
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PgopherError::io("launch executable", executable, source))
    }

    fn wait_with_timeout(
        &self,
        mut child: Child,
        executable: &Path,
        timeout: Duration,
    ) -> RunResult<(ExitStatus, Vec<u8>, Vec<u8>)> {
        let stdout_reader = drain_in_background(child.stdout.take());
        let stderr_reader = drain_in_background(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            let polled = child
                .try_wait()
                .map_err(|source| PgopherError::io("wait for", executable, source))?;
            if let Some(status) = polled {
                break status;
            }
            if start.elapsed() >= timeout {
                let _ = child.kill();
                let _ = child.wait();
                warn!(executable = %executable.display(), ?timeout, "killed PGopher after timeout");
                return Err(PgopherError::Timeout {
                    executable: self.config.executable.clone(),
                    timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();
        Ok((status, stdout, stderr))
    }
}

impl ExternalRunner for ProcessRunner {
    fn executable(&self) -> &str {
        &self.config.executable
    }

    fn partition_flag(&self) -> &str {
        &self.config.partition_flag
    }

    /// Run `<executable> [flag] <path>` and capture its output.
    ///
    /// The executable is resolved before the document is checked, and
    /// neither failure spawns anything.
    fn run(&self, path: &Path, flag: Option<&str>) -> RunResult<CapturedOutput> {
        let executable = self.resolve_executable()?;
        if !path.is_file() {
            return Err(PgopherError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        info!(
            executable = %executable.display(),
            document = %path.display(),
            flag = flag.unwrap_or(""),
            "running PGopher"
        );
        let child = self.spawn(&executable, path, flag)?;

        let (status, stdout, stderr) = match self.config.timeout {
            Some(timeout) => self.wait_with_timeout(child, &executable, timeout)?,
            None => {
                let output = child
                    .wait_with_output()
                    .map_err(|source| PgopherError::io("wait for", &executable, source))?;
                (output.status, output.stdout, output.stderr)
            }
        };

        let captured = CapturedOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            exit_code: status.code(),
        };
        if !captured.stderr.trim().is_empty() {
            warn!(stderr = captured.stderr.trim(), "PGopher wrote to stderr");
        }
        debug!(
            status = %captured.status_text(),
            stdout_bytes = captured.stdout.len(),
            "PGopher finished"
        );
        Ok(captured)
    }
}

/// Look `name` up on `search_path`. Names containing a path separator are
/// checked directly.
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let direct = Path::new(name);
    if direct.components().count() > 1 || direct.is_absolute() {
        return is_executable(direct).then(|| direct.to_path_buf());
    }

    let search_path = search_path?;
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidate_names(name).map(move |file| dir.join(file)))
        .find(|candidate| is_executable(candidate))
}

fn candidate_names(name: &str) -> impl Iterator<Item = String> + '_ {
    let with_exe = (cfg!(windows) && !name.to_ascii_lowercase().ends_with(".exe"))
        .then(|| format!("{name}.exe"));
    std::iter::once(name.to_string()).chain(with_exe)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn drain_in_background<R>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}
