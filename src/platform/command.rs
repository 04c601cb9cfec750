// RestoreConfig - platform/command.rs
//
// Restoration routine backed by an external program. The program's stdout
// and stderr lines are streamed into the progress sink as they arrive; its
// exit status decides success.
//
// Architecture:
//   - One reader thread per output pipe forwards decoded lines over an mpsc
//     channel (lossy UTF-8, trailing CR/LF stripped).
//   - The calling (worker) thread waits on that channel with a timeout so the
//     cancel flag is checked every COMMAND_CANCEL_CHECK_INTERVAL_MS.
//   - The program runs in its own process group (Unix). On cancel the whole
//     group is killed, so helpers it started do not outlive the attempt, and
//     the routine returns Ok(()).
//
// Failure mapping:
//   - program not found, non-zero exit          -> Configuration
//   - permission denied launching the program  -> Security
//   - any other spawn / read / wait error       -> Io

use crate::core::restore::{ProgressSink, RestorationRoutine};
use crate::util::constants::COMMAND_CANCEL_CHECK_INTERVAL_MS;
use crate::util::error::RestoreError;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

/// Runs `program args..` and reports its output as restoration progress.
#[derive(Debug, Clone)]
pub struct CommandRestorer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandRestorer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn spawn_error(&self, e: io::Error) -> RestoreError {
        match e.kind() {
            io::ErrorKind::NotFound => RestoreError::Configuration {
                reason: format!("restoration program '{}' not found", self.program.display()),
            },
            io::ErrorKind::PermissionDenied => RestoreError::Security {
                reason: format!(
                    "not allowed to run restoration program '{}'",
                    self.program.display()
                ),
                source: Some(e),
            },
            _ => RestoreError::Io {
                operation: "launch restoration program",
                source: e,
            },
        }
    }
}

impl RestorationRoutine for CommandRestorer {
    fn restore(
        &self,
        sink: &mut dyn ProgressSink,
        cancel: &AtomicBool,
    ) -> Result<(), RestoreError> {
        tracing::info!(
            program = %self.program.display(),
            args = ?self.args,
            "Launching restoration program"
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let mut child = command.spawn().map_err(|e| self.spawn_error(e))?;

        let (tx, rx) = mpsc::channel::<io::Result<String>>();
        if let Some(stdout) = child.stdout.take() {
            forward_lines(stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            forward_lines(stderr, tx.clone());
        }
        // Only the reader threads hold senders now; the channel disconnects
        // once both pipes reach EOF.
        drop(tx);

        let tick = Duration::from_millis(COMMAND_CANCEL_CHECK_INTERVAL_MS);
        loop {
            if cancel.load(Ordering::SeqCst) {
                tracing::info!(program = %self.program.display(), "Cancelling restoration program");
                kill_tree(&mut child);
                return Ok(());
            }

            match rx.recv_timeout(tick) {
                Ok(Ok(line)) => sink.line(&line),
                Ok(Err(source)) => {
                    kill_tree(&mut child);
                    return Err(RestoreError::Io {
                        operation: "read restoration output",
                        source,
                    });
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        let status = child.wait().map_err(|source| RestoreError::Io {
            operation: "wait for restoration program",
            source,
        })?;

        if status.success() {
            tracing::info!(program = %self.program.display(), "Restoration program finished");
            Ok(())
        } else {
            Err(RestoreError::Configuration {
                reason: format!(
                    "restoration program '{}' exited with {status}",
                    self.program.display()
                ),
            })
        }
    }
}

/// Stand-in routine used when no restoration program is configured.
/// Every attempt fails with a configuration error naming the fix.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotConfigured;

impl RestorationRoutine for NotConfigured {
    fn restore(
        &self,
        _sink: &mut dyn ProgressSink,
        _cancel: &AtomicBool,
    ) -> Result<(), RestoreError> {
        Err(RestoreError::Configuration {
            reason: "no restoration program configured; set [restore] command in config.toml \
                     or pass --command"
                .to_string(),
        })
    }
}

/// Kill `child` together with every process it started, then reap it.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    // The child leads its own process group (spawned with process_group(0)),
    // so the group id equals its pid.
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) takes plain integers and touches no memory owned by
        // this process. A negative pid addresses the group.
        let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
        if rc != 0 {
            tracing::debug!(
                pgid,
                error = %io::Error::last_os_error(),
                "Process group kill failed"
            );
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Kill `child` together with every process it started, then reap it.
#[cfg(windows)]
fn kill_tree(child: &mut Child) {
    let pid = child.id().to_string();
    let status = Command::new("taskkill")
        .args(["/T", "/F", "/PID", pid.as_str()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = status {
        tracing::debug!(pid = %pid, error = %e, "taskkill failed");
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(not(any(unix, windows)))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Spawn a thread that sends each line of `pipe` to `tx` until EOF.
fn forward_lines<R: Read + Send + 'static>(pipe: R, tx: mpsc::Sender<io::Result<String>>) {
    std::thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => return,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&buf);
                    let line = text.trim_end_matches(['\r', '\n']).to_string();
                    if tx.send(Ok(line)).is_err() {
                        return;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    let _ = tx.send(Err(e));
                    return;
                }
            }
        }
    });
}
