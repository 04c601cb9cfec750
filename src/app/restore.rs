// RestoreConfig - app/restore.rs
//
// Restoration lifecycle management. Runs the restoration routine on a
// background thread, sending progress messages to the UI thread via an
// mpsc channel.
//
// Architecture:
//   - `RestoreManager` lives on the UI thread; `run_restore` runs on a
//     background thread.
//   - An `Arc<AtomicBool>` cancel flag lets the UI stop the routine
//     cooperatively.
//   - All cross-thread communication is via `RestoreProgress` messages.
//   - A routine that panics is caught; the UI sees the channel disconnect
//     without a terminal message (`worker_lost`). Release builds must keep
//     unwinding panics for this to hold.
//   - `run_headless` runs a routine on the calling thread for the terminal
//     mode, with the top-level error type.

use crate::core::model::RestoreProgress;
use crate::core::restore::{run_blocking, ProgressSink, RestorationRoutine};
use crate::util::constants::MAX_PROGRESS_MESSAGES_PER_FRAME;
use crate::util::error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

/// Sink used on the worker thread: every line becomes a channel message.
struct ChannelSink {
    tx: mpsc::Sender<RestoreProgress>,
}

impl ProgressSink for ChannelSink {
    fn line(&mut self, text: &str) {
        // Receiver gone means the panel was disposed; keep running quietly.
        let _ = self.tx.send(RestoreProgress::Line(text.to_string()));
    }
}

/// Manages one restoration attempt at a time on a background thread.
pub struct RestoreManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<RestoreProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,

    /// Set when the channel disconnected before a terminal message arrived.
    lost: bool,
}

impl RestoreManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
            lost: false,
        }
    }

    /// Start `routine` on a background thread.
    ///
    /// Any attempt still tracked by this manager is cancelled and forgotten
    /// first.
    pub fn start(&mut self, routine: Arc<dyn RestorationRoutine>) {
        self.cancel();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));
        self.lost = false;

        std::thread::spawn(move || run_restore(routine, tx, cancel));

        tracing::info!("Restoration started");
    }

    /// Request cancellation of the running attempt.
    /// The background thread sends `RestoreProgress::Cancelled` once the
    /// routine returns.
    pub fn cancel(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
            tracing::info!("Restoration cancel requested");
        }
    }

    /// Whether an attempt is being tracked (started and not yet finished).
    pub fn is_running(&self) -> bool {
        self.progress_rx.is_some()
    }

    /// True once after the worker vanished without reporting an outcome.
    pub fn take_worker_lost(&mut self) -> bool {
        std::mem::take(&mut self.lost)
    }

    /// Poll for progress messages without blocking.
    ///
    /// Returns at most `MAX_PROGRESS_MESSAGES_PER_FRAME` messages; the rest
    /// stay queued for the next call. Tracking stops after a terminal
    /// message or a disconnect.
    pub fn poll_progress(&mut self) -> Vec<RestoreProgress> {
        let mut messages = Vec::new();
        let Some(rx) = self.progress_rx.as_ref() else {
            return messages;
        };

        let mut finished = false;
        while messages.len() < MAX_PROGRESS_MESSAGES_PER_FRAME {
            match rx.try_recv() {
                Ok(msg) => {
                    let terminal = msg.is_terminal();
                    messages.push(msg);
                    if terminal {
                        finished = true;
                        break;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("Restoration worker exited without reporting an outcome");
                    self.lost = true;
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            self.progress_rx = None;
            self.cancel_flag = None;
        }
        messages
    }
}

impl Default for RestoreManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RestoreManager {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Worker body: run the routine and report exactly one outcome.
fn run_restore(
    routine: Arc<dyn RestorationRoutine>,
    tx: mpsc::Sender<RestoreProgress>,
    cancel: Arc<AtomicBool>,
) {
    let mut sink = ChannelSink { tx: tx.clone() };

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        routine.restore(&mut sink, &cancel)
    }));

    let msg = match outcome {
        Ok(Ok(())) if cancel.load(Ordering::SeqCst) => RestoreProgress::Cancelled,
        Ok(Ok(())) => RestoreProgress::Completed,
        Ok(Err(e)) => RestoreProgress::Failed(e),
        Err(_) => {
            tracing::error!("Restoration routine panicked");
            // Dropping the senders without a terminal message marks the
            // attempt as lost on the UI side.
            return;
        }
    };

    tracing::debug!(outcome = ?msg, "Restoration finished");
    let _ = tx.send(msg);
}

/// Run `routine` to completion on the calling thread (no window, no
/// cancellation), streaming its lines into `sink`.
pub fn run_headless(
    routine: &dyn RestorationRoutine,
    sink: &mut dyn ProgressSink,
) -> error::Result<()> {
    tracing::info!("Headless restoration started");
    run_blocking(routine, sink)?;
    tracing::info!("Headless restoration completed");
    Ok(())
}
