// RestoreConfig - core/restore.rs
//
// Contract between the panel and the restoration routine that does the
// actual browser / trust-store work. The routine is opaque: it receives a
// sink for human-readable progress lines and a cooperative cancel flag, and
// either returns `Ok(())` or one of the `RestoreError` failures.

use crate::core::model::LogBuffer;
use crate::util::error::RestoreError;
use std::sync::atomic::AtomicBool;

/// Destination for progress lines written by a restoration routine.
pub trait ProgressSink {
    /// Append one status line.
    fn line(&mut self, text: &str);
}

impl ProgressSink for Vec<String> {
    fn line(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl ProgressSink for LogBuffer {
    fn line(&mut self, text: &str) {
        self.push(text);
    }
}

/// A multi-step configuration restoration.
///
/// Implementations run on the restoration worker thread, never on the UI
/// thread. They should check `cancel` between steps and return early (with
/// `Ok(())`) once it is set.
pub trait RestorationRoutine: Send + Sync {
    fn restore(&self, sink: &mut dyn ProgressSink, cancel: &AtomicBool)
        -> Result<(), RestoreError>;
}

impl<F> RestorationRoutine for F
where
    F: Fn(&mut dyn ProgressSink, &AtomicBool) -> Result<(), RestoreError> + Send + Sync,
{
    fn restore(
        &self,
        sink: &mut dyn ProgressSink,
        cancel: &AtomicBool,
    ) -> Result<(), RestoreError> {
        self(sink, cancel)
    }
}

/// Run `routine` on the calling thread, without cancellation.
///
/// Used by the headless command-line mode, where there is no UI thread to
/// keep responsive.
pub fn run_blocking(
    routine: &dyn RestorationRoutine,
    sink: &mut dyn ProgressSink,
) -> Result<(), RestoreError> {
    let never_cancel = AtomicBool::new(false);
    routine.restore(sink, &never_cancel)
}
