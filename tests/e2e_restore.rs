// RestoreConfig - tests/e2e_restore.rs
//
// End-to-end tests for the restoration panel through the public library
// API: real worker thread, real mpsc channel, and (on Unix) a real child
// process via CommandRestorer. Only the parent window and the diagnostic
// log are test doubles, since they stand in for the GUI and the logger.

use restoreconfig::app::panel::RestorationPanel;
use restoreconfig::core::diagnostics::DiagnosticLog;
use restoreconfig::core::model::{PanelButton, PanelKey, RestoreState, Severity};
use restoreconfig::core::restore::{ProgressSink, RestorationRoutine};
use restoreconfig::core::window::ParentWindow;
use restoreconfig::platform::os::PlatformIdentity;
use restoreconfig::util::error::RestoreError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

// =============================================================================
// Helpers
// =============================================================================

struct StubWindow(Rc<Cell<usize>>);

impl ParentWindow for StubWindow {
    fn dispose(&self) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Clone, Default)]
struct Diagnostics(Rc<RefCell<Vec<(Severity, String)>>>);

impl DiagnosticLog for Diagnostics {
    fn record(&self, severity: Severity, message: &str) {
        self.0.borrow_mut().push((severity, message.to_string()));
    }
}

fn build(
    routine: Arc<dyn RestorationRoutine>,
    platform: PlatformIdentity,
) -> (RestorationPanel, Rc<Cell<usize>>, Diagnostics) {
    let disposed = Rc::new(Cell::new(0));
    let diagnostics = Diagnostics::default();
    let panel = RestorationPanel::new(
        Box::new(StubWindow(Rc::clone(&disposed))),
        routine,
        Box::new(diagnostics.clone()),
        Box::new(platform),
    );
    (panel, disposed, diagnostics)
}

/// Pump the panel the way the UI loop does until the attempt finishes.
fn run_until_idle(panel: &mut RestorationPanel) {
    let deadline = Instant::now() + Duration::from_secs(15);
    while panel.state() == RestoreState::Running {
        assert!(Instant::now() < deadline, "restoration did not finish in time");
        panel.poll();
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn two_steps(sink: &mut dyn ProgressSink, _cancel: &AtomicBool) -> Result<(), RestoreError> {
    sink.line("step1");
    sink.line("step2");
    Ok(())
}

// =============================================================================
// Panel E2E
// =============================================================================

/// Restore streams the routine's lines, then Close disposes exactly once.
#[test]
fn e2e_restore_then_close() {
    let (mut panel, disposed, diagnostics) = build(Arc::new(two_steps), PlatformIdentity::Linux);

    panel.activate(PanelButton::Restore);
    run_until_idle(&mut panel);

    assert_eq!(panel.log().to_vec(), vec!["step1", "step2"]);
    assert_eq!(panel.state(), RestoreState::Idle);
    assert_eq!(disposed.get(), 0);
    assert!(diagnostics.0.borrow().is_empty());

    panel.activate(PanelButton::Close);
    assert_eq!(disposed.get(), 1);
}

/// A failing routine leaves one diagnostic and a usable Restore button.
#[test]
fn e2e_failure_is_logged_once_and_retry_is_possible() {
    let routine = |sink: &mut dyn ProgressSink, _: &AtomicBool| -> Result<(), RestoreError> {
        sink.line("locating certificate store");
        Err(RestoreError::Security {
            reason: "certificate store is locked".to_string(),
            source: None,
        })
    };
    let (mut panel, _, diagnostics) = build(Arc::new(routine), PlatformIdentity::Windows);

    panel.trigger_restore();
    run_until_idle(&mut panel);
    assert_eq!(diagnostics.0.borrow().len(), 1);
    assert!(diagnostics.0.borrow()[0].1.contains("certificate store is locked"));
    assert_eq!(panel.log().to_vec(), vec!["locating certificate store"]);

    assert!(panel.trigger_restore(), "button must be re-enabled after failure");
    run_until_idle(&mut panel);
    assert_eq!(diagnostics.0.borrow().len(), 2);
}

/// Escape follows the platform policy.
#[test]
fn e2e_escape_respects_platform() {
    let (mut linux, linux_disposed, _) = build(Arc::new(two_steps), PlatformIdentity::Linux);
    linux.on_key_released(PanelKey::Escape);
    assert_eq!(linux_disposed.get(), 1);

    let (mut mac, mac_disposed, _) = build(Arc::new(two_steps), PlatformIdentity::MacOs);
    mac.on_key_released(PanelKey::Escape);
    assert_eq!(mac_disposed.get(), 0);
}

// =============================================================================
// Command-backed routine E2E (Unix only: relies on /bin/sh)
// =============================================================================

#[cfg(unix)]
mod command {
    use super::*;
    use restoreconfig::platform::command::CommandRestorer;

    fn sh(script: &str) -> Arc<dyn RestorationRoutine> {
        Arc::new(CommandRestorer::new(
            "sh",
            vec!["-c".to_string(), script.to_string()],
        ))
    }

    #[test]
    fn e2e_command_output_reaches_log_area() {
        let (mut panel, _, diagnostics) = build(
            sh("echo 'Restoring Firefox'; echo 'Restoring Chrome'"),
            PlatformIdentity::Linux,
        );
        panel.trigger_restore();
        run_until_idle(&mut panel);
        assert_eq!(
            panel.log().to_vec(),
            vec!["Restoring Firefox", "Restoring Chrome"]
        );
        assert!(diagnostics.0.borrow().is_empty());
    }

    #[test]
    fn e2e_command_exit_failure_is_diagnosed() {
        let (mut panel, _, diagnostics) = build(sh("echo half; exit 2"), PlatformIdentity::Linux);
        panel.trigger_restore();
        run_until_idle(&mut panel);
        let diags = diagnostics.0.borrow();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].0, Severity::Error);
        assert!(diags[0].1.contains("Configuration failure"));
        assert_eq!(panel.log().to_vec(), vec!["half"]);
    }

    #[test]
    fn e2e_close_cancels_running_command() {
        let (mut panel, disposed, diagnostics) =
            build(sh("echo started; sleep 30"), PlatformIdentity::Linux);
        let started = Instant::now();
        panel.trigger_restore();
        panel.activate(PanelButton::Close);
        run_until_idle(&mut panel);
        assert_eq!(disposed.get(), 1);
        assert!(diagnostics.0.borrow().is_empty());
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
