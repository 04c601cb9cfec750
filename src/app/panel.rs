// RestoreConfig - app/panel.rs
//
// Headless controller behind the restoration panel. Owns the log buffer and
// the Restore button state, and wires button/key activations to the
// restoration worker and to parent-window disposal. The egui rendering in
// ui::panels::restore only reads from and forwards input to this type.
//
// Restore button state machine:
//   Idle    --Restore activation-->      Running
//   Running --Completed/Failed/Cancelled--> Idle
//   Running --Restore activation-->      Running (ignored, routine not re-invoked)
//
// All collaborators are injected at construction: the parent window, the
// restoration routine, the diagnostic log, and the platform policy.

use crate::app::restore::RestoreManager;
use crate::core::diagnostics::DiagnosticLog;
use crate::core::model::{
    ButtonOrder, LogBuffer, PanelButton, PanelKey, RestoreProgress, RestoreState, Severity,
};
use crate::core::restore::RestorationRoutine;
use crate::core::window::ParentWindow;
use crate::platform::os::PlatformPolicy;
use std::sync::Arc;

/// The restore-configuration panel.
pub struct RestorationPanel {
    parent: Box<dyn ParentWindow>,
    routine: Arc<dyn RestorationRoutine>,
    diagnostics: Box<dyn DiagnosticLog>,
    policy: Box<dyn PlatformPolicy>,
    manager: RestoreManager,
    log: LogBuffer,
    state: RestoreState,
}

impl RestorationPanel {
    pub fn new(
        parent: Box<dyn ParentWindow>,
        routine: Arc<dyn RestorationRoutine>,
        diagnostics: Box<dyn DiagnosticLog>,
        policy: Box<dyn PlatformPolicy>,
    ) -> Self {
        Self {
            parent,
            routine,
            diagnostics,
            policy,
            manager: RestoreManager::new(),
            log: LogBuffer::new(),
            state: RestoreState::Idle,
        }
    }

    pub fn state(&self) -> RestoreState {
        self.state
    }

    pub fn restore_enabled(&self) -> bool {
        self.state.restore_enabled()
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn button_order(&self) -> ButtonOrder {
        self.policy.button_order()
    }

    /// Dispatch a button activation.
    pub fn activate(&mut self, button: PanelButton) {
        match button {
            PanelButton::Restore => {
                self.trigger_restore();
            }
            PanelButton::Close => self.trigger_dispose(),
        }
    }

    /// Restore activation. Returns `false` (and does nothing) while an
    /// attempt is already running.
    pub fn trigger_restore(&mut self) -> bool {
        if !self.state.restore_enabled() {
            tracing::debug!("Restore activation ignored; restoration already running");
            return false;
        }

        // Drop output from the previous attempt before the routine starts.
        self.log.clear();
        self.state = RestoreState::Running;
        self.manager.start(Arc::clone(&self.routine));
        true
    }

    /// Ask the running routine to stop. No-op when idle.
    pub fn cancel_restore(&mut self) {
        if self.manager.is_running() {
            self.manager.cancel();
        }
    }

    /// Close activation: stop any running attempt, then dispose the parent.
    pub fn trigger_dispose(&mut self) {
        self.cancel_restore();
        tracing::debug!("Disposing restoration window");
        self.parent.dispose();
    }

    /// Drain worker messages into the log buffer and state machine.
    ///
    /// Called once per UI frame. Returns `true` if anything changed.
    pub fn poll(&mut self) -> bool {
        let messages = self.manager.poll_progress();
        let mut changed = !messages.is_empty();

        for msg in messages {
            match msg {
                RestoreProgress::Line(line) => {
                    tracing::trace!(line = %line, "Restoration output");
                    self.log.push(line);
                }
                RestoreProgress::Completed => {
                    tracing::info!(lines = self.log.len(), "Restoration completed");
                    self.state = RestoreState::Idle;
                }
                RestoreProgress::Failed(e) => {
                    tracing::debug!(kind = e.kind(), "Restoration failed");
                    self.diagnostics.record(
                        Severity::Error,
                        &format!("An error occurred while running the restoration task: {e}"),
                    );
                    self.state = RestoreState::Idle;
                }
                RestoreProgress::Cancelled => {
                    tracing::info!("Restoration cancelled");
                    self.state = RestoreState::Idle;
                }
            }
        }

        if self.manager.take_worker_lost() {
            self.diagnostics.record(
                Severity::Error,
                "The restoration task stopped unexpectedly without reporting a result",
            );
            self.state = RestoreState::Idle;
            changed = true;
        }

        changed
    }

    /// Key press: intentionally ignored.
    pub fn on_key_pressed(&mut self, _key: PanelKey) {}

    /// Key typed: intentionally ignored.
    pub fn on_key_typed(&mut self, _ch: char) {}

    /// Key release: Escape closes the window unless the platform reserves it.
    pub fn on_key_released(&mut self, key: PanelKey) {
        if key == PanelKey::Escape && self.policy.escape_dismisses() {
            self.trigger_dispose();
        }
    }
}
