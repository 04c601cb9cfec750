// RestoreConfig - gui.rs
//
// Top-level eframe::App implementation.
// Hosts the restoration panel in the central area, pumps worker progress
// every frame, and closes the viewport when the panel asks its parent
// window to go away.

use crate::app::panel::RestorationPanel;
use crate::core::messages::Messages;
use crate::core::window::ParentWindow;
use crate::ui;
use crate::util::constants::RUNNING_REPAINT_INTERVAL_MS;
use std::time::Duration;

/// Parent-window handle for the root viewport.
pub struct ViewportWindow {
    ctx: egui::Context,
}

impl ViewportWindow {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl ParentWindow for ViewportWindow {
    fn dispose(&self) {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

/// The RestoreConfig application.
pub struct RestoreConfigApp {
    pub panel: RestorationPanel,
    pub messages: Messages,
}

impl RestoreConfigApp {
    pub fn new(panel: RestorationPanel, messages: Messages) -> Self {
        Self { panel, messages }
    }
}

impl eframe::App for RestoreConfigApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let changed = self.panel.poll();

        ui::panels::restore::handle_input(ctx, &mut self.panel);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::restore::render(ui, &mut self.panel, &self.messages);
        });

        // Keep repainting while the worker runs so new lines appear promptly.
        if changed {
            ctx.request_repaint();
        } else if !self.panel.restore_enabled() {
            ctx.request_repaint_after(Duration::from_millis(RUNNING_REPAINT_INTERVAL_MS));
        }
    }

    /// Called by eframe when the window is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.panel.cancel_restore();
        tracing::info!("Restoration window closed");
    }
}
