// RestoreConfig - ui/panels/restore.rs
//
// Restoration panel: introductory text, read-only scrolling log area, and a
// trailing-aligned row with the Restore and Close buttons. Keyboard input is
// forwarded to the panel controller; Alt+R and Alt+C are the button
// mnemonics.

use crate::app::panel::RestorationPanel;
use crate::core::messages::{
    Messages, CLOSE_BUTTON, CLOSE_BUTTON_DESCRIPTION, LOG_LINES_OMITTED, RESTORE_BUTTON,
    RESTORE_BUTTON_DESCRIPTION, RESTORE_INTRO,
};
use crate::core::model::{ButtonOrder, PanelButton, PanelKey};
use crate::ui::theme;

/// Render the panel into `ui`, dispatching any button activation.
pub fn render(ui: &mut egui::Ui, panel: &mut RestorationPanel, messages: &Messages) {
    let mut activated: Option<PanelButton> = None;

    egui::Frame::default()
        .inner_margin(theme::PANEL_MARGIN)
        .show(ui, |ui| {
            ui.add(egui::Label::new(messages.get(RESTORE_INTRO)).wrap());
            ui.add_space(theme::INTRO_GAP);

            if let Some(notice) = omitted_notice(messages, panel.log().dropped()) {
                ui.label(egui::RichText::new(notice).italics().weak());
            }

            let log_height =
                (ui.available_height() - theme::BUTTON_ROW_HEIGHT - theme::BUTTON_ROW_GAP).max(0.0);
            let text = panel.log().text();
            egui::Frame::group(ui.style())
                .inner_margin(theme::LOG_AREA_PADDING)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("restore_log")
                        .auto_shrink([false; 2])
                        .max_height(log_height)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            // `&str` is a read-only TextBuffer: selectable, not editable.
                            let mut view: &str = text;
                            ui.add(
                                egui::TextEdit::multiline(&mut view)
                                    .font(egui::TextStyle::Monospace)
                                    .desired_width(f32::INFINITY)
                                    .frame(false),
                            );
                        });
                });

            ui.add_space(theme::BUTTON_ROW_GAP);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for button in trailing_row_order(panel.button_order()) {
                    let (caption, description, enabled) = match button {
                        PanelButton::Restore => (
                            messages.get(RESTORE_BUTTON),
                            messages.get(RESTORE_BUTTON_DESCRIPTION),
                            panel.restore_enabled(),
                        ),
                        PanelButton::Close => (
                            messages.get(CLOSE_BUTTON),
                            messages.get(CLOSE_BUTTON_DESCRIPTION),
                            true,
                        ),
                    };
                    let response = ui
                        .add_enabled(
                            enabled,
                            egui::Button::new(caption)
                                .min_size(egui::vec2(theme::BUTTON_MIN_WIDTH, 0.0)),
                        )
                        .on_hover_text(description);
                    if response.clicked() {
                        activated = Some(button);
                    }
                }
            });
        });

    if let Some(button) = activated {
        panel.activate(button);
    }
}

/// Forward this frame's keyboard events to the panel.
pub fn handle_input(ctx: &egui::Context, panel: &mut RestorationPanel) {
    let events = ctx.input(|i| i.events.clone());

    for event in events {
        match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                if modifiers.alt && key == egui::Key::R {
                    panel.activate(PanelButton::Restore);
                } else if modifiers.alt && key == egui::Key::C {
                    panel.activate(PanelButton::Close);
                } else {
                    panel.on_key_pressed(panel_key(key));
                }
            }
            egui::Event::Key {
                key,
                pressed: false,
                ..
            } => panel.on_key_released(panel_key(key)),
            egui::Event::Text(text) => {
                for ch in text.chars() {
                    panel.on_key_typed(ch);
                }
            }
            _ => {}
        }
    }
}

/// Header text for the log area when `dropped` lines were discarded.
fn omitted_notice(messages: &Messages, dropped: usize) -> Option<String> {
    (dropped > 0).then(|| {
        messages
            .get(LOG_LINES_OMITTED)
            .replace("{count}", &dropped.to_string())
    })
}

/// Order in which buttons are added to a `right_to_left` row.
///
/// That layout places the first widget at the trailing edge, so the
/// leading-to-trailing order is reversed.
fn trailing_row_order(order: ButtonOrder) -> [PanelButton; 2] {
    let [leading, trailing] = order.buttons();
    [trailing, leading]
}

fn panel_key(key: egui::Key) -> PanelKey {
    match key {
        egui::Key::Escape => PanelKey::Escape,
        _ => PanelKey::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::DiagnosticLog;
    use crate::core::model::{RestoreState, Severity};
    use crate::core::restore::ProgressSink;
    use crate::core::window::ParentWindow;
    use crate::platform::os::PlatformIdentity;
    use crate::util::error::RestoreError;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingWindow(Rc<Cell<usize>>);

    impl ParentWindow for CountingWindow {
        fn dispose(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct Silent;

    impl DiagnosticLog for Silent {
        fn record(&self, _severity: Severity, _message: &str) {}
    }

    /// Panel whose routine only counts invocations.
    fn build_panel(
        platform: PlatformIdentity,
    ) -> (RestorationPanel, Rc<Cell<usize>>, Arc<AtomicUsize>) {
        let disposed = Rc::new(Cell::new(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let routine = move |_: &mut dyn ProgressSink, _: &AtomicBool| -> Result<(), RestoreError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };
        let panel = RestorationPanel::new(
            Box::new(CountingWindow(Rc::clone(&disposed))),
            Arc::new(routine),
            Box::new(Silent),
            Box::new(platform),
        );
        (panel, disposed, calls)
    }

    fn key(key: egui::Key, pressed: bool, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers,
        }
    }

    /// Run one egui frame with `events` and forward them to `panel`.
    fn feed(panel: &mut RestorationPanel, events: Vec<egui::Event>) {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| handle_input(ctx, panel));
    }

    #[test]
    fn alt_r_starts_restore() {
        let (mut panel, disposed, _) = build_panel(PlatformIdentity::Linux);
        feed(
            &mut panel,
            vec![key(egui::Key::R, true, egui::Modifiers::ALT)],
        );
        assert_eq!(panel.state(), RestoreState::Running);
        assert_eq!(disposed.get(), 0);
    }

    #[test]
    fn plain_r_does_not_start_restore() {
        let (mut panel, _, calls) = build_panel(PlatformIdentity::Linux);
        feed(
            &mut panel,
            vec![
                key(egui::Key::R, true, egui::Modifiers::NONE),
                key(egui::Key::R, false, egui::Modifiers::NONE),
            ],
        );
        assert_eq!(panel.state(), RestoreState::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn alt_c_disposes() {
        let (mut panel, disposed, _) = build_panel(PlatformIdentity::MacOs);
        feed(
            &mut panel,
            vec![key(egui::Key::C, true, egui::Modifiers::ALT)],
        );
        assert_eq!(disposed.get(), 1);
    }

    #[test]
    fn escape_acts_on_release_only() {
        let (mut panel, disposed, _) = build_panel(PlatformIdentity::Windows);
        feed(
            &mut panel,
            vec![key(egui::Key::Escape, true, egui::Modifiers::NONE)],
        );
        assert_eq!(disposed.get(), 0, "press must not dispose");

        feed(
            &mut panel,
            vec![key(egui::Key::Escape, false, egui::Modifiers::NONE)],
        );
        assert_eq!(disposed.get(), 1);
    }

    #[test]
    fn escape_release_is_ignored_on_macos() {
        let (mut panel, disposed, _) = build_panel(PlatformIdentity::MacOs);
        feed(
            &mut panel,
            vec![key(egui::Key::Escape, false, egui::Modifiers::NONE)],
        );
        assert_eq!(disposed.get(), 0);
    }

    #[test]
    fn typed_text_has_no_effect() {
        let (mut panel, disposed, calls) = build_panel(PlatformIdentity::Linux);
        feed(
            &mut panel,
            vec![egui::Event::Text("rc\u{1b}".to_string())],
        );
        assert_eq!(disposed.get(), 0);
        assert_eq!(panel.state(), RestoreState::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn trailing_row_is_filled_trailing_first() {
        assert_eq!(
            trailing_row_order(ButtonOrder::RestoreThenClose),
            [PanelButton::Close, PanelButton::Restore]
        );
        assert_eq!(
            trailing_row_order(ButtonOrder::CloseThenRestore),
            [PanelButton::Restore, PanelButton::Close]
        );
    }

    #[test]
    fn omitted_notice_only_after_drops() {
        let messages = Messages::builtin();
        assert_eq!(omitted_notice(&messages, 0), None);
        assert_eq!(
            omitted_notice(&messages, 3).as_deref(),
            Some("3 earlier lines omitted")
        );
    }

    #[test]
    fn render_without_clicks_activates_nothing() {
        let (mut panel, disposed, calls) = build_panel(PlatformIdentity::Linux);
        let messages = Messages::builtin();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| render(ui, &mut panel, &messages));
        });
        assert_eq!(disposed.get(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(panel.state(), RestoreState::Idle);
    }
}
