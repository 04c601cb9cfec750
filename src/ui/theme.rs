// RestoreConfig - ui/theme.rs
//
// Layout constants and font sizing for the restoration panel.
// No dependencies on app state or business logic.

/// Outer margin around the panel contents.
pub const PANEL_MARGIN: f32 = 15.0;

/// Gap between the introductory text and the log area.
pub const INTRO_GAP: f32 = 11.0;

/// Gap between the log area and the button row.
pub const BUTTON_ROW_GAP: f32 = 11.0;

/// Height reserved for the button row below the log area.
pub const BUTTON_ROW_HEIGHT: f32 = 32.0;

/// Inner padding of the log text area.
pub const LOG_AREA_PADDING: f32 = 5.0;

/// Minimum width of an action button.
pub const BUTTON_MIN_WIDTH: f32 = 90.0;

/// Apply the configured body font size to every proportional text style,
/// keeping headings and small text in proportion.
pub fn apply_font_size(ctx: &egui::Context, body_size: f32) {
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => body_size * 1.4,
                egui::TextStyle::Small => body_size * 0.75,
                _ => body_size,
            };
        }
    });
}
