// RestoreConfig - core/window.rs
//
// Handle to the window hosting the panel. The panel never creates or
// destroys that window itself; it only asks it to go away.

/// The window that created the panel.
pub trait ParentWindow {
    /// Tear down the window and whatever it owns. No confirmation.
    fn dispose(&self);
}
