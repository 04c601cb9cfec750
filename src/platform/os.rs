// RestoreConfig - platform/os.rs
//
// Platform identity and the two cosmetic decisions that depend on it:
// button order and whether Escape dismisses the window. Both live behind
// one `PlatformPolicy` so the panel can be tested without a real windowing
// environment.

use crate::core::model::ButtonOrder;

/// Detected operating-system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformIdentity {
    MacOs,
    Windows,
    Linux,
    Other,
}

impl PlatformIdentity {
    /// Identity of the platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

/// Platform-dependent UI conventions consulted by the panel.
pub trait PlatformPolicy {
    /// Leading-to-trailing order of the Restore and Close buttons.
    fn button_order(&self) -> ButtonOrder;

    /// Whether releasing Escape closes the window.
    fn escape_dismisses(&self) -> bool;
}

impl PlatformPolicy for PlatformIdentity {
    fn button_order(&self) -> ButtonOrder {
        // macOS puts the default action last.
        if *self == Self::MacOs {
            ButtonOrder::CloseThenRestore
        } else {
            ButtonOrder::RestoreThenClose
        }
    }

    fn escape_dismisses(&self) -> bool {
        // Dialogs are not closed with Escape on macOS.
        *self != Self::MacOs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PlatformIdentity; 4] = [
        PlatformIdentity::MacOs,
        PlatformIdentity::Windows,
        PlatformIdentity::Linux,
        PlatformIdentity::Other,
    ];

    #[test]
    fn only_macos_puts_close_first() {
        for p in ALL {
            let expected = if p == PlatformIdentity::MacOs {
                ButtonOrder::CloseThenRestore
            } else {
                ButtonOrder::RestoreThenClose
            };
            assert_eq!(p.button_order(), expected, "{}", p.name());
        }
    }

    #[test]
    fn escape_suppressed_only_on_macos() {
        for p in ALL {
            assert_eq!(p.escape_dismisses(), p != PlatformIdentity::MacOs, "{}", p.name());
        }
    }

    #[test]
    fn current_matches_compile_target() {
        let current = PlatformIdentity::current();
        #[cfg(target_os = "macos")]
        assert_eq!(current, PlatformIdentity::MacOs);
        #[cfg(target_os = "windows")]
        assert_eq!(current, PlatformIdentity::Windows);
        #[cfg(target_os = "linux")]
        assert_eq!(current, PlatformIdentity::Linux);
        let _ = current;
    }
}
