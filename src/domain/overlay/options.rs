//! Fixed presentation flags for tracker overlays

/// Window flags applied to every tracker overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOptions {
    pub frame: bool,
    pub transparent: bool,
    pub resizable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
    pub fullscreenable: bool,
    pub always_on_top: bool,
    pub has_shadow: bool,
    pub skip_taskbar: bool,
    /// Whether the window is shown on creation
    pub show: bool,
    /// Whether showing the window may take keyboard focus
    pub focusable: bool,
}

impl OverlayOptions {
    /// Flags for a border strip: frameless, on top, hidden until ready
    pub const fn tracker() -> Self {
        Self {
            frame: false,
            transparent: true,
            resizable: false,
            minimizable: true,
            maximizable: false,
            fullscreenable: false,
            always_on_top: true,
            has_shadow: false,
            skip_taskbar: false,
            show: false,
            focusable: false,
        }
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self::tracker()
    }
}
