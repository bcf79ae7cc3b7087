//! Caption overlay kept in sync with its preview

use platform::{OverlayHost, Point, Size, WindowHandle};

/// Overlay opacity for a given owner opacity.
///
/// Near-opaque owners get a fully opaque overlay; otherwise the overlay keeps
/// half of the owner's transparency so the caption stays readable.
pub fn overlay_opacity(owner_opacity: f64) -> f64 {
    if owner_opacity > 0.9 {
        1.0
    } else {
        1.0 - (1.0 - owner_opacity) / 2.0
    }
}

/// Whether the overlay has been shown since its owner was last shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayPhase {
    /// Must be shown before its position can be applied
    #[default]
    NeverShown,
    Shown,
}

/// Caption layer owned by one preview for its whole lifetime
pub struct Overlay<O: OverlayHost> {
    host: O,
    caption: String,
    enabled: bool,
    phase: OverlayPhase,
    opacity: f64,
    topmost: bool,
}

impl<O: OverlayHost> Overlay<O> {
    pub fn new(host: O) -> Self {
        Self {
            host,
            caption: String::new(),
            enabled: false,
            phase: OverlayPhase::NeverShown,
            opacity: 1.0,
            topmost: false,
        }
    }

    pub fn host(&self) -> &O {
        &self.host
    }

    pub fn handle(&self) -> WindowHandle {
        self.host.handle()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
        self.host.set_caption(caption);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Draw the caption or not; the overlay window itself stays up either way.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.host.set_caption_visible(enabled);
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Derive and apply the overlay opacity from the owner's.
    pub fn set_owner_opacity(&mut self, owner_opacity: f64) {
        self.opacity = overlay_opacity(owner_opacity);
        self.host.set_opacity(self.opacity);
    }

    pub fn is_topmost(&self) -> bool {
        self.topmost
    }

    pub fn set_topmost(&mut self, topmost: bool) {
        self.topmost = topmost;
        self.host.set_topmost(topmost);
    }

    pub fn show(&mut self) {
        self.host.show();
        self.phase = OverlayPhase::Shown;
    }

    pub fn hide(&mut self) {
        self.host.hide();
    }

    /// Forget that the overlay was shown so the next refresh shows it again.
    pub fn reset(&mut self) {
        self.phase = OverlayPhase::NeverShown;
    }

    pub fn set_bounds(&mut self, location: Point, size: Size) {
        self.host.set_size(size);
        self.host.set_location(location);
    }

    pub fn refresh(&mut self) {
        self.host.redraw();
    }

    pub fn close(mut self) {
        self.host.close();
    }
}
