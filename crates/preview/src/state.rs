//! Preview lifecycle and interaction states

use platform::{Point, Size};

/// Visibility lifecycle. Closing consumes the preview, so it has no state here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created but never shown
    #[default]
    Constructed,
    /// Visible and tracking its source
    Shown,
    /// Hidden after being shown
    Hidden,
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Shown)
    }
}

/// Zoom and manual drag state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interaction {
    /// Normal size, no drag in progress
    #[default]
    Idle,
    /// Enlarged by a zoom command, waiting for zoom out
    ZoomedIn,
    /// Right-button drag moving or resizing the preview
    Custom,
}

impl Interaction {
    pub fn is_custom(&self) -> bool {
        matches!(self, Interaction::Custom)
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self, Interaction::ZoomedIn)
    }
}

/// Geometry restored when a zoom ends or a drag begins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoomSnapshot {
    /// Outer size
    pub size: Size,
    pub location: Point,
    pub maximum_size: Size,
}
