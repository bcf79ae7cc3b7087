//! Live window previews for Thumbview
//!
//! Keeps a companion window showing a live thumbnail of a source window in
//! step with move, resize, show/hide, hover zoom and manual drag events.

pub mod callbacks;
pub mod geometry;
pub mod overlay;
pub mod settings;
pub mod state;
pub mod suppress;
pub mod window;

#[cfg(windows)]
pub mod win32;

pub use callbacks::{PreviewCallback, PreviewCallbacks, PreviewNotification};
pub use geometry::{overlay_bounds, thumbnail_destination, zoom_location, ZoomAnchor};
pub use overlay::{overlay_opacity, Overlay, OverlayPhase};
pub use settings::{Highlight, PreviewSettings, MAX_ZOOM_FACTOR};
pub use state::{Interaction, Lifecycle, ZoomSnapshot};
pub use suppress::{Clock, ResizeSuppressor, SystemClock, RESIZE_EVENT_TIMEOUT};
pub use window::PreviewWindow;

use platform::PlatformError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid zoom anchor: {0}")]
    InvalidAnchor(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

pub type PreviewResult<T> = Result<T, PreviewError>;
