//! Platform service traits consumed by the preview core

use crate::{Color, Hotkey, HotkeyId, PlatformResult, Point, Rect, Size, WindowHandle};
use std::rc::Rc;

/// Primitive operations on foreign windows plus composition and hotkey
/// registration. Operations on a stale handle are expected to do nothing.
pub trait WindowService {
    type Thumbnail: ThumbnailProjection;

    /// Whether desktop composition is available (queried once at startup).
    fn is_composition_enabled(&self) -> bool;

    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Bring a window to the foreground, restoring it without animation if minimized.
    fn activate(&self, handle: WindowHandle);

    /// Minimize a window, either through the standard command (animated) or by
    /// setting its placement directly.
    fn minimize(&self, handle: WindowHandle, animate: bool);

    fn move_window(&self, handle: WindowHandle, left: i32, top: i32, width: i32, height: i32);

    fn maximize(&self, handle: WindowHandle);

    /// Outer window rectangle in screen coordinates
    fn position(&self, handle: WindowHandle) -> Rect;

    fn is_maximized(&self, handle: WindowHandle) -> bool;

    fn is_minimized(&self, handle: WindowHandle) -> bool;

    /// Start streaming `source` into `destination`. Each call creates a fresh projection.
    fn register_thumbnail(
        &self,
        destination: WindowHandle,
        source: WindowHandle,
    ) -> PlatformResult<Self::Thumbnail>;

    /// Bind a global key combination to `owner`; presses arrive as
    /// [`crate::HostEvent::HotkeyPressed`] on that window.
    fn register_hotkey(&self, owner: WindowHandle, hotkey: Hotkey) -> PlatformResult<HotkeyId>;

    fn unregister_hotkey(&self, owner: WindowHandle, id: HotkeyId);
}

/// Lets every preview on the UI thread share one service.
impl<T: WindowService + ?Sized> WindowService for Rc<T> {
    type Thumbnail = T::Thumbnail;

    fn is_composition_enabled(&self) -> bool {
        (**self).is_composition_enabled()
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        (**self).foreground_window()
    }

    fn activate(&self, handle: WindowHandle) {
        (**self).activate(handle)
    }

    fn minimize(&self, handle: WindowHandle, animate: bool) {
        (**self).minimize(handle, animate)
    }

    fn move_window(&self, handle: WindowHandle, left: i32, top: i32, width: i32, height: i32) {
        (**self).move_window(handle, left, top, width, height)
    }

    fn maximize(&self, handle: WindowHandle) {
        (**self).maximize(handle)
    }

    fn position(&self, handle: WindowHandle) -> Rect {
        (**self).position(handle)
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        (**self).is_maximized(handle)
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        (**self).is_minimized(handle)
    }

    fn register_thumbnail(
        &self,
        destination: WindowHandle,
        source: WindowHandle,
    ) -> PlatformResult<Self::Thumbnail> {
        (**self).register_thumbnail(destination, source)
    }

    fn register_hotkey(&self, owner: WindowHandle, hotkey: Hotkey) -> PlatformResult<HotkeyId> {
        (**self).register_hotkey(owner, hotkey)
    }

    fn unregister_hotkey(&self, owner: WindowHandle, id: HotkeyId) {
        (**self).unregister_hotkey(owner, id)
    }
}

/// Live projection of one window's contents into a sub-rectangle of another.
pub trait ThumbnailProjection {
    /// Move the projection to `destination`, in the destination window's client coordinates.
    fn retarget(&mut self, destination: Rect);

    /// Tear the projection down. Calls after the first do nothing.
    fn release(&mut self);
}

/// Border style of the preview host window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FrameStyle {
    /// Resizable tool-window frame
    #[default]
    Sizable,
    /// Borderless
    None,
}

/// Operations shared by the preview and overlay companion windows
pub trait HostWindow {
    fn handle(&self) -> WindowHandle;

    fn show(&mut self);

    fn hide(&mut self);

    /// Destroy the window. Terminal.
    fn close(&mut self);

    /// Move the window's outer top-left corner.
    fn set_location(&mut self, location: Point);

    /// Resize the window's outer bounds.
    fn set_size(&mut self, size: Size);

    fn set_opacity(&mut self, opacity: f64);

    fn set_topmost(&mut self, topmost: bool);
}

/// Window that hosts a live thumbnail
pub trait PreviewHost: HostWindow {
    fn set_title(&mut self, title: &str);

    fn set_frame(&mut self, frame: FrameStyle);

    /// Outer size minus client size for the current frame style.
    fn chrome(&self) -> Size;

    /// Fill colour behind the projection; `None` restores the default.
    fn set_background(&mut self, color: Option<Color>);

    /// Minimum and maximum outer size. A zero size means unconstrained.
    fn set_size_limits(&mut self, minimum: Size, maximum: Size);
}

/// Borderless always-on-top caption layer
pub trait OverlayHost: HostWindow {
    fn set_caption(&mut self, caption: &str);

    fn set_caption_visible(&mut self, visible: bool);

    /// Force a repaint with the current caption and layout.
    fn redraw(&mut self);
}
