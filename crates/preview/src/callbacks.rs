//! Optional notification slots exposed to the controller

use platform::WindowHandle;
use std::fmt;

/// Called with the source window handle of the preview that fired.
pub type PreviewCallback = Box<dyn FnMut(WindowHandle)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewNotification {
    Moved,
    Resized,
    /// Pointer entered the preview
    Focused,
    /// Pointer left the preview
    LostFocus,
    /// Left click or hotkey: bring the source window forward
    Activated,
    /// Ctrl + left click
    Deactivated,
}

/// Six callback slots; an empty slot means nobody listens.
///
/// Callbacks run while the preview is mutably borrowed, so a controller that
/// wants to call back into the same preview should queue the id and act on
/// it after the handler returns.
#[derive(Default)]
pub struct PreviewCallbacks {
    moved: Option<PreviewCallback>,
    resized: Option<PreviewCallback>,
    focused: Option<PreviewCallback>,
    lost_focus: Option<PreviewCallback>,
    activated: Option<PreviewCallback>,
    deactivated: Option<PreviewCallback>,
}

impl PreviewCallbacks {
    fn slot_mut(&mut self, notification: PreviewNotification) -> &mut Option<PreviewCallback> {
        match notification {
            PreviewNotification::Moved => &mut self.moved,
            PreviewNotification::Resized => &mut self.resized,
            PreviewNotification::Focused => &mut self.focused,
            PreviewNotification::LostFocus => &mut self.lost_focus,
            PreviewNotification::Activated => &mut self.activated,
            PreviewNotification::Deactivated => &mut self.deactivated,
        }
    }

    /// Install `callback`, replacing any previous one for the same notification.
    pub fn set(&mut self, notification: PreviewNotification, callback: impl FnMut(WindowHandle) + 'static) {
        *self.slot_mut(notification) = Some(Box::new(callback));
    }

    pub fn clear(&mut self, notification: PreviewNotification) {
        *self.slot_mut(notification) = None;
    }

    pub fn is_registered(&mut self, notification: PreviewNotification) -> bool {
        self.slot_mut(notification).is_some()
    }

    /// Invoke the callback if one is registered.
    pub(crate) fn emit(&mut self, notification: PreviewNotification, id: WindowHandle) {
        if let Some(callback) = self.slot_mut(notification) {
            callback(id);
        }
    }
}

impl fmt::Debug for PreviewCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewCallbacks")
            .field("moved", &self.moved.is_some())
            .field("resized", &self.resized.is_some())
            .field("focused", &self.focused.is_some())
            .field("lost_focus", &self.lost_focus.is_some())
            .field("activated", &self.activated.is_some())
            .field("deactivated", &self.deactivated.is_some())
            .finish()
    }
}
