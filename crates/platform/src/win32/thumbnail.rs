//! DWM live thumbnail

use super::to_hwnd;
use crate::{PlatformError, PlatformResult, Rect, ThumbnailProjection, WindowHandle};
use windows::Win32::Foundation::{BOOL, RECT};
use windows::Win32::Graphics::Dwm::{
    DwmRegisterThumbnail, DwmUnregisterThumbnail, DwmUpdateThumbnailProperties,
    DWM_THUMBNAIL_PROPERTIES, DWM_TNP_OPACITY, DWM_TNP_RECTDESTINATION,
    DWM_TNP_SOURCECLIENTAREAONLY, DWM_TNP_VISIBLE,
};

/// A registered DWM thumbnail. Released on drop if not released before.
pub struct DwmThumbnail {
    id: Option<isize>,
    properties: DWM_THUMBNAIL_PROPERTIES,
}

impl DwmThumbnail {
    /// Register a thumbnail of `source` drawn inside `destination`.
    pub fn register(destination: WindowHandle, source: WindowHandle) -> PlatformResult<Self> {
        let id = unsafe { DwmRegisterThumbnail(to_hwnd(destination), to_hwnd(source)) }
            .map_err(|e| {
                PlatformError::ThumbnailRegistration(format!("{} into {}: {}", source, destination, e))
            })?;

        log::debug!("Registered thumbnail {:#x} ({} into {})", id, source, destination);

        let properties = DWM_THUMBNAIL_PROPERTIES {
            dwFlags: DWM_TNP_VISIBLE
                | DWM_TNP_OPACITY
                | DWM_TNP_RECTDESTINATION
                | DWM_TNP_SOURCECLIENTAREAONLY,
            opacity: 255,
            fVisible: BOOL(1),
            fSourceClientAreaOnly: BOOL(1),
            ..Default::default()
        };

        Ok(Self { id: Some(id), properties })
    }

    fn update(&self) {
        let Some(id) = self.id else {
            return;
        };

        unsafe {
            if let Err(e) = DwmUpdateThumbnailProperties(id, &self.properties) {
                log::warn!("Failed to update thumbnail {:#x}: {}", id, e);
            }
        }
    }
}

impl ThumbnailProjection for DwmThumbnail {
    fn retarget(&mut self, destination: Rect) {
        self.properties.rcDestination = RECT {
            left: destination.left,
            top: destination.top,
            right: destination.right,
            bottom: destination.bottom,
        };
        self.update();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };

        unsafe {
            if let Err(e) = DwmUnregisterThumbnail(id) {
                log::warn!("Failed to unregister thumbnail {:#x}: {}", id, e);
            }
        }
        log::debug!("Released thumbnail {:#x}", id);
    }
}

impl Drop for DwmThumbnail {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unregistered(id: isize) -> DwmThumbnail {
        DwmThumbnail { id: Some(id), properties: DWM_THUMBNAIL_PROPERTIES::default() }
    }

    #[test]
    fn release_forgets_the_id_so_drop_does_not_unregister_again() {
        // Not a live handle: DwmUnregisterThumbnail fails and the failure is only logged
        let mut thumbnail = unregistered(0x7ead);

        thumbnail.release();
        assert_eq!(thumbnail.id, None);

        thumbnail.release();
        assert_eq!(thumbnail.id, None);
        drop(thumbnail);
    }

    #[test]
    fn released_thumbnail_ignores_retarget() {
        let mut thumbnail = unregistered(0x7eae);
        thumbnail.release();

        thumbnail.retarget(Rect::new(0, 0, 10, 10));
        assert_eq!(thumbnail.properties.rcDestination.right, 10);
        assert_eq!(thumbnail.id, None);
    }
}
