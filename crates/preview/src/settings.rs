//! Configuration applied to a preview by its controller

use crate::geometry::ZoomAnchor;
use crate::{PreviewError, PreviewResult};
use platform::{Color, Hotkey, Size};

/// Largest accepted hover zoom factor
pub const MAX_ZOOM_FACTOR: u32 = 10;

/// Coloured border drawn around the live thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub enabled: bool,
    pub color: Color,
    /// Border width in pixels
    pub width: i32,
}

impl Highlight {
    pub fn new(enabled: bool, color: Color, width: i32) -> Self {
        Self { enabled, color, width }
    }

    /// Border width to letterbox with, `None` when disabled.
    pub fn border(&self) -> Option<i32> {
        self.enabled.then_some(self.width)
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::rgb(0xAD, 0xFF, 0x2F),
            width: 3,
        }
    }
}

/// Everything a controller configures on a preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSettings {
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f64,
    pub show_frames: bool,
    pub topmost: bool,
    pub overlay_enabled: bool,
    pub highlight: Highlight,
    /// Client size multiplier used on hover, at least 1
    pub zoom_factor: u32,
    pub zoom_anchor: ZoomAnchor,
    /// Zero means unconstrained
    pub minimum_size: Size,
    /// Zero means unconstrained
    pub maximum_size: Size,
    pub hotkey: Option<Hotkey>,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            show_frames: true,
            topmost: false,
            overlay_enabled: false,
            highlight: Highlight::default(),
            zoom_factor: 2,
            zoom_anchor: ZoomAnchor::NW,
            minimum_size: Size::default(),
            maximum_size: Size::default(),
            hotkey: None,
        }
    }
}

impl PreviewSettings {
    pub fn validate(&self) -> PreviewResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PreviewError::InvalidSetting(format!(
                "opacity {} is outside 0.0..=1.0",
                self.opacity
            )));
        }

        if !(1..=MAX_ZOOM_FACTOR).contains(&self.zoom_factor) {
            return Err(PreviewError::InvalidSetting(format!(
                "zoom factor {} is outside 1..={}",
                self.zoom_factor, MAX_ZOOM_FACTOR
            )));
        }

        if self.highlight.width < 0 {
            return Err(PreviewError::InvalidSetting(format!(
                "highlight width {} is negative",
                self.highlight.width
            )));
        }

        let min = self.minimum_size;
        let max = self.maximum_size;
        if min.width < 0 || min.height < 0 || max.width < 0 || max.height < 0 {
            return Err(PreviewError::InvalidSetting("size limits must not be negative".into()));
        }
        if (max.width > 0 && min.width > max.width) || (max.height > 0 && min.height > max.height) {
            return Err(PreviewError::InvalidSetting(format!(
                "minimum size {}x{} exceeds maximum size {}x{}",
                min.width, min.height, max.width, max.height
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = PreviewSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.highlight.border(), None);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut settings = PreviewSettings { opacity: 1.2, ..Default::default() };
        assert!(settings.validate().is_err());

        settings.opacity = 0.5;
        settings.zoom_factor = 0;
        assert!(settings.validate().is_err());

        settings.zoom_factor = MAX_ZOOM_FACTOR + 1;
        assert!(settings.validate().is_err());

        settings.zoom_factor = MAX_ZOOM_FACTOR;
        assert!(settings.validate().is_ok());

        settings.zoom_factor = 3;
        settings.highlight.width = -1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_inverted_size_limits() {
        let settings = PreviewSettings {
            minimum_size: Size::new(300, 100),
            maximum_size: Size::new(200, 400),
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(PreviewError::InvalidSetting(_))));

        let unbounded = PreviewSettings {
            minimum_size: Size::new(300, 100),
            maximum_size: Size::default(),
            ..Default::default()
        };
        assert!(unbounded.validate().is_ok());
    }

    #[test]
    fn enabled_highlight_reports_border() {
        let highlight = Highlight::new(true, Color::rgb(255, 0, 0), 4);
        assert_eq!(highlight.border(), Some(4));
    }
}
