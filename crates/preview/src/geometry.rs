//! Thumbnail, zoom and overlay geometry

use crate::PreviewError;
use platform::{Point, Rect, Size};
use std::fmt;
use std::str::FromStr;

/// Point of the preview that stays fixed while zooming
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ZoomAnchor {
    #[default]
    NW,
    N,
    NE,
    W,
    C,
    E,
    SW,
    S,
    SE,
}

impl ZoomAnchor {
    pub const ALL: [ZoomAnchor; 9] = [
        ZoomAnchor::NW,
        ZoomAnchor::N,
        ZoomAnchor::NE,
        ZoomAnchor::W,
        ZoomAnchor::C,
        ZoomAnchor::E,
        ZoomAnchor::SW,
        ZoomAnchor::S,
        ZoomAnchor::SE,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ZoomAnchor::NW => "NW",
            ZoomAnchor::N => "N",
            ZoomAnchor::NE => "NE",
            ZoomAnchor::W => "W",
            ZoomAnchor::C => "C",
            ZoomAnchor::E => "E",
            ZoomAnchor::SW => "SW",
            ZoomAnchor::S => "S",
            ZoomAnchor::SE => "SE",
        }
    }
}

impl fmt::Display for ZoomAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoomAnchor {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        ZoomAnchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == wanted)
            .ok_or_else(|| PreviewError::InvalidAnchor(s.to_string()))
    }
}

/// Sub-rectangle of the client area the live thumbnail is drawn into.
///
/// Without a highlight the thumbnail fills the client area. With a highlight
/// of `border` pixels the top and bottom margins are exactly `border` and the
/// width shrinks to keep the client aspect ratio; the horizontal slack is
/// split with the odd pixel going to the right.
pub fn thumbnail_destination(client: Size, border: Option<i32>) -> Rect {
    let full = Rect::new(0, 0, client.width, client.height);

    let Some(border) = border.filter(|b| *b > 0) else {
        return full;
    };
    if client.width <= 0 || client.height <= 0 {
        return full;
    }

    // At least one row of content must survive
    let border = border.min((client.height - 1) / 2);
    if border == 0 {
        return full;
    }

    let aspect_ratio = client.width as f64 / client.height as f64;
    let actual_height = client.height - 2 * border;
    // f64::round rounds half away from zero
    let actual_width = (actual_height as f64 * aspect_ratio).round() as i32;

    let slack = client.width - actual_width;
    let left = slack.div_euclid(2);
    let right = slack - left;

    Rect::new(left, border, client.width - right, client.height - border)
}

/// New outer location after growing from `old` to `new` so that `anchor`
/// keeps its screen position.
pub fn zoom_location(anchor: ZoomAnchor, location: Point, old: Size, new: Size) -> Point {
    let centered_x = location.x.saturating_sub(new.width / 2).saturating_add(old.width / 2);
    let centered_y = location.y.saturating_sub(new.height / 2).saturating_add(old.height / 2);
    let right_x = location.x.saturating_sub(new.width).saturating_add(old.width);
    let bottom_y = location.y.saturating_sub(new.height).saturating_add(old.height);

    match anchor {
        ZoomAnchor::NW => location,
        ZoomAnchor::N => Point::new(centered_x, location.y),
        ZoomAnchor::NE => Point::new(right_x, location.y),
        ZoomAnchor::W => Point::new(location.x, centered_y),
        ZoomAnchor::C => Point::new(centered_x, centered_y),
        ZoomAnchor::E => Point::new(right_x, centered_y),
        ZoomAnchor::SW => Point::new(location.x, bottom_y),
        ZoomAnchor::S => Point::new(centered_x, bottom_y),
        ZoomAnchor::SE => Point::new(right_x, bottom_y),
    }
}

/// Screen bounds of the overlay: exactly the owner's client area.
///
/// Left, right and bottom borders are assumed equal; whatever remains of the
/// vertical chrome is the title bar.
pub fn overlay_bounds(location: Point, outer: Size, client: Size) -> (Point, Size) {
    let border = (outer.width - client.width) / 2;
    let title = (outer.height - client.height) - border;

    (Point::new(location.x + border, location.y + title), client)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_point(anchor: ZoomAnchor, location: Point, size: Size) -> Point {
        let (fx, fy) = match anchor {
            ZoomAnchor::NW => (0, 0),
            ZoomAnchor::N => (1, 0),
            ZoomAnchor::NE => (2, 0),
            ZoomAnchor::W => (0, 1),
            ZoomAnchor::C => (1, 1),
            ZoomAnchor::E => (2, 1),
            ZoomAnchor::SW => (0, 2),
            ZoomAnchor::S => (1, 2),
            ZoomAnchor::SE => (2, 2),
        };
        Point::new(location.x + fx * size.width / 2, location.y + fy * size.height / 2)
    }

    #[test]
    fn no_highlight_fills_client() {
        let client = Size::new(384, 216);
        assert_eq!(thumbnail_destination(client, None), Rect::new(0, 0, 384, 216));
        assert_eq!(thumbnail_destination(client, Some(0)), Rect::new(0, 0, 384, 216));
    }

    #[test]
    fn highlight_letterboxes_content() {
        // 400x200 with a 10px border: height 180, width 360, 40px slack
        let rect = thumbnail_destination(Size::new(400, 200), Some(10));
        assert_eq!(rect, Rect::new(20, 10, 380, 190));
    }

    #[test]
    fn odd_slack_goes_right() {
        // 113x100, border 5: height 90, width round(101.7) = 102, slack 11
        let rect = thumbnail_destination(Size::new(113, 100), Some(5));
        assert_eq!(rect, Rect::new(5, 5, 107, 95));
    }

    #[test]
    fn width_rounds_half_away_from_zero() {
        // 3x4, border 1: height 2, width 1.5 rounds to 2, slack 1
        let rect = thumbnail_destination(Size::new(3, 4), Some(1));
        assert_eq!(rect, Rect::new(0, 1, 2, 3));
    }

    #[test]
    fn highlight_preserves_aspect_ratio() {
        for (width, height) in [(100, 100), (384, 216), (250, 141), (123, 457), (640, 360)] {
            let client = Size::new(width, height);
            let ratio = width as f64 / height as f64;

            for border in 0..(height / 2) {
                let rect = thumbnail_destination(client, Some(border));
                let actual_height = height - 2 * border;
                let actual_width = rect.width();

                assert_eq!(rect.top, border);
                assert_eq!(rect.height(), actual_height);
                assert_eq!(rect.left + (width - rect.right), width - actual_width);
                assert!(rect.left <= width - rect.right);
                assert!((actual_width as f64 - actual_height as f64 * ratio).abs() <= 0.5 + 1e-9);
            }
        }
    }

    #[test]
    fn oversized_border_keeps_one_row() {
        let rect = thumbnail_destination(Size::new(100, 50), Some(40));
        assert_eq!(rect.top, 24);
        assert_eq!(rect.height(), 2);
    }

    #[test]
    fn degenerate_client_is_returned_as_is() {
        assert_eq!(thumbnail_destination(Size::new(0, 0), Some(5)), Rect::new(0, 0, 0, 0));
        assert_eq!(thumbnail_destination(Size::new(100, 0), Some(5)), Rect::new(0, 0, 100, 0));
    }

    #[test]
    fn every_anchor_stays_put() {
        let location = Point::new(500, 300);
        let old = Size::new(116, 139);
        let new = Size::new(216, 239);

        for anchor in ZoomAnchor::ALL {
            let moved = zoom_location(anchor, location, old, new);
            assert_eq!(
                anchor_point(anchor, location, old),
                anchor_point(anchor, moved, new),
                "anchor {anchor}"
            );
        }
    }

    #[test]
    fn center_anchor_on_square_window() {
        let location = Point::new(0, 0);
        let moved = zoom_location(ZoomAnchor::C, location, Size::new(100, 100), Size::new(200, 200));
        assert_eq!(moved, Point::new(-50, -50));
        assert_eq!(moved.offset(100, 100), Point::new(50, 50));
    }

    #[test]
    fn northwest_is_noop() {
        let location = Point::new(12, 34);
        assert_eq!(zoom_location(ZoomAnchor::NW, location, Size::new(10, 10), Size::new(90, 90)), location);
    }

    #[test]
    fn huge_zoom_saturates_instead_of_wrapping() {
        let location = Point::new(-500, -300);
        let old = Size::new(216, 139);
        let huge = Size::new(i32::MAX, i32::MAX);

        assert_eq!(zoom_location(ZoomAnchor::SE, location, old, huge), Point::new(i32::MIN + 216, i32::MIN + 139));
        let centered = zoom_location(ZoomAnchor::C, location, old, huge);
        assert!(centered.x < location.x && centered.y < location.y);
    }

    #[test]
    fn overlay_covers_client_area() {
        // 8px side/bottom borders and a 31px title bar
        let (location, size) = overlay_bounds(Point::new(100, 200), Size::new(216, 189), Size::new(200, 150));
        assert_eq!(location, Point::new(108, 231));
        assert_eq!(size, Size::new(200, 150));

        let (location, _) = overlay_bounds(Point::new(100, 200), Size::new(200, 150), Size::new(200, 150));
        assert_eq!(location, Point::new(100, 200));
    }

    #[test]
    fn anchor_parses_case_insensitively() {
        assert_eq!("se".parse::<ZoomAnchor>().unwrap(), ZoomAnchor::SE);
        assert_eq!(" C ".parse::<ZoomAnchor>().unwrap(), ZoomAnchor::C);
        assert!("NNE".parse::<ZoomAnchor>().is_err());
        for anchor in ZoomAnchor::ALL {
            assert_eq!(anchor.to_string().parse::<ZoomAnchor>().unwrap(), anchor);
        }
    }
}
