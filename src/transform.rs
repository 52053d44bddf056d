//! Coordinate transforms between data and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::Range;

/// Farthest a projected point may sit from the origin, in pixels. Samples
/// far outside the visible range would otherwise overflow `f32`.
const MAX_SCREEN_OFFSET: f64 = 1.0e7;

/// Linear map from a visible value range onto a pixel rectangle.
#[derive(Debug, Clone)]
pub(crate) struct Transform {
    x: Range,
    y: Range,
    screen: ScreenRect,
}

impl Transform {
    /// Create a transform for the given value ranges and screen rectangle.
    ///
    /// Returns `None` for an empty rectangle or a zero/non-finite span, for
    /// which no pixel mapping exists.
    pub(crate) fn new(x: Range, y: Range, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() || !x.is_valid() || !y.is_valid() {
            return None;
        }
        Some(Self { x, y, screen })
    }

    /// Access the screen rectangle.
    pub(crate) fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a data point into screen space.
    pub(crate) fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.is_finite() {
            return None;
        }
        let x_norm = (point.x - self.x.min) / self.x.span();
        let y_norm = (point.y - self.y.min) / self.y.span();
        let sx = self.screen.min.x as f64 + x_norm * self.screen.width() as f64;
        let sy = self.screen.max.y as f64 - y_norm * self.screen.height() as f64;
        Some(ScreenPoint::new(to_screen(sx), to_screen(sy)))
    }
}

fn to_screen(value: f64) -> f32 {
    value.clamp(-MAX_SCREEN_OFFSET, MAX_SCREEN_OFFSET) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_corners_onto_rect() {
        let screen = ScreenRect::from_ltrb(10.0, 20.0, 110.0, 70.0);
        let transform =
            Transform::new(Range::new(0.0, 2.0), Range::new(-1.0, 1.0), screen).expect("valid");
        assert_eq!(
            transform.data_to_screen(Point::new(0.0, -1.0)),
            Some(ScreenPoint::new(10.0, 70.0))
        );
        assert_eq!(
            transform.data_to_screen(Point::new(2.0, 1.0)),
            Some(ScreenPoint::new(110.0, 20.0))
        );
        assert_eq!(
            transform.data_to_screen(Point::new(1.0, 0.0)),
            Some(ScreenPoint::new(60.0, 45.0))
        );
    }

    #[test]
    fn rejects_degenerate_span() {
        let screen = ScreenRect::from_ltrb(0.0, 0.0, 100.0, 100.0);
        assert!(Transform::new(Range::new(1.0, 1.0), Range::new(0.0, 1.0), screen).is_none());
        assert!(Transform::new(Range::new(0.0, 1.0), Range::new(0.0, f64::NAN), screen).is_none());
    }

    #[test]
    fn non_finite_points_do_not_map() {
        let screen = ScreenRect::from_ltrb(0.0, 0.0, 100.0, 100.0);
        let transform =
            Transform::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0), screen).expect("valid");
        assert!(transform.data_to_screen(Point::new(f64::NAN, 0.5)).is_none());
    }

    #[test]
    fn far_out_points_stay_finite() {
        let screen = ScreenRect::from_ltrb(0.0, 0.0, 100.0, 100.0);
        let transform =
            Transform::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0), screen).expect("valid");
        let point = transform
            .data_to_screen(Point::new(-1.0e40, 1.0e40))
            .expect("finite input maps");
        assert_eq!(point, ScreenPoint::new(-1.0e7, -1.0e7));
    }
}
