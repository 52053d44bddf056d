//! Geometric primitives used by the rendering pipeline.
//!
//! [`Point`] lives in data space (seconds / millivolts). [`ScreenPoint`] and
//! [`ScreenRect`] live in pixel space, with Y growing downwards.

/// A sample in data space.
///
/// In a streaming series `x` is the time elapsed since the previous sample;
/// in a static series it is the absolute X value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X value (absolute, or delta in streaming mode).
    pub x: f64,
    /// Y value.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its left, top, right and bottom edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(ScreenPoint::new(left, top), ScreenPoint::new(right, bottom))
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside the rectangle, edges included.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Shrink the rectangle by the given amounts on each side.
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::from_ltrb(
            self.min.x + left,
            self.min.y + top,
            self.max.x - right,
            self.max.y - bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_edges() {
        let rect = ScreenRect::from_ltrb(0.0, 0.0, 10.0, 20.0);
        assert!(rect.contains(ScreenPoint::new(0.0, 20.0)));
        assert!(rect.contains(ScreenPoint::new(10.0, 0.0)));
        assert!(!rect.contains(ScreenPoint::new(10.5, 5.0)));
    }

    #[test]
    fn inset_moves_every_edge() {
        let rect = ScreenRect::from_ltrb(0.0, 0.0, 100.0, 50.0).inset(5.0, 2.0, 10.0, 4.0);
        assert_eq!(rect, ScreenRect::from_ltrb(5.0, 2.0, 90.0, 46.0));
        assert!(rect.is_valid());
    }
}
