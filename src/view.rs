//! Value ranges, axis bounds and the data extent contract.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn mid(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies inside the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Which ends of one axis are defined.
///
/// Replaces "NaN means unset" with an explicit tag so an unset end can never
/// leak into arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisEnds {
    /// Neither end is set; the axis follows the data.
    #[default]
    Unset,
    /// Only the minimum is set.
    Min(f64),
    /// Only the maximum is set.
    Max(f64),
    /// Both ends are set.
    Both {
        /// Minimum value.
        min: f64,
        /// Maximum value.
        max: f64,
    },
}

impl AxisEnds {
    /// Build from optional ends.
    pub fn from_options(min: Option<f64>, max: Option<f64>) -> Self {
        match (min, max) {
            (None, None) => Self::Unset,
            (Some(min), None) => Self::Min(min),
            (None, Some(max)) => Self::Max(max),
            (Some(min), Some(max)) => Self::Both { min, max },
        }
    }

    /// The minimum, if set.
    pub fn min(&self) -> Option<f64> {
        match *self {
            Self::Min(min) | Self::Both { min, .. } => Some(min),
            Self::Unset | Self::Max(_) => None,
        }
    }

    /// The maximum, if set.
    pub fn max(&self) -> Option<f64> {
        match *self {
            Self::Max(max) | Self::Both { max, .. } => Some(max),
            Self::Unset | Self::Min(_) => None,
        }
    }

    /// Replace the minimum, keeping the maximum.
    pub fn with_min(self, min: f64) -> Self {
        Self::from_options(Some(min), self.max())
    }

    /// Replace the maximum, keeping the minimum.
    pub fn with_max(self, max: f64) -> Self {
        Self::from_options(self.min(), Some(max))
    }

    /// The resolved range when both ends are set.
    pub fn range(&self) -> Option<Range> {
        match *self {
            Self::Both { min, max } => Some(Range { min, max }),
            _ => None,
        }
    }
}

/// Bounds of both axes as owned by the grid engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisBounds {
    /// X axis ends.
    pub x: AxisEnds,
    /// Y axis ends.
    pub y: AxisEnds,
}

/// Observed extents of the data currently held by a series.
///
/// Queried by the grid engine whenever an axis has no pinned ends.
pub trait DataSource {
    /// Whether there is any data.
    fn is_empty(&self) -> bool;
    /// Smallest X value.
    fn x_min(&self) -> f64;
    /// Largest X value.
    fn x_max(&self) -> f64;
    /// Smallest Y value.
    fn y_min(&self) -> f64;
    /// Largest Y value.
    fn y_max(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_new_swaps_bounds() {
        let range = Range::new(3.0, -1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 3.0);
        assert_eq!(range.mid(), 1.0);
    }

    #[test]
    fn axis_ends_track_each_side() {
        let ends = AxisEnds::Unset.with_max(2.0);
        assert_eq!(ends, AxisEnds::Max(2.0));
        let ends = ends.with_min(-1.0);
        assert_eq!(ends, AxisEnds::Both { min: -1.0, max: 2.0 });
        assert_eq!(ends.range(), Some(Range::new(-1.0, 2.0)));
        assert_eq!(AxisEnds::Min(4.0).range(), None);
    }
}
