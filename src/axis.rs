//! Axis enums, tick label formatting and grid snapping.

use std::sync::Arc;

use crate::datasource::InvalidCode;

/// Placement of the X tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XLabelPosition {
    /// No labels.
    #[default]
    None,
    /// Below the grid.
    Bottom,
    /// Above the grid.
    Top,
}

impl XLabelPosition {
    /// Whether labels are drawn at all.
    pub fn is_visible(self) -> bool {
        self != Self::None
    }
}

impl TryFrom<i32> for XLabelPosition {
    type Error = InvalidCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Bottom),
            2 => Ok(Self::Top),
            _ => Err(InvalidCode {
                kind: "x label position",
                code,
            }),
        }
    }
}

/// Placement of the Y tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YLabelPosition {
    /// No labels.
    #[default]
    None,
    /// Left of the grid.
    Left,
    /// Right of the grid.
    Right,
}

impl YLabelPosition {
    /// Whether labels are drawn at all.
    pub fn is_visible(self) -> bool {
        self != Self::None
    }
}

impl TryFrom<i32> for YLabelPosition {
    type Error = InvalidCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Left),
            2 => Ok(Self::Right),
            _ => Err(InvalidCode {
                kind: "y label position",
                code,
            }),
        }
    }
}

/// Where the data range is anchored inside the fixed Y span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineGravity {
    /// Data maximum hugs the top grid line.
    Top,
    /// Data midpoint sits in the middle of the span.
    #[default]
    Center,
    /// Data minimum hugs the bottom grid line.
    Bottom,
}

impl TryFrom<i32> for LineGravity {
    type Error = InvalidCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Top),
            1 => Ok(Self::Center),
            2 => Ok(Self::Bottom),
            _ => Err(InvalidCode {
                kind: "line gravity",
                code,
            }),
        }
    }
}

/// Formatter for tick labels.
#[derive(Clone)]
pub enum LabelFormat {
    /// Decimal with at most `max_fraction_digits` digits after the point;
    /// trailing zeros are dropped (`1.50` prints as `1.5`).
    Decimal {
        /// Maximum number of fraction digits.
        max_fraction_digits: usize,
    },
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl LabelFormat {
    /// Decimal format with the given precision.
    pub fn decimal(max_fraction_digits: usize) -> Self {
        Self::Decimal {
            max_fraction_digits,
        }
    }

    /// Format a value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Decimal {
                max_fraction_digits,
            } => format_decimal(value, *max_fraction_digits),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for LabelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decimal {
                max_fraction_digits,
            } => write!(f, "LabelFormat::Decimal({max_fraction_digits})"),
            Self::Custom(_) => write!(f, "LabelFormat::Custom(..)"),
        }
    }
}

fn format_decimal(value: f64, digits: usize) -> String {
    let mut text = format!("{value:.digits$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// Measures rendered text.
pub trait TextMeasurer {
    /// Width and height in pixels of `text` at font size `size`.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Fixed-advance approximation used when no real text system is at hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font size.
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        (text.chars().count() as f32 * size * self.advance, size)
    }
}

/// Values this close to a grid multiple (in units of the interval) count as
/// lying on it.
const SNAP_TOLERANCE: f64 = 1e-6;

fn nearest_multiple(value: f64, interval: f64) -> (f64, bool) {
    let quotient = value / interval;
    let nearest = quotient.round();
    (nearest, (quotient - nearest).abs() < SNAP_TOLERANCE)
}

/// Round to the nearest multiple of `interval`.
pub(crate) fn round_to(value: f64, interval: f64) -> f64 {
    (value / interval).round() * interval
}

/// Smallest multiple of `interval` not below `value`.
pub(crate) fn ceil_to(value: f64, interval: f64) -> f64 {
    match nearest_multiple(value, interval) {
        (nearest, true) => nearest * interval,
        _ => (value / interval).ceil() * interval,
    }
}

/// Largest multiple of `interval` not above `value`.
pub(crate) fn floor_to(value: f64, interval: f64) -> f64 {
    match nearest_multiple(value, interval) {
        (nearest, true) => nearest * interval,
        _ => (value / interval).floor() * interval,
    }
}

/// Smallest multiple of `interval` strictly above `value`.
pub(crate) fn ceil_above(value: f64, interval: f64) -> f64 {
    match nearest_multiple(value, interval) {
        (nearest, true) => (nearest + 1.0) * interval,
        _ => (value / interval).ceil() * interval,
    }
}

/// Whether `value` lies on a multiple of `interval`.
pub(crate) fn is_multiple(value: f64, interval: f64) -> bool {
    nearest_multiple(value, interval).1
}
