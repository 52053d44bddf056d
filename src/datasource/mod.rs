//! Sample storage for a single waveform.
//!
//! A buffer is either static (replaced wholesale) or streaming (append-only,
//! X stored as time deltas). Switching between the two clears the buffer.

use thiserror::Error;

use crate::geom::Point;

/// Lifecycle mode of a series buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphMode {
    /// Whole buffer replaced at once; X values are absolute.
    Static,
    /// Samples appended one at a time; X values are deltas.
    #[default]
    Streaming,
}

impl GraphMode {
    /// Numeric code used by hosts that configure the mode from markup.
    pub fn code(self) -> i32 {
        match self {
            Self::Static => 0,
            Self::Streaming => 1,
        }
    }
}

impl TryFrom<i32> for GraphMode {
    type Error = InvalidCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Static),
            1 => Ok(Self::Streaming),
            _ => Err(InvalidCode {
                kind: "graph mode",
                code,
            }),
        }
    }
}

/// An enum code that does not name any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized {kind} code {code}")]
pub struct InvalidCode {
    /// Which enum was being decoded.
    pub kind: &'static str,
    /// The rejected code.
    pub code: i32,
}

/// Errors returned by rejected buffer mutations.
///
/// A rejected call leaves the buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// The operation is not allowed in the buffer's current mode.
    #[error("{operation} is not allowed on a {mode:?} series")]
    WrongMode {
        /// The rejected operation.
        operation: &'static str,
        /// The buffer's mode.
        mode: GraphMode,
    },
    /// A streaming delta was negative or not finite.
    ///
    /// Streaming X positions must only move back in time when walked from
    /// the newest sample.
    #[error("streaming delta must be finite and non-negative")]
    InvalidDelta,
}

/// Ordered sample storage with a one-way mode switch.
#[derive(Debug, Clone, Default)]
pub(crate) struct SeriesBuffer {
    points: Vec<Point>,
    mode: GraphMode,
}

impl SeriesBuffer {
    /// Create an empty buffer in the given mode.
    pub(crate) fn new(mode: GraphMode) -> Self {
        Self {
            points: Vec::new(),
            mode,
        }
    }

    pub(crate) fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Switch mode, dropping all samples.
    pub(crate) fn set_mode(&mut self, mode: GraphMode) {
        self.mode = mode;
        self.points.clear();
    }

    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }

    /// Replace every sample of a static buffer.
    pub(crate) fn replace<I>(&mut self, points: I) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = Point>,
    {
        if self.mode != GraphMode::Static {
            return Err(SeriesError::WrongMode {
                operation: "set_points",
                mode: self.mode,
            });
        }
        self.points.clear();
        self.points.extend(points);
        Ok(())
    }

    /// Append one sample to a streaming buffer.
    pub(crate) fn append(&mut self, point: Point) -> Result<usize, SeriesError> {
        if self.mode != GraphMode::Streaming {
            return Err(SeriesError::WrongMode {
                operation: "append",
                mode: self.mode,
            });
        }
        if !point.x.is_finite() || point.x < 0.0 {
            return Err(SeriesError::InvalidDelta);
        }
        self.points.push(point);
        Ok(self.points.len() - 1)
    }

    /// Drop the `count` oldest samples.
    pub(crate) fn evict_oldest(&mut self, count: usize) {
        let count = count.min(self.points.len());
        self.points.drain(..count);
    }

    /// Smallest and largest finite Y value.
    pub(crate) fn y_extent(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .map(|point| point.y)
            .filter(|y| y.is_finite())
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((min, max)) => Some((min.min(y), max.max(y))),
            })
    }

    /// X extent in absolute coordinates.
    ///
    /// Static buffers report their first and last stored X. Streaming buffers
    /// report `[-(sum of deltas after the oldest sample), 0]`, the span the
    /// renderer reconstructs with the newest sample at zero.
    pub(crate) fn x_extent(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        match self.mode {
            GraphMode::Static => Some((first.x, last.x)),
            GraphMode::Streaming => {
                let elapsed: f64 = self.points.iter().skip(1).map(|point| point.x).sum();
                Some((-elapsed, 0.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_buffer_rejects_append() {
        let mut buffer = SeriesBuffer::new(GraphMode::Static);
        buffer
            .replace([Point::new(0.0, 1.0), Point::new(1.0, 2.0)])
            .expect("static replace");
        let err = buffer.append(Point::new(0.1, 3.0)).unwrap_err();
        assert!(matches!(err, SeriesError::WrongMode { .. }));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn streaming_buffer_rejects_replace() {
        let mut buffer = SeriesBuffer::new(GraphMode::Streaming);
        buffer.append(Point::new(0.0, 1.0)).expect("append");
        assert!(buffer.replace([Point::new(0.0, 0.0)]).is_err());
        assert_eq!(buffer.points(), &[Point::new(0.0, 1.0)]);
    }

    #[test]
    fn streaming_buffer_rejects_negative_delta() {
        let mut buffer = SeriesBuffer::new(GraphMode::Streaming);
        assert_eq!(
            buffer.append(Point::new(-0.1, 1.0)),
            Err(SeriesError::InvalidDelta)
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn mode_switch_clears_samples() {
        let mut buffer = SeriesBuffer::new(GraphMode::Streaming);
        buffer.append(Point::new(0.0, 1.0)).expect("append");
        buffer.set_mode(GraphMode::Static);
        assert!(buffer.is_empty());
        assert_eq!(buffer.mode(), GraphMode::Static);
    }

    #[test]
    fn streaming_extent_is_reconstructed() {
        let mut buffer = SeriesBuffer::new(GraphMode::Streaming);
        for (dt, y) in [(0.0, 1.0), (0.02, 2.0), (0.02, -1.0)] {
            buffer.append(Point::new(dt, y)).expect("append");
        }
        let (min, max) = buffer.x_extent().expect("extent");
        assert!((min + 0.04).abs() < 1e-12);
        assert_eq!(max, 0.0);
        assert_eq!(buffer.y_extent(), Some((-1.0, 2.0)));
    }

    #[test]
    fn evict_oldest_saturates() {
        let mut buffer = SeriesBuffer::new(GraphMode::Streaming);
        for i in 0..4 {
            buffer.append(Point::new(0.1, i as f64)).expect("append");
        }
        buffer.evict_oldest(3);
        assert_eq!(buffer.points(), &[Point::new(0.1, 3.0)]);
        buffer.evict_oldest(10);
        assert!(buffer.is_empty());
    }

    #[test]
    fn graph_mode_codes() {
        assert_eq!(GraphMode::try_from(0), Ok(GraphMode::Static));
        assert_eq!(GraphMode::try_from(1), Ok(GraphMode::Streaming));
        assert!(GraphMode::try_from(7).is_err());
        assert_eq!(GraphMode::Streaming.code(), 1);
    }
}
