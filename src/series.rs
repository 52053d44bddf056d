//! The waveform: sample storage, styling and the clipped trace renderer.

use crate::datasource::{GraphMode, SeriesBuffer, SeriesError};
use crate::geom::{Point, ScreenRect};
use crate::host::{RedrawRequest, SharedHost};
use crate::render::{LineSegment, RenderCommand, RenderList, build_trace_segments};
use crate::style::SeriesStyle;
use crate::transform::Transform;
use crate::view::{DataSource, Range};

/// A single waveform and the renderer that draws it.
#[derive(Debug, Clone)]
pub struct DataSeries {
    buffer: SeriesBuffer,
    style: SeriesStyle,
    auto_invalidate: bool,
    auto_delete: bool,
    redraw: RedrawRequest,
    scratch: Vec<LineSegment>,
}

impl DataSeries {
    /// Create an empty streaming series.
    pub fn new() -> Self {
        Self::with_mode(GraphMode::Streaming)
    }

    /// Create an empty series in the given mode.
    pub fn with_mode(mode: GraphMode) -> Self {
        Self {
            buffer: SeriesBuffer::new(mode),
            style: SeriesStyle::default(),
            auto_invalidate: true,
            auto_delete: true,
            redraw: RedrawRequest::new(),
            scratch: Vec::new(),
        }
    }

    /// Attach the host that receives redraw requests.
    pub fn attach_host(&mut self, host: SharedHost) {
        self.redraw.attach(host);
    }

    /// Access the buffer mode.
    pub fn graph_mode(&self) -> GraphMode {
        self.buffer.mode()
    }

    /// Switch the buffer mode. All samples are dropped.
    pub fn set_graph_mode(&mut self, mode: GraphMode) {
        self.buffer.set_mode(mode);
        self.changed(false);
    }

    /// Switch the buffer mode from a numeric code.
    ///
    /// Unknown codes are logged and ignored.
    pub fn set_graph_mode_code(&mut self, code: i32) {
        match GraphMode::try_from(code) {
            Ok(mode) => self.set_graph_mode(mode),
            Err(err) => log::error!("{err}; keeping {:?}", self.buffer.mode()),
        }
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.changed(false);
    }

    /// Replace the samples of a static series.
    ///
    /// Rejected (and logged) on a streaming series.
    pub fn set_points<I>(&mut self, points: I, invalidate: bool) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = Point>,
    {
        self.buffer
            .replace(points)
            .inspect_err(|err| log::error!("{err}; switch the series to static first"))?;
        self.changed(invalidate);
        Ok(())
    }

    /// Append a sample to a streaming series; `point.x` is the time since the
    /// previous sample.
    ///
    /// Rejected (and logged) on a static series.
    pub fn append(&mut self, point: Point, invalidate: bool) -> Result<usize, SeriesError> {
        let index = self
            .buffer
            .append(point)
            .inspect_err(|err| log::error!("{err}; sample dropped"))?;
        self.changed(invalidate);
        Ok(index)
    }

    /// Append a value measured `delta` after the previous sample.
    pub fn append_value(
        &mut self,
        y: f64,
        delta: f64,
        invalidate: bool,
    ) -> Result<usize, SeriesError> {
        self.append(Point::new(delta, y), invalidate)
    }

    /// Access the stored samples, oldest first.
    pub fn points(&self) -> &[Point] {
        self.buffer.points()
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check whether no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Access the current style.
    pub fn style(&self) -> &SeriesStyle {
        &self.style
    }

    /// Replace the style.
    pub fn set_style(&mut self, style: SeriesStyle) {
        self.style = style;
        self.changed(false);
    }

    /// Replace the trace color.
    pub fn set_line_color(&mut self, color: crate::render::Color) {
        self.set_style(SeriesStyle {
            color,
            ..self.style
        });
    }

    /// Replace the trace width.
    pub fn set_line_width(&mut self, line_width: f32) {
        self.set_style(SeriesStyle {
            line_width,
            ..self.style
        });
    }

    /// Request a redraw after every data or style change.
    pub fn set_auto_invalidate(&mut self, enabled: bool) {
        self.auto_invalidate = enabled;
    }

    /// In streaming mode, drop samples that scrolled out of the window.
    pub fn set_auto_delete(&mut self, enabled: bool) {
        self.auto_delete = enabled;
    }

    /// Whether a redraw has been requested and not yet drawn.
    pub fn is_redraw_pending(&self) -> bool {
        self.redraw.is_pending()
    }

    /// Request a redraw. Idempotent until the next [`DataSeries::draw`].
    pub fn invalidate(&mut self) {
        self.redraw.request();
    }

    fn changed(&mut self, invalidate: bool) {
        if self.auto_invalidate || invalidate {
            self.invalidate();
        }
    }

    /// Draw the trace clipped to `rect`, mapping `x` and `y` onto it.
    ///
    /// In streaming mode only the span of `x` matters: the newest sample is
    /// placed on the right edge. With auto-delete on, samples that can no
    /// longer reach the window are dropped afterwards.
    pub fn draw(&mut self, rect: ScreenRect, x: Range, y: Range, out: &mut RenderList) {
        self.redraw.serviced();
        if self.buffer.len() < 2 {
            return;
        }

        let mode = self.buffer.mode();
        let x = match mode {
            GraphMode::Static => x,
            GraphMode::Streaming => Range::new(-x.span(), 0.0),
        };
        let Some(transform) = Transform::new(x, y, rect) else {
            log::warn!("cannot map {x:?} x {y:?} onto {rect:?}; trace skipped");
            return;
        };

        let walk = build_trace_segments(self.buffer.points(), mode, &transform, &mut self.scratch);
        if mode == GraphMode::Streaming && self.auto_delete && walk.evictable > 0 {
            log::debug!("{} samples scrolled out of view", walk.evictable);
            self.buffer.evict_oldest(walk.evictable);
        }

        if !self.scratch.is_empty() {
            out.push(RenderCommand::LineSegments {
                segments: self.scratch.clone(),
                style: self.style.line_style(),
            });
        }
    }

    fn warn_empty(&self, query: &str) {
        log::warn!("{query} queried on an empty series; returning 0");
    }
}

impl Default for DataSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for DataSeries {
    fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn x_min(&self) -> f64 {
        match self.buffer.x_extent() {
            Some((min, _)) => min,
            None => {
                self.warn_empty("x_min");
                0.0
            }
        }
    }

    fn x_max(&self) -> f64 {
        match self.buffer.x_extent() {
            Some((_, max)) => max,
            None => {
                self.warn_empty("x_max");
                0.0
            }
        }
    }

    fn y_min(&self) -> f64 {
        match self.buffer.y_extent() {
            Some((min, _)) => min,
            None => {
                self.warn_empty("y_min");
                0.0
            }
        }
    }

    fn y_max(&self) -> f64 {
        match self.buffer.y_extent() {
            Some((_, max)) => max,
            None => {
                self.warn_empty("y_max");
                0.0
            }
        }
    }
}
