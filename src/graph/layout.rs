//! Cell sizing, label metrics and measured size.

use super::Graph;
use crate::axis::{LabelFormat, TextMeasurer, XLabelPosition, YLabelPosition};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::view::{AxisEnds, Range};

impl Graph {
    /// Fit the grid into a new viewport size.
    ///
    /// Known counts get their cell size recomputed; unknown counts are
    /// derived from the current cell size.
    pub fn resize_graph(&mut self, width: u32, height: u32, measurer: &dyn TextMeasurer) {
        self.update_label_metrics(measurer);
        let (width, height) = self.available_area(width, height);
        self.fit_x_cells(width, true);
        self.fit_y_cells(height, true);
        log::debug!(
            "grid resized to {width}x{height}px available: {:?}",
            self.geometry
        );
    }

    /// Run a layout pass over `rect`.
    ///
    /// Cell sizes that were pinned with `keep_cell_*` survive unless the
    /// viewport itself `changed`.
    pub fn layout(&mut self, changed: bool, rect: ScreenRect, measurer: &dyn TextMeasurer) {
        self.update_label_metrics(measurer);
        let (width, height) = self.available_area(pixels(rect.width()), pixels(rect.height()));
        self.fit_x_cells(width, changed || !self.keep_cell_width);
        self.fit_y_cells(height, changed || !self.keep_cell_height);
        self.layout_required = false;
    }

    fn fit_x_cells(&mut self, available: u32, resize: bool) {
        let pinned = self.pinned_range(self.bounds.x);
        let (count, cell) = fit_cells(
            self.geometry.x_count,
            self.geometry.cell_width,
            pinned,
            self.x_interval,
            available,
            resize,
        );
        self.geometry.x_count = Some(count);
        self.geometry.cell_width = cell;
    }

    fn fit_y_cells(&mut self, available: u32, resize: bool) {
        let pinned = self.pinned_range(self.bounds.y);
        let (count, cell) = fit_cells(
            self.geometry.y_count,
            self.geometry.cell_height,
            pinned,
            self.y_interval,
            available,
            resize,
        );
        self.geometry.y_count = Some(count);
        self.geometry.cell_height = cell;
    }

    /// Bounds the user pinned on both ends; resolved auto bounds don't count.
    fn pinned_range(&self, ends: AxisEnds) -> Option<Range> {
        if self.auto_bounds {
            return None;
        }
        ends.range().filter(Range::is_valid)
    }

    fn update_label_metrics(&mut self, measurer: &dyn TextMeasurer) {
        let size = self.style.label_text_size as f32;
        let y_width = [self.bounds.y.max(), self.bounds.y.min()]
            .into_iter()
            .map(|value| measurer.measure(&label_text(&self.y_format, value), size).0)
            .fold(2.0 * size, f32::max);
        let x_height = [self.bounds.x.min(), self.bounds.x.max()]
            .into_iter()
            .map(|value| measurer.measure(&label_text(&self.x_format, value), size).1)
            .fold(size, f32::max);
        self.label_width = Some(y_width.ceil() as u32);
        self.label_height = Some(x_height.ceil() as u32);
    }

    fn available_area(&self, width: u32, height: u32) -> (u32, u32) {
        let padding = self.style.graph_padding.saturating_mul(2);
        let mut width = width.saturating_sub(padding);
        let mut height = height.saturating_sub(padding);
        if self.style.y_label_position.is_visible() {
            width = width.saturating_sub(self.label_width() + self.style.label_padding);
        }
        if self.style.x_label_position.is_visible() {
            height = height.saturating_sub(self.label_height() + self.style.label_padding);
        }
        (width, height)
    }

    /// Width reserved for Y labels, in pixels.
    pub fn label_width(&self) -> u32 {
        self.label_width.unwrap_or(0)
    }

    /// Height reserved for X labels, in pixels.
    pub fn label_height(&self) -> u32 {
        self.label_height.unwrap_or(0)
    }

    /// Grid width in pixels.
    pub fn graph_width(&self) -> u32 {
        self.geometry
            .x_count
            .unwrap_or(0)
            .saturating_mul(self.geometry.cell_width)
    }

    /// Grid height in pixels.
    pub fn graph_height(&self) -> u32 {
        self.geometry
            .y_count
            .unwrap_or(0)
            .saturating_mul(self.geometry.cell_height)
    }

    /// Offset of the grid's left edge from the view's left edge.
    pub fn graph_left(&self) -> u32 {
        let mut left = self.style.graph_padding;
        if self.style.y_label_position == YLabelPosition::Left {
            left += self.label_width() + self.style.label_padding;
        }
        left
    }

    /// Offset of the grid's top edge from the view's top edge.
    pub fn graph_top(&self) -> u32 {
        let mut top = self.style.graph_padding;
        if self.style.x_label_position == XLabelPosition::Top {
            top += self.label_height() + self.style.label_padding;
        }
        top
    }

    /// Screen rectangle of the grid for a view whose top-left is `origin`.
    pub fn graph_rect(&self, origin: ScreenPoint) -> ScreenRect {
        let left = origin.x + self.graph_left() as f32;
        let top = origin.y + self.graph_top() as f32;
        ScreenRect::from_ltrb(
            left,
            top,
            left + self.graph_width() as f32,
            top + self.graph_height() as f32,
        )
    }

    /// Preferred width of the whole graph, or 0 while the X count is unknown.
    pub fn measured_width(&self) -> u32 {
        if self.geometry.x_count.is_none() {
            return 0;
        }
        let mut width = self
            .graph_width()
            .saturating_add(self.style.graph_padding.saturating_mul(2));
        if self.style.y_label_position.is_visible() {
            width = width.saturating_add(self.label_width() + self.style.label_padding);
        }
        width
    }

    /// Preferred height of the whole graph, or 0 while the Y count is unknown.
    pub fn measured_height(&self) -> u32 {
        if self.geometry.y_count.is_none() {
            return 0;
        }
        let mut height = self
            .graph_height()
            .saturating_add(self.style.graph_padding.saturating_mul(2));
        if self.style.x_label_position.is_visible() {
            height = height.saturating_add(self.label_height() + self.style.label_padding);
        }
        height
    }
}

fn label_text(format: &LabelFormat, value: Option<f64>) -> String {
    value.map(|value| format.format(value)).unwrap_or_default()
}

fn pixels(extent: f32) -> u32 {
    if extent.is_finite() && extent > 0.0 {
        extent.floor() as u32
    } else {
        0
    }
}

/// Resolve a (count, cell size) pair for one axis.
fn fit_cells(
    count: Option<u32>,
    cell: u32,
    pinned: Option<Range>,
    interval: f64,
    available: u32,
    resize: bool,
) -> (u32, u32) {
    match (count, pinned) {
        (Some(count), _) if resize => (count, available / count),
        (Some(count), _) => (count, cell),
        (None, Some(range)) => {
            let count = ((range.span() / interval).round() as u32).max(1);
            (count, available / count)
        }
        (None, None) if cell == 0 => {
            log::warn!("cell size is zero; using a single cell");
            (1, available)
        }
        (None, None) => ((available / cell).max(1), cell),
    }
}
