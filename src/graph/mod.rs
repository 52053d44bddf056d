//! Grid layout engine.
//!
//! [`Graph`] owns the mapping from value space onto a discrete grid: it picks
//! axis bounds that land on grid lines, sizes grid cells to the viewport,
//! measures tick labels and draws the grid.
//!
//! The host drives it in three steps: [`Graph::resize_graph`] on size
//! changes, [`Graph::layout`] on layout passes and [`Graph::draw`] on paint.
//! A draw with stale geometry is turned into a layout request.

mod bounds;
mod draw;
mod layout;

use crate::axis::{LabelFormat, LineGravity, XLabelPosition, YLabelPosition, round_to};
use crate::datasource::InvalidCode;
use crate::host::{RedrawRequest, SharedHost};
use crate::style::{GraphPaints, GraphStyle};
use crate::view::{AxisBounds, AxisEnds, Range};

/// Seconds per grid cell on the X axis.
pub const DEFAULT_GRID_X_INTERVAL: f64 = 0.04;
/// Value units per grid cell on the Y axis.
pub const DEFAULT_GRID_Y_INTERVAL: f64 = 0.1;
/// Minor cells per major cell.
pub const DEFAULT_GRIDS_PER_MAJOR: u32 = 5;
/// Cell edge in pixels used to derive grid counts.
pub const DEFAULT_CELL_SIZE_PX: u32 = 10;

/// Grid cell counts and pixel cell sizes.
///
/// A count and its cell size are mutually derivable from the available
/// pixels; at least the cell size is always known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Number of cells along X, once known.
    pub x_count: Option<u32>,
    /// Number of cells along Y, once known.
    pub y_count: Option<u32>,
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            x_count: None,
            y_count: None,
            cell_width: DEFAULT_CELL_SIZE_PX,
            cell_height: DEFAULT_CELL_SIZE_PX,
        }
    }
}

/// What a call to [`Graph::draw`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The grid was drawn.
    Drawn,
    /// Geometry was missing or stale; a layout was requested instead.
    LayoutRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Grid and axis engine.
#[derive(Debug, Clone)]
pub struct Graph {
    style: GraphStyle,
    paints: Option<GraphPaints>,
    geometry: GridGeometry,
    x_interval: f64,
    y_interval: f64,
    grids_per_major: u32,
    bounds: AxisBounds,
    auto_bounds: bool,
    label_width: Option<u32>,
    label_height: Option<u32>,
    x_format: LabelFormat,
    y_format: LabelFormat,
    keep_cell_width: bool,
    keep_cell_height: bool,
    auto_invalidate: bool,
    layout_required: bool,
    redraw: RedrawRequest,
}

impl Graph {
    /// Create a graph with default style and intervals.
    pub fn new() -> Self {
        Self::with_style(GraphStyle::default())
    }

    /// Create a graph with the given style.
    pub fn with_style(style: GraphStyle) -> Self {
        Self {
            style,
            paints: None,
            geometry: GridGeometry::default(),
            x_interval: DEFAULT_GRID_X_INTERVAL,
            y_interval: DEFAULT_GRID_Y_INTERVAL,
            grids_per_major: DEFAULT_GRIDS_PER_MAJOR,
            bounds: AxisBounds::default(),
            auto_bounds: true,
            label_width: None,
            label_height: None,
            x_format: LabelFormat::decimal(2),
            y_format: LabelFormat::decimal(1),
            keep_cell_width: false,
            keep_cell_height: false,
            auto_invalidate: false,
            layout_required: true,
            redraw: RedrawRequest::new(),
        }
    }

    /// Attach the host that receives redraw and layout requests.
    pub fn attach_host(&mut self, host: SharedHost) {
        self.redraw.attach(host);
    }

    /// Access the current style.
    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    /// Access the grid geometry.
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Access the axis bounds as last resolved.
    pub fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    /// Visible X range, once both ends are resolved.
    pub fn x_range(&self) -> Option<Range> {
        self.bounds.x.range()
    }

    /// Visible Y range, once both ends are resolved.
    pub fn y_range(&self) -> Option<Range> {
        self.bounds.y.range()
    }

    /// X value covered by one cell.
    pub fn grid_x_interval(&self) -> f64 {
        self.x_interval
    }

    /// Y value covered by one cell.
    pub fn grid_y_interval(&self) -> f64 {
        self.y_interval
    }

    /// Minor cells per major cell.
    pub fn grids_per_major(&self) -> u32 {
        self.grids_per_major
    }

    /// Number of major cells along X, rounding partial ones up.
    pub fn x_major_grid_count(&self) -> Option<u32> {
        self.geometry
            .x_count
            .map(|count| count.div_ceil(self.grids_per_major))
    }

    /// Number of major cells along Y, rounding partial ones up.
    pub fn y_major_grid_count(&self) -> Option<u32> {
        self.geometry
            .y_count
            .map(|count| count.div_ceil(self.grids_per_major))
    }

    /// Access the X label formatter.
    pub fn x_format(&self) -> &LabelFormat {
        &self.x_format
    }

    /// Access the Y label formatter.
    pub fn y_format(&self) -> &LabelFormat {
        &self.y_format
    }

    /// Whether bounds follow the data on every pass.
    pub fn is_auto_bounds(&self) -> bool {
        self.auto_bounds
    }

    /// Whether cached pixel metrics are stale.
    pub fn is_layout_required(&self) -> bool {
        self.layout_required
    }

    /// Whether a redraw has been requested and not yet drawn.
    pub fn is_redraw_pending(&self) -> bool {
        self.redraw.is_pending()
    }

    /// Replace the whole style.
    pub fn set_style(&mut self, style: GraphStyle) {
        if self.style.layout_differs(&style) {
            self.layout_required = true;
        }
        self.style = style;
        self.paints = None;
        self.changed();
    }

    /// Set the X label placement.
    pub fn set_x_label_position(&mut self, position: XLabelPosition) {
        if position == self.style.x_label_position {
            return;
        }
        self.set_style(self.style.clone().with_x_labels(position));
    }

    /// Set the Y label placement.
    pub fn set_y_label_position(&mut self, position: YLabelPosition) {
        if position == self.style.y_label_position {
            return;
        }
        self.set_style(self.style.clone().with_y_labels(position));
    }

    /// Set the X label placement from a numeric code; unknown codes are
    /// logged and ignored.
    pub fn set_x_label_position_code(&mut self, code: i32) {
        match XLabelPosition::try_from(code) {
            Ok(position) => self.set_x_label_position(position),
            Err(err) => log_invalid_code(err),
        }
    }

    /// Set the Y label placement from a numeric code; unknown codes are
    /// logged and ignored.
    pub fn set_y_label_position_code(&mut self, code: i32) {
        match YLabelPosition::try_from(code) {
            Ok(position) => self.set_y_label_position(position),
            Err(err) => log_invalid_code(err),
        }
    }

    /// Set the line gravity. Unless `keep_bounds`, the Y bounds are released
    /// so the next pass re-anchors the data.
    pub fn set_line_gravity(&mut self, gravity: LineGravity, keep_bounds: bool) {
        if !keep_bounds {
            self.bounds.y = AxisEnds::Unset;
        }
        self.set_style(self.style.clone().with_line_gravity(gravity));
    }

    /// Set the line gravity from a numeric code; unknown codes are logged and
    /// ignored.
    pub fn set_line_gravity_code(&mut self, code: i32, keep_bounds: bool) {
        match LineGravity::try_from(code) {
            Ok(gravity) => self.set_line_gravity(gravity, keep_bounds),
            Err(err) => log_invalid_code(err),
        }
    }

    /// Set the number of X cells. With `keep_cell_width` the cell size stays
    /// and the host is asked to re-measure.
    pub fn set_x_grid_count(&mut self, count: u32, keep_cell_width: bool) {
        self.set_grid_count(Axis::X, count, keep_cell_width);
    }

    /// Set the number of Y cells. With `keep_cell_height` the cell size stays
    /// and the host is asked to re-measure.
    pub fn set_y_grid_count(&mut self, count: u32, keep_cell_height: bool) {
        self.set_grid_count(Axis::Y, count, keep_cell_height);
    }

    /// Set the number of major X cells.
    pub fn set_x_major_grid_count(&mut self, count: u32, keep_cell_width: bool) {
        if let Some(count) = self.minor_count(Axis::X, count) {
            self.set_x_grid_count(count, keep_cell_width);
        }
    }

    /// Set the number of major Y cells.
    pub fn set_y_major_grid_count(&mut self, count: u32, keep_cell_height: bool) {
        if let Some(count) = self.minor_count(Axis::Y, count) {
            self.set_y_grid_count(count, keep_cell_height);
        }
    }

    fn minor_count(&self, axis: Axis, major: u32) -> Option<u32> {
        let count = major.checked_mul(self.grids_per_major);
        if count.is_none() {
            log::warn!("{major} major {axis:?} cells overflow the grid count; ignored");
        }
        count
    }

    fn set_grid_count(&mut self, axis: Axis, count: u32, keep_cell_size: bool) {
        if count == 0 {
            log::warn!("{axis:?} grid count must be positive; ignored");
            return;
        }
        match axis {
            Axis::X => {
                self.geometry.x_count = Some(count);
                self.keep_cell_width = keep_cell_size;
            }
            Axis::Y => {
                self.geometry.y_count = Some(count);
                self.keep_cell_height = keep_cell_size;
            }
        }
        if keep_cell_size {
            self.request_layout();
        } else {
            self.layout_required = true;
        }
        self.changed();
    }

    /// Set the cell width in pixels. With `change_grid_count` the X count is
    /// re-derived from the available width on the next layout.
    pub fn set_cell_width(&mut self, width: u32, change_grid_count: bool) {
        self.geometry.cell_width = width;
        if change_grid_count {
            self.geometry.x_count = None;
        }
        self.layout_required = true;
        self.changed();
    }

    /// Set the cell height in pixels. With `change_grid_count` the Y count is
    /// re-derived from the available height on the next layout.
    pub fn set_cell_height(&mut self, height: u32, change_grid_count: bool) {
        self.geometry.cell_height = height;
        if change_grid_count {
            self.geometry.y_count = None;
        }
        self.layout_required = true;
        self.changed();
    }

    /// Set the major cell width in pixels.
    pub fn set_major_cell_width(&mut self, width: u32, change_grid_count: bool) {
        self.set_cell_width(width / self.grids_per_major, change_grid_count);
    }

    /// Set the major cell height in pixels.
    pub fn set_major_cell_height(&mut self, height: u32, change_grid_count: bool) {
        self.set_cell_height(height / self.grids_per_major, change_grid_count);
    }

    /// Set the X value per cell. With `keep_bounds` the pinned bounds stay and
    /// the count is re-derived from them; otherwise the X bounds are released.
    pub fn set_grid_x_interval(&mut self, interval: f64, keep_bounds: bool) {
        self.set_interval(Axis::X, interval, keep_bounds);
    }

    /// Set the Y value per cell. With `keep_bounds` the pinned bounds stay and
    /// the count is re-derived from them; otherwise the Y bounds are released.
    pub fn set_grid_y_interval(&mut self, interval: f64, keep_bounds: bool) {
        self.set_interval(Axis::Y, interval, keep_bounds);
    }

    fn set_interval(&mut self, axis: Axis, interval: f64, keep_bounds: bool) {
        if !interval.is_finite() || interval <= 0.0 {
            log::warn!("{axis:?} grid interval {interval} must be positive; ignored");
            return;
        }
        match axis {
            Axis::X => {
                self.x_interval = interval;
                if keep_bounds {
                    self.geometry.x_count = None;
                } else {
                    self.bounds.x = AxisEnds::Unset;
                }
            }
            Axis::Y => {
                self.y_interval = interval;
                if keep_bounds {
                    self.geometry.y_count = None;
                } else {
                    self.bounds.y = AxisEnds::Unset;
                }
            }
        }
        self.layout_required = true;
        self.changed();
    }

    /// Set how many minor cells make one major cell.
    pub fn set_grids_per_major(&mut self, count: u32) {
        if count == 0 {
            log::warn!("grids per major must be positive; ignored");
            return;
        }
        self.grids_per_major = count;
        self.changed();
    }

    /// Pin the X minimum. With `keep_grid_count` the maximum follows from the
    /// count; otherwise the count is re-derived on the next layout.
    pub fn set_x_min(&mut self, value: f64, keep_grid_count: bool) {
        self.pin_end(Axis::X, End::Min, value, keep_grid_count);
    }

    /// Pin the X maximum. With `keep_grid_count` the minimum follows from the
    /// count; otherwise the count is re-derived on the next layout.
    pub fn set_x_max(&mut self, value: f64, keep_grid_count: bool) {
        self.pin_end(Axis::X, End::Max, value, keep_grid_count);
    }

    /// Pin the Y minimum. With `keep_grid_count` the maximum follows from the
    /// count; otherwise the count is re-derived on the next layout.
    pub fn set_y_min(&mut self, value: f64, keep_grid_count: bool) {
        self.pin_end(Axis::Y, End::Min, value, keep_grid_count);
    }

    /// Pin the Y maximum. With `keep_grid_count` the minimum follows from the
    /// count; otherwise the count is re-derived on the next layout.
    pub fn set_y_max(&mut self, value: f64, keep_grid_count: bool) {
        self.pin_end(Axis::Y, End::Max, value, keep_grid_count);
    }

    fn pin_end(&mut self, axis: Axis, end: End, value: f64, keep_grid_count: bool) {
        if !value.is_finite() {
            log::warn!("{axis:?} {end:?} bound {value} is not finite; ignored");
            return;
        }
        self.auto_bounds = false;
        let (interval, count, ends) = match axis {
            Axis::X => (self.x_interval, self.geometry.x_count, self.bounds.x),
            Axis::Y => (self.y_interval, self.geometry.y_count, self.bounds.y),
        };
        let value = round_to(value, interval);
        let ends = match (keep_grid_count, count) {
            (true, Some(count)) => {
                let span = interval * f64::from(count);
                match end {
                    End::Min => AxisEnds::Both {
                        min: value,
                        max: value + span,
                    },
                    End::Max => AxisEnds::Both {
                        min: value - span,
                        max: value,
                    },
                }
            }
            (true, None) => match end {
                End::Min => AxisEnds::Min(value),
                End::Max => AxisEnds::Max(value),
            },
            (false, _) => {
                self.clear_count(axis);
                match end {
                    End::Min => ends.with_min(value),
                    End::Max => ends.with_max(value),
                }
            }
        };
        match axis {
            Axis::X => self.bounds.x = ends,
            Axis::Y => self.bounds.y = ends,
        }
        self.changed();
    }

    /// Pin all four bounds, each rounded to its grid interval.
    ///
    /// Unless `keep_grid_counts`, both counts are re-derived from the bounds
    /// on the next layout.
    pub fn set_bounds(
        &mut self,
        x: Range,
        y: Range,
        keep_grid_counts: bool,
        change_label_size: bool,
    ) {
        if !x.is_finite() || !y.is_finite() {
            log::warn!("bounds {x:?} x {y:?} are not finite; ignored");
            return;
        }
        self.auto_bounds = false;
        self.bounds = AxisBounds {
            x: AxisEnds::Both {
                min: round_to(x.min, self.x_interval),
                max: round_to(x.max, self.x_interval),
            },
            y: AxisEnds::Both {
                min: round_to(y.min, self.y_interval),
                max: round_to(y.max, self.y_interval),
            },
        };
        if !keep_grid_counts {
            self.clear_count(Axis::X);
            self.clear_count(Axis::Y);
        }
        if change_label_size {
            self.layout_required = true;
        }
        self.changed();
    }

    fn clear_count(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.geometry.x_count = None,
            Axis::Y => self.geometry.y_count = None,
        }
        self.layout_required = true;
    }

    /// Replace the X label formatter.
    pub fn set_x_format(&mut self, format: LabelFormat, change_label_size: bool) {
        self.x_format = format;
        if change_label_size {
            self.layout_required = true;
        }
        self.changed();
    }

    /// Replace the Y label formatter.
    pub fn set_y_format(&mut self, format: LabelFormat, change_label_size: bool) {
        self.y_format = format;
        if change_label_size {
            self.layout_required = true;
        }
        self.changed();
    }

    /// Let bounds follow the data on every pass. Pinning any bound turns
    /// this off.
    pub fn enable_auto_bounds(&mut self, enabled: bool) {
        self.auto_bounds = enabled;
    }

    /// Request a redraw after every change.
    pub fn enable_auto_invalidate(&mut self, enabled: bool) {
        self.auto_invalidate = enabled;
    }

    /// Mark pixel metrics stale and ask the host for a layout pass.
    pub fn request_layout(&mut self) {
        self.layout_required = true;
        self.redraw.request_layout();
    }

    /// Request a redraw. Idempotent until the next [`Graph::draw`].
    pub fn invalidate(&mut self) {
        self.redraw.request();
    }

    fn changed(&mut self) {
        if self.auto_invalidate {
            self.invalidate();
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Min,
    Max,
}

fn log_invalid_code(err: InvalidCode) {
    log::error!("{err}; keeping the current setting");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::host::testing::RecordingHost;
    use crate::testing::{capture_logs, warnings};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn pinning_max_with_count_derives_min() {
        let mut graph = Graph::new();
        graph.set_x_grid_count(25, false);
        graph.set_x_max(1.01, true);
        assert!(!graph.is_auto_bounds());
        let range = graph.x_range().expect("both ends pinned");
        assert!(close(range.max, 1.0));
        assert!(close(range.min, 0.0));
    }

    #[test]
    fn pinning_without_count_keeps_other_end() {
        let mut graph = Graph::new();
        graph.set_y_grid_count(10, false);
        graph.set_y_min(-0.5, false);
        graph.set_y_max(1.0, false);
        assert_eq!(graph.geometry().y_count, None);
        let range = graph.y_range().expect("both ends pinned");
        assert!(close(range.min, -0.5));
        assert!(close(range.max, 1.0));
        assert!(graph.is_layout_required());
    }

    #[test]
    fn pinning_with_unknown_count_sets_one_end() {
        let mut graph = Graph::new();
        graph.set_x_min(0.51, true);
        match graph.bounds().x {
            AxisEnds::Min(min) => assert!(close(min, 0.52)),
            other => panic!("expected only a minimum, got {other:?}"),
        }
    }

    #[test]
    fn interval_change_releases_bounds() {
        let mut graph = Graph::new();
        graph.set_bounds(Range::new(0.0, 1.0), Range::new(-1.0, 1.0), true, false);
        graph.set_grid_y_interval(0.5, false);
        assert_eq!(graph.bounds().y, AxisEnds::Unset);
        graph.set_grid_x_interval(0.2, true);
        assert_eq!(graph.geometry().x_count, None);
        assert!(graph.x_range().is_some());
    }

    #[test]
    fn invalid_arguments_are_ignored() {
        let mut graph = Graph::new();
        graph.set_grid_x_interval(0.0, false);
        graph.set_grid_y_interval(f64::NAN, false);
        graph.set_grids_per_major(0);
        graph.set_x_grid_count(0, false);
        assert_eq!(graph.grid_x_interval(), DEFAULT_GRID_X_INTERVAL);
        assert_eq!(graph.grid_y_interval(), DEFAULT_GRID_Y_INTERVAL);
        assert_eq!(graph.grids_per_major(), DEFAULT_GRIDS_PER_MAJOR);
        assert_eq!(graph.geometry().x_count, None);
    }

    #[test]
    fn invalid_enum_codes_keep_state() {
        let mut graph = Graph::new();
        graph.set_y_label_position_code(1);
        assert_eq!(graph.style().y_label_position, YLabelPosition::Left);
        graph.set_y_label_position_code(5);
        assert_eq!(graph.style().y_label_position, YLabelPosition::Left);
        graph.set_line_gravity_code(-3, true);
        assert_eq!(graph.style().line_gravity, LineGravity::Center);
        graph.set_x_label_position_code(2);
        assert_eq!(graph.style().x_label_position, XLabelPosition::Top);
    }

    #[test]
    fn major_counts_round_up() {
        let mut graph = Graph::new();
        graph.set_x_major_grid_count(4, false);
        assert_eq!(graph.geometry().x_count, Some(20));
        graph.set_y_grid_count(12, false);
        assert_eq!(graph.y_major_grid_count(), Some(3));
    }

    #[test]
    fn keeping_cell_size_asks_host_for_layout() {
        let host = Arc::new(RecordingHost::default());
        let mut graph = Graph::new();
        graph.attach_host(host.clone());
        graph.set_x_grid_count(30, true);
        assert_eq!(host.layouts(), 1);
        graph.set_y_grid_count(30, false);
        assert_eq!(host.layouts(), 1);
    }

    #[test]
    fn auto_invalidate_posts_once_per_frame() {
        let host = Arc::new(RecordingHost::default());
        let mut graph = Graph::new();
        graph.attach_host(host.clone());
        graph.set_grids_per_major(4);
        assert_eq!(host.invalidations(), 0, "auto invalidate is off by default");

        graph.enable_auto_invalidate(true);
        graph.redraw.serviced();
        graph.set_grids_per_major(5);
        graph.set_y_label_position(YLabelPosition::Right);
        assert_eq!(host.invalidations(), 1);
    }

    #[test]
    fn style_swap_flags_layout_only_when_metrics_change() {
        let mut graph = Graph::new();
        graph.layout_required = false;
        graph.set_style(GraphStyle {
            show_grids: false,
            ..GraphStyle::default()
        });
        assert!(!graph.is_layout_required());
        graph.set_style(GraphStyle {
            label_text_size: 30,
            ..GraphStyle::default()
        });
        assert!(graph.is_layout_required());
    }

    #[test]
    fn oversized_major_count_is_ignored() {
        let mut graph = Graph::new();
        graph.set_x_major_grid_count(4, false);
        let ((), records) = capture_logs(|| graph.set_x_major_grid_count(u32::MAX, false));
        assert_eq!(graph.geometry().x_count, Some(20));
        assert_eq!(warnings(&records).len(), 1);
    }

    #[test]
    fn fixed_cells_saturate_the_measured_size() {
        let mut graph = Graph::new();
        graph.set_x_grid_count(u32::MAX, true);
        assert_eq!(graph.graph_width(), u32::MAX);
        assert_eq!(graph.measured_width(), u32::MAX);
    }
}
