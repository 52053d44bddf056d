//! Axis bound resolution.

use super::Graph;
use crate::axis::{LineGravity, ceil_above, ceil_to, floor_to, is_multiple, round_to};
use crate::view::{AxisBounds, AxisEnds, DataSource};

impl Graph {
    /// Resolve both axes to grid-aligned bounds.
    ///
    /// Does nothing until both grid counts are known. With auto bounds on,
    /// pinned ends are discarded first and the axes follow `data`.
    pub fn check_bounds(&mut self, data: &dyn DataSource) {
        let (Some(x_count), Some(y_count)) = (self.geometry.x_count, self.geometry.y_count) else {
            return;
        };
        if self.auto_bounds {
            self.bounds = AxisBounds::default();
        }
        self.bounds.x = self.resolve_x(self.bounds.x, x_count, data);
        self.bounds.y = self.resolve_y(self.bounds.y, y_count, data);
    }

    fn resolve_x(&self, ends: AxisEnds, count: u32, data: &dyn DataSource) -> AxisEnds {
        let interval = self.x_interval;
        let span = interval * f64::from(count);
        match ends {
            AxisEnds::Both { max, .. } => right_aligned(max, span, interval),
            AxisEnds::Unset => {
                let max = if data.is_empty() { 0.0 } else { data.x_max() };
                right_aligned(round_to(max, interval), span, interval)
            }
            AxisEnds::Min(min) => AxisEnds::Both {
                min,
                max: min + span,
            },
            AxisEnds::Max(max) => AxisEnds::Both {
                min: max - span,
                max,
            },
        }
    }

    fn resolve_y(&self, ends: AxisEnds, count: u32, data: &dyn DataSource) -> AxisEnds {
        let interval = self.y_interval;
        let span = interval * f64::from(count);
        match ends {
            AxisEnds::Both { min, max } => self.fit_y_bounds(min, max, span),
            AxisEnds::Unset => {
                if data.is_empty() {
                    return self.fit_y_bounds(0.0, 0.0, span);
                }
                let min = round_to(data.y_min(), interval);
                let max = round_to(data.y_max(), interval);
                self.fit_y_bounds(min, max, span)
            }
            AxisEnds::Min(min) => AxisEnds::Both {
                min,
                max: min + span,
            },
            AxisEnds::Max(max) => AxisEnds::Both {
                min: max - span,
                max,
            },
        }
    }

    /// Place `[min, max]` inside a window of exactly `span` according to the
    /// line gravity.
    fn fit_y_bounds(&self, min: f64, max: f64, span: f64) -> AxisEnds {
        let interval = self.y_interval;
        let (min, max) = if min > max { (max, min) } else { (min, max) };

        if min == max {
            let max = ceil_above(max, interval);
            return AxisEnds::Both {
                min: max - span,
                max,
            };
        }
        if is_multiple(min, interval)
            && is_multiple(max, interval)
            && ((max - min) - span).abs() < interval * 1e-6
        {
            return AxisEnds::Both { min, max };
        }

        match self.style.line_gravity {
            LineGravity::Top => {
                let max = ceil_to(max, interval);
                AxisEnds::Both {
                    min: max - span,
                    max,
                }
            }
            LineGravity::Bottom => {
                let min = floor_to(min, interval);
                AxisEnds::Both {
                    min,
                    max: min + span,
                }
            }
            LineGravity::Center => {
                let mid = (min + max) * 0.5;
                let max = ceil_to(mid + span * 0.5, interval);
                AxisEnds::Both {
                    min: max - span,
                    max,
                }
            }
        }
    }
}

/// Newest data sits on the rightmost grid line.
fn right_aligned(max: f64, span: f64, interval: f64) -> AxisEnds {
    let max = ceil_to(max, interval);
    AxisEnds::Both {
        min: max - span,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Range;

    struct Extent {
        x: Range,
        y: Range,
    }

    impl DataSource for Extent {
        fn is_empty(&self) -> bool {
            false
        }
        fn x_min(&self) -> f64 {
            self.x.min
        }
        fn x_max(&self) -> f64 {
            self.x.max
        }
        fn y_min(&self) -> f64 {
            self.y.min
        }
        fn y_max(&self) -> f64 {
            self.y.max
        }
    }

    struct Empty;

    impl DataSource for Empty {
        fn is_empty(&self) -> bool {
            true
        }
        fn x_min(&self) -> f64 {
            unreachable!("extent of empty data queried")
        }
        fn x_max(&self) -> f64 {
            unreachable!("extent of empty data queried")
        }
        fn y_min(&self) -> f64 {
            unreachable!("extent of empty data queried")
        }
        fn y_max(&self) -> f64 {
            unreachable!("extent of empty data queried")
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn graph(x_count: u32, y_count: u32, gravity: LineGravity) -> Graph {
        let mut graph = Graph::new();
        graph.set_x_grid_count(x_count, false);
        graph.set_y_grid_count(y_count, false);
        graph.set_line_gravity(gravity, false);
        graph
    }

    fn resolved(graph: &Graph) -> (Range, Range) {
        (
            graph.x_range().expect("x resolved"),
            graph.y_range().expect("y resolved"),
        )
    }

    #[test]
    fn bounds_wait_for_grid_counts() {
        let mut graph = Graph::new();
        graph.check_bounds(&Empty);
        assert_eq!(graph.bounds(), AxisBounds::default());
    }

    #[test]
    fn center_gravity_spans_count_and_holds_midpoint() {
        let mut graph = graph(25, 10, LineGravity::Center);
        let data = Extent {
            x: Range::new(-1.0, 0.0),
            y: Range::new(0.23, 0.57),
        };
        graph.check_bounds(&data);
        let (_, y) = resolved(&graph);
        assert!(close(y.span(), 1.0));
        assert!(y.min < 0.4 && 0.4 < y.max);
        assert!(is_multiple(y.min, 0.1) && is_multiple(y.max, 0.1));
    }

    #[test]
    fn top_gravity_hugs_the_maximum() {
        let mut graph = graph(25, 10, LineGravity::Top);
        let data = Extent {
            x: Range::new(-1.0, 0.0),
            y: Range::new(-0.22, 0.33),
        };
        graph.check_bounds(&data);
        let (_, y) = resolved(&graph);
        assert!(close(y.max, 0.3));
        assert!(close(y.min, -0.7));
    }

    #[test]
    fn bottom_gravity_hugs_the_minimum() {
        let mut graph = graph(25, 10, LineGravity::Bottom);
        let data = Extent {
            x: Range::new(-1.0, 0.0),
            y: Range::new(-0.22, 0.33),
        };
        graph.check_bounds(&data);
        let (_, y) = resolved(&graph);
        assert!(close(y.min, -0.2));
        assert!(close(y.max, 0.8));
    }

    #[test]
    fn flat_data_falls_back_to_the_next_grid_line() {
        let mut graph = graph(25, 10, LineGravity::Center);
        let data = Extent {
            x: Range::new(-1.0, 0.0),
            y: Range::new(0.5, 0.5),
        };
        graph.check_bounds(&data);
        let (_, y) = resolved(&graph);
        assert!(close(y.max, 0.6));
        assert!(close(y.min, -0.4));
        assert!(y.span() > 0.0);
    }

    #[test]
    fn empty_data_still_yields_a_valid_window() {
        let mut graph = graph(25, 10, LineGravity::Center);
        graph.check_bounds(&Empty);
        let (x, y) = resolved(&graph);
        assert!(close(x.max, 0.0));
        assert!(close(x.min, -1.0));
        assert!(y.is_valid());
    }

    #[test]
    fn x_max_aligns_newest_data_to_the_right_edge() {
        let mut graph = graph(25, 10, LineGravity::Center);
        let data = Extent {
            x: Range::new(0.0, 3.97),
            y: Range::new(0.0, 1.0),
        };
        graph.check_bounds(&data);
        let (x, _) = resolved(&graph);
        assert!(close(x.max, 3.96));
        assert!(close(x.min, 2.96));
    }

    #[test]
    fn pinned_bounds_snap_without_drifting() {
        let mut graph = graph(25, 10, LineGravity::Top);
        graph.set_bounds(Range::new(0.0, 1.0), Range::new(-0.5, 0.5), true, false);
        let data = Extent {
            x: Range::new(0.0, 0.0),
            y: Range::new(0.0, 0.0),
        };
        graph.check_bounds(&data);
        let first = resolved(&graph);
        graph.check_bounds(&data);
        graph.check_bounds(&data);
        let again = resolved(&graph);
        assert!(close(first.0.max, again.0.max));
        assert!(close(first.0.min, again.0.min));
        assert!(close(first.1.max, again.1.max));
        assert!(close(first.1.min, again.1.min));
        assert!(close(again.0.max, 1.0));
        assert!(close(again.1.max, 0.5));
    }

    #[test]
    fn one_pinned_end_derives_the_other() {
        let mut graph = graph(20, 10, LineGravity::Center);
        graph.set_y_min(-1.0, false);
        graph.set_y_grid_count(10, false);
        graph.set_x_max(2.0, false);
        graph.set_x_grid_count(20, false);
        graph.check_bounds(&Empty);
        let (x, y) = resolved(&graph);
        assert!(close(y.min, -1.0));
        assert!(close(y.max, 0.0));
        assert!(close(x.max, 2.0));
        assert!(close(x.min, 1.2));
    }

    #[test]
    fn auto_bounds_follow_the_data_each_pass() {
        let mut graph = graph(25, 10, LineGravity::Top);
        graph.check_bounds(&Extent {
            x: Range::new(0.0, 1.0),
            y: Range::new(0.0, 0.4),
        });
        graph.check_bounds(&Extent {
            x: Range::new(0.0, 2.0),
            y: Range::new(0.0, 0.8),
        });
        let (x, y) = resolved(&graph);
        assert!(close(x.max, 2.0));
        assert!(close(y.max, 0.8));
    }
}
