//! Grid and tick label drawing.

use super::{DrawOutcome, Graph};
use crate::axis::{XLabelPosition, YLabelPosition, round_to};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    HorizontalAlign, LineSegment, RenderCommand, RenderList, TextAnchor, VerticalAlign,
};
use crate::style::GraphPaints;
use crate::view::DataSource;

#[derive(Default)]
struct GridLines {
    minor: Vec<LineSegment>,
    major: Vec<LineSegment>,
    labels: Vec<RenderCommand>,
}

impl GridLines {
    fn flush(self, paints: &GraphPaints, out: &mut RenderList) {
        if !self.minor.is_empty() {
            out.push(RenderCommand::LineSegments {
                segments: self.minor,
                style: paints.minor,
            });
        }
        if !self.major.is_empty() {
            out.push(RenderCommand::LineSegments {
                segments: self.major,
                style: paints.major,
            });
        }
        for label in self.labels {
            out.push(label);
        }
    }
}

impl Graph {
    /// Draw the grid for a view whose bounds are `view`.
    ///
    /// Bounds are resolved against `data` first. If the grid geometry is
    /// unknown or stale nothing is drawn and the host is asked for a layout.
    pub fn draw(
        &mut self,
        data: &dyn DataSource,
        view: ScreenRect,
        out: &mut RenderList,
    ) -> DrawOutcome {
        let (Some(x_count), Some(y_count)) = (self.geometry.x_count, self.geometry.y_count) else {
            return self.defer_to_layout();
        };
        if self.layout_required {
            return self.defer_to_layout();
        }

        self.check_bounds(data);
        let paints = *self.paints.get_or_insert_with(|| self.style.paints());
        let rect = self.graph_rect(view.min);

        if paints.background.fill.is_visible() {
            out.push(RenderCommand::Rect {
                rect,
                style: paints.background,
            });
        }
        self.draw_vertical(x_count, rect, &paints, out);
        self.draw_horizontal(y_count, rect, &paints, out);

        self.redraw.serviced();
        DrawOutcome::Drawn
    }

    fn defer_to_layout(&mut self) -> DrawOutcome {
        log::debug!("grid geometry is stale; requesting layout");
        self.request_layout();
        DrawOutcome::LayoutRequested
    }

    /// Vertical lines and X labels.
    fn draw_vertical(
        &self,
        count: u32,
        rect: ScreenRect,
        paints: &GraphPaints,
        out: &mut RenderList,
    ) {
        let style = &self.style;
        let x_min = self.bounds.x.min().unwrap_or(0.0);
        let label_padding = style.label_padding as f32;
        let mut lines = GridLines::default();

        for i in 0..=count {
            let x = rect.left() + i as f32 * self.geometry.cell_width as f32;
            let line = LineSegment::new(
                ScreenPoint::new(x, rect.top()),
                ScreenPoint::new(x, rect.bottom()),
            );
            if style.show_grids && style.show_vertical {
                lines.minor.push(line);
            }
            if i % self.grids_per_major != 0 && i != count {
                continue;
            }
            if style.show_major_grids && style.show_vertical {
                lines.major.push(line);
            }

            let (position, vertical) = match style.x_label_position {
                XLabelPosition::None => continue,
                XLabelPosition::Bottom => (
                    ScreenPoint::new(x, rect.bottom() + label_padding),
                    VerticalAlign::Top,
                ),
                XLabelPosition::Top => (
                    ScreenPoint::new(x, rect.top() - label_padding),
                    VerticalAlign::Bottom,
                ),
            };
            let value = round_to(x_min + f64::from(i) * self.x_interval, self.x_interval);
            lines.labels.push(RenderCommand::Text {
                position,
                anchor: TextAnchor::new(HorizontalAlign::Center, vertical),
                text: self.x_format.format(value),
                style: paints.label,
            });
        }
        lines.flush(paints, out);
    }

    /// Horizontal lines and Y labels. Lines are counted from the top.
    fn draw_horizontal(
        &self,
        count: u32,
        rect: ScreenRect,
        paints: &GraphPaints,
        out: &mut RenderList,
    ) {
        let style = &self.style;
        let y_max = self.bounds.y.max().unwrap_or(0.0);
        let label_padding = style.label_padding as f32;
        let mut lines = GridLines::default();

        for i in 0..=count {
            let y = rect.top() + i as f32 * self.geometry.cell_height as f32;
            let line = LineSegment::new(
                ScreenPoint::new(rect.left(), y),
                ScreenPoint::new(rect.right(), y),
            );
            if style.show_grids && style.show_horizontal {
                lines.minor.push(line);
            }
            if i % self.grids_per_major != 0 && i != count {
                continue;
            }
            if style.show_major_grids && style.show_horizontal {
                lines.major.push(line);
            }

            let (position, horizontal) = match style.y_label_position {
                YLabelPosition::None => continue,
                YLabelPosition::Left => (
                    ScreenPoint::new(rect.left() - label_padding, y),
                    HorizontalAlign::Right,
                ),
                YLabelPosition::Right => (
                    ScreenPoint::new(rect.right() + label_padding, y),
                    HorizontalAlign::Left,
                ),
            };
            let value = round_to(y_max - f64::from(i) * self.y_interval, self.y_interval);
            lines.labels.push(RenderCommand::Text {
                position,
                anchor: TextAnchor::new(horizontal, VerticalAlign::Center),
                text: self.y_format.format(value),
                style: paints.label,
            });
        }
        lines.flush(paints, out);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::axis::MonospaceMeasurer;
    use crate::host::testing::RecordingHost;
    use crate::render::Color;
    use crate::style::GraphStyle;
    use crate::view::Range;

    struct Flat;

    impl DataSource for Flat {
        fn is_empty(&self) -> bool {
            false
        }
        fn x_min(&self) -> f64 {
            -1.0
        }
        fn x_max(&self) -> f64 {
            0.0
        }
        fn y_min(&self) -> f64 {
            -0.5
        }
        fn y_max(&self) -> f64 {
            0.5
        }
    }

    fn view() -> ScreenRect {
        ScreenRect::from_ltrb(0.0, 0.0, 250.0, 100.0)
    }

    fn laid_out(style: GraphStyle) -> Graph {
        let mut graph = Graph::with_style(style);
        graph.set_x_grid_count(25, false);
        graph.set_y_grid_count(10, false);
        graph.layout(true, view(), &MonospaceMeasurer::default());
        graph
    }

    fn line_batches(out: &RenderList) -> Vec<usize> {
        out.commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::LineSegments { segments, .. } => Some(segments.len()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn draw_before_layout_requests_one() {
        let host = Arc::new(RecordingHost::default());
        let mut graph = Graph::new();
        graph.attach_host(host.clone());
        let mut out = RenderList::new();

        assert_eq!(graph.draw(&Flat, view(), &mut out), DrawOutcome::LayoutRequested);
        assert!(out.is_empty());
        assert_eq!(host.layouts(), 1);

        graph.layout(true, view(), &MonospaceMeasurer::default());
        assert_eq!(graph.draw(&Flat, view(), &mut out), DrawOutcome::Drawn);
        assert!(!out.is_empty());
        assert!(!graph.is_redraw_pending());
    }

    #[test]
    fn draw_after_count_change_waits_for_layout() {
        let mut graph = laid_out(GraphStyle::default());
        graph.set_x_grid_count(30, false);
        let mut out = RenderList::new();
        assert_eq!(graph.draw(&Flat, view(), &mut out), DrawOutcome::LayoutRequested);
    }

    #[test]
    fn minor_and_major_lines_are_batched() {
        let mut graph = laid_out(GraphStyle::default());
        let mut out = RenderList::new();
        graph.draw(&Flat, view(), &mut out);
        // 26 vertical minor, 6 vertical major, 11 horizontal minor, 3 horizontal major
        assert_eq!(line_batches(&out), vec![26, 6, 11, 3]);
        assert_eq!(out.texts().count(), 0);
    }

    #[test]
    fn hidden_directions_draw_nothing() {
        let style = GraphStyle {
            show_vertical: false,
            show_major_grids: false,
            ..GraphStyle::default()
        };
        let mut graph = laid_out(style);
        let mut out = RenderList::new();
        graph.draw(&Flat, view(), &mut out);
        assert_eq!(line_batches(&out), vec![11]);
    }

    #[test]
    fn major_lines_carry_labels() {
        let style = GraphStyle {
            x_label_position: XLabelPosition::Bottom,
            y_label_position: YLabelPosition::Left,
            line_gravity: crate::axis::LineGravity::Top,
            ..GraphStyle::default()
        };
        let mut graph = Graph::with_style(style);
        graph.set_x_grid_count(25, false);
        graph.set_y_grid_count(10, false);
        let view = ScreenRect::from_ltrb(0.0, 0.0, 300.0, 150.0);
        graph.layout(true, view, &MonospaceMeasurer::default());
        let mut out = RenderList::new();
        graph.draw(&Flat, view, &mut out);

        let texts: Vec<&str> = out.texts().collect();
        assert_eq!(
            texts,
            vec!["-1", "-0.8", "-0.6", "-0.4", "-0.2", "0", "0.5", "0", "-0.5"]
        );
    }

    #[test]
    fn labels_sit_outside_the_grid() {
        let style = GraphStyle {
            label_padding: 2,
            x_label_position: XLabelPosition::Top,
            y_label_position: YLabelPosition::Right,
            ..GraphStyle::default()
        };
        let mut graph = laid_out(style);
        let mut out = RenderList::new();
        graph.draw(&Flat, view(), &mut out);
        let grid = graph.graph_rect(view().min);

        for command in out.commands() {
            if let RenderCommand::Text {
                position, anchor, ..
            } = command
            {
                match anchor.vertical {
                    VerticalAlign::Bottom => assert_eq!(position.y, grid.top() - 2.0),
                    VerticalAlign::Center => {
                        assert_eq!(position.x, grid.right() + 2.0);
                        assert_eq!(anchor.horizontal, HorizontalAlign::Left);
                    }
                    VerticalAlign::Top => panic!("no label hangs below a top-labelled grid"),
                }
            }
        }
    }

    #[test]
    fn background_is_filled_when_visible() {
        let style = GraphStyle {
            background_color: Color::WHITE,
            ..GraphStyle::default()
        };
        let mut graph = laid_out(style);
        let mut out = RenderList::new();
        graph.draw(&Flat, view(), &mut out);
        assert!(matches!(
            out.commands().first(),
            Some(RenderCommand::Rect { .. })
        ));
    }

    #[test]
    fn resolved_bounds_feed_the_series_ranges() {
        let mut graph = laid_out(GraphStyle::default());
        let mut out = RenderList::new();
        graph.draw(&Flat, view(), &mut out);
        let x = graph.x_range().expect("x resolved");
        let y = graph.y_range().expect("y resolved");
        assert!((x.span() - 1.0).abs() < 1e-9);
        assert!((y.span() - 1.0).abs() < 1e-9);
        assert!(y.contains(Range::new(-0.5, 0.5).mid()));
    }
}
