//! Style records.
//!
//! Styles are plain values. Components take a whole record and replace their
//! current one; they never expose a style for in-place mutation.

use crate::axis::{LineGravity, XLabelPosition, YLabelPosition};
use crate::render::{Color, LineStyle, RectStyle, TextStyle};

/// Faint red of the minor ECG paper grid.
pub const DEFAULT_GRID_COLOR: Color = Color::new(0.96, 0.76, 0.76, 1.0);
/// Stronger red of the major ECG paper grid.
pub const DEFAULT_MAJOR_GRID_COLOR: Color = Color::new(0.89, 0.45, 0.45, 1.0);

/// Appearance of the grid and its labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphStyle {
    /// Fill behind the grid; transparent draws nothing.
    pub background_color: Color,
    /// Minor grid line color.
    pub grid_color: Color,
    /// Major grid line color.
    pub major_grid_color: Color,
    /// Tick label color.
    pub label_color: Color,
    /// Minor grid stroke width in pixels.
    pub grid_line_width: f32,
    /// Major grid stroke width in pixels.
    pub major_grid_line_width: f32,
    /// Tick label font size in pixels.
    pub label_text_size: u32,
    /// Gap between the labels and the grid, in pixels.
    pub label_padding: u32,
    /// Padding around the whole graph, in pixels.
    pub graph_padding: u32,
    /// Draw major grid lines.
    pub show_major_grids: bool,
    /// Draw minor grid lines.
    pub show_grids: bool,
    /// Draw vertical lines (X ticks).
    pub show_vertical: bool,
    /// Draw horizontal lines (Y ticks).
    pub show_horizontal: bool,
    /// Placement of X tick labels.
    pub x_label_position: XLabelPosition,
    /// Placement of Y tick labels.
    pub y_label_position: YLabelPosition,
    /// Where the trace sits inside the Y span.
    pub line_gravity: LineGravity,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            background_color: Color::TRANSPARENT,
            grid_color: DEFAULT_GRID_COLOR,
            major_grid_color: DEFAULT_MAJOR_GRID_COLOR,
            label_color: Color::BLACK,
            grid_line_width: 1.0,
            major_grid_line_width: 4.0,
            label_text_size: 20,
            label_padding: 0,
            graph_padding: 0,
            show_major_grids: true,
            show_grids: true,
            show_vertical: true,
            show_horizontal: true,
            x_label_position: XLabelPosition::None,
            y_label_position: YLabelPosition::None,
            line_gravity: LineGravity::Center,
        }
    }
}

impl GraphStyle {
    /// Set the X label placement.
    pub fn with_x_labels(mut self, position: XLabelPosition) -> Self {
        self.x_label_position = position;
        self
    }

    /// Set the Y label placement.
    pub fn with_y_labels(mut self, position: YLabelPosition) -> Self {
        self.y_label_position = position;
        self
    }

    /// Set the line gravity.
    pub fn with_line_gravity(mut self, gravity: LineGravity) -> Self {
        self.line_gravity = gravity;
        self
    }

    /// Set the padding around the graph.
    pub fn with_graph_padding(mut self, padding: u32) -> Self {
        self.graph_padding = padding;
        self
    }

    /// Whether switching from `self` to `other` changes pixel metrics.
    pub(crate) fn layout_differs(&self, other: &Self) -> bool {
        self.label_text_size != other.label_text_size
            || self.label_padding != other.label_padding
            || self.graph_padding != other.graph_padding
            || self.x_label_position != other.x_label_position
            || self.y_label_position != other.y_label_position
    }

    /// Resolve the paints used for drawing.
    pub(crate) fn paints(&self) -> GraphPaints {
        GraphPaints {
            background: RectStyle {
                fill: self.background_color,
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
            minor: LineStyle {
                color: self.grid_color,
                width: self.grid_line_width,
            },
            major: LineStyle {
                color: self.major_grid_color,
                width: self.major_grid_line_width,
            },
            label: TextStyle {
                color: self.label_color,
                size: self.label_text_size as f32,
            },
        }
    }
}

/// Paints derived from a [`GraphStyle`], cached until the style changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GraphPaints {
    pub(crate) background: RectStyle,
    pub(crate) minor: LineStyle,
    pub(crate) major: LineStyle,
    pub(crate) label: TextStyle,
}

/// Appearance of the waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeriesStyle {
    /// Trace color.
    pub color: Color,
    /// Trace stroke width in pixels.
    pub line_width: f32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 2.0,
        }
    }
}

impl SeriesStyle {
    pub(crate) fn line_style(&self) -> LineStyle {
        LineStyle {
            color: self.color,
            width: self.line_width,
        }
    }
}

/// Horizontal placement of the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TitleAlignment {
    /// Flush with the left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush with the right edge.
    Right,
}

/// Appearance of the title line above the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TitleStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Gap between the title and the graph, in pixels.
    pub padding: u32,
    /// Horizontal placement.
    pub alignment: TitleAlignment,
    /// Draw the title at all.
    pub visible: bool,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 40.0,
            padding: 0,
            alignment: TitleAlignment::Center,
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_changes_affect_layout() {
        let style = GraphStyle::default();
        let labelled = style.clone().with_y_labels(YLabelPosition::Left);
        assert!(style.layout_differs(&labelled));

        let recolored = GraphStyle {
            grid_color: Color::BLACK,
            ..style.clone()
        };
        assert!(!style.layout_differs(&recolored));
    }

    #[test]
    fn paints_follow_style() {
        let style = GraphStyle {
            major_grid_line_width: 3.0,
            label_text_size: 14,
            ..GraphStyle::default()
        };
        let paints = style.paints();
        assert_eq!(paints.major.width, 3.0);
        assert_eq!(paints.label.size, 14.0);
        assert_eq!(paints.minor.color, DEFAULT_GRID_COLOR);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn graph_style_survives_json() {
        let style = GraphStyle {
            background_color: Color::new(1.0, 1.0, 0.9, 1.0),
            label_text_size: 11,
            line_gravity: LineGravity::Bottom,
            ..GraphStyle::default()
        }
        .with_y_labels(YLabelPosition::Right);
        let json = serde_json::to_string(&style).expect("serialize");
        let back: GraphStyle = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, style);

        let partial: GraphStyle =
            serde_json::from_str(r#"{"label_text_size":14}"#).expect("missing fields default");
        assert_eq!(partial.label_text_size, 14);
        assert_eq!(partial.grid_color, DEFAULT_GRID_COLOR);
    }
}
