//! Rendering primitives and the clipped trace walk.
//!
//! These types are backend-agnostic: the core describes a frame as a
//! [`RenderList`] and a host (such as the GPUI backend) paints it.

use crate::datasource::GraphMode;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0), channel(24))
    }

    /// Whether the color paints anything at all.
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// Horizontal placement of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Text starts at the anchor.
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

/// Vertical placement of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Text hangs below the anchor.
    Top,
    /// Text is centered on the anchor.
    Center,
    /// Text sits above the anchor.
    Bottom,
}

/// How a text command is placed around its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAnchor {
    /// Horizontal placement.
    pub horizontal: HorizontalAlign,
    /// Vertical placement.
    pub vertical: VerticalAlign,
}

impl TextAnchor {
    /// Create a new anchor.
    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Resolve the top-left corner of a text box of the given size.
    pub fn top_left(&self, position: ScreenPoint, size: (f32, f32)) -> ScreenPoint {
        let x = match self.horizontal {
            HorizontalAlign::Left => position.x,
            HorizontalAlign::Center => position.x - size.0 * 0.5,
            HorizontalAlign::Right => position.x - size.0,
        };
        let y = match self.vertical {
            VerticalAlign::Top => position.y,
            VerticalAlign::Center => position.y - size.1 * 0.5,
            VerticalAlign::Bottom => position.y - size.1,
        };
        ScreenPoint::new(x, y)
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text.
    Text {
        /// Anchor point.
        position: ScreenPoint,
        /// Placement around the anchor.
        anchor: TextAnchor,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands for one frame.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Iterate over every line segment in the list, in drawing order.
    pub fn segments(&self) -> impl Iterator<Item = &LineSegment> {
        self.commands.iter().flat_map(|command| match command {
            RenderCommand::LineSegments { segments, .. } => segments.as_slice(),
            _ => &[],
        })
    }

    /// Iterate over every text command's content, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Result of walking a series against the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TraceWalk {
    /// Number of oldest samples that can never be visible again.
    pub(crate) evictable: usize,
}

/// Build clipped line segments for a series.
///
/// Static series are walked oldest to newest using stored X values. Streaming
/// series are walked newest to oldest: the newest sample sits at X = 0 and
/// each older one is placed by subtracting the delta stored on its newer
/// neighbour, so the caller's transform must map `[-span, 0]` on X.
pub(crate) fn build_trace_segments(
    samples: &[Point],
    mode: GraphMode,
    transform: &Transform,
    out: &mut Vec<LineSegment>,
) -> TraceWalk {
    out.clear();
    let mut walk = TraceWalk::default();
    let len = samples.len();
    if len < 2 {
        return walk;
    }
    let rect = transform.screen();

    let mut x_value = 0.0_f64;
    let mut last: Option<ScreenPoint> = None;
    for i in 0..len {
        let point = match mode {
            GraphMode::Static => samples[i],
            GraphMode::Streaming => {
                if i != 0 {
                    x_value -= samples[len - i].x;
                }
                Point::new(x_value, samples[len - 1 - i].y)
            }
        };
        let current = transform.data_to_screen(point);

        if let (Some(prev), Some(cur)) = (last, current) {
            if prev.x < rect.min.x && cur.x < rect.min.x {
                if mode == GraphMode::Streaming {
                    // Everything from here back in time lies further left.
                    walk.evictable = len - i;
                    break;
                }
            } else if !same_outside_side(prev, cur, rect) {
                if let Some((start, end)) = clip_segment(prev, cur, rect) {
                    out.push(LineSegment::new(start, end));
                }
            }
        }
        last = current;
    }
    walk
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Every clip pass pins one coordinate of one endpoint to an edge.
const MAX_CLIP_PASSES: usize = 8;

fn same_outside_side(a: ScreenPoint, b: ScreenPoint, rect: ScreenRect) -> bool {
    (region_code(a, rect) & region_code(b, rect)) != INSIDE
}

fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let mut out_start = region_code(start, rect);
    let mut out_end = region_code(end, rect);

    for _ in 0..MAX_CLIP_PASSES {
        if (out_start | out_end) == INSIDE {
            return Some((start, end));
        }
        if (out_start & out_end) != INSIDE {
            return None;
        }

        let out_code = if out_start != INSIDE {
            out_start
        } else {
            out_end
        };
        let (mut x, mut y) = (0.0_f32, 0.0_f32);

        if (out_code & TOP) != 0 {
            x = start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y);
            y = rect.min.y;
        } else if (out_code & BOTTOM) != 0 {
            x = start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y);
            y = rect.max.y;
        } else if (out_code & RIGHT) != 0 {
            y = start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x);
            x = rect.max.x;
        } else if (out_code & LEFT) != 0 {
            y = start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x);
            x = rect.min.x;
        }

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, rect);
        } else {
            end = new_point;
            out_end = region_code(end, rect);
        }
    }

    // Only rounding drift can remain after the last pass.
    Some((clamp_into(start, rect), clamp_into(end, rect)))
}

fn clamp_into(point: ScreenPoint, rect: ScreenRect) -> ScreenPoint {
    ScreenPoint::new(
        point.x.clamp(rect.min.x, rect.max.x),
        point.y.clamp(rect.min.y, rect.max.y),
    )
}

fn region_code(point: ScreenPoint, rect: ScreenRect) -> u8 {
    let mut code = INSIDE;
    if point.x < rect.min.x {
        code |= LEFT;
    } else if point.x > rect.max.x {
        code |= RIGHT;
    }
    if point.y < rect.min.y {
        code |= TOP;
    } else if point.y > rect.max.y {
        code |= BOTTOM;
    }
    code
}
