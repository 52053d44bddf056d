use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, TextRun, Window, font, point,
    px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextAnchor, TextStyle,
};

pub(crate) fn paint_list(render: &RenderList, window: &mut Window, cx: &mut App) {
    for command in render.commands() {
        match command {
            RenderCommand::LineSegments { segments, style } => {
                paint_lines(window, segments, *style);
            }
            RenderCommand::Rect { rect, style } => paint_rect(window, *rect, *style),
            RenderCommand::Text {
                position,
                anchor,
                text,
                style,
            } => paint_text(window, cx, *position, *anchor, text, style),
        }
    }
}

fn paint_lines(window: &mut Window, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() || !style.color.is_visible() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        builder.move_to(point(px(segment.start.x), px(segment.start.y)));
        builder.line_to(point(px(segment.end.x), px(segment.end.y)));
    }
    match builder.build() {
        Ok(path) => window.paint_path(path, to_rgba(style.color)),
        Err(err) => log::warn!("dropping {} segments: {err}", segments.len()),
    }
}

fn paint_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    let bounds = to_bounds(rect);
    let quad = quad(
        bounds,
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        to_rgba(style.stroke),
        BorderStyle::default(),
    );
    window.paint_quad(quad);
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    anchor: TextAnchor,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let font_size = px(style.size);
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), font_size, &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let size = (f32::from(shaped.width), f32::from(line_height));
    let top_left = anchor.top_left(position, size);
    let origin = point(px(top_left.x), px(top_left.y));
    if let Err(err) = shaped.paint(origin, line_height, window, cx) {
        log::warn!("failed to paint {text:?}: {err}");
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}
