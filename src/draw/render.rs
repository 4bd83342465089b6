//! Cairo-based rendering functions for shapes and selection affordances.

use super::color::{BLUE, Color, WHITE};
use super::font::FontDescriptor;
use super::hit;
use super::shape::{self, Shape};
use crate::util::{self, Rect};

/// Arrowhead wing length before the stroke width is added.
pub const ARROW_HEAD_BASE: f64 = 10.0;

/// Angle between each arrowhead wing and the shaft.
pub const ARROW_HEAD_ANGLE: f64 = 30.0;

const SELECTION_DASH: [f64; 2] = [5.0, 5.0];
const SELECTION_LINE_WIDTH: f64 = 2.0;
const HANDLE_LINE_WIDTH: f64 = 1.0;
const CROP_DIM_ALPHA: f64 = 0.5;
const CROP_BORDER_WIDTH: f64 = 2.0;

/// Renders all shapes in a collection to a Cairo context.
///
/// Shapes are drawn in slice order (first shape = bottom layer). The shape at
/// `skip` is left out; it is the Text shape shown by the live edit overlay.
pub fn render_shapes(
    ctx: &cairo::Context,
    shapes: &[Shape],
    font: &FontDescriptor,
    skip: Option<usize>,
) {
    for (index, shape) in shapes.iter().enumerate() {
        if skip == Some(index) && matches!(shape, Shape::Text { .. }) {
            continue;
        }
        render_shape(ctx, shape, font);
    }
}

/// Renders a single shape to a Cairo context.
///
/// Style comes from the shape itself, with defaults substituted for unusable
/// stroke widths and font sizes.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape, font: &FontDescriptor) {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            color,
            stroke_width,
        } => {
            render_rect(
                ctx,
                Rect::normalized(*x, *y, *width, *height),
                *color,
                shape::effective_stroke_width(*stroke_width),
            );
        }
        Shape::Ellipse {
            x,
            y,
            width,
            height,
            color,
            stroke_width,
        } => {
            render_ellipse(
                ctx,
                Rect::normalized(*x, *y, *width, *height),
                *color,
                shape::effective_stroke_width(*stroke_width),
            );
        }
        Shape::Arrow {
            sx,
            sy,
            ex,
            ey,
            color,
            stroke_width,
        } => {
            render_arrow(
                ctx,
                (*sx, *sy),
                (*ex, *ey),
                *color,
                shape::effective_stroke_width(*stroke_width),
            );
        }
        Shape::Pen {
            points,
            color,
            stroke_width,
        } => {
            render_pen_borrowed(
                ctx,
                points,
                *color,
                shape::effective_stroke_width(*stroke_width),
            );
        }
        Shape::Text {
            x,
            y,
            text,
            color,
            font_size,
        } => {
            render_text(
                ctx,
                *x,
                *y,
                text,
                *color,
                shape::effective_font_size(*font_size),
                font,
            );
        }
    }
}

/// Render a pen stroke (polyline through points, no smoothing).
///
/// Accepts a borrowed slice so the live stroke can be previewed every frame
/// without cloning its point list.
pub fn render_pen_borrowed(ctx: &cairo::Context, points: &[(f64, f64)], color: Color, width: f64) {
    let Some(&(x0, y0)) = points.first() else {
        return;
    };

    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(x0, y0);
    if points.len() == 1 {
        // Zero-length segment so the round cap leaves a dot
        ctx.line_to(x0, y0);
    }
    for &(x, y) in &points[1..] {
        ctx.line_to(x, y);
    }

    let _ = ctx.stroke();
}

/// Render a rectangle outline over an already normalized box.
fn render_rect(ctx: &cairo::Context, rect: Rect, color: Color, width: f64) {
    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    let _ = ctx.stroke();
}

/// Render an ellipse inscribed in the box using Cairo's arc with scaling
fn render_ellipse(ctx: &cairo::Context, rect: Rect, color: Color, width: f64) {
    let rx = rect.width / 2.0;
    let ry = rect.height / 2.0;
    if rx == 0.0 || ry == 0.0 {
        return;
    }
    let (cx, cy) = rect.center();

    color.apply(ctx);
    ctx.set_line_width(width);

    ctx.save().ok();
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore().ok();

    // Stroke after restore so the pen is not scaled with the path
    let _ = ctx.stroke();
}

/// Render an arrow: the shaft plus a two-wing head at the end point
fn render_arrow(
    ctx: &cairo::Context,
    (sx, sy): (f64, f64),
    (ex, ey): (f64, f64),
    color: Color,
    width: f64,
) {
    let head_length = ARROW_HEAD_BASE + width;
    let [left, right] = util::calculate_arrowhead(sx, sy, ex, ey, head_length, ARROW_HEAD_ANGLE);

    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(sx, sy);
    ctx.line_to(ex, ey);
    ctx.line_to(left.0, left.1);
    ctx.move_to(ex, ey);
    ctx.line_to(right.0, right.1);
    let _ = ctx.stroke();
}

/// Renders a single line of text with its baseline starting at (x, y).
///
/// The size is in image pixels; Pango measures from the top of the layout,
/// so the layout is shifted up by its baseline.
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
    font: &FontDescriptor,
) {
    if text.is_empty() {
        return;
    }

    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = pangocairo::functions::create_layout(ctx);
    let desc = font.to_pango_description(size);
    layout.set_font_description(Some(&desc));
    layout.set_text(text);

    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(x, y - baseline);
    color.apply(ctx);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Draws the dashed selection outline and resize handles of a shape.
///
/// Rect, Ellipse and Text get an outline 5px outside their box; Arrow only
/// gets its endpoint handles; Pen gets neither.
pub fn render_selection(ctx: &cairo::Context, shape: &Shape) {
    if let Some(outline) = hit::selection_outline(shape) {
        ctx.save().ok();
        BLUE.apply(ctx);
        ctx.set_line_width(SELECTION_LINE_WIDTH);
        ctx.set_dash(&SELECTION_DASH, 0.0);
        ctx.rectangle(outline.x, outline.y, outline.width, outline.height);
        let _ = ctx.stroke();
        ctx.restore().ok();
    }

    for handle in hit::resize_handles(shape) {
        render_handle(ctx, handle.rect);
    }
}

fn render_handle(ctx: &cairo::Context, rect: Rect) {
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    WHITE.apply(ctx);
    let _ = ctx.fill_preserve();
    BLUE.apply(ctx);
    ctx.set_line_width(HANDLE_LINE_WIDTH);
    let _ = ctx.stroke();
}

/// Dims everything outside `crop` and outlines it with a dashed white border.
pub fn render_crop_overlay(ctx: &cairo::Context, crop: Rect, width: f64, height: f64) {
    ctx.save().ok();

    // Even-odd fill punches the crop region out of the full-canvas rectangle
    ctx.set_fill_rule(cairo::FillRule::EvenOdd);
    ctx.rectangle(0.0, 0.0, width, height);
    ctx.rectangle(crop.x, crop.y, crop.width, crop.height);
    ctx.set_source_rgba(0.0, 0.0, 0.0, CROP_DIM_ALPHA);
    let _ = ctx.fill();

    WHITE.apply(ctx);
    ctx.set_line_width(CROP_BORDER_WIDTH);
    ctx.set_dash(&SELECTION_DASH, 0.0);
    ctx.rectangle(crop.x, crop.y, crop.width, crop.height);
    let _ = ctx.stroke();

    ctx.restore().ok();
}
