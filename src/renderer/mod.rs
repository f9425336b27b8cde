pub mod commands;
mod frame;
pub mod types;

use resvg::tiny_skia::{self, Paint, PathBuilder, Pixmap, Point, Shader, SpreadMode, Stroke};

use crate::error::{IndicatorError, Result};
use crate::layout::Size;
use crate::widgets::spinner::ArcPath;
use crate::widgets::{Color, Rect};

pub use commands::DrawCommand;
pub use frame::Frame;
pub use types::{Gradient, GradientDir, LineCap, StrokeStyle};

/// Largest angle a single polyline segment of an arc may span
const ARC_SEGMENT_DEGREES: f64 = 2.0;

/// Display list collected while painting widgets
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PaintContext with pre-allocated capacity to avoid per-frame allocations
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
        }
    }

    /// Clear the list for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::rect(rect, color));
    }

    /// Stroke `arc` with a gradient laid out in `gradient_rect`, rotated
    /// clockwise by `rotation` degrees around the arc centre
    pub fn draw_arc(
        &mut self,
        arc: ArcPath,
        stroke: StrokeStyle,
        gradient: Gradient,
        gradient_rect: Rect,
        rotation: f64,
    ) {
        self.commands.push(DrawCommand::Arc {
            arc,
            stroke,
            gradient,
            gradient_rect,
            rotation,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Rasterizes a [`PaintContext`] on the CPU
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftwareRenderer {
    scale_factor: f32,
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    /// Physical pixels per logical pixel
    pub fn set_scale_factor(&mut self, scale: f32) {
        if scale > 0.0 && scale != self.scale_factor {
            log::info!("Scale factor changed: {} -> {}", self.scale_factor, scale);
            self.scale_factor = scale;
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Render `ctx` onto a `size` logical-pixel surface cleared to `background`
    pub fn render(&self, ctx: &PaintContext, size: Size, background: Color) -> Result<Frame> {
        let width = (size.width * self.scale_factor).round().max(0.0) as u32;
        let height = (size.height * self.scale_factor).round().max(0.0) as u32;
        if size.is_empty() {
            return Err(IndicatorError::InvalidSize { width, height });
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(IndicatorError::InvalidSize { width, height })?;
        pixmap.fill(sk_color(background));

        let scale = tiny_skia::Transform::from_scale(self.scale_factor, self.scale_factor);
        for command in ctx.commands() {
            match command {
                DrawCommand::Rect { rect, color } => {
                    fill_rect(&mut pixmap, *rect, *color, scale);
                }
                DrawCommand::Arc {
                    arc,
                    stroke,
                    gradient,
                    gradient_rect,
                    rotation,
                } => {
                    stroke_arc(&mut pixmap, arc, stroke, gradient, *gradient_rect, *rotation, scale);
                }
            }
        }

        Ok(Frame::from_pixmap(pixmap))
    }
}

impl Default for SoftwareRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn sk_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn fill_rect(pixmap: &mut Pixmap, rect: Rect, color: Color, transform: tiny_skia::Transform) {
    let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(sk_color(color));
    pixmap.fill_rect(rect, &paint, transform, None);
}

fn gradient_shader(gradient: &Gradient, rect: Rect) -> Shader<'static> {
    let ((x0, y0), (x1, y1)) = gradient.direction.endpoints(rect);
    tiny_skia::LinearGradient::new(
        Point::from_xy(x0, y0),
        Point::from_xy(x1, y1),
        vec![
            tiny_skia::GradientStop::new(0.0, sk_color(gradient.start_color)),
            tiny_skia::GradientStop::new(1.0, sk_color(gradient.end_color)),
        ],
        SpreadMode::Pad,
        tiny_skia::Transform::identity(),
    )
    // Degenerate axis (empty rect) falls back to the start color
    .unwrap_or_else(|| Shader::SolidColor(sk_color(gradient.start_color)))
}

fn stroke_arc(
    pixmap: &mut Pixmap,
    arc: &ArcPath,
    style: &StrokeStyle,
    gradient: &Gradient,
    gradient_rect: Rect,
    rotation: f64,
    scale: tiny_skia::Transform,
) {
    if style.width <= 0.0 {
        return;
    }
    let points = arc.flatten(ARC_SEGMENT_DEGREES);
    if points.len() < 2 {
        return;
    }

    let mut builder = PathBuilder::new();
    let (x, y) = points[0];
    builder.move_to(x, y);
    for &(x, y) in &points[1..] {
        builder.line_to(x, y);
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.shader = gradient_shader(gradient, gradient_rect);

    let stroke = Stroke {
        width: style.width,
        line_cap: match style.line_cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: tiny_skia::LineJoin::Round,
        ..Stroke::default()
    };

    let (cx, cy) = arc.center;
    let rotate = tiny_skia::Transform::from_rotate_at(
        rotation.rem_euclid(360.0) as f32,
        cx as f32,
        cy as f32,
    );
    pixmap.stroke_path(&path, &paint, &stroke, scale.pre_concat(rotate), None);
}
