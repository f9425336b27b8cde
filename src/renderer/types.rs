//! Shared types for the renderer.

use crate::widgets::{Color, Rect};

/// Gradient direction for linear gradients
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientDir {
    Horizontal,
    Vertical,
    /// Top-leading to bottom-trailing
    Diagonal,
    DiagonalReverse,
}

impl GradientDir {
    /// Start and end points of the gradient axis inside `rect`
    pub fn endpoints(&self, rect: Rect) -> ((f32, f32), (f32, f32)) {
        let left = rect.x;
        let top = rect.y;
        let right = rect.x + rect.width;
        let bottom = rect.y + rect.height;
        let (cx, cy) = rect.center();
        match self {
            GradientDir::Horizontal => ((left, cy), (right, cy)),
            GradientDir::Vertical => ((cx, top), (cx, bottom)),
            GradientDir::Diagonal => ((left, top), (right, bottom)),
            GradientDir::DiagonalReverse => ((right, top), (left, bottom)),
        }
    }
}

/// Two-stop linear gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub start_color: Color,
    pub end_color: Color,
    pub direction: GradientDir,
}

impl Gradient {
    pub fn new(start_color: Color, end_color: Color, direction: GradientDir) -> Self {
        Self {
            start_color,
            end_color,
            direction,
        }
    }
}

/// How the open ends of a stroke are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke configuration for paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in logical pixels
    pub width: f32,
    pub line_cap: LineCap,
}

impl StrokeStyle {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            line_cap: LineCap::Round,
        }
    }

    pub fn line_cap(mut self, line_cap: LineCap) -> Self {
        self.line_cap = line_cap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_runs_top_left_to_bottom_right() {
        let rect = Rect::new(0.0, 0.0, 30.0, 20.0);
        assert_eq!(GradientDir::Diagonal.endpoints(rect), ((0.0, 0.0), (30.0, 20.0)));
        assert_eq!(
            GradientDir::DiagonalReverse.endpoints(rect),
            ((30.0, 0.0), (0.0, 20.0))
        );
    }

    #[test]
    fn test_stroke_defaults_to_round_cap() {
        assert_eq!(StrokeStyle::new(4.0).line_cap, LineCap::Round);
        assert_eq!(
            StrokeStyle::new(4.0).line_cap(LineCap::Butt).line_cap,
            LineCap::Butt
        );
    }
}
