//! Draw command definitions for the paint context.

use super::types::{Gradient, StrokeStyle};
use crate::widgets::spinner::ArcPath;
use crate::widgets::{Color, Rect};

/// A single draw operation in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle with a solid color.
    Rect {
        rect: Rect,
        color: Color,
    },

    /// Stroke a circular arc.
    Arc {
        /// The arc geometry, unrotated
        arc: ArcPath,
        stroke: StrokeStyle,
        /// Paint for the stroke
        gradient: Gradient,
        /// Rectangle the gradient axis is laid out in, before rotation
        gradient_rect: Rect,
        /// Clockwise rotation in degrees around the arc centre.
        /// The gradient rotates with the arc.
        rotation: f64,
    },
}

impl DrawCommand {
    /// Create a solid rectangle.
    pub fn rect(rect: Rect, color: Color) -> Self {
        Self::Rect { rect, color }
    }
}
