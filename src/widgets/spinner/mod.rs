//! Material-style circular activity indicator.
//!
//! [`MaterialIndicator`] combines an [`AppearanceConfig`] with a
//! [`SpinnerAnimator`] and paints the arc produced by [`arc_path`].
//!
//! ```
//! use std::time::Duration;
//! use material_indicator::prelude::*;
//!
//! let mut indicator = MaterialIndicator::new().line_width(4.0).tint(Color::TEAL);
//! indicator.layout(Constraints::tight(Size::square(30.0)));
//! indicator.advance_animations(Duration::from_millis(650));
//! assert!((indicator.progress().start - 0.8).abs() < 1e-9);
//! ```

pub mod animator;
pub mod arc;

use std::time::Duration;

use crate::layout::{Constraints, Size};
use crate::reactive::{ChangeFlags, WidgetId};
use crate::renderer::{Gradient, GradientDir, PaintContext, StrokeStyle};
use crate::widgets::{impl_dirty_flags, Color, Rect, Widget};

pub use animator::{HeadTailPhase, Progress, SpinnerAnimator, SpinnerTiming};
pub use arc::{arc_path, ArcPath};

/// Visual configuration of an indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppearanceConfig {
    /// Stroke thickness in logical pixels
    pub line_width: f32,
    /// Start color of the tint-to-white stroke gradient
    pub tint: Color,
    /// Whether the head/tail loop keeps cycling
    pub is_loading: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            line_width: 4.0,
            tint: Color::GREEN,
            is_loading: true,
        }
    }
}

pub struct MaterialIndicator {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    appearance: AppearanceConfig,
    timing: SpinnerTiming,
    /// `None` once torn down
    animator: Option<SpinnerAnimator>,
    preferred_size: Size,
    bounds: Rect,
}

impl MaterialIndicator {
    pub const DEFAULT_SIZE: f32 = 30.0;

    pub fn new() -> Self {
        Self::with_config(AppearanceConfig::default())
    }

    pub fn with_config(appearance: AppearanceConfig) -> Self {
        let timing = SpinnerTiming::default();
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            animator: Some(SpinnerAnimator::new(timing.clone(), appearance.is_loading)),
            appearance,
            timing,
            preferred_size: Size::square(Self::DEFAULT_SIZE),
            bounds: Rect::default(),
        }
    }

    pub fn line_width(mut self, line_width: f32) -> Self {
        self.set_line_width(line_width);
        self
    }

    pub fn tint(mut self, tint: Color) -> Self {
        self.set_tint(tint);
        self
    }

    /// Set the initial running flag. A non-loading indicator only rotates.
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.appearance.is_loading = is_loading;
        self.rebuild_animator();
        self
    }

    pub fn timing(mut self, timing: SpinnerTiming) -> Self {
        self.timing = timing;
        self.rebuild_animator();
        self
    }

    /// Size requested from layout when the constraints allow it
    pub fn size(mut self, side: f32) -> Self {
        self.preferred_size = Size::square(side.max(0.0));
        self.mark_dirty(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT);
        self
    }

    fn rebuild_animator(&mut self) {
        if self.animator.is_some() {
            self.animator = Some(SpinnerAnimator::new(
                self.timing.clone(),
                self.appearance.is_loading,
            ));
        }
    }

    /// Change the stroke thickness. Non-positive widths are ignored.
    pub fn set_line_width(&mut self, line_width: f32) {
        if !(line_width > 0.0) {
            log::warn!("Ignoring non-positive line width {}", line_width);
            return;
        }
        if line_width != self.appearance.line_width {
            self.appearance.line_width = line_width;
            self.mark_dirty(ChangeFlags::NEEDS_PAINT);
        }
    }

    pub fn set_tint(&mut self, tint: Color) {
        if tint != self.appearance.tint {
            self.appearance.tint = tint;
            self.mark_dirty(ChangeFlags::NEEDS_PAINT);
        }
    }

    /// Change the running flag; observed at the next head/tail cycle boundary
    pub fn set_loading(&mut self, is_loading: bool) {
        self.appearance.is_loading = is_loading;
        if let Some(animator) = self.animator.as_mut() {
            animator.set_loading(is_loading);
        }
    }

    /// Stop both loops and drop the animation state
    pub fn teardown(&mut self) {
        if let Some(mut animator) = self.animator.take() {
            animator.teardown();
            log::debug!("Indicator {:?} torn down", self.widget_id);
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.animator.is_none()
    }

    pub fn id(&self) -> WidgetId {
        self.widget_id
    }

    pub fn appearance(&self) -> &AppearanceConfig {
        &self.appearance
    }

    pub fn animator(&self) -> Option<&SpinnerAnimator> {
        self.animator.as_ref()
    }

    pub fn progress(&self) -> Progress {
        self.animator
            .as_ref()
            .map(|a| a.progress())
            .unwrap_or(self.timing.initial)
    }

    pub fn rotation(&self) -> f64 {
        self.animator.as_ref().map(|a| a.rotation()).unwrap_or(0.0)
    }

    /// The square the arc is drawn in, centred in the bounds
    fn arc_square(&self) -> Rect {
        let side = self.bounds.width.min(self.bounds.height);
        let (cx, cy) = self.bounds.center();
        Rect::new(cx - side / 2.0, cy - side / 2.0, side, side)
    }
}

impl Default for MaterialIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for MaterialIndicator {
    fn advance_animations(&mut self, elapsed: Duration) -> bool {
        let Some(animator) = self.animator.as_mut() else {
            return false;
        };
        if animator.advance(elapsed) {
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        }
        // Rotation never ends
        true
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(self.preferred_size);
        if size != self.bounds.size() {
            self.bounds.width = size.width;
            self.bounds.height = size.height;
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        }
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        if (x, y) != (self.bounds.x, self.bounds.y) {
            self.bounds.x = x;
            self.bounds.y = y;
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let Some(animator) = self.animator.as_ref() else {
            return;
        };
        let square = self.arc_square();
        if square.width <= 0.0 {
            return;
        }

        // Keep the stroke inside the bounds
        let line_width = self.appearance.line_width;
        let progress = animator.progress().normalized();
        let arc = ArcPath::in_rect(square.inset(line_width / 2.0), progress.start, progress.end);

        ctx.draw_arc(
            arc,
            StrokeStyle::new(line_width),
            Gradient::new(self.appearance.tint, Color::WHITE, GradientDir::Diagonal),
            square,
            animator.rotation(),
        );
    }

    impl_dirty_flags!();
}
