//! Hosting adapter for imperative toolkits.
//!
//! [`IndicatorHostView`] owns a [`MaterialIndicator`] and the frame it was
//! last rendered to. Thickness and color are plain properties: setting one
//! re-renders the frame straight away without restarting the animation.

use std::time::Duration;

use crate::error::Result;
use crate::layout::{Constraints, Size};
use crate::reactive::FrameRequest;
use crate::renderer::{Frame, PaintContext, SoftwareRenderer};
use crate::widgets::{Color, MaterialIndicator, Widget};

pub struct IndicatorHostView {
    indicator: MaterialIndicator,
    renderer: SoftwareRenderer,
    paint_ctx: PaintContext,
    size: Size,
    background: Color,
    /// Last rendered frame, `None` before the first refresh and after teardown
    frame: Option<Frame>,
    frame_request: FrameRequest,
    refresh_count: u64,
}

impl IndicatorHostView {
    pub const DEFAULT_LINE_WIDTH: f32 = 4.0;
    pub const DEFAULT_COLOR: Color = Color::BLACK;

    pub fn new(line_width: f32, color: Color) -> Self {
        let indicator = MaterialIndicator::new().line_width(line_width).tint(color);
        Self::with_indicator(indicator)
    }

    /// Host an already configured indicator
    pub fn with_indicator(indicator: MaterialIndicator) -> Self {
        Self {
            indicator,
            renderer: SoftwareRenderer::new(),
            paint_ctx: PaintContext::with_capacity(2),
            size: Size::square(MaterialIndicator::DEFAULT_SIZE),
            background: Color::TRANSPARENT,
            frame: None,
            frame_request: FrameRequest::new(),
            refresh_count: 0,
        }
    }

    /// Side of the square surface, in logical pixels
    pub fn size(mut self, side: f32) -> Self {
        self.size = Size::square(side);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn line_width(&self) -> f32 {
        self.indicator.appearance().line_width
    }

    pub fn set_line_width(&mut self, line_width: f32) -> Result<()> {
        self.indicator.set_line_width(line_width);
        self.refresh_if_needed()
    }

    pub fn color(&self) -> Color {
        self.indicator.appearance().tint
    }

    pub fn set_color(&mut self, color: Color) -> Result<()> {
        self.indicator.set_tint(color);
        self.refresh_if_needed()
    }

    pub fn is_loading(&self) -> bool {
        self.indicator.appearance().is_loading
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.indicator.set_loading(is_loading);
    }

    /// Resize the surface and re-render
    pub fn resize(&mut self, size: Size) -> Result<()> {
        if size != self.size {
            log::info!(
                "Resizing indicator surface to {}x{}",
                size.width,
                size.height
            );
            self.size = size;
            self.refresh()?;
        }
        Ok(())
    }

    pub fn set_scale_factor(&mut self, scale: f32) -> Result<()> {
        let previous = self.renderer.scale_factor();
        self.renderer.set_scale_factor(scale);
        if self.renderer.scale_factor() != previous {
            self.refresh()?;
        }
        Ok(())
    }

    /// Advance the animation to timeline position `elapsed`.
    /// Returns true if a new frame was rendered.
    pub fn advance(&mut self, elapsed: Duration) -> Result<bool> {
        if self.indicator.is_torn_down() {
            return Ok(false);
        }
        self.indicator.advance_animations(elapsed);
        if self.indicator.needs_paint() || self.frame.is_none() {
            self.refresh()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn refresh_if_needed(&mut self) -> Result<()> {
        if self.indicator.needs_paint() {
            self.refresh()?;
            self.frame_request.request();
        }
        Ok(())
    }

    /// Lay out, paint and rasterize the indicator
    pub fn refresh(&mut self) -> Result<()> {
        if self.indicator.is_torn_down() {
            return Ok(());
        }
        self.indicator.layout(Constraints::tight(self.size));
        self.indicator.set_origin(0.0, 0.0);

        self.paint_ctx.clear();
        self.indicator.paint(&mut self.paint_ctx);
        let frame = self
            .renderer
            .render(&self.paint_ctx, self.size, self.background)?;

        self.frame = Some(frame);
        self.indicator.clear_dirty();
        self.refresh_count += 1;
        log::trace!("Indicator refresh #{}", self.refresh_count);
        Ok(())
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn indicator(&self) -> &MaterialIndicator {
        &self.indicator
    }

    /// Handle that is signalled whenever a property change produced a frame
    pub fn frame_request(&self) -> &FrameRequest {
        &self.frame_request
    }

    /// Stop the animation and release the rendered frame
    pub fn teardown(&mut self) {
        self.indicator.teardown();
        self.frame = None;
        self.paint_ctx.clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.indicator.is_torn_down()
    }
}

impl Default for IndicatorHostView {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINE_WIDTH, Self::DEFAULT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_default_view() {
        let view = IndicatorHostView::default();
        assert_eq!(view.line_width(), 4.0);
        assert_eq!(view.color(), Color::BLACK);
        assert!(view.is_loading());
        assert!(view.frame().is_none());
    }

    #[test]
    fn test_first_advance_renders() {
        let mut view = IndicatorHostView::default();
        assert!(view.advance(ms(16)).unwrap());
        let frame = view.frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (30, 30));
        assert!(frame.covered_pixels() > 0);
    }

    #[test]
    fn test_setters_refresh_and_request_frame() {
        let mut view = IndicatorHostView::new(4.0, Color::TEAL);
        view.refresh().unwrap();
        let before = view.refresh_count();

        view.set_color(Color::BLACK).unwrap();
        assert_eq!(view.refresh_count(), before + 1);
        assert!(view.frame_request().take());

        view.set_line_width(6.0).unwrap();
        assert_eq!(view.line_width(), 6.0);
        assert_eq!(view.refresh_count(), before + 2);

        // Same value, nothing to do
        view.set_line_width(6.0).unwrap();
        assert_eq!(view.refresh_count(), before + 2);
    }

    #[test]
    fn test_color_change_keeps_coverage() {
        let mut view = IndicatorHostView::new(4.0, Color::TEAL).size(64.0);
        view.advance(ms(400)).unwrap();
        let teal_mask = view.frame().unwrap().alpha_mask();

        view.set_color(Color::rgb(0.9, 0.1, 0.2)).unwrap();
        let red_mask = view.frame().unwrap().alpha_mask();
        assert_eq!(teal_mask, red_mask);
    }

    #[test]
    fn test_thicker_line_covers_more() {
        let mut view = IndicatorHostView::new(2.0, Color::TEAL).size(64.0);
        view.advance(ms(400)).unwrap();
        let thin = view.frame().unwrap().covered_pixels();

        view.set_line_width(8.0).unwrap();
        let thick = view.frame().unwrap().covered_pixels();
        assert!(thick > thin);
    }

    #[test]
    fn test_resize_and_scale() {
        let mut view = IndicatorHostView::default();
        view.resize(Size::square(48.0)).unwrap();
        assert_eq!(view.frame().unwrap().width(), 48);

        view.set_scale_factor(2.0).unwrap();
        assert_eq!(view.frame().unwrap().width(), 96);
    }

    #[test]
    fn test_zero_size_surface_errors() {
        let mut view = IndicatorHostView::default().size(0.0);
        assert!(view.refresh().is_err());
    }

    #[test]
    fn test_teardown_releases_frame() {
        let mut view = IndicatorHostView::default();
        view.advance(ms(16)).unwrap();
        view.teardown();

        assert!(view.frame().is_none());
        assert!(!view.advance(ms(32)).unwrap());
        view.set_color(Color::WHITE).unwrap();
        assert!(view.frame().is_none());
    }
}
