use std::path::Path;
use std::time::Duration;

use material_indicator::prelude::*;

use crate::{Result, VisualTestError};

/// A single indicator frame to render for a visual test
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Side of the square surface in logical pixels
    pub side: f32,
    pub line_width: f32,
    pub color: Color,
    pub background: Color,
    /// Timeline position the frame is taken at
    pub elapsed: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            side: 96.0,
            line_width: 6.0,
            color: Color::TEAL,
            background: Color::WHITE,
            elapsed: Duration::from_millis(400),
        }
    }
}

/// Pixels that differ from the configured background
pub fn stroke_pixels(frame: &Frame, background: Color) -> usize {
    let background = background.to_rgba8();
    (0..frame.height())
        .flat_map(|y| (0..frame.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y) != Some(background))
        .count()
}

/// Render the configured frame.
///
/// Fails when nothing but the background was drawn, so an empty frame can
/// neither be recorded as a reference nor compared against one.
pub fn render_frame(config: &RenderConfig) -> Result<Frame> {
    let mut view = IndicatorHostView::new(config.line_width, config.color)
        .size(config.side)
        .background(config.background);
    view.advance(config.elapsed)
        .map_err(|e| VisualTestError::Render(e.to_string()))?;
    // advance always renders the first frame
    let frame = view
        .frame()
        .cloned()
        .ok_or_else(|| VisualTestError::Render("no frame was rendered".to_string()))?;

    if stroke_pixels(&frame, config.background) == 0 {
        return Err(VisualTestError::Render(
            "frame contains only the background".to_string(),
        ));
    }
    Ok(frame)
}

/// Render the configured frame straight to a PNG file
pub fn render_to_file(config: &RenderConfig, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    render_frame(config)?
        .save_png(output)
        .map_err(|e| VisualTestError::Render(e.to_string()))
}
