//! Renders one head/tail cycle of the indicator to PNG files.
//!
//! Usage: `cargo run --example render_frames [output-dir]`

use std::path::PathBuf;
use std::time::Duration;

use material_indicator::prelude::*;

const FRAME_STEP: Duration = Duration::from_millis(100);
const SIDE: f32 = 96.0;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("frames"));
    std::fs::create_dir_all(&out_dir)?;

    let mut view = IndicatorHostView::new(6.0, Color::TEAL)
        .size(SIDE)
        .background(Color::WHITE);

    let cycle = view
        .indicator()
        .animator()
        .map(|animator| animator.timing().cycle())
        .unwrap_or(Duration::from_millis(1300));

    let mut elapsed = Duration::ZERO;
    let mut index = 0;
    while elapsed <= cycle {
        view.advance(elapsed)?;
        if let Some(frame) = view.frame() {
            let path = out_dir.join(format!("frame_{:03}.png", index));
            frame.save_png(&path)?;
            let progress = view.indicator().progress();
            log::info!(
                "{} at {:?}: start {:.3} end {:.3} rotation {:.1}",
                path.display(),
                elapsed,
                progress.start,
                progress.end,
                view.indicator().rotation()
            );
        }
        elapsed += FRAME_STEP;
        index += 1;
    }

    Ok(())
}
