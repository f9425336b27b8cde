//! Drives the indicator from the calloop host for a few seconds.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use material_indicator::prelude::*;

fn main() -> Result<()> {
    let view = IndicatorHostView::new(4.0, Color::TEAL).size(48.0);
    let config = HostConfig::new()
        .frame_interval(Duration::from_millis(16))
        .background(Color::rgb(0.08, 0.08, 0.12));
    let mut host = HostLoop::new(view, config)?;

    let covered = Rc::new(Cell::new(0usize));
    let last_covered = covered.clone();
    host.on_frame(move |frame| last_covered.set(frame.covered_pixels()));

    host.run_for(Duration::from_secs(2))?;
    log::info!(
        "Presented {} frames in {:?}, last frame covered {} pixels",
        host.frames_presented(),
        host.elapsed(),
        covered.get()
    );

    // Pause as if the host went to the background
    host.suspend();
    host.run_for(Duration::from_millis(500))?;
    host.resume()?;
    host.run_for(Duration::from_secs(1))?;

    if let Some(animator) = host.view().indicator().animator() {
        log::info!(
            "Timeline at {:?}, rotation {:.1} degrees",
            animator.elapsed(),
            animator.rotation()
        );
    }

    host.teardown();
    Ok(())
}
