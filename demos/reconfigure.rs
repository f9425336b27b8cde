//! Changes thickness and color of a running indicator, then stops it.

use std::time::Duration;

use material_indicator::prelude::*;

fn main() -> Result<()> {
    let mut host = HostLoop::new(IndicatorHostView::default().size(64.0), HostConfig::default())?;
    host.run_for(Duration::from_millis(700))?;

    let steps = [
        (2.0, Color::from_hex(0x1E88E5)),
        (6.0, Color::from_hex(0xE53935)),
        (10.0, Color::TEAL),
    ];
    for (line_width, color) in steps {
        host.view_mut().set_line_width(line_width)?;
        host.view_mut().set_color(color)?;
        log::info!("Line width {} color {:?}", line_width, color);
        host.run_for(Duration::from_millis(700))?;
    }

    // The head/tail loop finishes its current cycle before stopping
    host.view_mut().set_loading(false);
    host.run_for(Duration::from_secs(2))?;

    if let Some(frame) = host.view().frame() {
        frame.save_png("reconfigure.png")?;
    }
    host.teardown();
    Ok(())
}
