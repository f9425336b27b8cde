use std::time::Duration;

use material_indicator::prelude::Color;
use visual_tests::{
    compare_images, diff_image, render_frame, run_visual_test, should_update_references,
    stroke_pixels, update_reference, RenderConfig, VisualTestConfig,
};

/// Helper macro to generate reference image tests.
///
/// References live in `visual_tests/references/` and are recorded with
/// `UPDATE_REFERENCES=1 cargo test -p visual_tests -- --ignored`.
macro_rules! visual_test {
    ($name:ident, $reference:literal, $render:expr) => {
        #[test]
        #[ignore = "compares against recorded reference images"]
        fn $name() {
            let config = VisualTestConfig {
                name: $reference.to_string(),
                render: $render,
                similarity_threshold: 0.999, // strict to catch geometry changes
            };

            if should_update_references() {
                update_reference(&config).expect("Failed to update reference");
                return;
            }

            let result = run_visual_test(&config).expect("Visual test failed to run");

            assert!(
                result.passed,
                "Visual regression detected for '{}': similarity {:.4}% (threshold: 99.9%)\n\
                 Reference: {}\n\
                 Rendered:  {}\n\
                 Diff:      {}",
                $reference,
                result.similarity * 100.0,
                result.reference_path.display(),
                result.rendered_path.display(),
                result
                    .diff_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            );
        }
    };
}

fn head_extended() -> RenderConfig {
    RenderConfig {
        elapsed: Duration::from_millis(650),
        ..RenderConfig::default()
    }
}

fn thick_black() -> RenderConfig {
    RenderConfig {
        line_width: 12.0,
        color: Color::BLACK,
        elapsed: Duration::from_millis(1000),
        ..RenderConfig::default()
    }
}

visual_test!(test_default_frame, "default_frame", RenderConfig::default());
visual_test!(test_head_extended, "head_extended", head_extended());
visual_test!(test_thick_black, "thick_black", thick_black());

#[test]
fn test_reference_frames_draw_the_stroke() {
    for config in [RenderConfig::default(), head_extended(), thick_black()] {
        let frame = render_frame(&config).expect("render");
        let side = (config.side * config.side) as usize;
        let drawn = stroke_pixels(&frame, config.background);
        // A stroked arc covers a visible share of the surface, never all of it
        assert!(drawn > side / 100, "{:?}: only {} pixels drawn", config, drawn);
        assert!(drawn < side / 2, "{:?}: {} pixels drawn", config, drawn);
    }
}

#[test]
fn test_thicker_stroke_draws_more() {
    let thin = render_frame(&RenderConfig {
        line_width: 2.0,
        ..thick_black()
    })
    .unwrap();
    let thick = render_frame(&thick_black()).unwrap();
    assert!(stroke_pixels(&thick, Color::WHITE) > stroke_pixels(&thin, Color::WHITE));
}

fn rgba(config: &RenderConfig) -> image::RgbaImage {
    render_frame(config)
        .expect("render")
        .to_rgba_image()
        .expect("convert")
}

#[test]
fn test_renders_are_deterministic() {
    let config = RenderConfig::default();
    let result = compare_images(&rgba(&config), &rgba(&config)).unwrap();
    assert!(result.similarity > 0.9999);
    assert_eq!(result.changed_pixels, 0);
}

#[test]
fn test_tint_changes_color_not_shape() {
    let teal = RenderConfig {
        background: Color::TRANSPARENT,
        ..RenderConfig::default()
    };
    let red = RenderConfig {
        color: Color::rgb(0.9, 0.1, 0.1),
        ..teal.clone()
    };

    let teal_frame = render_frame(&teal).unwrap();
    let red_frame = render_frame(&red).unwrap();
    assert_eq!(teal_frame.alpha_mask(), red_frame.alpha_mask());

    let result = compare_images(
        &teal_frame.to_rgba_image().unwrap(),
        &red_frame.to_rgba_image().unwrap(),
    )
    .unwrap();
    assert!(result.changed_pixels > 0);
}

#[test]
fn test_timeline_moves_the_arc() {
    let early = rgba(&RenderConfig {
        elapsed: Duration::from_millis(100),
        ..RenderConfig::default()
    });
    let late = rgba(&RenderConfig {
        elapsed: Duration::from_millis(900),
        ..RenderConfig::default()
    });

    let result = compare_images(&early, &late).unwrap();
    assert!(result.changed_pixels > 0);

    let diff = diff_image(&early, &late);
    assert_eq!(diff.dimensions(), early.dimensions());
    assert!(diff.pixels().any(|p| p[0] > 50 && p[1] == 0 && p[2] == 0));
}

#[test]
fn test_mismatched_sizes_are_rejected() {
    let small = rgba(&RenderConfig {
        side: 64.0,
        ..RenderConfig::default()
    });
    let large = rgba(&RenderConfig::default());
    assert!(compare_images(&small, &large).is_err());
}
