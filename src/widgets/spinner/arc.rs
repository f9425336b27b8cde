//! Arc geometry for the indicator stroke.
//!
//! Progress values are fractions of a full turn. They are mapped onto
//! degrees without clamping: values past 1.0 simply wrap around the
//! circle when the arc is flattened.
//!
//! Angles are screen angles on a y-down surface: 0 degrees points right and
//! positive angles turn visually clockwise. `clockwise` on [`ArcPath`]
//! follows the y-up convention of UIKit-style hosts, so a
//! clockwise arc travels from `start_angle` toward *decreasing* screen
//! angles.

use crate::widgets::Rect;

/// A circular arc ready to be stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    /// Centre of the circle in local coordinates
    pub center: (f64, f64),
    pub radius: f64,
    /// Start angle in degrees (`start * 360`)
    pub start_angle: f64,
    /// End angle in degrees (`end * 360`)
    pub end_angle: f64,
    pub clockwise: bool,
}

/// Build the arc for a bounding square of side `size` at the origin.
pub fn arc_path(start: f64, end: f64, size: f64) -> ArcPath {
    ArcPath {
        center: (size / 2.0, size / 2.0),
        radius: size / 2.0,
        start_angle: start * 360.0,
        end_angle: end * 360.0,
        clockwise: true,
    }
}

impl ArcPath {
    /// Build the arc centred in `rect`, with radius `rect.width / 2`.
    pub fn in_rect(rect: Rect, start: f64, end: f64) -> Self {
        let (cx, cy) = rect.center();
        Self {
            center: (cx as f64, cy as f64),
            ..arc_path(start, end, rect.width as f64)
        }
    }

    /// Visible angular span in degrees, in `[0, 360)`.
    pub fn sweep_degrees(&self) -> f64 {
        let span = if self.clockwise {
            self.start_angle - self.end_angle
        } else {
            self.end_angle - self.start_angle
        };
        span.rem_euclid(360.0)
    }

    /// Point on the circle at a screen angle in degrees
    pub fn point_at(&self, angle_degrees: f64) -> (f64, f64) {
        let radians = angle_degrees.rem_euclid(360.0).to_radians();
        (
            self.center.0 + self.radius * radians.cos(),
            self.center.1 + self.radius * radians.sin(),
        )
    }

    /// Approximate the arc with a polyline.
    ///
    /// The first point lies at `start_angle` and the last at the end of the
    /// sweep. No segment spans more than `max_segment_degrees`. A zero sweep
    /// yields a single point.
    pub fn flatten(&self, max_segment_degrees: f64) -> Vec<(f32, f32)> {
        let sweep = self.sweep_degrees();
        let start = self.start_angle.rem_euclid(360.0);
        let point = |angle: f64| {
            let (x, y) = self.point_at(angle);
            (x as f32, y as f32)
        };

        if sweep <= 0.0 || self.radius <= 0.0 {
            return vec![point(start)];
        }

        let max_segment = max_segment_degrees.max(0.1);
        let segments = (sweep / max_segment).ceil().max(1.0) as usize;
        let direction = if self.clockwise { -1.0 } else { 1.0 };

        (0..=segments)
            .map(|i| point(start + direction * sweep * i as f64 / segments as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_angles_radius_and_center() {
        let arc = arc_path(0.05, 0.0, 30.0);
        assert!(approx(arc.start_angle, 18.0));
        assert_eq!(arc.end_angle, 0.0);
        assert_eq!(arc.radius, 15.0);
        assert_eq!(arc.center, (15.0, 15.0));
        assert!(arc.clockwise);
    }

    #[test]
    fn test_values_are_not_clamped() {
        let arc = arc_path(1.55, 0.75, 10.0);
        assert!(approx(arc.start_angle, 558.0));
        assert!(approx(arc.end_angle, 270.0));
    }

    #[test]
    fn test_identical_inputs_give_identical_paths() {
        assert_eq!(arc_path(0.8, 0.75, 24.0), arc_path(0.8, 0.75, 24.0));
        assert_eq!(
            arc_path(0.8, 0.75, 24.0).flatten(5.0),
            arc_path(0.8, 0.75, 24.0).flatten(5.0)
        );
    }

    #[test]
    fn test_sweep_follows_head_and_tail() {
        // tail at 0, head at 0.05 turns
        assert!(approx(arc_path(0.05, 0.0, 1.0).sweep_degrees(), 18.0));
        // head jumped ahead, long arc
        assert!(approx(arc_path(0.8, 0.0, 1.0).sweep_degrees(), 288.0));
        // tail caught up again
        assert!(approx(arc_path(0.8, 0.75, 1.0).sweep_degrees(), 18.0));
        // whole turns do not change the visible arc
        assert!(approx(arc_path(1.55, 1.50, 1.0).sweep_degrees(), 18.0));
    }

    #[test]
    fn test_counter_clockwise_sweep() {
        let arc = ArcPath {
            clockwise: false,
            ..arc_path(0.0, 0.25, 2.0)
        };
        assert!(approx(arc.sweep_degrees(), 90.0));
    }

    #[test]
    fn test_in_rect_is_centered() {
        let arc = ArcPath::in_rect(Rect::new(10.0, 20.0, 30.0, 30.0), 0.25, 0.0);
        assert_eq!(arc.center, (25.0, 35.0));
        assert_eq!(arc.radius, 15.0);
        assert!(approx(arc.start_angle, 90.0));
    }

    #[test]
    fn test_flatten_endpoints() {
        let arc = arc_path(0.25, 0.0, 20.0);
        let points = arc.flatten(10.0);
        // 90 degree sweep in 10 degree steps
        assert_eq!(points.len(), 10);

        // Starts at 90 degrees (straight down on a y-down surface)
        let (x0, y0) = points[0];
        assert!((x0 - 10.0).abs() < 1e-4);
        assert!((y0 - 20.0).abs() < 1e-4);

        // Ends at 0 degrees (right)
        let (x1, y1) = points[points.len() - 1];
        assert!((x1 - 20.0).abs() < 1e-4);
        assert!((y1 - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_flatten_points_lie_on_circle() {
        let arc = arc_path(3.3, 2.9, 40.0);
        for (x, y) in arc.flatten(3.0) {
            let dx = x as f64 - 20.0;
            let dy = y as f64 - 20.0;
            assert!(((dx * dx + dy * dy).sqrt() - 20.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zero_sweep_is_single_point() {
        assert_eq!(arc_path(0.5, 0.5, 10.0).flatten(5.0).len(), 1);
        assert_eq!(arc_path(0.3, 0.1, 0.0).flatten(5.0).len(), 1);
    }
}
