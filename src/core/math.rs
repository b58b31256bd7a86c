// Angle and scalar helpers shared by physics and combat

use glam::Vec2;

/// Move `value` towards `target` by at most `step`, never overshooting
pub fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

/// Unit vector for an angle in degrees, counter-clockwise as seen on screen.
///
/// Screen space has +y pointing down, so "up" (90 degrees) is `(0, -1)`.
pub fn screen_direction(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), -radians.sin())
}

/// Mirror an angle in degrees about the vertical axis
pub fn mirror_angle(degrees: f32) -> f32 {
    180.0 - degrees
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_approach() {
        assert_eq!(approach(0.0, 10.0, 3.0), 3.0);
        assert_eq!(approach(9.0, 10.0, 3.0), 10.0);
        assert_abs_diff_eq!(approach(-1.0, 0.0, 0.7), -0.3, epsilon = 1e-6);
        assert_eq!(approach(0.5, 0.0, 0.7), 0.0);
    }

    #[test]
    fn test_screen_direction_up_is_negative_y() {
        let up = screen_direction(90.0);
        assert_abs_diff_eq!(up.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(up.y, -1.0, epsilon = 1e-6);

        let spike = screen_direction(270.0);
        assert_abs_diff_eq!(spike.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mirror_angle_is_an_involution() {
        for angle in [0.0, 30.0, 45.0, 90.0, 135.0, 280.0, -80.0] {
            assert_eq!(mirror_angle(mirror_angle(angle)), angle);
        }
        assert_eq!(mirror_angle(30.0), 150.0);
    }
}
