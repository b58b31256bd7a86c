// Per-tick motion rules: gravity, friction, drive and drift.
//
// All quantities are per tick. The stage applies the resulting velocity to the
// position afterwards (see `Stage::move_body`).

use super::body::Body;
use crate::core::math::approach;

/// Pull an airborne body down. Gravity never accelerates past `terminal`,
/// but a body already falling faster (e.g. after a spike) keeps its speed.
pub fn apply_gravity(body: &mut Body, gravity: f32, terminal: f32) {
    if body.velocity.y < terminal {
        body.velocity.y = (body.velocity.y + gravity).min(terminal);
    }
}

/// Slow horizontal motion towards zero by `amount` (friction or air resistance)
pub fn decelerate(body: &mut Body, amount: f32) {
    body.velocity.x = approach(body.velocity.x, 0.0, amount);
}

/// Drive horizontal speed towards `target` by at most `acceleration`
pub fn drive(body: &mut Body, target: f32, acceleration: f32) {
    body.velocity.x = approach(body.velocity.x, target, acceleration);
}

/// Air drift: push in `direction` (-1, 0 or 1) up to `max_speed`. Speed above
/// the cap in that direction (e.g. from knockback) is left alone.
pub fn drift(body: &mut Body, direction: f32, acceleration: f32, max_speed: f32) {
    if direction > 0.0 && body.velocity.x < max_speed {
        body.velocity.x = (body.velocity.x + acceleration).min(max_speed);
    } else if direction < 0.0 && body.velocity.x > -max_speed {
        body.velocity.x = (body.velocity.x - acceleration).max(-max_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn body() -> Body {
        Body::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_gravity_caps_at_terminal() {
        let mut body = body();
        for _ in 0..100 {
            apply_gravity(&mut body, 0.7, 10.0);
        }
        assert_eq!(body.velocity.y, 10.0);
    }

    #[test]
    fn test_gravity_keeps_faster_fall() {
        let mut body = body().with_velocity(0.0, 25.0);
        apply_gravity(&mut body, 0.7, 10.0);
        assert_eq!(body.velocity.y, 25.0);
    }

    #[test]
    fn test_decelerate_stops_at_zero() {
        let mut body = body().with_velocity(1.0, 0.0);
        decelerate(&mut body, 0.7);
        assert_abs_diff_eq!(body.velocity.x, 0.3, epsilon = 1e-6);
        decelerate(&mut body, 0.7);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_drive_reaches_target() {
        let mut body = body();
        for _ in 0..10 {
            drive(&mut body, -7.8, 5.0);
        }
        assert_eq!(body.velocity.x, -7.8);
    }

    #[test]
    fn test_drift_respects_cap_and_knockback() {
        let mut body = body();
        for _ in 0..20 {
            drift(&mut body, 1.0, 0.75, 5.0);
        }
        assert_eq!(body.velocity.x, 5.0);

        let mut launched = Body::new(0.0, 0.0, 10.0, 10.0).with_velocity(12.0, 0.0);
        drift(&mut launched, 1.0, 0.75, 5.0);
        assert_eq!(launched.velocity.x, 12.0);
        drift(&mut launched, -1.0, 0.75, 5.0);
        assert_eq!(launched.velocity.x, 11.25);
    }
}
