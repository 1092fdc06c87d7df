// Copyright 2017 Matthew Plant. This file is part of poolsim.
//
// poolsim is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// poolsim is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with poolsim. If not, see <http://www.gnu.org/licenses/>.

use cgmath::{InnerSpace, Quaternion, Rad, Rotation3, Vector2, Vector3, Zero};

use crate::config::PoolConfig;
use crate::table::Ball;

/// Rotate a ball as though it had rolled across the table by `disp`.
///
/// The rotation is applied in world space, so it pre-multiplies the current
/// orientation.
pub fn roll(ball: &mut Ball, disp: Vector2<f32>) {
    let d = disp.magnitude();
    if d <= 0.0 || ball.radius <= 0.0 {
        return;
    }
    // Table y is world z; the axis is the world up vector crossed with the
    // direction of travel.
    let axis = Vector3::new(disp.y, 0.0, -disp.x) / d;
    let q = Quaternion::from_axis_angle(axis, Rad(d / ball.radius));
    ball.orientation = (q * ball.orientation).normalize();
}

/// Advance every ball by `dt` seconds.
///
/// `dt` must already be clamped to `Config::MAX_DELTA_TIME`; the integrator
/// does not check. Returns true if any ball is still moving.
pub fn integrate<Config: PoolConfig>(balls: &mut [Ball], dt: f32) -> bool {
    let mut any_moving = false;

    for ball in balls.iter_mut() {
        if ball.velocity.magnitude() > Config::REST_EPSILON {
            let disp = ball.velocity * dt;
            ball.position += disp;
            ball.velocity -= ball.velocity * Config::FRICTION * dt;
            ball.is_moving = true;
            any_moving = true;
            roll(ball, disp);
        } else {
            ball.velocity = Vector2::zero();
            ball.is_moving = false;
        }
    }

    if !any_moving {
        if let Some(cue_ball) = balls.first_mut() {
            cue_ball.is_moving = false;
        }
    }

    any_moving
}
