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

use cgmath::{InnerSpace, Vector2};
use smallvec::SmallVec;

use crate::config::PoolConfig;
use crate::table::{Ball, TableBounds};

/// How far two resting balls may sink into each other, as a fraction of the
/// ball radius, before the contact counts as an impact.
pub const CONTACT_SLOP: f32 = 1.0e-3;

/// One of the four cushions around the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cushion {
    MinX,
    MaxX,
    MinY,
    MaxY,
}

/// A collision resolved during a single pass. Balls are identified by their
/// index in the ball list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Collision {
    Cushion {
        ball: usize,
        cushion: Cushion,
        /// Speed of the ball as it struck the cushion.
        speed: f32,
    },
    Balls {
        a: usize,
        b: usize,
        /// How far the balls had sunk into each other before being pushed
        /// apart.
        overlap: f32,
        /// Speed at which the balls were approaching along the line of
        /// centers. Negative if they were already separating.
        closing_speed: f32,
    },
}

impl Collision {
    /// Returns true if the contact came from something actually moving.
    ///
    /// Balls left resting against each other are pushed apart by rounding
    /// sized amounts on every pass. Those contacts are still resolved, but
    /// they are not impacts.
    pub fn is_impact<Config: PoolConfig>(&self) -> bool {
        match *self {
            Collision::Cushion{ speed, .. } => speed > Config::REST_EPSILON,
            Collision::Balls{ overlap, closing_speed, .. } => {
                closing_speed > Config::REST_EPSILON
                    || overlap > CONTACT_SLOP * Config::BALL_RADIUS
            },
        }
    }
}

/// The result of two balls meeting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BallContact {
    pub overlap: f32,
    pub closing_speed: f32,
}

/// Every collision resolved in a frame, in the order they were resolved.
pub type CollisionReport = SmallVec<[Collision; 16]>;

/// Keep a ball on the table, bouncing it off any cushion it has crossed.
///
/// Each cushion is tested independently, so a ball in a corner can bounce
/// off two of them at once.
pub fn collide_cushions<F: FnMut(Cushion)>(
    ball: &mut Ball,
    bounds: &TableBounds,
    mut callback: F
) -> bool {
    let r = ball.radius;
    let mut collided = false;
    if ball.position.x - r < bounds.min.x {
        ball.position.x = bounds.min.x + r;
        ball.velocity.x = -ball.velocity.x;
        collided = true;
        callback(Cushion::MinX);
    }
    if ball.position.x + r > bounds.max.x {
        ball.position.x = bounds.max.x - r;
        ball.velocity.x = -ball.velocity.x;
        collided = true;
        callback(Cushion::MaxX);
    }
    if ball.position.y - r < bounds.min.y {
        ball.position.y = bounds.min.y + r;
        ball.velocity.y = -ball.velocity.y;
        collided = true;
        callback(Cushion::MinY);
    }
    if ball.position.y + r > bounds.max.y {
        ball.position.y = bounds.max.y - r;
        ball.velocity.y = -ball.velocity.y;
        collided = true;
        callback(Cushion::MaxY);
    }
    collided
}

/// Separate two overlapping balls and exchange the components of their
/// velocities along the line of centers. Returns the contact if the balls
/// collided.
///
/// All balls are assumed to have the same mass, which makes the response a
/// straight swap of the normal components. Tangential components are left
/// alone.
pub fn collide_balls(b1: &mut Ball, b2: &mut Ball) -> Option<BallContact> {
    let delta = b2.position - b1.position;
    let dist_sq = delta.dot(delta);
    let min_dist = b1.radius + b2.radius;
    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers have no line between them; pick one.
    let normal = if dist > 0.0 { delta / dist } else { Vector2::new(1.0, 0.0) };
    let tangent = Vector2::new(-normal.y, normal.x);

    let overlap = min_dist - dist;
    b1.position -= normal * (overlap / 2.0);
    b2.position += normal * (overlap / 2.0);

    let v1n = b1.velocity.dot(normal);
    let v1t = b1.velocity.dot(tangent);
    let v2n = b2.velocity.dot(normal);
    let v2t = b2.velocity.dot(tangent);
    b1.velocity = tangent * v1t + normal * v2n;
    b2.velocity = tangent * v2t + normal * v1n;

    // Even a glancing touch gets at least one more integration pass.
    b1.is_moving = true;
    b2.is_moving = true;

    Some(BallContact {
        overlap,
        closing_speed: v1n - v2n,
    })
}

/// Resolve every cushion and ball to ball collision on the table.
///
/// Cushions are handled first, then every pair `(i, j)` with `i < j` in
/// increasing order. Positions are corrected in place as each pair is
/// handled, so a ball touching several others resolves those contacts one
/// after another rather than simultaneously.
pub fn resolve_collisions<F: FnMut(Collision)>(
    balls: &mut [Ball],
    bounds: &TableBounds,
    mut callback: F
) -> bool {
    let mut collided = false;

    for (i, ball) in balls.iter_mut().enumerate() {
        let speed = ball.speed();
        collided |= collide_cushions(ball, bounds, |cushion| {
            callback(Collision::Cushion{ ball: i, cushion, speed })
        });
    }

    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let b1 = &mut head[i];
        for (k, b2) in tail.iter_mut().enumerate() {
            if let Some(contact) = collide_balls(b1, b2) {
                collided = true;
                callback(Collision::Balls{
                    a: i,
                    b: i + 1 + k,
                    overlap: contact.overlap,
                    closing_speed: contact.closing_speed,
                });
            }
        }
    }

    collided
}
