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

use cgmath::{Basis2, Deg, InnerSpace, One, Quaternion, Rotation, Rotation2,
             Vector2, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PoolConfig;

/// Vertical spacing between rack rows as a fraction of a ball diameter
/// (sin 60°, rounded).
pub const RACK_ROW_SPACING: f32 = 0.866;

/// A single ball on the table.
///
/// Position and velocity live in the table plane. The orientation is only
/// used to draw the ball rolling and never takes part in collisions.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: usize,
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub is_moving: bool,
    pub orientation: Quaternion<f32>,
}

impl Ball {
    /// Construct a ball at rest.
    pub fn new(id: usize, position: Vector2<f32>, radius: f32) -> Self {
        Ball {
            id,
            position,
            velocity: Vector2::zero(),
            radius,
            is_moving: false,
            orientation: Quaternion::one(),
        }
    }

    /// Speed of the ball in units per second.
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

/// The player's cue.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CueStick {
    /// Aim direction in the table plane, in radians. An angle of zero
    /// points along +x.
    pub angle: f32,
    pub power: f32,
}

impl CueStick {
    /// Unit vector pointing where the cue ball will travel when struck.
    pub fn direction(&self) -> Vector2<f32> {
        Vector2::new(self.angle.cos(), self.angle.sin())
    }
}

/// The playing surface, an axis aligned rectangle in the table plane.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableBounds {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

impl TableBounds {
    /// Returns true if a ball of the given radius centered at `p` lies
    /// entirely on the table.
    pub fn contains_ball(&self, p: Vector2<f32>, r: f32) -> bool {
        p.x - r >= self.min.x && p.x + r <= self.max.x
            && p.y - r >= self.min.y && p.y + r <= self.max.y
    }
}

/// Offsets of the racked balls from the apex, row by row.
fn rack_offsets(rows: usize, r: f32) -> impl Iterator<Item = Vector2<f32>> {
    (0..rows).flat_map(move |row| {
        (0..=row).map(move |col| {
            Vector2::new(
                col as f32 * 2.0 * r - row as f32 * r,
                row as f32 * 2.0 * r * RACK_ROW_SPACING
            )
        })
    })
}

/// Produce a freshly racked table: the cue ball, the triangular rack, a
/// reset cue and the table bounds.
///
/// Any previous state is discarded; there is no way to reset only part of
/// the table.
pub fn setup_pool_table<Config: PoolConfig>() -> (Vec<Ball>, CueStick, TableBounds) {
    let r = Config::BALL_RADIUS;
    let rows = Config::RACK_ROWS;
    let mut balls = Vec::with_capacity(1 + rows * (rows + 1) / 2);

    balls.push(Ball::new(0, Vector2::from(Config::CUE_BALL_START), r));

    let apex = Vector2::from(Config::RACK_APEX);
    let rot: Basis2<f32> = Rotation2::from_angle(Deg(Config::RACK_ROTATION_DEG));
    for (i, offset) in rack_offsets(rows, r).enumerate() {
        balls.push(Ball::new(i + 1, apex + rot.rotate_vector(offset), r));
    }

    let cue = CueStick {
        angle: 0.0,
        power: Config::CUE_POWER,
    };

    let half = Vector2::from(Config::TABLE_HALF_EXTENTS) * r;
    let bounds = TableBounds {
        min: -half,
        max: half,
    };

    debug!(balls = balls.len(), ?bounds, "racked pool table");
    (balls, cue, bounds)
}
