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

use std::time::Instant;

use cgmath::Zero;
use serde::{Deserialize, Serialize};

use crate::camera::OrbitCamera;
use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::PoolConfig;
use crate::input::{apply_input, InputState};
use crate::integrator::integrate;
use crate::table::{setup_pool_table, Ball, CueStick, TableBounds};

/// Clamp a measured frame time to something the integrator can handle.
///
/// Long frames are cut down to `Config::MAX_DELTA_TIME` so a stall does not
/// launch balls through each other. Negative or non-finite times become
/// zero.
pub fn clamp_frame_time<Config: PoolConfig>(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        0.0
    } else {
        dt.min(Config::MAX_DELTA_TIME)
    }
}

/// Measures wall clock time between frames.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock {
            last: Instant::now(),
        }
    }

    /// Time since the previous tick, clamped for the integrator.
    pub fn tick<Config: PoolConfig>(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        clamp_frame_time::<Config>(elapsed.as_secs_f32())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new()
    }
}

/// The complete state of a game of pool.
///
/// A single owner advances the simulation once per frame; every stage
/// borrows what it needs from here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub balls: Vec<Ball>,
    pub cue: CueStick,
    pub bounds: TableBounds,
    pub camera: OrbitCamera,
}

impl Simulation {
    /// Construct a freshly racked table.
    pub fn setup<Config: PoolConfig>() -> Self {
        let (balls, cue, bounds) = setup_pool_table::<Config>();
        Simulation {
            balls,
            cue,
            bounds,
            camera: OrbitCamera::new(),
        }
    }

    /// Re-rack the table. The camera is left where it is.
    pub fn reset<Config: PoolConfig>(&mut self) {
        let (balls, cue, bounds) = setup_pool_table::<Config>();
        self.balls = balls;
        self.cue = cue;
        self.bounds = bounds;
    }

    /// The cue ball, or `None` if the table has been cleared.
    pub fn cue_ball(&self) -> Option<&Ball> {
        self.balls.first()
    }

    /// Returns true if any ball still has some velocity.
    ///
    /// This does not look at the per-ball `is_moving` flags: balls resting
    /// in contact are flagged again by every collision pass.
    pub fn is_moving(&self) -> bool {
        self.balls.iter().any(|b| !b.velocity.is_zero())
    }

    /// Advance the physics by `dt` seconds without any player input.
    ///
    /// `dt` must already be clamped, see `clamp_frame_time`. Every contact is
    /// resolved, but only impacts make it into the report.
    pub fn step<Config: PoolConfig>(&mut self, dt: f32) -> CollisionReport {
        integrate::<Config>(&mut self.balls, dt);
        let mut report = CollisionReport::new();
        resolve_collisions(&mut self.balls, &self.bounds, |c| {
            if c.is_impact::<Config>() {
                report.push(c);
            }
        });
        report
    }

    /// Run one frame: apply input, integrate, then resolve collisions.
    pub fn advance<Config: PoolConfig>(&mut self, dt: f32, input: &InputState) -> CollisionReport {
        apply_input::<Config>(&mut self.balls, &mut self.cue, &mut self.camera, input, dt);
        self.step::<Config>(dt)
    }
}
