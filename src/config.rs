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

/// A set of constants describing the table, the balls and how they move.
///
/// Every stage of the simulation takes its configuration as a type
/// parameter, e.g. `integrate::<DefaultPoolConfig>(&mut balls, dt)`.
pub trait PoolConfig {
    /// Radius shared by every ball in the rack.
    const BALL_RADIUS: f32;
    /// Fraction of a ball's velocity lost per second of rolling.
    const FRICTION: f32;
    /// Speed below which a ball is considered to be at rest.
    const REST_EPSILON: f32;
    /// Largest frame time the integrator is expected to handle.
    const MAX_DELTA_TIME: f32;
    /// Angular speed of the cue while an aim key is held, in radians per
    /// second.
    const CUE_ROTATION_SPEED: f32;
    /// Speed given to the cue ball by a shot.
    const CUE_POWER: f32;
    /// Where the cue ball is placed when the table is set up.
    const CUE_BALL_START: [f32; 2];
    /// Position of the ball at the tip of the rack.
    const RACK_APEX: [f32; 2];
    /// Number of rows in the triangular rack.
    const RACK_ROWS: usize;
    /// Rotation applied to the rack about its apex, in degrees.
    const RACK_ROTATION_DEG: f32;
    /// Half the table's width and length, measured in ball radii.
    const TABLE_HALF_EXTENTS: [f32; 2];
    /// Uniform scale applied to every model.
    const MODEL_SCALE: f32;
    /// Where the cue stick is parked while the cue ball is rolling.
    const HIDDEN_STICK_POSITION: [f32; 3];
}

/// The suggested set of parameters for a standard table.
pub struct DefaultPoolConfig {}

impl PoolConfig for DefaultPoolConfig {
    const BALL_RADIUS: f32 = 0.057;
    const FRICTION: f32 = 0.5;
    const REST_EPSILON: f32 = 0.015;
    const MAX_DELTA_TIME: f32 = 0.05;
    const CUE_ROTATION_SPEED: f32 = 2.0;
    const CUE_POWER: f32 = 8.0;
    const CUE_BALL_START: [f32; 2] = [ 0.0, -0.8 ];
    const RACK_APEX: [f32; 2] = [ 0.0, 0.3 ];
    const RACK_ROWS: usize = 5;
    const RACK_ROTATION_DEG: f32 = 0.0;
    const TABLE_HALF_EXTENTS: [f32; 2] = [ 17.5, 35.0 ];
    const MODEL_SCALE: f32 = 1.0;
    const HIDDEN_STICK_POSITION: [f32; 3] = [ 100.0, 100.0, 100.0 ];
}
