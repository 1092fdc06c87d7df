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

//! Ball physics and scene transforms for a 3D pool game.
//!
//! # Frame overview
//!
//! A `Simulation` owns the balls, the cue, the table bounds and the camera.
//! Each frame runs through the same stages in order:
//!
//! - `input`: held actions orbit the camera, aim the cue and strike the cue
//!   ball.
//! - `integrator`: balls roll forward, lose speed to friction and come to
//!   rest below a threshold. Their orientation is turned to match the
//!   distance rolled.
//! - `collision`: balls bounce off the cushions, then every pair of
//!   overlapping balls is pushed apart and exchanges momentum.
//! - `scene`: ball and cue state become model matrices for the renderer.
//!
//! Tuning constants come from a `PoolConfig` passed as a type parameter to
//! each stage; `DefaultPoolConfig` describes a standard table.
//!

pub extern crate cgmath;
extern crate serde;
extern crate smallvec;
extern crate tracing;

mod camera;
pub use camera::*;

mod collision;
pub use collision::*;

mod config;
pub use config::*;

mod input;
pub use input::*;

mod integrator;
pub use integrator::*;

mod scene;
pub use scene::*;

mod simulation;
pub use simulation::*;

mod table;
pub use table::*;
