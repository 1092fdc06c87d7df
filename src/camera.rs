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

use cgmath::{perspective, Deg, Matrix4, Point3, Rad, Vector3};
use serde::{Deserialize, Serialize};

use crate::input::{Action, InputState};

/// Angular speed of the camera while an orbit key is held, in radians per
/// second.
pub const ORBIT_SPEED: f32 = 2.0;

/// Speed at which the camera approaches or leaves the table.
pub const ZOOM_SPEED: f32 = 5.0;

pub const MIN_PITCH_DEG: f32 = 5.0;
pub const MAX_PITCH_DEG: f32 = 85.0;
pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 50.0;

pub const FOV_DEG: f32 = 45.0;
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 100.0;

/// A camera orbiting the center of the table.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    /// Rotation about the table, in radians.
    pub yaw: f32,
    /// Elevation above the table, in radians.
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        OrbitCamera {
            yaw: Rad::from(Deg(45.0)).0,
            pitch: Rad::from(Deg(45.0)).0,
            distance: 5.0,
        }
    }

    /// Orbit and zoom according to the held actions.
    pub fn apply_input(&mut self, input: &InputState, dt: f32) {
        let rot = ORBIT_SPEED * dt;
        let zoom = ZOOM_SPEED * dt;
        if input.get(Action::OrbitLeft) {
            self.yaw -= rot;
        }
        if input.get(Action::OrbitRight) {
            self.yaw += rot;
        }
        if input.get(Action::OrbitUp) {
            self.pitch -= rot;
        }
        if input.get(Action::OrbitDown) {
            self.pitch += rot;
        }
        if input.get(Action::ZoomIn) {
            self.distance -= zoom;
        }
        if input.get(Action::ZoomOut) {
            self.distance += zoom;
        }
        self.clamp();
    }

    /// Keep pitch away from the poles and distance within range.
    pub fn clamp(&mut self) {
        let min_pitch = Rad::from(Deg(MIN_PITCH_DEG)).0;
        let max_pitch = Rad::from(Deg(MAX_PITCH_DEG)).0;
        self.pitch = self.pitch.max(min_pitch).min(max_pitch);
        self.distance = self.distance.max(MIN_DISTANCE).min(MAX_DISTANCE);
    }

    /// Position of the camera in world space.
    pub fn eye(&self) -> Point3<f32> {
        let (d, p, y) = (self.distance, self.pitch, self.yaw);
        Point3::new(
            d * p.cos() * y.sin(),
            d * p.cos() * y.cos(),
            d * p.sin()
        )
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at(self.eye(), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y())
    }

    /// Perspective projection with clip space Y pointing down.
    pub fn projection(&self, aspect: f32) -> Matrix4<f32> {
        let mut proj = perspective(Deg(FOV_DEG), aspect, ZNEAR, ZFAR);
        proj[1][1] *= -1.0;
        proj
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        OrbitCamera::new()
    }
}

#[cfg(test)]
mod tests {
    mod camera {
        use approx::assert_relative_eq;
        use cgmath::{EuclideanSpace, InnerSpace, Point3, Transform};

        use crate::camera::*;
        use crate::input::{Action, InputState};

        #[test]
        fn test_clamps() {
            let mut camera = OrbitCamera::new();
            let mut input = InputState::new();
            input.insert(Action::OrbitUp);
            input.insert(Action::ZoomIn);
            camera.apply_input(&input, 10.0);
            assert_relative_eq!(camera.pitch, Rad::from(Deg(MIN_PITCH_DEG)).0);
            assert_eq!(camera.distance, MIN_DISTANCE);

            input.clear();
            input.insert(Action::OrbitDown);
            input.insert(Action::ZoomOut);
            camera.apply_input(&input, 10.0);
            assert_relative_eq!(camera.pitch, Rad::from(Deg(MAX_PITCH_DEG)).0);
            assert_eq!(camera.distance, MAX_DISTANCE);
        }

        #[test]
        fn test_yaw_unbounded() {
            let mut camera = OrbitCamera::new();
            let mut input = InputState::new();
            input.insert(Action::OrbitLeft);
            camera.apply_input(&input, 10.0);
            assert_relative_eq!(camera.yaw, Rad::from(Deg(45.0f32)).0 - 20.0, epsilon = 1.0e-5);
        }

        #[test]
        fn test_view() {
            let camera = OrbitCamera::new();
            let eye = camera.eye();
            assert_relative_eq!(eye.to_vec().magnitude(), camera.distance, epsilon = 1.0e-5);
            // The orbit target ends up in front of the camera.
            let target = camera.view().transform_point(Point3::new(0.0, 0.0, 0.0));
            assert_relative_eq!(target.x, 0.0, epsilon = 1.0e-5);
            assert_relative_eq!(target.z, -camera.distance, epsilon = 1.0e-5);
        }

        #[test]
        fn test_projection_flips_y() {
            let camera = OrbitCamera::new();
            let proj = camera.projection(16.0 / 9.0);
            assert!(proj[1][1] < 0.0);
            assert!(proj[0][0] > 0.0);
        }
    }
}
