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

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;

use cgmath::{Deg, Matrix4, Rad, Vector3};
use tracing::{debug, warn};

use crate::config::PoolConfig;
use crate::table::{Ball, CueStick};

/// Something that knows which meshes have been loaded.
pub trait MeshRegistry {
    fn contains_mesh(&self, name: &str) -> bool;
}

impl<S: BuildHasher> MeshRegistry for HashSet<String, S> {
    fn contains_mesh(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<T, S: BuildHasher> MeshRegistry for HashMap<String, T, S> {
    fn contains_mesh(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

/// Where the model for a piece of the scene lives: the OBJ file and the
/// name of the object inside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AssetInfo {
    pub key: &'static str,
    pub obj_path: &'static str,
    pub mesh_name: &'static str,
}

macro_rules! assets {
    ( $( $key:expr => ($path:expr, $mesh:expr) ),* $(,)* ) => {
        [ $( AssetInfo{ key: $key, obj_path: $path, mesh_name: $mesh } ),* ]
    };
}

/// Every model the scene is built from. Balls are keyed `ball_<id>`.
pub static ASSETS: [AssetInfo; 19] = assets![
    "table"   => ("models/pooltable.obj", "PoolTable"),
    "stick"   => ("models/poolstick.obj", "PoolStick"),
    "lamp"    => ("models/luz.obj", "Light_Ceiling1"),
    "ball_0"  => ("models/cueball.obj", "cue_ball"),
    "ball_1"  => ("models/amarela1.obj", "all_balls.007"),
    "ball_2"  => ("models/amarela2.obj", "all_balls.012"),
    "ball_3"  => ("models/azul1.obj", "all_balls.008"),
    "ball_4"  => ("models/azul2.obj", "all_balls.005"),
    "ball_5"  => ("models/laranja1.obj", "all_balls.003"),
    "ball_6"  => ("models/laranja2.obj", "all_balls"),
    "ball_7"  => ("models/preta.obj", "all_balls.009"),
    "ball_8"  => ("models/roxa1.obj", "all_balls.002"),
    "ball_9"  => ("models/roxa2.obj", "all_balls.013"),
    "ball_10" => ("models/verde1.obj", "all_balls.011"),
    "ball_11" => ("models/verde2.obj", "all_balls.010"),
    "ball_12" => ("models/vermelha1.obj", "all_balls.001"),
    "ball_13" => ("models/vermelha2.obj", "all_balls.006"),
    "ball_14" => ("models/vinho1.obj", "all_balls.004"),
    "ball_15" => ("models/vinho2.obj", "all_balls.014"),
];

pub fn find_asset(key: &str) -> Option<&'static AssetInfo> {
    ASSETS.iter().find(|a| a.key == key)
}

/// The table surface sits this far below the origin.
pub const TABLE_OFFSET: [f32; 3] = [ 0.0, 0.0, -10.0 ];

/// A mesh placed in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderObject {
    pub mesh: String,
    pub transform: Matrix4<f32>,
}

/// Model matrix for a ball: lift it onto the table, spin it by its rolling
/// orientation and scale the model.
///
/// Table coordinates `(x, y)` map to world `(x, radius, y)`.
pub fn ball_transform<Config: PoolConfig>(ball: &Ball) -> Matrix4<f32> {
    let p = ball.position;
    Matrix4::from_translation(Vector3::new(p.x, ball.radius, p.y))
        * Matrix4::from(ball.orientation)
        * Matrix4::from_scale(Config::MODEL_SCALE)
}

/// Model matrix for the cue stick.
///
/// The stick model is built Z up with its tip at the origin and its butt
/// towards -X. While the cue ball rests the stick pivots about it, trailing
/// opposite the direction the ball will be struck. Once the ball is rolling
/// the stick is parked far outside the scene.
pub fn cue_stick_transform<Config: PoolConfig>(cue_ball: &Ball, cue: &CueStick) -> Matrix4<f32> {
    if cue_ball.is_moving {
        return Matrix4::from_translation(Vector3::from(Config::HIDDEN_STICK_POSITION));
    }
    let p = cue_ball.position;
    let to_ball = Matrix4::from_translation(Vector3::new(p.x, cue_ball.radius, p.y));
    // A positive cue angle turns from +x towards table +y, which is world +z:
    // clockwise seen from above.
    let aim = Matrix4::from_angle_y(Rad(-cue.angle));
    let z_up_to_y_up = Matrix4::from_angle_x(Deg(-90.0));
    to_ball * aim * z_up_to_y_up * Matrix4::from_scale(Config::MODEL_SCALE)
}

/// Model matrices for every ball followed by the cue stick.
pub fn derive_transforms<Config: PoolConfig>(balls: &[Ball], cue: &CueStick) -> Vec<Matrix4<f32>> {
    let cue_ball = match balls.first() {
        Some(ball) => ball,
        None => return Vec::new(),
    };
    balls.iter()
        .map(ball_transform::<Config>)
        .chain(Some(cue_stick_transform::<Config>(cue_ball, cue)))
        .collect()
}

/// Everything drawn each frame. Static objects never move; dynamic objects
/// hold one entry per ball followed by the cue stick.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub static_renderables: Vec<RenderObject>,
    pub dynamic_renderables: Vec<RenderObject>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    /// Build the scene for a racked table from the meshes that have been
    /// loaded.
    ///
    /// The table and lamp are always placed, loaded or not. A ball or the
    /// stick whose mesh is missing is left out, which leaves the dynamic
    /// objects out of step with the balls, and `update` will refuse to touch
    /// them.
    pub fn assemble<Config: PoolConfig, R: MeshRegistry>(balls: &[Ball], registry: &R) -> Self {
        let mut scene = Scene::new();
        let scale = Matrix4::from_scale(Config::MODEL_SCALE);

        if let Some((mesh, _)) = lookup_mesh(registry, "table") {
            let offset = Matrix4::from_translation(Vector3::from(TABLE_OFFSET));
            scene.static_renderables.push(RenderObject {
                mesh: mesh.to_string(),
                transform: offset * scale,
            });
        }
        if let Some((mesh, _)) = lookup_mesh(registry, "lamp") {
            scene.static_renderables.push(RenderObject {
                mesh: mesh.to_string(),
                transform: scale,
            });
        }

        for ball in balls {
            if let Some((mesh, true)) = lookup_mesh(registry, &format!("ball_{}", ball.id)) {
                scene.dynamic_renderables.push(RenderObject {
                    mesh: mesh.to_string(),
                    transform: scale,
                });
            }
        }
        if let Some((mesh, true)) = lookup_mesh(registry, "stick") {
            scene.dynamic_renderables.push(RenderObject {
                mesh: mesh.to_string(),
                transform: scale,
            });
        }

        debug!(
            static_renderables = scene.static_renderables.len(),
            dynamic_renderables = scene.dynamic_renderables.len(),
            balls = balls.len(),
            "assembled scene"
        );
        scene
    }

    /// Copy the current ball and cue state into the dynamic objects.
    ///
    /// Returns false, leaving every transform untouched, if there is not
    /// exactly one dynamic object per ball plus one for the stick.
    pub fn update<Config: PoolConfig>(&mut self, balls: &[Ball], cue: &CueStick) -> bool {
        if balls.is_empty() || self.dynamic_renderables.len() != balls.len() + 1 {
            debug!(
                dynamic_renderables = self.dynamic_renderables.len(),
                balls = balls.len(),
                "scene not ready, skipping transform update"
            );
            return false;
        }
        let transforms = derive_transforms::<Config>(balls, cue);
        for (obj, transform) in self.dynamic_renderables.iter_mut().zip(transforms) {
            obj.transform = transform;
        }
        true
    }

    /// Mesh names and model matrices in draw order: static objects first.
    pub fn draw_list(&self) -> impl Iterator<Item = (&str, &Matrix4<f32>)> {
        self.static_renderables.iter()
            .chain(self.dynamic_renderables.iter())
            .map(|obj| (obj.mesh.as_str(), &obj.transform))
    }
}

/// Catalog mesh name for `key`, and whether it has been loaded.
fn lookup_mesh<R: MeshRegistry>(registry: &R, key: &str) -> Option<(&'static str, bool)> {
    let asset = match find_asset(key) {
        Some(asset) => asset,
        None => {
            warn!(key, "no asset info");
            return None;
        },
    };
    let loaded = registry.contains_mesh(asset.mesh_name);
    if !loaded {
        warn!(key, mesh = asset.mesh_name, "mesh not loaded");
    }
    Some((asset.mesh_name, loaded))
}

#[cfg(test)]
mod tests {
    mod transforms {
        use approx::assert_relative_eq;
        use cgmath::{Matrix4, Point3, Quaternion, Rad, Rotation3, SquareMatrix, Transform,
                     Vector2, Vector3};

        use crate::config::*;
        use crate::scene::*;
        use crate::table::*;

        const R: f32 = DefaultPoolConfig::BALL_RADIUS;

        #[test]
        fn test_ball_transform() {
            let ball = Ball::new(3, Vector2::new(0.25, -0.5), R);
            let m = ball_transform::<DefaultPoolConfig>(&ball);
            assert_relative_eq!(m, Matrix4::from_translation(Vector3::new(0.25, R, -0.5)));

            let mut ball = ball;
            ball.orientation = Quaternion::from_angle_z(Rad(1.0));
            let m = ball_transform::<DefaultPoolConfig>(&ball);
            let p = m.transform_point(Point3::new(1.0, 0.0, 0.0));
            assert_relative_eq!(p, Point3::new(0.25 + 1.0f32.cos(), R + 1.0f32.sin(), -0.5),
                                epsilon = 1.0e-6);
        }

        #[test]
        fn test_cue_stick_follows_aim() {
            let cue_ball = Ball::new(0, Vector2::new(0.0, -0.8), R);
            for &angle in [ 0.0f32, 0.7, 2.0, -1.3 ].iter() {
                let cue = CueStick { angle, power: 8.0 };
                let m = cue_stick_transform::<DefaultPoolConfig>(&cue_ball, &cue);

                let tip = m.transform_point(Point3::new(0.0, 0.0, 0.0));
                assert_relative_eq!(tip, Point3::new(0.0, R, -0.8), epsilon = 1.0e-6);

                // The butt of the stick trails opposite the shot.
                let dir = cue.direction();
                let butt = m.transform_point(Point3::new(-1.0, 0.0, 0.0));
                assert_relative_eq!(butt, Point3::new(-dir.x, R, -0.8 - dir.y), epsilon = 1.0e-5);

                // Model up is world up.
                let up = m.transform_vector(Vector3::unit_z());
                assert_relative_eq!(up, Vector3::unit_y(), epsilon = 1.0e-6);
            }
        }

        #[test]
        fn test_cue_stick_hidden_while_rolling() {
            let mut cue_ball = Ball::new(0, Vector2::new(0.0, -0.8), R);
            cue_ball.is_moving = true;
            let cue = CueStick { angle: 0.3, power: 8.0 };
            let m = cue_stick_transform::<DefaultPoolConfig>(&cue_ball, &cue);
            assert_eq!(m, Matrix4::from_translation(Vector3::new(100.0, 100.0, 100.0)));
        }

        #[test]
        fn test_derive_transforms() {
            let (balls, cue, _) = setup_pool_table::<DefaultPoolConfig>();
            let transforms = derive_transforms::<DefaultPoolConfig>(&balls, &cue);
            assert_eq!(transforms.len(), balls.len() + 1);
            for (ball, m) in balls.iter().zip(transforms.iter()) {
                assert_eq!(*m, ball_transform::<DefaultPoolConfig>(ball));
            }
            assert!(derive_transforms::<DefaultPoolConfig>(&[], &cue).is_empty());
            assert_ne!(transforms[16], Matrix4::identity());
            assert!(transforms[16].invert().is_some());
        }
    }

    mod scene {
        use std::collections::{HashMap, HashSet};

        use cgmath::{Matrix4, Vector2};

        use crate::config::*;
        use crate::scene::*;
        use crate::table::*;

        fn all_meshes() -> HashSet<String> {
            ASSETS.iter().map(|a| a.mesh_name.to_string()).collect()
        }

        #[test]
        fn test_assemble() {
            let (balls, _, _) = setup_pool_table::<DefaultPoolConfig>();
            let scene = Scene::assemble::<DefaultPoolConfig, _>(&balls, &all_meshes());
            assert_eq!(scene.static_renderables.len(), 2);
            assert_eq!(scene.dynamic_renderables.len(), 17);
            assert_eq!(scene.static_renderables[0].mesh, "PoolTable");
            assert_eq!(scene.static_renderables[0].transform,
                       Matrix4::from_translation(cgmath::Vector3::new(0.0, 0.0, -10.0)));
            assert_eq!(scene.dynamic_renderables[0].mesh, "cue_ball");
            assert_eq!(scene.dynamic_renderables[7].mesh, "all_balls.009");
            assert_eq!(scene.dynamic_renderables[16].mesh, "PoolStick");

            let names: Vec<&str> = scene.draw_list().map(|(name, _)| name).collect();
            assert_eq!(names.len(), 19);
            assert_eq!(names[0], "PoolTable");
            assert_eq!(names[1], "Light_Ceiling1");
            assert_eq!(names[2], "cue_ball");
        }

        #[test]
        fn test_update() {
            let (mut balls, cue, _) = setup_pool_table::<DefaultPoolConfig>();
            let mut scene = Scene::assemble::<DefaultPoolConfig, _>(&balls, &all_meshes());
            balls[4].position = Vector2::new(0.5, 0.5);
            assert!(scene.update::<DefaultPoolConfig>(&balls, &cue));
            let transforms = derive_transforms::<DefaultPoolConfig>(&balls, &cue);
            for (obj, m) in scene.dynamic_renderables.iter().zip(transforms.iter()) {
                assert_eq!(obj.transform, *m);
            }
        }

        #[test]
        fn test_update_skips_when_a_ball_is_missing() {
            let (balls, cue, _) = setup_pool_table::<DefaultPoolConfig>();
            let mut meshes = all_meshes();
            meshes.remove("all_balls.003");
            let mut scene = Scene::assemble::<DefaultPoolConfig, _>(&balls, &meshes);
            assert_eq!(scene.dynamic_renderables.len(), 16);

            let before = scene.dynamic_renderables.clone();
            assert!(!scene.update::<DefaultPoolConfig>(&balls, &cue));
            assert_eq!(scene.dynamic_renderables, before);
        }

        #[test]
        fn test_update_skips_before_assembly() {
            let (balls, cue, _) = setup_pool_table::<DefaultPoolConfig>();
            let mut scene = Scene::new();
            assert!(!scene.update::<DefaultPoolConfig>(&balls, &cue));
            assert!(scene.dynamic_renderables.is_empty());
        }

        #[test]
        fn test_update_skips_extra_balls() {
            let (mut balls, cue, _) = setup_pool_table::<DefaultPoolConfig>();
            let mut scene = Scene::assemble::<DefaultPoolConfig, _>(&balls, &all_meshes());
            balls.push(Ball::new(16, Vector2::new(0.0, 0.0), DefaultPoolConfig::BALL_RADIUS));
            assert!(!scene.update::<DefaultPoolConfig>(&balls, &cue));
        }

        #[test]
        fn test_hash_map_registry() {
            let mut meshes = HashMap::new();
            meshes.insert("PoolTable".to_string(), 0u32);
            meshes.insert("cue_ball".to_string(), 1u32);
            let balls = [ Ball::new(0, Vector2::new(0.0, 0.0), DefaultPoolConfig::BALL_RADIUS) ];
            let scene = Scene::assemble::<DefaultPoolConfig, _>(&balls, &meshes);
            assert_eq!(scene.static_renderables.len(), 2);
            // No stick, so the scene can never be updated.
            assert_eq!(scene.dynamic_renderables.len(), 1);
        }

        #[test]
        fn test_static_objects_placed_without_meshes() {
            let (balls, cue, _) = setup_pool_table::<DefaultPoolConfig>();
            let mut meshes = all_meshes();
            meshes.remove("PoolTable");
            meshes.remove("Light_Ceiling1");
            let mut scene = Scene::assemble::<DefaultPoolConfig, _>(&balls, &meshes);
            assert_eq!(scene.static_renderables.len(), 2);
            assert_eq!(scene.static_renderables[0].mesh, "PoolTable");
            assert_eq!(scene.static_renderables[1].mesh, "Light_Ceiling1");
            assert_eq!(scene.dynamic_renderables.len(), 17);
            assert!(scene.update::<DefaultPoolConfig>(&balls, &cue));
        }

        #[test]
        fn test_find_asset() {
            assert_eq!(find_asset("ball_6").map(|a| a.mesh_name), Some("all_balls"));
            assert_eq!(find_asset("ball_16"), None);
        }
    }
}
