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

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use crate::camera::OrbitCamera;
use crate::config::PoolConfig;
use crate::table::{Ball, CueStick};

/// Everything a player can ask of the simulation in a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    AimLeft,
    AimRight,
    Shoot,
    OrbitLeft,
    OrbitRight,
    OrbitUp,
    OrbitDown,
    ZoomIn,
    ZoomOut,
}

impl Action {
    /// Every action, in bit order.
    pub const ALL: [Action; 9] = [
        Action::AimLeft,
        Action::AimRight,
        Action::Shoot,
        Action::OrbitLeft,
        Action::OrbitRight,
        Action::OrbitUp,
        Action::OrbitDown,
        Action::ZoomIn,
        Action::ZoomOut,
    ];

    fn bit(self) -> usize {
        self as usize
    }
}

/// Width of the bit set backing `InputState`.
const NUM_BITS: usize = 16;

/// The set of actions held down during the current frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: u16,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    /// Returns true if the action is held.
    pub fn get(&self, action: Action) -> bool {
        let i = action.bit();
        if i >= NUM_BITS {
            panic!("index is out of bounds: the len is {} but the index is {}",
                   NUM_BITS, i);
        }
        (self.held >> i & 0b_1) == 1
    }

    /// Mark the action as held.
    pub fn insert(&mut self, action: Action) {
        self.set(action, true);
    }

    /// Mark the action as released.
    pub fn remove(&mut self, action: Action) {
        self.set(action, false);
    }

    pub fn set(&mut self, action: Action, held: bool) {
        let i = action.bit();
        if i >= NUM_BITS {
            panic!("index is out of bounds: the len is {} but the index is {}",
                   NUM_BITS, i);
        }
        if held {
            self.held |= 1 << i;
        } else {
            self.held &= !(1 << i);
        }
    }

    /// Release every action.
    pub fn clear(&mut self) {
        self.held = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.held == 0
    }
}

/// Maps raw key codes from whatever windowing layer polls the keyboard onto
/// actions.
pub struct KeyBindings<K: Hash + Eq> {
    bindings: HashMap<K, Action>,
}

impl<K: Hash + Eq> KeyBindings<K> {
    pub fn new() -> Self {
        KeyBindings {
            bindings: HashMap::new(),
        }
    }

    pub fn bind_key(&mut self, key: K, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn get_binding(&self, key: &K) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Record a key press or release. Keys without a binding are ignored.
    pub fn key_event(&self, input: &mut InputState, key: &K, pressed: bool) {
        if let Some(action) = self.get_binding(key) {
            input.set(action, pressed);
        }
    }
}

impl<K: Hash + Eq> Default for KeyBindings<K> {
    fn default() -> Self {
        KeyBindings::new()
    }
}

/// Apply one frame of input.
///
/// Camera controls always respond. The cue can only be aimed or fired while
/// the cue ball is at rest.
pub fn apply_input<Config: PoolConfig>(
    balls: &mut [Ball],
    cue: &mut CueStick,
    camera: &mut OrbitCamera,
    input: &InputState,
    dt: f32
) {
    camera.apply_input(input, dt);

    let cue_ball = match balls.first_mut() {
        Some(ball) => ball,
        None => return,
    };
    if cue_ball.is_moving {
        return;
    }

    let step = Config::CUE_ROTATION_SPEED * dt;
    if input.get(Action::AimLeft) {
        cue.angle -= step;
    }
    if input.get(Action::AimRight) {
        cue.angle += step;
    }

    if input.get(Action::Shoot) {
        cue_ball.velocity = cue.direction() * cue.power;
        cue_ball.is_moving = true;
        trace!(angle = cue.angle, power = cue.power, "cue ball struck");
    }
}
