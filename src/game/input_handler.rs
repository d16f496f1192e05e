// game/input_handler.rs

use piston_window::Key;

use crate::game::simulation::{Command, CommandSource};

/// Latest keyboard state, sampled into a `Command` at the start of each
/// tick. Last value wins: a key event between two ticks simply replaces
/// the previous state, matching how a gesture source would report.
pub struct InputState {
    left: bool,
    right: bool,
    accel: bool,
    brake: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            left: false,
            right: false,
            accel: false,
            brake: false,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set_key(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set_key(key, false);
    }

    /// Drops any held keys, used when leaving the playing state.
    pub fn reset(&mut self) {
        *self = InputState::new();
    }

    fn set_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Left | Key::A => self.left = down,
            Key::Right | Key::D => self.right = down,
            Key::Up | Key::W => self.accel = down,
            Key::Down | Key::S => self.brake = down,
            _ => {}
        }
    }
}

impl CommandSource for InputState {
    fn command(&self) -> Command {
        let steer = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Command {
            steer,
            accel: if self.accel { 1.0 } else { 0.0 },
            brake: if self.brake { 1.0 } else { 0.0 },
        }
    }
}
