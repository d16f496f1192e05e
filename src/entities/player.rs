// entities/player.rs

use crate::config::physics::MAX_SPEED;

/// The single player state. `position` wraps at the track length, `x` is
/// the lateral offset in road-half-width units, clamped to [-2, 2].
pub struct Player {
    pub position: f64,
    pub x: f64,
    pub speed: f64,
    pub score: f64,
    pub distance_run: f64,
    pub game_over: bool,
}

impl Player {
    pub fn new() -> Self {
        Player {
            position: 0.0,
            x: 0.0,
            speed: 0.0,
            score: 0.0,
            distance_run: 0.0,
            game_over: false,
        }
    }

    /// Ratio of current to top speed; drives steering authority, passive
    /// scoring and the engine pitch.
    pub fn speed_ratio(&self) -> f64 {
        self.speed / MAX_SPEED
    }

    pub fn score_points(&self) -> u32 {
        self.score as u32
    }
}
