// Copyright (C) 2026 Slipstream developers
//
// This file is part of slipstream.
//
// slipstream is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// slipstream is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with slipstream. If not, see <https://www.gnu.org/licenses/>.

//File: src/main.rs

mod audio;
mod config;
mod entities;
mod game_state;
mod graphics;
mod high_score;
mod utils;
mod game {
    pub mod input_handler;
    pub mod simulation;
}

use anyhow::anyhow;
use log::{info, warn};
use piston_window::{
    Button, Key, PistonWindow, PressEvent, ReleaseEvent, UpdateEvent, WindowSettings,
};

use crate::audio::AudioManager;
use crate::config::resolution::{HEIGHT, WIDTH};
use crate::game::input_handler::InputState;
use crate::game::simulation::{Command, CommandSource, Game};
use crate::game_state::GameState;
use crate::graphics::hud::Hud;
use crate::graphics::renderer;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let best_path = high_score::default_path();
    let mut persisted_best = high_score::load(&best_path);
    info!("slipstream starting, best score so far: {}", persisted_best);

    let mut window: PistonWindow = WindowSettings::new("Slipstream", [WIDTH as u32, HEIGHT as u32])
        .resizable(false)
        .exit_on_esc(true)
        .build()
        .map_err(|e| anyhow!("failed to build window: {}", e))?;

    // missing audio hardware should never keep the game from running
    let audio = match AudioManager::new() {
        Ok(audio) => Some(audio),
        Err(err) => {
            warn!("audio unavailable, continuing silent: {:#}", err);
            None
        }
    };

    let mut rng = rand::thread_rng();
    let mut game = Game::new(persisted_best, &mut rng);
    let mut input = InputState::new();
    let mut state = GameState::TitleScreen;
    let hud = Hud::new();
    let mut elapsed = 0.0_f64;
    let mut last_command = Command::default();

    info!("entering game loop");
    while let Some(e) = window.next() {
        if let Some(Button::Keyboard(key)) = e.press_args() {
            match state {
                GameState::TitleScreen => {
                    if matches!(key, Key::Return | Key::Space) {
                        state = GameState::Playing;
                        info!("start");
                    }
                }
                GameState::Playing => input.press(key),
                GameState::GameOver => {
                    if matches!(key, Key::Return | Key::Space) {
                        game.restart(&mut rng);
                        input.reset();
                        last_command = Command::default();
                        state = GameState::Playing;
                        info!("restart");
                    }
                }
            }
        }
        if let Some(Button::Keyboard(key)) = e.release_args() {
            if state == GameState::Playing {
                input.release(key);
            }
        }

        if let Some(args) = e.update_args() {
            elapsed += args.dt;
            if state == GameState::Playing {
                last_command = input.command();
                let events = game.advance(args.dt, &last_command);
                if let Some(ref audio) = audio {
                    audio.set_engine(game.player.speed_ratio());
                }
                if events.crashed {
                    state = GameState::GameOver;
                    last_command = Command::default();
                    if let Some(ref audio) = audio {
                        audio.play_crash();
                        audio.silence_engine();
                    }
                    if game.best_score > persisted_best {
                        high_score::store(&best_path, game.best_score);
                        persisted_best = game.best_score;
                    }
                    info!(
                        "crash at score {}, best {}",
                        game.player.score_points(),
                        game.best_score
                    );
                }
            }
        }

        window.draw_2d(&e, |c, g, _device| {
            renderer::render(&mut game.track, &game.player, last_command.steer, c, g);
            match state {
                GameState::TitleScreen => {
                    hud.draw_title(game.best_score, blink(elapsed), c, g);
                }
                GameState::Playing => {
                    hud.draw_playing(
                        game.player.score_points(),
                        game.player.distance_run,
                        game.player.speed,
                        game.best_score,
                        c,
                        g,
                    );
                }
                GameState::GameOver => {
                    hud.draw_game_over(
                        game.player.score_points(),
                        game.best_score,
                        blink(elapsed),
                        c,
                        g,
                    );
                }
            }
        });
    }

    Ok(())
}

/// Two-phase blink for the prompt bars.
fn blink(elapsed: f64) -> bool {
    (elapsed * 2.0) as u64 % 2 == 0
}
