// game/simulation.rs

use log::info;
use rand::Rng;

use crate::config::{gameplay, physics, road, scoring};
use crate::entities::player::Player;
use crate::entities::track::Track;
use crate::graphics::projection::player_z;
use crate::utils::math::{lateral_overlap, relative_depth, sanitize_axis, wrap_depth};

/// One normalized input sample: the contract every command source
/// (keyboard today, a gesture tracker tomorrow) must satisfy.
#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct Command {
    pub steer: f64,
    pub accel: f64,
    pub brake: f64,
}

impl Command {
    /// Clamps a sample from an external source into the contract ranges;
    /// NaN and infinities collapse to neutral so a misbehaving source
    /// cannot desynchronize the physics.
    pub fn sanitized(&self) -> Command {
        Command {
            steer: sanitize_axis(self.steer, -1.0, 1.0, 0.0),
            accel: sanitize_axis(self.accel, 0.0, 1.0, 0.0),
            brake: sanitize_axis(self.brake, 0.0, 1.0, 0.0),
        }
    }
}

/// Anything that can be polled for the latest command. Last value wins;
/// missed intermediate samples are acceptable by design.
pub trait CommandSource {
    fn command(&self) -> Command;
}

/// What one step produced, for downstream observers (audio, HUD).
#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct StepEvents {
    pub crashed: bool,
    pub overtakes: u32,
}

/// The simulation: owns the track and player and advances them one atomic
/// tick at a time. Holds no reference to any presentation state.
pub struct Game {
    pub track: Track,
    pub player: Player,
    pub best_score: u32,
}

impl Game {
    pub fn new<R: Rng>(best_score: u32, rng: &mut R) -> Self {
        Game {
            track: build_track(rng),
            player: Player::new(),
            best_score,
        }
    }

    /// Full atomic reset: fresh track, fresh player. The best score is the
    /// only thing that survives.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        self.track = build_track(rng);
        self.player = Player::new();
    }

    /// One simulation tick. A no-op once the game-over latch is set; the
    /// elapsed time is clamped so a backgrounded window cannot teleport
    /// the player on resume.
    pub fn advance(&mut self, dt: f64, command: &Command) -> StepEvents {
        let mut events = StepEvents::default();
        if self.player.game_over {
            return events;
        }

        let dt = dt.clamp(0.0, physics::MAX_DT);
        let command = command.sanitized();
        let track_length = self.track.length();
        let depth_before = self.player_depth();

        self.update_speed(dt, &command);
        self.update_steering(dt, command.steer);
        self.player.position =
            wrap_depth(self.player.position + self.player.speed * dt, track_length);
        self.player.distance_run += self.player.speed * dt;
        self.player.score += scoring::SCORE_RATE * self.player.speed_ratio() * dt;

        self.track.advance_traffic(dt);

        events.overtakes = self.detect_overtakes(dt, depth_before);
        self.player.score += events.overtakes as f64 * scoring::OVERTAKE_BONUS;

        if self.check_collisions() {
            self.crash();
            events.crashed = true;
        }
        events
    }

    /// Player world depth: camera position plus the camera lookahead.
    pub fn player_depth(&self) -> f64 {
        wrap_depth(self.player.position + player_z(), self.track.length())
    }

    /// One-way terminal latch: speed zeroes, the best score updates, and
    /// every later `advance` is a no-op until `restart`.
    pub fn crash(&mut self) {
        if self.player.game_over {
            return;
        }
        self.player.game_over = true;
        self.player.speed = 0.0;
        let score = self.player.score_points();
        if score > self.best_score {
            self.best_score = score;
            info!("new best score: {}", score);
        }
    }

    fn update_speed(&mut self, dt: f64, command: &Command) {
        let player = &mut self.player;
        let accel = if command.brake > 0.0 {
            physics::BRAKING * command.brake
        } else if command.accel > 0.0 {
            physics::ACCEL * command.accel
        } else {
            physics::DECEL
        };
        player.speed += accel * dt;
        // leaving the pavement at speed costs extra, on top of the rule above
        if player.x.abs() > 1.0 && player.speed > physics::OFF_ROAD_LIMIT {
            player.speed += physics::OFF_ROAD_DECEL * dt;
        }
        player.speed = player.speed.clamp(0.0, physics::MAX_SPEED);
    }

    fn update_steering(&mut self, dt: f64, steer: f64) {
        let ratio = self.player.speed_ratio();
        let dx = dt * physics::STEER_GAIN * ratio;
        let curve = self.track.segment_at(self.player_depth()).curve;
        self.player.x += dx * steer;
        // curves drag the car outward; holding a counter-steer is the game
        self.player.x -= dx * ratio * curve * physics::CENTRIFUGAL;
        self.player.x = self
            .player
            .x
            .clamp(-gameplay::MAX_PLAYER_X, gameplay::MAX_PLAYER_X);
    }

    /// Close-call detection: a car whose relative depth crosses the far
    /// edge of the window just behind the player, at a lateral gap tighter
    /// than a lane but wider than touching hitboxes, scores once. The
    /// `just_passed` flag re-arms only when the car is far away again, so
    /// a lapped car can score on a later approach.
    fn detect_overtakes(&mut self, dt: f64, depth_before: f64) -> u32 {
        let length = self.track.length();
        let depth_after = self.player_depth();
        let player_x = self.player.x;
        let mut awarded = 0;
        for segment in self.track.segments.iter_mut() {
            for car in segment.cars.iter_mut() {
                let rel_after = relative_depth(car.z, depth_after, length);
                if car.just_passed {
                    if rel_after.abs() > gameplay::PASS_RESET_DISTANCE {
                        car.just_passed = false;
                    }
                    continue;
                }
                let rel_before = relative_depth(car.z - car.speed * dt, depth_before, length);
                let gap = (player_x - car.offset).abs();
                if rel_before >= gameplay::CLOSE_CALL_FAR
                    && rel_after < gameplay::CLOSE_CALL_FAR
                    && rel_after > gameplay::CLOSE_CALL_NEAR
                    && gap > gameplay::CLOSE_CALL_MIN_GAP
                    && gap < gameplay::CLOSE_CALL_MAX_GAP
                {
                    car.just_passed = true;
                    awarded += 1;
                }
            }
        }
        awarded
    }

    /// Lane-splitting collision rule: obstacles within the ahead window
    /// collide only if lateral intervals overlap, and the player interval
    /// is deliberately narrower than a car's. Threading two adjacent-lane
    /// cars is survivable; matching an obstacle's offset is not.
    fn check_collisions(&self) -> bool {
        let depth = self.player_depth();
        let length = self.track.length();
        let base = self.track.segment_index_at(depth);
        let count = self.track.segment_count();
        let span = (gameplay::COLLISION_WINDOW / self.track.segment_length).ceil() as usize + 1;

        for n in 0..span {
            let segment = &self.track.segments[(base + n) % count];
            for car in &segment.cars {
                let ahead = relative_depth(car.z, depth, length);
                if (0.0..gameplay::COLLISION_WINDOW).contains(&ahead)
                    && lateral_overlap(
                        self.player.x,
                        gameplay::PLAYER_HITBOX_HALF,
                        car.offset,
                        gameplay::CAR_HITBOX_HALF,
                    )
                {
                    return true;
                }
            }
            for scenery in &segment.sprites {
                let ahead = relative_depth(segment.p1.world_z, depth, length);
                if (0.0..gameplay::COLLISION_WINDOW).contains(&ahead)
                    && lateral_overlap(
                        self.player.x,
                        gameplay::PLAYER_HITBOX_HALF,
                        scenery.offset,
                        gameplay::SCENERY_HITBOX_HALF,
                    )
                {
                    return true;
                }
            }
        }
        false
    }
}

fn build_track<R: Rng>(rng: &mut R) -> Track {
    Track::build(
        road::SEGMENT_COUNT,
        &road::CURVE_BANDS,
        &road::LANE_OFFSETS,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::car::{Car, CarKind};
    use crate::entities::segment::{Scenery, SceneryKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A game whose track carries no obstacles, so tests place their own.
    fn empty_game() -> Game {
        let mut rng = StdRng::seed_from_u64(99);
        let mut game = Game::new(0, &mut rng);
        for segment in game.track.segments.iter_mut() {
            segment.cars.clear();
            segment.sprites.clear();
        }
        game
    }

    fn put_car(game: &mut Game, z: f64, offset: f64, speed: f64) {
        let z = wrap_depth(z, game.track.length());
        let index = game.track.segment_index_at(z);
        game.track.segments[index]
            .cars
            .push(Car::new(z, offset, speed, CarKind::Sedan));
    }

    fn find_car(game: &Game) -> &Car {
        game.track
            .segments
            .iter()
            .flat_map(|s| s.cars.iter())
            .next()
            .expect("test track should hold a car")
    }

    #[test]
    fn lane_splitting_between_adjacent_lanes_survives() {
        let mut game = empty_game();
        let depth = game.player_depth();
        put_car(&mut game, depth + 150.0, -0.65, 0.0);
        put_car(&mut game, depth + 150.0, 0.65, 0.0);

        let events = game.advance(0.0, &Command::default());
        assert!(!events.crashed);
        assert!(!game.player.game_over);

        // the same geometry under a naive equal-width rule would collide
        assert!(lateral_overlap(
            0.0,
            gameplay::CAR_HITBOX_HALF,
            0.65,
            gameplay::CAR_HITBOX_HALF
        ));
    }

    #[test]
    fn matching_a_car_offset_crashes_and_updates_best() {
        let mut game = empty_game();
        game.player.score = 500.0;
        let depth = game.player_depth();
        put_car(&mut game, depth + 150.0, 0.0, 0.0);

        let events = game.advance(0.0, &Command::default());
        assert!(events.crashed);
        assert!(game.player.game_over);
        assert_eq!(game.player.speed, 0.0);
        assert_eq!(game.best_score, 500);

        // the latch makes further steps no-ops
        let again = game.advance(0.1, &Command { accel: 1.0, ..Command::default() });
        assert_eq!(again, StepEvents::default());
        assert_eq!(game.player.speed, 0.0);
    }

    #[test]
    fn roadside_scenery_only_matters_off_road() {
        let mut game = empty_game();
        let depth = game.player_depth();
        // anchor in the next segment so the sprite sits inside the ahead window
        let index = game.track.segment_index_at(depth + 250.0);
        game.track.segments[index].sprites.push(Scenery {
            offset: 1.6,
            kind: SceneryKind::Tree,
        });

        assert!(!game.advance(0.0, &Command::default()).crashed);

        game.player.x = 1.55;
        assert!(game.advance(0.0, &Command::default()).crashed);
    }

    #[test]
    fn overtake_bonus_fires_once_per_approach() {
        let mut game = empty_game();
        game.player.speed = 2_000.0;
        let depth = game.player_depth();
        // stationary car slightly behind: rel -60 -> about -154 after a tick
        put_car(&mut game, depth - 60.0, 0.5, 0.0);

        let score_before = game.player.score;
        let first = game.advance(0.05, &Command::default());
        assert_eq!(first.overtakes, 1);
        assert!(game.player.score >= score_before + scoring::OVERTAKE_BONUS);
        assert!(find_car(&game).just_passed);

        let second = game.advance(0.05, &Command::default());
        assert_eq!(second.overtakes, 0);
    }

    #[test]
    fn overtake_outside_the_gap_band_does_not_score() {
        // dead-center behind: gap 0.0 is inside the hitbox band, no bonus
        let mut game = empty_game();
        game.player.speed = 2_000.0;
        let depth = game.player_depth();
        put_car(&mut game, depth - 60.0, 0.0, 0.0);
        assert_eq!(game.advance(0.05, &Command::default()).overtakes, 0);

        // a full lane apart: too wide to be a close call
        let mut game = empty_game();
        game.player.speed = 2_000.0;
        let depth = game.player_depth();
        put_car(&mut game, depth - 60.0, 0.65, 0.0);
        assert_eq!(game.advance(0.05, &Command::default()).overtakes, 0);
    }

    #[test]
    fn pass_flag_rearms_beyond_the_reset_distance() {
        let mut game = empty_game();
        game.player.speed = 2_000.0;
        let depth = game.player_depth();
        put_car(&mut game, depth - 60.0, 0.5, 0.0);

        assert_eq!(game.advance(0.05, &Command::default()).overtakes, 1);

        // drive on until the car falls out of the reset radius
        let accel = Command {
            accel: 1.0,
            ..Command::default()
        };
        for _ in 0..200 {
            game.advance(0.05, &accel);
            let car = find_car(&game);
            if !car.just_passed {
                break;
            }
        }
        assert!(!find_car(&game).just_passed);
    }

    #[test]
    fn speed_stays_bounded_under_input_spam() {
        let mut game = empty_game();
        let accel = Command {
            accel: 1.0,
            ..Command::default()
        };
        let brake = Command {
            brake: 1.0,
            ..Command::default()
        };
        for i in 0..500 {
            let command = if i % 2 == 0 { accel } else { brake };
            game.advance(0.5, &command);
            assert!(game.player.speed >= 0.0);
            assert!(game.player.speed <= physics::MAX_SPEED);
        }
    }

    #[test]
    fn lateral_offset_stays_clamped() {
        let mut game = empty_game();
        let hard_right = Command {
            steer: 1.0,
            accel: 1.0,
            ..Command::default()
        };
        for _ in 0..400 {
            game.advance(0.1, &hard_right);
            assert!(game.player.x >= -gameplay::MAX_PLAYER_X);
            assert!(game.player.x <= gameplay::MAX_PLAYER_X);
        }
        assert_eq!(game.player.x, gameplay::MAX_PLAYER_X);
    }

    #[test]
    fn poisoned_input_is_neutralized() {
        let mut game = empty_game();
        let poison = Command {
            steer: f64::NAN,
            accel: f64::INFINITY,
            brake: -3.0,
        };
        for _ in 0..50 {
            game.advance(0.1, &poison);
        }
        assert!(game.player.x.is_finite());
        assert!(game.player.speed.is_finite());
        assert!(game.player.speed <= physics::MAX_SPEED);
    }

    #[test]
    fn a_huge_tick_is_clamped() {
        let mut game = empty_game();
        game.player.speed = physics::MAX_SPEED;
        game.advance(3600.0, &Command { accel: 1.0, ..Command::default() });
        // one clamped second at top speed, at most
        assert!(game.player.distance_run <= physics::MAX_SPEED * physics::MAX_DT + 1e-6);
    }

    #[test]
    fn position_wraps_at_track_length() {
        let mut game = empty_game();
        game.player.position = game.track.length() - 100.0;
        game.player.speed = 6_000.0;
        game.advance(0.1, &Command { accel: 1.0, ..Command::default() });
        assert!(game.player.position >= 0.0);
        assert!(game.player.position < game.track.length());
        // distance keeps growing monotonically across the seam
        assert!(game.player.distance_run > 0.0);
    }

    #[test]
    fn restart_resets_player_and_rebuilds_track() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = Game::new(0, &mut rng);
        game.player.score = 321.0;
        game.player.position = 5_000.0;
        game.player.x = 1.2;
        game.player.distance_run = 9_000.0;
        game.crash();
        assert!(game.player.game_over);
        assert_eq!(game.best_score, 321);

        game.restart(&mut rng);
        assert!(!game.player.game_over);
        assert_eq!(game.player.score, 0.0);
        assert_eq!(game.player.position, 0.0);
        assert_eq!(game.player.x, 0.0);
        assert_eq!(game.player.distance_run, 0.0);
        assert!(game.track.car_count() > 0);
        assert_eq!(game.best_score, 321);
        for segment in &game.track.segments {
            for car in &segment.cars {
                assert!(!car.just_passed);
            }
        }
    }

    #[test]
    fn traffic_ownership_holds_through_play() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut game = Game::new(0, &mut rng);
        let total = game.track.car_count();
        let accel = Command {
            accel: 1.0,
            ..Command::default()
        };
        for _ in 0..300 {
            game.advance(1.0 / 60.0, &accel);
            if game.player.game_over {
                break;
            }
        }
        assert_eq!(game.track.car_count(), total);
        for segment in &game.track.segments {
            for car in &segment.cars {
                assert_eq!(game.track.segment_index_at(car.z), segment.index);
            }
        }
    }
}
