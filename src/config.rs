// config.rs

/// Game resolution constants
pub mod resolution {
    pub const WIDTH: f64 = 1024.0;
    pub const HEIGHT: f64 = 768.0;
}

/// Road geometry: the circular segment track and the projected view of it
pub mod road {
    /// World-unit length of one segment.
    pub const SEGMENT_LENGTH: f64 = 200.0;
    pub const SEGMENT_COUNT: usize = 2000;
    pub const TRACK_LENGTH: f64 = SEGMENT_LENGTH * SEGMENT_COUNT as f64;
    /// Segments per alternating light/dark surface band.
    pub const RUMBLE_LENGTH: usize = 3;
    pub const LANES: usize = 3;
    /// World half-width of the paved road; lateral offsets are expressed
    /// in units of this value.
    pub const ROAD_HALF_WIDTH: f64 = 2000.0;
    /// Segments projected and tested per frame.
    pub const DRAW_DISTANCE: usize = 300;
    pub const CAMERA_HEIGHT: f64 = 1000.0;
    pub const FIELD_OF_VIEW_DEG: f64 = 100.0;

    /// Lane centers traffic may occupy. The gaps are uniform so that
    /// threading between two adjacent-lane cars is always the same ask.
    pub const LANE_OFFSETS: [f64; 3] = [-0.65, 0.0, 0.65];

    /// (first segment, last segment, curvature) - contiguous bands with
    /// alternating direction; everything outside the bands is straight.
    pub const CURVE_BANDS: [(usize, usize, f64); 4] = [
        (150, 449, 2.0),
        (550, 899, -3.0),
        (1050, 1449, 4.0),
        (1550, 1899, -2.5),
    ];

    /// Candidate spawn interval for roadside scenery, in segments.
    pub const SCENERY_SPACING: usize = 20;
    pub const SCENERY_CHANCE: f64 = 0.6;
    /// Candidate spawn interval for traffic, in segments.
    pub const CAR_SPACING: usize = 40;
    pub const CAR_CHANCE: f64 = 0.5;
}

/// Vehicle physics constants
pub mod physics {
    use super::road::SEGMENT_LENGTH;

    /// One segment per frame at the 60 fps reference rate.
    pub const MAX_SPEED: f64 = SEGMENT_LENGTH * 60.0;
    pub const ACCEL: f64 = MAX_SPEED / 5.0;
    pub const BRAKING: f64 = -MAX_SPEED;
    pub const DECEL: f64 = -MAX_SPEED / 5.0;
    /// Extra drag while off the pavement, stacked on the rule above.
    pub const OFF_ROAD_DECEL: f64 = -MAX_SPEED / 2.0;
    /// Off-road drag only applies above this speed.
    pub const OFF_ROAD_LIMIT: f64 = MAX_SPEED / 4.0;
    pub const STEER_GAIN: f64 = 2.0;
    /// Strength of the outward drift on curves.
    pub const CENTRIFUGAL: f64 = 0.3;
    /// Upper bound on a single tick, so a stalled window cannot teleport us.
    pub const MAX_DT: f64 = 1.0;

    pub const CAR_SPEED_MIN: f64 = MAX_SPEED * 0.25;
    pub const CAR_SPEED_MAX: f64 = MAX_SPEED * 0.55;
}

/// Gameplay windows and hitboxes. Lateral units: 1.0 = road half-width.
pub mod gameplay {
    /// The player box is deliberately narrower than a traffic box; that
    /// asymmetry is what makes lane-splitting survivable.
    pub const PLAYER_HITBOX_HALF: f64 = 0.10;
    pub const CAR_HITBOX_HALF: f64 = 0.35;
    pub const SCENERY_HITBOX_HALF: f64 = 0.30;
    /// Obstacles this far ahead (world units) are collision candidates.
    pub const COLLISION_WINDOW: f64 = 200.0;
    /// Relative-depth window just behind the player in which a pass scores.
    pub const CLOSE_CALL_NEAR: f64 = -300.0;
    pub const CLOSE_CALL_FAR: f64 = -100.0;
    /// Lateral gap band for a close call: tighter than a full lane,
    /// wider than touching hitboxes.
    pub const CLOSE_CALL_MIN_GAP: f64 = PLAYER_HITBOX_HALF + CAR_HITBOX_HALF;
    pub const CLOSE_CALL_MAX_GAP: f64 = 0.65;
    /// A passed car re-arms once it is this far away again.
    pub const PASS_RESET_DISTANCE: f64 = 1000.0;
    pub const MAX_PLAYER_X: f64 = 2.0;
}

/// Scoring constants
pub mod scoring {
    /// Points per second at full speed.
    pub const SCORE_RATE: f64 = 10.0;
    pub const OVERTAKE_BONUS: f64 = 100.0;
}
