// entities/track.rs

use rand::Rng;

use crate::config::physics::{CAR_SPEED_MAX, CAR_SPEED_MIN};
use crate::config::road::{
    CAR_CHANCE, CAR_SPACING, RUMBLE_LENGTH, SCENERY_CHANCE, SCENERY_SPACING, SEGMENT_LENGTH,
};
use crate::entities::car::{Car, CarKind};
use crate::entities::segment::{Scenery, SceneryKind, Segment};
use crate::utils::math::wrap_depth;

/// The circular sequence of road segments plus everything attached to
/// them. Built once per session and fully rebuilt on restart; during play
/// the only structural mutation is cars migrating between segments.
pub struct Track {
    pub segments: Vec<Segment>,
    pub segment_length: f64,
}

impl Track {
    /// Builds a fresh track: deterministic curve bands, probabilistic
    /// scenery and traffic drawn from `rng`. Passing a seeded rng yields a
    /// reproducible layout.
    pub fn build<R: Rng>(
        segment_count: usize,
        curve_bands: &[(usize, usize, f64)],
        lane_offsets: &[f64],
        rng: &mut R,
    ) -> Self {
        let mut segments: Vec<Segment> = (0..segment_count)
            .map(|i| Segment::new(i, SEGMENT_LENGTH, RUMBLE_LENGTH))
            .collect();

        for &(first, last, curve) in curve_bands {
            for segment in segments.iter_mut().take(last + 1).skip(first) {
                segment.curve = curve;
            }
        }

        let mut track = Track {
            segments,
            segment_length: SEGMENT_LENGTH,
        };
        track.place_scenery(rng);
        track.place_traffic(lane_offsets, rng);
        track
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total world length; every depth in the game normalizes into
    /// [0, length).
    pub fn length(&self) -> f64 {
        self.segment_length * self.segments.len() as f64
    }

    /// O(1) owning-segment lookup for any world depth. Wrap-invariant:
    /// adding whole track lengths never changes the answer.
    pub fn segment_index_at(&self, z: f64) -> usize {
        (wrap_depth(z, self.length()) / self.segment_length) as usize % self.segments.len()
    }

    pub fn segment_at(&self, z: f64) -> &Segment {
        &self.segments[self.segment_index_at(z)]
    }

    pub fn car_count(&self) -> usize {
        self.segments.iter().map(|s| s.cars.len()).sum()
    }

    fn place_scenery<R: Rng>(&mut self, rng: &mut R) {
        let count = self.segments.len();
        let mut index = SCENERY_SPACING;
        while index < count {
            if rng.gen_bool(SCENERY_CHANCE) {
                let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let offset = side * rng.gen_range(1.2..2.4);
                let kind = if rng.gen_bool(0.7) {
                    SceneryKind::Tree
                } else {
                    SceneryKind::Boulder
                };
                self.segments[index].sprites.push(Scenery { offset, kind });
            }
            index += SCENERY_SPACING;
        }
    }

    fn place_traffic<R: Rng>(&mut self, lane_offsets: &[f64], rng: &mut R) {
        let count = self.segments.len();
        // the first interval stays clear so a restart never begins inside a car
        let mut index = CAR_SPACING;
        while index < count {
            if rng.gen_bool(CAR_CHANCE) {
                let offset = lane_offsets[rng.gen_range(0..lane_offsets.len())];
                let speed = rng.gen_range(CAR_SPEED_MIN..CAR_SPEED_MAX);
                let kind = match rng.gen_range(0..3) {
                    0 => CarKind::Sedan,
                    1 => CarKind::Van,
                    _ => CarKind::Coupe,
                };
                let z = index as f64 * self.segment_length;
                self.segments[index].cars.push(Car::new(z, offset, speed, kind));
            }
            index += CAR_SPACING;
        }
    }

    /// Advances every car by its own speed and migrates it to the segment
    /// owning its new depth. Each car leaves exactly one collection and
    /// enters exactly one, including across the track seam.
    pub fn advance_traffic(&mut self, dt: f64) {
        let length = self.length();
        let mut migrated: Vec<(usize, Car)> = Vec::new();
        for i in 0..self.segments.len() {
            let mut j = 0;
            while j < self.segments[i].cars.len() {
                let car = &self.segments[i].cars[j];
                let z = wrap_depth(car.z + car.speed * dt, length);
                let owner = self.segment_index_at(z);
                if owner == i {
                    self.segments[i].cars[j].z = z;
                    j += 1;
                } else {
                    let mut car = self.segments[i].cars.swap_remove(j);
                    car.z = z;
                    migrated.push((owner, car));
                }
            }
        }
        for (owner, car) in migrated {
            self.segments[owner].cars.push(car);
        }
    }
}
