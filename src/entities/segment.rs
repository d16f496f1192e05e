// entities/segment.rs

use crate::entities::car::Car;
use crate::graphics::projection::ScreenPoint;

/// Alternating road-surface band a segment belongs to.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ColorBand {
    Light,
    Dark,
}

/// Roadside scenery variants.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum SceneryKind {
    Tree,
    Boulder,
}

/// A static obstacle bound to its segment at construction. The lateral
/// offset always lies beyond the paved edge, so it only matters to a
/// player who has left the road.
pub struct Scenery {
    pub offset: f64,
    pub kind: SceneryKind,
}

/// Near or far edge of a segment: world depth is fixed at construction,
/// the screen projection is scratch overwritten every render frame.
pub struct SegmentEdge {
    pub world_z: f64,
    pub screen: ScreenPoint,
}

impl SegmentEdge {
    pub fn new(world_z: f64) -> Self {
        SegmentEdge {
            world_z,
            screen: ScreenPoint::hidden(),
        }
    }
}

/// Fixed-length slice of track: the unit of curvature, rendering and car
/// ownership. `cars` membership changes as traffic crosses the segment's
/// depth range; `sprites` is fixed for the life of the track.
pub struct Segment {
    pub index: usize,
    pub curve: f64,
    pub p1: SegmentEdge,
    pub p2: SegmentEdge,
    pub band: ColorBand,
    pub cars: Vec<Car>,
    pub sprites: Vec<Scenery>,
}

impl Segment {
    pub fn new(index: usize, segment_length: f64, rumble_length: usize) -> Self {
        let band = if (index / rumble_length) % 2 == 0 {
            ColorBand::Light
        } else {
            ColorBand::Dark
        };
        Segment {
            index,
            curve: 0.0,
            p1: SegmentEdge::new(index as f64 * segment_length),
            p2: SegmentEdge::new((index + 1) as f64 * segment_length),
            band,
            cars: Vec::new(),
            sprites: Vec::new(),
        }
    }
}
