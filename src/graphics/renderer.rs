// graphics/renderer.rs

use piston_window::{ellipse, polygon, rectangle, Context, G2d};

use crate::config::resolution::{HEIGHT, WIDTH};
use crate::config::road::{DRAW_DISTANCE, LANES, ROAD_HALF_WIDTH};
use crate::entities::car::{Car, CarKind};
use crate::entities::player::Player;
use crate::entities::segment::{ColorBand, Scenery, SceneryKind};
use crate::entities::track::Track;
use crate::graphics::projection::{project, Camera, ScreenPoint};
use crate::utils::math::wrap_depth;

// road surface palette, alternating by color band
const GRASS_LIGHT: [f32; 4] = [0.06, 0.67, 0.06, 1.0];
const GRASS_DARK: [f32; 4] = [0.0, 0.60, 0.0, 1.0];
const ROAD_LIGHT: [f32; 4] = [0.42, 0.42, 0.42, 1.0];
const ROAD_DARK: [f32; 4] = [0.41, 0.41, 0.41, 1.0];
const RUMBLE_LIGHT: [f32; 4] = [0.86, 0.86, 0.86, 1.0];
const RUMBLE_DARK: [f32; 4] = [0.73, 0.12, 0.12, 1.0];
const LANE_MARKER: [f32; 4] = [0.80, 0.80, 0.80, 1.0];

const SKY_TOP: [f32; 4] = [0.28, 0.51, 0.81, 1.0];
const SKY_HORIZON: [f32; 4] = [0.65, 0.81, 0.96, 1.0];
const SUN: [f32; 4] = [1.0, 0.95, 0.70, 1.0];

const TREE_TRUNK: [f32; 4] = [0.35, 0.22, 0.10, 1.0];
const TREE_CANOPY: [f32; 4] = [0.05, 0.42, 0.09, 1.0];
const BOULDER: [f32; 4] = [0.52, 0.50, 0.46, 1.0];

/// Sprites whose projected scale falls below this are not worth drawing.
const MIN_SPRITE_SCALE: f64 = 2.0e-5;

/// Paints one frame: background, road pass, sprite pass (far to near),
/// then the player car. Mutates nothing but the per-frame projection
/// scratch on segment edges.
pub fn render(track: &mut Track, player: &Player, steer: f64, c: Context, g: &mut G2d) {
    draw_background(c, g);
    draw_road(track, player, c, g);
    draw_sprites(track, player, c, g);
    draw_player(steer, c, g);
}

fn draw_background(c: Context, g: &mut G2d) {
    // coarse vertical gradient down to the horizon line
    let bands = 6;
    let band_h = HEIGHT / 2.0 / bands as f64;
    for i in 0..bands {
        let t = i as f32 / (bands - 1) as f32;
        rectangle(
            mix(SKY_TOP, SKY_HORIZON, t),
            [0.0, i as f64 * band_h, WIDTH, band_h + 1.0],
            c.transform,
            g,
        );
    }
    ellipse(SUN, [WIDTH * 0.72, 52.0, 76.0, 76.0], c.transform, g);
    // ground fill below the horizon; the road pass paints over most of it
    rectangle(
        GRASS_DARK,
        [0.0, HEIGHT / 2.0, WIDTH, HEIGHT / 2.0],
        c.transform,
        g,
    );
}

/// The road pass: walk the draw-distance window forward from the camera's
/// base segment, accumulate the curvature shift, project both edges into
/// the segment's scratch, cull, and paint accepted segments.
fn draw_road(track: &mut Track, player: &Player, c: Context, g: &mut G2d) {
    let camera = Camera::follow(player.x, player.position);
    let track_length = track.length();
    let segment_count = track.segment_count();
    let base_index = track.segment_index_at(camera.z);
    let base_percent =
        wrap_depth(camera.z, track_length) % track.segment_length / track.segment_length;

    let mut x_shift = 0.0;
    let mut dx = -(track.segments[base_index].curve * base_percent);
    let mut max_y = HEIGHT;

    for n in 0..DRAW_DISTANCE {
        let index = (base_index + n) % segment_count;
        // segments past the seam sit one whole track length further out
        let loop_bias = if index < base_index { track_length } else { 0.0 };

        let (z1, z2, curve, band) = {
            let segment = &track.segments[index];
            (segment.p1.world_z, segment.p2.world_z, segment.curve, segment.band)
        };

        let near_camera = Camera {
            x: camera.x - x_shift,
            y: camera.y,
            z: camera.z - loop_bias,
            depth: camera.depth,
        };
        let p1 = project(0.0, 0.0, z1, &near_camera, WIDTH, HEIGHT, ROAD_HALF_WIDTH);
        x_shift += dx;
        dx += curve;
        let far_camera = Camera {
            x: camera.x - x_shift,
            y: camera.y,
            z: camera.z - loop_bias,
            depth: camera.depth,
        };
        let p2 = project(0.0, 0.0, z2, &far_camera, WIDTH, HEIGHT, ROAD_HALF_WIDTH);

        let segment = &mut track.segments[index];
        segment.p1.screen = p1;
        segment.p2.screen = p2;

        let near_depth = z1 + loop_bias - camera.z;
        // cull: near edge behind the depth-of-field plane, or the far edge
        // failed to climb above everything already drawn
        if near_depth <= camera.depth || p2.y >= max_y {
            continue;
        }
        draw_segment_quad(p1, p2, band, c, g);
        max_y = p2.y;
    }
}

fn draw_segment_quad(p1: ScreenPoint, p2: ScreenPoint, band: ColorBand, c: Context, g: &mut G2d) {
    let (grass, road, rumble) = match band {
        ColorBand::Light => (GRASS_LIGHT, ROAD_LIGHT, RUMBLE_LIGHT),
        ColorBand::Dark => (GRASS_DARK, ROAD_DARK, RUMBLE_DARK),
    };

    rectangle(grass, [0.0, p2.y, WIDTH, p1.y - p2.y], c.transform, g);

    polygon(
        road,
        &quad(p1.x, p1.half_width, p1.y, p2.x, p2.half_width, p2.y),
        c.transform,
        g,
    );

    let r1 = p1.half_width / 6.0;
    let r2 = p2.half_width / 6.0;
    polygon(
        rumble,
        &[
            [p1.x - p1.half_width - r1, p1.y],
            [p1.x - p1.half_width, p1.y],
            [p2.x - p2.half_width, p2.y],
            [p2.x - p2.half_width - r2, p2.y],
        ],
        c.transform,
        g,
    );
    polygon(
        rumble,
        &[
            [p1.x + p1.half_width + r1, p1.y],
            [p1.x + p1.half_width, p1.y],
            [p2.x + p2.half_width, p2.y],
            [p2.x + p2.half_width + r2, p2.y],
        ],
        c.transform,
        g,
    );

    if band == ColorBand::Light {
        let l1 = p1.half_width / 32.0;
        let l2 = p2.half_width / 32.0;
        let lane_w1 = p1.half_width * 2.0 / LANES as f64;
        let lane_w2 = p2.half_width * 2.0 / LANES as f64;
        let mut lane_x1 = p1.x - p1.half_width + lane_w1;
        let mut lane_x2 = p2.x - p2.half_width + lane_w2;
        for _ in 1..LANES {
            polygon(
                LANE_MARKER,
                &[
                    [lane_x1 - l1 / 2.0, p1.y],
                    [lane_x1 + l1 / 2.0, p1.y],
                    [lane_x2 + l2 / 2.0, p2.y],
                    [lane_x2 - l2 / 2.0, p2.y],
                ],
                c.transform,
                g,
            );
            lane_x1 += lane_w1;
            lane_x2 += lane_w2;
        }
    }
}

/// The sprite pass walks the same window in reverse so nearer cars and
/// scenery paint over farther ones.
fn draw_sprites(track: &Track, player: &Player, c: Context, g: &mut G2d) {
    let track_length = track.length();
    let base_index = track.segment_index_at(player.position);
    let segment_count = track.segment_count();

    for n in (0..DRAW_DISTANCE).rev() {
        let segment = &track.segments[(base_index + n) % segment_count];
        let p1 = segment.p1.screen;
        let p2 = segment.p2.screen;
        if p1.is_hidden() || p2.is_hidden() {
            continue;
        }

        for car in &segment.cars {
            let percent =
                wrap_depth(car.z, track_length) % track.segment_length / track.segment_length;
            let point = lerp_point(p1, p2, percent);
            if point.scale < MIN_SPRITE_SCALE {
                continue;
            }
            draw_car(car, point, c, g);
        }

        for scenery in &segment.sprites {
            if p1.scale < MIN_SPRITE_SCALE {
                continue;
            }
            draw_scenery(scenery, p1, c, g);
        }
    }
}

fn lerp_point(p1: ScreenPoint, p2: ScreenPoint, t: f64) -> ScreenPoint {
    ScreenPoint {
        x: p1.x + (p2.x - p1.x) * t,
        y: p1.y + (p2.y - p1.y) * t,
        scale: p1.scale + (p2.scale - p1.scale) * t,
        half_width: p1.half_width + (p2.half_width - p1.half_width) * t,
    }
}

fn draw_car(car: &Car, point: ScreenPoint, c: Context, g: &mut G2d) {
    let (body, cabin) = match car.kind {
        CarKind::Sedan => ([0.76, 0.14, 0.14, 1.0], [0.22, 0.26, 0.32, 1.0]),
        CarKind::Van => ([0.16, 0.31, 0.72, 1.0], [0.25, 0.28, 0.33, 1.0]),
        CarKind::Coupe => ([0.88, 0.72, 0.10, 1.0], [0.20, 0.23, 0.28, 1.0]),
    };
    let w = point.half_width * 0.6;
    let h = w * 0.55;
    let x = point.x + point.half_width * car.offset - w / 2.0;
    let y = point.y - h;

    rectangle(body, [x, y + h * 0.35, w, h * 0.65], c.transform, g);
    rectangle(cabin, [x + w * 0.18, y, w * 0.64, h * 0.45], c.transform, g);
    let wheel_w = w * 0.16;
    let wheel_h = h * 0.2;
    rectangle(
        [0.05, 0.05, 0.05, 1.0],
        [x - wheel_w * 0.3, y + h - wheel_h, wheel_w, wheel_h],
        c.transform,
        g,
    );
    rectangle(
        [0.05, 0.05, 0.05, 1.0],
        [x + w - wheel_w * 0.7, y + h - wheel_h, wheel_w, wheel_h],
        c.transform,
        g,
    );
}

fn draw_scenery(scenery: &Scenery, point: ScreenPoint, c: Context, g: &mut G2d) {
    let x = point.x + point.half_width * scenery.offset;
    match scenery.kind {
        SceneryKind::Tree => {
            let h = point.half_width * 0.9;
            let trunk_w = h * 0.12;
            rectangle(
                TREE_TRUNK,
                [x - trunk_w / 2.0, point.y - h * 0.45, trunk_w, h * 0.45],
                c.transform,
                g,
            );
            ellipse(
                TREE_CANOPY,
                [x - h * 0.28, point.y - h, h * 0.56, h * 0.7],
                c.transform,
                g,
            );
        }
        SceneryKind::Boulder => {
            let h = point.half_width * 0.3;
            ellipse(
                BOULDER,
                [x - h * 0.8, point.y - h, h * 1.6, h],
                c.transform,
                g,
            );
        }
    }
}

/// The player car is drawn at a fixed screen anchor (the camera follows
/// it), leaning with the live steer input.
fn draw_player(steer: f64, c: Context, g: &mut G2d) {
    let cx = WIDTH / 2.0;
    let base_y = HEIGHT - 48.0;
    let w = 200.0;
    let h = 92.0;
    let lean = steer.clamp(-1.0, 1.0) * 14.0;

    // wheels first, body over them
    rectangle(
        [0.04, 0.04, 0.04, 1.0],
        [cx - w / 2.0 - 6.0, base_y - 20.0, 34.0, 26.0],
        c.transform,
        g,
    );
    rectangle(
        [0.04, 0.04, 0.04, 1.0],
        [cx + w / 2.0 - 28.0, base_y - 20.0, 34.0, 26.0],
        c.transform,
        g,
    );
    polygon(
        [0.85, 0.87, 0.90, 1.0],
        &[
            [cx - w * 0.38 + lean, base_y - h],
            [cx + w * 0.38 + lean, base_y - h],
            [cx + w / 2.0, base_y],
            [cx - w / 2.0, base_y],
        ],
        c.transform,
        g,
    );
    // windshield
    polygon(
        [0.16, 0.20, 0.26, 1.0],
        &[
            [cx - w * 0.30 + lean, base_y - h * 0.92],
            [cx + w * 0.30 + lean, base_y - h * 0.92],
            [cx + w * 0.26 + lean * 0.5, base_y - h * 0.48],
            [cx - w * 0.26 + lean * 0.5, base_y - h * 0.48],
        ],
        c.transform,
        g,
    );
}

fn quad(x1: f64, w1: f64, y1: f64, x2: f64, w2: f64, y2: f64) -> [[f64; 2]; 4] {
    [
        [x1 - w1, y1],
        [x1 + w1, y1],
        [x2 + w2, y2],
        [x2 - w2, y2],
    ]
}

fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        1.0,
    ]
}
