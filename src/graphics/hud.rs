// graphics/hud.rs

use piston_window::{polygon, rectangle, Context, G2d};

use crate::config::physics::MAX_SPEED;
use crate::config::resolution::{HEIGHT, WIDTH};
use crate::graphics::seven_segment::SevenSegmentDisplay;

const SCORE_COLOR: [f32; 4] = [1.0, 0.78, 0.18, 1.0];
const SPEED_COLOR: [f32; 4] = [0.92, 0.95, 1.0, 1.0];
const BEST_COLOR: [f32; 4] = [0.75, 0.75, 0.80, 1.0];
const PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
const PROMPT: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
const LOGO: [f32; 4] = [1.0, 0.78, 0.18, 0.95];

/// All on-screen readouts. Score and speed use seven-segment digits so no
/// font assets are needed; a blinking bar stands in for prompt text.
pub struct Hud {
    score: SevenSegmentDisplay,
    speed: SevenSegmentDisplay,
    best: SevenSegmentDisplay,
    big: SevenSegmentDisplay,
}

impl Hud {
    pub fn new() -> Self {
        Hud {
            score: SevenSegmentDisplay::new(22.0, 34.0, 6.0),
            speed: SevenSegmentDisplay::new(28.0, 44.0, 7.0),
            best: SevenSegmentDisplay::new(14.0, 22.0, 4.0),
            big: SevenSegmentDisplay::new(34.0, 52.0, 9.0),
        }
    }

    /// Gauge value shown for a world-unit speed.
    fn speed_readout(speed: f64) -> u32 {
        (speed / MAX_SPEED * 120.0).round() as u32
    }

    pub fn draw_playing(
        &self,
        score: u32,
        distance_run: f64,
        speed: f64,
        best: u32,
        c: Context,
        g: &mut G2d,
    ) {
        self.score.draw_number(score, 6, 20.0, 20.0, SCORE_COLOR, c, g);
        let best_w = self.best.field_width(6);
        self.best
            .draw_number(best, 6, WIDTH - best_w - 20.0, 20.0, BEST_COLOR, c, g);
        self.speed.draw_number(
            Self::speed_readout(speed),
            3,
            20.0,
            HEIGHT - 64.0,
            SPEED_COLOR,
            c,
            g,
        );
        // distance covered, in thousands of world units
        let distance = (distance_run / 1000.0) as u32;
        let dist_w = self.best.field_width(4);
        self.best.draw_number(
            distance,
            4,
            WIDTH - dist_w - 20.0,
            HEIGHT - 42.0,
            BEST_COLOR,
            c,
            g,
        );
    }

    pub fn draw_title(&self, best: u32, blink_on: bool, c: Context, g: &mut G2d) {
        let panel_w = 560.0;
        let panel_h = 300.0;
        let px = (WIDTH - panel_w) / 2.0;
        let py = 120.0;
        rectangle(PANEL, [px, py, panel_w, panel_h], c.transform, g);

        // three slanted speed stripes as the wordless logo
        for i in 0..3 {
            let off = i as f64 * 64.0;
            polygon(
                LOGO,
                &[
                    [px + 130.0 + off, py + 50.0],
                    [px + 170.0 + off, py + 50.0],
                    [px + 140.0 + off, py + 120.0],
                    [px + 100.0 + off, py + 120.0],
                ],
                c.transform,
                g,
            );
        }

        let best_w = self.best.field_width(6);
        self.best
            .draw_number(best, 6, (WIDTH - best_w) / 2.0, py + 160.0, BEST_COLOR, c, g);

        if blink_on {
            rectangle(
                PROMPT,
                [(WIDTH - 220.0) / 2.0, py + panel_h - 56.0, 220.0, 14.0],
                c.transform,
                g,
            );
        }
    }

    pub fn draw_game_over(&self, score: u32, best: u32, blink_on: bool, c: Context, g: &mut G2d) {
        rectangle([0.35, 0.0, 0.0, 0.35], [0.0, 0.0, WIDTH, HEIGHT], c.transform, g);

        let panel_w = 520.0;
        let panel_h = 260.0;
        let px = (WIDTH - panel_w) / 2.0;
        let py = (HEIGHT - panel_h) / 2.0;
        rectangle(PANEL, [px, py, panel_w, panel_h], c.transform, g);

        let big_w = self.big.field_width(6);
        self.big
            .draw_number(score, 6, (WIDTH - big_w) / 2.0, py + 44.0, SCORE_COLOR, c, g);
        let best_w = self.best.field_width(6);
        self.best
            .draw_number(best, 6, (WIDTH - best_w) / 2.0, py + 130.0, BEST_COLOR, c, g);

        if blink_on {
            rectangle(
                PROMPT,
                [(WIDTH - 220.0) / 2.0, py + panel_h - 52.0, 220.0, 14.0],
                c.transform,
                g,
            );
        }
    }
}
