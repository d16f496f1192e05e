// graphics/seven_segment.rs

use piston_window::{rectangle, Context, G2d};

/// Draws integers as seven-segment digits built from plain rectangles, so
/// the HUD needs no font assets.
pub struct SevenSegmentDisplay {
    pub digit_width: f64,
    pub digit_height: f64,
    pub spacing: f64,
}

impl SevenSegmentDisplay {
    pub fn new(digit_width: f64, digit_height: f64, spacing: f64) -> Self {
        SevenSegmentDisplay {
            digit_width,
            digit_height,
            spacing,
        }
    }

    /// Lit segments per digit, ordered: top, top-left, top-right, middle,
    /// bottom-left, bottom-right, bottom.
    fn segments_for_digit(digit: u32) -> [bool; 7] {
        match digit {
            0 => [true, true, true, false, true, true, true],
            1 => [false, false, true, false, false, true, false],
            2 => [true, false, true, true, true, false, true],
            3 => [true, false, true, true, false, true, true],
            4 => [false, true, true, true, false, true, false],
            5 => [true, true, false, true, false, true, true],
            6 => [true, true, false, true, true, true, true],
            7 => [true, false, true, false, false, true, false],
            8 => [true, true, true, true, true, true, true],
            9 => [true, true, true, true, false, true, true],
            _ => [false; 7],
        }
    }

    /// Bounding rectangles for the seven segments of one digit at (x, y),
    /// in the same order as `segments_for_digit`.
    fn segment_rects(&self, x: f64, y: f64) -> [[f64; 4]; 7] {
        let w = self.digit_width;
        let h = self.digit_height;
        let hw = w * 0.8;
        let hh = h * 0.1;
        let vw = w * 0.1;
        let vh = h * 0.4;
        let hx = x + (w - hw) / 2.0;
        [
            [hx, y, hw, hh],
            [x, y + hh, vw, vh],
            [x + w - vw, y + hh, vw, vh],
            [hx, y + (h - hh) / 2.0, hw, hh],
            [x, y + h / 2.0, vw, vh],
            [x + w - vw, y + h / 2.0, vw, vh],
            [hx, y + h - hh, hw, hh],
        ]
    }

    pub fn draw_digit(&self, digit: u32, x: f64, y: f64, color: [f32; 4], c: Context, g: &mut G2d) {
        let lit = Self::segments_for_digit(digit);
        for (rect, on) in self.segment_rects(x, y).iter().zip(lit) {
            if on {
                rectangle(color, *rect, c.transform, g);
            }
        }
    }

    /// Draws `value` zero-padded to `digits` places, left edge at (x, y).
    /// Values too large for the field saturate at all-nines.
    pub fn draw_number(
        &self,
        value: u32,
        digits: u32,
        x: f64,
        y: f64,
        color: [f32; 4],
        c: Context,
        g: &mut G2d,
    ) {
        let limit = 10u32.saturating_pow(digits).saturating_sub(1);
        let mut rem = value.min(limit);
        let mut divisor = 10u32.saturating_pow(digits.saturating_sub(1)).max(1);
        let mut dx = x;
        for _ in 0..digits {
            self.draw_digit(rem / divisor, dx, y, color, c, g);
            rem %= divisor;
            divisor = (divisor / 10).max(1);
            dx += self.digit_width + self.spacing;
        }
    }

    /// Screen width of a `digits`-wide readout.
    pub fn field_width(&self, digits: u32) -> f64 {
        digits as f64 * self.digit_width + digits.saturating_sub(1) as f64 * self.spacing
    }
}
