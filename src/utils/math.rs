// utils/math.rs

use log::warn;

/// Wraps a world depth into [0, length), handling negative inputs from
/// transient underflow.
pub fn wrap_depth(z: f64, length: f64) -> f64 {
    let r = z % length;
    if r < 0.0 {
        r + length
    } else {
        r
    }
}

/// Signed shortest-path depth from `from` to `to` on a circular track of
/// the given length. Positive means `to` lies ahead. The result is in
/// [-length/2, length/2), so comparisons never see the seam.
pub fn relative_depth(to: f64, from: f64, length: f64) -> f64 {
    let mut d = wrap_depth(to - from, length);
    if d >= length / 2.0 {
        d -= length;
    }
    d
}

/// True when the lateral intervals centered on `x1` and `x2` overlap.
pub fn lateral_overlap(x1: f64, half1: f64, x2: f64, half2: f64) -> bool {
    (x1 - x2).abs() < half1 + half2
}

/// Clamps one command channel into [lo, hi]. A non-finite sample from a
/// misbehaving input source collapses to `neutral` instead of poisoning
/// the simulation.
pub fn sanitize_axis(value: f64, lo: f64, hi: f64, neutral: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        warn!("non-finite input sample, substituting {}", neutral);
        neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEN: f64 = 400_000.0;

    #[test]
    fn wrap_handles_both_signs() {
        assert_eq!(wrap_depth(0.0, LEN), 0.0);
        assert_eq!(wrap_depth(LEN, LEN), 0.0);
        assert_eq!(wrap_depth(LEN + 250.0, LEN), 250.0);
        assert_eq!(wrap_depth(-250.0, LEN), LEN - 250.0);
        assert_eq!(wrap_depth(-LEN - 250.0, LEN), LEN - 250.0);
    }

    #[test]
    fn relative_depth_is_seam_free() {
        // plain cases
        assert_eq!(relative_depth(500.0, 200.0, LEN), 300.0);
        assert_eq!(relative_depth(200.0, 500.0, LEN), -300.0);
        // across the seam in both directions
        assert_eq!(relative_depth(100.0, LEN - 100.0, LEN), 200.0);
        assert_eq!(relative_depth(LEN - 100.0, 100.0, LEN), -200.0);
        // un-normalized inputs
        assert_eq!(relative_depth(100.0 + 3.0 * LEN, -100.0, LEN), 200.0);
    }

    #[test]
    fn overlap_is_symmetric_and_open() {
        assert!(lateral_overlap(0.0, 0.5, 0.9, 0.5));
        assert!(lateral_overlap(0.9, 0.5, 0.0, 0.5));
        // touching edges do not count as overlap
        assert!(!lateral_overlap(0.0, 0.5, 1.0, 0.5));
    }

    #[test]
    fn sanitize_rejects_poison() {
        assert_eq!(sanitize_axis(0.4, -1.0, 1.0, 0.0), 0.4);
        assert_eq!(sanitize_axis(7.0, -1.0, 1.0, 0.0), 1.0);
        assert_eq!(sanitize_axis(-7.0, -1.0, 1.0, 0.0), -1.0);
        assert_eq!(sanitize_axis(f64::NAN, -1.0, 1.0, 0.0), 0.0);
        assert_eq!(sanitize_axis(f64::INFINITY, 0.0, 1.0, 0.0), 0.0);
    }
}
