// audio/synth.rs

use std::time::Duration;

use rodio::source::Source;

const SAMPLE_RATE: u32 = 44_100;

/// Endless engine drone: fundamental plus two harmonics. Pitch and
/// loudness are shaped downstream through `Sink::set_speed` and
/// `Sink::set_volume`, so the source itself never changes.
pub struct EngineTone {
    phase: f64,
}

impl EngineTone {
    pub fn new() -> Self {
        EngineTone { phase: 0.0 }
    }
}

impl Iterator for EngineTone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        const BASE_HZ: f64 = 55.0;
        self.phase = (self.phase + BASE_HZ / SAMPLE_RATE as f64) % 1.0;
        let t = self.phase * std::f64::consts::TAU;
        let sample = 0.6 * t.sin() + 0.3 * (2.0 * t).sin() + 0.1 * (3.0 * t).sin();
        Some(sample as f32)
    }
}

impl Source for EngineTone {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// One-shot crash: noise under a squared decay envelope.
pub struct NoiseBurst {
    remaining: u32,
    total: u32,
    state: u32,
}

impl NoiseBurst {
    pub fn new(duration: Duration) -> Self {
        let total = (duration.as_secs_f64() * SAMPLE_RATE as f64) as u32;
        NoiseBurst {
            remaining: total,
            total: total.max(1),
            state: 0x2F6E_2B31,
        }
    }
}

impl Iterator for NoiseBurst {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // xorshift keeps the source Send without dragging an rng handle in
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        let noise = self.state as f64 / u32::MAX as f64 * 2.0 - 1.0;
        let envelope = self.remaining as f64 / self.total as f64;
        Some((noise * envelope * envelope) as f32)
    }
}

impl Source for NoiseBurst {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(
            self.total as f64 / SAMPLE_RATE as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_tone_is_endless_and_bounded() {
        let mut tone = EngineTone::new();
        for _ in 0..(SAMPLE_RATE * 2) {
            let sample = tone.next().expect("engine tone never ends");
            assert!(sample.abs() <= 1.0);
        }
    }

    #[test]
    fn noise_burst_decays_to_silence_and_ends() {
        let burst = NoiseBurst::new(Duration::from_millis(100));
        let samples: Vec<f32> = burst.collect();
        assert_eq!(samples.len(), SAMPLE_RATE as usize / 10);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
        // the tail is quieter than the head
        let head: f32 = samples[..441].iter().map(|s| s.abs()).sum();
        let tail: f32 = samples[samples.len() - 441..].iter().map(|s| s.abs()).sum();
        assert!(tail < head);
    }
}
