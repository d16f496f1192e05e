// audio/mod.rs

pub mod synth;

use std::time::Duration;

use anyhow::Context as _;
use log::info;
use rodio::mixer::Mixer;
use rodio::{OutputStream, Sink};

use crate::audio::synth::{EngineTone, NoiseBurst};

/// Procedural audio collaborator: a persistent engine sink whose pitch and
/// volume follow the speed ratio, plus detached one-shot crash bursts.
/// The simulation never calls this directly; the outer loop feeds it.
pub struct AudioManager {
    _stream: OutputStream,
    mixer: Mixer,
    engine: Sink,
}

impl AudioManager {
    /// Opens the default output stream and starts the engine loop, muted
    /// until the first speed update.
    pub fn new() -> anyhow::Result<Self> {
        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .context("failed to open audio output stream")?;
        let mixer = stream.mixer().clone();

        let engine = Sink::connect_new(&mixer);
        engine.append(EngineTone::new());
        engine.set_volume(0.0);
        info!("audio stream open, engine loop running");

        Ok(AudioManager {
            _stream: stream,
            mixer,
            engine,
        })
    }

    /// Per-frame engine update; `speed_ratio` in [0, 1].
    pub fn set_engine(&self, speed_ratio: f64) {
        let ratio = speed_ratio.clamp(0.0, 1.0) as f32;
        self.engine.set_speed(0.6 + 1.8 * ratio);
        self.engine.set_volume(0.08 + 0.5 * ratio);
    }

    pub fn silence_engine(&self) {
        self.engine.set_volume(0.0);
    }

    /// Fire-and-forget crash burst on its own detached sink.
    pub fn play_crash(&self) {
        let sink = Sink::connect_new(&self.mixer);
        sink.append(NoiseBurst::new(Duration::from_millis(900)));
        sink.detach();
    }
}
