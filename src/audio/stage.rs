/// SoundStage: buffer cache plus the playback graph
/// `buffer → gain → stereo pan → output device`.
///
/// The output device is an explicitly owned `AudioOutput` handed in by the
/// composing application. `initialize()` resumes it and synthesizes every
/// effect once; until that succeeds every `play` is a silent no-op.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use super::effect::{Effect, ProximityTier};
use super::synth;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output is disabled")]
    Disabled,
    #[error("no audio output device available: {0}")]
    DeviceUnavailable(String),
    #[error("output device has not been resumed")]
    NotResumed,
    #[error("failed to start playback: {0}")]
    Playback(String),
}

/// Immutable mono PCM buffer for one effect.
#[derive(Clone, Debug)]
pub struct SoundBuffer {
    pub effect: Effect,
    pub sample_rate: u32,
    pub samples: Arc<[f32]>,
}

impl SoundBuffer {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Settings of a single one-shot voice after the gain and pan stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice {
    pub gain: f32,
    /// Always within [-1, 1].
    pub pan: f32,
}

impl Voice {
    /// Equal-power `(left, right)` channel gains.
    pub fn channel_gains(&self) -> (f32, f32) {
        let angle = (self.pan + 1.0) * FRAC_PI_4;
        (self.gain * angle.cos(), self.gain * angle.sin())
    }
}

/// A device that can mix one-shot voices.
pub trait AudioOutput {
    /// Open or wake the device. Called by `SoundStage::initialize`.
    fn resume(&mut self) -> Result<(), AudioError>;

    /// Start `buffer` immediately and return without waiting for it.
    fn submit(&self, buffer: &SoundBuffer, voice: Voice) -> Result<(), AudioError>;
}

/// Output used when sound is muted or compiled out.
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn resume(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Disabled)
    }

    fn submit(&self, _buffer: &SoundBuffer, _voice: Voice) -> Result<(), AudioError> {
        Err(AudioError::Disabled)
    }
}

pub struct SoundStage {
    output: Box<dyn AudioOutput>,
    cache: HashMap<Effect, SoundBuffer>,
    initialized: bool,
    sample_rate: u32,
    master_gain: f32,
    noise_seed: u64,
}

impl SoundStage {
    pub fn new(output: Box<dyn AudioOutput>, sample_rate: u32, master_gain: f32, noise_seed: u64) -> Self {
        SoundStage {
            output,
            cache: HashMap::with_capacity(Effect::ALL.len()),
            initialized: false,
            sample_rate,
            master_gain: master_gain.clamp(0.0, 1.0),
            noise_seed,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Resume the device and fill the buffer cache. Safe to call repeatedly;
    /// after the first success it does nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        match self.output.resume() {
            Ok(()) => {}
            Err(AudioError::Disabled) => {
                tracing::info!("sound disabled; playing silently");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "audio init failed; playing silently");
                return;
            }
        }

        if self.cache.is_empty() {
            let mut rng = ChaCha8Rng::seed_from_u64(self.noise_seed);
            for effect in Effect::ALL {
                let samples = synth::render(effect, self.sample_rate, &mut rng);
                let buffer = SoundBuffer {
                    effect,
                    sample_rate: self.sample_rate,
                    samples: samples.into(),
                };
                tracing::debug!(effect = effect.name(), secs = buffer.duration_secs(), "synthesized");
                self.cache.insert(effect, buffer);
            }
        }

        self.initialized = true;
        tracing::info!(effects = self.cache.len(), sample_rate = self.sample_rate, "sound stage ready");
    }

    /// Cached buffer for `effect`, if synthesized.
    pub fn buffer(&self, effect: Effect) -> Option<&SoundBuffer> {
        self.cache.get(&effect)
    }

    /// Fire-and-forget playback. Never fails: missing buffers, an
    /// uninitialized stage and device errors all end in silence.
    pub fn play(&self, effect: Effect, pan: f32) {
        if !self.initialized {
            return;
        }
        let Some(buffer) = self.cache.get(&effect) else {
            return;
        };

        let voice = Voice {
            gain: self.master_gain * effect.base_gain(),
            pan: clamp_pan(pan),
        };
        if let Err(e) = self.output.submit(buffer, voice) {
            tracing::debug!(effect = effect.name(), error = %e, "playback dropped");
        }
    }

    /// `play` by effect name. Unknown names are ignored.
    pub fn play_named(&self, name: &str, pan: f32) {
        match Effect::from_name(name) {
            Some(effect) => self.play(effect, pan),
            None => tracing::debug!(name, "unknown effect name"),
        }
    }

    pub fn play_directional_footstep(&self, is_correct_direction: bool, pan: f32) {
        let effect = if is_correct_direction { Effect::FootstepCorrect } else { Effect::Footstep };
        self.play(effect, pan);
    }

    /// Chime for the tier matching `distance`, centred.
    pub fn play_goal_proximity(&self, distance: u32) {
        self.play(Effect::Proximity(ProximityTier::for_distance(distance)), 0.0);
    }
}

/// NaN pans collapse to centre.
fn clamp_pan(pan: f32) -> f32 {
    if pan.is_nan() { 0.0 } else { pan.clamp(-1.0, 1.0) }
}
