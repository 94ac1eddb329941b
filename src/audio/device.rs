/// rodio-backed output device.
///
/// Each voice is a detached `Sink` fed by a stereo source that reads the
/// shared mono buffer and applies the voice's channel gains, so overlapping
/// plays mix in rodio's mixer without copying samples.

use std::sync::Arc;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use super::stage::{AudioError, AudioOutput, SoundBuffer, Voice};

#[derive(Default)]
pub struct RodioOutput {
    // The stream must outlive every sink; dropping it stops playback.
    stream: Option<(OutputStream, OutputStreamHandle)>,
}

impl RodioOutput {
    pub fn new() -> Self {
        RodioOutput::default()
    }
}

impl AudioOutput for RodioOutput {
    fn resume(&mut self) -> Result<(), AudioError> {
        if self.stream.is_none() {
            let opened = OutputStream::try_default()
                .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;
            self.stream = Some(opened);
        }
        Ok(())
    }

    fn submit(&self, buffer: &SoundBuffer, voice: Voice) -> Result<(), AudioError> {
        let (_, handle) = self.stream.as_ref().ok_or(AudioError::NotResumed)?;
        let sink = Sink::try_new(handle).map_err(|e| AudioError::Playback(e.to_string()))?;
        sink.append(PannedVoice::new(buffer, voice));
        sink.detach(); // fire-and-forget
        Ok(())
    }
}

/// Interleaved stereo view over a mono buffer.
struct PannedVoice {
    samples: Arc<[f32]>,
    sample_rate: u32,
    left: f32,
    right: f32,
    /// Index into the interleaved stream: even = left, odd = right.
    pos: usize,
}

impl PannedVoice {
    fn new(buffer: &SoundBuffer, voice: Voice) -> Self {
        let (left, right) = voice.channel_gains();
        PannedVoice {
            samples: Arc::clone(&buffer.samples),
            sample_rate: buffer.sample_rate,
            left,
            right,
            pos: 0,
        }
    }

    fn remaining(&self) -> usize {
        (self.samples.len() * 2).saturating_sub(self.pos)
    }
}

impl Iterator for PannedVoice {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let s = *self.samples.get(self.pos / 2)?;
        let gain = if self.pos % 2 == 0 { self.left } else { self.right };
        self.pos += 1;
        Some(s * gain)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl Source for PannedVoice {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.remaining())
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(self.samples.len() as f32 / self.sample_rate as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::effect::Effect;

    fn buffer(samples: &[f32]) -> SoundBuffer {
        SoundBuffer { effect: Effect::Footstep, sample_rate: 1000, samples: samples.into() }
    }

    #[test]
    fn interleaves_panned_channels() {
        let v = PannedVoice::new(&buffer(&[1.0, -0.5]), Voice { gain: 1.0, pan: 1.0 });
        assert_eq!(v.channels(), 2);
        let out: Vec<f32> = v.collect();
        assert_eq!(out.len(), 4);
        assert!(out[0].abs() < 1e-6);
        assert!((out[1] - 1.0).abs() < 1e-6);
        assert!(out[2].abs() < 1e-6);
        assert!((out[3] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn reports_duration_and_remaining() {
        let mut v = PannedVoice::new(&buffer(&[0.0; 500]), Voice { gain: 1.0, pan: 0.0 });
        assert_eq!(v.total_duration(), Some(Duration::from_millis(500)));
        assert_eq!(v.current_frame_len(), Some(1000));
        v.next();
        assert_eq!(v.current_frame_len(), Some(999));
    }
}
