/// Waveform synthesis: every effect rendered from closed-form expressions.
///
/// Each generator is a pure function of time `t` (seconds from buffer start)
/// built from exponential envelopes, sine partials, uniform white noise and
/// slow sine modulation. Noise is drawn from the caller's RNG, so a seeded
/// RNG gives bit-identical buffers.

use std::f32::consts::TAU;

use rand::Rng;

use super::effect::{Effect, ProximityTier};

/// Largest absolute sample value a finished buffer may hold.
const PEAK_LIMIT: f32 = 0.98;

/// Render `effect` as mono samples at `sample_rate`.
pub fn render<R: Rng + ?Sized>(effect: Effect, sample_rate: u32, rng: &mut R) -> Vec<f32> {
    let mut samples = match effect {
        Effect::Footstep => gen_footstep(sample_rate, rng, FootstepVoice::NORMAL),
        Effect::FootstepCorrect => gen_footstep(sample_rate, rng, FootstepVoice::CORRECT),
        Effect::WallCollision => gen_wall_collision(sample_rate, rng),
        Effect::AmbientEcho => gen_ambient_echo(sample_rate, rng),
        Effect::Proximity(tier) => gen_proximity(sample_rate, tier),
        Effect::Victory => gen_victory(sample_rate, rng),
    };
    limit_peak(&mut samples);
    samples
}

/// Nominal length of `effect` in seconds.
pub fn duration_of(effect: Effect) -> f32 {
    match effect {
        Effect::Footstep => FootstepVoice::NORMAL.duration,
        Effect::FootstepCorrect => FootstepVoice::CORRECT.duration,
        Effect::WallCollision => WALL_DURATION,
        Effect::AmbientEcho => ECHO_DURATION,
        Effect::Proximity(_) => PROXIMITY_DURATION,
        Effect::Victory => VICTORY_SEGMENTS.iter().map(|s| s.1).sum(),
    }
}

// ════════════════════════════════════════════════════════════
//  Building blocks
// ════════════════════════════════════════════════════════════

fn sample_count(duration: f32, sample_rate: u32) -> usize {
    (duration * sample_rate as f32).round() as usize
}

/// Time in seconds of every sample index.
fn times(duration: f32, sample_rate: u32) -> impl Iterator<Item = f32> {
    let rate = sample_rate as f32;
    (0..sample_count(duration, sample_rate)).map(move |i| i as f32 / rate)
}

#[inline]
fn sine(freq: f32, t: f32) -> f32 {
    (TAU * freq * t).sin()
}

/// `exp(-k·t)`
#[inline]
fn decay(k: f32, t: f32) -> f32 {
    (-k * t).exp()
}

/// `1 - exp(-k·t)`: rises from 0 towards 1.
#[inline]
fn attack(k: f32, t: f32) -> f32 {
    1.0 - decay(k, t)
}

#[inline]
fn noise<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(-1.0f32..=1.0)
}

/// Scale down uniformly when the peak exceeds `PEAK_LIMIT`.
fn limit_peak(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if peak > PEAK_LIMIT {
        let scale = PEAK_LIMIT / peak;
        samples.iter_mut().for_each(|s| *s *= scale);
    }
}

// ════════════════════════════════════════════════════════════
//  Footsteps
// ════════════════════════════════════════════════════════════

/// Shape parameters that tell the two footstep variants apart.
#[derive(Clone, Copy)]
struct FootstepVoice {
    duration: f32,
    noise_decay: f32,
    ring_freq: f32,
    ring_decay: f32,
}

impl FootstepVoice {
    /// Dull, lower thump.
    const NORMAL: FootstepVoice = FootstepVoice {
        duration: 0.14,
        noise_decay: 38.0,
        ring_freq: 110.0,
        ring_decay: 30.0,
    };
    /// Shorter, brighter tap for a step towards the goal.
    const CORRECT: FootstepVoice = FootstepVoice {
        duration: 0.11,
        noise_decay: 55.0,
        ring_freq: 180.0,
        ring_decay: 42.0,
    };
}

/// Fast-attack noise burst over a short tonal ring.
fn gen_footstep<R: Rng + ?Sized>(sample_rate: u32, rng: &mut R, v: FootstepVoice) -> Vec<f32> {
    times(v.duration, sample_rate)
        .map(|t| {
            let burst = noise(rng) * 0.55 * decay(v.noise_decay, t);
            let ring = (sine(v.ring_freq, t) + 0.3 * sine(2.0 * v.ring_freq, t))
                * 0.45
                * decay(v.ring_decay, t);
            attack(600.0, t) * (burst + ring)
        })
        .collect()
}

// ════════════════════════════════════════════════════════════
//  Wall collision
// ════════════════════════════════════════════════════════════

const WALL_DURATION: f32 = 0.35;

/// (frequency, weight, decay) of the resonant body, descending.
const WALL_MODES: [(f32, f32, f32); 3] = [
    (440.0, 0.35, 18.0),
    (330.0, 0.30, 14.0),
    (220.0, 0.25, 11.0),
];

/// Sharp click of noise, ringing body modes, and a low thud.
fn gen_wall_collision<R: Rng + ?Sized>(sample_rate: u32, rng: &mut R) -> Vec<f32> {
    times(WALL_DURATION, sample_rate)
        .map(|t| {
            let impact = noise(rng) * 0.5 * decay(70.0, t);
            let body: f32 = WALL_MODES
                .iter()
                .map(|&(f, w, k)| w * decay(k, t) * sine(f, t))
                .sum();
            let thud = 0.6 * decay(7.0, t) * sine(55.0, t);
            attack(2000.0, t) * (impact + body + thud)
        })
        .collect()
}

// ════════════════════════════════════════════════════════════
//  Ambient echo
// ════════════════════════════════════════════════════════════

const ECHO_DURATION: f32 = 1.0;
const ECHO_BASE_FREQ: f32 = 98.0;

/// (delay seconds, relative level) of each reflection; the first is the
/// direct sound.
const ECHO_TAPS: [(f32, f32); 3] = [(0.0, 1.0), (0.18, 0.5), (0.36, 0.25)];

/// The low tone the reflections are copies of. Silent before it starts.
fn echo_tone(t: f32) -> f32 {
    if t < 0.0 {
        return 0.0;
    }
    attack(25.0, t) * decay(3.0, t) * (sine(ECHO_BASE_FREQ, t) + 0.4 * sine(2.0 * ECHO_BASE_FREQ, t))
}

/// Sustained low tone with two delayed, quieter reflections and a breath of
/// decaying noise.
fn gen_ambient_echo<R: Rng + ?Sized>(sample_rate: u32, rng: &mut R) -> Vec<f32> {
    times(ECHO_DURATION, sample_rate)
        .map(|t| {
            let taps: f32 = ECHO_TAPS.iter().map(|&(d, level)| level * echo_tone(t - d)).sum();
            0.5 * taps + 0.06 * noise(rng) * decay(5.0, t)
        })
        .collect()
}

// ════════════════════════════════════════════════════════════
//  Goal proximity
// ════════════════════════════════════════════════════════════

const PROXIMITY_DURATION: f32 = 1.2;

/// (fundamental, level, harmonic fullness) per tier. Nearer is louder,
/// higher and richer.
fn proximity_voice(tier: ProximityTier) -> (f32, f32, f32) {
    match tier {
        ProximityTier::Near => (659.25, 0.85, 1.0),
        ProximityTier::Mid => (587.33, 0.6, 0.7),
        ProximityTier::Far => (523.25, 0.4, 0.45),
    }
}

/// Warm chime: fundamental plus three harmonics, soft attack, slow decay,
/// and a gentle amplitude glow.
fn gen_proximity(sample_rate: u32, tier: ProximityTier) -> Vec<f32> {
    let (freq, level, full) = proximity_voice(tier);
    let weights = [1.0, 0.5 * full, 0.3 * full, 0.15 * full];
    let norm: f32 = weights.iter().sum();

    times(PROXIMITY_DURATION, sample_rate)
        .map(|t| {
            let tone: f32 = weights
                .iter()
                .enumerate()
                .map(|(i, w)| w * sine(freq * (i + 1) as f32, t))
                .sum();
            let env = attack(10.0, t) * decay(2.2, t);
            let glow = 1.0 + 0.12 * sine(4.5, t);
            level * env * glow * tone / norm
        })
        .collect()
}

// ════════════════════════════════════════════════════════════
//  Victory fanfare
// ════════════════════════════════════════════════════════════

/// Ascending C major phrase: (note frequency, segment length).
const VICTORY_SEGMENTS: [(f32, f32); 4] = [
    (523.25, 0.35),  // C5
    (659.25, 0.35),  // E5
    (783.99, 0.35),  // G5
    (1046.5, 1.45),  // C6, held
];

/// Four-note rising phrase with harmonics, a bass line two octaves down,
/// a percussive hit at each note, vibrato and tremolo, all under an overall
/// swell-and-fade envelope.
fn gen_victory<R: Rng + ?Sized>(sample_rate: u32, rng: &mut R) -> Vec<f32> {
    let total = duration_of(Effect::Victory);
    let mut samples = Vec::with_capacity(sample_count(total, sample_rate));
    let mut seg_start = 0.0f32;

    for &(freq, len) in &VICTORY_SEGMENTS {
        let n = sample_count(len, sample_rate);
        for i in 0..n {
            let tau = i as f32 / sample_rate as f32;
            let t = seg_start + tau;

            let vib = 1.0 + 0.004 * sine(5.5, t);
            let lead = sine(freq * vib, t) + 0.5 * sine(2.0 * freq * vib, t) + 0.25 * sine(3.0 * freq, t);
            let note_env = attack(40.0, tau) * decay(1.5, tau);
            let bass = 0.35 * sine(freq / 4.0, t) * decay(2.0, tau);
            let hit = 0.4 * noise(rng) * decay(45.0, tau);
            let tremolo = 1.0 + 0.15 * sine(6.0, t);

            let overall = (t / 0.2).min(1.0) * (1.0 - t / total).max(0.0).powf(0.6);
            samples.push(overall * (0.35 * tremolo * (0.57 * note_env * lead + bass) + hit));
        }
        seg_start += len;
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const RATE: u32 = 22050;

    fn rendered(effect: Effect) -> Vec<f32> {
        render(effect, RATE, &mut ChaCha8Rng::seed_from_u64(11))
    }

    fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    /// Samples between `from` and `to` seconds.
    fn window(samples: &[f32], from: f32, to: f32) -> &[f32] {
        let a = (from * RATE as f32) as usize;
        let b = ((to * RATE as f32) as usize).min(samples.len());
        &samples[a.min(b)..b]
    }

    #[test]
    fn every_effect_is_finite_and_bounded() {
        for e in Effect::ALL {
            let s = rendered(e);
            assert!(!s.is_empty(), "{} is empty", e.name());
            assert!(s.iter().all(|x| x.is_finite() && x.abs() <= 1.0), "{} out of range", e.name());
            assert!(rms(&s) > 0.01, "{} is silent", e.name());
        }
    }

    #[test]
    fn lengths_match_nominal_durations() {
        for e in Effect::ALL {
            let expected = (duration_of(e) * RATE as f32).round() as usize;
            let got = rendered(e).len();
            assert!(got.abs_diff(expected) <= VICTORY_SEGMENTS.len(), "{}: {got} vs {expected}", e.name());
        }
    }

    #[test]
    fn durations_fall_in_their_families() {
        assert!((0.10..=0.15).contains(&duration_of(Effect::Footstep)));
        assert!((0.10..=0.15).contains(&duration_of(Effect::FootstepCorrect)));
        assert!((0.30..=0.40).contains(&duration_of(Effect::WallCollision)));
        assert!((0.8..=1.2).contains(&duration_of(Effect::AmbientEcho)));
        assert!((1.0..=1.5).contains(&duration_of(Effect::Proximity(ProximityTier::Near))));
        assert!(duration_of(Effect::Victory) >= 2.0);
    }

    #[test]
    fn seeded_rng_is_bit_identical() {
        for e in Effect::ALL {
            let a = render(e, RATE, &mut ChaCha8Rng::seed_from_u64(3));
            let b = render(e, RATE, &mut ChaCha8Rng::seed_from_u64(3));
            assert_eq!(a, b, "{}", e.name());
        }
    }

    #[test]
    fn different_seeds_change_noise_layers() {
        let a = render(Effect::WallCollision, RATE, &mut ChaCha8Rng::seed_from_u64(1));
        let b = render(Effect::WallCollision, RATE, &mut ChaCha8Rng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn footstep_variants_are_distinguishable() {
        let normal = rendered(Effect::Footstep);
        let correct = rendered(Effect::FootstepCorrect);
        assert!(correct.len() < normal.len());
        assert_ne!(normal[..correct.len()], correct[..]);
    }

    #[test]
    fn wall_hit_is_front_loaded() {
        let s = rendered(Effect::WallCollision);
        assert!(rms(window(&s, 0.0, 0.08)) > 3.0 * rms(window(&s, 0.27, 0.35)));
    }

    #[test]
    fn echo_reflections_arrive_after_the_direct_tone() {
        // Subtract the direct tone; what remains is noise before the first
        // reflection and reflected tone after it.
        let s = rendered(Effect::AmbientEcho);
        let residual = |from: f32, to: f32| -> Vec<f32> {
            let a = (from * RATE as f32) as usize;
            let b = (to * RATE as f32) as usize;
            (a..b)
                .map(|i| s[i] - 0.5 * echo_tone(i as f32 / RATE as f32))
                .collect()
        };
        assert!(rms(&residual(0.10, 0.17)) < 0.03);
        assert!(rms(&residual(0.36, 0.40)) > 0.04);
        assert_eq!(echo_tone(-0.01), 0.0);
    }

    #[test]
    fn proximity_tiers_get_louder_when_nearer() {
        let near = rms(&rendered(Effect::Proximity(ProximityTier::Near)));
        let mid = rms(&rendered(Effect::Proximity(ProximityTier::Mid)));
        let far = rms(&rendered(Effect::Proximity(ProximityTier::Far)));
        assert!(near > mid && mid > far, "{near} {mid} {far}");
    }

    #[test]
    fn proximity_has_soft_attack() {
        let s = rendered(Effect::Proximity(ProximityTier::Near));
        assert!(rms(window(&s, 0.0, 0.01)) < rms(window(&s, 0.2, 0.3)));
    }

    #[test]
    fn victory_swells_then_fades() {
        let s = rendered(Effect::Victory);
        let total = duration_of(Effect::Victory);
        let start = rms(window(&s, 0.0, 0.02));
        let middle = rms(window(&s, 0.8, 1.2));
        let end = rms(window(&s, total - 0.05, total));
        assert!(start < middle);
        assert!(end < middle);
    }

    #[test]
    fn limit_peak_scales_only_when_needed() {
        let mut quiet = vec![0.5, -0.25];
        limit_peak(&mut quiet);
        assert_eq!(quiet, vec![0.5, -0.25]);

        let mut loud = vec![2.0, -1.0];
        limit_peak(&mut loud);
        assert!((loud[0] - PEAK_LIMIT).abs() < 1e-6);
        assert!((loud[1] + PEAK_LIMIT / 2.0).abs() < 1e-6);
    }
}
