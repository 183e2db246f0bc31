// SPDX-License-Identifier: MPL-2.0
//! Audio cue definitions and waveform synthesis.
//!
//! Cues are short sine pulses distinguished by frequency and pulse count so
//! an operator can tell a safety alert from a machine alarm without looking
//! at the screen. Synthesis is pure and device-free; playback lives in
//! [`super::output`].

use crate::notifications::ToastKind;
use std::f32::consts::TAU;

/// Peak amplitude of synthesized cues, normalized to [-1.0, 1.0].
const CUE_AMPLITUDE: f32 = 0.25;

/// Silence between pulses (in milliseconds).
const PULSE_GAP_MS: u32 = 60;

/// A short synthesized audio cue for one toast kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    /// Tone frequency in Hz.
    frequency: f32,
    /// Number of pulses.
    pulses: u32,
    /// Length of each pulse in milliseconds.
    pulse_ms: u32,
}

impl Cue {
    /// Returns the cue profile for a toast kind.
    #[must_use]
    pub fn for_kind(kind: ToastKind) -> Self {
        match kind {
            ToastKind::Success => Self {
                frequency: 660.0,
                pulses: 1,
                pulse_ms: 120,
            },
            ToastKind::Info => Self {
                frequency: 523.0,
                pulses: 1,
                pulse_ms: 120,
            },
            ToastKind::Job => Self {
                frequency: 587.0,
                pulses: 1,
                pulse_ms: 120,
            },
            ToastKind::Warning => Self {
                frequency: 440.0,
                pulses: 2,
                pulse_ms: 140,
            },
            ToastKind::Machine => Self {
                frequency: 392.0,
                pulses: 2,
                pulse_ms: 140,
            },
            ToastKind::Error => Self {
                frequency: 330.0,
                pulses: 2,
                pulse_ms: 160,
            },
            // Triple high pulse, the most recognizable profile.
            ToastKind::Safety => Self {
                frequency: 880.0,
                pulses: 3,
                pulse_ms: 180,
            },
        }
    }

    /// Returns the tone frequency in Hz.
    #[must_use]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Returns the number of pulses.
    #[must_use]
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Synthesizes the cue as mono f32 samples at the given sample rate.
    ///
    /// Each pulse is a sine tone with a linear decay envelope, separated by
    /// short gaps of silence.
    #[must_use]
    pub fn synthesize(&self, sample_rate: u32) -> Vec<f32> {
        let pulse_len = (sample_rate as u64 * u64::from(self.pulse_ms) / 1000) as usize;
        let gap_len = (sample_rate as u64 * u64::from(PULSE_GAP_MS) / 1000) as usize;
        let mut samples =
            Vec::with_capacity(self.pulses as usize * (pulse_len + gap_len));

        for pulse in 0..self.pulses {
            for i in 0..pulse_len {
                let t = i as f32 / sample_rate as f32;
                let envelope = 1.0 - i as f32 / pulse_len as f32;
                samples.push((TAU * self.frequency * t).sin() * CUE_AMPLITUDE * envelope);
            }
            if pulse + 1 < self.pulses {
                samples.extend(std::iter::repeat_n(0.0, gap_len));
            }
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 48_000;

    #[test]
    fn single_pulse_length_matches_duration() {
        let cue = Cue::for_kind(ToastKind::Info);
        let samples = cue.synthesize(SAMPLE_RATE);
        // 120 ms at 48 kHz
        assert_eq!(samples.len(), 5760);
    }

    #[test]
    fn multi_pulse_cue_includes_gaps() {
        let cue = Cue::for_kind(ToastKind::Safety);
        let samples = cue.synthesize(SAMPLE_RATE);
        let pulse_len = (SAMPLE_RATE as usize * 180) / 1000;
        let gap_len = (SAMPLE_RATE as usize * 60) / 1000;
        assert_eq!(samples.len(), 3 * pulse_len + 2 * gap_len);
    }

    #[test]
    fn samples_stay_within_amplitude_bound() {
        for kind in [
            ToastKind::Success,
            ToastKind::Error,
            ToastKind::Warning,
            ToastKind::Info,
            ToastKind::Machine,
            ToastKind::Safety,
            ToastKind::Job,
        ] {
            for sample in Cue::for_kind(kind).synthesize(SAMPLE_RATE) {
                assert!(sample.abs() <= CUE_AMPLITUDE);
            }
        }
    }

    #[test]
    fn envelope_decays_within_each_pulse() {
        let samples = Cue::for_kind(ToastKind::Error).synthesize(SAMPLE_RATE);
        let pulse_len = (SAMPLE_RATE as usize * 160) / 1000;
        let head_peak = samples[..pulse_len / 4]
            .iter()
            .fold(0.0_f32, |max, s| max.max(s.abs()));
        let tail_peak = samples[3 * pulse_len / 4..pulse_len]
            .iter()
            .fold(0.0_f32, |max, s| max.max(s.abs()));
        assert!(tail_peak < head_peak);
    }

    #[test]
    fn safety_cue_is_the_most_insistent() {
        let safety = Cue::for_kind(ToastKind::Safety);
        for kind in [
            ToastKind::Success,
            ToastKind::Error,
            ToastKind::Warning,
            ToastKind::Info,
            ToastKind::Machine,
            ToastKind::Job,
        ] {
            let other = Cue::for_kind(kind);
            assert!(safety.pulses() >= other.pulses());
            assert!(safety.frequency() > other.frequency());
        }
    }
}
