//! Reusable signal math shared by every layer: harmonic sums, decay curves and beat boosts.

use crate::foundation::error::{BeatfxError, BeatfxResult};

/// Periodic shape of a single harmonic term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave {
    /// `sin(x)` in `[-1, 1]`.
    Sine,
    /// `cos(x)` in `[-1, 1]`.
    Cosine,
    /// `0.5 + 0.5 * sin(x)` in `[0, 1]`.
    UnipolarSine,
}

impl Wave {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Self::Sine => x.sin(),
            Self::Cosine => x.cos(),
            Self::UnipolarSine => 0.5 + 0.5 * x.sin(),
        }
    }
}

/// One weighted term of a multi-harmonic oscillator.
///
/// Evaluates `amp * wave(freq * t + phase + spatial * theta)`. `theta` lets a caller spread the
/// same harmonic around a circle (or along any index axis); time-only callers pass `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Harmonic {
    pub amp: f64,
    pub freq: f64,
    pub phase: f64,
    #[serde(default)]
    pub spatial: f64,
    pub wave: Wave,
}

impl Harmonic {
    pub fn new(wave: Wave, amp: f64, freq: f64, phase: f64) -> Self {
        Self {
            amp,
            freq,
            phase,
            spatial: 0.0,
            wave,
        }
    }

    pub fn with_spatial(mut self, spatial: f64) -> Self {
        self.spatial = spatial;
        self
    }

    pub fn value(&self, t: f64, theta: f64) -> f64 {
        self.amp * self.wave.eval(self.freq * t + self.phase + self.spatial * theta)
    }
}

/// `Σ_k harmonic_k(t, theta)`; an empty slice sums to `0.0`.
pub fn harmonic_sum(harmonics: &[Harmonic], t: f64, theta: f64) -> f64 {
    harmonics.iter().map(|h| h.value(t, theta)).sum()
}

/// How a raw linear beat intensity is reshaped before use.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(tag = "curve", content = "exponent", rename_all = "snake_case")]
pub enum DecayCurve {
    #[default]
    Linear,
    /// `intensity^exponent`; exponents below 1 hold the peak longer before dropping.
    Power(f64),
}

impl DecayCurve {
    pub fn validate(self) -> BeatfxResult<()> {
        match self {
            Self::Linear => Ok(()),
            Self::Power(p) if p.is_finite() && p > 0.0 => Ok(()),
            Self::Power(p) => Err(BeatfxError::configuration(format!(
                "decay curve exponent must be finite and > 0, got {p}"
            ))),
        }
    }

    /// Apply to an intensity, clamping into `[0, 1]` first so fractional powers stay real.
    pub fn apply(self, intensity: f64) -> f64 {
        let i = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        match self {
            Self::Linear => i,
            Self::Power(p) => i.powf(p),
        }
    }
}

/// `max(0, 1 - dt * rate)`: full intensity on the beat, reaching zero after `1 / rate` seconds.
pub fn linear_decay(dt: f64, rate: f64) -> f64 {
    let v = 1.0 - dt.max(0.0) * rate;
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Beat intensity multiplicatively amplifies a baseline signal: `base * (1 + intensity * factor)`.
pub fn boost(base: f64, intensity: f64, factor: f64) -> f64 {
    base * (1.0 + intensity * factor)
}

/// [`boost`] capped at `max`.
pub fn boost_capped(base: f64, intensity: f64, factor: f64, max: f64) -> f64 {
    boost(base, intensity, factor).min(max)
}

/// `base + intensity * span`: the additive flavour used for opacities and glow radii.
pub fn lift(base: f64, intensity: f64, span: f64) -> f64 {
    base + intensity * span
}

#[cfg(test)]
#[path = "../../tests/unit/animation/signal.rs"]
mod tests;
