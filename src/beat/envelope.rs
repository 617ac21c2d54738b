use crate::animation::signal::{DecayCurve, linear_decay};
use crate::beat::timeline::BeatTimeline;
use crate::foundation::error::{BeatfxError, BeatfxResult};

/// Stand-in for "no beat yet": far enough back that any sane decay rate has reached zero.
pub const NO_BEAT_SENTINEL_SECS: f64 = -10.0;

/// Per-layer decay tuning: how fast intensity falls after a beat and how the fall is shaped.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BeatEnvelope {
    /// Intensity lost per second since the last beat.
    pub decay_rate: f64,
    #[serde(default)]
    pub curve: DecayCurve,
}

/// "How recently did a beat happen", computed fresh for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BeatEnvelopeSample {
    /// Last beat at or before the sample time, or [`NO_BEAT_SENTINEL_SECS`].
    pub last_beat_time: f64,
    pub time_since_beat: f64,
    /// Linear intensity `max(0, 1 - time_since_beat * decay_rate)`.
    pub intensity: f64,
    curve: DecayCurve,
}

impl BeatEnvelope {
    pub fn new(decay_rate: f64) -> BeatfxResult<Self> {
        Self::with_curve(decay_rate, DecayCurve::Linear)
    }

    pub fn with_curve(decay_rate: f64, curve: DecayCurve) -> BeatfxResult<Self> {
        let env = Self { decay_rate, curve };
        env.validate()?;
        Ok(env)
    }

    pub fn validate(&self) -> BeatfxResult<()> {
        if !self.decay_rate.is_finite() || self.decay_rate <= 0.0 {
            return Err(BeatfxError::configuration(format!(
                "decay rate must be finite and > 0, got {}",
                self.decay_rate
            )));
        }
        self.curve.validate()
    }

    pub fn sample(&self, timeline: &BeatTimeline, current_time: f64) -> BeatEnvelopeSample {
        let (last_beat_time, intensity) = match timeline.last_at_or_before(current_time) {
            Some(b) => (b, linear_decay(current_time - b, self.decay_rate)),
            None => (NO_BEAT_SENTINEL_SECS, 0.0),
        };
        let time_since_beat = current_time - last_beat_time;
        BeatEnvelopeSample {
            last_beat_time,
            time_since_beat,
            intensity,
            curve: self.curve,
        }
    }

    /// Shaped intensity in `[0, 1]` at `current_time`.
    pub fn evaluate(&self, timeline: &BeatTimeline, current_time: f64) -> f64 {
        self.sample(timeline, current_time).shaped()
    }
}

impl BeatEnvelopeSample {
    /// Intensity after the envelope's [`DecayCurve`].
    pub fn shaped(&self) -> f64 {
        self.curve.apply(self.intensity)
    }

    pub fn has_beat(&self) -> bool {
        self.last_beat_time != NO_BEAT_SENTINEL_SECS
    }
}

#[cfg(test)]
#[path = "../../tests/unit/beat/envelope.rs"]
mod tests;
