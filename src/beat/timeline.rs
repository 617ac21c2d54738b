use crate::foundation::error::{BeatfxError, BeatfxResult};

/// Immutable, ascending list of musical onsets in seconds.
///
/// Dense beat lists and sparse downbeat lists share this one type. Duplicates are allowed;
/// negative, non-finite or descending timestamps are rejected at construction.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct BeatTimeline {
    beats: Vec<f64>,
}

impl BeatTimeline {
    pub fn new(beats: Vec<f64>) -> BeatfxResult<Self> {
        for (i, &b) in beats.iter().enumerate() {
            if !b.is_finite() || b < 0.0 {
                return Err(BeatfxError::configuration(format!(
                    "beat timestamp #{i} must be finite and >= 0, got {b}"
                )));
            }
        }
        if let Some(i) = beats.windows(2).position(|w| w[1] < w[0]) {
            return Err(BeatfxError::configuration(format!(
                "beat timeline must be sorted ascending (#{} = {} after {})",
                i + 1,
                beats[i + 1],
                beats[i]
            )));
        }
        Ok(Self { beats })
    }

    /// Sort first, then validate. For callers holding onsets in arbitrary order.
    pub fn from_unsorted(mut beats: Vec<f64>) -> BeatfxResult<Self> {
        beats.sort_by(f64::total_cmp);
        Self::new(beats)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.beats
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Greatest timestamp `<= t`, if any beat has happened yet.
    pub fn last_at_or_before(&self, t: f64) -> Option<f64> {
        let n = self.beats.partition_point(|&b| b <= t);
        n.checked_sub(1).map(|i| self.beats[i])
    }
}

impl<'de> serde::Deserialize<'de> for BeatTimeline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let beats = Vec::<f64>::deserialize(deserializer)?;
        Self::new(beats).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/beat/timeline.rs"]
mod tests;
