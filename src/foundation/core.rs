use crate::foundation::error::{BeatfxError, BeatfxResult};

pub use kurbo::{BezPath, Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> BeatfxResult<Self> {
        if start.0 > end.0 {
            return Err(BeatfxError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Frame index relative to `start`, or `None` when `f` lies outside the range.
    pub fn local(self, f: FrameIndex) -> Option<FrameIndex> {
        self.contains(f).then(|| FrameIndex(f.0 - self.start.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> BeatfxResult<Self> {
        if den == 0 {
            return Err(BeatfxError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BeatfxError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds elapsed after `frames` frames.
    ///
    /// Multiplies before dividing so integral rates give exactly `frames / fps`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

/// Frame index paired with the rate it advances at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    pub frame: FrameIndex,
    pub fps: Fps,
}

impl FrameClock {
    pub fn new(frame: FrameIndex, fps: Fps) -> Self {
        Self { frame, fps }
    }

    pub fn time_secs(self) -> f64 {
        self.fps.frames_to_secs(self.frame.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> BeatfxResult<Self> {
        if width == 0 || height == 0 {
            return Err(BeatfxError::validation("Canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// Everything a layer needs to know about "now".
///
/// `frame` is layer-local: the composition subtracts the layer's start frame before handing
/// the context down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCtx {
    pub frame: FrameIndex,
    pub fps: Fps,
    pub canvas: Canvas,
}

impl FrameCtx {
    pub fn clock(self) -> FrameClock {
        FrameClock::new(self.frame, self.fps)
    }

    pub fn time_secs(self) -> f64 {
        self.clock().time_secs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
