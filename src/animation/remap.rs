use crate::animation::ease::Ease;
use crate::foundation::error::{BeatfxError, BeatfxResult};

/// What happens to inputs beyond the first/last breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the outermost segment linearly.
    #[default]
    Extend,
    /// Pin to the boundary output.
    Clamp,
    /// Pass the input through unchanged.
    Identity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct RemapOpts {
    #[serde(default)]
    pub left: Extrapolate,
    #[serde(default)]
    pub right: Extrapolate,
    #[serde(default)]
    pub easing: Ease,
}

impl RemapOpts {
    pub fn clamped() -> Self {
        Self {
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
            easing: Ease::Linear,
        }
    }
}

/// Piecewise-linear map through matching input/output breakpoints.
///
/// Breakpoints are validated once at construction; [`Remap::apply`] is total.
#[derive(Clone, Debug, PartialEq)]
pub struct Remap {
    input: Vec<f64>,
    output: Vec<f64>,
    opts: RemapOpts,
}

impl Remap {
    pub fn new(input: &[f64], output: &[f64], opts: RemapOpts) -> BeatfxResult<Self> {
        if input.len() < 2 {
            return Err(BeatfxError::configuration(
                "remap needs at least two breakpoints",
            ));
        }
        if input.len() != output.len() {
            return Err(BeatfxError::configuration(format!(
                "remap input/output lengths differ ({} vs {})",
                input.len(),
                output.len()
            )));
        }
        if input.iter().chain(output).any(|v| !v.is_finite()) {
            return Err(BeatfxError::configuration(
                "remap breakpoints must be finite",
            ));
        }
        if input.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BeatfxError::configuration(
                "remap input breakpoints must be strictly increasing",
            ));
        }
        Ok(Self {
            input: input.to_vec(),
            output: output.to_vec(),
            opts,
        })
    }

    pub fn apply(&self, x: f64) -> f64 {
        let n = self.input.len();
        let mut i = 1;
        while i < n - 1 && self.input[i] < x {
            i += 1;
        }
        remap_segment(
            x,
            (self.input[i - 1], self.input[i]),
            (self.output[i - 1], self.output[i]),
            self.opts,
        )
    }
}

/// Two-point remap of `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// With `clamp_left`/`clamp_right` unset the map extrapolates linearly. A descending input
/// range is flipped together with its outputs, so "left" always means the smaller input. A
/// degenerate input range maps everything to `out_min`.
pub fn remap(
    x: f64,
    (in_min, in_max): (f64, f64),
    (out_min, out_max): (f64, f64),
    clamp_left: bool,
    clamp_right: bool,
    easing: Option<Ease>,
) -> f64 {
    let side = |clamp| {
        if clamp {
            Extrapolate::Clamp
        } else {
            Extrapolate::Extend
        }
    };
    let opts = RemapOpts {
        left: side(clamp_left),
        right: side(clamp_right),
        easing: easing.unwrap_or_default(),
    };
    if in_min > in_max {
        return remap_segment(x, (in_max, in_min), (out_max, out_min), opts);
    }
    remap_segment(x, (in_min, in_max), (out_min, out_max), opts)
}

fn remap_segment(
    x: f64,
    (in_min, in_max): (f64, f64),
    (out_min, out_max): (f64, f64),
    opts: RemapOpts,
) -> f64 {
    let mut x = x;
    if x < in_min {
        match opts.left {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => x = in_min,
            Extrapolate::Extend => {}
        }
    }
    if x > in_max {
        match opts.right {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => x = in_max,
            Extrapolate::Extend => {}
        }
    }
    if out_min == out_max {
        return out_min;
    }
    let span = in_max - in_min;
    if span == 0.0 || !span.is_finite() {
        return out_min;
    }

    let t = (x - in_min) / span;
    // Easing only shapes the inside of the segment; extrapolation stays linear.
    let t = if (0.0..=1.0).contains(&t) {
        opts.easing.apply(t)
    } else {
        t
    };
    out_min + t * (out_max - out_min)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/remap.rs"]
mod tests;
