use std::borrow::Cow;

use crate::foundation::core::Canvas;
use crate::foundation::error::{BeatfxError, BeatfxResult};
use crate::foundation::math::Fnv1a64;

/// Maps a raw draw `r` in `[0, 1)` to an attribute value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldTransform {
    /// `min + r * range`.
    Affine { min: f64, range: f64 },
    /// `floor(r * categories)`, a discrete tag in `0..categories`.
    Bucket { categories: u32 },
    /// `r * canvas.width`.
    CanvasX,
    /// `r * canvas.height`.
    CanvasY,
}

impl FieldTransform {
    pub fn apply(self, r: f64, canvas: Canvas) -> f64 {
        match self {
            Self::Affine { min, range } => min + r * range,
            Self::Bucket { categories } => {
                let k = f64::from(categories);
                (r * k).floor().min((k - 1.0).max(0.0))
            }
            Self::CanvasX => r * f64::from(canvas.width),
            Self::CanvasY => r * f64::from(canvas.height),
        }
    }

    pub fn depends_on_canvas(self) -> bool {
        matches!(self, Self::CanvasX | Self::CanvasY)
    }
}

/// One named per-entity attribute and how to derive it from its seeded draw.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: Cow<'static, str>,
    pub transform: FieldTransform,
}

impl FieldSpec {
    pub const fn affine(name: &'static str, min: f64, range: f64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            transform: FieldTransform::Affine { min, range },
        }
    }

    pub const fn bucket(name: &'static str, categories: u32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            transform: FieldTransform::Bucket { categories },
        }
    }

    pub const fn canvas_x(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            transform: FieldTransform::CanvasX,
        }
    }

    pub const fn canvas_y(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            transform: FieldTransform::CanvasY,
        }
    }
}

/// Reject spec lists a generator could not honor.
pub fn validate_specs(specs: &[FieldSpec]) -> BeatfxResult<()> {
    for (i, s) in specs.iter().enumerate() {
        if s.name.is_empty() {
            return Err(BeatfxError::configuration(format!(
                "field spec #{i} has an empty name"
            )));
        }
        if specs[..i].iter().any(|p| p.name == s.name) {
            return Err(BeatfxError::configuration(format!(
                "duplicate field name \"{}\"",
                s.name
            )));
        }
        match s.transform {
            FieldTransform::Affine { min, range } if !(min.is_finite() && range.is_finite()) => {
                return Err(BeatfxError::configuration(format!(
                    "field \"{}\" has a non-finite affine transform",
                    s.name
                )));
            }
            FieldTransform::Bucket { categories: 0 } => {
                return Err(BeatfxError::configuration(format!(
                    "field \"{}\" needs at least one bucket",
                    s.name
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Stable fingerprint of a spec list, used as part of the field cache key.
pub fn specs_signature(specs: &[FieldSpec]) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(specs.len() as u64);
    for s in specs {
        h.write_str(&s.name);
        match s.transform {
            FieldTransform::Affine { min, range } => {
                h.write_u8(0);
                h.write_f64(min);
                h.write_f64(range);
            }
            FieldTransform::Bucket { categories } => {
                h.write_u8(1);
                h.write_u64(u64::from(categories));
            }
            FieldTransform::CanvasX => h.write_u8(2),
            FieldTransform::CanvasY => h.write_u8(3),
        }
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/field/spec.rs"]
mod tests;
