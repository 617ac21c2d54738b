use crate::foundation::math::{Fnv1a64, mix64, unit_f64};

/// Deterministic value in `[0, 1)` for `key`.
///
/// A pure hash of the key bytes (FNV-1a folded through a SplitMix64 finalizer): no state, no
/// dependence on call order, identical across runs and platforms. The finalizer spreads
/// single-character key differences over all output bits, so `"dots-x-3"` and `"dots-x-4"`
/// land far apart.
pub fn random(key: &str) -> f64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(key.as_bytes());
    unit_f64(mix64(h.finish()))
}

/// Composite key `"{seed}-{field}-{index}"` naming one attribute of one entity.
pub fn entity_key(seed: &str, field: &str, index: usize) -> String {
    format!("{seed}-{field}-{index}")
}

/// [`random`] of [`entity_key`].
pub fn entity_random(seed: &str, field: &str, index: usize) -> f64 {
    random(&entity_key(seed, field, index))
}

#[cfg(test)]
#[path = "../../tests/unit/field/random.rs"]
mod tests;
