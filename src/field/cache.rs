use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::field::generator::EntityField;
use crate::field::spec::{FieldSpec, specs_signature};
use crate::foundation::core::Canvas;

/// Upper bound on distinct configurations a single cache keeps alive.
const MAX_ENTRIES: usize = 8;

/// Identity of one generated field.
///
/// The canvas only takes part when some field is placed in absolute canvas coordinates, so
/// resizing the canvas does not regenerate purely relative fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub count: usize,
    pub seed: String,
    pub specs: u64,
    pub canvas: Option<Canvas>,
}

impl FieldKey {
    pub fn new(count: usize, seed: &str, specs: &[FieldSpec], canvas: Canvas) -> Self {
        let uses_canvas = specs.iter().any(|s| s.transform.depends_on_canvas());
        Self {
            count,
            seed: seed.to_owned(),
            specs: specs_signature(specs),
            canvas: uses_canvas.then_some(canvas),
        }
    }
}

/// Keyed memo of generated entity fields, owned by one layer.
///
/// Generation runs outside the lock. Two threads missing on the same key both generate and
/// the later insert wins; both values are bit-identical, so readers never observe a
/// difference.
#[derive(Debug, Default)]
pub struct FieldCache {
    entries: RwLock<HashMap<FieldKey, Arc<EntityField>>>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(
        &self,
        count: usize,
        seed: &str,
        specs: &[FieldSpec],
        canvas: Canvas,
    ) -> Arc<EntityField> {
        let key = FieldKey::new(count, seed, specs, canvas);
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(hit);
        }

        tracing::debug!(count, seed, "entity field cache miss");
        let field = Arc::new(EntityField::generate(count, seed, specs, canvas));

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(&key) {
            entries.clear();
        }
        entries.insert(key, Arc::clone(&field));
        field
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Clone for FieldCache {
    fn clone(&self) -> Self {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/cache.rs"]
mod tests;
