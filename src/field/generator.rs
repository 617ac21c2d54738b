use std::borrow::Cow;

use crate::field::random::entity_random;
use crate::field::spec::{FieldSpec, validate_specs};
use crate::foundation::core::Canvas;
use crate::foundation::error::{BeatfxError, BeatfxResult};

const LARGE_FIELD_WARN: usize = 100_000;

/// Ordered, index-addressed attribute table: one row per entity, one column per field.
///
/// Row order is the iteration order consumers render in.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EntityField {
    names: Vec<Cow<'static, str>>,
    values: Vec<f64>, // row-major, len == count * names.len()
    count: usize,
}

/// Borrowed view of one entity's attributes.
#[derive(Clone, Copy, Debug)]
pub struct EntityRow<'a> {
    pub index: usize,
    field: &'a EntityField,
}

impl EntityField {
    /// Draw `count` entities, each attribute from `seeded_random("{seed}-{field}-{i}")`.
    #[tracing::instrument(level = "debug", skip(specs))]
    pub fn generate(count: usize, seed: &str, specs: &[FieldSpec], canvas: Canvas) -> Self {
        if count >= LARGE_FIELD_WARN {
            tracing::warn!(count, seed, "generating an unusually large entity field");
        }
        let mut values = Vec::with_capacity(count * specs.len());
        for i in 0..count {
            for spec in specs {
                let r = entity_random(seed, &spec.name, i);
                values.push(spec.transform.apply(r, canvas));
            }
        }
        Self {
            names: specs.iter().map(|s| s.name.clone()).collect(),
            values,
            count,
        }
    }

    /// Build a field from explicit rows, for callers that want hand-picked attributes.
    pub fn from_rows(specs: &[FieldSpec], rows: Vec<Vec<f64>>) -> BeatfxResult<Self> {
        validate_specs(specs)?;
        let width = specs.len();
        let count = rows.len();
        let mut values = Vec::with_capacity(count * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(BeatfxError::configuration(format!(
                    "entity row #{i} has {} values, expected {width}",
                    row.len()
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(BeatfxError::configuration(format!(
                    "entity row #{i} contains a non-finite value"
                )));
            }
            values.extend(row);
        }
        Ok(Self {
            names: specs.iter().map(|s| s.name.clone()).collect(),
            values,
            count,
        })
    }

    pub fn empty(specs: &[FieldSpec]) -> Self {
        Self {
            names: specs.iter().map(|s| s.name.clone()).collect(),
            values: Vec::new(),
            count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }

    /// True when the columns are exactly `specs`' names, in order.
    pub fn has_columns(&self, specs: &[FieldSpec]) -> bool {
        self.names.len() == specs.len() && self.names.iter().zip(specs).all(|(n, s)| *n == s.name)
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Value of column `col` for entity `index`. Out-of-range lookups read as `0.0`.
    pub fn at(&self, index: usize, col: usize) -> f64 {
        if index >= self.count || col >= self.names.len() {
            return 0.0;
        }
        self.values[index * self.names.len() + col]
    }

    pub fn row(&self, index: usize) -> Option<EntityRow<'_>> {
        (index < self.count).then_some(EntityRow { index, field: self })
    }

    pub fn rows(&self) -> impl Iterator<Item = EntityRow<'_>> {
        (0..self.count).map(move |index| EntityRow { index, field: self })
    }
}

impl EntityRow<'_> {
    pub fn at(&self, col: usize) -> f64 {
        self.field.at(self.index, col)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.field.column(name).map(|c| self.at(c))
    }
}

/// Stateless front door matching the generator contract:
/// `generate(count, seed, field_specs, canvas) -> EntityField`.
pub fn generate(count: usize, seed: &str, specs: &[FieldSpec], canvas: Canvas) -> EntityField {
    EntityField::generate(count, seed, specs, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/field/generator.rs"]
mod tests;
