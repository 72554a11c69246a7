//! Morphotype — a named, fixed-length semantic vector
//!
//! A morphotype can be deformed by drift, relaxed by coherence, pushed by a
//! focus field, or perturbed by structured noise. Its length is fixed at
//! creation; every update must preserve it.

use crate::error::{Result, SteError};
use crate::operators::{apply_drift, AsMorphVector};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// A named high-dimensional `f32` vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Morphotype {
    pub name: String,
    vector: DVector<f32>,
}

impl Morphotype {
    pub fn new<V: AsMorphVector + ?Sized>(name: impl Into<String>, vector: &V) -> Self {
        Self {
            name: name.into(),
            vector: vector.to_morph_vector(),
        }
    }

    pub fn vector(&self) -> &DVector<f32> {
        &self.vector
    }

    /// Alias of [`Morphotype::vector`]
    pub fn morphotype(&self) -> &DVector<f32> {
        &self.vector
    }

    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// Euclidean norm of the vector
    pub fn norm(&self) -> f32 {
        self.vector.norm()
    }

    /// Generic stretch / deformation: `m ← m + d`
    pub fn stretch<D: AsMorphVector + ?Sized>(&mut self, drift: &D) -> Result<()> {
        let next = apply_drift(&self.vector, drift)?;
        self.replace_vector(next)
    }

    /// Overwrite the vector, keeping its length fixed
    pub(crate) fn replace_vector(&mut self, next: DVector<f32>) -> Result<()> {
        if next.len() != self.vector.len() {
            return Err(SteError::ShapeMismatch {
                expected: self.vector.len(),
                actual: next.len(),
            });
        }
        self.vector = next;
        Ok(())
    }
}

/// Shared handle to a morphotype owned by an engine
///
/// Clones alias the same storage, so an update made through the engine is
/// visible through every handle taken before it. Readers only ever get
/// snapshots; no lock guard leaves the handle, so a handle's own vector can be
/// passed back as an operand.
#[derive(Debug, Clone)]
pub struct MorphotypeHandle(Arc<RwLock<Morphotype>>);

impl MorphotypeHandle {
    pub fn new(morphotype: Morphotype) -> Self {
        Self(Arc::new(RwLock::new(morphotype)))
    }

    fn read(&self) -> RwLockReadGuard<'_, Morphotype> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Detached copy of the whole morphotype
    pub fn snapshot(&self) -> Morphotype {
        self.read().clone()
    }

    pub fn name(&self) -> String {
        self.read().name.clone()
    }

    /// Snapshot of the current vector
    pub fn vector(&self) -> DVector<f32> {
        self.read().vector.clone()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.read().vector.iter().copied().collect()
    }

    pub fn dim(&self) -> usize {
        self.read().dim()
    }

    pub fn stretch<D: AsMorphVector + ?Sized>(&self, drift: &D) -> Result<()> {
        self.update(|current| apply_drift(current, drift))
    }

    /// Whether both handles point at the same morphotype
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Replace the vector with `f(current)`; on error the vector is left as is
    pub(crate) fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&DVector<f32>) -> Result<DVector<f32>>,
    {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let next = f(&guard.vector)?;
        guard.replace_vector(next)
    }
}

impl From<Morphotype> for MorphotypeHandle {
    fn from(morphotype: Morphotype) -> Self {
        Self::new(morphotype)
    }
}
