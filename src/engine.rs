//! SemanticTopologyEngine — registry of morphotypes and operator dispatch
//!
//! The engine owns every morphotype it registers and hands out shared
//! handles. Operator methods rewrite the handle's vector in place; they act on
//! whatever handle they are given, registered or not. Only `lookup` checks
//! membership.

use crate::artifacts::{apply_artifact_noise, ArtifactConfig};
use crate::error::{Result, SteError};
use crate::morphotype::{Morphotype, MorphotypeHandle};
use crate::operators::{
    apply_coherence, apply_drift, apply_focus_field, compute_drift, invert_drift, AsMorphVector,
};
use log::{debug, info};
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of auto-generated morphotypes
    pub dim: usize,
    /// Standard deviation of auto-generated morphotypes
    pub init_scale: f32,
    /// Seed for the engine's generator; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Reject explicit vectors whose length differs from `dim`
    pub strict_dimensions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dim: 32,
            init_scale: 0.1,
            seed: None,
            strict_dimensions: false,
        }
    }
}

impl EngineConfig {
    pub fn with_dim(dim: usize) -> Self {
        Self { dim, ..Self::default() }
    }

    /// Deterministic engine: fixed dimension and seed
    pub fn seeded(dim: usize, seed: u64) -> Self {
        Self { dim, seed: Some(seed), ..Self::default() }
    }

    /// Reject explicit vectors that do not match `dim`
    pub fn strict(dim: usize) -> Self {
        Self { dim, strict_dimensions: true, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.init_scale.is_finite() || self.init_scale < 0.0 {
            return Err(SteError::InvalidConfig(format!(
                "init_scale must be finite and >= 0, got {}",
                self.init_scale
            )));
        }
        Ok(())
    }
}

/// Registry of named morphotypes
#[derive(Debug)]
pub struct SemanticTopologyEngine {
    config: EngineConfig,
    store: HashMap<String, MorphotypeHandle>,
    rng: StdRng,
}

impl Default for SemanticTopologyEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default().dim)
    }
}

impl SemanticTopologyEngine {
    /// Create an empty engine of the given dimension, seeded from OS entropy
    pub fn new(dim: usize) -> Self {
        Self {
            config: EngineConfig::with_dim(dim),
            store: HashMap::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an empty engine whose random draws are reproducible
    pub fn with_seed(dim: usize, seed: u64) -> Self {
        Self {
            config: EngineConfig::seeded(dim, seed),
            store: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, store: HashMap::new(), rng })
    }

    pub fn dim(&self) -> usize {
        self.config.dim
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- registry ----

    /// Register a freshly sampled morphotype of length `dim`
    ///
    /// Values are drawn from `N(0, 1) · init_scale`. An existing entry with the
    /// same name is replaced.
    pub fn register(&mut self, name: impl Into<String>) -> MorphotypeHandle {
        let scale = self.config.init_scale;
        let rng = &mut self.rng;
        let init = DVector::from_fn(self.config.dim, |_, _| {
            rng.sample::<f32, _>(StandardNormal) * scale
        });
        self.insert(Morphotype::new(name, &init))
    }

    /// Register a morphotype with an explicit initial vector
    ///
    /// The vector's own length is kept; in strict mode it must equal `dim`.
    /// An existing entry with the same name is replaced.
    pub fn register_with<V>(&mut self, name: impl Into<String>, init: &V) -> Result<MorphotypeHandle>
    where
        V: AsMorphVector + ?Sized,
    {
        let name = name.into();
        if self.config.strict_dimensions && init.morph_len() != self.config.dim {
            return Err(SteError::DimensionMismatch {
                name,
                expected: self.config.dim,
                actual: init.morph_len(),
            });
        }
        Ok(self.insert(Morphotype::new(name, init)))
    }

    fn insert(&mut self, morphotype: Morphotype) -> MorphotypeHandle {
        let name = morphotype.name.clone();
        info!("Registered morphotype '{}' (dim={})", name, morphotype.dim());
        let handle = MorphotypeHandle::new(morphotype);
        if self.store.insert(name.clone(), handle.clone()).is_some() {
            debug!("Replaced existing morphotype '{}'", name);
        }
        handle
    }

    /// Look up a registered morphotype
    pub fn lookup(&self, name: &str) -> Result<MorphotypeHandle> {
        self.get(name).ok_or_else(|| SteError::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<MorphotypeHandle> {
        self.store.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Drop a morphotype from the registry
    ///
    /// Outstanding handles stay usable but are no longer reachable by name.
    pub fn remove(&mut self, name: &str) -> Result<MorphotypeHandle> {
        let handle = self
            .store
            .remove(name)
            .ok_or_else(|| SteError::NotFound(name.to_string()))?;
        info!("Removed morphotype '{}'", name);
        Ok(handle)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.store.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // ---- operators ----

    /// `m ← m + d`
    pub fn drift<D>(&self, m: &MorphotypeHandle, drift_vec: &D) -> Result<()>
    where
        D: AsMorphVector + ?Sized,
    {
        debug!("drift on '{}'", m.name());
        m.update(|current| apply_drift(current, drift_vec))
    }

    /// Drift that carries `from` onto `to`
    pub fn drift_between<A, B>(&self, from: &A, to: &B) -> Result<DVector<f32>>
    where
        A: AsMorphVector + ?Sized,
        B: AsMorphVector + ?Sized,
    {
        compute_drift(from, to)
    }

    /// `m ← m − λ·d`
    pub fn coherence<D>(&self, m: &MorphotypeHandle, drift_vec: &D, lam: f32) -> Result<()>
    where
        D: AsMorphVector + ?Sized,
    {
        debug!("coherence on '{}' (lambda={})", m.name(), lam);
        m.update(|current| apply_coherence(current, drift_vec, lam))
    }

    /// `−d`; touches no morphotype
    pub fn invert<D>(&self, drift_vec: &D) -> DVector<f32>
    where
        D: AsMorphVector + ?Sized,
    {
        invert_drift(drift_vec)
    }

    /// `m ← m + (−d·α)`
    pub fn focus<D>(&self, m: &MorphotypeHandle, drift_vec: &D, alpha: f32) -> Result<()>
    where
        D: AsMorphVector + ?Sized,
    {
        debug!("focus on '{}' (alpha={})", m.name(), alpha);
        m.update(|current| apply_focus_field(current, drift_vec, alpha))
    }

    /// Perturb `m` with structured noise drawn from the engine's generator
    pub fn artifacts(&mut self, m: &MorphotypeHandle, cfg: &ArtifactConfig) -> Result<()> {
        let rng = &mut self.rng;
        debug!("artifacts on '{}' (mode={})", m.name(), cfg.mode);
        m.update(|current| apply_artifact_noise(current, cfg, rng))
    }

    /// Perturb `m` with structured noise drawn from `rng`
    pub fn artifacts_with_rng<R>(&self, m: &MorphotypeHandle, cfg: &ArtifactConfig, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        debug!("artifacts on '{}' (mode={})", m.name(), cfg.mode);
        m.update(|current| apply_artifact_noise(current, cfg, rng))
    }

    // ---- inspection ----

    /// Snapshot of every registered vector, keyed by name
    pub fn summary(&self) -> BTreeMap<String, Vec<f32>> {
        self.store
            .iter()
            .map(|(name, handle)| (name.clone(), handle.to_vec()))
            .collect()
    }

    /// [`summary`](Self::summary) rendered as pretty JSON
    pub fn summary_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }
}
