//! STE — Semantic Topology Engine
//!
//! Named high-dimensional vectors ("morphotypes") deformed by a small set of
//! element-wise operators: drift, coherence, inversion, focus field and
//! structured noise.

pub mod error;
pub mod operators;
pub mod artifacts;
pub mod morphotype;
pub mod engine;

pub use error::{Result, SteError};
pub use operators::{
    apply_coherence, apply_drift, apply_focus_field, compute_drift, invert_drift, AsMorphVector,
};
pub use artifacts::{apply_artifact_noise, ArtifactConfig, NoiseMode};
pub use morphotype::{Morphotype, MorphotypeHandle};
pub use engine::{EngineConfig, SemanticTopologyEngine};
