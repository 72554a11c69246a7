//! Artifacts — structured noise injected into morphotypes
//!
//! The only operator with a side effect: it consumes entropy from whatever
//! generator the caller hands it.

mod config;
mod noise;

pub use config::{ArtifactConfig, NoiseMode};
pub use noise::{apply_artifact_noise, apply_artifact_noise_thread_rng};
