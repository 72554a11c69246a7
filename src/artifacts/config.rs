//! ArtifactConfig — the structured-noise profile
//!
//! Arrives as a flat key-value bundle (JSON object). Unknown keys are ignored,
//! missing keys take their defaults, and the result is validated on load.

use crate::error::{Result, SteError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which perturbation to apply
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum NoiseMode {
    /// Gaussian noise drawn independently per element
    DistributedNoise,
    /// No mode given: pass-through
    #[default]
    Unset,
    /// Mode name we do not know: pass-through
    Unrecognized(String),
}

impl NoiseMode {
    pub const DISTRIBUTED_NOISE: &'static str = "distributed_noise";

    /// Whether this mode leaves the vector untouched
    pub fn is_passthrough(&self) -> bool {
        !matches!(self, NoiseMode::DistributedNoise)
    }
}

impl From<&str> for NoiseMode {
    fn from(name: &str) -> Self {
        match name {
            Self::DISTRIBUTED_NOISE => NoiseMode::DistributedNoise,
            other => NoiseMode::Unrecognized(other.to_string()),
        }
    }
}

impl From<Option<String>> for NoiseMode {
    fn from(name: Option<String>) -> Self {
        match name {
            Some(name) => NoiseMode::from(name.as_str()),
            None => NoiseMode::Unset,
        }
    }
}

impl From<NoiseMode> for Option<String> {
    fn from(mode: NoiseMode) -> Self {
        match mode {
            NoiseMode::DistributedNoise => Some(NoiseMode::DISTRIBUTED_NOISE.to_string()),
            NoiseMode::Unset => None,
            NoiseMode::Unrecognized(name) => Some(name),
        }
    }
}

impl FromStr for NoiseMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(NoiseMode::from(s))
    }
}

impl fmt::Display for NoiseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseMode::DistributedNoise => f.write_str(Self::DISTRIBUTED_NOISE),
            NoiseMode::Unset => f.write_str("<unset>"),
            NoiseMode::Unrecognized(name) => f.write_str(name),
        }
    }
}

/// Structured-noise profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub mode: NoiseMode,
    /// Mean of the noise distribution
    pub entropy_bias: f64,
    /// Standard deviation of the noise distribution
    pub mutation_gain: f64,
    /// Constant offset added after the noise
    pub coherence_penalty: f64,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            mode: NoiseMode::Unset,
            entropy_bias: 0.0,
            mutation_gain: 0.1,
            coherence_penalty: 0.0,
        }
    }
}

impl ArtifactConfig {
    /// Build and validate a profile
    pub fn new(
        mode: NoiseMode,
        entropy_bias: f64,
        mutation_gain: f64,
        coherence_penalty: f64,
    ) -> Result<Self> {
        let cfg = Self { mode, entropy_bias, mutation_gain, coherence_penalty };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Distributed Gaussian noise with the default gain and no offset
    pub fn distributed() -> Self {
        Self { mode: NoiseMode::DistributedNoise, ..Self::default() }
    }

    /// Profile used by the artifact demo: biased, wide noise with a small
    /// negative offset
    pub fn robustness_probe() -> Self {
        Self {
            mode: NoiseMode::DistributedNoise,
            entropy_bias: 0.12,
            mutation_gain: 0.30,
            coherence_penalty: -0.05,
        }
    }

    /// Parse a JSON bundle and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mutation_gain.is_finite() || self.mutation_gain < 0.0 {
            return Err(SteError::InvalidConfig(format!(
                "mutation_gain must be finite and >= 0, got {}",
                self.mutation_gain
            )));
        }
        if !self.entropy_bias.is_finite() {
            return Err(SteError::InvalidConfig(format!(
                "entropy_bias must be finite, got {}",
                self.entropy_bias
            )));
        }
        if !self.coherence_penalty.is_finite() {
            return Err(SteError::InvalidConfig(format!(
                "coherence_penalty must be finite, got {}",
                self.coherence_penalty
            )));
        }
        Ok(())
    }
}
