//! Coherence relaxation — pulls a morphotype back against a drift
//!
//! `m' = m − λ·d`, with λ in `[0, ∞)`; typical values sit around 0.05–0.3.

use super::{normalize_pair, AsMorphVector};
use crate::error::Result;
use nalgebra::DVector;

/// Coherence factor used when the caller does not pick one
pub const DEFAULT_LAMBDA: f32 = 0.1;

/// Coherence relaxation: `m' = m − λ·d`
pub fn apply_coherence<M, D>(m: &M, d: &D, lam: f32) -> Result<DVector<f32>>
where
    M: AsMorphVector + ?Sized,
    D: AsMorphVector + ?Sized,
{
    let (m, d) = normalize_pair(m, d)?;
    Ok(m - d * lam)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::assert_close;
    use proptest::prelude::*;

    #[test]
    fn test_coherence_moves_against_drift() {
        let m = [1.0f32, 2.0, 3.0];
        let d = [0.5f32, -0.5, 1.0];
        let out = apply_coherence(&m, &d, 0.2).unwrap();
        assert_close(&out, &[0.9, 2.1, 2.8]);
    }

    #[test]
    fn test_default_lambda() {
        let out = apply_coherence(&[0.0f32, 0.0], &[1.0f32, -2.0], DEFAULT_LAMBDA).unwrap();
        assert_close(&out, &[-0.1, 0.2]);
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(apply_coherence(&[1.0f32, 2.0, 3.0], &[1.0f32], 0.5).is_err());
    }

    proptest! {
        #[test]
        fn prop_zero_lambda_is_identity(
            pairs in prop::collection::vec((-1e3f32..1e3, -1e3f32..1e3), 0..64),
        ) {
            let (m, d): (Vec<f32>, Vec<f32>) = pairs.into_iter().unzip();
            let out = apply_coherence(&m, &d, 0.0).unwrap();
            prop_assert_eq!(out.as_slice(), m.as_slice());
        }
    }
}
