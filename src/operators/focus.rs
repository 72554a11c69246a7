//! Focus field — pushes a morphotype along the inverted drift
//!
//! `m' = m + (−d·α)`; α > 0 strengthens the focus along `−d`, α = 1 is the
//! same as subtracting the drift.

use super::{normalize_pair, AsMorphVector};
use crate::error::Result;
use nalgebra::DVector;

/// Focus strength used when the caller does not pick one
pub const DEFAULT_ALPHA: f32 = 1.0;

/// Focus-field update: `m' = m + (−d·α)`
pub fn apply_focus_field<M, D>(m: &M, d: &D, alpha: f32) -> Result<DVector<f32>>
where
    M: AsMorphVector + ?Sized,
    D: AsMorphVector + ?Sized,
{
    let (m, d) = normalize_pair(m, d)?;
    Ok(m + (-d) * alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{apply_drift, assert_close, invert_drift};
    use proptest::prelude::*;

    #[test]
    fn test_focus_scales_inverted_drift() {
        let m = [1.0f32, 0.0, -1.0];
        let d = [0.5f32, 0.5, -0.5];
        let out = apply_focus_field(&m, &d, 2.0).unwrap();
        assert_close(&out, &[0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_focus_on_inverted_drift_equals_drift() {
        let m = [0.2f32, -0.4, 0.6];
        let d = [0.1f32, 0.1, -0.3];
        let focused = apply_focus_field(&m, &invert_drift(&d), 1.0).unwrap();
        let drifted = apply_drift(&m, &d).unwrap();
        assert_close(&focused, drifted.as_slice());
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(apply_focus_field(&[1.0f32], &[1.0f32, 1.0], DEFAULT_ALPHA).is_err());
    }

    proptest! {
        #[test]
        fn prop_alpha_zero_is_identity(
            pairs in prop::collection::vec((-1e3f32..1e3, -1e3f32..1e3), 0..64),
        ) {
            let (m, d): (Vec<f32>, Vec<f32>) = pairs.into_iter().unzip();
            let out = apply_focus_field(&m, &d, 0.0).unwrap();
            prop_assert_eq!(out.as_slice(), m.as_slice());
        }

        #[test]
        fn prop_alpha_one_subtracts_drift(
            pairs in prop::collection::vec((-1e3f32..1e3, -1e3f32..1e3), 0..64),
        ) {
            let (m, d): (Vec<f32>, Vec<f32>) = pairs.into_iter().unzip();
            let out = apply_focus_field(&m, &d, 1.0).unwrap();
            for i in 0..m.len() {
                prop_assert_eq!(out[i], m[i] - d[i]);
            }
        }
    }
}
