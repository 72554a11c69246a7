//! Vector operators — pure transformations over morphotype vectors
//!
//! Every operator normalises its inputs to `f32` and returns a fresh vector;
//! inputs are never mutated. Binary operators require operands of equal length.

mod drift;
mod coherence;
mod inversion;
mod focus;

pub use drift::{apply_drift, compute_drift};
pub use coherence::{apply_coherence, DEFAULT_LAMBDA};
pub use inversion::invert_drift;
pub use focus::{apply_focus_field, DEFAULT_ALPHA};

use crate::error::{Result, SteError};
use nalgebra::DVector;

/// Any real-numbered array-like value that can be read as a morphotype vector
pub trait AsMorphVector {
    /// Copy the values into a fresh `f32` vector
    fn to_morph_vector(&self) -> DVector<f32>;

    /// Number of elements
    fn morph_len(&self) -> usize;
}

impl<T: AsMorphVector + ?Sized> AsMorphVector for &T {
    fn to_morph_vector(&self) -> DVector<f32> {
        (**self).to_morph_vector()
    }

    fn morph_len(&self) -> usize {
        (**self).morph_len()
    }
}

macro_rules! impl_as_morph_vector {
    ($($t:ty),*) => {$(
        impl AsMorphVector for [$t] {
            fn to_morph_vector(&self) -> DVector<f32> {
                DVector::from_iterator(self.len(), self.iter().map(|&x| x as f32))
            }

            fn morph_len(&self) -> usize {
                self.len()
            }
        }

        impl<const N: usize> AsMorphVector for [$t; N] {
            fn to_morph_vector(&self) -> DVector<f32> {
                self.as_slice().to_morph_vector()
            }

            fn morph_len(&self) -> usize {
                N
            }
        }

        impl AsMorphVector for Vec<$t> {
            fn to_morph_vector(&self) -> DVector<f32> {
                self.as_slice().to_morph_vector()
            }

            fn morph_len(&self) -> usize {
                self.len()
            }
        }

        impl AsMorphVector for DVector<$t> {
            fn to_morph_vector(&self) -> DVector<f32> {
                DVector::from_iterator(self.len(), self.iter().map(|&x| x as f32))
            }

            fn morph_len(&self) -> usize {
                self.len()
            }
        }
    )*};
}

impl_as_morph_vector!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

/// Normalise both operands and reject differing lengths
pub(crate) fn normalize_pair<A, B>(a: &A, b: &B) -> Result<(DVector<f32>, DVector<f32>)>
where
    A: AsMorphVector + ?Sized,
    B: AsMorphVector + ?Sized,
{
    let (expected, actual) = (a.morph_len(), b.morph_len());
    if expected != actual {
        return Err(SteError::ShapeMismatch { expected, actual });
    }
    Ok((a.to_morph_vector(), b.to_morph_vector()))
}

#[cfg(test)]
pub(crate) fn assert_close(actual: &DVector<f32>, expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "length differs");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!((a - e).abs() < 1e-6, "element {}: {} != {}", i, a, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_every_numeric_form() {
        let expected = [1.0f32, -2.0, 3.0];
        assert_close(&[1.0f64, -2.0, 3.0].to_morph_vector(), &expected);
        assert_close(&vec![1i32, -2, 3].to_morph_vector(), &expected);
        assert_close(&[1i64, -2, 3][..].to_morph_vector(), &expected);
        assert_close(&DVector::from_vec(vec![1.0f64, -2.0, 3.0]).to_morph_vector(), &expected);
        assert_close(&[1u8, 2, 3].to_morph_vector(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_f64_is_rounded_to_f32() {
        let v = [0.1f64].to_morph_vector();
        assert_eq!(v[0], 0.1f32);
    }

    #[test]
    fn test_normalize_pair_rejects_mismatch() {
        let err = normalize_pair(&[1.0f32, 2.0], &[1.0f32, 2.0, 3.0]).unwrap_err();
        match err {
            SteError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_vectors_are_compatible() {
        let empty: Vec<f32> = Vec::new();
        let (a, b) = normalize_pair(&empty, &empty).unwrap();
        assert!(a.is_empty() && b.is_empty());
    }
}
