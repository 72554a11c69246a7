//! Inversion — negates a drift vector: `inv(d) = −d`

use super::AsMorphVector;
use nalgebra::DVector;

/// Inverted drift `−d`
pub fn invert_drift<D: AsMorphVector + ?Sized>(d: &D) -> DVector<f32> {
    -d.to_morph_vector()
}
