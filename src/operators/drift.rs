//! Drift — directed displacement between morphotype states
//!
//! A drift `d = m(t+1) − m(t)` moves a morphotype: `m' = m + d`.

use super::{normalize_pair, AsMorphVector};
use crate::error::Result;
use nalgebra::DVector;

/// Apply a drift to a morphotype: `m' = m + d`
pub fn apply_drift<M, D>(m: &M, d: &D) -> Result<DVector<f32>>
where
    M: AsMorphVector + ?Sized,
    D: AsMorphVector + ?Sized,
{
    let (m, d) = normalize_pair(m, d)?;
    Ok(m + d)
}

/// Drift between two states of the same morphotype: `d = m_t1 − m_t`
pub fn compute_drift<A, B>(m_t: &A, m_t1: &B) -> Result<DVector<f32>>
where
    A: AsMorphVector + ?Sized,
    B: AsMorphVector + ?Sized,
{
    let (m_t, m_t1) = normalize_pair(m_t, m_t1)?;
    Ok(m_t1 - m_t)
}
