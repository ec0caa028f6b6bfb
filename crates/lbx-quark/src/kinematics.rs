//! Kinematic helpers for a two-body baryon transition.
//!
//! All masses are in GeV and `q2` in GeV². The helpers perform no validation:
//! outside the physical region `daughter_momentum` returns NaN. Use
//! [`check_physical_q2`] when a hard failure is preferable.

use lbx_core::errors::{ErrorInfo, LbxError};

/// Magnitude of the daughter baryon three-momentum in the parent rest frame.
pub fn daughter_momentum(q2: f64, m_daughter: f64, m_parent: f64) -> f64 {
    let s = q2 / m_parent.powi(2);
    let r = (m_daughter / m_parent).powi(2);
    m_parent / 2.0 * ((1.0 - r).powi(2) - 2.0 * (1.0 + r) * s + s.powi(2)).sqrt()
}

/// Model mass of the daughter baryon built from constituent quark masses.
pub fn effective_daughter_mass(m_q: f64, m_s: f64) -> f64 {
    2.0 * m_q + m_s
}

/// Root-mean-square combination of two harmonic oscillator parameters.
pub fn combined_oscillator_parameter(alpha_1: f64, alpha_2: f64) -> f64 {
    ((alpha_1.powi(2) + alpha_2.powi(2)) / 2.0).sqrt()
}

/// Zero-recoil endpoint `(m_parent - m_daughter)^2`.
pub fn q2_max(m_daughter: f64, m_parent: f64) -> f64 {
    (m_parent - m_daughter).powi(2)
}

/// Rejects `q2` values outside `[0, q2_max]`.
pub fn check_physical_q2(q2: f64, m_daughter: f64, m_parent: f64) -> Result<(), LbxError> {
    let max = q2_max(m_daughter, m_parent);
    if q2.is_finite() && (0.0..=max).contains(&q2) {
        return Ok(());
    }
    Err(LbxError::Kinematics(
        ErrorInfo::new("lbx.unphysical_q2", "q2 outside the physical region")
            .with_context("q2", q2.to_string())
            .with_context("q2_max", max.to_string())
            .with_hint("restrict q2 to [0, (m_parent - m_daughter)^2]"),
    ))
}
