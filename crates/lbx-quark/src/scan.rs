//! Uniform `q2` grids and batch evaluation.

use lbx_core::errors::{ErrorInfo, LbxError};
use lbx_core::params::ParameterSource;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::kinematics::q2_max;
use crate::process::{FormFactorPoint, ProcessParameters};
use crate::registry::{self, ProcessRegistry};

/// Evenly spaced `q2` values between `min` and `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Q2Grid {
    /// First grid value.
    pub min: f64,
    /// Last grid value.
    pub max: f64,
    /// Number of grid values.
    pub points: usize,
}

impl Q2Grid {
    /// Creates a validated grid.
    pub fn new(min: f64, max: f64, points: usize) -> Result<Self, LbxError> {
        let invalid = |message: &str| {
            LbxError::Kinematics(
                ErrorInfo::new("lbx.invalid_grid", message)
                    .with_context("min", min.to_string())
                    .with_context("max", max.to_string())
                    .with_context("points", points.to_string()),
            )
        };
        if points == 0 {
            return Err(invalid("grid needs at least one point"));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(invalid("grid bounds must be finite"));
        }
        if max < min {
            return Err(invalid("grid upper bound below lower bound"));
        }
        Ok(Self { min, max, points })
    }

    /// Grid over the full physical region `[0, (m_parent - m_daughter)^2]`.
    pub fn physical(m_daughter: f64, m_parent: f64, points: usize) -> Result<Self, LbxError> {
        Self::new(0.0, q2_max(m_daughter, m_parent), points)
    }

    /// Grid values; a single-point grid yields `min`.
    pub fn values(&self) -> Vec<f64> {
        if self.points == 1 {
            return vec![self.min];
        }
        let step = (self.max - self.min) / (self.points - 1) as f64;
        (0..self.points)
            .map(|idx| {
                if idx + 1 == self.points {
                    self.max
                } else {
                    self.min + step * idx as f64
                }
            })
            .collect()
    }
}

/// Evaluates a builtin process on every grid value, loading parameters once.
pub fn scan<P>(process: &str, par: &P, grid: &Q2Grid) -> Result<Vec<FormFactorPoint>, LbxError>
where
    P: ParameterSource + ?Sized,
{
    scan_in(registry::global(), process, par, grid)
}

/// Same as [`scan`] with an explicit registry.
pub fn scan_in<P>(
    registry: &ProcessRegistry,
    process: &str,
    par: &P,
    grid: &Q2Grid,
) -> Result<Vec<FormFactorPoint>, LbxError>
where
    P: ParameterSource + ?Sized,
{
    let params = ProcessParameters::load(registry, process, par)?;
    debug!(
        "scanning {process} over {} points in [{}, {}]",
        grid.points, grid.min, grid.max
    );
    Ok(evaluate_grid(&params, grid))
}

/// Evaluates preloaded parameters on every grid value.
pub fn evaluate_grid(params: &ProcessParameters, grid: &Q2Grid) -> Vec<FormFactorPoint> {
    grid.values()
        .into_iter()
        .map(|q2| {
            trace!("{}: q2={q2}", params.info.name);
            params.evaluate(q2)
        })
        .collect()
}
