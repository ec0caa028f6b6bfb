//! Serializable scan reports.

use lbx_core::errors::LbxError;
use lbx_core::params::{ParameterSource, ParameterTable};
use lbx_core::provenance::SchemaVersion;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::json::to_canonical_json_bytes;
use crate::process::{required_keys, FormFactorPoint, ProcessParameters};
use crate::registry::{ProcessInfo, ProcessRegistry};
use crate::scan::{evaluate_grid, Q2Grid};

/// Form factors of one process over a `q2` grid, with the inputs' fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFactorReport {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Process identifier.
    pub process: String,
    /// SHA-256 of the canonical JSON of every parameter the process reads.
    pub parameter_hash: String,
    /// Parent baryon mass.
    pub m_parent: f64,
    /// Daughter baryon mass.
    pub m_daughter: f64,
    /// Grid the points were evaluated on.
    pub grid: Q2Grid,
    /// One entry per grid value.
    pub points: Vec<FormFactorPoint>,
}

/// Evaluates `process` on `grid` and packages the result.
pub fn build_report<P>(
    registry: &ProcessRegistry,
    process: &str,
    par: &P,
    grid: &Q2Grid,
) -> Result<FormFactorReport, LbxError>
where
    P: ParameterSource + ?Sized,
{
    let params = ProcessParameters::load(registry, process, par)?;
    Ok(FormFactorReport {
        schema_version: SchemaVersion::default(),
        process: params.info.name.clone(),
        parameter_hash: parameter_hash(&params.info, par)?,
        m_parent: params.quark_model.m_parent,
        m_daughter: params.quark_model.m_daughter,
        grid: *grid,
        points: evaluate_grid(&params, grid),
    })
}

/// Hex SHA-256 of the canonical JSON of the entries `info` reads from `par`.
///
/// Keys the process does not read never affect the hash; absent keys are
/// skipped.
pub fn parameter_hash<P>(info: &ProcessInfo, par: &P) -> Result<String, LbxError>
where
    P: ParameterSource + ?Sized,
{
    let inputs: ParameterTable = required_keys(info)
        .into_iter()
        .filter_map(|key| par.value(&key).map(|value| (key, value)))
        .collect();
    let digest = Sha256::digest(to_canonical_json_bytes(&inputs)?);
    Ok(format!("{digest:x}"))
}
