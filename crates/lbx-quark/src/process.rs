//! Load-once parameter record for a single process.

use lbx_core::errors::LbxError;
use lbx_core::params::ParameterSource;
use serde::{Deserialize, Serialize};

use crate::equiv::{to_equivalent, EquivalentFormFactors, UncertaintyScales};
use crate::model::{QuarkModelOutput, QuarkModelParameters};
use crate::registry::{ProcessInfo, ProcessRegistry};

/// Both form factor sets evaluated at one `q2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormFactorPoint {
    /// Momentum transfer.
    pub q2: f64,
    /// Quark-model form factors and masses.
    pub quark_model: QuarkModelOutput,
    /// Scaled equivalent-basis form factors.
    pub equivalent: EquivalentFormFactors,
}

/// Every parameter the two evaluation stages of a process read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    /// Registry record of the process.
    pub info: ProcessInfo,
    /// Masses, quark-model constants and shape coefficients.
    pub quark_model: QuarkModelParameters,
    /// Equivalent-basis uncertainty multipliers.
    pub uncertainties: UncertaintyScales,
}

impl ProcessParameters {
    /// Resolves `process` and reads all its parameters, stopping at the first missing key.
    pub fn load<P>(registry: &ProcessRegistry, process: &str, par: &P) -> Result<Self, LbxError>
    where
        P: ParameterSource + ?Sized,
    {
        let info = registry.lookup(process)?.clone();
        let quark_model = QuarkModelParameters::load(&info, par)?;
        let uncertainties = UncertaintyScales::load(&info, par)?;
        Ok(Self {
            info,
            quark_model,
            uncertainties,
        })
    }

    /// Evaluates both form factor sets at `q2`.
    pub fn evaluate(&self, q2: f64) -> FormFactorPoint {
        let quark_model = self.quark_model.evaluate(q2);
        let equivalent = to_equivalent(&quark_model, q2, &self.uncertainties);
        FormFactorPoint {
            q2,
            quark_model,
            equivalent,
        }
    }
}

/// All keys the process reads, quark-model inputs first, in lookup order.
pub fn required_keys(info: &ProcessInfo) -> Vec<String> {
    let mut keys = QuarkModelParameters::required_keys(info);
    keys.extend(UncertaintyScales::required_keys(info));
    keys
}
