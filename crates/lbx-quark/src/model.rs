//! Quark-model (MCN) form factors.
//!
//! Every form factor shares the harmonic-oscillator ansatz
//!
//! ```text
//! F(p) = (a0 + a2 p^2 + a4 p^4) * exp(-3 (m_q p)^2 / (2 (m_eff alpha)^2))
//! ```
//!
//! where `p` is the daughter momentum in the parent rest frame, `m_eff` the model
//! daughter mass `2 m_q + m_s` and `alpha` the RMS of the parent and daughter
//! oscillator parameters. Experimental masses are used for the kinematics; the
//! difference to the model masses is part of the theory uncertainty.

use std::collections::BTreeMap;

use lbx_core::errors::LbxError;
use lbx_core::params::ParameterSource;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::kinematics::{combined_oscillator_parameter, daughter_momentum, effective_daughter_mass};
use crate::registry::{self, ProcessInfo, ProcessRegistry};

/// Names of the quark-model form factors in canonical order.
pub const QUARK_MODEL_FORM_FACTORS: [&str; 14] = [
    "F1", "F2", "F3", "F4", "G1", "G2", "G3", "G4", "H1", "H2", "H3", "H4", "H5", "H6",
];

/// Evaluates the polynomial-times-Gaussian ansatz for one form factor.
///
/// `m_eff * alpha` must be nonzero; a zero product yields a non-finite result.
pub fn quark_model_form_factor(
    a0: f64,
    a2: f64,
    a4: f64,
    p: f64,
    m_q: f64,
    m_eff: f64,
    alpha: f64,
) -> f64 {
    (a0 + a2 * p.powi(2) + a4 * p.powi(4))
        * (-3.0 * (m_q * p).powi(2) / (2.0 * (m_eff * alpha).powi(2))).exp()
}

/// The 14 vector (`F`), axial (`G`) and tensor (`H`) quark-model form factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct QuarkModelFormFactors {
    #[serde(rename = "F1", with = "crate::json::form_factor")]
    pub f1: f64,
    #[serde(rename = "F2", with = "crate::json::form_factor")]
    pub f2: f64,
    #[serde(rename = "F3", with = "crate::json::form_factor")]
    pub f3: f64,
    #[serde(rename = "F4", with = "crate::json::form_factor")]
    pub f4: f64,
    #[serde(rename = "G1", with = "crate::json::form_factor")]
    pub g1: f64,
    #[serde(rename = "G2", with = "crate::json::form_factor")]
    pub g2: f64,
    #[serde(rename = "G3", with = "crate::json::form_factor")]
    pub g3: f64,
    #[serde(rename = "G4", with = "crate::json::form_factor")]
    pub g4: f64,
    #[serde(rename = "H1", with = "crate::json::form_factor")]
    pub h1: f64,
    #[serde(rename = "H2", with = "crate::json::form_factor")]
    pub h2: f64,
    #[serde(rename = "H3", with = "crate::json::form_factor")]
    pub h3: f64,
    #[serde(rename = "H4", with = "crate::json::form_factor")]
    pub h4: f64,
    #[serde(rename = "H5", with = "crate::json::form_factor")]
    pub h5: f64,
    #[serde(rename = "H6", with = "crate::json::form_factor")]
    pub h6: f64,
}

impl QuarkModelFormFactors {
    /// Builds the set from values ordered as [`QUARK_MODEL_FORM_FACTORS`].
    pub fn from_values(v: [f64; 14]) -> Self {
        Self {
            f1: v[0],
            f2: v[1],
            f3: v[2],
            f4: v[3],
            g1: v[4],
            g2: v[5],
            g3: v[6],
            g4: v[7],
            h1: v[8],
            h2: v[9],
            h3: v[10],
            h4: v[11],
            h5: v[12],
            h6: v[13],
        }
    }

    /// Values ordered as [`QUARK_MODEL_FORM_FACTORS`].
    pub fn values(&self) -> [f64; 14] {
        [
            self.f1, self.f2, self.f3, self.f4, self.g1, self.g2, self.g3, self.g4, self.h1,
            self.h2, self.h3, self.h4, self.h5, self.h6,
        ]
    }

    /// Looks up a form factor by name (`"F1"`, ..., `"H6"`).
    pub fn get(&self, name: &str) -> Option<f64> {
        QUARK_MODEL_FORM_FACTORS
            .iter()
            .position(|candidate| *candidate == name)
            .map(|idx| self.values()[idx])
    }

    /// `(name, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        QUARK_MODEL_FORM_FACTORS.into_iter().zip(self.values())
    }

    /// String keyed view with exactly the 14 form factor names.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect()
    }
}

/// Quark-model form factors together with the masses used to compute them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarkModelOutput {
    /// Evaluated form factors.
    pub form_factors: QuarkModelFormFactors,
    /// Daughter baryon mass.
    pub m_daughter: f64,
    /// Parent baryon mass.
    pub m_parent: f64,
}

/// Polynomial coefficients of one form factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeCoefficients {
    /// Constant term.
    pub a0: f64,
    /// Coefficient of `p^2`.
    pub a2: f64,
    /// Coefficient of `p^4`.
    pub a4: f64,
}

/// Every quark-model input of one process, read once from a parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarkModelParameters {
    /// Parent baryon mass.
    pub m_parent: f64,
    /// Daughter baryon mass.
    pub m_daughter: f64,
    /// Light constituent quark mass.
    pub m_q: f64,
    /// Strange constituent quark mass.
    pub m_s: f64,
    /// Oscillator parameter of the parent wavefunction.
    pub alpha_parent: f64,
    /// Oscillator parameter of the daughter wavefunction.
    pub alpha_daughter: f64,
    /// Shape coefficients ordered as [`QUARK_MODEL_FORM_FACTORS`].
    pub shapes: [ShapeCoefficients; 14],
}

impl QuarkModelParameters {
    /// Parameter keys read by [`QuarkModelParameters::load`], in lookup order.
    pub fn required_keys(info: &ProcessInfo) -> Vec<String> {
        let mut keys = vec![
            info.daughter_mass_key(),
            info.parent_mass_key(),
            info.key("m_q"),
            info.key("m_s"),
            info.key(&format!("alpha_{}", info.parent)),
            info.key(&format!("alpha_{}", info.daughter)),
        ];
        for name in QUARK_MODEL_FORM_FACTORS {
            for coefficient in ["a0", "a2", "a4"] {
                keys.push(info.key(&format!("{name} {coefficient}")));
            }
        }
        keys
    }

    /// Reads all inputs, failing on the first missing key.
    pub fn load<P>(info: &ProcessInfo, par: &P) -> Result<Self, LbxError>
    where
        P: ParameterSource + ?Sized,
    {
        let m_daughter = info.require(par, &info.daughter_mass_key())?;
        let m_parent = info.require(par, &info.parent_mass_key())?;
        let m_q = info.require(par, &info.key("m_q"))?;
        let m_s = info.require(par, &info.key("m_s"))?;
        let alpha_parent = info.require(par, &info.key(&format!("alpha_{}", info.parent)))?;
        let alpha_daughter = info.require(par, &info.key(&format!("alpha_{}", info.daughter)))?;

        let mut shapes = [ShapeCoefficients::default(); 14];
        for (shape, name) in shapes.iter_mut().zip(QUARK_MODEL_FORM_FACTORS) {
            *shape = ShapeCoefficients {
                a0: info.require(par, &info.key(&format!("{name} a0")))?,
                a2: info.require(par, &info.key(&format!("{name} a2")))?,
                a4: info.require(par, &info.key(&format!("{name} a4")))?,
            };
        }
        debug!(
            "loaded quark-model parameters for {} (m_parent={m_parent}, m_daughter={m_daughter})",
            info.name
        );

        Ok(Self {
            m_parent,
            m_daughter,
            m_q,
            m_s,
            alpha_parent,
            alpha_daughter,
            shapes,
        })
    }

    /// Model daughter mass `2 m_q + m_s`.
    pub fn effective_daughter_mass(&self) -> f64 {
        effective_daughter_mass(self.m_q, self.m_s)
    }

    /// RMS oscillator parameter of the transition.
    pub fn combined_alpha(&self) -> f64 {
        combined_oscillator_parameter(self.alpha_parent, self.alpha_daughter)
    }

    /// Evaluates all 14 form factors at `q2`.
    pub fn evaluate(&self, q2: f64) -> QuarkModelOutput {
        let p = daughter_momentum(q2, self.m_daughter, self.m_parent);
        let m_eff = self.effective_daughter_mass();
        let alpha = self.combined_alpha();

        let mut values = [0.0; 14];
        for (value, shape) in values.iter_mut().zip(&self.shapes) {
            *value = quark_model_form_factor(shape.a0, shape.a2, shape.a4, p, self.m_q, m_eff, alpha);
        }

        QuarkModelOutput {
            form_factors: QuarkModelFormFactors::from_values(values),
            m_daughter: self.m_daughter,
            m_parent: self.m_parent,
        }
    }
}

/// Quark-model form factors of a builtin process at `q2`.
pub fn formfactors<P>(process: &str, par: &P, q2: f64) -> Result<QuarkModelOutput, LbxError>
where
    P: ParameterSource + ?Sized,
{
    formfactors_in(registry::global(), process, par, q2)
}

/// Same as [`formfactors`] with an explicit registry.
pub fn formfactors_in<P>(
    registry: &ProcessRegistry,
    process: &str,
    par: &P,
    q2: f64,
) -> Result<QuarkModelOutput, LbxError>
where
    P: ParameterSource + ?Sized,
{
    let info = registry.lookup(process)?;
    let params = QuarkModelParameters::load(info, par)?;
    debug!("evaluating quark-model form factors for {process} at q2={q2}");
    Ok(params.evaluate(q2))
}
