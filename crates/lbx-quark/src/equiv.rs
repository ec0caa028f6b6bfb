//! Change of basis from the quark-model form factors to the helicity-style
//! equivalent basis (`fV*`, `fA*`, `fT*`, `fT5*`).
//!
//! Several denominators vanish at kinematic endpoints (`m_daughter = m_parent`,
//! `q2 = (m_daughter ∓ m_parent)^2`). They are left unguarded: evaluating there
//! yields IEEE infinities or NaN.

use std::collections::BTreeMap;

use lbx_core::errors::LbxError;
use lbx_core::params::ParameterSource;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{QuarkModelFormFactors, QuarkModelOutput, QuarkModelParameters};
use crate::registry::{self, ProcessInfo, ProcessRegistry};

/// Names of the equivalent-basis form factors in canonical order.
pub const EQUIVALENT_FORM_FACTORS: [&str; 16] = [
    "fVt", "fVperp", "fV0", "fVg", "fAt", "fAperp", "fA0", "fAg", "fTt", "fTperp", "fT0", "fTg",
    "fT5t", "fT5perp", "fT50", "fT5g",
];

/// The 16 equivalent-basis form factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct EquivalentFormFactors {
    #[serde(rename = "fVt", with = "crate::json::form_factor")]
    pub f_vt: f64,
    #[serde(rename = "fVperp", with = "crate::json::form_factor")]
    pub f_vperp: f64,
    #[serde(rename = "fV0", with = "crate::json::form_factor")]
    pub f_v0: f64,
    #[serde(rename = "fVg", with = "crate::json::form_factor")]
    pub f_vg: f64,
    #[serde(rename = "fAt", with = "crate::json::form_factor")]
    pub f_at: f64,
    #[serde(rename = "fAperp", with = "crate::json::form_factor")]
    pub f_aperp: f64,
    #[serde(rename = "fA0", with = "crate::json::form_factor")]
    pub f_a0: f64,
    #[serde(rename = "fAg", with = "crate::json::form_factor")]
    pub f_ag: f64,
    #[serde(rename = "fTt", with = "crate::json::form_factor")]
    pub f_tt: f64,
    #[serde(rename = "fTperp", with = "crate::json::form_factor")]
    pub f_tperp: f64,
    #[serde(rename = "fT0", with = "crate::json::form_factor")]
    pub f_t0: f64,
    #[serde(rename = "fTg", with = "crate::json::form_factor")]
    pub f_tg: f64,
    #[serde(rename = "fT5t", with = "crate::json::form_factor")]
    pub f_t5t: f64,
    #[serde(rename = "fT5perp", with = "crate::json::form_factor")]
    pub f_t5perp: f64,
    #[serde(rename = "fT50", with = "crate::json::form_factor")]
    pub f_t50: f64,
    #[serde(rename = "fT5g", with = "crate::json::form_factor")]
    pub f_t5g: f64,
}

impl EquivalentFormFactors {
    /// Unscaled change of basis at `q2`.
    pub fn nominal(ff: &QuarkModelFormFactors, m_daughter: f64, m_parent: f64, q2: f64) -> Self {
        let ml = m_daughter;
        let mlb = m_parent;
        // Källén function λ(m_daughter², m_parent², q2).
        let kallen = ml.powi(4) + (mlb.powi(2) - q2).powi(2) - 2.0 * ml.powi(2) * (mlb.powi(2) + q2);
        // (m_daughter -/+ m_parent)^2 - q2
        let s_minus = ml.powi(2) - 2.0 * ml * mlb + mlb.powi(2) - q2;
        let s_plus = ml.powi(2) + 2.0 * ml * mlb + mlb.powi(2) - q2;

        let f_vt = (ff.f2 * ml * (ml.powi(2) - mlb.powi(2) - q2)
            + mlb
                * (2.0 * ff.f1 * ml * (ml - mlb) - 2.0 * ff.f4 * ml * mlb
                    + ff.f3 * (ml.powi(2) - mlb.powi(2) + q2)))
            / (2.0 * ml * (ml - mlb) * mlb.powi(2));
        let f_vperp = ff.f1 / mlb - ff.f4 * ml / s_minus;
        let f_v0 = (ff.f2 * ml * kallen
            + mlb
                * (2.0 * ff.f1 * ml * (ml + mlb) * s_minus
                    - 2.0 * ff.f4 * ml * mlb * (ml.powi(2) - mlb.powi(2) + q2)
                    + ff.f3 * kallen))
            / (2.0 * ml * mlb.powi(2) * (ml + mlb) * s_minus);
        let f_vg = ff.f4;

        let f_at = (ff.g2 * ml * (ml.powi(2) - mlb.powi(2) - q2)
            + mlb
                * (-2.0 * ff.g4 * ml * mlb
                    + 2.0 * ff.g1 * ml * (ml + mlb)
                    + ff.g3 * (ml.powi(2) - mlb.powi(2) + q2)))
            / (2.0 * ml * mlb.powi(2) * (ml + mlb));
        let f_aperp = ff.g1 / mlb - ff.g4 * ml / s_plus;
        let f_a0 = (ff.g2 * ml * kallen
            + mlb
                * (2.0 * ff.g1 * ml * (ml - mlb) * s_plus
                    - 2.0 * ff.g4 * ml * mlb * (ml.powi(2) - mlb.powi(2) + q2)
                    + ff.g3 * kallen))
            / (2.0 * ml * (ml - mlb) * mlb.powi(2) * s_plus);
        let f_ag = -ff.g4;

        let f_tt = 0.0;
        let f_tperp = (2.0 * ff.h5 * ml - (ff.h3 + ff.h6) * ml.powi(2) / mlb
            + ff.h3 * mlb
            + 2.0 * ff.h1 * ml * (ml + mlb) / mlb
            - 2.0 * (ff.h5 + ff.h6) * ml.powi(2) * (ml - mlb) / ((ml - mlb).powi(2) - q2)
            - ff.h3 * q2 / mlb
            + ff.h2 * ml * (-ml.powi(2) + mlb.powi(2) + q2) / mlb.powi(2))
            / (2.0 * ml * (ml + mlb));
        let f_t0 = (ff.h1 + ff.h2 - ff.h3 - ff.h6) / mlb
            - 2.0 * (ff.h5 + ff.h6) * ml / ((ml - mlb).powi(2) - q2)
            + ff.h4 * ((ml + mlb).powi(2) - q2) / (2.0 * ml * mlb.powi(2));
        let f_tg = ff.h5 * (ml - mlb) - ff.h6 * (-ml.powi(2) + mlb.powi(2) + q2) / (2.0 * mlb);

        let f_t5t = 0.0;
        let f_t5perp = -1.0 / (2.0 * ml * (ml - mlb) * mlb.powi(2) * s_plus)
            * (ff.h2 * ml * kallen
                + mlb
                    * (ml * (2.0 * ff.h5 * mlb * (ml * mlb + mlb.powi(2) - q2) + ff.h6 * ml * s_plus)
                        - 2.0 * ff.h1 * ml * (ml - mlb) * s_plus
                        + ff.h3 * kallen));
        let f_t50 = ff.h1 / mlb + 2.0 * ff.h5 * ml / s_plus;
        let f_t5g = -ff.h5 * (ml + mlb) - ff.h6 * s_plus / (2.0 * mlb);

        Self {
            f_vt,
            f_vperp,
            f_v0,
            f_vg,
            f_at,
            f_aperp,
            f_a0,
            f_ag,
            f_tt,
            f_tperp,
            f_t0,
            f_tg,
            f_t5t,
            f_t5perp,
            f_t50,
            f_t5g,
        }
    }

    /// Builds the set from values ordered as [`EQUIVALENT_FORM_FACTORS`].
    pub fn from_values(v: [f64; 16]) -> Self {
        Self {
            f_vt: v[0],
            f_vperp: v[1],
            f_v0: v[2],
            f_vg: v[3],
            f_at: v[4],
            f_aperp: v[5],
            f_a0: v[6],
            f_ag: v[7],
            f_tt: v[8],
            f_tperp: v[9],
            f_t0: v[10],
            f_tg: v[11],
            f_t5t: v[12],
            f_t5perp: v[13],
            f_t50: v[14],
            f_t5g: v[15],
        }
    }

    /// Values ordered as [`EQUIVALENT_FORM_FACTORS`].
    pub fn values(&self) -> [f64; 16] {
        [
            self.f_vt,
            self.f_vperp,
            self.f_v0,
            self.f_vg,
            self.f_at,
            self.f_aperp,
            self.f_a0,
            self.f_ag,
            self.f_tt,
            self.f_tperp,
            self.f_t0,
            self.f_tg,
            self.f_t5t,
            self.f_t5perp,
            self.f_t50,
            self.f_t5g,
        ]
    }

    /// Multiplies every component by its uncertainty scale.
    pub fn scaled(&self, scales: &UncertaintyScales) -> Self {
        let mut values = self.values();
        for (value, scale) in values.iter_mut().zip(scales.values()) {
            *value *= scale;
        }
        Self::from_values(values)
    }

    /// Looks up a form factor by name (`"fVt"`, ..., `"fT5g"`).
    pub fn get(&self, name: &str) -> Option<f64> {
        position(name).map(|idx| self.values()[idx])
    }

    /// `(name, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        EQUIVALENT_FORM_FACTORS.into_iter().zip(self.values())
    }

    /// String keyed view with exactly the 16 form factor names.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect()
    }
}

fn position(name: &str) -> Option<usize> {
    EQUIVALENT_FORM_FACTORS
        .iter()
        .position(|candidate| *candidate == name)
}

/// Multiplicative nuisance parameters, one per equivalent-basis form factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyScales([f64; 16]);

impl UncertaintyScales {
    /// All scales set to `value` (1.0 is the nominal choice).
    pub fn uniform(value: f64) -> Self {
        Self([value; 16])
    }

    /// Parameter keys read by [`UncertaintyScales::load`], in lookup order.
    pub fn required_keys(info: &ProcessInfo) -> Vec<String> {
        EQUIVALENT_FORM_FACTORS
            .iter()
            .map(|name| info.key(&format!("{name} uncertainty")))
            .collect()
    }

    /// Reads the 16 `"<process> <name> uncertainty"` entries.
    pub fn load<P>(info: &ProcessInfo, par: &P) -> Result<Self, LbxError>
    where
        P: ParameterSource + ?Sized,
    {
        let mut scales = [0.0; 16];
        for (scale, name) in scales.iter_mut().zip(EQUIVALENT_FORM_FACTORS) {
            *scale = info.require(par, &info.key(&format!("{name} uncertainty")))?;
        }
        Ok(Self(scales))
    }

    /// Scale factor of the named form factor.
    pub fn get(&self, name: &str) -> Option<f64> {
        position(name).map(|idx| self.0[idx])
    }

    /// Replaces the scale of the named form factor; unknown names are ignored.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        if let Some(idx) = position(name) {
            self.0[idx] = value;
        }
        self
    }

    /// Scales ordered as [`EQUIVALENT_FORM_FACTORS`].
    pub fn values(&self) -> [f64; 16] {
        self.0
    }
}

impl Default for UncertaintyScales {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Applies the change of basis and uncertainty scales to quark-model output.
pub fn to_equivalent(
    output: &QuarkModelOutput,
    q2: f64,
    scales: &UncertaintyScales,
) -> EquivalentFormFactors {
    EquivalentFormFactors::nominal(&output.form_factors, output.m_daughter, output.m_parent, q2)
        .scaled(scales)
}

/// Equivalent-basis form factors of a builtin process at `q2`.
pub fn ff_equiv<P>(process: &str, q2: f64, par: &P) -> Result<EquivalentFormFactors, LbxError>
where
    P: ParameterSource + ?Sized,
{
    ff_equiv_in(registry::global(), process, q2, par)
}

/// Same as [`ff_equiv`] with an explicit registry.
pub fn ff_equiv_in<P>(
    registry: &ProcessRegistry,
    process: &str,
    q2: f64,
    par: &P,
) -> Result<EquivalentFormFactors, LbxError>
where
    P: ParameterSource + ?Sized,
{
    let info = registry.lookup(process)?;
    let output = QuarkModelParameters::load(info, par)?.evaluate(q2);
    let scales = UncertaintyScales::load(info, par)?;
    debug!("evaluating equivalent-basis form factors for {process} at q2={q2}");
    Ok(to_equivalent(&output, q2, &scales))
}
