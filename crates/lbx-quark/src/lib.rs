#![deny(missing_docs)]
#![doc = "Quark-model (MCN) form factors for spin-1/2 → spin-3/2 baryon transitions and their change of basis to the helicity-style equivalent basis."]

pub mod equiv;
mod json;
pub mod kinematics;
pub mod model;
pub mod process;
pub mod registry;
pub mod report;
pub mod scan;

pub use equiv::{
    ff_equiv, ff_equiv_in, to_equivalent, EquivalentFormFactors, UncertaintyScales,
    EQUIVALENT_FORM_FACTORS,
};
pub use json::{from_json_slice, to_canonical_json_bytes};
pub use kinematics::{
    check_physical_q2, combined_oscillator_parameter, daughter_momentum, effective_daughter_mass,
    q2_max,
};
pub use model::{
    formfactors, formfactors_in, quark_model_form_factor, QuarkModelFormFactors, QuarkModelOutput,
    QuarkModelParameters, ShapeCoefficients, QUARK_MODEL_FORM_FACTORS,
};
pub use process::{required_keys, FormFactorPoint, ProcessParameters};
pub use registry::{ProcessInfo, ProcessRegistry, LAMBDAB_TO_LAMBDA1520};
pub use report::{build_report, parameter_hash, FormFactorReport};
pub use scan::{evaluate_grid, scan, scan_in, Q2Grid};
