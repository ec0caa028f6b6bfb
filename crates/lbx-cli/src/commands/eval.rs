use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use lbx_quark::{
    check_physical_q2, registry, to_equivalent, EquivalentFormFactors, QuarkModelOutput,
    QuarkModelParameters, UncertaintyScales,
};
use serde::Serialize;

use super::{canonical_json_string, load_parameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Basis {
    Quark,
    Equiv,
    Both,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Process identifier, e.g. "Lambdab->Lambda(1520)".
    #[arg(long)]
    pub process: String,
    /// Parameter table (.json, .yaml or .yml).
    #[arg(long)]
    pub params: PathBuf,
    /// Momentum transfer in GeV².
    #[arg(long, allow_negative_numbers = true)]
    pub q2: f64,
    /// Which form factor set(s) to print.
    #[arg(long, value_enum, default_value_t = Basis::Both)]
    pub basis: Basis,
    /// Skip the physical-region check on q2.
    #[arg(long)]
    pub allow_unphysical: bool,
}

#[derive(Debug, Serialize)]
struct EvalOutput {
    process: String,
    q2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    quark_model: Option<QuarkModelOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    equivalent: Option<EquivalentFormFactors>,
}

pub fn run(args: &EvalArgs) -> Result<(), Box<dyn Error>> {
    let info = registry::global().lookup(&args.process)?;
    let table = load_parameters(&args.params)?;
    let params = QuarkModelParameters::load(info, &table)?;
    if !args.allow_unphysical {
        check_physical_q2(args.q2, params.m_daughter, params.m_parent)?;
    }

    let quark_model = params.evaluate(args.q2);
    let equivalent = match args.basis {
        Basis::Quark => None,
        Basis::Equiv | Basis::Both => {
            let scales = UncertaintyScales::load(info, &table)?;
            Some(to_equivalent(&quark_model, args.q2, &scales))
        }
    };
    let output = EvalOutput {
        process: info.name.clone(),
        q2: args.q2,
        quark_model: (args.basis != Basis::Equiv).then_some(quark_model),
        equivalent,
    };
    println!("{}", canonical_json_string(&output)?);
    Ok(())
}
