use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use csv::WriterBuilder;
use lbx_quark::{
    build_report, check_physical_q2, q2_max, registry, to_canonical_json_bytes, FormFactorReport,
    ProcessParameters, Q2Grid, EQUIVALENT_FORM_FACTORS, QUARK_MODEL_FORM_FACTORS,
};
use log::info;

use super::load_parameters;

/// Distance (GeV²) kept from the zero-recoil point by default, where several
/// equivalent-basis denominators vanish.
const ENDPOINT_MARGIN: f64 = 1e-3;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Process identifier, e.g. "Lambdab->Lambda(1520)".
    #[arg(long)]
    pub process: String,
    /// Parameter table (.json, .yaml or .yml).
    #[arg(long)]
    pub params: PathBuf,
    /// Output directory for report.json, quark.csv and equiv.csv.
    #[arg(long)]
    pub out: PathBuf,
    /// Number of grid points.
    #[arg(long, default_value_t = 64)]
    pub points: usize,
    /// Lower grid bound in GeV² (default 0).
    #[arg(long, allow_negative_numbers = true)]
    pub q2_min: Option<f64>,
    /// Upper grid bound in GeV² (default just below zero recoil).
    #[arg(long, allow_negative_numbers = true)]
    pub q2_max: Option<f64>,
    /// Skip the physical-region check on the grid bounds.
    #[arg(long)]
    pub allow_unphysical: bool,
}

pub fn run(args: &ScanArgs) -> Result<(), Box<dyn Error>> {
    let registry = registry::global();
    registry.lookup(&args.process)?;
    let table = load_parameters(&args.params)?;
    let params = ProcessParameters::load(registry, &args.process, &table)?;
    let m_daughter = params.quark_model.m_daughter;
    let m_parent = params.quark_model.m_parent;

    let min = args.q2_min.unwrap_or(0.0);
    let max = args
        .q2_max
        .unwrap_or_else(|| default_upper_bound(m_daughter, m_parent));
    if !args.allow_unphysical {
        check_physical_q2(min, m_daughter, m_parent)?;
        check_physical_q2(max, m_daughter, m_parent)?;
    }
    let grid = Q2Grid::new(min, max, args.points)?;

    let report = build_report(registry, &args.process, &table, &grid)?;
    fs::create_dir_all(&args.out)?;
    fs::write(
        args.out.join("report.json"),
        to_canonical_json_bytes(&report)?,
    )?;
    write_quark_csv(&args.out.join("quark.csv"), &report)?;
    write_equiv_csv(&args.out.join("equiv.csv"), &report)?;
    info!(
        "wrote {} points for {} to {}",
        report.points.len(),
        report.process,
        args.out.display()
    );
    Ok(())
}

/// Upper scan bound kept [`ENDPOINT_MARGIN`] below zero recoil, never below 0.
fn default_upper_bound(m_daughter: f64, m_parent: f64) -> f64 {
    (q2_max(m_daughter, m_parent) - ENDPOINT_MARGIN).max(0.0)
}

fn write_quark_csv(path: &Path, report: &FormFactorReport) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    let mut header = vec!["q2"];
    header.extend(QUARK_MODEL_FORM_FACTORS);
    writer.write_record(&header)?;
    for point in &report.points {
        let mut row = vec![point.q2.to_string()];
        row.extend(point.quark_model.form_factors.values().iter().map(f64::to_string));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_equiv_csv(path: &Path, report: &FormFactorReport) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    let mut header = vec!["q2"];
    header.extend(EQUIVALENT_FORM_FACTORS);
    writer.write_record(&header)?;
    for point in &report.points {
        let mut row = vec![point.q2.to_string()];
        row.extend(point.equivalent.values().iter().map(f64::to_string));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
