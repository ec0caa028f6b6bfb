mod common;

use lbx_core::LbxError;
use lbx_quark::{
    build_report, from_json_slice, to_canonical_json_bytes, FormFactorReport, ProcessRegistry,
    Q2Grid,
};

use common::{fixture_table, M_DAUGHTER, M_PARENT, PROCESS};

#[test]
fn reports_are_deterministic() -> Result<(), LbxError> {
    let registry = ProcessRegistry::builtin();
    let grid = Q2Grid::physical(M_DAUGHTER, M_PARENT, 9)?;
    let report_a = build_report(&registry, PROCESS, &fixture_table(), &grid)?;
    let report_b = build_report(&registry, PROCESS, &fixture_table(), &grid)?;
    assert_eq!(report_a, report_b);
    assert_eq!(
        to_canonical_json_bytes(&report_a)?,
        to_canonical_json_bytes(&report_b)?
    );
    assert_eq!(report_a.parameter_hash.len(), 64);
    Ok(())
}

#[test]
fn parameter_hash_tracks_inputs_only() -> Result<(), LbxError> {
    let registry = ProcessRegistry::builtin();
    let grid = Q2Grid::new(0.0, 4.0, 3)?;
    let baseline = build_report(&registry, PROCESS, &fixture_table(), &grid)?;

    let mut extra = fixture_table();
    extra.insert("unrelated parameter", 42.0);
    let with_extra = build_report(&registry, PROCESS, &extra, &grid)?;
    assert_eq!(with_extra.parameter_hash, baseline.parameter_hash);

    let mut changed = fixture_table();
    changed.insert(format!("{PROCESS} m_q"), 0.3);
    let with_change = build_report(&registry, PROCESS, &changed, &grid)?;
    assert_ne!(with_change.parameter_hash, baseline.parameter_hash);
    Ok(())
}

#[test]
fn report_json_uses_form_factor_names() -> Result<(), LbxError> {
    let registry = ProcessRegistry::builtin();
    let grid = Q2Grid::new(1.0, 2.0, 2)?;
    let report = build_report(&registry, PROCESS, &fixture_table(), &grid)?;
    let bytes = to_canonical_json_bytes(&report)?;
    let text = String::from_utf8(bytes.clone()).expect("utf8");
    for name in ["\"F1\"", "\"H6\"", "\"fVt\"", "\"fT5g\"", "\"parameter_hash\""] {
        assert!(text.contains(name), "missing {name}");
    }
    let decoded: FormFactorReport = from_json_slice(&bytes)?;
    assert_eq!(decoded.points.len(), 2);
    assert_eq!(decoded.process, PROCESS);
    Ok(())
}

fn same_values(decoded: &[f64], original: &[f64]) {
    for (after, before) in decoded.iter().zip(original) {
        if before.is_finite() {
            let tolerance = 1e-12 * before.abs().max(1e-3);
            assert!((after - before).abs() <= tolerance, "{after} vs {before}");
        } else {
            assert!(after.is_nan(), "{before} decoded as {after}");
        }
    }
}

#[test]
fn zero_recoil_report_reads_back() -> Result<(), LbxError> {
    let registry = ProcessRegistry::builtin();
    let grid = Q2Grid::physical(M_DAUGHTER, M_PARENT, 3)?;
    let report = build_report(&registry, PROCESS, &fixture_table(), &grid)?;
    let endpoint = report.points.last().expect("three points");
    assert!(endpoint.equivalent.values().iter().any(|v| !v.is_finite()));

    let bytes = to_canonical_json_bytes(&report)?;
    let decoded: FormFactorReport = from_json_slice(&bytes)?;
    assert_eq!(decoded.points.len(), report.points.len());
    assert_eq!(decoded.parameter_hash, report.parameter_hash);
    for (after, before) in decoded.points.iter().zip(&report.points) {
        same_values(&[after.q2], &[before.q2]);
        same_values(
            &after.quark_model.form_factors.values(),
            &before.quark_model.form_factors.values(),
        );
        same_values(&after.equivalent.values(), &before.equivalent.values());
    }
    Ok(())
}
