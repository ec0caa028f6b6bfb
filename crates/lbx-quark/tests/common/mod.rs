#![allow(dead_code)]

use lbx_core::ParameterTable;
use lbx_quark::{EQUIVALENT_FORM_FACTORS, LAMBDAB_TO_LAMBDA1520, QUARK_MODEL_FORM_FACTORS};

pub const PROCESS: &str = LAMBDAB_TO_LAMBDA1520;
pub const M_PARENT: f64 = 5.619;
pub const M_DAUGHTER: f64 = 1.520;

/// Shape coefficients `(a0, a2, a4)` in `QUARK_MODEL_FORM_FACTORS` order.
pub const SHAPES: [(f64, f64, f64); 14] = [
    (0.1, -0.1, 0.0),
    (-0.2, -0.05, 0.01),
    (0.3, 0.0, 0.02),
    (-0.4, 0.05, 0.0),
    (0.5, 0.1, 0.01),
    (-0.6, -0.1, 0.02),
    (0.7, -0.05, 0.0),
    (-0.8, 0.0, 0.01),
    (0.9, 0.05, 0.02),
    (-1.0, 0.1, 0.0),
    (1.1, -0.1, 0.01),
    (-1.2, -0.05, 0.02),
    (1.3, 0.0, 0.0),
    (-1.4, 0.05, 0.01),
];

fn key(field: &str) -> String {
    format!("{PROCESS} {field}")
}

/// Complete parameter table for the Λb → Λ(1520) transition.
pub fn fixture_table() -> ParameterTable {
    let mut table = ParameterTable::new();
    table.insert("m_Lambdab", M_PARENT);
    table.insert("m_Lambda(1520)", M_DAUGHTER);
    table.insert(key("m_q"), 0.2848);
    table.insert(key("m_s"), 0.5);
    table.insert(key("alpha_Lambdab"), 0.443);
    table.insert(key("alpha_Lambda(1520)"), 0.333);
    for (name, (a0, a2, a4)) in QUARK_MODEL_FORM_FACTORS.iter().zip(SHAPES) {
        table.insert(key(&format!("{name} a0")), a0);
        table.insert(key(&format!("{name} a2")), a2);
        table.insert(key(&format!("{name} a4")), a4);
    }
    for name in EQUIVALENT_FORM_FACTORS {
        table.insert(key(&format!("{name} uncertainty")), 1.0);
    }
    table
}

/// Fixture with every shape coefficient zeroed except `F1 a0 = 1`.
pub fn f1_only_table() -> ParameterTable {
    let mut table = fixture_table();
    for name in QUARK_MODEL_FORM_FACTORS {
        for coefficient in ["a0", "a2", "a4"] {
            table.insert(key(&format!("{name} {coefficient}")), 0.0);
        }
    }
    table.insert(key("F1 a0"), 1.0);
    table
}

pub fn assert_close(actual: f64, expected: f64, label: &str) {
    let tolerance = 1e-12 * expected.abs().max(1e-3);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{label}: got {actual:e}, expected {expected:e}"
    );
}
