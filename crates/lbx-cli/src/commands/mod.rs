pub mod eval;
pub mod scan;
pub mod template;

use std::error::Error;
use std::fs;
use std::path::Path;

use lbx_core::errors::{ErrorInfo, LbxError};
use lbx_core::ParameterTable;
use lbx_quark::{registry, to_canonical_json_bytes};
use log::debug;

/// Reads a parameter table from a `.json`, `.yaml` or `.yml` file.
pub fn load_parameters(path: &Path) -> Result<ParameterTable, Box<dyn Error>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let table = match extension.as_deref() {
        Some("json") => ParameterTable::from_json_slice(&fs::read(path)?)?,
        Some("yaml") | Some("yml") => ParameterTable::from_yaml_str(&fs::read_to_string(path)?)?,
        _ => {
            return Err(Box::new(LbxError::Serde(
                ErrorInfo::new(
                    "lbx.parameter_format",
                    "unsupported parameter file extension",
                )
                .with_context("path", path.display().to_string())
                .with_hint("use .json, .yaml or .yml"),
            )))
        }
    };
    debug!("loaded {} parameters from {}", table.len(), path.display());
    Ok(table)
}

pub fn canonical_json_string<T: serde::Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(String::from_utf8(bytes)?)
}

pub fn list_processes() -> Result<(), Box<dyn Error>> {
    for info in registry::global().iter() {
        println!("{}", canonical_json_string(info)?);
    }
    Ok(())
}
