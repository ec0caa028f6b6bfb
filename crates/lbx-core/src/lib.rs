#![deny(missing_docs)]
#![doc = "Core error, schema and parameter-table types shared by the lbx form factor crates."]

pub mod errors;
pub mod params;
pub mod provenance;

pub use errors::{ErrorInfo, LbxError};
pub use params::{ParameterSource, ParameterTable};
pub use provenance::SchemaVersion;
