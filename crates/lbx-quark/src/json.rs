//! JSON encoding of evaluation output and reports.

use lbx_core::errors::{ErrorInfo, LbxError};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn json_error(code: &str, err: serde_json::Error) -> LbxError {
    LbxError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Encodes `value` as compact JSON with every object's keys in sorted order.
///
/// The value goes through `serde_json::Value`, whose map is key ordered, so the
/// bytes do not depend on struct field declaration order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, LbxError> {
    let value = serde_json::to_value(value).map_err(|err| json_error("json-encode", err))?;
    serde_json::to_vec(&value).map_err(|err| json_error("json-write", err))
}

/// Decodes a value written by [`to_canonical_json_bytes`].
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, LbxError> {
    serde_json::from_slice(data).map_err(|err| json_error("json-read", err))
}

/// Field codec for form factor values, which diverge at kinematic poles.
///
/// JSON has no infinities: non-finite values are written as `null` and read
/// back as NaN.
pub(crate) mod form_factor {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
