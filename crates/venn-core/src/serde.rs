//! JSON encoding for count reports.

use serde::Serialize;

use crate::errors::{ErrorInfo, VennError};

/// Serializes a value into pretty JSON followed by a newline.
///
/// Reports keep their maps in `BTreeMap`s, so key order is stable.
pub fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, VennError> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| VennError::Serde(ErrorInfo::new("venn_core.json_serialize", err.to_string())))?;
    bytes.push(b'\n');
    Ok(bytes)
}
