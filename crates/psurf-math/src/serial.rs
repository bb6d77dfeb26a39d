//! `dump`/`load` support shared by the kernel value types.
//!
//! The JSON shape is whatever the `serde` derive produces for each type; field
//! names are part of the stored-geometry format and must not be renamed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub(crate) fn dump<T: Serialize>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(v) => v,
        Err(err) => {
            log::warn!("failed to dump {}: {err}", std::any::type_name::<T>());
            Value::Null
        }
    }
}

pub(crate) fn load<T: DeserializeOwned>(value: &Value) -> psurf_core::Result<T> {
    Ok(T::deserialize(value)?)
}
