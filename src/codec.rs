//! JSON serialization provider

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::Error;

/// Converts between JSON text and structured values.
///
/// Object-safe so that providers can be swapped at runtime. Typed conversion
/// goes through [`to_json`] and [`from_json`].
pub trait JsonCodec: Send + Sync {
    fn encode(&self, value: &Value) -> Result<String, Error>;

    fn decode(&self, text: &str) -> Result<Value, Error>;
}

/// Default codec built on `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn encode(&self, value: &Value) -> Result<String, Error> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(&self, text: &str) -> Result<Value, Error> {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn to_json<T: Serialize + ?Sized>(codec: &dyn JsonCodec, value: &T) -> Result<String, Error> {
    let value = serde_json::to_value(value)?;
    codec.encode(&value)
}

/// Unknown fields in `text` are ignored.
pub fn from_json<T: DeserializeOwned>(codec: &dyn JsonCodec, text: &str) -> Result<T, Error> {
    let value = codec.decode(text)?;
    Ok(serde_json::from_value(value)?)
}
