//! Metadata shapes
//!
//! A registry stores one metadata value per key. By default that value is an
//! open keyword mapping ([`Kwargs`]); a registry may instead name a record type,
//! in which case the keywords are coerced into that record on registration.
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{RegistryError, Result};

/// Keyword arguments of a registration, and the default open metadata.
pub type Kwargs = serde_json::Map<String, Value>;

/// Builds [`Kwargs`] from `key: value` pairs.
///
/// ```
/// use metareg_core::meta;
///
/// let kwargs = meta! { name: "hammer", limit: 9 };
/// assert_eq!(kwargs["name"], "hammer");
/// assert_eq!(kwargs["limit"], 9);
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        $crate::Kwargs::new()
    };
    ($($key:ident : $value:expr),+ $(,)?) => {{
        let mut kwargs = $crate::Kwargs::new();
        $(
            kwargs.insert(
                ::std::string::String::from(stringify!($key)),
                $crate::serde_json::json!($value),
            );
        )+
        kwargs
    }};
}

/// The shape a registry's metadata takes.
///
/// Implemented for every serde record type, including [`Kwargs`] itself. Which
/// keywords a record accepts is decided by its serde attributes: a missing
/// required field always fails, unknown fields fail only under
/// `#[serde(deny_unknown_fields)]`.
pub trait MetaShape: Clone + Send + Sync + 'static {
    /// Construct the shape from registration keywords.
    fn from_kwargs(kwargs: Kwargs) -> Result<Self>;

    /// View the shape as a keyword mapping, as compared by partial queries.
    fn fields(&self) -> Result<Kwargs>;
}

impl<T> MetaShape for T
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn from_kwargs(kwargs: Kwargs) -> Result<Self> {
        serde_json::from_value(Value::Object(kwargs)).map_err(|e| {
            RegistryError::construction(format!("{}: {}", std::any::type_name::<T>(), e))
        })
    }

    fn fields(&self) -> Result<Kwargs> {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(other) => Err(RegistryError::construction(format!(
                "{} is not a record (serialized as {})",
                std::any::type_name::<T>(),
                kind_of(&other)
            ))),
            Err(e) => Err(RegistryError::construction(e.to_string())),
        }
    }
}

/// Shallow merge of two keyword mappings; `overrides` win.
pub fn merge_kwargs(base: Kwargs, overrides: Kwargs) -> Kwargs {
    let mut merged = base;
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    merged
}

/// True when every pair of `partial` is present and equal in `fields`.
pub fn is_superset(fields: &Kwargs, partial: &Kwargs) -> bool {
    partial
        .iter()
        .all(|(key, value)| fields.get(key) == Some(value))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
