//! metareg core: metadata centers, shapes, and queries
//!
//! Shared machinery behind the annotation and inheritance registries. A
//! registry owns exactly one [`MetadataCenter`], created lazily through
//! [`metadata_center!`] and alive for the rest of the process.

pub mod center;
pub mod error;
pub mod meta;
pub mod query;
pub mod settings;
pub mod type_key;

pub use center::{MetadataCenter, RegistryKey};
pub use error::{RegistryError, Result};
pub use meta::{is_superset, merge_kwargs, Kwargs, MetaShape};
pub use query::Query;
pub use settings::{default_settings, RegistrySettings};
pub use type_key::{short_type_name, TypeKey};

#[doc(hidden)]
pub use once_cell;
#[doc(hidden)]
pub use serde_json;
