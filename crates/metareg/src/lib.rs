//! metareg: registration and lookup by metadata
//!
//! Two registry flavors share one query protocol:
//!
//! - [`AnnotationRegistry`]: callers explicitly register items (types,
//!   functions, names) together with keyword metadata.
//! - [`InheritanceRegistry`]: every subtype declared below a lineage root is
//!   registered into the root's center when it is defined.
//!
//! Each registry type owns exactly one [`MetadataCenter`]; centers are never
//! shared between registries.
//!
//! # Example
//!
//! ```
//! use metareg::{
//!     annotation_registry, inheritance_registry, meta, subtype, AnnotationRegistry, Derived,
//!     InheritanceRegistry, Kwargs, Query, TypeKey,
//! };
//!
//! annotation_registry!(pub Commands: fn() -> &'static str => Kwargs);
//!
//! fn greet() -> &'static str {
//!     "hello"
//! }
//!
//! Commands::register(meta! { name: "greet" })
//!     .apply(greet as fn() -> &'static str)
//!     .unwrap();
//! let command = Commands::query(meta! { name: "greet" }).unwrap();
//! assert_eq!(command(), "hello");
//!
//! inheritance_registry!(pub Tool => Kwargs);
//! subtype!(pub Hammer: Tool);
//! Hammer::define(meta! { name: "hammer" }).unwrap();
//!
//! let found = Tool::query(Query::matching(|m: &Kwargs| m["name"] == "hammer"));
//! assert_eq!(found, Some(TypeKey::of::<Hammer>()));
//! ```

pub use metareg_annotation::{annotation_registry, AnnotationRegistry, Decorator};
pub use metareg_core::{
    default_settings, is_superset, merge_kwargs, meta, metadata_center, Kwargs, MetaShape,
    MetadataCenter, Query, RegistryError, RegistryKey, RegistrySettings, Result, TypeKey,
};
pub use metareg_inheritance::{
    ancestors, define, inheritance_registry, inheritance_root, lineage, subtype, Definition,
    Derived, InheritanceRegistry, Lineage, RegistryBase,
};

/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
