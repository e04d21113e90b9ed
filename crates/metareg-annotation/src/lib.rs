//! Annotation registries
//!
//! A registry type collects arbitrary items (types, functions, names) that a
//! caller explicitly submits together with keyword metadata.
//!
//! # Example
//!
//! ```
//! use metareg_annotation::{annotation_registry, AnnotationRegistry};
//! use metareg_core::{meta, Kwargs, Query};
//!
//! annotation_registry!(pub Toolbox: &'static str => Kwargs);
//!
//! let hammer = Toolbox::register(meta! { name: "hammer", place: "toolbox" })
//!     .apply("Hammer")
//!     .unwrap();
//! assert_eq!(hammer, Some("Hammer"));
//!
//! let found = Toolbox::query(Query::<Kwargs>::partial(meta! { name: "hammer" }));
//! assert_eq!(found, Some("Hammer"));
//! ```

mod decorator;

pub use decorator::Decorator;

use metareg_core::{
    default_settings, Kwargs, MetaShape, MetadataCenter, Query, RegistryKey, RegistrySettings,
    Result,
};

/// A registry of explicitly annotated items.
///
/// Implementors supply `center()` (usually through
/// [`metadata_center!`](metareg_core::metadata_center)) and may override the
/// construction hooks.
pub trait AnnotationRegistry: Sized + 'static {
    /// The registered key.
    type Item: RegistryKey;

    /// Metadata shape; [`Kwargs`] for an open mapping.
    type Meta: MetaShape;

    fn center() -> &'static MetadataCenter<Self::Item, Self::Meta>;

    fn settings() -> RegistrySettings {
        default_settings::<Self>()
    }

    /// Build the metadata for `item` from registration keywords.
    fn make_meta(_item: &Self::Item, kwargs: Kwargs) -> Result<Self::Meta> {
        Self::Meta::from_kwargs(Self::settings().apply_fallback(kwargs))
    }

    /// Runs after `make_meta`; may validate or replace the result.
    fn check_meta(meta: Self::Meta) -> Result<Self::Meta> {
        Ok(meta)
    }

    /// Start a registration carrying `kwargs`.
    fn register(kwargs: Kwargs) -> Decorator<Self> {
        Decorator::new(kwargs)
    }

    fn unregister(item: &Self::Item) -> Result<()> {
        Self::center().remove(item)?;
        tracing::debug!("{}: unregistered {:?}", Self::settings().name, item);
        Ok(())
    }

    fn registered(item: &Self::Item) -> bool {
        Self::center().contains(item)
    }

    /// First registered item, in registration order, matching `query`.
    fn query<'a>(query: impl Into<Query<'a, Self::Meta>>) -> Option<Self::Item> {
        let query = query.into();
        tracing::trace!("{}: query {:?}", Self::settings().name, query);
        Self::center().find(&query)
    }

    fn meta_of(item: &Self::Item) -> Result<Self::Meta> {
        Self::center().get(item)
    }

    fn len() -> usize {
        Self::center().len()
    }
}

/// Declares a unit registry type with the default hooks.
///
/// ```
/// use metareg_annotation::annotation_registry;
/// use metareg_core::Kwargs;
///
/// annotation_registry!(
///     /// Handlers keyed by function pointer.
///     pub Handlers: fn() -> u32 => Kwargs
/// );
/// ```
#[macro_export]
macro_rules! annotation_registry {
    ($(#[$attr:meta])* $vis:vis $name:ident : $item:ty => $meta:ty) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::AnnotationRegistry for $name {
            type Item = $item;
            type Meta = $meta;

            fn center() -> &'static $crate::__private::MetadataCenter<$item, $meta> {
                $crate::__private::metadata_center!($item, $meta)
            }
        }
    };
}

#[doc(hidden)]
pub mod __private {
    pub use metareg_core::{metadata_center, MetadataCenter};
}
