//! Inheritance registries
//!
//! A lineage root owns a metadata center; every subtype declared below it,
//! directly or through other subtypes, registers into that one center when it
//! is defined. Roots themselves, the direct children of the sentinel
//! [`RegistryBase`], are never registered.
//!
//! # Example
//!
//! ```
//! use metareg_core::{meta, Kwargs, Query, TypeKey};
//! use metareg_inheritance::{inheritance_registry, subtype, Derived, InheritanceRegistry};
//!
//! inheritance_registry!(pub Tool => Kwargs);
//! subtype!(pub Hammer: Tool);
//!
//! Hammer::define(meta! { name: "hammer" }).unwrap();
//!
//! assert_eq!(Tool::query(meta! { name: "hammer" }), Some(TypeKey::of::<Hammer>()));
//! assert_eq!(Tool::meta_of_type::<Hammer>().unwrap(), meta! { name: "hammer" });
//! ```

mod define;
pub mod lineage;

pub use define::define;
pub use lineage::{ancestors, Definition};

use metareg_core::{
    default_settings, Kwargs, MetaShape, MetadataCenter, Query, RegistrySettings, Result,
    TypeKey,
};

/// The sentinel base every lineage root derives from. Never registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryBase;

/// A lineage root: the owner of the center its subtypes register into.
pub trait InheritanceRegistry: Sized + 'static {
    /// Metadata shape; [`Kwargs`] for an open mapping.
    type Meta: MetaShape;

    fn center() -> &'static MetadataCenter<TypeKey, Self::Meta>;

    fn settings() -> RegistrySettings {
        default_settings::<Self>()
    }

    /// Build a subtype's metadata from the keywords given at its definition.
    ///
    /// Keywords are not inherited by default. Override to merge with
    /// [`Definition::parent_meta`] or to derive fields.
    fn make_meta(_definition: &Definition, kwargs: Kwargs) -> Result<Self::Meta> {
        Self::Meta::from_kwargs(Self::settings().apply_fallback(kwargs))
    }

    /// Runs after `make_meta`; may validate or replace the result.
    fn check_meta(meta: Self::Meta) -> Result<Self::Meta> {
        Ok(meta)
    }

    /// First registered subtype, in definition order, matching `query`.
    fn query<'a>(query: impl Into<Query<'a, Self::Meta>>) -> Option<TypeKey> {
        let query = query.into();
        tracing::trace!("{}: query {:?}", Self::settings().name, query);
        Self::center().find(&query)
    }

    fn meta_of(subtype: &TypeKey) -> Result<Self::Meta> {
        Self::center().get(subtype)
    }

    fn meta_of_type<C: Lineage<Root = Self>>() -> Result<Self::Meta> {
        Self::meta_of(&TypeKey::of::<C>())
    }

    fn registered(subtype: &TypeKey) -> bool {
        Self::center().contains(subtype)
    }

    fn registered_type<C: Lineage<Root = Self>>() -> bool {
        Self::registered(&TypeKey::of::<C>())
    }

    /// Remove a subtype's entry. Its own subtypes keep theirs.
    fn unregister(subtype: &TypeKey) -> Result<()> {
        Self::center().remove(subtype)?;
        tracing::debug!("{}: unregistered {}", Self::settings().name, subtype);
        Ok(())
    }

    fn subtypes() -> Vec<TypeKey> {
        Self::center().keys()
    }

    fn len() -> usize {
        Self::center().len()
    }
}

/// Membership in a lineage: roots and every subtype below them.
pub trait Lineage: 'static {
    type Root: InheritanceRegistry;

    fn key() -> TypeKey
    where
        Self: Sized,
    {
        TypeKey::of::<Self>()
    }

    /// This type's metadata in its root's center.
    fn meta() -> Result<<Self::Root as InheritanceRegistry>::Meta>
    where
        Self: Sized,
    {
        <Self::Root as InheritanceRegistry>::meta_of(&TypeKey::of::<Self>())
    }
}

/// A subtype with an immediate parent in the same lineage.
pub trait Derived: Lineage {
    type Parent: Lineage<Root = Self::Root>;

    /// Register this subtype with the metadata given at its definition.
    fn define(kwargs: Kwargs) -> Result<TypeKey>
    where
        Self: Sized,
    {
        define::<Self>(kwargs)
    }
}

/// Marks `Name` as a lineage root (a direct extension of [`RegistryBase`]).
///
/// Use with a hand-written [`InheritanceRegistry`] impl that overrides hooks;
/// [`inheritance_registry!`] declares both at once with the default hooks.
#[macro_export]
macro_rules! inheritance_root {
    ($name:ty) => {
        impl $crate::Lineage for $name {
            type Root = $name;
        }
    };
}

/// Declares a unit lineage root with the default hooks.
#[macro_export]
macro_rules! inheritance_registry {
    ($(#[$attr:meta])* $vis:vis $name:ident => $meta:ty) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::InheritanceRegistry for $name {
            type Meta = $meta;

            fn center() -> &'static $crate::__private::MetadataCenter<$crate::__private::TypeKey, $meta> {
                $crate::__private::metadata_center!($crate::__private::TypeKey, $meta)
            }
        }

        $crate::inheritance_root!($name);
    };
}

/// Declares `Child` as a subtype of `Parent`.
///
/// `subtype!(pub Child: Parent)` also declares `Child` as a unit struct;
/// `subtype!(impl Child: Parent)` only adds the lineage impls to an existing
/// type. Registration happens on `Child::define(..)`.
#[macro_export]
macro_rules! subtype {
    (impl $child:ty : $parent:ty) => {
        impl $crate::Lineage for $child {
            type Root = <$parent as $crate::Lineage>::Root;
        }

        impl $crate::Derived for $child {
            type Parent = $parent;
        }
    };
    ($(#[$attr:meta])* $vis:vis $child:ident : $parent:ty) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $child;

        $crate::subtype!(impl $child : $parent);
    };
}

#[doc(hidden)]
pub mod __private {
    pub use metareg_core::{metadata_center, MetadataCenter, TypeKey};
}
