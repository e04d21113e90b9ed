//! Subtype definition: resolve lineage, build metadata, insert into the root.
use metareg_core::{Kwargs, Result, TypeKey};

use crate::{lineage, Derived, InheritanceRegistry};

/// Define `C`, registering it into its root's center.
///
/// Nothing is recorded when the lineage cannot be resolved or a hook
/// rejects the keywords. Defining `C` again overwrites its metadata.
pub fn define<C: Derived>(kwargs: Kwargs) -> Result<TypeKey> {
    let key = TypeKey::of::<C>();
    let definition =
        lineage::resolve(key, TypeKey::of::<C::Parent>(), TypeKey::of::<C::Root>())?;
    let registry = <C::Root as InheritanceRegistry>::settings().name;

    let meta = <C::Root as InheritanceRegistry>::make_meta(&definition, kwargs)
        .and_then(<C::Root as InheritanceRegistry>::check_meta)
        .map_err(|e| {
            tracing::debug!("{}: rejected {}: {}", registry, key, e);
            e
        })?;

    lineage::commit(definition);
    let replaced = <C::Root as InheritanceRegistry>::center()
        .insert(key, meta)
        .is_some();
    tracing::debug!(
        "{}: registered {} at depth {}{}",
        registry,
        key,
        definition.depth,
        if replaced { " (replaced)" } else { "" }
    );
    Ok(key)
}
