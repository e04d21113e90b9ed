//! Lineage arena: one definition per root or subtype, linked by parent slot
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;

use metareg_core::{RegistryError, Result, TypeKey};

use crate::{InheritanceRegistry, RegistryBase};

/// Where a type sits in its lineage, resolved once when it is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition {
    pub key: TypeKey,
    /// Immediate parent; the sentinel [`RegistryBase`] for a root.
    pub parent: TypeKey,
    /// Owning root whose center holds the registration.
    pub root: TypeKey,
    /// 0 for a root, 1 for its direct subtypes, and so on.
    pub depth: usize,
}

impl Definition {
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    pub fn parent_is_root(&self) -> bool {
        self.parent == self.root
    }

    /// The parent's stored metadata, when the parent is a registered subtype.
    ///
    /// `R` must be this definition's root; any other registry is a
    /// `LineageError`.
    pub fn parent_meta<R: InheritanceRegistry>(&self) -> Result<Option<R::Meta>> {
        let registry = TypeKey::of::<R>();
        if registry != self.root {
            return Err(RegistryError::LineageError(format!(
                "{} belongs to {}, not {}",
                self.key, self.root, registry
            )));
        }
        if self.parent_is_root() {
            return Ok(None);
        }
        Ok(R::center().get(&self.parent).ok())
    }
}

struct Node {
    definition: Definition,
    parent: Option<usize>,
}

#[derive(Default)]
struct Arena {
    nodes: Vec<Node>,
    index: HashMap<TypeKey, usize>,
}

impl Arena {
    fn slot_of_root(&mut self, root: TypeKey) -> usize {
        if let Some(&slot) = self.index.get(&root) {
            return slot;
        }
        self.push(
            Definition {
                key: root,
                parent: TypeKey::of::<RegistryBase>(),
                root,
                depth: 0,
            },
            None,
        )
    }

    fn push(&mut self, definition: Definition, parent: Option<usize>) -> usize {
        let slot = self.nodes.len();
        self.nodes.push(Node { definition, parent });
        self.index.insert(definition.key, slot);
        slot
    }
}

static LINEAGE: Lazy<RwLock<Arena>> = Lazy::new(|| RwLock::new(Arena::default()));

/// Work out the definition of `key` under `parent` without recording it.
pub(crate) fn resolve(key: TypeKey, parent: TypeKey, root: TypeKey) -> Result<Definition> {
    if key == root {
        return Err(RegistryError::LineageError(format!(
            "{} is a lineage root and is never registered",
            key
        )));
    }
    if key == parent {
        return Err(RegistryError::LineageError(format!("{} derives from itself", key)));
    }

    if parent == root {
        return Ok(Definition {
            key,
            parent,
            root,
            depth: 1,
        });
    }

    let arena = LINEAGE.read();
    let parent_def = arena
        .index
        .get(&parent)
        .map(|&slot| arena.nodes[slot].definition)
        .ok_or_else(|| {
            RegistryError::LineageError(format!(
                "{} derives from {}, which has not been defined",
                key, parent
            ))
        })?;

    if parent_def.root != root {
        return Err(RegistryError::LineageError(format!(
            "{} belongs to {}, not {}",
            parent, parent_def.root, root
        )));
    }

    Ok(Definition {
        key,
        parent,
        root,
        depth: parent_def.depth + 1,
    })
}

/// Record a definition produced by [`resolve`]. Redefinition keeps the slot.
pub(crate) fn commit(definition: Definition) {
    let mut guard = LINEAGE.write();
    let arena = &mut *guard;
    let parent = if definition.parent_is_root() {
        Some(arena.slot_of_root(definition.root))
    } else {
        arena.index.get(&definition.parent).copied()
    };

    match arena.index.get(&definition.key).copied() {
        Some(slot) => arena.nodes[slot] = Node { definition, parent },
        None => {
            arena.push(definition, parent);
        }
    }
}

/// The recorded definition of `key`, if it is a known root or subtype.
pub fn definition(key: &TypeKey) -> Option<Definition> {
    let arena = LINEAGE.read();
    arena.index.get(key).map(|&slot| arena.nodes[slot].definition)
}

/// Ancestors of `key`, nearest first, ending with its root.
///
/// Empty for roots and for types that were never defined.
pub fn ancestors(key: &TypeKey) -> Vec<TypeKey> {
    let arena = LINEAGE.read();
    let mut chain = Vec::new();
    let mut cursor = arena.index.get(key).and_then(|&slot| arena.nodes[slot].parent);
    while let Some(slot) = cursor {
        let node = &arena.nodes[slot];
        chain.push(node.definition.key);
        cursor = node.parent;
    }
    chain
}
