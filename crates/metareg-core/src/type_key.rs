//! Stable identifiers for Rust types used as registry keys.
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a type: compared and hashed by [`TypeId`], displayed by name.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its leading path (`Hammer` for `tools::Hammer`,
    /// `Rack<tools::Hammer>` for `tools::Rack<tools::Hammer>`).
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

/// Strip the module path of a `type_name`, leaving generic arguments intact.
pub fn short_type_name(name: &str) -> &str {
    let head = name.find('<').map_or(name, |generics| &name[..generics]);
    match head.rfind("::") {
        Some(sep) => &name[sep + 2..],
        None => name,
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}
