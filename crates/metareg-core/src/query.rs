//! Queries over a metadata center.
use serde_json::Value;

use crate::meta::{is_superset, Kwargs, MetaShape};

type Predicate<'a, M> = Box<dyn Fn(&M) -> bool + 'a>;

/// Selects the first entry whose metadata matches.
///
/// A predicate, when set, decides alone and the partial keywords are ignored.
/// Without one, an entry matches when its fields are a superset of the
/// partial keywords; an empty partial matches any entry.
pub struct Query<'a, M> {
    partial: Kwargs,
    predicate: Option<Predicate<'a, M>>,
}

impl<'a, M: MetaShape> Query<'a, M> {
    /// Matches every entry.
    pub fn all() -> Self {
        Self {
            partial: Kwargs::new(),
            predicate: None,
        }
    }

    pub fn partial(partial: Kwargs) -> Self {
        Self {
            partial,
            predicate: None,
        }
    }

    pub fn matching(predicate: impl Fn(&M) -> bool + 'a) -> Self {
        Self::all().predicate(predicate)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.partial.insert(key.into(), value.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Fn(&M) -> bool + 'a) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn partial_kwargs(&self) -> &Kwargs {
        &self.partial
    }

    /// Whether `meta` satisfies this query.
    pub fn matches(&self, meta: &M) -> bool {
        if let Some(predicate) = &self.predicate {
            return predicate(meta);
        }
        if self.partial.is_empty() {
            return true;
        }
        match meta.fields() {
            Ok(fields) => is_superset(&fields, &self.partial),
            Err(e) => {
                tracing::warn!("skipping metadata that cannot be viewed as fields: {}", e);
                false
            }
        }
    }
}

impl<'a, M: MetaShape> From<Kwargs> for Query<'a, M> {
    fn from(partial: Kwargs) -> Self {
        Self::partial(partial)
    }
}

impl<'a, M> std::fmt::Debug for Query<'a, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("partial", &self.partial)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}
