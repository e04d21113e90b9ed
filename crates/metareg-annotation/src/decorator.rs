//! Registration builder returned by `AnnotationRegistry::register`.
use std::marker::PhantomData;

use metareg_core::{Kwargs, Result};

use crate::AnnotationRegistry;

/// A pending registration: keywords plus what to hand back to the caller.
///
/// By default [`apply`](Decorator::apply) returns the item it registered.
/// With `keep_original(false)` it returns the configured default instead,
/// which is `None` unless [`default_return`](Decorator::default_return) set one.
#[must_use = "nothing is registered until `apply` is called"]
pub struct Decorator<R: AnnotationRegistry> {
    kwargs: Kwargs,
    keep_original: bool,
    default_return: Option<R::Item>,
    _registry: PhantomData<fn() -> R>,
}

impl<R: AnnotationRegistry> Decorator<R> {
    pub fn new(kwargs: Kwargs) -> Self {
        Self {
            kwargs,
            keep_original: true,
            default_return: None,
            _registry: PhantomData,
        }
    }

    pub fn keep_original(mut self, keep_original: bool) -> Self {
        self.keep_original = keep_original;
        self
    }

    pub fn default_return(mut self, default_return: R::Item) -> Self {
        self.default_return = Some(default_return);
        self
    }

    /// Register `item`, overwriting any prior entry.
    ///
    /// Fails without storing anything when a construction hook rejects the
    /// keywords.
    pub fn apply(self, item: R::Item) -> Result<Option<R::Item>> {
        let meta = R::make_meta(&item, self.kwargs).and_then(R::check_meta)?;
        let replaced = R::center().insert(item.clone(), meta).is_some();
        tracing::debug!(
            "{}: registered {:?}{}",
            R::settings().name,
            item,
            if replaced { " (replaced)" } else { "" }
        );

        if self.keep_original {
            Ok(Some(item))
        } else {
            Ok(self.default_return)
        }
    }
}
