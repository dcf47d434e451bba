//! Per-request loader registry.
//!
//! Batching loaders (the kind that collect keys during one request and resolve
//! them together) must live exactly as long as the request that uses them.
//! A [`RequestContext`] is created per request and passed down explicitly;
//! each loader type gets one instance, created lazily on first use.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Loaders for one request, keyed by their Rust type.
///
/// ```
/// use keyset::RequestContext;
///
/// #[derive(Default)]
/// struct AuthorLoader {
///     pending: Vec<i64>,
/// }
///
/// let mut ctx = RequestContext::new();
/// ctx.loader(AuthorLoader::default).pending.push(7);
/// ctx.loader(AuthorLoader::default).pending.push(9);
///
/// assert_eq!(ctx.len(), 1);
/// assert_eq!(ctx.get::<AuthorLoader>().unwrap().pending, vec![7, 9]);
/// ```
#[derive(Default)]
pub struct RequestContext {
    loaders: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl RequestContext {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The request's instance of `L`, created with `init` on first use.
    ///
    /// `init` is not called when the loader already exists.
    #[allow(clippy::expect_used)]
    pub fn loader<L>(&mut self, init: impl FnOnce() -> L) -> &mut L
    where
        L: Any + Send,
    {
        let slot = match self.loaders.entry(TypeId::of::<L>()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                log::trace!("request context: new loader {}", std::any::type_name::<L>());
                e.insert(Box::new(init()))
            },
        };
        // Slots are keyed by the TypeId of the value they hold
        slot.downcast_mut::<L>()
            .expect("loader slot holds a value of its own type")
    }

    /// The request's instance of `L`, if one was created.
    #[must_use]
    pub fn get<L: Any + Send>(&self) -> Option<&L> {
        self.loaders
            .get(&TypeId::of::<L>())
            .and_then(|b| b.downcast_ref::<L>())
    }

    /// Number of loaders created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Returns `true` if no loader was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("loaders", &self.loaders.len())
            .finish()
    }
}
