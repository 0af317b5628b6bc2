//! Zero-copy handle returned by [`crate::Cache::get`].

use std::sync::Arc;

use crate::entry::EntryInner;

/// A reference into the cache's stored bytes.
///
/// Holding one keeps the underlying value alive even if the entry is
/// invalidated, evicted, or the whole `Cache` is dropped in the
/// meantime. Dropping a `CacheRef` releases the reference;
/// [`CacheRef::release`] does the same thing explicitly, for callers
/// who'd rather not rely on scope exit.
pub struct CacheRef {
    pub(crate) inner: Arc<EntryInner>,
}

impl CacheRef {
    /// The value bytes as of the moment this reference was taken.
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner.value
    }

    /// The key this entry was stored under.
    pub fn key(&self) -> &[u8] {
        &self.inner.key
    }

    /// Explicit release, equivalent to dropping `self`. Provided for
    /// symmetry with call sites that would otherwise need an
    /// awkwardly-scoped `drop(ref)`.
    pub fn release(self) {
        drop(self)
    }
}

impl std::fmt::Debug for CacheRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRef")
            .field("key_len", &self.inner.key.len())
            .field("value_len", &self.inner.value.len())
            .finish()
    }
}
