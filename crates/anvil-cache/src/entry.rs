//! The value stored behind a cache slot.

use std::sync::atomic::AtomicU32;

/// The immutable payload shared between a shard's internal bookkeeping
/// and every outstanding [`crate::CacheRef`].
///
/// `Arc<EntryInner>` gives this entry manual-refcount semantics for
/// free: cloning the `Arc` is the increment, dropping it is the
/// decrement, and the allocation is freed by the runtime exactly when
/// the strong count reaches zero — whether that happens before or after
/// the shard has unlinked the entry. `access_count` is the one
/// field genuinely mutated after construction (by reads, for the
/// promotion heuristic), so it alone needs interior mutability;
/// `key`/`value`/`expires_at` are fixed for the entry's lifetime — an
/// update to an existing key allocates a fresh `EntryInner` rather than
/// mutating one a reader might be holding a reference into.
pub(crate) struct EntryInner {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: Box<[u8]>,
    pub(crate) expires_at_ns: u64,
    pub(crate) access_count: AtomicU32,
}

impl EntryInner {
    pub(crate) fn new(key: &[u8], value: &[u8], expires_at_ns: u64) -> Self {
        Self {
            key: Box::from(key),
            value: Box::from(value),
            expires_at_ns,
            access_count: AtomicU32::new(0),
        }
    }

    pub(crate) fn is_expired(&self, now_ns: u64) -> bool {
        now_ns >= self.expires_at_ns
    }
}
