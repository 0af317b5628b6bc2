//! A single cache shard: bucket table, intrusive LRU list, and the
//! read/write lock guarding both.
//!
//! The LRU list and the hash chains are both expressed as indices into
//! a slab (`Vec<Option<Node>>`) rather than raw pointers — a safe,
//! doubly-linked intrusive list without `unsafe`. Freed slots are
//! tracked on a free list and reused, so the slab never grows past
//! `capacity` occupied slots plus whatever is briefly in flight during a
//! `set`.

use std::sync::atomic::Ordering;
use std::sync::{Arc, RwLock};

use anvil_core::constants::CACHE_PROMOTION_THRESHOLD;

use crate::entry::EntryInner;

struct Node {
    entry: Arc<EntryInner>,
    prev: Option<usize>,
    next: Option<usize>,
}

struct ShardInner {
    buckets: Vec<Vec<usize>>,
    slab: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    size: usize,
    capacity: usize,
}

impl ShardInner {
    fn bucket_index(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn find(&self, bucket: usize, key: &[u8]) -> Option<usize> {
        self.buckets[bucket]
            .iter()
            .copied()
            .find(|&idx| self.slab[idx].as_ref().unwrap().entry.key.as_ref() == key)
    }

    fn unlink_lru(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.slab[idx].as_ref().unwrap();
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.slab[p].as_mut().unwrap().next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slab[n].as_mut().unwrap().prev = prev,
            None => self.tail = prev,
        }
    }

    fn push_front_lru(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.slab[idx].as_mut().unwrap();
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            self.slab[h].as_mut().unwrap().prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn remove_from_bucket(&mut self, hash: u32, idx: usize) {
        let bucket = self.bucket_index(hash);
        self.buckets[bucket].retain(|&i| i != idx);
    }

    fn free_slot(&mut self, idx: usize) {
        self.slab[idx] = None;
        self.free.push(idx);
    }

    fn alloc_slot(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slab[idx] = Some(node);
                idx
            }
            None => {
                self.slab.push(Some(node));
                self.slab.len() - 1
            }
        }
    }

    /// Resets every entry's access_count to zero, then evicts the LRU
    /// tail. Run before every eviction so the lazy-promotion heuristic
    /// (which only escalates to a write lock every
    /// `CACHE_PROMOTION_THRESHOLD` reads) can't leave a stale entry
    /// artificially "hot" relative to one that simply hasn't been read
    /// since its last promotion.
    fn evict_one(&mut self) {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.slab[idx].as_ref().unwrap();
            node.entry.access_count.store(0, Ordering::Relaxed);
            cursor = node.next;
        }

        if let Some(tail) = self.tail {
            let hash = fnv1a(&self.slab[tail].as_ref().unwrap().entry.key);
            self.unlink_lru(tail);
            self.remove_from_bucket(hash, tail);
            self.free_slot(tail);
            self.size -= 1;
        }
    }
}

/// FNV-1a 32-bit hash, used both for shard selection and bucket
/// selection within a shard.
pub(crate) fn fnv1a(bytes: &[u8]) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u32;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

pub(crate) struct Shard {
    inner: RwLock<ShardInner>,
}

impl Shard {
    pub(crate) fn new(capacity: usize) -> Self {
        let bucket_count = 2 * capacity.max(1) + 1;
        Self {
            inner: RwLock::new(ShardInner {
                buckets: vec![Vec::new(); bucket_count],
                slab: Vec::new(),
                free: Vec::new(),
                head: None,
                tail: None,
                size: 0,
                capacity,
            }),
        }
    }

    pub(crate) fn get(&self, key: &[u8], hash: u32, now_ns: u64) -> GetOutcome {
        let guard = self.inner.read().unwrap();
        let bucket = guard.bucket_index(hash);
        let idx = match guard.find(bucket, key) {
            Some(idx) => idx,
            None => return GetOutcome::Miss,
        };

        let node = guard.slab[idx].as_ref().unwrap();
        if node.entry.is_expired(now_ns) {
            return GetOutcome::Expired;
        }

        let entry = Arc::clone(&node.entry);
        let post_count = entry.access_count.fetch_add(1, Ordering::AcqRel) + 1;
        drop(guard);

        if post_count >= CACHE_PROMOTION_THRESHOLD {
            self.promote(key, hash, &entry);
        }

        GetOutcome::Hit(entry)
    }

    fn promote(&self, key: &[u8], hash: u32, expected: &Arc<EntryInner>) {
        let mut guard = self.inner.write().unwrap();
        let bucket = guard.bucket_index(hash);
        if let Some(idx) = guard.find(bucket, key) {
            let still_same = Arc::ptr_eq(&guard.slab[idx].as_ref().unwrap().entry, expected);
            if still_same {
                guard.unlink_lru(idx);
                guard.push_front_lru(idx);
                guard.slab[idx]
                    .as_ref()
                    .unwrap()
                    .entry
                    .access_count
                    .store(0, Ordering::Relaxed);
            }
        }
    }

    /// Inserts or updates. Returns the entry that was evicted, if any,
    /// so the cache layer can drop it outside this shard's lock.
    pub(crate) fn set(&self, key: &[u8], value: &[u8], hash: u32, expires_at_ns: u64) {
        let mut guard = self.inner.write().unwrap();
        let bucket = guard.bucket_index(hash);

        if let Some(idx) = guard.find(bucket, key) {
            let new_entry = Arc::new(EntryInner::new(key, value, expires_at_ns));
            guard.slab[idx].as_mut().unwrap().entry = new_entry;
            guard.unlink_lru(idx);
            guard.push_front_lru(idx);
            return;
        }

        if guard.size >= guard.capacity {
            guard.evict_one();
        }

        let entry = Arc::new(EntryInner::new(key, value, expires_at_ns));
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        let idx = guard.alloc_slot(node);
        guard.buckets[bucket].push(idx);
        guard.push_front_lru(idx);
        guard.size += 1;
    }

    pub(crate) fn invalidate(&self, key: &[u8], hash: u32) {
        let mut guard = self.inner.write().unwrap();
        let bucket = guard.bucket_index(hash);
        if let Some(idx) = guard.find(bucket, key) {
            guard.unlink_lru(idx);
            guard.remove_from_bucket(hash, idx);
            guard.free_slot(idx);
            guard.size -= 1;
        }
    }

    pub(crate) fn clear(&self) {
        let mut guard = self.inner.write().unwrap();
        for bucket in &mut guard.buckets {
            bucket.clear();
        }
        guard.slab.clear();
        guard.free.clear();
        guard.head = None;
        guard.tail = None;
        guard.size = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.read().unwrap().size
    }

    pub(crate) fn capacity(&self) -> usize {
        self.inner.read().unwrap().capacity
    }
}

pub(crate) enum GetOutcome {
    Hit(Arc<EntryInner>),
    Expired,
    Miss,
}
