//! Optional memoization of function descriptors.
//!
//! Descriptors are pure functions of a buffer and a pointer, and buffers
//! are never mutated, so a cache entry stays valid for as long as its
//! buffer lives.  Entries are keyed by [`BufferId`] plus pointer; callers
//! drop a buffer's entries with [`DescriptorCache::evict_buffer`] when they
//! drop the buffer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::signature::describe_function;
use crate::tokens::{BufferId, TokenBuffer};
use crate::types::FunctionDescriptor;

#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: RwLock<HashMap<(BufferId, usize), Arc<FunctionDescriptor>>>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached descriptor, describing and storing it first if
    /// needed.
    pub fn get_or_describe(&self, buffer: &TokenBuffer, pointer: usize) -> Arc<FunctionDescriptor> {
        let key = (buffer.id(), pointer);
        if let Some(descriptor) = self.entries.read().get(&key) {
            return Arc::clone(descriptor);
        }

        // Describe outside the lock; a racing thread may insert first, in
        // which case its (identical) descriptor wins.
        let descriptor = Arc::new(describe_function(buffer, pointer));
        Arc::clone(self.entries.write().entry(key).or_insert(descriptor))
    }

    /// Drop every entry that belongs to `buffer`.
    pub fn evict_buffer(&self, buffer: BufferId) {
        self.entries.write().retain(|(id, _), _| *id != buffer);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
