//! In-flight Registry
//!
//! Keys with a request outstanding. A second `begin` for a key that is still
//! active is refused; the key is released when the returned guard drops.

use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug)]
pub(crate) struct InFlight<K> {
    active: RefCell<HashSet<K>>,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            active: RefCell::new(HashSet::new()),
        }
    }
}

impl<K: Copy + Eq + Hash> InFlight<K> {
    /// `None` when the key is already in flight
    pub(crate) fn begin(&self, key: K) -> Option<InFlightGuard<'_, K>> {
        if !self.active.borrow_mut().insert(key) {
            return None;
        }
        Some(InFlightGuard { registry: self, key })
    }

    pub(crate) fn is_active(&self, key: K) -> bool {
        self.active.borrow().contains(&key)
    }
}

pub(crate) struct InFlightGuard<'a, K: Copy + Eq + Hash> {
    registry: &'a InFlight<K>,
    key: K,
}

impl<K: Copy + Eq + Hash> Drop for InFlightGuard<'_, K> {
    fn drop(&mut self) {
        self.registry.active.borrow_mut().remove(&self.key);
    }
}
