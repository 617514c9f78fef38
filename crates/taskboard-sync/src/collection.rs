//! Collection Store
//!
//! In-memory cache of one resource collection, keyed by entity id and kept
//! in first-insertion order. Holds raw server entities only; anything
//! derived from them is computed on read (see `metrics`).

use crate::models::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T: Entity> {
    entries: Vec<T>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        collection.replace_all(entities);
        collection
    }

    /// Entities in insertion order
    pub fn list(&self) -> &[T] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.entries.iter().find(|entity| entity.id() == id)
    }

    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.entries.iter_mut().find(|entity| entity.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the end if the id is new, else replace in place
    pub fn upsert(&mut self, entity: T) {
        match self.position(entity.id()) {
            Some(index) => self.entries[index] = entity,
            None => self.entries.push(entity),
        }
    }

    /// Remove by id, returning the evicted entity
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Drop every entity the predicate rejects, keeping order
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.entries.retain(keep);
    }

    /// Swap in a freshly loaded collection.
    ///
    /// A payload repeating an id keeps the first position and the last value.
    pub fn replace_all(&mut self, entities: impl IntoIterator<Item = T>) {
        self.entries.clear();
        for entity in entities {
            self.upsert(entity);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, id: T::Id) -> Option<usize> {
        self.entries.iter().position(|entity| entity.id() == id)
    }
}
