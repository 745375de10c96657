use crate::models::{Ad, Company, GeneratedImage};
use serde::Serialize;

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Company {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Ad {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for GeneratedImage {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered copy of a backend collection. Selections elsewhere hold ids and
/// resolve through [`Collection::get`], so they always see the fetched value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Newest first. An entry with the same id is moved to the front, so an
    /// id appears at most once. Returns true when the id was not yet present.
    pub fn prepend(&mut self, item: T) -> bool {
        let fresh = self.remove(item.id()).is_none();
        self.items.insert(0, item);
        fresh
    }

    /// Adds `item` at the end, or replaces the entry with the same id in
    /// place. Returns true when the id was not yet present.
    pub fn append(&mut self, item: T) -> bool {
        match self.position(item.id()) {
            Some(index) => {
                self.items[index] = item;
                false
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }

    /// Replaces the entry with the same id in place. Unknown ids are not
    /// inserted; returns whether an entry was replaced.
    pub fn replace(&mut self, item: T) -> bool {
        match self.position(item.id()) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
