use super::store::{load_json, save_json, PersistedStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Items that can be compared side by side.
pub const MAX_SELECTED: usize = 4;
/// Fewer than this is not a comparison.
pub const MIN_TO_COMPARE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("You can compare up to {max} products at a time")]
    CapacityExceeded { max: usize },
    #[error("Please select at least {min} products to compare")]
    TooFew { min: usize },
}

/// Identity of a selectable entity.
pub trait SelectionKey {
    fn selection_key(&self) -> &str;
}

impl SelectionKey for contracts::projections::p911_compare::dto::ProductDto {
    fn selection_key(&self) -> &str {
        &self.model_id
    }
}

impl SelectionKey for contracts::projections::p910_best_deals::dto::BestDealDto {
    fn selection_key(&self) -> &str {
        &self.model_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
}

/// Ordered set of at most `capacity` entities, unique by key.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedSelection<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for BoundedSelection<T> {
    fn default() -> Self {
        Self::new(MAX_SELECTED)
    }
}

impl<T> BoundedSelection<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: SelectionKey> BoundedSelection<T> {
    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|i| i.selection_key() == key)
    }

    /// Removes the entity when present, otherwise appends it. A full set
    /// rejects the addition and stays unchanged.
    pub fn toggle(&mut self, item: T) -> Result<SelectionChange, SelectionError> {
        if self.remove(item.selection_key()) {
            return Ok(SelectionChange::Removed);
        }
        if self.is_full() {
            return Err(SelectionError::CapacityExceeded {
                max: self.capacity,
            });
        }
        self.items.push(item);
        Ok(SelectionChange::Added)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.selection_key() != key);
        self.items.len() != before
    }

    pub fn keys(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.selection_key()).collect()
    }

    /// Path of the side-by-side comparison of the selected entities.
    pub fn compare_link(&self) -> Result<String, SelectionError> {
        if self.items.len() < MIN_TO_COMPARE {
            return Err(SelectionError::TooFew {
                min: MIN_TO_COMPARE,
            });
        }
        let models = self
            .keys()
            .into_iter()
            .map(|k| urlencoding::encode(k).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        Ok(format!("/compare-results?models={}", models))
    }

    /// Builds a set from untrusted input: later duplicates are dropped and
    /// the rest is cut to capacity.
    pub fn from_items(items: Vec<T>, capacity: usize) -> Self {
        let mut set = Self::new(capacity);
        for item in items {
            if set.is_full() {
                break;
            }
            if !set.contains(item.selection_key()) {
                set.items.push(item);
            }
        }
        set
    }
}

impl<T: SelectionKey + Serialize + DeserializeOwned> BoundedSelection<T> {
    pub fn load(store: &impl PersistedStore, key: &str, capacity: usize) -> Self {
        let items = load_json::<Vec<T>>(store, key).unwrap_or_default();
        Self::from_items(items, capacity)
    }

    pub fn save(&self, store: &impl PersistedStore, key: &str) {
        save_json(store, key, &self.items);
    }
}
