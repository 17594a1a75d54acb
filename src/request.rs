//! # Selection Request Module
//!
//! A [`MenuRequest`] holds the caller's desired dish count per category. It is
//! caller-owned mutable state, built incrementally by the presentation layer
//! (add / edit / remove), and read as a snapshot by the selector and the
//! aggregator. Iteration order is insertion order, which is also the order
//! categories appear in the planned menu.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::errors::RequestError;

/// Desired dish count per category, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRequest {
    entries: Vec<(String, u32)>,
}

impl MenuRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a category's desired count without catalog validation
    ///
    /// Updates the count in place when the category is already present,
    /// keeping its position. Callers that surface entry errors to a user
    /// should prefer [`MenuRequest::add_entry`].
    pub fn set(&mut self, category: &str, count: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == category) {
            entry.1 = count;
        } else {
            self.entries.push((category.to_string(), count));
        }
    }

    /// Add or update an entry, validating it against the catalog
    ///
    /// Fails with [`RequestError::InvalidCategory`] when the category is not
    /// a selectable catalog category, and [`RequestError::InvalidCount`] when
    /// the count is zero. Invalid entries are rejected here and never reach
    /// the selection code.
    pub fn add_entry(
        &mut self,
        catalog: &Catalog,
        category: &str,
        count: u32,
    ) -> Result<(), RequestError> {
        if !catalog.contains(category) {
            return Err(RequestError::InvalidCategory(category.to_string()));
        }
        if count == 0 {
            return Err(RequestError::InvalidCount(format!(
                "{category}: count must be at least 1"
            )));
        }
        self.set(category, count);
        Ok(())
    }

    /// Replace an entry, equivalent to remove + add
    pub fn edit_entry(
        &mut self,
        catalog: &Catalog,
        old_category: &str,
        new_category: &str,
        count: u32,
    ) -> Result<(), RequestError> {
        // Validate before removing so a failed edit leaves the request intact
        if !catalog.contains(new_category) {
            return Err(RequestError::InvalidCategory(new_category.to_string()));
        }
        if count == 0 {
            return Err(RequestError::InvalidCount(format!(
                "{new_category}: count must be at least 1"
            )));
        }
        self.remove_entry(old_category);
        self.set(new_category, count);
        Ok(())
    }

    /// Remove an entry; no-op when the category is absent
    pub fn remove_entry(&mut self, category: &str) {
        self.entries.retain(|(name, _)| name != category);
    }

    /// Entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
