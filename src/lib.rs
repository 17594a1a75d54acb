//! # Cocina Rápida
//!
//! Menu planner over the Arguiñano recipe catalog: draws a random,
//! non-repeating menu per dish category and consolidates the ingredient
//! quantities of the chosen dishes into a single shopping list.

pub mod aggregator;
pub mod catalog;
pub mod errors;
pub mod loader;
pub mod report;
pub mod request;
pub mod selector;
