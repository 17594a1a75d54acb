//! # Error Types Module
//!
//! This module defines the custom error types used by the menu planning core.
//! Category-level problems during a planning run (a requested category that
//! does not exist, a category with no dishes) are skip conditions, not errors;
//! only data-integrity and loading failures are surfaced through these types.

/// Errors produced by the catalog view, the aggregator and the catalog loader
#[derive(Debug, Clone)]
pub enum MenuError {
    /// A category name was looked up that the catalog does not contain
    CategoryNotFound(String),
    /// A non-numeric quantity was encountered while summing ingredients
    Aggregation(String),
    /// The catalog could not be fetched or parsed
    CatalogLoad(String),
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuError::CategoryNotFound(name) => write!(f, "Category not found: {name}"),
            MenuError::Aggregation(msg) => write!(f, "Aggregation error: {msg}"),
            MenuError::CatalogLoad(msg) => write!(f, "Catalog load error: {msg}"),
        }
    }
}

impl std::error::Error for MenuError {}

impl From<anyhow::Error> for MenuError {
    fn from(err: anyhow::Error) -> Self {
        MenuError::CatalogLoad(err.to_string())
    }
}

/// Errors produced while building a [`MenuRequest`](crate::request::MenuRequest)
///
/// These are rejected at entry-creation time by the presentation layer and
/// never reach the selection or aggregation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The category is unknown to the catalog, or is a reserved metadata sheet
    InvalidCategory(String),
    /// The desired dish count is not a positive integer
    InvalidCount(String),
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::InvalidCategory(name) => write!(f, "Invalid category: {name}"),
            RequestError::InvalidCount(msg) => write!(f, "Invalid count: {msg}"),
        }
    }
}

impl std::error::Error for RequestError {}
