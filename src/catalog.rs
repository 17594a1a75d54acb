//! # Recipe Catalog Data Model
//!
//! This module defines the typed, read-only view over a loaded recipe catalog:
//! an ordered mapping from category name (one spreadsheet sheet per category)
//! to a table of ingredient rows.
//!
//! ## Core Concepts
//!
//! - **Catalog**: every sheet of the source workbook, loaded once, immutable
//!   afterwards. Passed by reference to the selector and the aggregator.
//! - **Category**: a dish grouping such as "Sopas" or "Verduras". The two
//!   reserved metadata sheets ("Ingredientes", "Unidades") are stored but are
//!   never enumerated as categories and never selectable.
//! - **RecipeRow**: one ingredient line of one dish. A multi-row recipe names
//!   the dish once and leaves `dish_name` empty on continuation lines, so the
//!   table supports a forward-fill pass before any grouping operation.
//!
//! ## Usage
//!
//! ```rust
//! use cocina_rapida::catalog::{Catalog, RecipeRow, RecipeTable};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert("Sopas", RecipeTable::from_rows(vec![
//!     RecipeRow::new(Some("Lentejas"), "lentejas", 250.0, Some("g"), Some(12)),
//!     RecipeRow::new(None, "zanahoria", 1.0, None, None),
//! ]));
//!
//! assert_eq!(catalog.categories(), vec!["Sopas"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::MenuError;

/// Sheet names that hold catalog metadata rather than dish categories
pub const RESERVED_SHEETS: [&str; 2] = ["Ingredientes", "Unidades"];

/// One ingredient line belonging to a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRow {
    /// Dish the row belongs to; `None` on continuation lines (filled from the
    /// most recent named row before any grouping, see [`RecipeTable::forward_filled`])
    pub dish_name: Option<String>,

    /// Ingredient name, exactly as it appears in the catalog
    pub ingredient_name: String,

    /// Required amount; `f64::NAN` when the source cell was not numeric
    pub quantity: f64,

    /// Unit of measure, free text, no conversion is ever applied
    pub unit: Option<String>,

    /// Page of the reference book where the recipe is printed
    pub reference_page: Option<u32>,
}

impl RecipeRow {
    pub fn new(
        dish_name: Option<&str>,
        ingredient_name: &str,
        quantity: f64,
        unit: Option<&str>,
        reference_page: Option<u32>,
    ) -> Self {
        Self {
            dish_name: dish_name.map(str::to_string),
            ingredient_name: ingredient_name.to_string(),
            quantity,
            unit: unit.map(str::to_string),
            reference_page,
        }
    }
}

/// Ordered table of recipe rows for one category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeTable {
    rows: Vec<RecipeRow>,
}

impl RecipeTable {
    pub fn from_rows(rows: Vec<RecipeRow>) -> Self {
        Self { rows }
    }

    /// Rows in catalog order, dish names as loaded (continuations still empty)
    pub fn rows(&self) -> &[RecipeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of the table with dish names carried forward over continuation rows
    ///
    /// Rows that precede the first named row keep `None`; they belong to no
    /// dish and never match a selection.
    pub fn forward_filled(&self) -> Vec<RecipeRow> {
        let mut filled = Vec::with_capacity(self.rows.len());
        let mut current: Option<String> = None;

        for row in &self.rows {
            if let Some(name) = &row.dish_name {
                current = Some(name.clone());
            }
            let mut row = row.clone();
            row.dish_name = current.clone();
            filled.push(row);
        }

        filled
    }

    /// Distinct dish names in order of first appearance
    pub fn distinct_dishes(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for row in self.forward_filled() {
            if let Some(name) = row.dish_name {
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen
    }
}

/// The full loaded catalog: category name -> recipe table, in workbook order
///
/// Loaded once per session by the catalog loader and treated as immutable
/// shared-read state from then on. There is no global instance; callers pass
/// a reference to every operation that needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    sheets: Vec<(String, RecipeTable)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    /// Add a sheet, replacing any existing sheet with the same name
    pub fn insert(&mut self, name: &str, table: RecipeTable) {
        if let Some(existing) = self.sheets.iter_mut().find(|(n, _)| n == name) {
            existing.1 = table;
        } else {
            self.sheets.push((name.to_string(), table));
        }
    }

    /// Category names in catalog order, reserved metadata sheets excluded
    pub fn categories(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !RESERVED_SHEETS.contains(name))
            .collect()
    }

    /// Whether the name is a selectable category (reserved sheets are not)
    pub fn contains(&self, category: &str) -> bool {
        !RESERVED_SHEETS.contains(&category)
            && self.sheets.iter().any(|(name, _)| name == category)
    }

    /// Recipe table for one category
    ///
    /// Fails with [`MenuError::CategoryNotFound`] when the category does not
    /// exist or names a reserved sheet. The selector and aggregator treat
    /// this as a skip condition, never as a fatal error.
    pub fn rows(&self, category: &str) -> Result<&RecipeTable, MenuError> {
        if RESERVED_SHEETS.contains(&category) {
            return Err(MenuError::CategoryNotFound(category.to_string()));
        }
        self.sheets
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, table)| table)
            .ok_or_else(|| MenuError::CategoryNotFound(category.to_string()))
    }
}
