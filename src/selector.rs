//! # Menu Selector
//!
//! Random, non-repeating selection of dishes per category. Given a catalog
//! and a [`MenuRequest`], draws the requested number of distinct dishes from
//! each category uniformly at random without replacement and resolves each
//! drawn dish to its representative row for reference metadata.
//!
//! Missing categories, zero counts and empty categories are skip conditions
//! logged at info level; a planning run never fails because one category had
//! nothing to offer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cocina_rapida::{catalog::Catalog, request::MenuRequest, selector};
//!
//! let catalog = Catalog::new();
//! let mut request = MenuRequest::new();
//! request.set("Sopas", 2);
//!
//! for dish in selector::select(&catalog, &request) {
//!     println!("{} ({})", dish.dish_name, dish.category);
//! }
//! ```

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::request::MenuRequest;

/// One dish chosen for the menu, with its reference metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDish {
    /// Category the dish was drawn from
    pub category: String,
    /// Dish name, unique within its category in any one selection
    pub dish_name: String,
    /// Page of the reference book, when the catalog records one
    pub reference_page: Option<u32>,
}

/// Select dishes using a fresh thread-local random source
///
/// Production entry point; each invocation draws an independent menu. Use
/// [`select_with`] with a seeded generator for reproducible selections.
pub fn select(catalog: &Catalog, request: &MenuRequest) -> Vec<SelectedDish> {
    select_with(catalog, request, &mut rand::thread_rng())
}

/// Select dishes using the supplied random source
///
/// For each request entry, in request order:
/// draws `min(desired, available)` distinct dish names uniformly without
/// replacement, then emits one [`SelectedDish`] per drawn name in the order
/// the names first appear in the category table, sourcing `reference_page`
/// from the first row of each dish.
pub fn select_with<R: Rng>(
    catalog: &Catalog,
    request: &MenuRequest,
    rng: &mut R,
) -> Vec<SelectedDish> {
    let mut selected = Vec::new();

    for (category, desired) in request.entries() {
        let table = match catalog.rows(category) {
            Ok(table) => table,
            Err(_) => {
                info!("No recipes found for category {category}, skipping");
                continue;
            }
        };

        if desired == 0 {
            info!("No dishes requested for category {category}, skipping");
            continue;
        }

        let dishes = table.distinct_dishes();
        let count = dishes.len().min(desired as usize);
        if count == 0 {
            info!("No dishes available in category {category}, skipping");
            continue;
        }

        debug!("Selecting {count} of {} dishes from {category}", dishes.len());

        let drawn: HashSet<&String> = dishes.choose_multiple(rng, count).collect();
        let filled = table.forward_filled();

        // Emit in first-appearance order, taking each dish's first row as the
        // representative for reference_page.
        for name in &dishes {
            if !drawn.contains(name) {
                continue;
            }
            let reference_page = filled
                .iter()
                .find(|row| row.dish_name.as_ref() == Some(name))
                .and_then(|row| row.reference_page);
            selected.push(SelectedDish {
                category: category.to_string(),
                dish_name: name.clone(),
                reference_page,
            });
        }
    }

    selected
}
