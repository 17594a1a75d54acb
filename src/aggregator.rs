//! # Ingredient Aggregator
//!
//! Folds the ingredient rows of an already-selected menu into a single
//! shopping summary: one entry per ingredient name with the summed quantity
//! and a representative unit.
//!
//! Aggregation always operates on the exact [`SelectedDish`] list produced by
//! the selector, never on a fresh draw, so the shopping list and the recipe
//! list can never disagree about which dishes were chosen. Use [`plan`] to
//! run both steps over a single selection.
//!
//! Quantities are summed nominally per ingredient name. No unit conversion
//! or unit-consistency check is performed; the unit reported is the one on
//! the first row encountered for that ingredient. This is a documented
//! limitation of the catalog format, which keeps units consistent per
//! ingredient by convention.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use crate::catalog::Catalog;
use crate::errors::MenuError;
use crate::request::MenuRequest;
use crate::selector::{self, SelectedDish};

/// Summed quantity and representative unit for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientTotal {
    pub quantity: f64,
    /// Unit of the first row contributed for this ingredient
    pub unit: Option<String>,
}

/// Consolidated shopping list: ingredient name -> total, in name order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientSummary {
    totals: BTreeMap<String, IngredientTotal>,
}

impl IngredientSummary {
    pub fn get(&self, ingredient: &str) -> Option<&IngredientTotal> {
        self.totals.get(ingredient)
    }

    /// Entries in ascending ingredient-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IngredientTotal)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Sum the ingredients of the given dish selection
///
/// Rows are matched per category against the dish names in `selection` after
/// forward-filling, so continuation rows contribute to their dish. An empty
/// selection produces an empty summary. Fails with [`MenuError::Aggregation`]
/// when a contributing row carries a non-numeric quantity; that is the only
/// fatal condition.
pub fn aggregate(
    catalog: &Catalog,
    selection: &[SelectedDish],
) -> Result<IngredientSummary, MenuError> {
    let mut summary = IngredientSummary::default();

    // Categories in selection order, each visited once
    let mut categories = Vec::new();
    for dish in selection {
        if !categories.contains(&dish.category.as_str()) {
            categories.push(dish.category.as_str());
        }
    }

    for category in categories {
        let table = match catalog.rows(category) {
            Ok(table) => table,
            // A selection normally only names categories that exist; a stale
            // selection against a different catalog degrades to a skip.
            Err(_) => continue,
        };

        let chosen: HashSet<&str> = selection
            .iter()
            .filter(|dish| dish.category == category)
            .map(|dish| dish.dish_name.as_str())
            .collect();

        let mut contributed = 0usize;
        for row in table.forward_filled() {
            let dish = match &row.dish_name {
                Some(name) if chosen.contains(name.as_str()) => name,
                _ => continue,
            };
            if row.quantity.is_nan() {
                return Err(MenuError::Aggregation(format!(
                    "non-numeric quantity for ingredient '{}' in dish '{dish}' ({category})",
                    row.ingredient_name
                )));
            }
            match summary.totals.entry(row.ingredient_name.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(IngredientTotal {
                        quantity: row.quantity,
                        unit: row.unit.clone(),
                    });
                }
                Entry::Occupied(mut entry) => {
                    entry.get_mut().quantity += row.quantity;
                }
            }
            contributed += 1;
        }

        debug!("{contributed} ingredient rows contributed from {category}");
    }

    Ok(summary)
}

/// Select a menu and aggregate its ingredients in one pass
///
/// Guarantees the summary is computed over exactly the returned selection.
pub fn plan(
    catalog: &Catalog,
    request: &MenuRequest,
) -> Result<(Vec<SelectedDish>, IngredientSummary), MenuError> {
    plan_with(catalog, request, &mut rand::thread_rng())
}

/// [`plan`] with an injected random source, for reproducible menus
pub fn plan_with<R: Rng>(
    catalog: &Catalog,
    request: &MenuRequest,
    rng: &mut R,
) -> Result<(Vec<SelectedDish>, IngredientSummary), MenuError> {
    let selection = selector::select_with(catalog, request, rng);
    let summary = aggregate(catalog, &selection)?;
    Ok((selection, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RecipeRow, RecipeTable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sopas_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Sopas",
            RecipeTable::from_rows(vec![
                RecipeRow::new(Some("Lentejas"), "cebolla", 1.0, None, Some(12)),
                RecipeRow::new(None, "aceite", 2.0, Some("cucharadas"), None),
                RecipeRow::new(Some("Fideo"), "fideos", 100.0, Some("g"), Some(34)),
                RecipeRow::new(None, "cebolla", 0.5, None, None),
                RecipeRow::new(Some("Gazpacho"), "tomate", 6.0, None, None),
            ]),
        );
        catalog
    }

    fn dish(category: &str, name: &str) -> SelectedDish {
        SelectedDish {
            category: category.to_string(),
            dish_name: name.to_string(),
            reference_page: None,
        }
    }

    #[test]
    fn test_quantities_summed_across_dishes() {
        let catalog = sopas_catalog();
        let selection = vec![dish("Sopas", "Lentejas"), dish("Sopas", "Fideo")];

        let summary = aggregate(&catalog, &selection).unwrap();

        // cebolla appears in both dishes: 1.0 + 0.5
        let cebolla = summary.get("cebolla").unwrap();
        assert_eq!(cebolla.quantity, 1.5);
        assert_eq!(summary.get("fideos").unwrap().quantity, 100.0);
        assert_eq!(summary.get("aceite").unwrap().quantity, 2.0);
        assert!(summary.get("tomate").is_none());
    }

    #[test]
    fn test_unit_taken_from_first_row() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Sopas",
            RecipeTable::from_rows(vec![
                RecipeRow::new(Some("A"), "arroz", 200.0, Some("g"), None),
                RecipeRow::new(Some("B"), "arroz", 1.0, Some("taza"), None),
            ]),
        );
        let selection = vec![dish("Sopas", "A"), dish("Sopas", "B")];

        let summary = aggregate(&catalog, &selection).unwrap();
        let arroz = summary.get("arroz").unwrap();
        assert_eq!(arroz.quantity, 201.0);
        assert_eq!(arroz.unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_aggregation_is_deterministic_for_a_selection() {
        let catalog = sopas_catalog();
        let selection = vec![dish("Sopas", "Lentejas"), dish("Sopas", "Gazpacho")];

        let first = aggregate(&catalog, &selection).unwrap();
        let second = aggregate(&catalog, &selection).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_selection_gives_empty_summary() {
        let catalog = sopas_catalog();
        let summary = aggregate(&catalog, &[]).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_selection_for_missing_category_skipped() {
        let catalog = sopas_catalog();
        let selection = vec![dish("Postres", "Flan")];
        assert!(aggregate(&catalog, &selection).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_quantity_fails() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Sopas",
            RecipeTable::from_rows(vec![RecipeRow::new(
                Some("Lentejas"),
                "sal",
                f64::NAN,
                None,
                None,
            )]),
        );
        let selection = vec![dish("Sopas", "Lentejas")];

        let err = aggregate(&catalog, &selection).unwrap_err();
        assert!(matches!(err, MenuError::Aggregation(msg) if msg.contains("sal")));
    }

    #[test]
    fn test_non_numeric_quantity_in_unselected_dish_is_ignored() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Sopas",
            RecipeTable::from_rows(vec![
                RecipeRow::new(Some("Lentejas"), "cebolla", 1.0, None, None),
                RecipeRow::new(Some("Fideo"), "sal", f64::NAN, None, None),
            ]),
        );
        let selection = vec![dish("Sopas", "Lentejas")];

        assert!(aggregate(&catalog, &selection).is_ok());
    }

    #[test]
    fn test_plan_summary_matches_its_own_selection() {
        let catalog = sopas_catalog();
        let mut request = MenuRequest::new();
        request.set("Sopas", 2);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (selection, summary) = plan_with(&catalog, &request, &mut rng).unwrap();

            let recomputed = aggregate(&catalog, &selection).unwrap();
            assert_eq!(summary, recomputed);
        }
    }

    #[test]
    fn test_conservation_against_raw_rows() {
        let catalog = sopas_catalog();
        let selection = vec![dish("Sopas", "Lentejas"), dish("Sopas", "Fideo")];
        let summary = aggregate(&catalog, &selection).unwrap();

        let chosen: HashSet<&str> = selection.iter().map(|d| d.dish_name.as_str()).collect();
        let filled = catalog.rows("Sopas").unwrap().forward_filled();
        for (name, total) in summary.iter() {
            let expected: f64 = filled
                .iter()
                .filter(|row| {
                    row.ingredient_name == name
                        && row
                            .dish_name
                            .as_deref()
                            .is_some_and(|dish| chosen.contains(dish))
                })
                .map(|row| row.quantity)
                .sum();
            assert_eq!(total.quantity, expected, "conservation failed for {name}");
        }
    }
}
