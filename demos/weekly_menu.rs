//! # Weekly Menu Example
//!
//! This example demonstrates the library against a small in-memory catalog:
//! build a selection request, draw a reproducible menu with a seeded random
//! source, aggregate the ingredients and render both lists.
//!
//! Run with: `cargo run --example weekly_menu`

use cocina_rapida::aggregator;
use cocina_rapida::catalog::{Catalog, RecipeRow, RecipeTable};
use cocina_rapida::report;
use cocina_rapida::request::MenuRequest;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🍲 Cocina Rápida — weekly menu example");
    println!("======================================\n");

    let mut catalog = Catalog::new();
    catalog.insert(
        "Sopas",
        RecipeTable::from_rows(vec![
            RecipeRow::new(Some("Lentejas"), "lentejas", 250.0, Some("g"), Some(12)),
            RecipeRow::new(None, "cebolla", 1.0, None, None),
            RecipeRow::new(None, "chorizo", 100.0, Some("g"), None),
            RecipeRow::new(Some("Gazpacho"), "tomate", 6.0, None, Some(56)),
            RecipeRow::new(None, "cebolla", 0.5, None, None),
            RecipeRow::new(Some("Sopa de ajo"), "ajo", 4.0, Some("dientes"), Some(112)),
        ]),
    );
    catalog.insert(
        "Verduras",
        RecipeTable::from_rows(vec![
            RecipeRow::new(Some("Pisto"), "calabacín", 2.0, None, Some(81)),
            RecipeRow::new(None, "tomate", 4.0, None, None),
            RecipeRow::new(Some("Menestra"), "guisantes", 200.0, Some("g"), Some(77)),
        ]),
    );

    let mut request = MenuRequest::new();
    request.add_entry(&catalog, "Sopas", 2)?;
    request.add_entry(&catalog, "Verduras", 1)?;

    // Seeded for a reproducible demo; use aggregator::plan for a fresh menu
    let mut rng = StdRng::seed_from_u64(2024);
    let (selection, summary) = aggregator::plan_with(&catalog, &request, &mut rng)?;

    println!("=== PLATOS SELECCIONADOS ===");
    println!("{}", report::format_recipe_list(&selection));
    println!("=== INGREDIENTES NECESARIOS ===");
    println!("{}", report::format_shopping_list(&summary));

    Ok(())
}
