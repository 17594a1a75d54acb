use anyhow::Result;
use log::{info, warn};
use std::env;
use std::path::Path;

use cocina_rapida::aggregator;
use cocina_rapida::loader::{self, DEFAULT_CATALOG_URL};
use cocina_rapida::report;
use cocina_rapida::request::MenuRequest;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting Cocina Rápida menu planner");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Catalog location, overridable for mirrors or local copies
    let url = env::var("CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());

    let catalog = loader::load_catalog(&url).await?;

    // Arguments are Categoria=N pairs, plus --save to write report files
    let mut request = MenuRequest::new();
    let mut save = false;
    for arg in env::args().skip(1) {
        if arg == "--save" {
            save = true;
            continue;
        }
        let Some((category, count)) = arg.split_once('=') else {
            warn!("Ignoring argument '{arg}', expected Categoria=N");
            continue;
        };
        let count: u32 = match count.parse() {
            Ok(count) => count,
            Err(_) => {
                warn!("Ignoring entry '{arg}', '{count}' is not a valid count");
                continue;
            }
        };
        if let Err(err) = request.add_entry(&catalog, category, count) {
            warn!("Ignoring entry '{arg}': {err}");
        }
    }

    if request.is_empty() {
        println!("Available categories:");
        for category in catalog.categories() {
            println!("- {category}");
        }
        println!("\nUsage: cocina-rapida [--save] Categoria=N [Categoria=N ...]");
        return Ok(());
    }

    let (selection, summary) = aggregator::plan(&catalog, &request)?;

    let recipes = report::format_recipe_list(&selection);
    let shopping = report::format_shopping_list(&summary);

    println!("=== PLATOS SELECCIONADOS ===");
    println!("{recipes}");
    println!("=== INGREDIENTES NECESARIOS ===");
    println!("{shopping}");

    if save {
        let dir = Path::new(".");
        let path = report::save_report(dir, "Recetas", &recipes)?;
        info!("Recipe list saved to {}", path.display());
        let path = report::save_report(dir, "Compra", &shopping)?;
        info!("Shopping list saved to {}", path.display());
    }

    Ok(())
}
