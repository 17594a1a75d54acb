//! # Report Rendering
//!
//! Plain-text rendering of the two planning results: the recipe list (which
//! dishes to cook, with their reference pages) and the shopping list (what to
//! buy, quantities summed). Reports can be written to date-stamped files,
//! one per list, named like `Recetas-2026-08-28.txt`.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregator::IngredientSummary;
use crate::selector::SelectedDish;

/// Render the selected dishes as an aligned text table
pub fn format_recipe_list(selection: &[SelectedDish]) -> String {
    let rows: Vec<[String; 3]> = selection
        .iter()
        .map(|dish| {
            [
                dish.category.clone(),
                dish.dish_name.clone(),
                dish.reference_page
                    .map_or_else(String::new, |page| page.to_string()),
            ]
        })
        .collect();
    render_table(["Tipo", "Plato", "Página"], &rows)
}

/// Render the ingredient summary as an aligned text table
pub fn format_shopping_list(summary: &IngredientSummary) -> String {
    let rows: Vec<[String; 3]> = summary
        .iter()
        .map(|(name, total)| {
            [
                name.to_string(),
                format_quantity(total.quantity),
                total.unit.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(["Ingredientes", "Cantidades", "Unidades"], &rows)
}

/// Write a report body to `<dir>/<title>-<YYYY-MM-DD>.txt`
pub fn save_report(dir: &Path, title: &str, body: &str) -> Result<PathBuf> {
    let date = Local::now().format("%Y-%m-%d");
    let path = dir.join(format!("{title}-{date}.txt"));
    fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Whole quantities print without a decimal point
fn format_quantity(quantity: f64) -> String {
    if (quantity.floor() - quantity).abs() < f64::EPSILON {
        format!("{}", quantity as i64)
    } else {
        format!("{quantity}")
    }
}

fn render_table(headers: [&str; 3], rows: &[[String; 3]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let render_row = |cells: [&str; 3]| {
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            for _ in cell.chars().count()..width {
                line.push(' ');
            }
        }
        line.trim_end().to_string()
    };

    out.push_str(&render_row(headers));
    out.push('\n');
    for row in rows {
        out.push_str(&render_row([&row[0], &row[1], &row[2]]));
        out.push('\n');
    }
    out
}
