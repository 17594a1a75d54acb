//! # Catalog Loader
//!
//! Fetches the recipe workbook (an XLSX published on GitHub) and turns it
//! into a typed [`Catalog`]. All column-name and cell normalization happens
//! here, at the load boundary, so the selection and aggregation code never
//! branches on spreadsheet quirks such as the accented "Página" header.
//!
//! The fetch retries with a jittered backoff before giving up; parsing is
//! done in memory over the downloaded bytes.

use anyhow::{anyhow, Context, Result};
use calamine::{Data, Reader, Xlsx};
use log::{debug, info, warn};
use rand::Rng;
use std::io::Cursor;
use std::time::Duration;

use crate::catalog::{Catalog, RecipeRow, RecipeTable};
use crate::errors::MenuError;

/// Published location of the recipe workbook
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/alherca25/CocinaArguinyano/main/CocinaArguinyano.xlsx";

const FETCH_ATTEMPTS: u32 = 3;
const RETRY_BASE_MS: u64 = 500;
const RETRY_JITTER_MS: u64 = 250;

/// Download and parse the catalog workbook
///
/// Fetch failures are retried a bounded number of times with jittered
/// backoff; anything still failing surfaces as [`MenuError::CatalogLoad`].
pub async fn load_catalog(url: &str) -> Result<Catalog, MenuError> {
    info!("Loading recipe catalog from {url}");
    let bytes = fetch_with_retry(url).await?;
    let catalog = parse_workbook(&bytes)?;
    info!("Catalog loaded: {} categories", catalog.categories().len());
    Ok(catalog)
}

async fn fetch_with_retry(url: &str) -> Result<Vec<u8>, MenuError> {
    let mut last_err = None;

    for attempt in 1..=FETCH_ATTEMPTS {
        match fetch_bytes(url).await {
            Ok(bytes) => return Ok(bytes),
            Err(err) => {
                warn!("Catalog fetch attempt {attempt}/{FETCH_ATTEMPTS} failed: {err:#}");
                last_err = Some(err);
                if attempt < FETCH_ATTEMPTS {
                    let jitter = rand::thread_rng().gen_range(0..RETRY_JITTER_MS);
                    let backoff =
                        Duration::from_millis(RETRY_BASE_MS * u64::from(attempt) + jitter);
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    Err(last_err
        .unwrap_or_else(|| anyhow!("catalog fetch failed with no attempts made"))
        .into())
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .context("catalog server returned an error status")?;
    let bytes = response
        .bytes()
        .await
        .context("failed to read catalog body")?;
    Ok(bytes.to_vec())
}

/// Parse XLSX bytes into a catalog, one sheet per category
///
/// Sheets that do not carry the recipe columns (the reserved metadata sheets
/// among them) are loaded as empty tables; sheet order is preserved.
pub fn parse_workbook(bytes: &[u8]) -> Result<Catalog, MenuError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|err| MenuError::CatalogLoad(format!("not a readable workbook: {err}")))?;

    let mut catalog = Catalog::new();
    for sheet in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|err| MenuError::CatalogLoad(format!("sheet {sheet}: {err}")))?;

        let mut rows = range.rows();
        let table = match rows.next().map(header_columns) {
            Some(Some(columns)) => {
                let parsed: Vec<RecipeRow> =
                    rows.filter_map(|row| parse_row(row, &columns)).collect();
                debug!("Sheet {sheet}: {} recipe rows", parsed.len());
                RecipeTable::from_rows(parsed)
            }
            _ => {
                debug!("Sheet {sheet}: no recipe columns, loaded empty");
                RecipeTable::default()
            }
        };
        catalog.insert(&sheet, table);
    }

    Ok(catalog)
}

/// Column indices of the recipe fields within one sheet
struct Columns {
    dish: usize,
    ingredient: usize,
    quantity: usize,
    unit: Option<usize>,
    page: Option<usize>,
}

fn header_columns(headers: &[Data]) -> Option<Columns> {
    Some(Columns {
        dish: header_index(headers, &["Plato"])?,
        ingredient: header_index(headers, &["Ingredientes"])?,
        quantity: header_index(headers, &["Cantidades"])?,
        unit: header_index(headers, &["Unidades"]),
        // Some editions of the workbook drop the accent
        page: header_index(headers, &["Página", "Pagina"]),
    })
}

/// Position of the first header cell matching any of `names`
pub fn header_index(headers: &[Data], names: &[&str]) -> Option<usize> {
    headers.iter().position(|cell| {
        matches!(cell, Data::String(s) if names.contains(&s.trim()))
    })
}

fn parse_row(row: &[Data], columns: &Columns) -> Option<RecipeRow> {
    // Blank spacer lines have no ingredient and are dropped here
    let ingredient_name = row.get(columns.ingredient).and_then(cell_to_text)?;

    Some(RecipeRow {
        dish_name: row.get(columns.dish).and_then(cell_to_text),
        ingredient_name,
        quantity: row
            .get(columns.quantity)
            .map_or(f64::NAN, cell_to_quantity),
        unit: columns
            .unit
            .and_then(|idx| row.get(idx))
            .and_then(cell_to_text),
        reference_page: columns
            .page
            .and_then(|idx| row.get(idx))
            .and_then(cell_to_page),
    })
}

/// Trimmed text of a cell, `None` when empty
pub fn cell_to_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{f}")
            }
        }
        Data::Int(i) => format!("{i}"),
        Data::Bool(b) => format!("{b}"),
        _ => String::new(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Numeric value of a quantity cell; `f64::NAN` when not numeric
///
/// The aggregator is the component that rejects NaN, so a bad cell only
/// fails the runs that actually select its dish.
pub fn cell_to_quantity(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        // Spanish editions use the decimal comma
        Data::String(s) => s.trim().replace(',', ".").parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Page number of a reference cell, when integral and in range
pub fn cell_to_page(cell: &Data) -> Option<u32> {
    match cell {
        Data::Float(f) if *f >= 0.0 && (f.floor() - f).abs() < f64::EPSILON => Some(*f as u32),
        Data::Int(i) if *i >= 0 => u32::try_from(*i).ok(),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
