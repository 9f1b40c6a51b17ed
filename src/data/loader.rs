use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Amenity, Listing, ListingDataset};

/// Errors that can occur while loading a listing dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{column}' in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("expected a top-level JSON array of listing records")]
    NotAnArray,

    #[error("failed to read dataset file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON")]
    Json(#[from] serde_json::Error),
}

/// Columns every source file must carry.
const REQUIRED_COLUMNS: [&str; 4] = ["price", "surface", "lat", "long"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listing dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, one listing per row
/// * `.json` – records-oriented array: `[{ "price": ..., "surface": ..., ... }]`
///
/// Rows without a parseable `price` are dropped here so the rest of the
/// pipeline never sees them.
pub fn load_file(path: &Path) -> Result<ListingDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ListingDataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                column: name,
                path: path.to_path_buf(),
            })
    };

    let price_idx = column("price")?;
    let surface_idx = column("surface")?;
    let lat_idx = column("lat")?;
    let long_idx = column("long")?;
    let mean_50m_idx = headers.iter().position(|h| h == "price_mean_50m");
    let mean_100m_idx = headers.iter().position(|h| h == "price_mean_100m");

    // Amenity columns are optional; remember which ones the file carries.
    let amenity_columns: BTreeSet<Amenity> = headers
        .iter()
        .filter_map(|h| Amenity::from_column(h))
        .collect();
    let amenity_indices: Vec<(Amenity, usize)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| Amenity::from_column(h).map(|a| (a, i)))
        .collect();

    let mut listings = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let Some(price) = parse_price(field(price_idx)) else {
            dropped += 1;
            continue;
        };

        let mut amenities = BTreeMap::new();
        for &(amenity, idx) in &amenity_indices {
            if let Ok(flag) = field(idx).trim().parse::<f64>() {
                amenities.insert(amenity, flag);
            }
        }

        listings.push(Listing {
            price,
            surface: parse_numeric(field(surface_idx)),
            lat: parse_numeric(field(lat_idx)),
            long: parse_numeric(field(long_idx)),
            amenities,
            price_mean_50m: mean_50m_idx.map_or(f64::NAN, |i| parse_numeric(field(i))),
            price_mean_100m: mean_100m_idx.map_or(f64::NAN, |i| parse_numeric(field(i))),
        });
    }

    log::info!(
        "Loaded {} listings from {} ({dropped} rows without price dropped)",
        listings.len(),
        path.display()
    );

    Ok(ListingDataset::new(listings, amenity_columns))
}

fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|p| !p.is_nan())
}

/// Lenient numeric parse: empty or malformed cells become `NaN`, which the
/// filter predicates then naturally exclude.
fn parse_numeric(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "price": 185000, "surface": 72, "lat": 41.39, "long": 2.16,
///     "elevator": 1, "price_mean_50m": 190000, "price_mean_100m": 188000 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ListingDataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut listings = Vec::with_capacity(records.len());
    let mut amenity_columns = BTreeSet::new();
    let mut dropped = 0usize;

    for rec in records {
        let Some(obj) = rec.as_object() else {
            dropped += 1;
            continue;
        };

        let numeric = |key: &str| obj.get(key).and_then(JsonValue::as_f64);

        let Some(price) = numeric("price").filter(|p| !p.is_nan()) else {
            dropped += 1;
            continue;
        };

        let mut amenities = BTreeMap::new();
        for amenity in Amenity::ALL {
            if obj.contains_key(amenity.column_name()) {
                amenity_columns.insert(amenity);
            }
            if let Some(flag) = numeric(amenity.column_name()) {
                amenities.insert(amenity, flag);
            }
        }

        listings.push(Listing {
            price,
            surface: numeric("surface").unwrap_or(f64::NAN),
            lat: numeric("lat").unwrap_or(f64::NAN),
            long: numeric("long").unwrap_or(f64::NAN),
            amenities,
            price_mean_50m: numeric("price_mean_50m").unwrap_or(f64::NAN),
            price_mean_100m: numeric("price_mean_100m").unwrap_or(f64::NAN),
        });
    }

    log::info!(
        "Loaded {} listings from {} ({dropped} records without price dropped)",
        listings.len(),
        path.display()
    );

    Ok(ListingDataset::new(listings, amenity_columns))
}
