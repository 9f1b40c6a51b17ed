//! Layer data preparation: turns a dataset and one set of criteria into the
//! per-record payload a deck-style map layer renders.

use serde::Serialize;

use crate::color::{normalize, ColorScheme, Rgba};
use crate::data::filter::{apply, FilterCriteria, SurfaceCap};
use crate::data::model::{Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Modes and payload types
// ---------------------------------------------------------------------------

/// The four supported visualization modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMode {
    Density,
    Scatter,
    Heatmap,
    Column,
}

impl LayerMode {
    pub fn name(self) -> &'static str {
        match self {
            LayerMode::Density => "density",
            LayerMode::Scatter => "scatter",
            LayerMode::Heatmap => "heatmap",
            LayerMode::Column => "column",
        }
    }
}

/// One record of a coloured layer: position, tooltip fields, the
/// elevation-driving local mean, and the two derived fields. Freshly
/// constructed per query; the source dataset is never written to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredRecord {
    pub lat: f64,
    pub long: f64,
    pub price: f64,
    pub price_mean_50m: f64,
    pub price_mean_100m: f64,
    pub normalized_price: f64,
    pub color: Rgba,
}

/// One record of the heatmap layer; aggregation happens in the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPoint {
    pub lat: f64,
    pub long: f64,
    pub weight: f64,
}

/// What a layer gets to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum LayerData {
    Colored(Vec<ColoredRecord>),
    Heatmap(Vec<WeightedPoint>),
    /// Explicit "no results" signal: the query matched nothing, or a
    /// required amenity column is absent from the dataset.
    NoResults,
}

// ---------------------------------------------------------------------------
// Preparation
// ---------------------------------------------------------------------------

/// Prepare the payload for one visualization mode.
pub fn prepare(dataset: &ListingDataset, criteria: &FilterCriteria, mode: LayerMode) -> LayerData {
    match mode {
        LayerMode::Density | LayerMode::Column => prepare_column(dataset, criteria),
        LayerMode::Scatter => prepare_scatter(dataset, criteria),
        LayerMode::Heatmap => prepare_heatmap(dataset),
    }
}

/// Column/density views: reference bounds come from the filtered subset's
/// own price extremes, so the gradient always spans the visible data.
fn prepare_column(dataset: &ListingDataset, criteria: &FilterCriteria) -> LayerData {
    let filtered = apply(dataset, criteria, SurfaceCap::COLUMN);
    let Some((min_price, max_price)) = filtered.price_extent(dataset) else {
        return LayerData::NoResults;
    };

    let records = filtered
        .listings(dataset)
        .map(|l| colored_record(l, min_price, max_price, ColorScheme::RedGreen))
        .collect();
    LayerData::Colored(records)
}

/// Scatter view: reference bounds are the user's price range with min and
/// max swapped, so cheaper listings shade toward the warm anchor. Upstream
/// behaviour, kept as-is and locked by regression test.
fn prepare_scatter(dataset: &ListingDataset, criteria: &FilterCriteria) -> LayerData {
    let filtered = apply(dataset, criteria, SurfaceCap::SCATTER);
    if filtered.is_empty() {
        return LayerData::NoResults;
    }

    let (reference_min, reference_max) = (criteria.price_range.1, criteria.price_range.0);
    let records = filtered
        .listings(dataset)
        .map(|l| colored_record(l, reference_min, reference_max, ColorScheme::GreenOrange))
        .collect();
    LayerData::Colored(records)
}

/// Heatmap view: every listing weighted by raw price; no filtering or
/// colouring, the renderer aggregates.
fn prepare_heatmap(dataset: &ListingDataset) -> LayerData {
    let points = dataset
        .listings
        .iter()
        .map(|l| WeightedPoint {
            lat: l.lat,
            long: l.long,
            weight: l.price,
        })
        .collect();
    LayerData::Heatmap(points)
}

fn colored_record(
    listing: &Listing,
    reference_min: f64,
    reference_max: f64,
    scheme: ColorScheme,
) -> ColoredRecord {
    let normalized_price = normalize(listing.price, reference_min, reference_max);
    ColoredRecord {
        lat: listing.lat,
        long: listing.long,
        price: listing.price,
        price_mean_50m: listing.price_mean_50m,
        price_mean_100m: listing.price_mean_100m,
        normalized_price,
        color: scheme.shade(normalized_price),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::data::model::Amenity;

    fn listing(price: f64, surface: f64) -> Listing {
        Listing {
            price,
            surface,
            lat: 41.4,
            long: 2.1,
            amenities: BTreeMap::new(),
            price_mean_50m: price,
            price_mean_100m: price,
        }
    }

    fn dataset(listings: Vec<Listing>) -> ListingDataset {
        ListingDataset::new(listings, BTreeSet::new())
    }

    fn wide_open() -> FilterCriteria {
        FilterCriteria::new((0.0, 1e9), None, [])
    }

    #[test]
    fn column_mode_spans_the_filtered_price_extent() {
        let ds = dataset(vec![
            listing(100_000.0, 50.0),
            listing(200_000.0, 60.0),
            listing(300_000.0, 70.0),
        ]);

        let LayerData::Colored(records) = prepare(&ds, &wide_open(), LayerMode::Column) else {
            panic!("expected a coloured payload");
        };

        assert_eq!(records[0].normalized_price, 0.0);
        assert_eq!(records[0].color, Rgba(255, 255, 0, 180));
        assert_eq!(records[1].normalized_price, 0.5);
        assert_eq!(records[2].normalized_price, 1.0);
        assert_eq!(records[2].color, Rgba(255, 0, 0, 180));
    }

    #[test]
    fn column_mode_extent_ignores_capped_outliers() {
        // The 1000 m² listing is excluded by the 900 cap, so it must not
        // stretch the reference bounds either.
        let ds = dataset(vec![
            listing(100_000.0, 50.0),
            listing(900_000.0, 1000.0),
            listing(200_000.0, 60.0),
        ]);

        let LayerData::Colored(records) = prepare(&ds, &wide_open(), LayerMode::Column) else {
            panic!("expected a coloured payload");
        };

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].normalized_price, 1.0);
    }

    #[test]
    fn single_listing_column_gets_the_low_shade() {
        // Zero-width reference range → t = 0, not a division by zero.
        let ds = dataset(vec![listing(250_000.0, 50.0)]);

        let LayerData::Colored(records) = prepare(&ds, &wide_open(), LayerMode::Column) else {
            panic!("expected a coloured payload");
        };
        assert_eq!(records[0].normalized_price, 0.0);
        assert_eq!(records[0].color, Rgba(255, 255, 0, 180));
    }

    #[test]
    fn scatter_reference_bounds_are_swapped() {
        // Regression: the scatter gradient runs against the inverted user
        // range, so the cheapest listing lands on the warm anchor.
        let ds = dataset(vec![listing(100_000.0, 50.0), listing(300_000.0, 80.0)]);
        let criteria = FilterCriteria::new((100_000.0, 300_000.0), None, []);

        let LayerData::Colored(records) = prepare(&ds, &criteria, LayerMode::Scatter) else {
            panic!("expected a coloured payload");
        };

        assert_eq!(records[0].normalized_price, 1.0);
        assert_eq!(records[0].color, Rgba(255, 115, 45, 180));
        assert_eq!(records[1].normalized_price, 0.0);
        assert_eq!(records[1].color, Rgba(109, 255, 45, 180));
    }

    #[test]
    fn scatter_empty_match_signals_no_results() {
        let ds = dataset(vec![listing(100_000.0, 50.0)]);
        let criteria = FilterCriteria::new((500_000.0, 900_000.0), None, []);

        assert_eq!(prepare(&ds, &criteria, LayerMode::Scatter), LayerData::NoResults);
    }

    #[test]
    fn scatter_missing_amenity_column_signals_no_results() {
        let ds = dataset(vec![listing(100_000.0, 50.0)]);
        let criteria = FilterCriteria::new((0.0, 1e9), None, [Amenity::Heater]);

        assert_eq!(prepare(&ds, &criteria, LayerMode::Scatter), LayerData::NoResults);
    }

    #[test]
    fn heatmap_weights_every_listing_by_price() {
        // Heatmap ignores the criteria entirely, including its price range.
        let ds = dataset(vec![listing(100_000.0, 50.0), listing(2_000_000.0, 2500.0)]);
        let criteria = FilterCriteria::new((0.0, 1.0), None, []);

        let LayerData::Heatmap(points) = prepare(&ds, &criteria, LayerMode::Heatmap) else {
            panic!("expected a heatmap payload");
        };

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].weight, 100_000.0);
        assert_eq!(points[1].weight, 2_000_000.0);
    }

    #[test]
    fn prepared_records_do_not_touch_the_dataset() {
        let ds = dataset(vec![listing(100_000.0, 50.0), listing(300_000.0, 80.0)]);
        let before = ds.listings.clone();

        let _ = prepare(&ds, &wide_open(), LayerMode::Column);
        let _ = prepare(&ds, &wide_open(), LayerMode::Scatter);

        for (a, b) in before.iter().zip(&ds.listings) {
            assert_eq!(a.price, b.price);
            assert_eq!(a.surface, b.surface);
        }
    }

    #[test]
    fn payload_serializes_for_the_renderer() {
        let ds = dataset(vec![listing(100_000.0, 50.0)]);
        let json = serde_json::to_value(prepare(&ds, &wide_open(), LayerMode::Column)).unwrap();

        assert_eq!(json["kind"], "colored");
        assert_eq!(json["records"][0]["color"], serde_json::json!([255, 255, 0, 180]));
    }
}
