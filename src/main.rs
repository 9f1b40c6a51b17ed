mod color;
mod data;
mod layer;
mod stats;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use data::filter::{apply, FilterCriteria, SurfaceCap};
use data::model::Amenity;
use layer::{LayerData, LayerMode};

/// Criteria the interactive explorer starts with: mid-range price and
/// surface, elevator and air-conditioning required.
fn default_criteria() -> FilterCriteria {
    FilterCriteria::new(
        (75_000.0, 450_000.0),
        Some((55.0, 120.0)),
        [Amenity::Elevator, Amenity::AirConditioning],
    )
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: apartment-explorer <listings.csv|listings.json> [density|scatter|heatmap|column]");
    };
    let dump_mode = args.next();

    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    if dataset.is_empty() {
        println!("dataset is empty");
    } else if let Some((lat, long)) = dataset.midpoint() {
        println!("{} listings, centered on ({lat:.4}, {long:.4})", dataset.len());
    }

    let criteria = default_criteria();
    let filtered = apply(&dataset, &criteria, SurfaceCap::COLUMN);
    let summary = stats::summarize(&dataset, &filtered);

    println!("matching apartments: {}", summary.count);
    println!("mean price:          {} €", summary.mean_price);
    println!("mean price per m²:   {} €", summary.mean_price_per_sqm);

    for mode in [
        LayerMode::Density,
        LayerMode::Scatter,
        LayerMode::Heatmap,
        LayerMode::Column,
    ] {
        let payload = layer::prepare(&dataset, &criteria, mode);
        let size = match &payload {
            LayerData::Colored(records) => records.len(),
            LayerData::Heatmap(points) => points.len(),
            LayerData::NoResults => 0,
        };
        println!("{:>8} layer: {size} records", mode.name());

        if dump_mode.as_deref() == Some(mode.name()) {
            let json = serde_json::to_string_pretty(&payload)
                .context("serializing layer payload")?;
            println!("{json}");
        }
    }

    Ok(())
}
