/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ListingDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ListingDataset │  Vec<Listing>, amenity column set
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  surface cap + criteria → FilteredResult
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
