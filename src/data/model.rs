use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Amenity – one of the known boolean feature columns
// ---------------------------------------------------------------------------

/// A named amenity column on a listing. Ordered and hashable so it can key
/// `BTreeMap` / `BTreeSet` downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Amenity {
    Elevator,
    Terrace,
    Balcony,
    AirConditioning,
    Heater,
}

impl Amenity {
    /// All known amenity columns, in source-schema order.
    pub const ALL: [Amenity; 5] = [
        Amenity::Elevator,
        Amenity::Terrace,
        Amenity::Balcony,
        Amenity::AirConditioning,
        Amenity::Heater,
    ];

    /// The column name used in the source data.
    pub fn column_name(self) -> &'static str {
        match self {
            Amenity::Elevator => "elevator",
            Amenity::Terrace => "terrace",
            Amenity::Balcony => "balcony",
            Amenity::AirConditioning => "air-conditioning",
            Amenity::Heater => "heater",
        }
    }

    /// Parse a source column name back into an [`Amenity`].
    pub fn from_column(name: &str) -> Option<Amenity> {
        Amenity::ALL.into_iter().find(|a| a.column_name() == name)
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the source data
// ---------------------------------------------------------------------------

/// A single real-estate listing (one row of the source data).
///
/// Absent numeric cells are `NaN`; an absent amenity cell is simply missing
/// from `amenities`. A listing without a price never enters the dataset,
/// the loader drops such rows.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Asking price in euros.
    pub price: f64,
    /// Surface area in square meters.
    pub surface: f64,
    pub lat: f64,
    pub long: f64,
    /// Amenity flags: present = 1.0, absent = 0.0 or missing entry.
    pub amenities: BTreeMap<Amenity, f64>,
    /// Mean price within 50 m of the listing, precomputed upstream.
    pub price_mean_50m: f64,
    /// Mean price within 100 m of the listing, precomputed upstream.
    pub price_mean_100m: f64,
}

impl Listing {
    /// Whether the listing's flag for `amenity` equals exactly 1.
    /// A missing entry or any other value counts as not having it.
    pub fn has_amenity(&self, amenity: Amenity) -> bool {
        self.amenities.get(&amenity) == Some(&1.0)
    }
}

// ---------------------------------------------------------------------------
// ListingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset, read-only for the lifetime of a query.
#[derive(Debug, Clone)]
pub struct ListingDataset {
    /// All listings (rows), in source order.
    pub listings: Vec<Listing>,
    /// Amenity columns actually present in the source. Queries requiring
    /// an amenity outside this set match nothing.
    pub amenity_columns: BTreeSet<Amenity>,
}

impl ListingDataset {
    pub fn new(listings: Vec<Listing>, amenity_columns: BTreeSet<Amenity>) -> Self {
        ListingDataset {
            listings,
            amenity_columns,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Mean (lat, long) over all listings, used to center the map view.
    /// `None` for an empty dataset.
    pub fn midpoint(&self) -> Option<(f64, f64)> {
        if self.listings.is_empty() {
            return None;
        }
        let n = self.listings.len() as f64;
        let (lat_sum, long_sum) = self
            .listings
            .iter()
            .fold((0.0, 0.0), |(la, lo), l| (la + l.lat, lo + l.long));
        Some((lat_sum / n, long_sum / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, lat: f64, long: f64) -> Listing {
        Listing {
            price,
            surface: 70.0,
            lat,
            long,
            amenities: BTreeMap::new(),
            price_mean_50m: price,
            price_mean_100m: price,
        }
    }

    #[test]
    fn amenity_column_names_round_trip() {
        for amenity in Amenity::ALL {
            assert_eq!(Amenity::from_column(amenity.column_name()), Some(amenity));
        }
        assert_eq!(Amenity::from_column("pool"), None);
    }

    #[test]
    fn has_amenity_requires_exact_one() {
        let mut l = listing(100_000.0, 41.4, 2.1);
        assert!(!l.has_amenity(Amenity::Elevator));

        l.amenities.insert(Amenity::Elevator, 1.0);
        assert!(l.has_amenity(Amenity::Elevator));

        l.amenities.insert(Amenity::Terrace, 0.0);
        assert!(!l.has_amenity(Amenity::Terrace));
    }

    #[test]
    fn midpoint_is_mean_of_coordinates() {
        let ds = ListingDataset::new(
            vec![listing(1.0, 41.0, 2.0), listing(2.0, 43.0, 4.0)],
            BTreeSet::new(),
        );
        assert_eq!(ds.midpoint(), Some((42.0, 3.0)));

        let empty = ListingDataset::new(Vec::new(), BTreeSet::new());
        assert_eq!(empty.midpoint(), None);
    }
}
