use std::collections::BTreeSet;

use super::model::{Amenity, Listing, ListingDataset};

// ---------------------------------------------------------------------------
// FilterCriteria – one user query
// ---------------------------------------------------------------------------

/// Immutable description of one query: price range, optional surface range,
/// and the set of amenities a listing must have.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive (min, max) price bounds in euros.
    pub price_range: (f64, f64),
    /// Inclusive (min, max) surface bounds in m². `None` leaves surface
    /// unconstrained beyond the mode's hard cap.
    pub surface_range: Option<(f64, f64)>,
    /// Every listed amenity must have flag == 1 on a matching listing.
    pub required_amenities: BTreeSet<Amenity>,
}

impl FilterCriteria {
    /// Build criteria, normalizing descending ranges by swapping their ends.
    pub fn new(
        price_range: (f64, f64),
        surface_range: Option<(f64, f64)>,
        required_amenities: impl IntoIterator<Item = Amenity>,
    ) -> Self {
        FilterCriteria {
            price_range: ascending(price_range),
            surface_range: surface_range.map(ascending),
            required_amenities: required_amenities.into_iter().collect(),
        }
    }
}

fn ascending((a, b): (f64, f64)) -> (f64, f64) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

// ---------------------------------------------------------------------------
// SurfaceCap – per-view outlier exclusion, applied before user criteria
// ---------------------------------------------------------------------------

/// Unconditional surface bounds a view applies before the user's own
/// criteria. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCap {
    pub upper: f64,
    pub lower: Option<f64>,
}

impl SurfaceCap {
    /// Cap used by the column and density views.
    pub const COLUMN: SurfaceCap = SurfaceCap {
        upper: 900.0,
        lower: None,
    };

    /// Cap used by the scatter view; the lower bound drops near-zero
    /// surface noise.
    pub const SCATTER: SurfaceCap = SurfaceCap {
        upper: 1801.0,
        lower: Some(19.0),
    };

    fn admits(&self, surface: f64) -> bool {
        surface < self.upper && self.lower.map_or(true, |lo| surface > lo)
    }
}

// ---------------------------------------------------------------------------
// FilteredResult – the matching subset of one query
// ---------------------------------------------------------------------------

/// Indices of the listings matching one query, in dataset order, together
/// with the criteria that produced them. A fresh view; the dataset itself
/// is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredResult {
    pub indices: Vec<usize>,
    pub criteria: FilterCriteria,
}

impl FilteredResult {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the matching listings.
    pub fn listings<'a>(
        &'a self,
        dataset: &'a ListingDataset,
    ) -> impl Iterator<Item = &'a Listing> + 'a {
        self.indices.iter().map(move |&i| &dataset.listings[i])
    }

    /// (min, max) price over the matching listings, `None` when empty.
    pub fn price_extent(&self, dataset: &ListingDataset) -> Option<(f64, f64)> {
        self.listings(dataset).fold(None, |acc, l| match acc {
            None => Some((l.price, l.price)),
            Some((min, max)) => Some((min.min(l.price), max.max(l.price))),
        })
    }
}

// ---------------------------------------------------------------------------
// The filter itself
// ---------------------------------------------------------------------------

/// Apply the surface cap and the user criteria to the dataset.
///
/// A listing passes when:
/// * its surface is admitted by `cap`
/// * its price lies within `criteria.price_range` (inclusive)
/// * its surface lies within `criteria.surface_range` when one is supplied
/// * every amenity in `criteria.required_amenities` has flag exactly 1
///
/// A required amenity column absent from the dataset matches nothing; an
/// empty result is a valid, non-exceptional outcome.
pub fn apply(
    dataset: &ListingDataset,
    criteria: &FilterCriteria,
    cap: SurfaceCap,
) -> FilteredResult {
    // Column missing from the source entirely → nothing can match.
    let columns_present = criteria
        .required_amenities
        .iter()
        .all(|a| dataset.amenity_columns.contains(a));

    let indices = if columns_present {
        dataset
            .listings
            .iter()
            .enumerate()
            .filter(|&(_, l)| matches(l, criteria, cap))
            .map(|(i, _)| i)
            .collect()
    } else {
        Vec::new()
    };

    FilteredResult {
        indices,
        criteria: criteria.clone(),
    }
}

fn matches(listing: &Listing, criteria: &FilterCriteria, cap: SurfaceCap) -> bool {
    if !cap.admits(listing.surface) {
        return false;
    }

    let (price_min, price_max) = criteria.price_range;
    if !(listing.price >= price_min && listing.price <= price_max) {
        return false;
    }

    if let Some((surface_min, surface_max)) = criteria.surface_range {
        if !(listing.surface >= surface_min && listing.surface <= surface_max) {
            return false;
        }
    }

    criteria
        .required_amenities
        .iter()
        .all(|&a| listing.has_amenity(a))
}
