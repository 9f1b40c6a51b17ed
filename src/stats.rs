use serde::Serialize;

use crate::data::filter::FilteredResult;
use crate::data::model::ListingDataset;

// ---------------------------------------------------------------------------
// SummaryStats – the numbers shown next to the map
// ---------------------------------------------------------------------------

/// Aggregate figures over one filtered subset. Recomputed for every new
/// query; never cached across criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    /// Arithmetic mean of prices, truncated to whole euros.
    pub mean_price: i64,
    /// Mean of per-listing `price / surface` ratios, truncated. This is the
    /// mean of ratios, not the ratio of means.
    pub mean_price_per_sqm: i64,
}

/// Summarize a filtered subset. An empty subset reports zeros rather than
/// failing on the division.
pub fn summarize(dataset: &ListingDataset, filtered: &FilteredResult) -> SummaryStats {
    let count = filtered.len();
    if count == 0 {
        return SummaryStats {
            count: 0,
            mean_price: 0,
            mean_price_per_sqm: 0,
        };
    }

    let n = count as f64;
    let price_sum: f64 = filtered.listings(dataset).map(|l| l.price).sum();
    let ratio_sum: f64 = filtered
        .listings(dataset)
        .map(|l| l.price / l.surface)
        .sum();

    SummaryStats {
        count,
        mean_price: (price_sum / n) as i64,
        mean_price_per_sqm: (ratio_sum / n) as i64,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::data::filter::{apply, FilterCriteria, SurfaceCap};
    use crate::data::model::{Amenity, Listing};

    fn listing(price: f64, surface: f64, flags: &[(Amenity, f64)]) -> Listing {
        Listing {
            price,
            surface,
            lat: 41.4,
            long: 2.1,
            amenities: flags.iter().copied().collect::<BTreeMap<_, _>>(),
            price_mean_50m: price,
            price_mean_100m: price,
        }
    }

    fn two_listing_dataset() -> ListingDataset {
        ListingDataset::new(
            vec![
                listing(100_000.0, 50.0, &[(Amenity::Elevator, 1.0)]),
                listing(300_000.0, 80.0, &[(Amenity::Elevator, 0.0)]),
            ],
            [Amenity::Elevator].into_iter().collect(),
        )
    }

    #[test]
    fn empty_subset_reports_zeros() {
        let ds = two_listing_dataset();
        let criteria = FilterCriteria::new((1.0, 2.0), None, []);
        let filtered = apply(&ds, &criteria, SurfaceCap::COLUMN);

        let stats = summarize(&ds, &filtered);
        assert_eq!(
            stats,
            SummaryStats {
                count: 0,
                mean_price: 0,
                mean_price_per_sqm: 0
            }
        );
    }

    #[test]
    fn elevator_query_summarizes_the_single_match() {
        let ds = two_listing_dataset();
        let criteria = FilterCriteria::new(
            (50_000.0, 350_000.0),
            Some((40.0, 100.0)),
            [Amenity::Elevator],
        );
        let filtered = apply(&ds, &criteria, SurfaceCap::COLUMN);

        let stats = summarize(&ds, &filtered);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean_price, 100_000);
        assert_eq!(stats.mean_price_per_sqm, 2_000);
    }

    #[test]
    fn no_required_amenities_summarizes_both() {
        let ds = two_listing_dataset();
        let criteria = FilterCriteria::new((50_000.0, 350_000.0), Some((40.0, 100.0)), []);
        let filtered = apply(&ds, &criteria, SurfaceCap::COLUMN);

        let stats = summarize(&ds, &filtered);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean_price, 200_000);
    }

    #[test]
    fn price_per_sqm_is_the_mean_of_ratios() {
        // mean of ratios: (100000/50 + 300000/100) / 2 = 2500
        // ratio of means: 200000 / 75 ≈ 2666 — must not be that.
        let ds = ListingDataset::new(
            vec![
                listing(100_000.0, 50.0, &[]),
                listing(300_000.0, 100.0, &[]),
            ],
            BTreeSet::new(),
        );
        let criteria = FilterCriteria::new((0.0, 1e9), None, []);
        let filtered = apply(&ds, &criteria, SurfaceCap::COLUMN);

        assert_eq!(summarize(&ds, &filtered).mean_price_per_sqm, 2_500);
    }

    #[test]
    fn means_truncate_toward_zero() {
        let ds = ListingDataset::new(
            vec![listing(100_001.0, 60.0, &[]), listing(100_002.0, 60.0, &[])],
            BTreeSet::new(),
        );
        let criteria = FilterCriteria::new((0.0, 1e9), None, []);
        let filtered = apply(&ds, &criteria, SurfaceCap::COLUMN);

        let stats = summarize(&ds, &filtered);
        // (100001 + 100002) / 2 = 100001.5 → 100001
        assert_eq!(stats.mean_price, 100_001);
    }
}
