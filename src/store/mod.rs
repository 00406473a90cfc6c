use tracing::debug;

use crate::error::StoreError;
use crate::models::PropertyRecord;

/// In-memory session store for property records
///
/// Append-only for the lifetime of a session: records are accepted through
/// [`add`](Self::add), never mutated, and dropped with the store. Insertion
/// order is preserved and is the display order for every non-ranking query.
#[derive(Debug, Default)]
pub struct PropertyStore {
    records: Vec<PropertyRecord>,
}

impl PropertyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records accepted this session
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    /// Accept a record into the store
    ///
    /// Fails with [`StoreError::DuplicateId`] if the id was already
    /// accepted this session, or [`StoreError::InvalidInput`] if the
    /// record violates a domain invariant. The store is untouched on
    /// failure.
    pub fn add(&mut self, record: PropertyRecord) -> Result<(), StoreError> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        record.validate()?;
        debug!("Accepted property {} ({})", record.id, record.name);
        self.records.push(record);
        Ok(())
    }

    /// Look up the record with exactly this id
    pub fn find_by_id(&self, id: u32) -> Option<&PropertyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Case-insensitive substring search over the location field
    ///
    /// Matches are returned in insertion order. An empty fragment matches
    /// every record.
    pub fn find_by_location(&self, fragment: &str) -> Vec<&PropertyRecord> {
        let needle = fragment.to_lowercase();
        let hits: Vec<&PropertyRecord> = self
            .records
            .iter()
            .filter(|r| r.location.to_lowercase().contains(&needle))
            .collect();
        debug!("Location search '{}' matched {} records", fragment, hits.len());
        hits
    }

    /// Records priced within `min..=max`, in insertion order
    ///
    /// Both bounds are inclusive. An inverted range (`min > max`) matches
    /// nothing rather than erroring or swapping the bounds.
    pub fn find_by_price_range(&self, min: i64, max: i64) -> Vec<&PropertyRecord> {
        let hits: Vec<&PropertyRecord> = self
            .records
            .iter()
            .filter(|r| r.price >= min && r.price <= max)
            .collect();
        debug!("Price search {}..={} matched {} records", min, max, hits.len());
        hits
    }

    /// Up to `count` records ranked by rating, highest first
    ///
    /// The sort is stable, so records with equal ratings keep their
    /// insertion order. Asking for more records than exist returns them
    /// all; asking for zero returns an empty list.
    pub fn top_rated(&self, count: usize) -> Vec<&PropertyRecord> {
        let mut ranked: Vec<&PropertyRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked.truncate(count);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::InputError;

    fn record(id: u32, location: &str, price: i64, rating: f32) -> PropertyRecord {
        PropertyRecord {
            id,
            name: format!("Property {id}"),
            location: location.to_string(),
            price,
            size: 2000,
            rating,
            bedrooms: Some(3),
            bathrooms: Some(2),
            description: String::new(),
            image: "/placeholder.svg?height=200&width=300".to_string(),
        }
    }

    /// Store used throughout: the three records of the canonical demo
    /// subset, inserted in id order.
    fn seeded() -> PropertyStore {
        let mut store = PropertyStore::new();
        store.add(record(101, "Malibu, California", 4_500_000, 4.8)).unwrap();
        store.add(record(103, "Aspen, Colorado", 2_800_000, 4.9)).unwrap();
        store.add(record(105, "Miami, Florida", 5_200_000, 4.9)).unwrap();
        store
    }

    fn ids(records: &[&PropertyRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let store = seeded();
        assert_eq!(store.len(), 3);
        let all: Vec<u32> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(all, vec![101, 103, 105]);
    }

    #[test]
    fn duplicate_id_is_rejected_and_store_unchanged() {
        let mut store = seeded();
        let before: Vec<PropertyRecord> = store.records().to_vec();

        let result = store.add(record(103, "Somewhere Else", 1, 1.0));
        assert_eq!(result, Err(StoreError::DuplicateId(103)));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn rejected_id_stays_rejected_until_reset() {
        let mut store = seeded();
        for _ in 0..3 {
            assert!(store.add(record(101, "Retry", 1, 1.0)).is_err());
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn invalid_rating_is_rejected_by_add() {
        let mut store = PropertyStore::new();
        let result = store.add(record(1, "Nowhere", 100, 7.5));
        assert!(matches!(
            result,
            Err(StoreError::InvalidInput(InputError::OutOfDomain {
                field: "rating",
                ..
            }))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn find_by_id_is_exact() {
        let store = seeded();
        assert_eq!(store.find_by_id(103).map(|r| r.id), Some(103));
        // 10 is a prefix of 101/103/105 but matches nothing by itself
        assert!(store.find_by_id(10).is_none());
        assert!(store.find_by_id(104).is_none());
    }

    #[test]
    fn location_search_is_case_insensitive() {
        let store = seeded();
        assert_eq!(ids(&store.find_by_location("colorado")), vec![103]);
        assert_eq!(ids(&store.find_by_location("MIAMI")), vec![105]);
    }

    #[test]
    fn location_search_keeps_insertion_order() {
        let store = seeded();
        // Every seeded location contains a comma-space
        assert_eq!(ids(&store.find_by_location(", ")), vec![101, 103, 105]);
    }

    #[test]
    fn empty_fragment_matches_every_record() {
        let store = seeded();
        assert_eq!(store.find_by_location("").len(), 3);
    }

    #[test]
    fn location_search_with_no_hits_is_empty_not_an_error() {
        let store = seeded();
        assert!(store.find_by_location("texas").is_empty());
    }

    #[test]
    fn price_range_matches_demo_scenario() {
        let store = seeded();
        let hits = store.find_by_price_range(2_800_000, 4_500_000);
        assert_eq!(ids(&hits), vec![101, 103]);
    }

    #[test]
    fn price_range_is_inclusive_at_both_bounds() {
        let store = seeded();
        assert_eq!(ids(&store.find_by_price_range(2_800_000, 2_800_000)), vec![103]);
        // One dollar outside either bound excludes the record
        assert!(store.find_by_price_range(2_800_001, 4_499_999).is_empty());
    }

    #[test]
    fn inverted_price_range_yields_empty() {
        let store = seeded();
        assert!(store.find_by_price_range(5_000_000, 1_000_000).is_empty());
    }

    #[test]
    fn top_rated_breaks_ties_by_insertion_order() {
        let store = seeded();
        // 103 and 105 are both rated 4.9; 103 was inserted first
        assert_eq!(ids(&store.top_rated(2)), vec![103, 105]);
        assert_eq!(ids(&store.top_rated(3)), vec![103, 105, 101]);
    }

    #[test]
    fn top_rated_caps_at_store_size() {
        let store = seeded();
        assert_eq!(store.top_rated(50).len(), 3);
    }

    #[test]
    fn top_rated_zero_is_empty() {
        let store = seeded();
        assert!(store.top_rated(0).is_empty());
    }

    #[test]
    fn all_queries_are_total_on_the_empty_store() {
        let store = PropertyStore::new();
        assert!(store.find_by_id(101).is_none());
        assert!(store.find_by_location("anywhere").is_empty());
        assert!(store.find_by_price_range(0, i64::MAX).is_empty());
        assert!(store.top_rated(5).is_empty());
        assert!(store.records().is_empty());
    }

    // ========== Strategies ==========

    /// Ids drawn from a small range so duplicate attempts actually occur
    fn arb_record() -> impl Strategy<Value = PropertyRecord> {
        (0u32..16, 0i64..1_000_000, 0u8..=50).prop_map(|(id, price, tenths)| {
            let mut r = record(id, "Springfield", price, f32::from(tenths) / 10.0);
            r.name = format!("Generated {id}");
            r
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// After any sequence of adds, accepted ids are unique, a
        /// duplicate id is never accepted, and the size grows by exactly
        /// one per success and not at all per rejection.
        #[test]
        fn add_sequence_preserves_uniqueness(candidates in prop::collection::vec(arb_record(), 0..40)) {
            let mut store = PropertyStore::new();
            let mut accepted: Vec<u32> = Vec::new();

            for candidate in candidates {
                let id = candidate.id;
                let before = store.len();
                match store.add(candidate) {
                    Ok(()) => {
                        prop_assert!(!accepted.contains(&id));
                        prop_assert_eq!(store.len(), before + 1);
                        accepted.push(id);
                    }
                    Err(StoreError::DuplicateId(rejected)) => {
                        prop_assert_eq!(rejected, id);
                        prop_assert!(accepted.contains(&id));
                        prop_assert_eq!(store.len(), before);
                    }
                    Err(StoreError::InvalidInput(_)) => {
                        prop_assert_eq!(store.len(), before);
                    }
                }
            }
        }

        /// top_rated returns min(count, len) records in non-increasing
        /// rating order, and ties keep their insertion order.
        #[test]
        fn top_rated_is_sorted_and_stable(
            candidates in prop::collection::vec(arb_record(), 0..40),
            count in 0usize..50,
        ) {
            let mut store = PropertyStore::new();
            for candidate in candidates {
                let _ = store.add(candidate);
            }

            let positions: Vec<u32> = store.records().iter().map(|r| r.id).collect();
            let ranked = store.top_rated(count);
            prop_assert_eq!(ranked.len(), count.min(store.len()));

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].rating >= pair[1].rating);
                if pair[0].rating == pair[1].rating {
                    let earlier = positions.iter().position(|&id| id == pair[0].id);
                    let later = positions.iter().position(|&id| id == pair[1].id);
                    prop_assert!(earlier < later);
                }
            }
        }

        /// Price-range hits all lie inside the inclusive bounds and form a
        /// subsequence of the store's insertion order.
        #[test]
        fn price_range_hits_are_bounded_and_ordered(
            candidates in prop::collection::vec(arb_record(), 0..40),
            min in 0i64..1_000_000,
            max in 0i64..1_000_000,
        ) {
            let mut store = PropertyStore::new();
            for candidate in candidates {
                let _ = store.add(candidate);
            }

            let hits = store.find_by_price_range(min, max);
            for hit in &hits {
                prop_assert!(hit.price >= min && hit.price <= max);
            }

            let order: Vec<u32> = store.records().iter().map(|r| r.id).collect();
            let mut cursor = 0usize;
            for hit in &hits {
                let at = order[cursor..].iter().position(|&id| id == hit.id);
                prop_assert!(at.is_some());
                cursor += at.unwrap() + 1;
            }

            if min > max {
                prop_assert!(hits.is_empty());
            }
        }
    }
}
