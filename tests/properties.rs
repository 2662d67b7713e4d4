//! Property tests for the normalizer, the match predicate and seed linkage.

use grouper::cluster::seed_link;
use grouper::config::{GroupingRules, SimilarityMethod};
use grouper::locality::{LocalityFeatures, normalize_locality};
use grouper::similarity::Scorer;
use grouper::table::OccurrenceRecord;
use proptest::prelude::*;

fn locality_phrase() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        Just("5"),
        Just("8.3"),
        Just("12"),
        Just("mi"),
        Just("mi."),
        Just("miles"),
        Just("air"),
        Just("km"),
        Just("Kilometers"),
        Just("N"),
        Just("n."),
        Just("North"),
        Just("SE"),
        Just("west"),
        Just("of"),
        Just("Ranch"),
        Just("Canyon"),
        Just("Creek,"),
        Just("Palo"),
        Just("Duro"),
        Just("(near"),
        Just("bridge)"),
    ];
    prop::collection::vec(token, 0..10).prop_map(|tokens| tokens.join(" "))
}

fn record(locality: &str, collector: Option<&str>) -> OccurrenceRecord {
    OccurrenceRecord {
        locality: LocalityFeatures::from_locality(Some(locality)),
        has_locality: true,
        recorded_by: collector.map(String::from),
        event_date: None,
        event_date_text: None,
        record_number: None,
        habitat: None,
        code: None,
        latitude: None,
        longitude: None,
    }
}

fn scorer(method: SimilarityMethod, threshold: u8, collector: Option<u8>) -> Scorer {
    Scorer::new(&GroupingRules {
        method,
        threshold: f64::from(threshold),
        collector_threshold: collector.map(f64::from),
    })
}

fn method() -> impl Strategy<Value = SimilarityMethod> {
    prop_oneof![
        Just(SimilarityMethod::TokenSort),
        Just(SimilarityMethod::TfidfCosine)
    ]
}

proptest! {
    #[test]
    fn test_normalize_is_idempotent_on_phrases(text in locality_phrase()) {
        let once = normalize_locality(Some(&text));
        let twice = normalize_locality(Some(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_is_idempotent_on_any_text(text in "\\PC{0,40}") {
        let once = normalize_locality(Some(&text));
        let twice = normalize_locality(Some(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_normalized_text_is_restricted(text in "\\PC{0,40}") {
        let normalized = normalize_locality(Some(&text));
        prop_assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == ' '));
        prop_assert!(!normalized.starts_with(' ') && !normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
    }

    #[test]
    fn test_matches_is_symmetric(
        a in locality_phrase(),
        b in locality_phrase(),
        method in method(),
        threshold in 0u8..=100,
    ) {
        let scorer = scorer(method, threshold, None);
        let (ra, rb) = (record(&a, None), record(&b, None));
        prop_assert_eq!(scorer.matches(&ra, &rb), scorer.matches(&rb, &ra));
    }

    #[test]
    fn test_matches_with_collectors_is_symmetric(
        a in locality_phrase(),
        ca in "[A-Za-z. ]{0,15}",
        cb in "[A-Za-z. ]{0,15}",
        method in method(),
        threshold in 0u8..=100,
    ) {
        let scorer = scorer(method, threshold, Some(threshold));
        let (ra, rb) = (record(&a, Some(&ca)), record(&a, Some(&cb)));
        prop_assert_eq!(scorer.matches(&ra, &rb), scorer.matches(&rb, &ra));
    }

    #[test]
    fn test_seed_link_ids_are_dense(links in prop::collection::vec(any::<bool>(), 0..64)) {
        let len = 8;
        let ids = seed_link(len, |seed, candidate| {
            links.get(seed * len + candidate).copied().unwrap_or(false)
        });

        prop_assert_eq!(ids.len(), len);
        // IDs start at 1 and each new ID is one more than the largest seen so far.
        let mut max_seen = 0;
        for &id in &ids {
            prop_assert!(id >= 1 && id <= max_seen + 1);
            max_seen = max_seen.max(id);
        }
    }

    #[test]
    fn test_seed_link_only_consults_seeds(links in prop::collection::vec(any::<bool>(), 0..64)) {
        let len = 8;
        let ids = seed_link(len, |seed, candidate| {
            links.get(seed * len + candidate).copied().unwrap_or(false)
        });

        // Every member of a group links from the group's first record.
        for (j, &id) in ids.iter().enumerate() {
            let seed = ids.iter().position(|&x| x == id).unwrap_or(j);
            if seed != j {
                prop_assert!(links.get(seed * len + j).copied().unwrap_or(false));
            }
        }
    }
}
