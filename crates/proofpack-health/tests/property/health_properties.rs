use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proofpack_core::config::{HealthConfig, ScoreWeights};
use proofpack_core::models::{Document, DocumentCategory, DocumentMetadata};
use proofpack_health::{compute_pack_health, identify_gaps};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
}

fn arb_category() -> impl Strategy<Value = DocumentCategory> {
    prop_oneof![
        Just(DocumentCategory::Insurance),
        Just(DocumentCategory::License),
        Just(DocumentCategory::Certification),
        Just(DocumentCategory::TaxCompliance),
        Just(DocumentCategory::PastPerformance),
        Just(DocumentCategory::Reference),
    ]
}

fn arb_document() -> impl Strategy<Value = Document> {
    (
        arb_category(),
        proptest::option::of(-400i64..400),
        0u64..8192,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(category, offset, size, title, notes)| {
            let mut doc = Document::new("pack", category)
                .with_file_size(size)
                .with_metadata(DocumentMetadata {
                    title: title.then(|| "Title".to_string()),
                    notes: notes.then(|| "Notes".to_string()),
                    ..Default::default()
                });
            doc.expiration_date = offset.map(|days| today() + Duration::days(days));
            doc
        })
}

fn today() -> NaiveDate {
    now().date_naive()
}

fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0f64..10.0,
        Just(0.0),
        Just(1e308),
        Just(f64::MAX),
        Just(f64::INFINITY),
        Just(f64::NAN),
        Just(-1.0),
        any::<f64>(),
    ]
}

fn arb_weights() -> impl Strategy<Value = ScoreWeights> {
    (arb_weight(), arb_weight(), arb_weight()).prop_map(|(completeness, expiration, quality)| {
        ScoreWeights {
            completeness,
            expiration,
            quality,
        }
    })
}

// ── Bounded scores ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn scores_bounded(docs in prop::collection::vec(arb_document(), 0..20)) {
        let config = HealthConfig::default();
        let health = compute_pack_health(&docs, &config, now());
        for score in [
            health.overall_score,
            health.completeness_score,
            health.expiration_score,
            health.quality_score,
            health.remediation_score,
        ] {
            prop_assert!((0.0..=100.0).contains(&score), "score out of range: {}", score);
        }
    }

    #[test]
    fn scores_bounded_for_any_weights_and_window(
        docs in prop::collection::vec(arb_document(), 0..12),
        weights in arb_weights(),
        warning_days in prop_oneof![0i64..400, any::<i64>()],
    ) {
        let config = HealthConfig {
            weights,
            expiration_warning_days: warning_days,
            ..HealthConfig::default()
        };
        let health = compute_pack_health(&docs, &config, now());
        for score in [
            health.overall_score,
            health.completeness_score,
            health.expiration_score,
            health.quality_score,
            health.remediation_score,
        ] {
            prop_assert!((0.0..=100.0).contains(&score), "score out of range: {}", score);
        }
        prop_assert_eq!(health.is_eligible_for_introductions, health.overall_score >= 70.0);
    }

    #[test]
    fn eligibility_matches_threshold(docs in prop::collection::vec(arb_document(), 0..20)) {
        let health = compute_pack_health(&docs, &HealthConfig::default(), now());
        prop_assert_eq!(health.is_eligible_for_introductions, health.overall_score >= 70.0);
    }

    #[test]
    fn gaps_are_required_categories_without_current_documents(
        docs in prop::collection::vec(arb_document(), 0..20),
    ) {
        let config = HealthConfig::default();
        let gaps = identify_gaps(&docs, &config, now());
        for gap in &gaps {
            prop_assert!(config.required_categories.contains(&gap.category));
        }
        prop_assert!(gaps.len() <= config.required_categories.len());
    }
}

// ── Loss of coverage never helps ─────────────────────────────────────────

proptest! {
    #[test]
    fn removing_sole_coverer_never_increases_score(
        docs in prop::collection::vec(arb_document(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let config = HealthConfig::default();
        let index = pick.index(docs.len());
        let removed = &docs[index];
        let sole = docs.iter().filter(|d| d.category == removed.category).count() == 1;
        prop_assume!(sole && config.required_categories.contains(&removed.category));

        let before = compute_pack_health(&docs, &config, now());
        let mut remaining = docs.clone();
        remaining.remove(index);
        let after = compute_pack_health(&remaining, &config, now());

        prop_assert!(after.overall_score <= before.overall_score + 1e-9);
        prop_assert!(after.completeness_score < before.completeness_score);
    }

    #[test]
    fn full_current_coverage_has_no_gaps(extra in prop::collection::vec(arb_document(), 0..10)) {
        let config = HealthConfig::default();
        let mut docs: Vec<Document> = config
            .required_categories
            .iter()
            .cloned()
            .map(|c| Document::new("pack", c))
            .collect();
        docs.extend(extra);

        let health = compute_pack_health(&docs, &config, now());
        prop_assert_eq!(health.completeness_score, 100.0);
        prop_assert!(identify_gaps(&docs, &config, now()).is_empty());
    }

    #[test]
    fn deterministic(docs in prop::collection::vec(arb_document(), 0..20)) {
        let config = HealthConfig::default();
        prop_assert_eq!(
            compute_pack_health(&docs, &config, now()),
            compute_pack_health(&docs, &config, now())
        );
    }
}
