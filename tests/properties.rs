use proptest::prelude::*;
use x_score::scoring::Scorer;
use x_score::EngagementRecord;

fn record_strategy() -> impl Strategy<Value = EngagementRecord> {
    (
        "[a-z #@?\n]{0,300}",
        0u64..1_000_000,
        0u64..100_000,
        0u64..100_000,
        0u64..10_000_000,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(text, likes, replies, reposts, views, has_video, is_verified)| EngagementRecord {
                text,
                likes,
                replies,
                reposts,
                views,
                has_video,
                has_media: has_video,
                is_verified,
                ..EngagementRecord::default()
            },
        )
}

proptest! {
    #[test]
    fn scoring_is_deterministic(record in record_strategy()) {
        let scorer = Scorer::default();
        prop_assert_eq!(scorer.score(&record), scorer.score(&record));
    }

    #[test]
    fn more_engagement_never_lowers_raw_score(
        record in record_strategy(),
        extra_likes in 0u64..10_000,
        extra_replies in 0u64..10_000,
        extra_reposts in 0u64..10_000,
    ) {
        let scorer = Scorer::default();
        let base = scorer.score(&record);
        let boosted = scorer.score(&EngagementRecord {
            likes: record.likes + extra_likes,
            replies: record.replies + extra_replies,
            reposts: record.reposts + extra_reposts,
            ..record.clone()
        });
        prop_assert!(boosted.exact_raw_score >= base.exact_raw_score);
    }

    #[test]
    fn probabilities_stay_in_unit_range(record in record_strategy()) {
        let result = Scorer::default().score(&record);
        for entry in result.breakdown.values() {
            prop_assert!((0.0..=1.0).contains(&entry.probability));
            prop_assert!(entry.contribution >= 0.0);
        }
    }

    #[test]
    fn verification_doubles_exact_total(record in record_strategy()) {
        let scorer = Scorer::default();
        let plain = scorer.score(&EngagementRecord { is_verified: false, ..record.clone() });
        let verified = scorer.score(&EngagementRecord { is_verified: true, ..record });
        prop_assert_eq!(verified.exact_total, plain.exact_total * 2.0);
    }

    #[test]
    fn baseline_is_floored(record in record_strategy()) {
        let result = Scorer::default().score(&record);
        prop_assert_eq!(result.engagement.baseline, record.views.max(1_000) as f64);
    }
}
