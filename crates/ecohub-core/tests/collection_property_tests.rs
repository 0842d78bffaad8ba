use ecohub_core::{Collection, Fields, Query};
use proptest::prelude::*;
use serde_json::json;

fn status() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("active"), Just("pending"), Just("closed")]
}

proptest! {
    #[test]
    fn prop_ids_are_one_to_n(n in 0usize..60) {
        let mut collection = Collection::new("Challenge");
        let ids: Vec<u64> = (0..n)
            .map(|_| collection.create(Fields::new()).id().get())
            .collect();
        let expected: Vec<u64> = (1..=n as u64).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_deleted_ids_are_never_reassigned(n in 1usize..30, deletes in prop::collection::vec(1u64..30, 0..10)) {
        let mut collection = Collection::new("Message");
        for _ in 0..n {
            collection.create(Fields::new());
        }
        for id in &deletes {
            collection.delete(*id);
        }
        let next = collection.create(Fields::new());
        prop_assert_eq!(next.id().get(), n as u64 + 1);
    }

    #[test]
    fn prop_filter_matches_and_limits(
        rows in prop::collection::vec((status(), 0i64..500), 0..40),
        limit in 0usize..10,
    ) {
        let mut collection = Collection::new("Submission");
        for (s, points) in &rows {
            collection.create(Fields::new().with("status", *s).with("points", *points));
        }

        let results = collection.filter(
            &Query::new()
                .where_eq("status", json!("active"))
                .order_by("-points")
                .limit(limit),
        );

        let active = rows.iter().filter(|(s, _)| *s == "active").count();
        let expected_len = if limit == 0 { active } else { active.min(limit) };
        prop_assert_eq!(results.len(), expected_len);
        prop_assert!(results.iter().all(|r| r.get("status") == Some(&json!("active"))));

        let points: Vec<i64> = results
            .iter()
            .map(|r| r.get("points").and_then(|v| v.as_i64()).unwrap())
            .collect();
        prop_assert!(points.windows(2).all(|w| w[0] >= w[1]));
        prop_assert_eq!(collection.len(), rows.len());
    }
}
