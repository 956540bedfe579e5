//! Property-based tests for postpack.
//!
//! These tests generate random inputs to find edge cases.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use postpack::prelude::*;

/// Text bodies built from a fixed pool of fragments (no regex strategies).
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Hello", "world", " ", "  ", "\n", "\n\n", "\t", "\r\n", "\u{a0}", "\u{2003}",
            "Привет", "🎉", "a;b", "\"quoted\"", "x",
        ]),
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_reactions() -> impl Strategy<Value = Option<ReactionSummary>> {
    prop::option::of(
        prop::collection::vec(
            prop_oneof![
                (0u64..1_000, any::<bool>()).prop_map(|(n, some)| ReactionEntry::emoji("👍", some.then_some(n))),
                (0u64..1_000).prop_map(|n| ReactionEntry::paid(Some(n))),
                Just(ReactionEntry::unknown("future")),
            ],
            0..6,
        )
        .prop_map(ReactionSummary::new),
    )
}

/// A timestamp from a small range so that ties are common.
fn arb_timestamp() -> impl Strategy<Value = Option<RawTimestamp>> {
    prop::option::of((0i64..5).prop_map(|hour| RawTimestamp::from_unix(1_705_276_800 + hour * 3600)))
}

fn arb_message() -> impl Strategy<Value = RawMessage> {
    (
        arb_text(),
        prop::option::of(0u64..10_000),
        arb_reactions(),
        arb_timestamp(),
    )
        .prop_map(|(text, views, reactions, date)| RawMessage {
            id: 0,
            text: Some(text),
            date,
            views,
            reactions,
        })
}

/// Messages with ids equal to their arrival position.
fn arb_messages() -> impl Strategy<Value = Vec<RawMessage>> {
    prop::collection::vec(arb_message(), 0..40).prop_map(|messages| {
        messages
            .into_iter()
            .enumerate()
            .map(|(i, mut m)| {
                m.id = i as u64;
                m
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn blank_text_never_produces_a_post(text in arb_text()) {
        let post = normalize(RawMessage::new(1).with_text(text.clone()));
        prop_assert_eq!(post.is_none(), text.trim().is_empty());
    }

    #[test]
    fn normalized_text_has_no_whitespace_runs(msg in arb_message()) {
        if let Some(post) = normalize(msg) {
            let text = post.text();
            prop_assert!(!text.is_empty());
            prop_assert_eq!(text, text.trim());
            let chars: Vec<char> = text.chars().collect();
            prop_assert!(
                chars.windows(2).all(|w| !(w[0].is_whitespace() && w[1].is_whitespace())),
                "whitespace run in {:?}", text
            );
            prop_assert_eq!(post.text_length(), chars.len());
        }
    }

    #[test]
    fn engagement_matches_ratio(msg in arb_message()) {
        if let Some(post) = normalize(msg) {
            if post.views() == 0 {
                prop_assert_eq!(post.engagement(), 0.0);
            } else {
                let expected = post.reaction_count() as f64 / post.views() as f64;
                prop_assert!((post.engagement() - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn engagement_is_total(reactions in any::<u64>(), views in any::<u64>()) {
        let value = engagement(reactions, views);
        prop_assert!(value.is_finite());
        prop_assert!(value >= 0.0);
    }

    #[test]
    fn dataset_is_ordered_and_stable(messages in arb_messages()) {
        let dataset = DatasetBuilder::build(messages);
        let posts = dataset.posts();

        for pair in posts.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.timestamp() <= b.timestamp());
            if a.timestamp() == b.timestamp() {
                prop_assert!(a.message_id() < b.message_id(), "tie reordered");
            }
        }
    }

    #[test]
    fn stats_account_for_every_message(messages in arb_messages()) {
        let received = messages.len();
        let dataset = DatasetBuilder::build(messages);
        let stats = dataset.stats();

        prop_assert_eq!(stats.received, received);
        prop_assert_eq!(stats.kept + stats.dropped_empty, received);
        prop_assert_eq!(stats.kept, dataset.len());
    }

    #[test]
    fn csv_round_trip(messages in arb_messages()) {
        let dataset = DatasetBuilder::build(messages);
        let csv = to_csv(&dataset, b',').unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        prop_assert_eq!(rows.len(), dataset.len());

        for (row, post) in rows.iter().zip(dataset.iter()) {
            prop_assert_eq!(row[0].parse::<u64>().unwrap(), post.message_id());
            let date: Option<DateTime<Utc>> = if row[1].is_empty() {
                None
            } else {
                Some(DateTime::parse_from_rfc3339(&row[1]).unwrap().with_timezone(&Utc))
            };
            prop_assert_eq!(date, post.timestamp());
            prop_assert_eq!(&row[2], post.text());
            prop_assert_eq!(row[4].parse::<u64>().unwrap(), post.views());
            prop_assert_eq!(row[5].parse::<u64>().unwrap(), post.reaction_count());
            prop_assert_eq!(row[6].parse::<f64>().unwrap(), post.engagement());
        }
    }

    #[test]
    fn naive_timestamps_keep_wall_clock(secs in 0i64..4_102_444_800) {
        let naive = Utc.timestamp_opt(secs, 0).unwrap().naive_utc();
        let post = normalize(RawMessage::new(1).with_text("x").with_date(naive)).unwrap();
        prop_assert_eq!(post.timestamp().unwrap().naive_utc(), naive);
    }
}
