use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use vocab_trainer::error::ScheduleError;
use vocab_trainer::models::sm2::MIN_EASE_FACTOR;
use vocab_trainer::models::{
    Card, Deck, Grade, SessionAction, SessionPolicy, SessionStatus, advance, build_queue,
    classify, compute_next_review, select_due,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
}

fn card_with(interval: u32, repetition: u32, ease_factor: f64) -> Card {
    Card {
        interval,
        repetition,
        ease_factor,
        ..Card::with_id("c", "你好", "nǐ hǎo", "hello", now())
    }
}

fn review(card: &Card, grade: u8) -> Card {
    compute_next_review(card, Grade::new(grade).unwrap(), now()).unwrap()
}

prop_compose! {
    fn arb_card()(
        interval in 0u32..400,
        repetition in 0u32..30,
        ease_factor in 1.3f64..4.0,
        due_offset in -30i64..30,
    ) -> Card {
        Card {
            due_date: now() + Duration::days(due_offset),
            ..card_with(interval, repetition, ease_factor)
        }
    }
}

proptest! {
    #[test]
    fn long_intervals_schedule_or_report_overflow(
        interval in any::<u32>(),
        repetition in 2u32..1000,
        ease in 1.3f64..20.0,
        grade in 0u8..=5,
    ) {
        let card = card_with(interval, repetition, ease);
        match compute_next_review(&card, Grade::new(grade).unwrap(), now()) {
            Ok(next) if grade >= 3 => {
                prop_assert_eq!(f64::from(next.interval), (f64::from(interval) * ease).round());
                prop_assert_eq!(next.due_date, now() + Duration::days(i64::from(next.interval)));
            }
            Ok(next) => prop_assert_eq!(next.interval, 1),
            Err(ScheduleError::IntervalOverflow { id }) => {
                prop_assert!(grade >= 3);
                prop_assert_eq!(id, "c");
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn easy_reviews_stop_at_overflow(ease in 1.3f64..4.0) {
        let mut current = card_with(0, 0, ease);
        let mut reviews = 0;
        let error = loop {
            match compute_next_review(&current, Grade::new(5).unwrap(), now()) {
                Ok(next) => {
                    prop_assert!(next.interval >= current.interval);
                    current = next;
                    reviews += 1;
                }
                Err(error) => break error,
            }
            prop_assert!(reviews < 200);
        };
        let is_interval_overflow = matches!(error, ScheduleError::IntervalOverflow { .. });
        prop_assert!(is_interval_overflow);

        // The card that could not be pushed further can still be failed
        let reset = review(&current, 0);
        prop_assert_eq!(reset.interval, 1);
        prop_assert_eq!(reset.repetition, 0);
    }

    #[test]
    fn first_success_schedules_one_day(ease in 1.3f64..4.0, interval in 0u32..50, grade in 3u8..=5) {
        let next = review(&card_with(interval, 0, ease), grade);
        prop_assert_eq!(next.interval, 1);
        prop_assert_eq!(next.repetition, 1);
    }

    #[test]
    fn second_success_schedules_six_days(ease in 1.3f64..4.0, interval in 0u32..50, grade in 3u8..=5) {
        let next = review(&card_with(interval, 1, ease), grade);
        prop_assert_eq!(next.interval, 6);
        prop_assert_eq!(next.repetition, 2);
    }

    #[test]
    fn later_success_multiplies_by_previous_ease(
        ease in 1.3f64..4.0,
        interval in 0u32..400,
        repetition in 2u32..30,
        grade in 3u8..=5,
    ) {
        let next = review(&card_with(interval, repetition, ease), grade);
        prop_assert_eq!(next.interval, (f64::from(interval) * ease).round() as u32);
        prop_assert_eq!(next.repetition, repetition + 1);
    }

    #[test]
    fn failure_always_resets(card in arb_card(), grade in 0u8..3) {
        let next = review(&card, grade);
        prop_assert_eq!(next.interval, 1);
        prop_assert_eq!(next.repetition, 0);
    }

    #[test]
    fn ease_is_monotonic_in_grade_and_floored(ease in 1.3f64..4.0) {
        let card = card_with(10, 4, ease);
        let eases: Vec<f64> = (0..=5).map(|g| review(&card, g).ease_factor).collect();
        for pair in eases.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        prop_assert!(eases.iter().all(|e| *e >= MIN_EASE_FACTOR));
    }

    #[test]
    fn due_date_is_whole_days_after_now(card in arb_card(), grade in 0u8..=5) {
        let next = review(&card, grade);
        prop_assert_eq!(next.due_date, now() + Duration::days(i64::from(next.interval)));
    }

    #[test]
    fn review_preserves_display_fields(card in arb_card(), grade in 0u8..=5) {
        let next = review(&card, grade);
        prop_assert_eq!(&next.id, &card.id);
        prop_assert_eq!(&next.term, &card.term);
        prop_assert_eq!(&next.phonetic, &card.phonetic);
        prop_assert_eq!(&next.translation, &card.translation);
    }

    #[test]
    fn classify_partitions_every_card(cards in prop::collection::vec(arb_card(), 1..40)) {
        let stats = classify(&cards, now());
        prop_assert_eq!(stats.total, cards.len());
        prop_assert_eq!(stats.new + stats.learning + stats.mature, stats.total);
        prop_assert_eq!(stats.due, select_due(&cards, now()).len());
    }

    #[test]
    fn select_due_is_a_stable_filter(cards in prop::collection::vec(arb_card(), 0..40)) {
        let due = select_due(&cards, now());
        let expected: Vec<Card> = cards.iter().filter(|c| c.due_date <= now()).cloned().collect();
        prop_assert_eq!(due, expected);
    }

    #[test]
    fn mastery_queue_is_a_permutation_of_unmastered(
        mastered in prop::collection::vec(any::<bool>(), 0..20),
        seed in any::<u64>(),
    ) {
        let deck = Deck {
            id: "d".to_string(),
            name: "Deck".to_string(),
            cards: mastered
                .iter()
                .enumerate()
                .map(|(i, m)| Card {
                    mastered: *m,
                    ..Card::with_id(format!("c{i}"), "t", "p", "x", now())
                })
                .collect(),
            is_default: false,
        };

        let session = build_queue(
            &deck,
            SessionPolicy::Mastery,
            now(),
            &mut Mcg128Xsl64::seed_from_u64(seed),
        );
        let mut queued: Vec<String> = session.queue().iter().map(|c| c.id.clone()).collect();
        queued.sort();
        let mut expected: Vec<String> = deck
            .cards
            .iter()
            .filter(|c| !c.mastered)
            .map(|c| c.id.clone())
            .collect();
        expected.sort();
        prop_assert_eq!(queued, expected);
    }
}

#[test]
fn fresh_card_review_scenario() {
    let deck = Deck {
        id: "d".to_string(),
        name: "Greetings".to_string(),
        cards: vec![Card::with_id("hello", "你好", "nǐ hǎo", "hello", now())],
        is_default: false,
    };

    let session = build_queue(
        &deck,
        SessionPolicy::DueDate,
        now(),
        &mut Mcg128Xsl64::seed_from_u64(1),
    );
    let step = advance(session, SessionAction::Flip, now()).unwrap();
    let step = advance(step.session, SessionAction::Grade(5), now()).unwrap();
    assert_eq!(step.session.status(), SessionStatus::Complete);

    let first = step.committed.unwrap();
    assert_eq!(first.interval, 1);
    assert_eq!(first.repetition, 1);
    assert!((first.ease_factor - 2.6).abs() < 1e-9);
    assert_eq!(first.due_date, now() + Duration::days(1));

    let second = review(&first, 4);
    assert_eq!(second.interval, 6);
    assert_eq!(second.repetition, 2);
    assert!((second.ease_factor - first.ease_factor).abs() < 1e-9);
}

#[test]
fn blackout_lowers_ease_by_point_eight() {
    let next = review(&card_with(0, 0, 2.5), 0);
    assert!((next.ease_factor - 1.7).abs() < 1e-9);
}

#[test]
fn blackout_at_low_ease_clamps_to_floor() {
    let next = review(&card_with(0, 0, 1.5), 0);
    assert!((next.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);

    let next = review(&next, 0);
    assert!((next.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);
}
