use chrono::Utc;
use tempfile::tempdir;

use crate::error::MingleError;
use crate::models::{MatchOutcome, NextOutcome, Profile};

use super::*;

fn profile(user_id: i64, name: &str, about: &str) -> Profile {
    Profile {
        user_id,
        name: name.to_string(),
        branch: "Berlin".to_string(),
        role: "Engineer".to_string(),
        about: about.to_string(),
        photo_ref: None,
        created_at: Utc::now(),
    }
}

fn engine_with(profiles: &[(i64, &str)]) -> Mingle {
    let engine = Mingle::open_in_memory().expect("open engine");
    for (id, name) in profiles {
        engine
            .put_profile(&profile(*id, name, "Curious about almost everything."))
            .expect("put profile");
    }
    engine
}

fn next_id(engine: &Mingle, viewer: i64) -> Option<i64> {
    match engine.next(viewer).expect("next") {
        NextOutcome::Candidate(p) => Some(p.user_id),
        NextOutcome::Exhausted => None,
    }
}

#[test]
fn open_rebuilds_index_from_store() {
    let temp = tempdir().expect("tempdir");

    {
        let engine = Mingle::open(temp.path()).expect("open");
        engine
            .put_profile(&profile(1, "Ada", "graphic designer"))
            .expect("put");
    }

    // A fresh handle re-derives the search structure from `profiles`.
    let engine = Mingle::open(temp.path()).expect("reopen");
    let hits = engine.search(99, "designer").expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].profile.user_id, 1);
}

#[test]
fn put_profile_rejects_invalid_fields() {
    let engine = Mingle::open_in_memory().expect("open");
    let mut bad = profile(1, "A", "long enough about text");
    assert!(matches!(
        engine.put_profile(&bad),
        Err(MingleError::Validation(_))
    ));

    bad.name = "Ada".to_string();
    bad.about = "short".to_string();
    assert!(matches!(
        engine.put_profile(&bad),
        Err(MingleError::Validation(_))
    ));

    assert_eq!(engine.profile_count().expect("count"), 0);
}

#[test]
fn next_never_deals_the_viewer_and_never_repeats() {
    let engine = engine_with(&[(1, "Ada"), (2, "Mia"), (3, "Zoe"), (4, "Kim")]);

    let mut seen = Vec::new();
    while let Some(id) = next_id(&engine, 1) {
        assert_ne!(id, 1);
        assert!(!seen.contains(&id), "candidate {id} dealt twice");
        seen.push(id);
    }
    assert_eq!(seen.len(), 3);

    // Exhausted stays exhausted until an explicit clear.
    assert_eq!(next_id(&engine, 1), None);
    engine.clear_viewed(1).expect("clear");
    assert!(next_id(&engine, 1).is_some());
}

#[test]
fn population_of_one_is_always_exhausted() {
    let engine = engine_with(&[(1, "Ada")]);
    for _ in 0..3 {
        assert_eq!(next_id(&engine, 1), None);
    }
}

#[test]
fn next_skips_already_viewed_candidates() {
    let engine = engine_with(&[(1, "Ada"), (2, "Mia"), (3, "Zoe"), (4, "Kim")]);
    engine.tracker.record(1, 2).expect("seed viewed");

    for _ in 0..10 {
        let id = next_id(&engine, 1).expect("candidate");
        assert!(id == 3 || id == 4, "unexpected candidate {id}");
        engine.clear_viewed(1).expect("clear");
        engine.tracker.record(1, 2).expect("re-seed viewed");
    }
}

#[test]
fn next_records_current_candidate() {
    let engine = engine_with(&[(1, "Ada"), (2, "Mia")]);

    let dealt = next_id(&engine, 1).expect("candidate");
    let current = engine
        .current_candidate(1)
        .expect("current")
        .expect("present");
    assert_eq!(current.user_id, dealt);

    // Deleting the displayed profile degrades to "nothing on screen".
    engine.delete_profile(dealt).expect("delete");
    assert!(engine.current_candidate(1).expect("current").is_none());
}

#[test]
fn one_directional_interest_is_pending_mutual_is_matched() {
    let engine = engine_with(&[(1, "Ada"), (2, "Mia")]);

    let first = engine.record_interest(1, 2).expect("first interest");
    assert_eq!(first, MatchOutcome::Pending);
    assert!(!engine.state.is_mutual(1, 2).expect("one direction"));

    let second = engine.record_interest(2, 1).expect("second interest");
    let MatchOutcome::Matched(a, b) = second else {
        panic!("expected match, got {second:?}");
    };
    assert_eq!(a.user_id, 2);
    assert_eq!(b.user_id, 1);

    // The edge set is already complete; re-asserting is a no-op and the
    // match event does not fire twice.
    assert_eq!(
        engine.record_interest(1, 2).expect("re-assert"),
        MatchOutcome::Pending
    );
}

#[test]
fn self_interest_is_rejected_without_state_change() {
    let engine = engine_with(&[(1, "Ada")]);

    assert!(matches!(
        engine.record_interest(1, 1),
        Err(MingleError::InvalidEdge(_))
    ));
    assert_eq!(engine.state.count_interests().expect("count"), 0);
}

#[test]
fn interest_in_missing_profile_is_not_found() {
    let engine = engine_with(&[(1, "Ada")]);

    assert!(matches!(
        engine.record_interest(1, 99),
        Err(MingleError::NotFound(_))
    ));
    assert!(matches!(
        engine.record_interest(99, 1),
        Err(MingleError::NotFound(_))
    ));
    assert_eq!(engine.state.count_interests().expect("count"), 0);
}

#[test]
fn racing_opposite_interests_yield_exactly_one_match() {
    for _ in 0..20 {
        let engine = engine_with(&[(1, "Ada"), (2, "Mia")]);

        let a = {
            let engine = engine.clone();
            std::thread::spawn(move || engine.record_interest(1, 2).expect("interest 1->2"))
        };
        let b = {
            let engine = engine.clone();
            std::thread::spawn(move || engine.record_interest(2, 1).expect("interest 2->1"))
        };

        let outcomes = [a.join().expect("join"), b.join().expect("join")];
        let matches = outcomes
            .iter()
            .filter(|o| matches!(o, MatchOutcome::Matched(_, _)))
            .count();
        assert_eq!(matches, 1, "outcomes: {outcomes:?}");
    }
}

#[test]
fn delete_cascades_everywhere() {
    let engine = engine_with(&[(1, "Ada"), (2, "Mia"), (3, "Zoe")]);
    engine.record_interest(1, 2).expect("edge");
    engine.record_interest(2, 1).expect("reverse edge");
    engine.tracker.record(3, 1).expect("viewer 3 saw 1");

    assert!(engine.delete_profile(1).expect("delete"));

    // Gone from selection, graph, search, and its own tracker state.
    for _ in 0..10 {
        if let Some(id) = next_id(&engine, 2) {
            assert_ne!(id, 1);
        }
        engine.clear_viewed(2).expect("clear");
    }
    assert!(!engine.state.is_mutual(1, 2).expect("mutual after delete"));
    assert_eq!(engine.state.count_interests().expect("edges"), 0);
    assert!(engine.search(99, "Ada").expect("search").is_empty());

    // Viewer 3 still holds the stale id; the viewed list tolerates it.
    assert!(engine.viewed_profiles(3).expect("viewed").is_empty());
    assert!(engine.tracker.is_viewed(3, 1).expect("stale id retained"));

    assert!(!engine.delete_profile(1).expect("second delete"));
}

#[test]
fn search_matches_infix_and_prefix_and_skips_self() {
    let engine = engine_with(&[]);
    engine
        .put_profile(&profile(1, "Ada", "works as a graphic designer"))
        .expect("put");
    engine
        .put_profile(&profile(2, "Mia", "rust developer, likes design reviews"))
        .expect("put");

    let hits = engine.search(99, "designer").expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].profile.user_id, 1);

    let hits = engine.search(99, "design").expect("search");
    assert_eq!(hits.len(), 2);

    // The viewer never meets themselves in results.
    let hits = engine.search(1, "designer").expect("search");
    assert!(hits.is_empty());

    assert!(engine.search(99, "").expect("empty query").is_empty());
}

#[test]
fn search_does_not_touch_browsing_state() {
    let engine = engine_with(&[(1, "Ada"), (2, "Mia")]);

    let hits = engine.search(1, "Mia").expect("search");
    assert_eq!(hits.len(), 1);
    assert!(engine.tracker.viewed(1).expect("viewed").is_empty());

    // The found profile can still be dealt by discovery.
    assert_eq!(next_id(&engine, 1), Some(2));
}

#[test]
fn three_profile_scenario_end_to_end() {
    let engine = engine_with(&[(1, "Ada"), (2, "Mia"), (3, "Zoe")]);

    let dealt = next_id(&engine, 1).expect("candidate");
    assert_ne!(dealt, 1);

    assert_eq!(
        engine.record_interest(1, dealt).expect("interest"),
        MatchOutcome::Pending
    );

    let MatchOutcome::Matched(a, b) = engine.record_interest(dealt, 1).expect("reverse") else {
        panic!("expected match");
    };
    assert_eq!(a.user_id, dealt);
    assert_eq!(b.user_id, 1);
}
