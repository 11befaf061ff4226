use chrono::Utc;

use crate::models::Profile;

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

#[test]
fn tokenization_is_lowercase_and_split_on_non_alphanumeric() {
    let terms = tokenize_set("Graphic-Designer, UX/UI!");
    assert!(terms.contains("graphic"));
    assert!(terms.contains("designer"));
    assert!(terms.contains("ux"));
    assert!(terms.contains("ui"));
    assert!(!terms.contains(""));
}

#[test]
fn empty_query_yields_no_results() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(1, "Ada", "graphic designer"));

    assert!(index.query("", None, DEFAULT_QUERY_LIMIT).is_empty());
    assert!(index.query("   \t ", None, DEFAULT_QUERY_LIMIT).is_empty());
}

#[test]
fn query_matches_exact_prefix_and_infix() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(1, "Ada", "graphic designer portfolio"));
    index.upsert(&profile(2, "Mia", "backend services in rust"));

    // exact
    let hits = index.query("designer", None, DEFAULT_QUERY_LIMIT);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].user_id, 1);

    // prefix: "design" begins "designer"
    let hits = index.query("design", None, DEFAULT_QUERY_LIMIT);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].user_id, 1);

    // infix: "sign" sits inside "designer"
    let hits = index.query("sign", None, DEFAULT_QUERY_LIMIT);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].user_id, 1);
}

#[test]
fn query_is_or_across_terms() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(1, "Ada", "graphic designer"));
    index.upsert(&profile(2, "Mia", "rust developer"));

    let hits = index.query("designer rust", None, DEFAULT_QUERY_LIMIT);
    let ids: Vec<i64> = hits.iter().map(|h| h.user_id).collect();
    assert!(ids.contains(&1));
    assert!(ids.contains(&2));
}

#[test]
fn more_and_better_matches_rank_higher() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(1, "Ada", "graphic designer and illustrator"));
    index.upsert(&profile(2, "Mia", "graphic posters sometimes"));
    index.upsert(&profile(3, "Zoe", "rust developer"));

    let hits = index.query("graphic designer", None, DEFAULT_QUERY_LIMIT);
    assert_eq!(hits.len(), 2);
    // Two exact matches beat one.
    assert_eq!(hits[0].user_id, 1);
    assert_eq!(hits[1].user_id, 2);
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn equal_scores_tie_break_by_insertion_order() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(5, "Zoe", "painter"));
    index.upsert(&profile(3, "Ada", "painter"));

    let hits = index.query("painter", None, DEFAULT_QUERY_LIMIT);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].user_id, 5);
    assert_eq!(hits[1].user_id, 3);
}

#[test]
fn exclude_drops_the_viewer() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(1, "Ada", "painter"));
    index.upsert(&profile(2, "Mia", "painter"));

    let hits = index.query("painter", Some(1), DEFAULT_QUERY_LIMIT);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].user_id, 2);
}

#[test]
fn limit_caps_results() {
    let mut index = SearchIndex::new();
    for id in 0..10 {
        index.upsert(&profile(id, "Ada", "painter"));
    }

    assert_eq!(index.query("painter", None, 3).len(), 3);
}

#[test]
fn upsert_replaces_previous_document() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(1, "Ada", "graphic designer"));
    index.upsert(&profile(1, "Ada", "woodworking instead"));

    assert!(index.query("designer", None, DEFAULT_QUERY_LIMIT).is_empty());
    let hits = index.query("woodworking", None, DEFAULT_QUERY_LIMIT);
    assert_eq!(hits.len(), 1);
    assert_eq!(index.len(), 1);
}

#[test]
fn remove_deletes_document_and_term_stats() {
    let mut index = SearchIndex::new();
    index.upsert(&profile(1, "Ada", "graphic designer"));
    index.upsert(&profile(2, "Mia", "rust developer"));

    index.remove(1);
    assert!(!index.contains(1));
    assert!(index.query("designer", None, DEFAULT_QUERY_LIMIT).is_empty());
    assert_eq!(index.len(), 1);

    // Removing an absent id is a no-op.
    index.remove(99);
    assert_eq!(index.len(), 1);
}

#[test]
fn rare_terms_outrank_ubiquitous_ones() {
    let mut index = SearchIndex::new();
    // "engineer" appears in every branch/role; "astronomy" in one about.
    index.upsert(&profile(1, "Ada", "amateur astronomy at night"));
    index.upsert(&profile(2, "Mia", "engineer things"));
    index.upsert(&profile(3, "Zoe", "more engineer things"));

    let hits = index.query("astronomy engineer", None, DEFAULT_QUERY_LIMIT);
    assert_eq!(hits[0].user_id, 1);
}
