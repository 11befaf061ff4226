use std::collections::{HashMap, HashSet};

use crate::models::Profile;

mod rank;

use rank::{idf, score_ordering, term_match_weight};

// In-memory keyword index over profile text, one document per profile,
// incrementally maintained and fully re-derivable from the profile store.
#[derive(Debug, Default, Clone)]
pub struct SearchIndex {
    docs: HashMap<i64, DocEntry>,
    doc_freqs: HashMap<String, usize>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct DocEntry {
    terms: HashSet<String>,
    name: String,
    seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoc {
    pub user_id: i64,
    pub score: f32,
}

pub const DEFAULT_QUERY_LIMIT: usize = 50;

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // The insertion sequence is assigned on first insert and survives
    // updates, keeping rank tie-breaks stable.
    pub fn upsert(&mut self, profile: &Profile) {
        let seq = match self.docs.get(&profile.user_id) {
            Some(existing) => existing.seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };
        self.remove_term_stats(profile.user_id);

        let terms = tokenize_set(&profile.search_text());
        for term in &terms {
            *self.doc_freqs.entry(term.clone()).or_insert(0) += 1;
        }
        self.docs.insert(
            profile.user_id,
            DocEntry {
                terms,
                name: profile.name.clone(),
                seq,
            },
        );
    }

    pub fn remove(&mut self, user_id: i64) {
        self.remove_term_stats(user_id);
        self.docs.remove(&user_id);
    }

    pub fn clear(&mut self) {
        self.docs.clear();
        self.doc_freqs.clear();
        self.next_seq = 0;
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.docs.contains_key(&user_id)
    }

    // Matching is permissive: OR across query terms, and per term pair OR
    // across exact, prefix and infix comparison. An empty or whitespace-only
    // query yields nothing.
    pub fn query(&self, text: &str, exclude: Option<i64>, limit: usize) -> Vec<ScoredDoc> {
        let query_terms = tokenize_vec(text);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let total_docs = self.docs.len();
        let mut hits: Vec<(&DocEntry, ScoredDoc)> = Vec::new();
        for (user_id, entry) in &self.docs {
            if exclude == Some(*user_id) {
                continue;
            }
            let mut score = 0.0f32;
            for query_term in &query_terms {
                let best = entry
                    .terms
                    .iter()
                    .map(|indexed| term_match_weight(query_term, indexed))
                    .fold(0.0f32, f32::max);
                if best > 0.0 {
                    let df = self.doc_freqs.get(query_term).copied().unwrap_or(0);
                    score += best * idf(df, total_docs);
                }
            }
            if score > 0.0 {
                hits.push((
                    entry,
                    ScoredDoc {
                        user_id: *user_id,
                        score,
                    },
                ));
            }
        }

        hits.sort_by(|(a_entry, a), (b_entry, b)| {
            score_ordering(a.score, a_entry.seq, &a_entry.name, b.score, b_entry.seq, &b_entry.name)
        });
        hits.into_iter()
            .take(limit)
            .map(|(_, scored)| scored)
            .collect()
    }

    fn remove_term_stats(&mut self, user_id: i64) {
        if let Some(existing) = self.docs.get(&user_id) {
            for term in &existing.terms {
                if let Some(df) = self.doc_freqs.get_mut(term) {
                    *df -= 1;
                    if *df == 0 {
                        self.doc_freqs.remove(term);
                    }
                }
            }
        }
    }
}

pub fn tokenize_vec(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|x| !x.is_empty())
        .map(|x| x.to_string())
        .collect()
}

pub fn tokenize_set(text: &str) -> HashSet<String> {
    tokenize_vec(text).into_iter().collect()
}

#[cfg(test)]
mod tests;
