use std::cmp::Ordering;

const W_EXACT: f32 = 1.0;
const W_PREFIX: f32 = 0.6;
const W_INFIX: f32 = 0.35;

// Exact outranks prefix, prefix outranks infix; anything else contributes
// nothing.
pub(super) fn term_match_weight(query_term: &str, indexed_term: &str) -> f32 {
    if indexed_term == query_term {
        return W_EXACT;
    }
    if indexed_term.starts_with(query_term) {
        return W_PREFIX;
    }
    if indexed_term.contains(query_term) {
        return W_INFIX;
    }
    0.0
}

// Smoothed idf over the exact-term corpus. Terms unseen in the corpus
// (reachable only via prefix/infix) rank as rare.
pub(super) fn idf(doc_freq: usize, total_docs: usize) -> f32 {
    if total_docs == 0 {
        return 0.0;
    }
    let n = usize_to_f32(total_docs);
    let df = usize_to_f32(doc_freq);
    let ratio = (n - df + 0.5) / (df + 0.5);
    ratio.ln_1p().max(0.0)
}

// Score descending, then insertion sequence ascending, then name ascending.
pub(super) fn score_ordering(
    a_score: f32,
    a_seq: u64,
    a_name: &str,
    b_score: f32,
    b_seq: u64,
    b_name: &str,
) -> Ordering {
    b_score
        .partial_cmp(&a_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a_seq.cmp(&b_seq))
        .then_with(|| a_name.cmp(b_name))
}

#[allow(
    clippy::cast_precision_loss,
    reason = "ranking weights are intentionally lossy floating-point values"
)]
const fn usize_to_f32(value: usize) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_outranks_prefix_outranks_infix() {
        let exact = term_match_weight("design", "design");
        let prefix = term_match_weight("design", "designer");
        let infix = term_match_weight("sign", "designer");
        assert!(exact > prefix);
        assert!(prefix > infix);
        assert_eq!(term_match_weight("rust", "designer"), 0.0);
    }

    #[test]
    fn idf_favors_rare_terms() {
        assert!(idf(1, 100) > idf(90, 100));
        assert!(idf(0, 100) >= idf(1, 100));
        assert_eq!(idf(0, 0), 0.0);
    }

    #[test]
    fn ordering_breaks_score_ties_by_sequence_then_name() {
        assert_eq!(
            score_ordering(1.0, 3, "zoe", 1.0, 1, "ada"),
            Ordering::Greater
        );
        assert_eq!(score_ordering(1.0, 2, "ada", 1.0, 2, "zoe"), Ordering::Less);
        assert_eq!(score_ordering(2.0, 9, "zoe", 1.0, 1, "ada"), Ordering::Less);
    }
}
