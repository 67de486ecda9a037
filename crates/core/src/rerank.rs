//! Keyword reranking of a returned result set
//!
//! Items whose description contains the allow hint move to the front, items
//! containing only the block hint move to the back, everything else keeps its
//! relative order in between. Matching is case-sensitive substring search, so
//! a short block hint can demote unrelated words that happen to contain it.

use crate::results::{ResultItem, ResultSet};

pub const ALLOW_WEIGHT: u32 = 1;
pub const NEUTRAL_WEIGHT: u32 = 2;
pub const BLOCK_WEIGHT: u32 = 1000;

/// Weight of one description. The allow hint is checked first.
pub fn weight(description: &str, allow_hint: &str, block_hint: &str) -> u32 {
    if description.contains(allow_hint) {
        ALLOW_WEIGHT
    } else if description.contains(block_hint) {
        BLOCK_WEIGHT
    } else {
        NEUTRAL_WEIGHT
    }
}

/// Reorder `results` by ascending weight; ties keep their input order.
/// Returns a new set whose items carry their weight.
pub fn rerank(results: &ResultSet, allow_hint: &str, block_hint: &str) -> ResultSet {
    let mut weighted: Vec<ResultItem> = results
        .recommended
        .iter()
        .map(|item| ResultItem {
            weight: Some(weight(&item.description, allow_hint, block_hint)),
            ..item.clone()
        })
        .collect();

    weighted.sort_by_key(|item| item.weight);

    tracing::debug!(
        items = weighted.len(),
        allowed = weighted.iter().filter(|i| i.weight == Some(ALLOW_WEIGHT)).count(),
        blocked = weighted.iter().filter(|i| i.weight == Some(BLOCK_WEIGHT)).count(),
        "Reranked results"
    );

    ResultSet {
        recommended: weighted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, description: &str) -> ResultItem {
        ResultItem {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn ids(results: &ResultSet) -> Vec<&str> {
        results.recommended.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn allow_then_neutral_then_block() {
        let results = ResultSet {
            recommended: vec![
                item("c", "palvelu aikuisille"),
                item("b", "yleinen palvelu"),
                item("a", "palvelu lapsille"),
            ],
        };
        let ranked = rerank(&results, "lapsi", "aikuis");

        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
        let weights: Vec<_> = ranked.recommended.iter().map(|i| i.weight).collect();
        assert_eq!(weights, vec![Some(1), Some(2), Some(1000)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let results = ResultSet {
            recommended: vec![
                item("n1", "x"),
                item("blocked", "kielletty"),
                item("n2", "y"),
                item("n3", "z"),
            ],
        };
        let ranked = rerank(&results, "sallittu", "kielletty");
        assert_eq!(ids(&ranked), vec!["n1", "n2", "n3", "blocked"]);
    }

    #[test]
    fn allow_wins_over_block() {
        assert_eq!(weight("sallittu ja kielletty", "sallittu", "kielletty"), ALLOW_WEIGHT);
    }

    #[test]
    fn matching_is_case_sensitive_substring() {
        assert_eq!(weight("Lapsi", "lapsi", "NULL"), NEUTRAL_WEIGHT);
        // "ikä" inside "ikäihmiset" demotes the item
        assert_eq!(weight("ikäihmiset", "NULL", "ikä"), BLOCK_WEIGHT);
    }

    #[test]
    fn input_is_not_mutated() {
        let results = ResultSet {
            recommended: vec![item("b", "kielletty"), item("a", "sallittu")],
        };
        let ranked = rerank(&results, "sallittu", "kielletty");
        assert_eq!(ids(&results), vec!["b", "a"]);
        assert!(results.recommended.iter().all(|i| i.weight.is_none()));
        assert_eq!(ranked.recommended[0].name, "A");
    }
}
