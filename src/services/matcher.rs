use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Tuning knobs for the fuzzy title matcher. The defaults are empirically
/// chosen values, not proven invariants; keep them adjustable.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum composite score a title must reach to be accepted.
    pub accept_threshold: f64,
    /// Added when the query occurs inside the title.
    pub substring_bonus: f64,
    /// Added when the title starts with the query.
    pub prefix_bonus: f64,
    /// Penalty per character of length difference between title and query.
    pub gap_penalty_step: f64,
    /// Ceiling for the length-gap penalty.
    pub gap_penalty_cap: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 0.60,
            substring_bonus: 0.25,
            prefix_bonus: 0.15,
            gap_penalty_step: 0.005,
            gap_penalty_cap: 0.25,
        }
    }
}

/// Canonical text form used for every string comparison in the pipeline:
/// NFKD-decompose, drop combining marks, lowercase, collapse runs of
/// non-alphanumeric characters to single spaces, trim.
pub fn normalize(s: &str) -> String {
    let stripped: String = s.nfkd().filter(|ch| !is_combining_mark(*ch)).collect();

    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for ch in stripped.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            out.push(ch);
            pending_space = false;
        } else {
            pending_space = true;
        }
    }
    out
}

/// Index of the best-matching normalized title for a normalized query, or
/// None when nothing clears the acceptance threshold. Exact equality wins
/// outright; otherwise each title is scored `ratio + bonus - penalty` and
/// the first title with the maximum score is kept.
pub fn best_title_index(
    norm_query: &str,
    norm_titles: &[String],
    config: &MatcherConfig,
) -> Option<usize> {
    if norm_query.is_empty() {
        return None;
    }
    if let Some(idx) = norm_titles.iter().position(|t| t == norm_query) {
        return Some(idx);
    }

    let query_len = norm_query.chars().count() as i64;
    let mut best_idx: Option<usize> = None;
    let mut best_score = 0.0_f64;

    for (i, title) in norm_titles.iter().enumerate() {
        let ratio = sequence_ratio(norm_query, title);

        let mut bonus = 0.0;
        if title.contains(norm_query) {
            bonus += config.substring_bonus;
        }
        if title.starts_with(norm_query) {
            bonus += config.prefix_bonus;
        }

        let gap = (title.chars().count() as i64 - query_len).abs() as f64;
        let penalty = (gap * config.gap_penalty_step).min(config.gap_penalty_cap);

        let score = ratio + bonus - penalty;
        if score > best_score {
            best_idx = Some(i);
            best_score = score;
        }
    }

    best_idx.filter(|_| best_score >= config.accept_threshold)
}

/// Ratcliff/Obershelp similarity: twice the total length of the matching
/// blocks over the combined length of both strings, in [0, 1].
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / total as f64
}

fn matched_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (ai, bi, len) = longest_matching_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..ai], &b[..bi]) + matched_len(&a[ai + len..], &b[bi + len..])
}

/// Longest common contiguous block between `a` and `b`; among equally long
/// blocks the earliest in `a`, then `b`, wins.
fn longest_matching_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, &ca) in a.iter().enumerate() {
        let mut row: HashMap<usize, usize> = HashMap::new();
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let k = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                row.insert(j, k);
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        j2len = row;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm_all(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|t| normalize(t)).collect()
    }

    #[test]
    fn normalize_strips_diacritics_case_and_punctuation() {
        assert_eq!(normalize("Stăpânul Inelelor: Frăția Inelului"), "stapanul inelelor fratia inelului");
        assert_eq!(normalize("  Mândrie -- și __ prejudecată!  "), "mandrie si prejudecata");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn ratio_bounds() {
        assert_eq!(sequence_ratio("abc", "abc"), 1.0);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
        let r = sequence_ratio("hobbitul", "hobitul");
        assert!(r > 0.8 && r < 1.0);
    }

    #[test]
    fn exact_match_always_wins_over_fuzzy_scoring() {
        let titles = norm_all(&["Hobbitul", "Dune", "Hobbitul, ediție ilustrată"]);
        let config = MatcherConfig::default();
        assert_eq!(best_title_index(&normalize("Hobbitul"), &titles, &config), Some(0));
        assert_eq!(best_title_index(&normalize("DUNE"), &titles, &config), Some(1));
    }

    #[test]
    fn returned_index_meets_threshold() {
        let titles = norm_all(&["Hobbitul", "Dune", "Crimă și pedeapsă"]);
        let config = MatcherConfig::default();

        // Close misspelling clears the bar.
        assert_eq!(best_title_index("hobitul", &titles, &config), Some(0));

        // An unrelated query must not produce a low-confidence index.
        assert_eq!(best_title_index("vreau o carte de aventura", &titles, &config), None);
    }

    #[test]
    fn empty_query_never_matches() {
        let titles = norm_all(&["Hobbitul"]);
        assert_eq!(best_title_index("", &titles, &MatcherConfig::default()), None);
    }

    #[test]
    fn prefix_and_substring_bonuses_prefer_the_containing_title() {
        let titles = norm_all(&["Războiul lumilor", "Război și pace"]);
        let config = MatcherConfig::default();
        assert_eq!(best_title_index(&normalize("război și"), &titles, &config), Some(1));
    }

    #[test]
    fn first_title_wins_ties() {
        let titles = norm_all(&["Dune", "Dune"]);
        let config = MatcherConfig::default();
        assert_eq!(best_title_index("dunne", &titles, &config), Some(0));
    }

    #[test]
    fn threshold_is_configurable() {
        let titles = norm_all(&["Hobbitul"]);
        let strict = MatcherConfig {
            accept_threshold: 0.99,
            ..MatcherConfig::default()
        };
        assert_eq!(best_title_index("hobitul", &titles, &strict), None);
    }
}
