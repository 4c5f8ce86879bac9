use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// Compact RO/EN blacklist; extend per deployment policy.
static BLACKLIST: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // English common
        "fuck",
        "fucking",
        "motherfucker",
        "mf",
        "shit",
        "bullshit",
        "bastard",
        "asshole",
        "dick",
        "prick",
        "cunt",
        "slut",
        "whore",
        "retard",
        // Romanian common (non-exhaustive)
        "prost",
        "idiot",
        "bou",
        "tampit",
        "handicapat",
        "jegos",
        "nesimtit",
        "pula",
        "pizda",
        "muie",
        "futu",
        "futut",
        "fut",
        "curve",
        "curva",
        "panarama",
    ]
    .into()
});

static BLACKLIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = BLACKLIST
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
});

static NON_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z ]+").unwrap());

fn map_leet(ch: char) -> char {
    match ch {
        '0' => 'o',
        '1' => 'i',
        '3' => 'e',
        '4' => 'a',
        '5' => 's',
        '7' => 't',
        '@' => 'a',
        '$' => 's',
        '€' => 'e',
        '£' => 'l',
        '!' => 'i',
        other => other,
    }
}

/// Canonical form for filtering: fold diacritics, lowercase, undo common
/// leetspeak substitutions, drop non-letters, collapse long character runs
/// (cooool -> cool) and whitespace.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .map(map_leet)
        .collect();

    let lettered = NON_LETTER.replace_all(&folded, " ");

    let mut collapsed = String::with_capacity(lettered.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for ch in lettered.chars() {
        if prev == Some(ch) {
            run += 1;
        } else {
            prev = Some(ch);
            run = 1;
        }
        if run <= 2 {
            collapsed.push(ch);
        }
    }

    collapsed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns (true, offending_term) when the text contains blacklisted
/// language, else (false, ""). Token matches first, then word-boundary
/// matches to catch spacing/obfuscation tricks.
pub fn is_inappropriate(text: &str) -> (bool, String) {
    let norm = normalize_text(text);

    for token in norm.split_whitespace() {
        if BLACKLIST.contains(token) {
            return (true, token.to_string());
        }
    }

    if let Some(found) = BLACKLIST_RE.find(&norm) {
        return (true, found.as_str().to_string());
    }

    (false, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        let (blocked, term) = is_inappropriate("Vreau o carte despre prietenie și magie");
        assert!(!blocked);
        assert!(term.is_empty());
    }

    #[test]
    fn direct_matches_are_blocked() {
        let (blocked, term) = is_inappropriate("ce carte proastă, prost autor");
        assert!(blocked);
        assert_eq!(term, "prost");
    }

    #[test]
    fn leetspeak_is_unfolded() {
        let (blocked, term) = is_inappropriate("pr0st");
        assert!(blocked);
        assert_eq!(term, "prost");
    }

    #[test]
    fn diacritics_do_not_evade_the_filter() {
        let (blocked, term) = is_inappropriate("tâmpit");
        assert!(blocked);
        assert_eq!(term, "tampit");
    }

    #[test]
    fn repeated_characters_collapse() {
        assert_eq!(normalize_text("cooool"), "cool");
        assert_eq!(normalize_text("daaaa, sigur"), "daa sigur");
    }

    #[test]
    fn blacklist_terms_inside_clean_words_do_not_trigger() {
        // "bou" is blacklisted but "bourgeois" must not match.
        let (blocked, _) = is_inappropriate("literatura bourgeois a secolului");
        assert!(!blocked);
    }
}
