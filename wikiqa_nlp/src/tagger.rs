//! Part-of-speech tagging of single words without sentence context.
//!
//! Closed-class words and common irregular verbs come from a lexicon.
//! Everything else falls back to shape and suffix rules, ending at `NN`.

use std::collections::HashMap;
use std::sync::OnceLock;

const LEXICON: &[(&str, &[&str])] = &[
    ("WP", &["who", "whom", "what"]),
    ("WP$", &["whose"]),
    ("WDT", &["which", "whichever", "whatever"]),
    ("WRB", &["where", "when", "why", "how", "whenever", "wherever"]),
    (
        "DT",
        &[
            "the", "a", "an", "this", "that", "these", "those", "every", "each", "all", "any",
            "some", "no", "another", "either", "neither", "both",
        ],
    ),
    (
        "PRP",
        &[
            "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
            "yourself", "himself", "herself", "itself", "ourselves", "themselves",
        ],
    ),
    ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
    (
        "IN",
        &[
            "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
            "through", "during", "before", "after", "above", "below", "from", "over", "under",
            "since", "until", "while", "because", "if", "than", "as", "like", "upon", "within",
            "without", "among", "toward", "towards", "across", "behind", "beyond", "near", "per",
            "via", "whether", "though", "although",
        ],
    ),
    ("CC", &["and", "but", "or", "nor", "yet"]),
    ("TO", &["to"]),
    ("EX", &["there"]),
    ("RP", &["up", "down", "off", "out"]),
    (
        "MD",
        &["can", "could", "will", "would", "shall", "should", "may", "might", "must"],
    ),
    ("VB", &["be"]),
    ("VBZ", &["is", "has", "does"]),
    ("VBP", &["are", "am", "have", "do"]),
    ("VBD", &["was", "were", "had", "did"]),
    ("VBN", &["been"]),
    ("VBG", &["being"]),
    (
        "RB",
        &[
            "not", "very", "too", "also", "just", "only", "now", "then", "here", "again", "once",
            "never", "always", "often", "ever", "still", "already", "soon", "so", "sometimes",
            "perhaps", "besides", "afterwards", "nowadays", "thus", "whereas",
        ],
    ),
    (
        "VBD",
        &[
            "wrote", "ate", "went", "came", "saw", "took", "gave", "made", "said", "found",
            "thought", "told", "became", "began", "brought", "built", "bought", "caught",
            "chose", "drew", "drank", "drove", "fell", "felt", "fought", "flew", "forgot", "got",
            "grew", "heard", "held", "kept", "knew", "led", "left", "lost", "meant", "met",
            "paid", "ran", "rose", "sang", "sat", "sent", "shot", "sold", "spoke", "spent",
            "stood", "stole", "swam", "taught", "threw", "understood", "wore", "won",
        ],
    ),
    (
        "VBN",
        &[
            "written", "eaten", "gone", "seen", "taken", "given", "known", "shown", "spoken",
            "chosen", "drawn", "driven", "fallen", "flown", "forgotten", "grown", "risen",
            "stolen", "sung", "thrown", "worn", "born", "done", "begun", "broken",
        ],
    ),
    (
        "VB",
        &[
            "write", "make", "go", "come", "see", "take", "give", "know", "say", "get", "find",
            "think", "tell", "become", "leave", "bring", "begin", "keep", "hold", "invent",
            "discover", "create", "build", "compose", "marry", "die",
        ],
    ),
    (
        "JJ",
        &[
            "big", "small", "large", "old", "new", "good", "bad", "high", "low", "long", "short",
            "great", "many", "much", "few", "first", "last", "other", "same", "different",
        ],
    ),
    (
        "JJS",
        &[
            "largest", "biggest", "tallest", "highest", "longest", "oldest", "smallest", "best",
            "worst", "most", "least",
        ],
    ),
    (
        "CD",
        &[
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "hundred", "thousand", "million", "billion",
        ],
    ),
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish", "ical"];

static TAGS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn lexicon() -> &'static HashMap<&'static str, &'static str> {
    TAGS.get_or_init(|| {
        let mut tags = HashMap::new();
        for (tag, words) in LEXICON {
            for word in *words {
                tags.entry(*word).or_insert(*tag);
            }
        }
        tags
    })
}

/// Penn Treebank tag for `word` taken on its own, or `None` for a token with
/// no letter or digit. Capitalized words take the tag of their lowercase form
/// when it is in the lexicon and are `NNP` otherwise.
#[must_use]
pub fn tag_word(word: &str) -> Option<&'static str> {
    if !word.chars().any(char::is_alphanumeric) {
        return None;
    }
    if is_number(word) {
        return Some("CD");
    }
    if let Some(tag) = lexicon().get(word) {
        return Some(*tag);
    }

    if word.chars().next().is_some_and(char::is_uppercase) {
        // sentence-initial "Did", "Is", "Who" keep their lexicon tag
        let lower = word.to_lowercase();
        return Some(lexicon().get(lower.as_str()).copied().unwrap_or("NNP"));
    }

    Some(suffix_tag(word))
}

fn is_number(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

fn suffix_tag(word: &str) -> &'static str {
    let len = word.chars().count();
    if len > 4 && word.ends_with("ly") {
        "RB"
    } else if len > 5 && word.ends_with("ing") {
        "VBG"
    } else if len > 4 && word.ends_with("ed") {
        "VBD"
    } else if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        "JJ"
    } else if len > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        "NNS"
    } else {
        "NN"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_words() {
        assert_eq!(tag_word("Who"), Some("WP"));
        assert_eq!(tag_word("who"), Some("WP"));
        assert_eq!(tag_word("Where"), Some("WRB"));
        assert_eq!(tag_word("whose"), Some("WP$"));
    }

    #[test]
    fn proper_nouns() {
        assert_eq!(tag_word("Hamlet"), Some("NNP"));
        assert_eq!(tag_word("NASA"), Some("NNP"));
        assert_eq!(tag_word("Denmark"), Some("NNP"));
    }

    #[test]
    fn capitalized_lexicon_words_keep_their_class() {
        assert_eq!(tag_word("Did"), Some("VBD"));
        assert_eq!(tag_word("Does"), Some("VBZ"));
        assert_eq!(tag_word("Is"), Some("VBZ"));
        assert_eq!(tag_word("Are"), Some("VBP"));
        assert_eq!(tag_word("Was"), Some("VBD"));
        assert_eq!(tag_word("Has"), Some("VBZ"));
        assert_eq!(tag_word("Wrote"), Some("VBD"));
        assert_eq!(tag_word("The"), Some("DT"));
    }

    #[test]
    fn verbs() {
        assert_eq!(tag_word("wrote"), Some("VBD"));
        assert_eq!(tag_word("written"), Some("VBN"));
        assert_eq!(tag_word("invented"), Some("VBD"));
        assert_eq!(tag_word("running"), Some("VBG"));
    }

    #[test]
    fn common_nouns() {
        assert_eq!(tag_word("play"), Some("NN"));
        assert_eq!(tag_word("castle"), Some("NN"));
        assert_eq!(tag_word("castles"), Some("NNS"));
        assert_eq!(tag_word("virus"), Some("NN"));
    }

    #[test]
    fn other_classes() {
        assert_eq!(tag_word("quickly"), Some("RB"));
        assert_eq!(tag_word("famous"), Some("JJ"));
        assert_eq!(tag_word("1603"), Some("CD"));
        assert_eq!(tag_word("1,600"), Some("CD"));
        assert_eq!(tag_word("tallest"), Some("JJS"));
        assert_eq!(tag_word("always"), Some("RB"));
        assert_eq!(tag_word("sometimes"), Some("RB"));
    }

    #[test]
    fn punctuation_is_unclassified() {
        assert_eq!(tag_word("?"), None);
        assert_eq!(tag_word("..."), None);
        assert_eq!(tag_word("'"), None);
    }
}
