//! Turns raw question text into the keywords used for retrieval and ranking.

use serde::{Deserialize, Serialize};

use crate::{LexicalAnalyzer, PosTag};

/// A lemmatized content word and the tag of that lemma taken in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub lemma: String,
    /// `None` when the tagger could not classify the lemma.
    pub tag: Option<PosTag>,
}

impl Keyword {
    pub fn new(lemma: impl Into<String>, tag: Option<PosTag>) -> Self {
        Self {
            lemma: lemma.into(),
            tag,
        }
    }

    #[must_use]
    pub fn is_noun(&self) -> bool {
        self.tag.as_ref().is_some_and(PosTag::is_noun)
    }

    #[must_use]
    pub fn is_proper_noun(&self) -> bool {
        self.tag.as_ref().is_some_and(PosTag::is_proper_noun)
    }
}

/// Keywords in first-occurrence order. Repeated words keep one entry per position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet(Vec<Keyword>);

impl KeywordSet {
    #[must_use]
    pub const fn new(keywords: Vec<Keyword>) -> Self {
        Self(keywords)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyword> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn nouns(&self) -> impl Iterator<Item = &Keyword> {
        self.0.iter().filter(|k| k.is_noun())
    }

    #[must_use]
    pub fn has_nouns(&self) -> bool {
        self.nouns().next().is_some()
    }

    /// Noun lemmas with repeats removed, first occurrence kept.
    #[must_use]
    pub fn distinct_nouns(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for noun in self.nouns() {
            if !seen.contains(&noun.lemma.as_str()) {
                seen.push(noun.lemma.as_str());
            }
        }
        seen
    }

    /// Every lemma with repeats removed, first occurrence kept.
    #[must_use]
    pub fn distinct_lemmas(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for keyword in &self.0 {
            if !seen.contains(&keyword.lemma.as_str()) {
                seen.push(keyword.lemma.as_str());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Tokenize `text`, drop stopwords and punctuation, lemmatize what is left and
/// tag each lemma.
///
/// The stopword check runs on the surface form before lemmatization and is
/// case-sensitive, matching the analyzer's list exactly.
pub fn normalize<L: LexicalAnalyzer + ?Sized>(analyzer: &L, text: &str) -> KeywordSet {
    analyzer
        .tokenize(text)
        .into_iter()
        .filter(|word| has_word_character(word) && !analyzer.is_stopword(word))
        .map(|word| {
            let lemma = analyzer.lemmatize(&word);
            let tag = analyzer.pos_tag(&lemma);
            Keyword { lemma, tag }
        })
        .filter(|keyword| !analyzer.is_stopword(&keyword.lemma))
        .collect()
}

/// Tokenize and lemmatize every word of `text`, stopwords included.
pub fn lemmatized_tokens<L: LexicalAnalyzer + ?Sized>(analyzer: &L, text: &str) -> Vec<String> {
    analyzer
        .tokenize(text)
        .iter()
        .map(|word| analyzer.lemmatize(word))
        .collect()
}

fn has_word_character(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Whitespace tokenizer with a fixed tag table.
    struct TableAnalyzer;

    impl LexicalAnalyzer for TableAnalyzer {
        fn tokenize(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }

        fn lemmatize(&self, word: &str) -> String {
            if word == "plays" {
                "play".to_string()
            } else {
                word.to_string()
            }
        }

        fn pos_tag(&self, word: &str) -> Option<PosTag> {
            let tag = match word {
                "Hamlet" | "Shakespeare" => "NNP",
                "play" => "NN",
                "wrote" => "VBD",
                "Who" => "WP",
                "zzz" => return None,
                _ => "NN",
            };
            Some(PosTag::new(tag))
        }

        fn is_stopword(&self, word: &str) -> bool {
            matches!(word, "who" | "the" | "a" | "is" | "play")
        }
    }

    #[test]
    fn drops_stopwords_and_punctuation() {
        let set = normalize(&TableAnalyzer, "who wrote the Hamlet ?");
        let lemmas: Vec<_> = set.iter().map(|k| k.lemma.as_str()).collect();
        assert_eq!(lemmas, ["wrote", "Hamlet"]);
    }

    #[test]
    fn stopword_match_is_case_sensitive() {
        let set = normalize(&TableAnalyzer, "Who wrote Hamlet");
        let lemmas: Vec<_> = set.iter().map(|k| k.lemma.as_str()).collect();
        assert_eq!(lemmas, ["Who", "wrote", "Hamlet"]);
        assert!(!set.iter().any(|k| k.lemma == "who"));
    }

    #[test]
    fn lemma_that_becomes_a_stopword_is_dropped() {
        let set = normalize(&TableAnalyzer, "plays Hamlet");
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().map(|k| k.lemma.as_str()), Some("Hamlet"));
    }

    #[test]
    fn keeps_repeats_in_order() {
        let set = normalize(&TableAnalyzer, "Hamlet Shakespeare Hamlet");
        let lemmas: Vec<_> = set.iter().map(|k| k.lemma.as_str()).collect();
        assert_eq!(lemmas, ["Hamlet", "Shakespeare", "Hamlet"]);
        assert_eq!(set.distinct_nouns(), ["Hamlet", "Shakespeare"]);
    }

    #[test]
    fn unclassifiable_token_is_not_a_noun() {
        let set = normalize(&TableAnalyzer, "zzz");
        assert_eq!(set.len(), 1);
        assert!(!set.has_nouns());
    }

    #[test]
    fn noun_classification() {
        let set = normalize(&TableAnalyzer, "Who wrote Hamlet");
        let nouns: Vec<_> = set.nouns().map(|k| k.lemma.as_str()).collect();
        assert_eq!(nouns, ["Hamlet"]);
        assert!(set.nouns().all(Keyword::is_proper_noun));
    }
}
