//! Noun lemmatization by irregular-form lookup and plural suffix rules.

use crate::tagger::tag_word;

/// Plurals that suffix rules get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lice", "louse"),
    ("dice", "die"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
    ("thieves", "thief"),
    ("loaves", "loaf"),
    ("shelves", "shelf"),
    ("calves", "calf"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("radii", "radius"),
    ("alumni", "alumnus"),
];

/// Words ending in `s` that are already singular.
const INVARIANT: &[&str] = &[
    "series", "species", "news", "means", "physics", "mathematics", "politics", "economics",
    "ethics", "athletics", "chess", "measles", "headquarters",
];

/// Suffix rewrites tried in order; the first that applies wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("s", ""),
];

/// Singular form of a lowercase noun. Apart from irregular plurals, words
/// with any uppercase letter, words of three letters or fewer and words that
/// do not look plural are returned as given.
#[must_use]
pub fn lemmatize(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*lemma).to_string();
    }
    if word.chars().any(char::is_uppercase) || word.chars().count() <= 3 {
        return word.to_string();
    }
    if INVARIANT.contains(&word) || !looks_plural(word) {
        return word.to_string();
    }

    SUFFIX_RULES
        .iter()
        .find_map(|(suffix, replacement)| {
            word.strip_suffix(suffix)
                .filter(|stem| stem.chars().count() >= 2)
                .map(|stem| format!("{stem}{replacement}"))
        })
        .unwrap_or_else(|| word.to_string())
}

/// Ends like a plural and is tagged as one; "always" and "does" are not.
fn looks_plural(word: &str) -> bool {
    word.ends_with('s')
        && !["ss", "us", "is"].iter().any(|ending| word.ends_with(ending))
        && tag_word(word) == Some("NNS")
}
