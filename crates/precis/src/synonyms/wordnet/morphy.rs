//! # Morphological Normalization
//!
//! WordNet's `morphy`: map an inflected form to the base forms present in
//! the database. Exception lists are consulted first; otherwise suffix
//! detachment rules are applied, repeatedly, until some form is found.

use std::collections::HashMap;

use crate::synonyms::wordnet::Pos;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

/// The suffix detachment rules for `pos`, in application order.
pub fn detachment_rules(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => NOUN_RULES,
        Pos::Verb => VERB_RULES,
        Pos::Adj => ADJ_RULES,
        Pos::Adv => &[],
    }
}

fn apply_rules(
    forms: &[String],
    rules: &[(&str, &str)],
) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            rules.iter().filter_map(move |(old, new)| {
                form.strip_suffix(old).map(|base| format!("{base}{new}"))
            })
        })
        .collect()
}

fn filter_forms<F: Fn(&str) -> bool>(
    forms: Vec<String>,
    is_lemma: &F,
) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for form in forms {
        if is_lemma(&form) && !result.contains(&form) {
            result.push(form);
        }
    }
    result
}

/// Base forms of `form` for `pos`, as judged by `is_lemma`.
///
/// ## Arguments
/// * `form` - a lower-cased word.
/// * `exceptions` - the part of speech's exception list.
/// * `is_lemma` - does the database hold this form for `pos`?
pub fn morphy<F: Fn(&str) -> bool>(
    form: &str,
    pos: Pos,
    exceptions: &HashMap<String, Vec<String>>,
    is_lemma: F,
) -> Vec<String> {
    if let Some(bases) = exceptions.get(form) {
        let forms = std::iter::once(form.to_string())
            .chain(bases.iter().cloned())
            .collect();
        return filter_forms(forms, &is_lemma);
    }

    let rules = detachment_rules(pos);
    let mut forms = apply_rules(&[form.to_string()], rules);

    let mut first = vec![form.to_string()];
    first.extend(forms.iter().cloned());
    let results = filter_forms(first, &is_lemma);
    if !results.is_empty() {
        return results;
    }

    while !forms.is_empty() {
        forms = apply_rules(&forms, rules);
        let results = filter_forms(forms.clone(), &is_lemma);
        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(words: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |w| words.iter().any(|x| *x == w)
    }

    #[test]
    fn test_identity() {
        let exc = HashMap::new();
        assert_eq!(morphy("dog", Pos::Noun, &exc, lemmas(&["dog"])), vec!["dog"]);
        assert!(morphy("zzz", Pos::Noun, &exc, lemmas(&["dog"])).is_empty());
    }

    #[test]
    fn test_detachment() {
        let exc = HashMap::new();
        assert_eq!(morphy("boxes", Pos::Noun, &exc, lemmas(&["box"])), vec!["box"]);
        assert_eq!(morphy("churches", Pos::Noun, &exc, lemmas(&["church"])), vec!["church"]);
        assert_eq!(morphy("running", Pos::Verb, &exc, lemmas(&["run", "runn"])), vec!["runn"]);
        assert_eq!(morphy("loved", Pos::Verb, &exc, lemmas(&["love"])), vec!["love"]);
        assert_eq!(morphy("bigger", Pos::Adj, &exc, lemmas(&["big", "bigg"])), vec!["bigg"]);
        assert!(morphy("quickly", Pos::Adv, &exc, lemmas(&["quick"])).is_empty());
    }

    #[test]
    fn test_original_form_first() {
        let exc = HashMap::new();
        assert_eq!(
            morphy("glasses", Pos::Noun, &exc, lemmas(&["glass", "glasses"])),
            vec!["glasses", "glass"]
        );
    }

    #[test]
    fn test_repeated_detachment() {
        let exc = HashMap::new();
        // asses -> ass -> as -> a
        assert_eq!(morphy("asses", Pos::Noun, &exc, lemmas(&["a"])), vec!["a"]);
    }

    #[test]
    fn test_exceptions() {
        let exc = HashMap::from([("mice".to_string(), vec!["mouse".to_string()])]);
        assert_eq!(morphy("mice", Pos::Noun, &exc, lemmas(&["mouse"])), vec!["mouse"]);
        // Exceptions short-circuit the rules.
        assert!(morphy("mice", Pos::Noun, &exc, lemmas(&["mic"])).is_empty());
    }
}
