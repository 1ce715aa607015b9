//! # Synonym Lookup
//!
//! Synonyms are the lemma names of every WordNet sense of a word. A passage
//! is first reduced to candidate words; reference markers like `[1]` and
//! numeric tokens are skipped.

pub mod wordnet;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{PrecisResult, synonyms::wordnet::WordNet, text::dedup_ordered};

/// Synonyms kept per candidate word in passage mode.
pub const PASSAGE_SYNONYM_LIMIT: usize = 3;

/// An insertion-ordered map of word to synonyms.
///
/// Re-inserting a word replaces its synonyms and keeps its position.
/// Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymMap {
    entries: Vec<(String, Vec<String>)>,
}

impl SynonymMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the synonyms of `word`.
    pub fn insert(
        &mut self,
        word: String,
        synonyms: Vec<String>,
    ) {
        match self.entries.iter_mut().find(|(w, _)| *w == word) {
            Some((_, existing)) => *existing = synonyms,
            None => self.entries.push((word, synonyms)),
        }
    }

    /// The synonyms of `word`.
    pub fn get(
        &self,
        word: &str,
    ) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, s)| s.as_slice())
    }

    /// The number of words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the map empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The words, in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    /// The entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(w, s)| (w.as_str(), s.as_slice()))
    }
}

impl Serialize for SynonymMap {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, synonyms) in &self.entries {
            map.serialize_entry(word, synonyms)?;
        }
        map.end()
    }
}

/// Candidate words of a passage.
///
/// Splits on single spaces and de-duplicates (first occurrence wins), then
/// deletes `.` from each token. Tokens with `[`, `]` or a digit, the bare
/// newline token, and empty tokens are dropped.
pub fn candidates(body: &str) -> Vec<String> {
    dedup_ordered(body.split(' '))
        .into_iter()
        .map(|tkn| tkn.replace('.', ""))
        .filter(|tkn| {
            !tkn.is_empty()
                && tkn != "\n"
                && !tkn.contains(['[', ']'])
                && !tkn.chars().any(char::is_numeric)
        })
        .collect()
}

/// Synonyms of `target`: every lemma name of every sense, de-duplicated
/// in order, without `target` itself, and at most `limit` of them.
pub fn synonyms(
    wordnet: &WordNet,
    target: &str,
    limit: Option<usize>,
) -> PrecisResult<Vec<String>> {
    let lemmas = wordnet
        .synsets(target)?
        .into_iter()
        .flat_map(|synset| synset.lemmas);

    let mut synonyms: Vec<String> = dedup_ordered(lemmas)
        .into_iter()
        .filter(|lemma| lemma != target)
        .collect();
    if let Some(limit) = limit {
        synonyms.truncate(limit);
    }
    Ok(synonyms)
}

/// A one-entry map: `word` to its synonyms, as stored in the database.
pub fn synonym_map_for_word(
    wordnet: &WordNet,
    word: &str,
    limit: Option<usize>,
) -> PrecisResult<SynonymMap> {
    let mut map = SynonymMap::new();
    map.insert(word.to_string(), synonyms(wordnet, word, limit)?);
    Ok(map)
}

/// Synonyms for each [`candidates`] word of `body`, at most
/// [`PASSAGE_SYNONYM_LIMIT`] each, with `_` written as a space.
pub fn synonym_map_for_passage(
    wordnet: &WordNet,
    body: &str,
) -> PrecisResult<SynonymMap> {
    let mut map = SynonymMap::new();
    for word in candidates(body) {
        let found = synonyms(wordnet, &word, Some(PASSAGE_SYNONYM_LIMIT))?
            .into_iter()
            .map(|s| s.replace('_', " "))
            .collect();
        map.insert(word, found);
    }
    log::debug!("synonyms for {} candidate words", map.len());
    Ok(map)
}
