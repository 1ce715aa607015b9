//! # WordNet Test Fixture
//!
//! Writes a miniature database in the WordNet 3.0 file layout. Index files
//! and data file byte offsets are derived from [`FIXTURE_SYNSETS`].

use std::{collections::BTreeMap, fmt::Write as _, fs, path::Path};

use strum::IntoEnumIterator;

use crate::{
    PrecisError,
    PrecisResult,
    synonyms::wordnet::{Pos, strip_lemma_marker},
};

/// The fixture synsets: part of speech, synset type, lemmas.
pub const FIXTURE_SYNSETS: &[(Pos, char, &[&str])] = &[
    (Pos::Noun, 'n', &["dog", "domestic_dog", "Canis_familiaris"]),
    (Pos::Noun, 'n', &["frump", "dog"]),
    (Pos::Noun, 'n', &["cad", "bounder", "blackguard", "dog", "hound", "heel"]),
    (Pos::Noun, 'n', &["car", "auto", "automobile", "machine", "motorcar"]),
    (Pos::Noun, 'n', &["mouse"]),
    (Pos::Noun, 'n', &["ice_cream", "icecream"]),
    (Pos::Noun, 'n', &["model", "theoretical_account", "framework"]),
    (
        Pos::Verb,
        'v',
        &["chase", "chase_after", "trail", "tail", "tag", "give_chase", "dog", "go_after", "track"],
    ),
    (Pos::Verb, 'v', &["run"]),
    (
        Pos::Verb,
        'v',
        &["scat", "run", "scarper", "turn_tail", "lam", "run_away", "hightail_it"],
    ),
    (Pos::Verb, 'v', &["summarize", "summarise", "sum_up", "resume"]),
    (Pos::Adj, 'a', &["good"]),
    (Pos::Adj, 's', &["full", "good"]),
    (Pos::Adj, 'a', &["abundant"]),
    (Pos::Adj, 's', &["galore(ip)", "abundant"]),
    (Pos::Adv, 'r', &["well", "good"]),
    (Pos::Adv, 'r', &["well"]),
];

/// The fixture exception lists: part of speech, inflected form, base forms.
pub const FIXTURE_EXCEPTIONS: &[(Pos, &str, &[&str])] = &[
    (Pos::Noun, "mice", &["mouse"]),
    (Pos::Verb, "ran", &["run"]),
    (Pos::Adj, "better", &["good", "well"]),
];

const HEADER: &str = "  1 Miniature WordNet database for tests.\n";

/// Write the fixture database into `dir`.
pub fn write_fixture(dir: &Path) -> PrecisResult<()> {
    fs::create_dir_all(dir)?;

    for pos in Pos::iter() {
        let suffix = pos.file_suffix();
        let mut data = String::from(HEADER);
        let mut index: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (_, ss_type, lemmas) in FIXTURE_SYNSETS.iter().filter(|(p, _, _)| *p == pos) {
            let offset = data.len();
            write!(data, "{offset:08} 00 {ss_type} {:02x}", lemmas.len())
                .map_err(PrecisError::external)?;
            for lemma in lemmas.iter() {
                write!(data, " {lemma} 0").map_err(PrecisError::external)?;
                index
                    .entry(strip_lemma_marker(lemma).to_lowercase())
                    .or_default()
                    .push(offset);
            }
            data.push_str(" 000 | fixture\n");
        }

        let mut index_text = String::from(HEADER);
        for (lemma, offsets) in &index {
            write!(
                index_text,
                "{lemma} {pos} {n} 1 @ {n} 0",
                n = offsets.len()
            )
            .map_err(PrecisError::external)?;
            for offset in offsets {
                write!(index_text, " {offset:08}").map_err(PrecisError::external)?;
            }
            index_text.push_str(" \n");
        }

        let mut exc = String::new();
        for (_, inflected, bases) in FIXTURE_EXCEPTIONS.iter().filter(|(p, _, _)| *p == pos) {
            writeln!(exc, "{inflected} {}", bases.join(" ")).map_err(PrecisError::external)?;
        }

        fs::write(dir.join(format!("data.{suffix}")), data)?;
        fs::write(dir.join(format!("index.{suffix}")), index_text)?;
        fs::write(dir.join(format!("{suffix}.exc")), exc)?;
    }
    Ok(())
}
