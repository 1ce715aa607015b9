//! # WordNet Database
//!
//! A reader over the WordNet 3.0 database files:
//!
//! * `index.{noun,verb,adj,adv}` - lemma to synset offsets.
//! * `data.{noun,verb,adj,adv}` - synsets, addressed by byte offset.
//! * `{noun,verb,adj,adv}.exc` - irregular inflections.
//!
//! Index and exception files are loaded on [`WordNet::open`]; synsets are
//! read from the data files on demand.

pub mod morphy;

#[cfg(feature = "download")]
pub mod fetch;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::{
    collections::HashMap,
    env,
    fs::{self, File},
    io::{BufRead, BufReader, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use strum::IntoEnumIterator;

use crate::{PrecisError, PrecisResult};

/// Environment variable key for the WordNet database directory.
pub const PRECIS_WORDNET_DIR: &str = "PRECIS_WORDNET_DIR";

/// WordNet parts of speech, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Pos {
    /// Nouns; `n`.
    #[strum(serialize = "n")]
    Noun,

    /// Verbs; `v`.
    #[strum(serialize = "v")]
    Verb,

    /// Adjectives; `a`, with satellites `s`.
    #[strum(serialize = "a")]
    Adj,

    /// Adverbs; `r`.
    #[strum(serialize = "r")]
    Adv,
}

impl Pos {
    /// The database file suffix; `index.{suffix}`, `data.{suffix}`, `{suffix}.exc`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        }
    }
}

/// Every database file name, for each part of speech.
pub fn database_files() -> Vec<String> {
    Pos::iter()
        .flat_map(|pos| {
            let suffix = pos.file_suffix();
            [
                format!("index.{suffix}"),
                format!("data.{suffix}"),
                format!("{suffix}.exc"),
            ]
        })
        .collect()
}

/// Does `dir` hold a complete database?
pub fn is_database_dir(dir: &Path) -> bool {
    database_files().iter().all(|f| dir.join(f).is_file())
}

/// The WordNet directory from an explicit path, or [`PRECIS_WORDNET_DIR`].
pub fn resolve_wordnet_dir(path: Option<&Path>) -> Option<PathBuf> {
    path.map(Path::to_path_buf).or_else(|| {
        env::var_os(PRECIS_WORDNET_DIR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Strip an adjective position marker; `galore(ip)` -> `galore`.
pub fn strip_lemma_marker(lemma: &str) -> &str {
    match lemma.find('(') {
        Some(idx) if lemma.ends_with(')') => &lemma[..idx],
        _ => lemma,
    }
}

/// One sense: a set of synonymous lemmas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synset {
    /// The part of speech of the file this synset was read from.
    pub pos: Pos,

    /// The byte offset of this synset in its data file.
    pub offset: u64,

    /// The synset type; `n`, `v`, `a`, `s` or `r`.
    pub ss_type: char,

    /// The lemma names, in database order, markers stripped.
    pub lemmas: Vec<String>,
}

impl Synset {
    /// The `{offset:08}-{ss_type}` identifier.
    pub fn id(&self) -> String {
        format!("{:08}-{}", self.offset, self.ss_type)
    }
}

/// Parse one `data.*` line.
fn parse_data_line(
    pos: Pos,
    line: &str,
) -> PrecisResult<Synset> {
    let bad = || PrecisError::Parse(format!("malformed data.{} line: {line:?}", pos.file_suffix()));

    let mut fields = line.split_ascii_whitespace();
    let offset = fields
        .next()
        .and_then(|f| f.parse::<u64>().ok())
        .ok_or_else(bad)?;
    let _lex_filenum = fields.next().ok_or_else(bad)?;
    let ss_type = fields
        .next()
        .and_then(|f| f.chars().next())
        .ok_or_else(bad)?;
    let w_cnt = fields
        .next()
        .and_then(|f| usize::from_str_radix(f, 16).ok())
        .ok_or_else(bad)?;

    let mut lemmas = Vec::with_capacity(w_cnt);
    for _ in 0..w_cnt {
        let word = fields.next().ok_or_else(bad)?;
        let _lex_id = fields.next().ok_or_else(bad)?;
        lemmas.push(strip_lemma_marker(word).to_string());
    }

    Ok(Synset {
        pos,
        offset,
        ss_type,
        lemmas,
    })
}

/// Parse one `index.*` line into the lemma and its synset offsets.
fn parse_index_line(line: &str) -> Option<(String, Vec<u64>)> {
    let mut fields = line.split_ascii_whitespace();
    let lemma = fields.next()?;
    let _pos = fields.next()?;
    let synset_cnt: usize = fields.next()?.parse().ok()?;
    let p_cnt: usize = fields.next()?.parse().ok()?;
    let mut fields = fields.skip(p_cnt);
    let _sense_cnt = fields.next()?;
    let _tagsense_cnt = fields.next()?;
    let offsets = fields
        .take(synset_cnt)
        .map(|f| f.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    if offsets.len() != synset_cnt {
        return None;
    }
    Some((lemma.to_string(), offsets))
}

/// Database lines; the license header lines start with a space.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|l| !l.is_empty() && !l.starts_with(' '))
}

/// The lookup tables of one part of speech.
#[derive(Debug, Default)]
struct PosTables {
    lemmas: HashMap<String, Vec<u64>>,
    exceptions: HashMap<String, Vec<String>>,
}

/// A WordNet database on disk.
#[derive(Debug)]
pub struct WordNet {
    dir: PathBuf,
    tables: Vec<PosTables>,
}

impl WordNet {
    /// Load the index and exception files under `dir`.
    ///
    /// ## Errors
    /// * `PrecisError::ResourceNotFound` - a database file is missing.
    /// * `PrecisError::Parse` - an index line is malformed.
    pub fn open<P: AsRef<Path>>(dir: P) -> PrecisResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        if let Some(missing) = database_files().iter().find(|f| !dir.join(f).is_file()) {
            return Err(PrecisError::ResourceNotFound(
                dir.join(missing).display().to_string(),
            ));
        }

        let mut tables = Vec::new();
        for pos in Pos::iter() {
            let suffix = pos.file_suffix();
            let mut table = PosTables::default();

            let index = fs::read_to_string(dir.join(format!("index.{suffix}")))?;
            for line in content_lines(&index) {
                let (lemma, offsets) = parse_index_line(line).ok_or_else(|| {
                    PrecisError::Parse(format!("malformed index.{suffix} line: {line:?}"))
                })?;
                table.lemmas.insert(lemma, offsets);
            }

            let exc = fs::read_to_string(dir.join(format!("{suffix}.exc")))?;
            for line in content_lines(&exc) {
                let mut words = line.split_ascii_whitespace();
                if let Some(inflected) = words.next() {
                    table
                        .exceptions
                        .insert(inflected.to_string(), words.map(str::to_string).collect());
                }
            }

            log::debug!(
                "wordnet {suffix}: {} lemmas, {} exceptions",
                table.lemmas.len(),
                table.exceptions.len()
            );
            tables.push(table);
        }

        log::info!("opened wordnet database at {}", dir.display());
        Ok(Self { dir, tables })
    }

    /// The database directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn table(
        &self,
        pos: Pos,
    ) -> &PosTables {
        &self.tables[pos as usize]
    }

    /// Base forms of `form` present in the database for `pos`.
    pub fn morphy(
        &self,
        form: &str,
        pos: Pos,
    ) -> Vec<String> {
        let table = self.table(pos);
        morphy::morphy(form, pos, &table.exceptions, |f| {
            table.lemmas.contains_key(f)
        })
    }

    /// Read the synset at `offset` of `pos`'s data file.
    pub fn synset_at(
        &self,
        pos: Pos,
        offset: u64,
    ) -> PrecisResult<Synset> {
        let path = self.dir.join(format!("data.{}", pos.file_suffix()));
        let mut reader = BufReader::new(File::open(&path)?);
        reader.seek(SeekFrom::Start(offset))?;

        let mut line = String::new();
        reader.read_line(&mut line)?;

        let synset = parse_data_line(pos, &line)?;
        if synset.offset != offset {
            return Err(PrecisError::Parse(format!(
                "{}: expected synset at {offset}, found {}",
                path.display(),
                synset.offset
            )));
        }
        Ok(synset)
    }

    /// Every synset of `word`: nouns, verbs, adjectives, then adverbs; each in index order.
    ///
    /// The word is lower-cased, spaces become `_`, and inflections are
    /// normalized with [`WordNet::morphy`].
    pub fn synsets(
        &self,
        word: &str,
    ) -> PrecisResult<Vec<Synset>> {
        let word = word.to_lowercase().replace(' ', "_");
        let mut synsets = Vec::new();
        for pos in Pos::iter() {
            for form in self.morphy(&word, pos) {
                if let Some(offsets) = self.table(pos).lemmas.get(&form) {
                    for &offset in offsets {
                        synsets.push(self.synset_at(pos, offset)?);
                    }
                }
            }
        }
        Ok(synsets)
    }
}
