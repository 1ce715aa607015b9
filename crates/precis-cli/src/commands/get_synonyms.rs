use std::path::PathBuf;

use precis::synonyms::{
    SynonymMap,
    synonym_map_for_passage,
    synonym_map_for_word,
    wordnet::{WordNet, fetch::ensure_wordnet, resolve_wordnet_dir},
};

use crate::{
    commands::DEFAULT_LOG_LEVEL,
    disk_cache::DiskCacheArgs,
    input_output::OutputArgs,
    logging::LogArgs,
};

/// Look up WordNet synonyms of a word, or of every word of a passage.
#[derive(clap::Parser, Debug)]
#[command(name = "get-synonyms", version)]
pub struct GetSynonymsArgs {
    /// Target word; with `-s`, a passage.
    target: String,

    /// The number of synonyms to get.
    #[arg(short, long)]
    number: Option<usize>,

    /// Treat the target as a passage; up to 3 synonyms for each word.
    #[arg(short, long)]
    string: bool,

    /// WordNet database directory.
    #[arg(long, default_value = None)]
    wordnet_dir: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl GetSynonymsArgs {
    /// Open the database: `--wordnet-dir`, `$PRECIS_WORDNET_DIR`, or the data directory.
    pub fn open_wordnet(&self) -> Result<WordNet, Box<dyn std::error::Error>> {
        let dir = match resolve_wordnet_dir(self.wordnet_dir.as_deref()) {
            Some(dir) => dir,
            None => ensure_wordnet(&mut self.disk_cache.init_disk_cache()?)?,
        };
        Ok(WordNet::open(dir)?)
    }

    /// Look up the synonym map.
    pub fn lookup(
        &self,
        wordnet: &WordNet,
    ) -> Result<SynonymMap, Box<dyn std::error::Error>> {
        Ok(if self.string {
            synonym_map_for_passage(wordnet, &self.target)?
        } else {
            synonym_map_for_word(wordnet, &self.target, self.number)?
        })
    }

    /// Look up synonyms and write them as JSON.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(DEFAULT_LOG_LEVEL)?;

        let wordnet = self.open_wordnet()?;
        let map = self.lookup(&wordnet)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&map)?
        } else {
            serde_json::to_string(&map)?
        };
        self.output.write_line(&json)
    }
}
