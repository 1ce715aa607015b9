//! # BERT Sentence Embedder
//!
//! A `candle` BERT encoder over hub files (`config.json`, `vocab.txt`,
//! `pytorch_model.bin`). Sentences are embedded as the mean of the second
//! to last layer's hidden states; the encoder is built one layer short so
//! its final output is that layer.
//!
//! ## Weights
//!
//! The checkpoint format is detected from the file's leading bytes:
//! `torch.save` zip archives and safetensors files load directly. Legacy
//! (pre-zip) pickle checkpoints are rejected with
//! [`PrecisError::UnsupportedCheckpoint`]; a converted
//! [`CONVERTED_WEIGHTS_FILE`] placed beside the checkpoint is used instead.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::{
    Tokenizer,
    models::wordpiece::WordPiece,
    normalizers::bert::BertNormalizer,
    pre_tokenizers::bert::BertPreTokenizer,
};

use crate::{
    PrecisError,
    PrecisResult,
    extractive::SentenceEmbedder,
    pretrained::{ModelFiles, ModelTask},
};

/// Position limit when the config does not name one.
const DEFAULT_MAX_POSITIONS: usize = 512;

/// A converted weights file, looked up beside `pytorch_model.bin`.
pub const CONVERTED_WEIGHTS_FILE: &str = "model.safetensors";

/// On-disk layouts of a weights file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointFormat {
    /// A `torch.save` zip archive.
    TorchZip,

    /// A safetensors file.
    Safetensors,

    /// A pre-zip `torch.save` pickle stream.
    TorchLegacy,
}

impl CheckpointFormat {
    /// Detect the format of the weights file at `path`.
    pub fn detect(path: &Path) -> PrecisResult<Self> {
        let mut head = Vec::with_capacity(9);
        File::open(path)?.take(9).read_to_end(&mut head)?;

        if head.starts_with(b"PK\x03\x04") {
            Ok(CheckpointFormat::TorchZip)
        } else if head.len() == 9 && head[8] == b'{' {
            // u64 header length, then the JSON header.
            Ok(CheckpointFormat::Safetensors)
        } else if head.first() == Some(&0x80) {
            // Pickle protocol opcode.
            Ok(CheckpointFormat::TorchLegacy)
        } else {
            Err(PrecisError::UnsupportedCheckpoint(format!(
                "{}: unrecognized weights format",
                path.display()
            )))
        }
    }
}

/// The weights file to load for `checkpoint`; a converted file beside it wins.
fn weights_path(checkpoint: &Path) -> PathBuf {
    let converted = checkpoint.with_file_name(CONVERTED_WEIGHTS_FILE);
    if converted.is_file() {
        converted
    } else {
        checkpoint.to_path_buf()
    }
}

/// Read every tensor of the weights file at `path`, under normalized names.
fn load_weights(
    path: &Path,
    device: &Device,
) -> PrecisResult<HashMap<String, Tensor>> {
    let tensors: Vec<(String, Tensor)> = match CheckpointFormat::detect(path)? {
        CheckpointFormat::TorchZip => {
            candle_core::pickle::read_all(path).map_err(PrecisError::external)?
        }
        CheckpointFormat::Safetensors => candle_core::safetensors::load(path, device)
            .map_err(PrecisError::external)?
            .into_iter()
            .collect(),
        CheckpointFormat::TorchLegacy => {
            return Err(PrecisError::UnsupportedCheckpoint(format!(
                "{} is a legacy torch checkpoint; convert it to safetensors at {}",
                path.display(),
                path.with_file_name(CONVERTED_WEIGHTS_FILE).display()
            )));
        }
    };

    Ok(tensors
        .into_iter()
        .map(|(name, tensor)| (normalize_weight_name(&name), tensor))
        .collect())
}

/// Rewrite legacy checkpoint names to the layout `candle` loads.
///
/// * drops a leading `bert.` model prefix.
/// * `LayerNorm.gamma` / `LayerNorm.beta` -> `LayerNorm.weight` / `LayerNorm.bias`.
fn normalize_weight_name(name: &str) -> String {
    let name = name.strip_prefix("bert.").unwrap_or(name);
    if let Some(base) = name.strip_suffix(".gamma") {
        format!("{base}.weight")
    } else if let Some(base) = name.strip_suffix(".beta") {
        format!("{base}.bias")
    } else {
        name.to_string()
    }
}

/// Read `config.json`, dropping the last hidden layer.
fn load_config(path: &Path) -> PrecisResult<(Config, usize)> {
    let mut value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)
        .map_err(|e| PrecisError::Parse(format!("{}: {e}", path.display())))?;

    let layers = value
        .get("num_hidden_layers")
        .and_then(serde_json::Value::as_u64)
        .filter(|&n| n >= 2)
        .ok_or_else(|| {
            PrecisError::Parse(format!(
                "{}: num_hidden_layers must be at least 2",
                path.display()
            ))
        })?;
    if let Some(fields) = value.as_object_mut() {
        fields.insert("num_hidden_layers".to_string(), (layers - 1).into());
        // Older checkpoints predate these fields.
        fields
            .entry("layer_norm_eps")
            .or_insert_with(|| 1e-12.into());
        fields.entry("pad_token_id").or_insert_with(|| 0.into());
    }

    let max_positions = value
        .get("max_position_embeddings")
        .and_then(serde_json::Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_MAX_POSITIONS);

    let config: Config = serde_json::from_value(value)
        .map_err(|e| PrecisError::Parse(format!("{}: {e}", path.display())))?;
    Ok((config, max_positions))
}

/// Uncased WordPiece tokenizer over `vocab.txt`.
fn load_tokenizer(vocab: &Path) -> PrecisResult<Tokenizer> {
    let vocab = vocab
        .to_str()
        .ok_or_else(|| PrecisError::ResourceNotFound(vocab.display().to_string()))?;
    let wordpiece = WordPiece::from_file(vocab)
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(PrecisError::external)?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer
        .with_normalizer(Some(BertNormalizer::new(true, true, None, true)))
        .with_pre_tokenizer(Some(BertPreTokenizer));
    Ok(tokenizer)
}

/// Sentence embeddings from a BERT encoder.
pub struct BertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    max_positions: usize,
    device: Device,
}

impl BertEmbedder {
    /// Load the encoder and tokenizer from fetched model files.
    pub fn new(files: &ModelFiles) -> PrecisResult<Self> {
        let model_info = files.model();
        if model_info.task != ModelTask::Extractive {
            return Err(PrecisError::UnsupportedModel {
                name: model_info.name.to_string(),
                available: crate::pretrained::model_names(crate::pretrained::EXTRACTIVE_MODELS),
            });
        }

        let device = Device::Cpu;
        let (config, max_positions) = load_config(files.get("config.json")?)?;
        let tokenizer = load_tokenizer(files.get("vocab.txt")?)?;

        let weights_file = weights_path(files.get("pytorch_model.bin")?);
        let weights = load_weights(&weights_file, &device)?;
        log::debug!(
            "{}: {} weight tensors from {}",
            model_info.repo,
            weights.len(),
            weights_file.display()
        );

        let vb = VarBuilder::from_tensors(weights, DType::F32, &device);
        let model = BertModel::load(vb, &config).map_err(PrecisError::external)?;
        log::info!("loaded encoder {}", model_info.repo);

        Ok(Self {
            model,
            tokenizer,
            max_positions,
            device,
        })
    }

    /// Token ids for `sentence`; no special tokens, truncated to the position limit.
    pub fn token_ids(
        &self,
        sentence: &str,
    ) -> PrecisResult<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(sentence, false)
            .map_err(PrecisError::external)?;
        let mut ids = encoding.get_ids().to_vec();
        ids.truncate(self.max_positions);
        Ok(ids)
    }
}

impl SentenceEmbedder for BertEmbedder {
    fn embed(
        &self,
        sentence: &str,
    ) -> PrecisResult<Vec<f32>> {
        let ids = self.token_ids(sentence)?;
        if ids.is_empty() {
            return Err(PrecisError::InvalidInput(format!(
                "sentence has no tokens: {sentence:?}"
            )));
        }

        let embed = || -> candle_core::Result<Vec<f32>> {
            let input_ids = Tensor::new(ids.as_slice(), &self.device)?.unsqueeze(0)?;
            let token_type_ids = input_ids.zeros_like()?;
            let attention_mask = input_ids.ones_like()?;
            let hidden = self
                .model
                .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
            hidden.mean(1)?.squeeze(0)?.to_vec1::<f32>()
        };
        embed().map_err(PrecisError::external)
    }
}
