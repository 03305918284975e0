//! # Masked-LM ranker
//!
//! Context-aware candidate ranking using a pre-trained BERT masked language
//! model. Uses candle for inference without external dependencies: the
//! encoder comes from candle-transformers and the prediction head
//! (transform dense, GELU, LayerNorm, vocab decoder) is assembled from the
//! same safetensors checkpoint.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{LayerNorm, Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;
use tokenizers::Tokenizer as HfTokenizer;

use crate::error::{CheckError, Result};
use crate::types::Candidate;

/// The mask placeholder understood by BERT-family tokenizers.
pub const MASK_TOKEN: &str = "[MASK]";

fn candle_err(e: candle_core::Error) -> CheckError {
    CheckError::InferenceError(e.to_string())
}

/// The two dimensions the prediction head needs from `config.json`.
/// Defaults match bert-base.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ModelDims {
    #[serde(default = "ModelDims::default_hidden")]
    hidden_size: usize,
    #[serde(default = "ModelDims::default_vocab")]
    vocab_size: usize,
}

impl ModelDims {
    fn default_hidden() -> usize {
        768
    }
    fn default_vocab() -> usize {
        30522
    }
}

/// BERT encoder plus masked-LM prediction head.
pub struct BertMaskedLm {
    bert: BertModel,
    dense: Linear,
    layer_norm: LayerNorm,
    decoder: Linear,
}

impl BertMaskedLm {
    /// Load the model from safetensors.
    fn load(vb: VarBuilder, config: &BertConfig, dims: ModelDims) -> candle_core::Result<Self> {
        let bert = BertModel::load(vb.pp("bert"), config)?;

        // Hugging Face checkpoint layout: cls.predictions.transform.{dense,
        // LayerNorm} followed by the vocab-sized decoder.
        let dense = candle_nn::linear(
            dims.hidden_size,
            dims.hidden_size,
            vb.pp("cls.predictions.transform.dense"),
        )?;
        let layer_norm = candle_nn::layer_norm(
            dims.hidden_size,
            1e-12,
            vb.pp("cls.predictions.transform.LayerNorm"),
        )?;
        let decoder = candle_nn::linear(
            dims.hidden_size,
            dims.vocab_size,
            vb.pp("cls.predictions.decoder"),
        )?;

        Ok(Self {
            bert,
            dense,
            layer_norm,
            decoder,
        })
    }

    /// Forward pass producing vocabulary logits.
    /// `input_ids`: [batch_size, seq_len]
    /// Returns [batch_size, seq_len, vocab_size].
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> candle_core::Result<Tensor> {
        let hidden = self.bert.forward(input_ids, token_type_ids, attention_mask)?;
        let x = self.dense.forward(&hidden)?.gelu()?;
        let x = self.layer_norm.forward(&x)?;
        self.decoder.forward(&x)
    }
}

/// Fill-mask ranker with lazy model initialization.
///
/// Construction never touches the filesystem; `init_model` loads the
/// tokenizer and weights and fails cleanly so the checker can fall back to
/// rules-only operation.
pub struct MaskedLmRanker {
    tokenizer: Option<HfTokenizer>,
    model: Option<BertMaskedLm>,
    mask_id: Option<u32>,
    device: Device,
}

impl MaskedLmRanker {
    /// Create a new ranker with no model loaded.
    pub fn new() -> Self {
        Self {
            tokenizer: None,
            model: None,
            mask_id: None,
            device: Device::Cpu,
        }
    }

    /// Load `tokenizer.json`, `config.json` and `model.safetensors` from a
    /// model directory.
    pub fn init_model(&mut self, dir: &Path) -> Result<()> {
        let tokenizer_path = dir.join("tokenizer.json");
        let config_path = dir.join("config.json");
        let weights_path = dir.join("model.safetensors");

        if !tokenizer_path.exists() {
            return Err(CheckError::ModelLoadError(format!(
                "tokenizer not found at {}",
                tokenizer_path.display()
            )));
        }
        if !weights_path.exists() {
            return Err(CheckError::ModelLoadError(format!(
                "weights not found at {}",
                weights_path.display()
            )));
        }

        let tokenizer = HfTokenizer::from_file(&tokenizer_path)
            .map_err(|e| CheckError::ModelLoadError(e.to_string()))?;
        let mask_id = tokenizer.token_to_id(MASK_TOKEN).ok_or_else(|| {
            CheckError::ModelLoadError(format!("tokenizer has no {MASK_TOKEN} token"))
        })?;

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CheckError::ModelLoadError(format!("failed to read config: {e}")))?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| CheckError::ModelLoadError(format!("failed to parse config: {e}")))?;
        let dims: ModelDims = serde_json::from_str(&config_str)
            .map_err(|e| CheckError::ModelLoadError(format!("failed to parse config: {e}")))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &self.device)
                .map_err(|e| CheckError::ModelLoadError(e.to_string()))?
        };
        let model = BertMaskedLm::load(vb, &config, dims)
            .map_err(|e| CheckError::ModelLoadError(e.to_string()))?;

        self.tokenizer = Some(tokenizer);
        self.model = Some(model);
        self.mask_id = Some(mask_id);
        Ok(())
    }

    /// Returns `true` once a model has been loaded.
    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Predict the top-k fill-ins for the single `[MASK]` in `masked_text`.
    ///
    /// Subword pieces and non-word tokens are skipped; probabilities come
    /// from a softmax over the full vocabulary at the mask position.
    pub fn predict_masked(&self, masked_text: &str, top_k: usize) -> Result<Vec<Candidate>> {
        let tokenizer = self.require_tokenizer()?;
        let probabilities = self.mask_probabilities(masked_text)?;

        let mut order: Vec<usize> = (0..probabilities.len()).collect();
        order.sort_by(|&a, &b| {
            probabilities[b]
                .partial_cmp(&probabilities[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut candidates = Vec::with_capacity(top_k);
        for idx in order {
            if candidates.len() >= top_k {
                break;
            }
            let Some(token) = tokenizer.id_to_token(idx as u32) else {
                continue;
            };
            if !is_word_token(&token) {
                continue;
            }
            candidates.push(Candidate::new(token, probabilities[idx], 0, 0));
        }
        Ok(candidates)
    }

    /// Rank replacements for the byte span `start..end` of `text`,
    /// excluding the original word itself.
    pub fn rank_replacements(
        &self,
        text: &str,
        start: usize,
        end: usize,
        original: &str,
        top_k: usize,
    ) -> Result<Vec<Candidate>> {
        let masked = mask_span(text, start, end);
        // Fetch a few extra so filtering the original still fills top_k.
        let mut candidates = self.predict_masked(&masked, top_k + 3)?;
        let original_lower = original.to_lowercase();
        candidates.retain(|c| c.word.to_lowercase() != original_lower);
        candidates.truncate(top_k);
        Ok(candidates)
    }

    /// Probability of each homophone-group member in the masked slot.
    ///
    /// Members that are not single vocabulary tokens are skipped. Results
    /// are sorted by descending probability.
    pub fn score_members(
        &self,
        text: &str,
        start: usize,
        end: usize,
        members: &[String],
    ) -> Result<Vec<(String, f32)>> {
        let tokenizer = self.require_tokenizer()?;
        let masked = mask_span(text, start, end);
        let probabilities = self.mask_probabilities(&masked)?;

        let mut scored: Vec<(String, f32)> = members
            .iter()
            .filter_map(|member| {
                let id = tokenizer.token_to_id(&member.to_lowercase())?;
                let p = probabilities.get(id as usize).copied()?;
                Some((member.clone(), p))
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored)
    }

    fn require_tokenizer(&self) -> Result<&HfTokenizer> {
        self.tokenizer
            .as_ref()
            .ok_or_else(|| CheckError::ModelLoadError("tokenizer is not initialized".into()))
    }

    /// Softmaxed vocabulary distribution at the mask position.
    fn mask_probabilities(&self, masked_text: &str) -> Result<Vec<f32>> {
        let tokenizer = self.require_tokenizer()?;
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| CheckError::ModelLoadError("model is not initialized".into()))?;
        let mask_id = self
            .mask_id
            .ok_or_else(|| CheckError::ModelLoadError("mask token id is not initialized".into()))?;

        let encoding = tokenizer
            .encode(masked_text, true)
            .map_err(|e| CheckError::TokenizeError(e.to_string()))?;
        let ids = encoding.get_ids();
        let mask_pos = ids
            .iter()
            .position(|&id| id == mask_id)
            .ok_or_else(|| CheckError::InferenceError("input contains no mask token".into()))?;

        let input_ids = Tensor::new(ids, &self.device)
            .map_err(candle_err)?
            .unsqueeze(0)
            .map_err(candle_err)?;
        let token_type_ids = input_ids.zeros_like().map_err(candle_err)?;
        let attention_mask = input_ids.ones_like().map_err(candle_err)?;

        let logits = model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(candle_err)?;

        let row = logits
            .squeeze(0)
            .map_err(candle_err)?
            .get(mask_pos)
            .map_err(candle_err)?;
        let scores: Vec<f32> = row.to_vec1().map_err(candle_err)?;
        Ok(softmax(&scores))
    }
}

impl Default for MaskedLmRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the byte span with the mask placeholder.
fn mask_span(text: &str, start: usize, end: usize) -> String {
    format!("{}{}{}", &text[..start], MASK_TOKEN, &text[end..])
}

/// Reject subword pieces (`##ing`), specials (`[SEP]`) and punctuation.
fn is_word_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphabetic() || c == '\'')
}

/// Numerically stable softmax over raw logits.
fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; scores.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}
