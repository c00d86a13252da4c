use candle_core::{Device, IndexOp, Tensor, D};
use candle_nn::{linear, ops::softmax, Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use std::collections::HashMap;
use tokenizers::{Encoding, Tokenizer};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::loaders::{load_var_builder, HfLoader};
use crate::pipelines::sentiment::model::SentimentResult;
use crate::pipelines::token_classification::model::TokenPrediction;

/// BERT checkpoints on the Hugging Face Hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BertCheckpoint {
    /// Turkish named-entity recognition (token classification).
    TurkishNer,
    /// Turkish three-way sentiment (sequence classification).
    TurkishSentiment,
    /// Any other BERT repository id with a matching classification head.
    Custom(String),
}

impl BertCheckpoint {
    /// Hub repository id of the checkpoint.
    pub fn repo_id(&self) -> &str {
        match self {
            BertCheckpoint::TurkishNer => "korkmazemin1/Named_entity_recognition_turkish_simurg",
            BertCheckpoint::TurkishSentiment => "korkmazemin1/sentiment_analys_turkish_simurg",
            BertCheckpoint::Custom(repo_id) => repo_id,
        }
    }
}

impl std::fmt::Display for BertCheckpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repo_id())
    }
}

impl std::str::FromStr for BertCheckpoint {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "turkish-ner" => BertCheckpoint::TurkishNer,
            "turkish-sentiment" => BertCheckpoint::TurkishSentiment,
            other => BertCheckpoint::Custom(other.to_string()),
        })
    }
}

// ============ Token classification ============

pub struct TokenClassificationBertModel {
    bert: BertModel,
    classifier: Linear,
    id2label: Vec<String>,
    max_positions: usize,
    device: Device,
}

impl TokenClassificationBertModel {
    pub fn new(checkpoint: BertCheckpoint, device: Device) -> Result<Self> {
        info!(checkpoint = %checkpoint, "loading token classification model");

        let (config, vb, id2label) = load_classifier(&checkpoint, &device)?;
        let bert = BertModel::load(vb.pp("bert"), &config)?;
        let classifier = linear(config.hidden_size, id2label.len(), vb.pp("classifier"))?;

        Ok(Self {
            bert,
            classifier,
            id2label,
            max_positions: config.max_position_embeddings,
            device,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Vec<TokenPrediction>> {
        let encoding = encode(tokenizer, text, self.max_positions)?;

        let specials = encoding.get_special_tokens_mask();
        if specials.iter().all(|&s| s == 1) {
            return Ok(vec![]);
        }

        let (input_ids, token_type_ids, attention_mask) = to_tensors(&encoding, &self.device)?;
        let hidden = self
            .bert
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let logits = self.classifier.forward(&hidden)?.squeeze(0)?;
        let probs = softmax(&logits, D::Minus1)?;
        let pred_ids = probs.argmax(D::Minus1)?.to_vec1::<u32>()?;
        let probs = probs.to_vec2::<f32>()?;

        let tokens = encoding.get_tokens();
        let offsets = encoding.get_offsets();

        let mut predictions = Vec::with_capacity(tokens.len());
        for (idx, &pred_id) in pred_ids.iter().enumerate() {
            if specials[idx] == 1 {
                continue;
            }
            let label = self.label(pred_id)?;
            let (start, end) = offsets[idx];
            predictions.push(TokenPrediction {
                token: tokens[idx].clone(),
                label: label.to_string(),
                score: probs[idx].get(pred_id as usize).copied().unwrap_or(0.0),
                start,
                end,
            });
        }

        Ok(predictions)
    }

    pub fn get_tokenizer(checkpoint: BertCheckpoint) -> Result<Tokenizer> {
        HfLoader::new(checkpoint.repo_id())?.load_tokenizer()
    }

    fn label(&self, id: u32) -> Result<&str> {
        self.id2label
            .get(id as usize)
            .map(String::as_str)
            .ok_or_else(|| {
                PipelineError::Unexpected(format!(
                    "Predicted label ID {} not in id2label ({} labels)",
                    id,
                    self.id2label.len()
                ))
            })
    }
}

impl crate::pipelines::token_classification::model::TokenClassificationModel
    for TokenClassificationBertModel
{
    type Options = BertCheckpoint;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        TokenClassificationBertModel::new(options, device)
    }

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Vec<TokenPrediction>> {
        self.predict(tokenizer, text)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

// ============ Sequence classification ============

pub struct SentimentBertModel {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    id2label: Vec<String>,
    max_positions: usize,
    device: Device,
}

impl SentimentBertModel {
    pub fn new(checkpoint: BertCheckpoint, device: Device) -> Result<Self> {
        info!(checkpoint = %checkpoint, "loading sentiment model");

        let (config, vb, id2label) = load_classifier(&checkpoint, &device)?;
        let bert = BertModel::load(vb.pp("bert"), &config)?;
        let pooler = linear(
            config.hidden_size,
            config.hidden_size,
            vb.pp("bert").pp("pooler").pp("dense"),
        )?;
        let classifier = linear(config.hidden_size, id2label.len(), vb.pp("classifier"))?;

        Ok(Self {
            bert,
            pooler,
            classifier,
            id2label,
            max_positions: config.max_position_embeddings,
            device,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<SentimentResult> {
        let encoding = encode(tokenizer, text, self.max_positions)?;
        let (input_ids, token_type_ids, attention_mask) = to_tensors(&encoding, &self.device)?;

        let probs = self.forward_probs(&input_ids, &token_type_ids, &attention_mask)?;
        let probs = probs.squeeze(0)?.to_vec1::<f32>()?;

        self.best_label(&probs)
    }

    pub fn predict_with_score_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[&str],
    ) -> Result<Vec<Result<SentimentResult>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let pad_token_id = tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0);

        let mut encodings = Vec::with_capacity(texts.len());
        let mut results: Vec<Option<Result<SentimentResult>>> =
            (0..texts.len()).map(|_| None).collect();

        for (i, text) in texts.iter().enumerate() {
            match encode(tokenizer, text, self.max_positions) {
                Ok(encoding) => encodings.push((i, encoding)),
                Err(e) => results[i] = Some(Err(e)),
            }
        }

        if !encodings.is_empty() {
            let max_len = encodings.iter().map(|(_, e)| e.len()).max().unwrap_or(0);

            let mut all_token_ids: Vec<u32> = Vec::new();
            let mut all_type_ids: Vec<u32> = Vec::new();
            let mut all_attention_masks: Vec<u32> = Vec::new();

            for (_, encoding) in &encodings {
                let mut token_ids = encoding.get_ids().to_vec();
                let mut type_ids = encoding.get_type_ids().to_vec();
                let mut attention_mask = encoding.get_attention_mask().to_vec();
                token_ids.resize(max_len, pad_token_id);
                type_ids.resize(max_len, 0);
                attention_mask.resize(max_len, 0);
                all_token_ids.extend(token_ids);
                all_type_ids.extend(type_ids);
                all_attention_masks.extend(attention_mask);
            }

            let batch_size = encodings.len();
            let input_ids = Tensor::from_vec(all_token_ids, (batch_size, max_len), &self.device)?;
            let token_type_ids =
                Tensor::from_vec(all_type_ids, (batch_size, max_len), &self.device)?;
            let attention_mask =
                Tensor::from_vec(all_attention_masks, (batch_size, max_len), &self.device)?;

            let probs = self
                .forward_probs(&input_ids, &token_type_ids, &attention_mask)?
                .to_vec2::<f32>()?;

            for ((orig_idx, _), row) in encodings.iter().zip(probs) {
                results[*orig_idx] = Some(self.best_label(&row));
            }
        }

        Ok(results
            .into_iter()
            .map(|r| {
                r.unwrap_or_else(|| {
                    Err(PipelineError::Unexpected(
                        "Model returned no prediction".to_string(),
                    ))
                })
            })
            .collect())
    }

    pub fn get_tokenizer(checkpoint: BertCheckpoint) -> Result<Tokenizer> {
        HfLoader::new(checkpoint.repo_id())?.load_tokenizer()
    }

    fn forward_probs(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let cls = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?;
        Ok(softmax(&logits, D::Minus1)?)
    }

    fn best_label(&self, probs: &[f32]) -> Result<SentimentResult> {
        let (pred_id, score) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| PipelineError::Unexpected("Classifier produced no logits".into()))?;

        let label = self.id2label.get(pred_id).cloned().ok_or_else(|| {
            PipelineError::Unexpected(format!(
                "Predicted label ID {} not in id2label. Available: {}",
                pred_id,
                self.id2label.join(", ")
            ))
        })?;

        Ok(SentimentResult { label, score })
    }
}

impl crate::pipelines::sentiment::model::SentimentAnalysisModel for SentimentBertModel {
    type Options = BertCheckpoint;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentBertModel::new(options, device)
    }

    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<SentimentResult> {
        self.predict_with_score(tokenizer, text)
    }

    fn predict_with_score_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[&str],
    ) -> Result<Vec<Result<SentimentResult>>> {
        self.predict_with_score_batch(tokenizer, texts)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

// ============ Loading helpers ============

#[derive(Deserialize)]
struct ClassifierConfigJson {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

fn load_classifier(
    checkpoint: &BertCheckpoint,
    device: &Device,
) -> Result<(Config, VarBuilder<'static>, Vec<String>)> {
    let loader = HfLoader::new(checkpoint.repo_id())?;

    let config: Config = loader.load_json("config.json")?;
    let class_cfg: ClassifierConfigJson = loader.load_json("config.json")?;
    let id2label = ordered_labels(class_cfg.id2label)?;

    let weights_path = loader.get_weights()?;
    let vb = load_var_builder(&weights_path, device)?;

    Ok((config, vb, id2label))
}

/// `id2label` keyed by stringified index, as written by `transformers`.
fn ordered_labels(id2label: HashMap<String, String>) -> Result<Vec<String>> {
    if id2label.is_empty() {
        return Err(PipelineError::Config(
            "Checkpoint config has no id2label mapping".to_string(),
        ));
    }

    let mut indexed = id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>().map(|id| (id, label)).map_err(|_| {
                PipelineError::Config(format!("Non-numeric id2label key '{id}'"))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    indexed.sort_by_key(|(id, _)| *id);

    for (expected, (id, _)) in indexed.iter().enumerate() {
        if *id != expected {
            return Err(PipelineError::Config(format!(
                "id2label is not contiguous: expected id {expected}, found {id}"
            )));
        }
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

fn encode(tokenizer: &Tokenizer, text: &str, max_positions: usize) -> Result<Encoding> {
    let encoding = tokenizer.encode(text, true).map_err(|e| {
        PipelineError::Tokenization(format!(
            "Tokenization failed on '{}': {}",
            &text.chars().take(50).collect::<String>(),
            e
        ))
    })?;

    if encoding.len() > max_positions {
        return Err(PipelineError::Tokenization(format!(
            "Input of {} tokens exceeds the model limit of {} on '{}'",
            encoding.len(),
            max_positions,
            &text.chars().take(50).collect::<String>(),
        )));
    }

    Ok(encoding)
}

fn to_tensors(encoding: &Encoding, device: &Device) -> Result<(Tensor, Tensor, Tensor)> {
    let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
    let token_type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
    let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;
    Ok((input_ids, token_type_ids, attention_mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_ordered_by_index() {
        let map = HashMap::from([
            ("2".to_string(), "Positive".to_string()),
            ("0".to_string(), "Negative".to_string()),
            ("1".to_string(), "Neutral".to_string()),
        ]);
        let labels = ordered_labels(map).unwrap();
        assert_eq!(labels, vec!["Negative", "Neutral", "Positive"]);
    }

    #[test]
    fn gaps_in_label_ids_are_rejected() {
        let map = HashMap::from([
            ("0".to_string(), "O".to_string()),
            ("2".to_string(), "B-ORG".to_string()),
        ]);
        assert!(matches!(ordered_labels(map), Err(PipelineError::Config(_))));
    }

    #[test]
    fn empty_label_map_is_rejected() {
        assert!(matches!(
            ordered_labels(HashMap::new()),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn checkpoint_names_parse() {
        assert_eq!(
            "turkish-ner".parse::<BertCheckpoint>().unwrap(),
            BertCheckpoint::TurkishNer
        );
        let custom: BertCheckpoint = "someone/bert-ner".parse().unwrap();
        assert_eq!(custom.repo_id(), "someone/bert-ner");
        assert_eq!(
            BertCheckpoint::TurkishSentiment.to_string(),
            "korkmazemin1/sentiment_analys_turkish_simurg"
        );
    }
}
