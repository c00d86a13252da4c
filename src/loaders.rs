use std::path::{Path, PathBuf};
use std::time::Duration;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};
use serde::de::DeserializeOwned;
use tokenizers::Tokenizer;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Files of one Hugging Face model repository, fetched through the local hub cache.
pub struct HfLoader {
    repo_id: String,
    repo: ApiRepo,
}

impl HfLoader {
    pub fn new(repo_id: &str) -> Result<Self> {
        let api = Api::new().map_err(|e| {
            PipelineError::Download(format!("Failed to initialize HuggingFace API: {e}"))
        })?;
        let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));

        Ok(Self {
            repo_id: repo_id.to_string(),
            repo,
        })
    }

    pub fn get(&self, filename: &str) -> Result<PathBuf> {
        let max_retries = 3;

        for attempt in 0..max_retries {
            match self.repo.get(filename) {
                Ok(path) => {
                    debug!(repo = %self.repo_id, file = filename, "resolved hub file");
                    return Ok(path);
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    // Concurrent builders race on the cache lock; back off and retry.
                    if error_msg.contains("Lock acquisition failed") && attempt < max_retries - 1 {
                        std::thread::sleep(Duration::from_millis(100 * (1 << attempt)));
                        continue;
                    }
                    return Err(PipelineError::Download(format!(
                        "Failed to download '{}' from '{}': {}",
                        filename, self.repo_id, error_msg
                    )));
                }
            }
        }

        Err(PipelineError::Download(format!(
            "Download timed out for '{}' from '{}' after {} attempt(s)",
            filename, self.repo_id, max_retries
        )))
    }

    /// Safetensors when published, pickled PyTorch weights otherwise.
    pub fn get_weights(&self) -> Result<PathBuf> {
        self.get("model.safetensors")
            .or_else(|_| self.get("pytorch_model.bin"))
    }

    pub fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.get(filename)?;
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_tokenizer(&self) -> Result<Tokenizer> {
        let path = self.get("tokenizer.json")?;
        let path_str = path.display().to_string();

        Tokenizer::from_file(&path).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Failed to load tokenizer from '{}': {}",
                path_str, e
            ))
        })
    }
}

pub fn load_var_builder(weights_path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(weights_path, DType::F32, device)?
    };
    Ok(vb)
}
