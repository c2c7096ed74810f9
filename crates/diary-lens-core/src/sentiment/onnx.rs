//! Pretrained multilingual sequence classifier exported to ONNX.
//!
//! Expects a model with `input_ids` and `attention_mask` inputs and a
//! `logits` output of shape `[1, 5]`, plus the matching `tokenizer.json`.

use super::SentimentModel;
use crate::error::Error;
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};
use tracing::debug;

pub struct OnnxModel {
    session: Session,
    tokenizer: Tokenizer,
}

fn classifier_error(context: &str, e: impl std::fmt::Display) -> Error {
    Error::Classifier(format!("{}: {}", context, e))
}

/// Load `tokenizer.json` with truncation to `max_tokens`.
pub fn load_tokenizer(path: &Path, max_tokens: usize) -> Result<Tokenizer, Error> {
    let mut tokenizer =
        Tokenizer::from_file(path).map_err(|e| classifier_error("loading tokenizer", e))?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_tokens,
            ..Default::default()
        }))
        .map_err(|e| classifier_error("configuring truncation", e))?;
    tokenizer.with_padding(Some(PaddingParams::default()));
    Ok(tokenizer)
}

impl OnnxModel {
    pub fn load(model_path: &Path, tokenizer_path: &Path, max_tokens: usize) -> Result<Self, Error> {
        let tokenizer = load_tokenizer(tokenizer_path, max_tokens)?;
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(model_path))
            .map_err(|e| classifier_error("loading model", e))?;

        debug!(
            "Loaded ONNX model {} with tokenizer {}",
            model_path.display(),
            tokenizer_path.display()
        );

        Ok(Self { session, tokenizer })
    }
}

impl SentimentModel for OnnxModel {
    fn name(&self) -> &str {
        "onnx"
    }

    fn logits(&self, text: &str) -> Result<Vec<f32>, Error> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| classifier_error("tokenizing", e))?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();
        let len = ids.len();

        let ids = Array2::from_shape_vec((1, len), ids)
            .map_err(|e| classifier_error("shaping input_ids", e))?;
        let mask = Array2::from_shape_vec((1, len), mask)
            .map_err(|e| classifier_error("shaping attention_mask", e))?;

        let inputs = ort::inputs![
            "input_ids" => Tensor::from_array(ids).map_err(|e| classifier_error("input_ids", e))?,
            "attention_mask" => Tensor::from_array(mask).map_err(|e| classifier_error("attention_mask", e))?,
        ]
        .map_err(|e| classifier_error("building inputs", e))?;

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| classifier_error("running model", e))?;
        let logits = outputs["logits"]
            .try_extract_tensor::<f32>()
            .map_err(|e| classifier_error("reading logits", e))?;

        Ok(logits.iter().copied().collect())
    }
}
