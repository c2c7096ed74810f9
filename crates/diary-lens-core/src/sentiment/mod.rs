//! Five-point sentiment classification of diary text.
//!
//! The classifier owns one [`SentimentModel`], built once and reused for
//! every entry in a run. Models only produce raw logits; softmax, argmax
//! and the empty-input default live here so every backend honors the same
//! contract.

pub mod lexicon;
#[cfg(feature = "onnx")]
pub mod onnx;

use crate::config::{ClassifierBackend, ClassifierConfig};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

pub use lexicon::LexiconModel;

/// Ordinal sentiment scale. Discriminants are the model's output indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Negative")]
    VeryNegative = 0,
    #[serde(rename = "Negative")]
    Negative = 1,
    #[serde(rename = "Neutral")]
    Neutral = 2,
    #[serde(rename = "Positive")]
    Positive = 3,
    #[serde(rename = "Very Positive")]
    VeryPositive = 4,
}

impl SentimentLabel {
    /// Model output order, index 0 first.
    pub const ALL: [SentimentLabel; 5] = [
        SentimentLabel::VeryNegative,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
        SentimentLabel::VeryPositive,
    ];

    /// Order used by every dashboard chart and table.
    pub const DISPLAY_ORDER: [SentimentLabel; 5] = [
        SentimentLabel::VeryPositive,
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
        SentimentLabel::VeryNegative,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::VeryNegative => "Very Negative",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::VeryPositive => "Very Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidRecord(format!("unknown sentiment label '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Probability assigned to `label`, in `[0, 1]`.
    pub score: f64,
}

impl SentimentResult {
    /// Result used for missing or empty text.
    pub const NEUTRAL_DEFAULT: SentimentResult = SentimentResult {
        label: SentimentLabel::Neutral,
        score: 0.5,
    };
}

/// One forward pass of a sequence-classification model.
///
/// Implementations tokenize with their own truncation limit and return the
/// raw logits for the five classes, in [`SentimentLabel::ALL`] order.
pub trait SentimentModel {
    fn name(&self) -> &str;
    fn logits(&self, text: &str) -> Result<Vec<f32>, Error>;
}

pub struct SentimentClassifier {
    model: Box<dyn SentimentModel>,
}

impl SentimentClassifier {
    pub fn new(model: impl SentimentModel + 'static) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    /// Build the configured backend. Model files are loaded here, once.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, Error> {
        let classifier = match config.backend {
            ClassifierBackend::Lexicon => Self::new(LexiconModel::new(config.max_tokens)),
            #[cfg(feature = "onnx")]
            ClassifierBackend::Onnx => Self::new(onnx::OnnxModel::load(
                &config.model_path,
                &config.tokenizer_path,
                config.max_tokens,
            )?),
            #[cfg(not(feature = "onnx"))]
            ClassifierBackend::Onnx => {
                return Err(Error::Classifier(
                    "the onnx backend requires building with the `onnx` feature".to_string(),
                ))
            }
        };
        info!("Sentiment model '{}' ready", classifier.model_name());
        Ok(classifier)
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Classify one text. `None` and blank text give
    /// [`SentimentResult::NEUTRAL_DEFAULT`] without running the model.
    pub fn classify(&self, text: Option<&str>) -> Result<SentimentResult, Error> {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Ok(SentimentResult::NEUTRAL_DEFAULT),
        };

        let logits = self.model.logits(text)?;
        if logits.len() != SentimentLabel::ALL.len() {
            return Err(Error::Classifier(format!(
                "model '{}' returned {} logits, expected {}",
                self.model.name(),
                logits.len(),
                SentimentLabel::ALL.len()
            )));
        }

        let probabilities = softmax(&logits);
        let (index, probability) = argmax(&probabilities);
        let label = SentimentLabel::from_index(index)
            .ok_or_else(|| Error::Classifier(format!("no label for class index {}", index)))?;

        Ok(SentimentResult {
            label,
            score: f64::from(probability).clamp(0.0, 1.0),
        })
    }

    pub fn classify_batch(&self, texts: &[Option<&str>]) -> Result<Vec<SentimentResult>, Error> {
        texts.iter().map(|text| self.classify(*text)).collect()
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and value of the largest element; the first one wins ties.
fn argmax(values: &[f32]) -> (usize, f32) {
    values
        .iter()
        .copied()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, v)| {
            if v > best.1 {
                (i, v)
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FixedModel {
        logits: Vec<f32>,
        calls: Rc<Cell<usize>>,
    }

    impl SentimentModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn logits(&self, _text: &str) -> Result<Vec<f32>, Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.logits.clone())
        }
    }

    fn classifier(logits: Vec<f32>) -> (SentimentClassifier, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let model = FixedModel {
            logits,
            calls: Rc::clone(&calls),
        };
        (SentimentClassifier::new(model), calls)
    }

    #[test]
    fn test_missing_and_blank_text_skip_the_model() {
        let (classifier, calls) = classifier(vec![0.0, 0.0, 0.0, 9.0, 0.0]);
        for input in [None, Some(""), Some("  \n ")] {
            let result = classifier.classify(input).unwrap();
            assert_eq!(result, SentimentResult::NEUTRAL_DEFAULT);
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_argmax_label_and_probability() {
        let (classifier, calls) = classifier(vec![0.1, 0.2, 0.3, 4.0, 1.0]);
        let result = classifier.classify(Some("good day")).unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(result.score > 0.5 && result.score <= 1.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_wrong_logit_count_is_an_error() {
        let (classifier, _) = classifier(vec![1.0, 2.0]);
        assert!(matches!(
            classifier.classify(Some("text")),
            Err(Error::Classifier(_))
        ));
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let (classifier, _) = classifier(vec![5.0, 0.0, 0.0, 0.0, 0.0]);
        let results = classifier.classify_batch(&[Some("bad"), None]).unwrap();
        assert_eq!(results[0].label, SentimentLabel::VeryNegative);
        assert_eq!(results[1], SentimentResult::NEUTRAL_DEFAULT);
    }

    #[test]
    fn test_softmax_sums_to_one_and_handles_large_logits() {
        let probs = softmax(&[1000.0, 1000.0, 999.0, -5.0, 0.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs.iter().all(|p| p.is_finite() && *p >= 0.0));
        assert!((probs[0] - probs[1]).abs() < 1e-6);
    }

    #[test]
    fn test_label_text_round_trip() {
        for label in SentimentLabel::ALL {
            assert_eq!(label.as_str().parse::<SentimentLabel>().unwrap(), label);
            assert_eq!(SentimentLabel::from_index(label.index()), Some(label));
        }
        assert!("Ecstatic".parse::<SentimentLabel>().is_err());
        assert_eq!(SentimentLabel::from_index(5), None);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&SentimentLabel::VeryPositive).unwrap();
        assert_eq!(json, "\"Very Positive\"");
    }

    #[test]
    fn test_onnx_backend_needs_model_files() {
        let config = ClassifierConfig {
            backend: ClassifierBackend::Onnx,
            ..ClassifierConfig::default()
        };
        let result = SentimentClassifier::from_config(&config);
        if cfg!(feature = "onnx") {
            // Model files are not shipped with the tests.
            assert!(result.is_err());
        } else {
            assert!(matches!(result, Err(Error::Classifier(_))));
        }
    }
}
