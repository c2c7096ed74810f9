//! Keyword valence model that needs no model files.
//!
//! Scores English words by token and Japanese expressions by substring,
//! squashes the total into a valence in `[-1, 1]` and turns that into five
//! logits peaked at the nearest ordinal class.

use super::SentimentModel;
use crate::error::Error;

const POSITIVE_WORDS: &[(&str, f32)] = &[
    ("good", 1.0),
    ("nice", 1.0),
    ("happy", 1.5),
    ("glad", 1.0),
    ("fun", 1.0),
    ("enjoy", 1.0),
    ("enjoyed", 1.0),
    ("love", 1.5),
    ("great", 1.5),
    ("excited", 1.5),
    ("relaxed", 1.0),
    ("proud", 1.0),
    ("wonderful", 2.0),
    ("amazing", 2.0),
    ("fantastic", 2.0),
    ("awesome", 2.0),
];

const NEGATIVE_WORDS: &[(&str, f32)] = &[
    ("bad", 1.0),
    ("tired", 1.0),
    ("sad", 1.5),
    ("sick", 1.0),
    ("angry", 1.5),
    ("stressed", 1.5),
    ("anxious", 1.5),
    ("worried", 1.0),
    ("lonely", 1.5),
    ("annoying", 1.0),
    ("frustrated", 1.5),
    ("hate", 2.0),
    ("terrible", 2.0),
    ("awful", 2.0),
    ("miserable", 2.0),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "without", "don't", "didn't", "isn't", "wasn't"];

const POSITIVE_JA: &[(&str, f32)] = &[
    ("嬉しい", 1.5),
    ("うれしい", 1.5),
    ("楽しい", 1.5),
    ("楽しかった", 1.5),
    ("良かった", 1.0),
    ("よかった", 1.0),
    ("幸せ", 2.0),
    ("最高", 2.0),
    ("満足", 1.0),
    ("充実", 1.0),
    ("美味しい", 1.0),
    ("おいしい", 1.0),
    ("頑張った", 1.0),
    ("できた", 0.5),
    ("ありがたい", 1.0),
    ("感謝", 1.0),
];

const NEGATIVE_JA: &[(&str, f32)] = &[
    ("疲れ", 1.0),
    ("しんどい", 1.5),
    ("つらい", 1.5),
    ("辛い", 1.5),
    ("悲しい", 1.5),
    ("不安", 1.5),
    ("イライラ", 1.5),
    ("憂鬱", 2.0),
    ("最悪", 2.0),
    ("嫌", 1.0),
    ("失敗", 1.0),
    ("眠い", 0.5),
    ("体調不良", 1.5),
    ("だるい", 1.0),
    ("後悔", 1.5),
];

/// Class centers on the valence axis, in label index order.
const CLASS_CENTERS: [f32; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];
/// Sharpness of the logit peak around each center.
const PEAK_WIDTH: f32 = 0.35;
/// Raw score at which valence reaches tanh(1).
const SCORE_SCALE: f32 = 3.0;

pub struct LexiconModel {
    max_tokens: usize,
}

impl LexiconModel {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    /// Valence of `text` in `[-1, 1]`, after truncation to `max_tokens`.
    pub fn valence(&self, text: &str) -> f32 {
        let text = truncate_tokens(text, self.max_tokens);
        let lower = text.to_lowercase();

        let words: Vec<&str> = lower
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .collect();

        let mut score: f32 = 0.0;
        for (i, word) in words.iter().enumerate() {
            let negated = words[i.saturating_sub(2)..i]
                .iter()
                .any(|w| NEGATIONS.contains(w));
            let weight = lookup(POSITIVE_WORDS, word)
                .or_else(|| lookup(NEGATIVE_WORDS, word).map(|w| -w));
            if let Some(weight) = weight {
                score += if negated { -weight * 0.5 } else { weight };
            }
        }

        for (phrase, weight) in POSITIVE_JA {
            score += lower.matches(phrase).count() as f32 * weight;
        }
        for (phrase, weight) in NEGATIVE_JA {
            score -= lower.matches(phrase).count() as f32 * weight;
        }

        (score / SCORE_SCALE).tanh()
    }
}

impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn logits(&self, text: &str) -> Result<Vec<f32>, Error> {
        let valence = self.valence(text);
        Ok(CLASS_CENTERS
            .iter()
            .map(|center| -((valence - center) / PEAK_WIDTH).powi(2))
            .collect())
    }
}

fn lookup(table: &[(&str, f32)], word: &str) -> Option<f32> {
    table.iter().find(|(w, _)| *w == word).map(|(_, weight)| *weight)
}

/// Cut `text` after `max_tokens` tokens.
///
/// A token is a run of ASCII alphanumerics, or any other single
/// non-whitespace character (one CJK character is one token).
pub fn truncate_tokens(text: &str, max_tokens: usize) -> &str {
    let mut count = 0usize;
    let mut in_word = false;

    for (idx, c) in text.char_indices() {
        let starts_token = if c.is_ascii_alphanumeric() {
            let starts = !in_word;
            in_word = true;
            starts
        } else {
            in_word = false;
            !c.is_whitespace()
        };

        if starts_token {
            if count == max_tokens {
                return &text[..idx];
            }
            count += 1;
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{SentimentClassifier, SentimentLabel};

    fn classify(text: &str) -> SentimentLabel {
        SentimentClassifier::new(LexiconModel::new(512))
            .classify(Some(text))
            .unwrap()
            .label
    }

    #[test]
    fn test_positive_english() {
        assert!(classify("What a wonderful day, I love it") >= SentimentLabel::Positive);
    }

    #[test]
    fn test_negative_japanese() {
        assert!(classify("今日は本当に疲れた。最悪の一日で不安しかない。") <= SentimentLabel::Negative);
    }

    #[test]
    fn test_plain_text_is_neutral() {
        assert_eq!(classify("Went to the office and came back home."), SentimentLabel::Neutral);
    }

    #[test]
    fn test_negation_flips_sign() {
        let model = LexiconModel::new(512);
        assert!(model.valence("the meeting was not bad") > 0.0);
        assert!(model.valence("I did not enjoy it") < 0.0);
    }

    #[test]
    fn test_logits_peak_at_nearest_class() {
        let model = LexiconModel::new(512);
        let logits = model.logits("").unwrap();
        assert_eq!(logits.len(), 5);
        let best = logits
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(best, SentimentLabel::Neutral.index());
    }

    #[test]
    fn test_truncate_tokens() {
        assert_eq!(truncate_tokens("one two three", 2), "one two ");
        assert_eq!(truncate_tokens("今日は晴れ", 3), "今日は");
        assert_eq!(truncate_tokens("short", 512), "short");
        assert_eq!(truncate_tokens("a, b", 2), "a,");
    }

    #[test]
    fn test_words_past_the_limit_are_ignored() {
        let model = LexiconModel::new(3);
        assert_eq!(model.valence("x y z terrible terrible"), 0.0);
    }
}
