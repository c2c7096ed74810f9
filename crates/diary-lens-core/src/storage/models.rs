use crate::diary::{DiaryFile, Frontmatter};
use crate::error::Error;
use crate::sentiment::{SentimentLabel, SentimentResult};
use serde::{Deserialize, Serialize};

/// One persisted diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRecord {
    pub file_name: String,
    /// Date key, `YYYY-MM-DD`. Not validated before storage.
    pub ymd: String,
    pub raw_content: String,
    pub gym_menu_list: Vec<String>,
    pub created_at: String,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
}

impl DiaryRecord {
    /// Combine the outputs of every ingest stage for one file.
    pub fn assemble(diary: DiaryFile, frontmatter: Frontmatter, sentiment: SentimentResult) -> Self {
        Self {
            file_name: diary.file_name,
            ymd: diary.ymd,
            raw_content: diary.content,
            gym_menu_list: frontmatter.gym_menu_list,
            created_at: frontmatter.created_at,
            sentiment_label: sentiment.label,
            sentiment_score: sentiment.score,
        }
    }
}

/// Flat row shape shared by the table and the CSV snapshot.
/// The workout menu travels as a JSON array string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub file_name: String,
    pub ymd: String,
    pub raw_content: String,
    pub gym_menu_list: String,
    pub created_at: String,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
}

pub const FLAT_COLUMNS: [&str; 7] = [
    "file_name",
    "ymd",
    "raw_content",
    "gym_menu_list",
    "created_at",
    "sentiment_label",
    "sentiment_score",
];

impl TryFrom<&DiaryRecord> for FlatRecord {
    type Error = Error;

    fn try_from(record: &DiaryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            file_name: record.file_name.clone(),
            ymd: record.ymd.clone(),
            raw_content: record.raw_content.clone(),
            gym_menu_list: serde_json::to_string(&record.gym_menu_list)?,
            created_at: record.created_at.clone(),
            sentiment_label: record.sentiment_label,
            sentiment_score: record.sentiment_score,
        })
    }
}

impl TryFrom<FlatRecord> for DiaryRecord {
    type Error = Error;

    fn try_from(flat: FlatRecord) -> Result<Self, Self::Error> {
        let gym_menu_list = if flat.gym_menu_list.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&flat.gym_menu_list).map_err(|e| {
                Error::InvalidRecord(format!(
                    "{}: gym_menu_list is not a JSON array: {}",
                    flat.file_name, e
                ))
            })?
        };

        Ok(Self {
            file_name: flat.file_name,
            ymd: flat.ymd,
            raw_content: flat.raw_content,
            gym_menu_list,
            created_at: flat.created_at,
            sentiment_label: flat.sentiment_label,
            sentiment_score: flat.sentiment_score,
        })
    }
}
