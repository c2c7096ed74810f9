use crate::config::ExtractConfig;
use crate::error::Error;
use std::fs;
use std::path::Path;

/// One diary file after the raw split, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryFile {
    pub file_name: String,
    /// Date key taken from the file name, expected as `YYYY-MM-DD`.
    pub ymd: String,
    pub frontmatter: String,
    /// Body text with the previous-entry section removed. Newlines kept.
    pub content: String,
}

/// Read a diary file and split it into frontmatter and body.
pub fn extract_diary_file(path: &Path, config: &ExtractConfig) -> Result<DiaryFile, Error> {
    let text = fs::read_to_string(path)?;

    let (frontmatter, content) = split_diary_text(
        &text,
        &config.delimiter,
        &config.previous_entry_marker,
    )
    .map_err(|segments| Error::MalformedFile {
        path: path.to_path_buf(),
        segments,
    })?;

    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ymd = date_key_from_file_name(&file_name).to_string();

    Ok(DiaryFile {
        file_name,
        ymd,
        frontmatter: frontmatter.to_string(),
        content: content.to_string(),
    })
}

/// Split diary text on `delimiter` into `(frontmatter, body)`.
///
/// The text before the first delimiter is ignored, the second segment is the
/// frontmatter and the third is the body; anything after a third delimiter is
/// dropped. The body is cut at the first `marker`, if present.
///
/// Returns the number of segments found when there are fewer than three.
pub fn split_diary_text<'a>(
    text: &'a str,
    delimiter: &str,
    marker: &str,
) -> Result<(&'a str, &'a str), usize> {
    let segments: Vec<&str> = text.split(delimiter).collect();
    if segments.len() < 3 {
        return Err(segments.len());
    }

    let frontmatter = segments[1];
    let body = segments[2];
    let body = match (marker.is_empty(), body.find(marker)) {
        (false, Some(idx)) => &body[..idx],
        _ => body,
    };

    Ok((frontmatter, body))
}

/// Date key for a file name: everything before the first `.`.
pub fn date_key_from_file_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}
