/// Collapse every newline in `content` to a single space.
///
/// Applied only to classifier input; persisted content keeps its newlines.
pub fn normalize_content(content: &str) -> String {
    content.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::normalize_content;

    #[test]
    fn test_each_newline_becomes_one_space() {
        assert_eq!(normalize_content("a\nb\n\nc\n"), "a b  c ");
    }

    #[test]
    fn test_text_without_newlines_is_unchanged() {
        assert_eq!(normalize_content("今日は晴れ"), "今日は晴れ");
        assert_eq!(normalize_content(""), "");
    }
}
