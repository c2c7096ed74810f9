//! Turning one diary file into the pieces a record is built from.

pub mod file;
pub mod frontmatter;
pub mod normalize;

pub use file::{date_key_from_file_name, extract_diary_file, split_diary_text, DiaryFile};
pub use frontmatter::{parse_frontmatter, Frontmatter};
pub use normalize::normalize_content;
