pub mod walk;

pub use walk::list_diary_files;
