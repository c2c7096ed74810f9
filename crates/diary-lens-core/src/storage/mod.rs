pub mod models;
pub mod queries;
pub mod snapshot;
pub mod sqlite;
pub mod writer;

pub use models::DiaryRecord;
pub use snapshot::{read_snapshot, write_snapshot};
pub use sqlite::Database;
pub use writer::write_store;
