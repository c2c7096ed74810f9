pub mod analysis;
pub mod config;
pub mod diary;
pub mod engine;
pub mod error;
pub mod progress;
pub mod scanner;
pub mod sentiment;
pub mod storage;

pub use config::AppConfig;
pub use engine::{IngestEngine, IngestResult};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
