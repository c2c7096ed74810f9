use crate::config::{AppConfig, MalformedPolicy};
use crate::diary::{self, DiaryFile};
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::scanner;
use crate::sentiment::{SentimentClassifier, SentimentLabel};
use crate::storage::{self, Database, DiaryRecord};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct IngestEngine {
    config: AppConfig,
    classifier: SentimentClassifier,
}

#[derive(Debug)]
pub struct IngestResult {
    pub list_duration: Duration,
    pub classify_duration: Duration,
    pub store_duration: Duration,
    pub files_found: usize,
    pub records_written: usize,
    pub skipped_files: Vec<PathBuf>,
    pub label_counts: BTreeMap<SentimentLabel, usize>,
}

impl IngestEngine {
    /// The classifier is built once by the caller and reused for every file.
    pub fn new(config: AppConfig, classifier: SentimentClassifier) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the batch pipeline:
    /// 1. List the diary folder
    /// 2. Per file: split, parse frontmatter, normalize, classify, assemble
    /// 3. Sort by date key and replace the table and CSV snapshot
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<IngestResult, Error> {
        let source_dir = &self.config.source_dir;

        // Phase 1: List
        info!("Listing diary files in {}", source_dir.display());
        reporter.on_list_start();
        let list_start = Instant::now();
        let files = scanner::list_diary_files(source_dir)?;
        let list_duration = list_start.elapsed();
        reporter.on_list_complete(files.len(), list_duration.as_secs_f64());

        // Phase 2: Extract and classify
        info!("Classifying {} diary files...", files.len());
        reporter.on_classify_start(files.len());
        let classify_start = Instant::now();
        let mut records = Vec::with_capacity(files.len());
        let mut skipped_files = Vec::new();

        for (i, path) in files.iter().enumerate() {
            match self.process_file(path) {
                Ok(record) => records.push(record),
                Err(err @ Error::MalformedFile { .. })
                    if self.config.extract.on_malformed == MalformedPolicy::Skip =>
                {
                    warn!("Skipping file: {}", err);
                    skipped_files.push(path.clone());
                }
                Err(err) => return Err(err),
            }
            let name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            reporter.on_classify_progress(i + 1, &name);
        }

        records.sort_by(|a, b| a.ymd.cmp(&b.ymd).then_with(|| a.file_name.cmp(&b.file_name)));
        let classify_duration = classify_start.elapsed();
        reporter.on_classify_complete(
            records.len(),
            skipped_files.len(),
            classify_duration.as_secs_f64(),
        );

        // Phase 3: Store
        info!("Writing store...");
        reporter.on_store_write_start();
        let store_start = Instant::now();
        let records_written = self.write(&records)?;
        let store_duration = store_start.elapsed();
        reporter.on_store_write_complete(records_written, store_duration.as_secs_f64());

        let mut label_counts = BTreeMap::new();
        for record in &records {
            *label_counts.entry(record.sentiment_label).or_insert(0) += 1;
        }

        Ok(IngestResult {
            list_duration,
            classify_duration,
            store_duration,
            files_found: files.len(),
            records_written,
            skipped_files,
            label_counts,
        })
    }

    /// Build the record for a single diary file.
    pub fn process_file(&self, path: &Path) -> Result<DiaryRecord, Error> {
        let file: DiaryFile = diary::extract_diary_file(path, &self.config.extract)?;
        let frontmatter = diary::parse_frontmatter(&file.frontmatter, &self.config.frontmatter);
        let normalized = diary::normalize_content(&file.content);
        let sentiment = self.classifier.classify(Some(normalized.as_str()))?;

        debug!(
            "file_name: {} sentiment_label: {} sentiment_score: {:.4}",
            file.file_name, sentiment.label, sentiment.score
        );

        Ok(DiaryRecord::assemble(file, frontmatter, sentiment))
    }

    fn write(&self, records: &[DiaryRecord]) -> Result<usize, Error> {
        let store = &self.config.store;
        if let Some(parent) = store.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut db = Database::open(&store.db_path)?;
        storage::write_store(&mut db, records, store)
    }
}
