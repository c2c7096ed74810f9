use super::models::DiaryRecord;
use super::queries::{load_diary_records, recreate_diary_table};
use super::snapshot::write_snapshot;
use super::sqlite::Database;
use crate::config::StoreConfig;
use crate::error::Error;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Persist a full run: JSON staging file, table rebuild, CSV export.
///
/// The table rebuild and the CSV export succeed or fail together. The CSV is
/// written to a temporary sibling inside the table transaction. The previous
/// snapshot is moved to a backup sibling, the temporary file takes its place,
/// and only then does the transaction commit. Any failure rolls the
/// transaction back and puts the previous snapshot back.
pub fn write_store(
    db: &mut Database,
    records: &[DiaryRecord],
    config: &StoreConfig,
) -> Result<usize, Error> {
    ensure_parent_dir(&config.staging_path)?;
    ensure_parent_dir(&config.csv_path)?;

    let staged = stage_records(records, &config.staging_path)?;
    debug!(
        "Staged {} records at {}",
        staged.len(),
        config.staging_path.display()
    );

    let tx = db.connection_mut().transaction()?;
    let rows = recreate_diary_table(&tx, &staged)?;
    let exported = load_diary_records(&tx)?;

    let tmp_path = sibling(&config.csv_path, ".tmp");
    if let Err(e) = write_snapshot(&exported, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    let backup_path = sibling(&config.csv_path, ".bak");
    let had_previous = config.csv_path.is_file();
    if had_previous {
        if let Err(e) = fs::rename(&config.csv_path, &backup_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
    }
    if let Err(e) = fs::rename(&tmp_path, &config.csv_path) {
        let _ = fs::remove_file(&tmp_path);
        restore_previous(&config.csv_path, &backup_path, had_previous, false);
        return Err(e.into());
    }
    if let Err(e) = tx.commit() {
        restore_previous(&config.csv_path, &backup_path, had_previous, true);
        return Err(e.into());
    }
    if had_previous {
        if let Err(e) = fs::remove_file(&backup_path) {
            warn!("Could not remove {}: {}", backup_path.display(), e);
        }
    }

    info!(
        "Wrote {} records to diary_records and {}",
        rows,
        config.csv_path.display()
    );
    Ok(rows)
}

/// Serialize to the staging file and load the table input back from it.
fn stage_records(records: &[DiaryRecord], path: &Path) -> Result<Vec<DiaryRecord>, Error> {
    let json = serde_json::to_string(records)?;
    fs::write(path, json)?;
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn ensure_parent_dir(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Undo the snapshot swap. `placed` says whether the new CSV already sits at
/// `csv_path`.
fn restore_previous(csv_path: &Path, backup_path: &Path, had_previous: bool, placed: bool) {
    let restored = if had_previous {
        fs::rename(backup_path, csv_path)
    } else if placed {
        fs::remove_file(csv_path)
    } else {
        Ok(())
    };
    if let Err(e) = restored {
        error!("Could not restore snapshot {}: {}", csv_path.display(), e);
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(suffix);
    path.with_file_name(name)
}
