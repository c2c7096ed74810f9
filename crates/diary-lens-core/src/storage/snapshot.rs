use super::models::{DiaryRecord, FlatRecord, FLAT_COLUMNS};
use crate::error::Error;
use std::path::Path;

/// Write `records` as a flat CSV file, header first, replacing any existing file.
pub fn write_snapshot(records: &[DiaryRecord], path: &Path) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(FLAT_COLUMNS)?;
    for record in records {
        writer.serialize(FlatRecord::try_from(record)?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a CSV snapshot back into records.
pub fn read_snapshot(path: &Path) -> Result<Vec<DiaryRecord>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize::<FlatRecord>()
        .map(|row| DiaryRecord::try_from(row?))
        .collect()
}
