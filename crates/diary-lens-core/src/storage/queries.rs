use super::models::{DiaryRecord, FlatRecord};
use super::sqlite::Database;
use crate::error::Error;
use crate::sentiment::SentimentLabel;
use rusqlite::{params, Connection};
use tracing::debug;

impl Database {
    /// Drop and rebuild `diary_records` with exactly `records`, in one transaction.
    pub fn replace_diary_records(&mut self, records: &[DiaryRecord]) -> Result<usize, Error> {
        let tx = self.connection_mut().transaction()?;
        let rows = recreate_diary_table(&tx, records)?;
        tx.commit()?;
        Ok(rows)
    }

    /// All rows, in insertion order.
    pub fn load_diary_records(&self) -> Result<Vec<DiaryRecord>, Error> {
        load_diary_records(self.connection())
    }

    pub fn count_diary_records(&self) -> Result<i64, Error> {
        let count = self
            .connection()
            .query_row("SELECT COUNT(*) FROM diary_records", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Remove every stored record, leaving an empty table.
    pub fn clear(&self) -> Result<(), Error> {
        self.connection()
            .execute_batch("DROP TABLE IF EXISTS diary_records;")?;
        self.connection().execute_batch(include_str!("schema.sql"))?;
        debug!("diary_records cleared");
        Ok(())
    }
}

/// Drop, recreate and fill the table on `conn`. Callers own the transaction.
pub(crate) fn recreate_diary_table(conn: &Connection, records: &[DiaryRecord]) -> Result<usize, Error> {
    conn.execute_batch("DROP TABLE IF EXISTS diary_records;")?;
    conn.execute_batch(include_str!("schema.sql"))?;

    let mut stmt = conn.prepare(
        "INSERT INTO diary_records \
         (file_name, ymd, raw_content, gym_menu_list, created_at, sentiment_label, sentiment_score) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;

    let mut count = 0usize;
    for record in records {
        let flat = FlatRecord::try_from(record)?;
        stmt.execute(params![
            flat.file_name,
            flat.ymd,
            flat.raw_content,
            flat.gym_menu_list,
            flat.created_at,
            flat.sentiment_label.as_str(),
            flat.sentiment_score,
        ])?;
        count += 1;
    }

    debug!("Inserted {} rows into diary_records", count);
    Ok(count)
}

pub(crate) fn load_diary_records(conn: &Connection) -> Result<Vec<DiaryRecord>, Error> {
    let mut stmt = conn.prepare(
        "SELECT file_name, ymd, raw_content, gym_menu_list, created_at, \
                sentiment_label, sentiment_score \
         FROM diary_records ORDER BY rowid",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, f64>(6)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(
            |(file_name, ymd, raw_content, gym_menu_list, created_at, label, sentiment_score)| {
                DiaryRecord::try_from(FlatRecord {
                    file_name,
                    ymd,
                    raw_content,
                    gym_menu_list,
                    created_at,
                    sentiment_label: label.parse::<SentimentLabel>()?,
                    sentiment_score,
                })
            },
        )
        .collect()
}
