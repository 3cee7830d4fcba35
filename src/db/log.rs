//! Learning log persistence

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

use crate::domain::LogEntry;

/// Insert an answered question. Returns the assigned row id.
pub fn insert_log_entry(conn: &Connection, entry: &LogEntry) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO learning_log (timestamp, question, user_answer, correct_answer, is_correct, genre)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
        params![
            entry.timestamp.to_rfc3339(),
            entry.question,
            entry.user_answer,
            entry.correct_answer,
            if entry.is_correct { 1 } else { 0 },
            entry.genre,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Get the full learning history, newest first.
pub fn get_all_log_entries(conn: &Connection) -> Result<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, timestamp, question, user_answer, correct_answer, is_correct, genre
    FROM learning_log
    ORDER BY timestamp DESC, id DESC
    "#,
    )?;

    let entries = stmt
        .query_map([], row_to_log_entry)?
        .collect::<Result<Vec<_>>>()?;

    Ok(entries)
}

/// Delete a single log entry. Genre stats are intentionally left as they
/// are: deleting history does not undo its contribution to accuracy.
pub fn delete_log_entry(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM learning_log WHERE id = ?1", params![id])?;
    Ok(())
}

/// Delete the whole history and zero every genre's counters, atomically.
/// Genre rows themselves are kept.
pub fn delete_all_log_entries(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM learning_log", [])?;
    tx.execute(
        "UPDATE genre_stats SET total_questions = 0, correct_answers = 0, last_updated = ?1",
        params![Utc::now().to_rfc3339()],
    )?;
    tx.commit()
}

/// Convert a database row to LogEntry
fn row_to_log_entry(row: &rusqlite::Row) -> Result<LogEntry> {
    let timestamp_str: String = row.get(1)?;
    let is_correct: i64 = row.get(5)?;

    Ok(LogEntry {
        id: row.get(0)?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        question: row.get(2)?,
        user_answer: row.get(3)?,
        correct_answer: row.get(4)?,
        is_correct: is_correct == 1,
        genre: row.get(6)?,
    })
}
