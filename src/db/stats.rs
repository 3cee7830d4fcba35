//! Per-genre accuracy tracking

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// Per-genre attempt and correct counts.
/// Invariant: correct_answers <= total_questions.
#[derive(Debug, Clone)]
pub struct GenreStat {
    pub genre: String,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl GenreStat {
    /// Accuracy percentage rounded to two decimals; 0 with no attempts.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions > 0 {
            (self.correct_answers as f64 / self.total_questions as f64 * 100.0 * 100.0).round()
                / 100.0
        } else {
            0.0
        }
    }
}

/// Record one answered question against a genre.
///
/// An unknown genre updates nothing: the genre set is fixed at seed time, so
/// this is a data-integrity condition. It is logged and swallowed rather than
/// propagated, because the answer itself has already been scored.
pub fn update_genre_stats(conn: &Connection, genre: &str, is_correct: bool) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let correct_increment = if is_correct { 1 } else { 0 };

    let updated = conn.execute(
        r#"
    UPDATE genre_stats
    SET total_questions = total_questions + 1,
        correct_answers = correct_answers + ?1,
        last_updated = ?2
    WHERE genre = ?3
    "#,
        params![correct_increment, now, genre],
    )?;

    if updated == 0 {
        tracing::warn!("update_genre_stats: unknown genre '{}', stats not updated", genre);
    }

    Ok(())
}

/// Zero every genre's counters. Genre rows are never deleted.
pub fn reset_all_genre_stats(conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE genre_stats SET total_questions = 0, correct_answers = 0, last_updated = ?1",
        params![Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Get all genre stats, weakest accuracy first (the side panel order).
pub fn get_genre_stats(conn: &Connection) -> Result<Vec<GenreStat>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT genre, total_questions, correct_answers, last_updated
    FROM genre_stats
    "#,
    )?;

    let mut stats = stmt
        .query_map([], row_to_genre_stat)?
        .collect::<Result<Vec<_>>>()?;

    stats.sort_by(|a, b| {
        a.accuracy()
            .partial_cmp(&b.accuracy())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(stats)
}

/// Convert a database row to GenreStat
fn row_to_genre_stat(row: &rusqlite::Row) -> Result<GenreStat> {
    let last_updated_str: Option<String> = row.get(3)?;

    Ok(GenreStat {
        genre: row.get(0)?,
        total_questions: row.get(1)?,
        correct_answers: row.get(2)?,
        last_updated: last_updated_str.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::testing::TestDb;

    fn stat(genre: &str, total: i64, correct: i64) -> GenreStat {
        GenreStat {
            genre: genre.to_string(),
            total_questions: total,
            correct_answers: correct,
            last_updated: None,
        }
    }

    #[test]
    fn test_accuracy_zero_attempts() {
        assert_eq!(stat("平安時代", 0, 0).accuracy(), 0.0);
    }

    #[test]
    fn test_accuracy_rounds_to_two_decimals() {
        assert_eq!(stat("平安時代", 3, 1).accuracy(), 33.33);
        assert_eq!(stat("平安時代", 3, 2).accuracy(), 66.67);
        assert_eq!(stat("平安時代", 4, 4).accuracy(), 100.0);
    }

    #[test]
    fn test_update_counts_attempts_and_corrects() {
        let db = TestDb::new().unwrap();
        let genre = "鎌倉時代";

        for _ in 0..3 {
            update_genre_stats(&db.conn, genre, true).unwrap();
        }
        for _ in 0..2 {
            update_genre_stats(&db.conn, genre, false).unwrap();
        }

        let stats = get_genre_stats(&db.conn).unwrap();
        let s = stats.iter().find(|s| s.genre == genre).unwrap();
        assert_eq!(s.total_questions, 5);
        assert_eq!(s.correct_answers, 3);
        assert!(s.correct_answers <= s.total_questions);
        assert!(s.last_updated.is_some());
    }

    #[test]
    fn test_update_unknown_genre_is_swallowed() {
        let db = TestDb::new().unwrap();

        update_genre_stats(&db.conn, "縄文銀河帝国", true).unwrap();

        // No row appeared, nothing was counted
        let stats = get_genre_stats(&db.conn).unwrap();
        assert_eq!(stats.len(), config::GENRES.len());
        assert!(stats.iter().all(|s| s.total_questions == 0));
    }

    #[test]
    fn test_reset_all_zeroes_counts_keeps_genres() {
        let db = TestDb::new().unwrap();
        update_genre_stats(&db.conn, "江戸時代", true).unwrap();
        update_genre_stats(&db.conn, "明治時代", false).unwrap();

        reset_all_genre_stats(&db.conn).unwrap();

        let stats = get_genre_stats(&db.conn).unwrap();
        assert_eq!(stats.len(), config::GENRES.len());
        for s in &stats {
            assert_eq!(s.total_questions, 0);
            assert_eq!(s.correct_answers, 0);
            assert_eq!(s.accuracy(), 0.0);
        }
    }

    #[test]
    fn test_get_genre_stats_sorted_weakest_first() {
        let db = TestDb::new().unwrap();
        // 江戸時代 100%, 明治時代 0%, everything else untouched at 0 attempts
        update_genre_stats(&db.conn, "江戸時代", true).unwrap();
        update_genre_stats(&db.conn, "明治時代", false).unwrap();

        let stats = get_genre_stats(&db.conn).unwrap();
        let accuracies: Vec<f64> = stats.iter().map(|s| s.accuracy()).collect();
        let mut sorted = accuracies.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(accuracies, sorted);
        assert_eq!(stats.last().unwrap().genre, "江戸時代");
    }
}
