use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Idempotent: every statement is IF NOT EXISTS, safe on every startup
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS learning_log (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      timestamp TEXT NOT NULL,
      question TEXT NOT NULL,
      user_answer TEXT NOT NULL,
      correct_answer TEXT NOT NULL,
      is_correct INTEGER NOT NULL,
      genre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS genre_stats (
      genre TEXT PRIMARY KEY,
      total_questions INTEGER NOT NULL DEFAULT 0,
      correct_answers INTEGER NOT NULL DEFAULT 0,
      last_updated TEXT
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_learning_log_timestamp ON learning_log(timestamp);
    CREATE INDEX IF NOT EXISTS idx_learning_log_genre ON learning_log(genre);
    "#,
  )?;

  Ok(())
}
