//! Learning history: list, single delete, delete-all.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::db::{self, LogOnError};
use crate::state::AppState;

use super::DB_UNAVAILABLE_MSG;
use super::templates::{HistoryRow, HistoryTemplate};

pub async fn history_page(State(state): State<AppState>) -> Response {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => {
      let template = HistoryTemplate {
        stats: Vec::new(),
        error: Some(DB_UNAVAILABLE_MSG.to_string()),
        entries: Vec::new(),
      };
      return Html(template.render().unwrap_or_default()).into_response();
    }
  };

  let entries = db::get_all_log_entries(&conn)
    .log_warn_default("Failed to load learning log")
    .into_iter()
    .map(|e| HistoryRow {
      id: e.id,
      timestamp: e.timestamp.format("%Y-%m-%d %H:%M").to_string(),
      question: e.question,
      user_answer: e.user_answer,
      correct_answer: e.correct_answer,
      is_correct: e.is_correct,
      genre: e.genre,
    })
    .collect();

  let template = HistoryTemplate {
    stats: super::load_stat_rows(&conn),
    error: None,
    entries,
  };
  Html(template.render().unwrap_or_default()).into_response()
}

/// Delete one entry. Genre stats keep the entry's contribution; only
/// delete-all resets them.
pub async fn history_delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
  match db::try_lock(&state.db) {
    Ok(conn) => {
      db::delete_log_entry(&conn, id).log_warn("Failed to delete log entry");
    }
    Err(e) => {
      tracing::warn!("Failed to delete log entry: {}", e);
    }
  }
  Redirect::to("/history").into_response()
}

/// Wipe the history and zero every genre's counters.
pub async fn history_delete_all(State(state): State<AppState>) -> Response {
  match db::try_lock(&state.db) {
    Ok(conn) => {
      db::delete_all_log_entries(&conn).log_warn("Failed to clear learning log");
    }
    Err(e) => {
      tracing::warn!("Failed to clear learning log: {}", e);
    }
  }
  Redirect::to("/history").into_response()
}
