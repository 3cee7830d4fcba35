pub mod history;
pub mod quiz;
pub mod templates;
pub mod written;

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use rusqlite::Connection;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config;
use crate::db::{self, LogOnError};
use crate::session;
use crate::state::AppState;

use templates::{IndexTemplate, StatRow};

pub use history::{history_delete, history_delete_all, history_page};
pub use quiz::{quiz_answer, quiz_generate, quiz_page};
pub use written::{written_answer, written_generate, written_page};

/// The full application router. Split out of main so request-level tests
/// can drive it without binding a socket.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/quiz", get(quiz_page))
    .route("/quiz/generate", post(quiz_generate))
    .route("/quiz/answer", post(quiz_answer))
    .route("/written", get(written_page))
    .route("/written/generate", post(written_generate))
    .route("/written/answer", post(written_answer))
    .route("/history", get(history_page))
    .route("/history/delete/{id}", post(history_delete))
    .route("/history/delete-all", post(history_delete_all))
    .nest_service("/static", ServeDir::new("static"))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Message rendered when the database mutex is poisoned
pub(crate) const DB_UNAVAILABLE_MSG: &str =
  "データベースを利用できません。ページを再読み込みしてください。";

/// Sidebar rows from already-loaded stats: genres with at least one
/// attempt, weakest first.
pub(crate) fn stat_rows(stats: Vec<db::GenreStat>) -> Vec<StatRow> {
  stats
    .into_iter()
    .filter(|s| s.total_questions > 0)
    .map(|s| StatRow {
      accuracy: format!("{:.2}", s.accuracy()),
      correct: s.correct_answers,
      total: s.total_questions,
      genre: s.genre,
    })
    .collect()
}

/// Sidebar rows straight from the database.
pub(crate) fn load_stat_rows(conn: &Connection) -> Vec<StatRow> {
  stat_rows(db::get_genre_stats(conn).log_warn_default("Failed to load genre stats"))
}

/// Get the session ID from the cookie, minting a cookie when absent.
/// Returns the (possibly updated) jar so the handler can send it back.
pub(crate) fn session_cookie(jar: CookieJar) -> (CookieJar, String) {
  if let Some(cookie) = jar.get(config::SESSION_COOKIE) {
    let id = cookie.value().to_string();
    (jar, id)
  } else {
    let id = session::generate_session_id();
    let cookie = Cookie::build((config::SESSION_COOKIE, id.clone()))
      .path("/")
      .http_only(true)
      .build();
    (jar.add(cookie), id)
  }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return Html(format!("<h1>{}</h1>", DB_UNAVAILABLE_MSG)),
  };

  let stats = db::get_genre_stats(&conn).log_warn_default("Failed to load genre stats");
  let total_answered: i64 = stats.iter().map(|s| s.total_questions).sum();
  let total_correct: i64 = stats.iter().map(|s| s.correct_answers).sum();

  let template = IndexTemplate {
    stats: stat_rows(stats),
    total_answered,
    total_correct,
  };

  Html(template.render().unwrap_or_default())
}
