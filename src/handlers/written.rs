//! Free-response quiz mode.
//!
//! Grading is literal comparison against the model answer; after answering,
//! the user's text and the model answer are shown side by side.

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::db;
use crate::domain::{LogEntry, QuizItem, QuizMode, WrittenQuiz};
use crate::generator;
use crate::quiz;
use crate::session::{self, AnswerOutcome, QuizSession};
use crate::state::AppState;

use super::quiz::{GENERATION_FAILED_MSG, MALFORMED_QUIZ_MSG, NO_QUESTION_MSG, persist_result};
use super::templates::{StatRow, WrittenAnswerForm, WrittenTemplate};
use super::{DB_UNAVAILABLE_MSG, session_cookie, stat_rows};

/// Render the written-quiz page from the current session state.
fn render_written(stats: Vec<StatRow>, sess: &QuizSession, error: Option<String>) -> Html<String> {
  let (question, genre, model_answer) = match &sess.current {
    Some(QuizItem::Written(q)) => (
      Some(q.question.clone()),
      q.genre.clone(),
      q.model_answer.clone(),
    ),
    _ => (None, String::new(), String::new()),
  };

  let (answered, is_correct, user_answer) = match &sess.outcome {
    Some(o) => (true, o.is_correct, o.user_answer.clone()),
    None => (false, false, String::new()),
  };

  let template = WrittenTemplate {
    stats,
    error,
    question,
    genre,
    answered,
    is_correct,
    model_answer,
    user_answer,
  };
  Html(template.render().unwrap_or_default())
}

pub async fn written_page(State(state): State<AppState>, jar: CookieJar) -> Response {
  let (jar, sid) = session_cookie(jar);
  let sess = session::get_session(&sid);

  let stats = match db::try_lock(&state.db) {
    Ok(conn) => super::load_stat_rows(&conn),
    Err(_) => {
      return (jar, render_written(Vec::new(), &sess, Some(DB_UNAVAILABLE_MSG.to_string())))
        .into_response();
    }
  };

  (jar, render_written(stats, &sess, None)).into_response()
}

pub async fn written_generate(State(state): State<AppState>, jar: CookieJar) -> Response {
  let (jar, sid) = session_cookie(jar);
  let sess = session::get_session(&sid);

  // Snapshot stats and release the lock before the (slow) model call.
  let full_stats = match db::try_lock(&state.db) {
    Ok(conn) => match db::get_genre_stats(&conn) {
      Ok(stats) => stats,
      Err(e) => {
        tracing::warn!("Failed to load genre stats: {}", e);
        return (jar, render_written(Vec::new(), &sess, Some(format!("データベース操作中にエラーが発生しました: {}", e)))).into_response();
      }
    },
    Err(_) => {
      return (jar, render_written(Vec::new(), &sess, Some(DB_UNAVAILABLE_MSG.to_string())))
        .into_response();
    }
  };

  let genre = match quiz::select_genre(&full_stats) {
    Ok(genre) => genre,
    Err(e) => {
      tracing::error!("genre selection failed: {}", e);
      return (
        jar,
        render_written(
          stat_rows(full_stats),
          &sess,
          Some("ジャンルが設定されていません。データベースを初期化してください。".to_string()),
        ),
      )
        .into_response();
    }
  };

  let text = match generator::generate_quiz_text(&state.generator, &genre, QuizMode::Written).await {
    Ok(text) => text,
    Err(e) => {
      tracing::warn!("question generation failed: {}", e);
      return (
        jar,
        render_written(stat_rows(full_stats), &sess, Some(GENERATION_FAILED_MSG.to_string())),
      )
        .into_response();
    }
  };

  let item = match quiz::parse_written(&text) {
    Ok(parsed) => QuizItem::Written(WrittenQuiz {
      question: parsed.question,
      model_answer: parsed.model_answer,
      genre: parsed.genre.unwrap_or(genre),
    }),
    Err(e) => {
      // Question discarded; the previous session state stays on screen.
      tracing::warn!("malformed quiz text: {}", e);
      return (
        jar,
        render_written(stat_rows(full_stats), &sess, Some(MALFORMED_QUIZ_MSG.to_string())),
      )
        .into_response();
    }
  };

  tracing::debug!("generated {} question for {}", item.mode().as_str(), item.genre());

  let sess = QuizSession::with_item(item);
  session::update_session(&sid, sess.clone());

  (jar, render_written(stat_rows(full_stats), &sess, None)).into_response()
}

pub async fn written_answer(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<WrittenAnswerForm>,
) -> Response {
  let (jar, sid) = session_cookie(jar);
  let mut sess = session::get_session(&sid);

  let Some(QuizItem::Written(item)) = sess.current.clone() else {
    let stats = match db::try_lock(&state.db) {
      Ok(conn) => super::load_stat_rows(&conn),
      Err(_) => Vec::new(),
    };
    return (jar, render_written(stats, &sess, Some(NO_QUESTION_MSG.to_string()))).into_response();
  };

  // A re-submitted form (double post, back button) changes nothing.
  if !sess.has_answered() {
    let is_correct = quiz::evaluate_written(&form.answer, &item.model_answer);

    let entry = LogEntry::new(
      item.question.clone(),
      form.answer.clone(),
      item.model_answer.clone(),
      is_correct,
      item.genre.clone(),
    );

    let store_error = persist_result(&state, &entry);

    sess.outcome = Some(AnswerOutcome {
      user_answer: form.answer,
      is_correct,
    });
    session::update_session(&sid, sess.clone());

    let stats = match db::try_lock(&state.db) {
      Ok(conn) => super::load_stat_rows(&conn),
      Err(_) => Vec::new(),
    };
    // The banner is shown even when the write failed.
    return (jar, render_written(stats, &sess, store_error)).into_response();
  }

  let stats = match db::try_lock(&state.db) {
    Ok(conn) => super::load_stat_rows(&conn),
    Err(_) => Vec::new(),
  };
  (jar, render_written(stats, &sess, None)).into_response()
}
