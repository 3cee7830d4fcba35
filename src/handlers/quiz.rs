//! Multiple-choice quiz mode.

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::db;
use crate::domain::{ChoiceQuiz, LogEntry, QuizItem, QuizMode};
use crate::generator;
use crate::quiz;
use crate::session::{self, AnswerOutcome, QuizSession};
use crate::state::AppState;

use super::templates::{ChoiceAnswerForm, QuizTemplate, StatRow};
use super::{DB_UNAVAILABLE_MSG, session_cookie, stat_rows};

pub(crate) const GENERATION_FAILED_MSG: &str =
  "問題の生成に失敗しました。もう一度お試しください。";
pub(crate) const MALFORMED_QUIZ_MSG: &str =
  "問題の形式が正しくありません。もう一度生成してください。";
pub(crate) const NO_QUESTION_MSG: &str =
  "問題がありません。「新しい問題を生成」をクリックしてください。";

/// Render the quiz page from the current session state.
fn render_quiz(stats: Vec<StatRow>, sess: &QuizSession, error: Option<String>) -> Html<String> {
  let (question, options, genre, correct_option) = match &sess.current {
    Some(QuizItem::Choice(q)) => (
      Some(q.question.clone()),
      q.options.clone(),
      q.genre.clone(),
      q.correct_option().to_string(),
    ),
    _ => (None, Vec::new(), String::new(), String::new()),
  };

  let (answered, is_correct, user_answer) = match &sess.outcome {
    Some(o) => (true, o.is_correct, o.user_answer.clone()),
    None => (false, false, String::new()),
  };

  let template = QuizTemplate {
    stats,
    error,
    question,
    options,
    genre,
    answered,
    is_correct,
    correct_option,
    user_answer,
  };
  Html(template.render().unwrap_or_default())
}

pub async fn quiz_page(State(state): State<AppState>, jar: CookieJar) -> Response {
  let (jar, sid) = session_cookie(jar);
  let sess = session::get_session(&sid);

  let stats = match db::try_lock(&state.db) {
    Ok(conn) => super::load_stat_rows(&conn),
    Err(_) => {
      return (jar, render_quiz(Vec::new(), &sess, Some(DB_UNAVAILABLE_MSG.to_string())))
        .into_response();
    }
  };

  (jar, render_quiz(stats, &sess, None)).into_response()
}

pub async fn quiz_generate(State(state): State<AppState>, jar: CookieJar) -> Response {
  let (jar, sid) = session_cookie(jar);
  let sess = session::get_session(&sid);

  // Snapshot stats and release the lock before the (slow) model call.
  let full_stats = match db::try_lock(&state.db) {
    Ok(conn) => match db::get_genre_stats(&conn) {
      Ok(stats) => stats,
      Err(e) => {
        tracing::warn!("Failed to load genre stats: {}", e);
        return (jar, render_quiz(Vec::new(), &sess, Some(format!("データベース操作中にエラーが発生しました: {}", e)))).into_response();
      }
    },
    Err(_) => {
      return (jar, render_quiz(Vec::new(), &sess, Some(DB_UNAVAILABLE_MSG.to_string())))
        .into_response();
    }
  };

  let genre = match quiz::select_genre(&full_stats) {
    Ok(genre) => genre,
    Err(e) => {
      tracing::error!("genre selection failed: {}", e);
      return (
        jar,
        render_quiz(
          stat_rows(full_stats),
          &sess,
          Some("ジャンルが設定されていません。データベースを初期化してください。".to_string()),
        ),
      )
        .into_response();
    }
  };

  let text = match generator::generate_quiz_text(&state.generator, &genre, QuizMode::MultipleChoice).await
  {
    Ok(text) => text,
    Err(e) => {
      tracing::warn!("question generation failed: {}", e);
      return (
        jar,
        render_quiz(stat_rows(full_stats), &sess, Some(GENERATION_FAILED_MSG.to_string())),
      )
        .into_response();
    }
  };

  let item = match quiz::parse_multiple_choice(&text) {
    Ok(parsed) => QuizItem::Choice(ChoiceQuiz {
      question: parsed.question,
      options: parsed.options,
      correct_index: parsed.correct_index,
      genre: parsed.genre.unwrap_or(genre),
    }),
    Err(e) => {
      // Question discarded; the previous session state stays on screen.
      tracing::warn!("malformed quiz text: {}", e);
      return (
        jar,
        render_quiz(stat_rows(full_stats), &sess, Some(MALFORMED_QUIZ_MSG.to_string())),
      )
        .into_response();
    }
  };

  tracing::debug!("generated {} question for {}", item.mode().as_str(), item.genre());

  let sess = QuizSession::with_item(item);
  session::update_session(&sid, sess.clone());

  (jar, render_quiz(stat_rows(full_stats), &sess, None)).into_response()
}

pub async fn quiz_answer(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<ChoiceAnswerForm>,
) -> Response {
  let (jar, sid) = session_cookie(jar);
  let mut sess = session::get_session(&sid);

  let Some(QuizItem::Choice(item)) = sess.current.clone() else {
    let stats = match db::try_lock(&state.db) {
      Ok(conn) => super::load_stat_rows(&conn),
      Err(_) => Vec::new(),
    };
    return (jar, render_quiz(stats, &sess, Some(NO_QUESTION_MSG.to_string()))).into_response();
  };

  // A re-submitted form (double post, back button) changes nothing.
  if !sess.has_answered() {
    let is_correct = quiz::evaluate_choice(form.answer, item.correct_index);
    let user_answer = match form.answer.checked_sub(1).and_then(|i| item.options.get(i)) {
      Some(text) => text.clone(),
      None => form.answer.to_string(),
    };

    let entry = LogEntry::new(
      item.question.clone(),
      user_answer.clone(),
      item.correct_option().to_string(),
      is_correct,
      item.genre.clone(),
    );

    let store_error = persist_result(&state, &entry);

    sess.outcome = Some(AnswerOutcome { user_answer, is_correct });
    session::update_session(&sid, sess.clone());

    let stats = match db::try_lock(&state.db) {
      Ok(conn) => super::load_stat_rows(&conn),
      Err(_) => Vec::new(),
    };
    // The banner is shown even when the write failed.
    return (jar, render_quiz(stats, &sess, store_error)).into_response();
  }

  let stats = match db::try_lock(&state.db) {
    Ok(conn) => super::load_stat_rows(&conn),
    Err(_) => Vec::new(),
  };
  (jar, render_quiz(stats, &sess, None)).into_response()
}

/// Append the log row and bump the genre stats. Returns a user-visible
/// message on failure instead of propagating: the in-progress result is
/// still rendered.
pub(crate) fn persist_result(state: &AppState, entry: &LogEntry) -> Option<String> {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return Some(DB_UNAVAILABLE_MSG.to_string()),
  };

  let result = db::insert_log_entry(&conn, entry)
    .and_then(|_| db::update_genre_stats(&conn, &entry.genre, entry.is_correct));

  match result {
    Ok(()) => None,
    Err(e) => {
      tracing::warn!("Failed to persist answer: {}", e);
      Some(format!("データベース操作中にエラーが発生しました: {}", e))
    }
  }
}
