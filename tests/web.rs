//! Request-level tests of the web layer. These exercise routing, session
//! cookies and the history flow; question generation itself needs a live
//! API key and is not driven here.

use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use tempfile::TempDir;

use rekishi_quiz::domain::LogEntry;
use rekishi_quiz::generator::GeminiClient;
use rekishi_quiz::state::AppState;
use rekishi_quiz::{db, handlers};

fn test_state(temp: &TempDir) -> AppState {
  let pool = db::init_db(&temp.path().join("learning_log.db")).unwrap();
  {
    let conn = pool.lock().unwrap();
    db::seed_genres(&conn).unwrap();
  }
  AppState::new(pool, Arc::new(GeminiClient::new("test-key".to_string())))
}

fn sample_entry() -> LogEntry {
  LogEntry::new(
    "鎌倉幕府の成立年は？".to_string(),
    "1185年".to_string(),
    "1192年".to_string(),
    false,
    "鎌倉時代".to_string(),
  )
}

#[tokio::test]
async fn index_page_renders() {
  let temp = TempDir::new().unwrap();
  let server = TestServer::new(handlers::router(test_state(&temp))).unwrap();

  let res = server.get("/").await;
  res.assert_status_ok();
  let body = res.text();
  assert!(body.contains("歴史クイズ"));
  assert!(body.contains("4択クイズ"));
  assert!(body.contains("学習ログ"));
}

#[tokio::test]
async fn quiz_page_sets_session_cookie() {
  let temp = TempDir::new().unwrap();
  let server = TestServer::new(handlers::router(test_state(&temp))).unwrap();

  let res = server.get("/quiz").await;
  res.assert_status_ok();
  let cookie = res.cookie("quiz_session");
  assert_eq!(cookie.value().len(), 32);
  assert!(res.text().contains("新しい問題を生成"));
}

#[tokio::test]
async fn answering_without_a_question_is_handled() {
  let temp = TempDir::new().unwrap();
  let server = TestServer::new(handlers::router(test_state(&temp))).unwrap();

  let res = server
    .post("/quiz/answer")
    .form(&[("answer", "2")])
    .await;
  res.assert_status_ok();
  assert!(res.text().contains("問題がありません"));
}

#[tokio::test]
async fn history_lists_entries_newest_first() {
  let temp = TempDir::new().unwrap();
  let state = test_state(&temp);
  {
    let conn = state.db.lock().unwrap();
    db::insert_log_entry(&conn, &sample_entry()).unwrap();
  }
  let server = TestServer::new(handlers::router(state)).unwrap();

  let res = server.get("/history").await;
  res.assert_status_ok();
  let body = res.text();
  assert!(body.contains("鎌倉幕府の成立年は？"));
  assert!(body.contains("1185年"));
  assert!(body.contains("不正解"));
}

#[tokio::test]
async fn delete_all_clears_history_and_stats() {
  let temp = TempDir::new().unwrap();
  let state = test_state(&temp);
  {
    let conn = state.db.lock().unwrap();
    db::insert_log_entry(&conn, &sample_entry()).unwrap();
    db::update_genre_stats(&conn, "鎌倉時代", false).unwrap();
  }
  let db_handle = state.db.clone();
  let server = TestServer::new(handlers::router(state)).unwrap();

  let res = server.post("/history/delete-all").await;
  res.assert_status(StatusCode::SEE_OTHER);

  let res = server.get("/history").await;
  assert!(res.text().contains("学習履歴はまだありません"));

  let conn = db_handle.lock().unwrap();
  let stats = db::get_genre_stats(&conn).unwrap();
  assert!(stats.iter().all(|s| s.total_questions == 0));
}

#[tokio::test]
async fn delete_one_removes_only_that_entry() {
  let temp = TempDir::new().unwrap();
  let state = test_state(&temp);
  let id = {
    let conn = state.db.lock().unwrap();
    let keep = LogEntry::new(
      "残す問題".to_string(),
      "A".to_string(),
      "A".to_string(),
      true,
      "江戸時代".to_string(),
    );
    db::insert_log_entry(&conn, &keep).unwrap();
    db::insert_log_entry(&conn, &sample_entry()).unwrap()
  };
  let server = TestServer::new(handlers::router(state)).unwrap();

  let res = server.post(&format!("/history/delete/{}", id)).await;
  res.assert_status(StatusCode::SEE_OTHER);

  let body = server.get("/history").await.text();
  assert!(!body.contains("鎌倉幕府の成立年は？"));
  assert!(body.contains("残す問題"));
}
