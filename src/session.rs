//! Simple in-memory session storage for quiz state.
//!
//! Stores QuizSession values keyed by session ID (from cookie). Handlers
//! read the session value at the start of an action and write the updated
//! value back at the end; the keyed store is the only shared state.
//! Sessions auto-expire after a configurable duration of inactivity.

use crate::config;
use crate::domain::QuizItem;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

/// Result of the answer that was just submitted, kept so the page can keep
/// showing the banner and the disabled form after the POST round-trip.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
  pub user_answer: String,
  pub is_correct: bool,
}

/// Per-session quiz state: the question on screen and, once answered, the
/// outcome. Replaced wholesale on every generate/answer action.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
  pub current: Option<QuizItem>,
  pub outcome: Option<AnswerOutcome>,
}

impl QuizSession {
  pub fn has_answered(&self) -> bool {
    self.outcome.is_some()
  }

  /// Fresh session holding a newly generated question.
  pub fn with_item(item: QuizItem) -> Self {
    Self {
      current: Some(item),
      outcome: None,
    }
  }
}

/// Session entry with last access time for expiration
struct SessionEntry {
  session: QuizSession,
  last_access: DateTime<Utc>,
}

/// Global session store
static SESSIONS: LazyLock<Mutex<HashMap<String, SessionEntry>>> =
  LazyLock::new(|| Mutex::new(HashMap::new()));

/// Get or create a session for the given ID
pub fn get_session(session_id: &str) -> QuizSession {
  let mut sessions = SESSIONS.lock().expect("Session store lock poisoned");

  // Clean up expired sessions occasionally (~10% chance)
  if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
    cleanup_expired(&mut sessions);
  }

  // Get existing or create new
  if let Some(entry) = sessions.get_mut(session_id) {
    entry.last_access = Utc::now();
    entry.session.clone()
  } else {
    let session = QuizSession::default();
    sessions.insert(
      session_id.to_string(),
      SessionEntry {
        session: session.clone(),
        last_access: Utc::now(),
      },
    );
    session
  }
}

/// Update a session
pub fn update_session(session_id: &str, session: QuizSession) {
  let mut sessions = SESSIONS.lock().expect("Session store lock poisoned");
  sessions.insert(
    session_id.to_string(),
    SessionEntry {
      session,
      last_access: Utc::now(),
    },
  );
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>) {
  let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
  sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
