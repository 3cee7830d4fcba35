//! Adaptive genre selection, biased toward weak genres.
//!
//! A genre is weak when its accuracy is below 50% and it has been attempted
//! at least once. With weak genres present, the next question is drawn from
//! them 70% of the time; the remaining 30% (and whenever nothing is weak)
//! falls back to a uniform draw over the full genre set.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config;
use crate::db::GenreStat;

/// Error for an empty genre set. The set is seeded at startup, so hitting
/// this means the database was not initialized.
#[derive(Debug)]
pub struct SelectionError;

impl std::fmt::Display for SelectionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "No genres configured - genre_stats table is empty")
  }
}

impl std::error::Error for SelectionError {}

/// Pick the genre for the next question.
pub fn select_genre(stats: &[GenreStat]) -> Result<String, SelectionError> {
  if stats.is_empty() {
    return Err(SelectionError);
  }

  let mut rng = rand::rng();

  let weak: Vec<&GenreStat> = stats
    .iter()
    .filter(|s| s.accuracy() < config::WEAK_ACCURACY_THRESHOLD && s.total_questions > 0)
    .collect();

  if !weak.is_empty() && rng.random_bool(config::WEAK_GENRE_BIAS) {
    let chosen = weak.choose(&mut rng).expect("weak set is non-empty");
    return Ok(chosen.genre.clone());
  }

  let chosen = stats.choose(&mut rng).expect("stats slice is non-empty");
  Ok(chosen.genre.clone())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stat(genre: &str, total: i64, correct: i64) -> GenreStat {
    GenreStat {
      genre: genre.to_string(),
      total_questions: total,
      correct_answers: correct,
      last_updated: None,
    }
  }

  #[test]
  fn test_empty_genre_set_is_an_error() {
    assert!(select_genre(&[]).is_err());
  }

  #[test]
  fn test_single_genre_always_selected() {
    let stats = vec![stat("江戸時代", 0, 0)];
    for _ in 0..20 {
      assert_eq!(select_genre(&stats).unwrap(), "江戸時代");
    }
  }

  #[test]
  fn test_selected_genre_is_always_a_member() {
    let stats = vec![
      stat("平安時代", 10, 1),
      stat("鎌倉時代", 10, 9),
      stat("江戸時代", 0, 0),
    ];
    for _ in 0..200 {
      let genre = select_genre(&stats).unwrap();
      assert!(stats.iter().any(|s| s.genre == genre));
    }
  }

  #[test]
  fn test_unattempted_genre_is_not_weak() {
    // 0/0 has accuracy 0 but no attempts, so there is no weak pool at all
    // and selection stays uniform over both genres.
    let stats = vec![stat("平安時代", 0, 0), stat("鎌倉時代", 20, 20)];
    let mut heian = 0;
    let trials = 10_000;
    for _ in 0..trials {
      if select_genre(&stats).unwrap() == "平安時代" {
        heian += 1;
      }
    }
    // Uniform draw over 2 genres: ~50%, nowhere near the 70% weak bias
    // plus fallback share (~85%) a weak genre would get.
    assert!((4_000..=6_000).contains(&heian), "got {heian} of {trials}");
  }

  #[test]
  fn test_weak_genre_bias_distribution() {
    // One weak genre (10% accuracy) among ten; the weak one should win
    // 70% of draws plus a 1-in-10 share of the uniform 30%: ~73%.
    let mut stats = vec![stat("平安時代", 10, 1)];
    for i in 0..9 {
      stats.push(stat(&format!("時代{}", i), 10, 9));
    }

    let trials = 10_000;
    let mut weak_hits = 0;
    for _ in 0..trials {
      if select_genre(&stats).unwrap() == "平安時代" {
        weak_hits += 1;
      }
    }

    let share = weak_hits as f64 / trials as f64;
    assert!(
      (0.60..=0.80).contains(&share),
      "weak genre selected {:.1}% of trials, expected 60-80%",
      share * 100.0
    );
  }
}
