pub mod log;
pub mod quiz;

pub use log::LogEntry;
pub use quiz::{ChoiceQuiz, QuizItem, QuizMode, WrittenQuiz};
