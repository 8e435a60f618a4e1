//! Relationship quizzes generated from the family graph.

pub mod generator;
pub mod models;

pub use generator::generate_quiz;
pub use models::{quiz_id, quiz_xp, Difficulty, QuestionType, QuizQuestion};
