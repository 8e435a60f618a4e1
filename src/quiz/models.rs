use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn xp_reward(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }

    pub fn time_limit_secs(&self) -> u32 {
        match self {
            Difficulty::Easy => 30,
            Difficulty::Medium => 20,
            Difficulty::Hard => 15,
        }
    }

    /// How many domain filler questions a quiz of this difficulty may
    /// carry; harder quizzes lean on relationship questions.
    pub fn domain_question_cap(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 3,
            Difficulty::Hard => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Parent,
    Child,
    Sibling,
    Spouse,
    Domain,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Parent => "Parent",
            QuestionType::Child => "Child",
            QuestionType::Sibling => "Sibling",
            QuestionType::Spouse => "Spouse/Consort",
            QuestionType::Domain => "Domain",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub deity_id: String,
    pub deity_name: String,
    pub question_type: QuestionType,
    pub question_text: String,
    pub correct_answer: String,
    pub correct_deity_id: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(&self.correct_answer)
    }
}

/// Identifier under which a quiz result is recorded, so mastery can
/// attribute scores to a pantheon.
pub fn quiz_id(pantheon_id: Option<&str>) -> String {
    format!("{}-relationships", pantheon_id.unwrap_or("all"))
}

/// Total XP for a finished quiz: base per correct answer, a 25% bonus
/// for a perfect run, a 15% bonus for playing against the clock. Both
/// bonuses floor.
pub fn quiz_xp(correct: u32, total: u32, difficulty: Difficulty, timed: bool) -> u32 {
    let base = correct * difficulty.xp_reward();
    let mut xp = base;
    if total > 0 && correct == total {
        xp += base * 25 / 100;
    }
    if timed {
        xp += base * 15 / 100;
    }
    xp
}
