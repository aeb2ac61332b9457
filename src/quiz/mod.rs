pub mod controller;
pub mod questions;
pub mod screen;

/// Lives a player starts every investigation with.
pub const STARTING_LIVES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub score: u32,
    pub lives: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            lives: STARTING_LIVES,
        }
    }
}

impl GameState {
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn phase(&self) -> Phase {
        if self.lives > 0 && self.current_index < self.questions.len() {
            Phase::Playing
        } else {
            Phase::GameOver
        }
    }
}

/// Progress a chat keeps between updates.
///
/// Questions are not part of it; they always come from the compiled-in
/// table when the game is restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SavedGame {
    pub current_index: usize,
    pub score: u32,
    pub lives: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub answers: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    pub fn new(text: &str, answers: &[&str], correct_index: usize) -> Self {
        Self {
            text: text.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            correct_index,
        }
    }

    /// Maps a chat reply to the index of the answer it picks.
    ///
    /// Accepts the answer text itself (case doesn't matter) or its 1-based
    /// position, so both keyboard buttons and typed numbers work.
    pub fn answer_index(&self, reply: &str) -> Option<usize> {
        let reply = reply.trim();
        if let Some(index) = self
            .answers
            .iter()
            .position(|a| a.to_lowercase() == reply.to_lowercase())
        {
            return Some(index);
        }

        match reply.parse::<usize>() {
            Ok(position) if position >= 1 && position <= self.answers.len() => Some(position - 1),
            _ => None,
        }
    }
}
