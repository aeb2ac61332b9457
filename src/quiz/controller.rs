use std::sync::{Arc, Weak};

use log::{debug, error, info, warn};

use crate::quiz::questions::detective_questions;
use crate::quiz::screen::{Navigator, Panel, Screen, ScreenName, TextWidget};
use crate::quiz::{GameState, Phase, Question, SavedGame, STARTING_LIVES};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("no lives remaining, the investigation is over")]
    OutOfLives,
    #[error("no question at index {index} (total questions: {total})")]
    NoCurrentQuestion { index: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub phase: Phase,
}

// Weak so that widgets die with their screen and get rebound on the next load
#[derive(Default)]
struct Widgets {
    lives_text: Option<Weak<dyn TextWidget>>,
    quiz_panel: Option<Weak<dyn Panel>>,
    final_panel: Option<Weak<dyn Panel>>,
    final_score_text: Option<Weak<dyn TextWidget>>,
}

fn bound<T: ?Sized>(slot: &Option<Weak<T>>) -> Option<Arc<T>> {
    slot.as_ref().and_then(Weak::upgrade)
}

/// Runs one investigation: questions, score, lives and the two quiz panels.
///
/// The controller is owned by whoever hosts the game and outlives the
/// screens it draws on. Every time the host loads a screen it calls
/// [`QuizController::on_screen_loaded`], and the controller binds whatever
/// widgets it is still missing.
pub struct QuizController {
    state: GameState,
    screen: Option<Weak<dyn Screen>>,
    widgets: Widgets,
}

impl QuizController {
    pub fn new() -> Self {
        Self::from_state(GameState::default())
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            screen: None,
            widgets: Widgets::default(),
        }
    }

    /// Restores a chat's game on top of the compiled-in question table.
    pub fn from_saved(saved: SavedGame) -> Self {
        Self::from_state(GameState {
            questions: detective_questions(),
            current_index: saved.current_index,
            score: saved.score,
            lives: saved.lives,
        })
    }

    pub fn save(&self) -> SavedGame {
        SavedGame {
            current_index: self.state.current_index,
            score: self.state.score,
            lives: self.state.lives,
        }
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn total_questions(&self) -> usize {
        self.state.questions.len()
    }

    pub fn get_current_question_index(&self) -> usize {
        self.state.current_index
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase() == Phase::GameOver
    }

    pub fn get_current_question(&self) -> Option<&Question> {
        if self.state.questions.is_empty() {
            warn!("No questions available.");
            return None;
        }

        let question = self.state.current_question();
        if question.is_none() {
            warn!(
                "Invalid question index: {}. Total questions: {}",
                self.state.current_index,
                self.state.questions.len()
            );
        }
        question
    }

    pub fn submit_answer(&mut self, selected: usize) -> Result<AnswerOutcome, QuizError> {
        if self.state.lives == 0 {
            warn!("Answer {} ignored: no lives remaining", selected);
            return Err(QuizError::OutOfLives);
        }

        let index = self.state.current_index;
        let total = self.state.questions.len();
        let Some(question) = self.state.questions.get(index) else {
            warn!("Answer {} ignored: no question at index {}", selected, index);
            return Err(QuizError::NoCurrentQuestion { index, total });
        };

        let correct = selected == question.correct_index;
        if correct {
            self.state.score += 1;
            info!("Correct! Score: {}", self.state.score);
        } else {
            self.lose_life();
        }

        self.next_question();

        Ok(AnswerOutcome {
            correct,
            phase: self.phase(),
        })
    }

    fn lose_life(&mut self) {
        self.state.lives = self.state.lives.saturating_sub(1);
        info!("Wrong answer! Lives remaining: {}", self.state.lives);

        self.update_lives_ui();

        if self.state.lives == 0 {
            self.end_game();
        }
    }

    fn next_question(&mut self) {
        // Game already ended on the last life, the index stays put
        if self.state.lives == 0 {
            return;
        }

        self.state.current_index += 1;
        debug!("Next question: {}", self.state.current_index);

        match self.state.current_question() {
            Some(question) => debug!("Next question text: {}", question.text),
            None => self.end_game(),
        }
    }

    pub fn update_lives_ui(&self) {
        match bound(&self.widgets.lives_text) {
            Some(lives_text) => lives_text.set_text(&format!("Lives: {}", self.state.lives)),
            None => warn!("Lives text is not bound."),
        }
    }

    fn end_game(&self) {
        info!("Game over! Score: {}", self.state.score);

        if let Some(quiz_panel) = bound(&self.widgets.quiz_panel) {
            quiz_panel.set_active(false);
        }

        if let Some(final_panel) = bound(&self.widgets.final_panel) {
            final_panel.set_active(true);
        }

        if let Some(final_score_text) = bound(&self.widgets.final_score_text) {
            final_score_text.set_text(&format!(
                "Final Score: {}/{}",
                self.state.score,
                self.state.questions.len()
            ));
        }
    }

    pub fn return_to_menu(&self, navigator: &mut dyn Navigator) {
        info!("Returning to {}", ScreenName::MainMenu);
        navigator.load_screen(ScreenName::MainMenu);
    }

    pub fn reset_game(&mut self) {
        self.state.questions.clear();
        self.state.current_index = 0;
        self.state.score = 0;
        self.state.lives = STARTING_LIVES;

        self.state.questions = detective_questions();

        info!(
            "Game reset: lives = {}, score = {}, current question = {}, total questions = {}",
            self.state.lives,
            self.state.score,
            self.state.current_index,
            self.state.questions.len()
        );

        self.reassign_references();
        self.update_lives_ui();
    }

    /// Called by the host every time it finishes loading a screen.
    ///
    /// Only a weak handle is kept, the caller decides how long the screen lives.
    pub fn on_screen_loaded(&mut self, screen: Arc<dyn Screen>) {
        info!("Screen loaded: {}", screen.name());

        self.screen = Some(Arc::downgrade(&screen));
        self.reassign_references();

        debug!(
            "Bindings after {}: lives text {}, quiz panel {}, final panel {}, final score text {}",
            screen.name(),
            bound(&self.widgets.lives_text).is_some(),
            bound(&self.widgets.quiz_panel).is_some(),
            bound(&self.widgets.final_panel).is_some(),
            bound(&self.widgets.final_score_text).is_some(),
        );
    }

    /// Binds every widget that is still unset from the registered screen.
    ///
    /// Widgets that are already bound (and whose screen is still alive) are
    /// left alone. Missing widgets are logged and simply not drawn.
    pub fn reassign_references(&mut self) {
        let Some(screen) = bound(&self.screen) else {
            error!("No screen is loaded, quiz widgets stay unbound.");
            self.update_lives_ui();
            return;
        };
        let name = screen.name();

        if bound(&self.widgets.lives_text).is_none() {
            self.widgets.lives_text = screen.lives_text().map(|w| Arc::downgrade(&w));
            if self.widgets.lives_text.is_none() {
                error!("Failed to find the lives text on screen {}.", name);
            }
        }

        if bound(&self.widgets.quiz_panel).is_none() {
            self.widgets.quiz_panel = screen.quiz_panel().map(|w| Arc::downgrade(&w));
            if self.widgets.quiz_panel.is_none() {
                error!("Failed to find the quiz panel on screen {}.", name);
            }
        }

        if bound(&self.widgets.final_panel).is_none() {
            self.widgets.final_panel = screen.final_panel().map(|w| Arc::downgrade(&w));
            if self.widgets.final_panel.is_none() {
                error!("Failed to find the final panel on screen {}.", name);
            }
        }

        if bound(&self.widgets.final_score_text).is_none()
            && bound(&self.widgets.final_panel).is_some()
        {
            self.widgets.final_score_text = screen.final_score_text().map(|w| Arc::downgrade(&w));
            if self.widgets.final_score_text.is_none() {
                error!("Failed to find the final score text under the final panel on screen {}.", name);
            }
        }

        self.update_lives_ui();
    }
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new()
    }
}
