mod chat_screen;
mod config;
mod quiz;

use std::sync::Arc;

use chat_screen::{ChatScreen, Frame, PendingNavigation};
use config::Config;
use log::{debug, error, info, warn};
use quiz::{controller::QuizController, screen::ScreenName, Question, SavedGame};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    MainMenu,
    Quiz {
        game: SavedGame,
    },
    FinalScore {
        game: SavedGame,
    },
}

type QuizStorage = Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    pretty_env_logger::init();
    if !dotenv_loaded {
        debug!("No .env file found, using the process environment");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    info!("Starting detective quiz bot...");
    let bot = Bot::new(config.bot_token.clone());

    info!("Opening dialogue storage at {}", config.database_path);
    let storage: QuizStorage = match SqliteStorage::open(&config.database_path, Json).await {
        Ok(storage) => storage.erase(),
        Err(e) => {
            error!("Failed to open dialogue storage: {}", e);
            return;
        }
    };
    info!("Dialogue storage ready");

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::MainMenu].endpoint(main_menu))
            .branch(dptree::case![State::Quiz { game }].endpoint(quiz))
            .branch(dptree::case![State::FinalScore { game }].endpoint(final_score)),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Good evening, detective. A woman was found dead last night and you were first on the scene. Let's see how much you remember.";
const START_GAME: &str = "Start investigation";
const PLAY_AGAIN: &str = "Play again";
const MAIN_MENU: &str = "Main menu";

fn menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(START_GAME)]])
}

fn final_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(PLAY_AGAIN),
        KeyboardButton::new(MAIN_MENU),
    ]])
}

fn answers_keyboard(question: &Question) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = question
        .answers
        .iter()
        .map(|a| vec![KeyboardButton::new(a.clone())])
        .collect();
    rows.push(vec![KeyboardButton::new(MAIN_MENU)]);
    KeyboardMarkup::new(rows)
}

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(menu_keyboard())
        .await?;

    dialogue.update(State::MainMenu).await?;
    Ok(())
}

async fn main_menu(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    match msg.text() {
        Some(START_GAME) => begin_investigation(&bot, &dialogue, msg.chat.id).await,
        _ => {
            bot.send_message(msg.chat.id, "Please choose one of the options")
                .reply_markup(menu_keyboard())
                .await?;
            Ok(())
        }
    }
}

async fn begin_investigation(bot: &Bot, dialogue: &QuizDialogue, chat_id: ChatId) -> HandlerResult {
    let screen = ChatScreen::quiz();
    let mut controller = QuizController::new();
    controller.on_screen_loaded(screen.clone());
    controller.reset_game();

    bot.send_message(chat_id, "Let's begin!").await?;
    show_quiz_screen(bot, dialogue, chat_id, screen.frame(), &controller).await
}

/// Sends whatever the quiz screen shows now: the next question, or the final
/// score once the final panel is up.
async fn show_quiz_screen(
    bot: &Bot,
    dialogue: &QuizDialogue,
    chat_id: ChatId,
    frame: Frame,
    controller: &QuizController,
) -> HandlerResult {
    if frame.shows_final_score() || !frame.shows_quiz() || controller.is_game_over() {
        let text = frame.final_score_text.unwrap_or_else(|| {
            format!(
                "The investigation is over. Final Score: {}/{}",
                controller.score(),
                controller.total_questions()
            )
        });
        bot.send_message(chat_id, text)
            .reply_markup(final_keyboard())
            .await?;

        dialogue
            .update(State::FinalScore {
                game: controller.save(),
            })
            .await?;
        return Ok(());
    }

    let Some(question) = controller.get_current_question() else {
        warn!("Chat {} has no open question, sending it back to the menu", chat_id.0);
        bot.send_message(chat_id, "This investigation has no open questions.")
            .reply_markup(menu_keyboard())
            .await?;
        dialogue.update(State::MainMenu).await?;
        return Ok(());
    };

    let mut question_text = format!(
        "Question #{}/{}:\n{}",
        controller.get_current_question_index() + 1,
        controller.total_questions(),
        question.text
    );
    if let Some(lives_text) = frame.lives_text {
        question_text.push_str("\n\n");
        question_text.push_str(&lives_text);
    }

    bot.send_message(chat_id, question_text)
        .reply_markup(answers_keyboard(question))
        .await?;

    dialogue
        .update(State::Quiz {
            game: controller.save(),
        })
        .await?;
    Ok(())
}

async fn return_to_menu(
    bot: &Bot,
    dialogue: &QuizDialogue,
    chat_id: ChatId,
    controller: &mut QuizController,
) -> HandlerResult {
    let mut navigation = PendingNavigation::default();
    controller.return_to_menu(&mut navigation);

    if navigation.requested == Some(ScreenName::MainMenu) {
        let menu = ChatScreen::main_menu();
        controller.on_screen_loaded(menu.clone());

        bot.send_message(chat_id, "Back at the precinct.")
            .reply_markup(menu_keyboard())
            .await?;
        dialogue.update(State::MainMenu).await?;
    }
    Ok(())
}

async fn quiz(bot: Bot, dialogue: QuizDialogue, game: SavedGame, msg: Message) -> HandlerResult {
    let screen = ChatScreen::quiz();
    let mut controller = QuizController::from_saved(game);
    controller.on_screen_loaded(screen.clone());

    if msg.text() == Some(MAIN_MENU) {
        return return_to_menu(&bot, &dialogue, msg.chat.id, &mut controller).await;
    }

    if controller.is_game_over() {
        return show_quiz_screen(&bot, &dialogue, msg.chat.id, screen.frame(), &controller).await;
    }

    let Some(question) = controller.get_current_question() else {
        bot.send_message(msg.chat.id, "This investigation has no open questions.")
            .reply_markup(menu_keyboard())
            .await?;
        dialogue.update(State::MainMenu).await?;
        return Ok(());
    };

    let Some(selected) = msg.text().and_then(|reply| question.answer_index(reply)) else {
        bot.send_message(msg.chat.id, "Please choose one of the answers")
            .reply_markup(answers_keyboard(question))
            .await?;
        return Ok(());
    };

    let feedback = match controller.submit_answer(selected) {
        Ok(outcome) => {
            debug!("Chat {} answered {}, now {:?}", msg.chat.id.0, selected, outcome.phase);
            if outcome.correct {
                "Correct!".to_string()
            } else {
                format!("Wrong answer! Lives remaining: {}", controller.lives())
            }
        }
        Err(e) => {
            warn!("Answer from chat {} ignored: {}", msg.chat.id.0, e);
            bot.send_message(msg.chat.id, "That answer can't be taken anymore.")
                .await?;
            return Ok(());
        }
    };
    bot.send_message(msg.chat.id, feedback).await?;

    show_quiz_screen(&bot, &dialogue, msg.chat.id, screen.frame(), &controller).await
}

async fn final_score(
    bot: Bot,
    dialogue: QuizDialogue,
    game: SavedGame,
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(PLAY_AGAIN) => begin_investigation(&bot, &dialogue, msg.chat.id).await,
        Some(MAIN_MENU) => {
            let mut controller = QuizController::from_saved(game);
            return_to_menu(&bot, &dialogue, msg.chat.id, &mut controller).await
        }
        _ => {
            bot.send_message(msg.chat.id, "Please choose one of the options")
                .reply_markup(final_keyboard())
                .await?;
            Ok(())
        }
    }
}
