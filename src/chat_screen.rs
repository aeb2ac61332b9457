use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::quiz::screen::{Navigator, Panel, Screen, ScreenName, TextWidget};

/// Whatever the controller last drew on a chat screen.
///
/// A chat can't redraw a widget in place, so the handlers read the frame
/// after the controller is done and turn it into messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lives_text: Option<String>,
    pub quiz_visible: Option<bool>,
    pub final_visible: Option<bool>,
    pub final_score_text: Option<String>,
}

impl Frame {
    pub fn shows_final_score(&self) -> bool {
        self.final_visible == Some(true)
    }

    /// The quiz panel counts as shown until something hides it.
    pub fn shows_quiz(&self) -> bool {
        self.quiz_visible != Some(false)
    }
}

type SharedFrame = Arc<Mutex<Frame>>;

fn lock(frame: &SharedFrame) -> MutexGuard<'_, Frame> {
    frame.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy)]
enum TextSlot {
    Lives,
    FinalScore,
}

struct FrameText {
    frame: SharedFrame,
    slot: TextSlot,
}

impl TextWidget for FrameText {
    fn set_text(&self, text: &str) {
        let mut frame = lock(&self.frame);
        match self.slot {
            TextSlot::Lives => frame.lives_text = Some(text.to_string()),
            TextSlot::FinalScore => frame.final_score_text = Some(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PanelSlot {
    Quiz,
    Final,
}

struct FramePanel {
    frame: SharedFrame,
    slot: PanelSlot,
}

impl Panel for FramePanel {
    fn set_active(&self, active: bool) {
        let mut frame = lock(&self.frame);
        match self.slot {
            PanelSlot::Quiz => frame.quiz_visible = Some(active),
            PanelSlot::Final => frame.final_visible = Some(active),
        }
    }
}

/// A screen loaded into a chat for the duration of one update.
pub struct ChatScreen {
    name: ScreenName,
    frame: SharedFrame,
    lives_text: Option<Arc<dyn TextWidget>>,
    quiz_panel: Option<Arc<dyn Panel>>,
    final_panel: Option<Arc<dyn Panel>>,
    final_score_text: Option<Arc<dyn TextWidget>>,
}

impl ChatScreen {
    pub fn main_menu() -> Arc<Self> {
        Arc::new(Self {
            name: ScreenName::MainMenu,
            frame: SharedFrame::default(),
            lives_text: None,
            quiz_panel: None,
            final_panel: None,
            final_score_text: None,
        })
    }

    pub fn quiz() -> Arc<Self> {
        let frame = SharedFrame::default();
        let text = |slot| -> Arc<dyn TextWidget> {
            Arc::new(FrameText {
                frame: frame.clone(),
                slot,
            })
        };
        let panel = |slot| -> Arc<dyn Panel> {
            Arc::new(FramePanel {
                frame: frame.clone(),
                slot,
            })
        };

        Arc::new(Self {
            name: ScreenName::Quiz,
            lives_text: Some(text(TextSlot::Lives)),
            quiz_panel: Some(panel(PanelSlot::Quiz)),
            final_panel: Some(panel(PanelSlot::Final)),
            final_score_text: Some(text(TextSlot::FinalScore)),
            frame,
        })
    }

    pub fn frame(&self) -> Frame {
        lock(&self.frame).clone()
    }
}

impl Screen for ChatScreen {
    fn name(&self) -> ScreenName {
        self.name
    }

    fn lives_text(&self) -> Option<Arc<dyn TextWidget>> {
        self.lives_text.clone()
    }

    fn quiz_panel(&self) -> Option<Arc<dyn Panel>> {
        self.quiz_panel.clone()
    }

    fn final_panel(&self) -> Option<Arc<dyn Panel>> {
        self.final_panel.clone()
    }

    fn final_score_text(&self) -> Option<Arc<dyn TextWidget>> {
        self.final_score_text.clone()
    }
}

/// Remembers which screen the controller asked for, so the handler can
/// switch the dialogue once it is done.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    pub requested: Option<ScreenName>,
}

impl Navigator for PendingNavigation {
    fn load_screen(&mut self, screen: ScreenName) {
        self.requested = Some(screen);
    }
}
