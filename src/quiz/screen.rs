use std::fmt;
use std::sync::Arc;

/// Screens the host knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenName {
    MainMenu,
    Quiz,
}

impl ScreenName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenName::MainMenu => "MainMenu",
            ScreenName::Quiz => "Quiz",
        }
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait TextWidget: Send + Sync {
    fn set_text(&self, text: &str);
}

pub trait Panel: Send + Sync {
    fn set_active(&self, active: bool);
}

/// A loaded screen, offering the widgets the quiz controller drives.
///
/// The screen owns its widgets. The controller only keeps weak handles, so
/// once a screen is dropped its widgets count as unbound again and are
/// resolved from whichever screen loads next.
pub trait Screen: Send + Sync {
    fn name(&self) -> ScreenName;

    fn lives_text(&self) -> Option<Arc<dyn TextWidget>> {
        None
    }

    fn quiz_panel(&self) -> Option<Arc<dyn Panel>> {
        None
    }

    fn final_panel(&self) -> Option<Arc<dyn Panel>> {
        None
    }

    /// Lives inside the final panel; only asked for once that panel is bound.
    fn final_score_text(&self) -> Option<Arc<dyn TextWidget>> {
        None
    }
}

/// Loads screens on request. Requests are fire-and-forget.
pub trait Navigator {
    fn load_screen(&mut self, screen: ScreenName);
}
