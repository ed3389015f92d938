//! Render state - data structure sent from App layer to UI for rendering

use crate::constants::LOADING_TEXT;
use crate::messages::ui_events::InputMode;
use crate::models::{Friend, Language, Repository, View};

/// Loading indicator frame at snapshot time
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub text: String,
    /// 0..100, decorative
    pub progress: f64,
}

impl Default for IndicatorFrame {
    fn default() -> Self {
        IndicatorFrame {
            text: String::from(LOADING_TEXT),
            progress: 0.0,
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub active_view: View,
    pub show_help: bool,

    // Repos view
    pub language: Language,
    pub repos: Vec<Repository>,
    pub repos_loading: bool,
    pub repos_indicator: IndicatorFrame,

    // Friends view
    pub friends: Vec<Friend>,
    pub friends_loading: bool,
    pub friends_indicator: IndicatorFrame,
    /// Index into `friends` of the highlighted entry
    pub selected_friend: Option<usize>,
    pub friend_input: String,
    pub input_mode: InputMode,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_view: View::Repos,
            show_help: false,
            language: Language::All,
            repos: Vec::new(),
            repos_loading: true,
            repos_indicator: IndicatorFrame::default(),
            friends: Vec::new(),
            friends_loading: true,
            friends_indicator: IndicatorFrame::default(),
            selected_friend: None,
            friend_input: String::new(),
            input_mode: InputMode::Normal,
        }
    }
}
