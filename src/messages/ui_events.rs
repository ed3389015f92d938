//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::View;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // View navigation
    SwitchView(View),
    NextView,

    // Repos view
    SelectLanguage(String),
    NextLanguage,
    PrevLanguage,

    // Friends view
    NextFriend,
    PrevFriend,
    ToggleFriend,
    RemoveFriend,
    ResetFriends,

    // Friend name input
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    AddFriend,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_view: View,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if input_mode == InputMode::Normal {
        match key.code {
            KeyCode::Char('1') => return Some(UiEvent::SwitchView(View::Repos)),
            KeyCode::Char('2') => return Some(UiEvent::SwitchView(View::Friends)),
            KeyCode::Tab => return Some(UiEvent::NextView),
            KeyCode::Char('q') => return Some(UiEvent::Quit),
            KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
            _ => {}
        }
    }

    match active_view {
        View::Repos => handle_repos_keys(key),
        View::Friends => handle_friends_keys(key, input_mode),
    }
}

/// Handle keys for the repos view
fn handle_repos_keys(key: KeyEvent) -> Option<UiEvent> {
    let language = match key.code {
        KeyCode::Char('a') => "all",
        KeyCode::Char('j') => "javascript",
        KeyCode::Char('r') => "ruby",
        KeyCode::Char('p') => "python",
        KeyCode::Left | KeyCode::Char('h') => return Some(UiEvent::PrevLanguage),
        KeyCode::Right | KeyCode::Char('l') => return Some(UiEvent::NextLanguage),
        _ => return None,
    };
    Some(UiEvent::SelectLanguage(language.to_string()))
}

/// Handle keys for the friends view
fn handle_friends_keys(key: KeyEvent, input_mode: InputMode) -> Option<UiEvent> {
    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevFriend),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextFriend),
            KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ToggleFriend),
            KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::RemoveFriend),
            KeyCode::Char('r') => Some(UiEvent::ResetFriends),
            KeyCode::Char('a') | KeyCode::Char('e') => Some(UiEvent::StartEditing),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::AddFriend),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
