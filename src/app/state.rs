//! App state - pure data structure with no I/O logic

use std::time::Instant;

use crate::app::friends::FriendsView;
use crate::app::repos::ReposView;
use crate::messages::RenderState;
use crate::models::View;

/// Allocator of fetch ids shared by both views
#[derive(Debug)]
pub struct FetchIds {
    next: u64,
}

impl Default for FetchIds {
    fn default() -> Self {
        FetchIds { next: 1 }
    }
}

impl FetchIds {
    pub fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Main application state - pure data, no I/O
#[derive(Debug, Default)]
pub struct AppState {
    pub active_view: View,
    pub repos: ReposView,
    pub friends: FriendsView,
    pub show_help: bool,
    pub ids: FetchIds,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring each view's loading indicator in line with what it displays.
    ///
    /// Only the visible view keeps an indicator.
    pub fn sync_indicators(&mut self, now: Instant) {
        match self.active_view {
            View::Repos => {
                self.repos.sync_indicator(now);
                self.friends.drop_indicator();
            }
            View::Friends => {
                self.friends.sync_indicator(now);
                self.repos.drop_indicator();
            }
        }
    }

    /// Whether a repeating timer is needed
    pub fn indicator_live(&self) -> bool {
        self.repos.has_indicator() || self.friends.has_indicator()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self, now: Instant) -> RenderState {
        RenderState {
            active_view: self.active_view,
            show_help: self.show_help,
            language: self.repos.language,
            repos: self.repos.repos.clone(),
            repos_loading: self.repos.loading,
            repos_indicator: self.repos.indicator_frame(now),
            friends: self.friends.friends.clone(),
            friends_loading: self.friends.loading,
            friends_indicator: self.friends.indicator_frame(now),
            selected_friend: self.friends.selected_index(),
            friend_input: self.friends.input.clone(),
            input_mode: self.friends.input_mode,
        }
    }
}
