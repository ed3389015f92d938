//! Command handlers - business logic for processing UI events and settlements

use crate::app::AppState;
use crate::error::Result;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::View;

impl AppState {
    // ========================
    // View lifecycle
    // ========================

    /// Activate the view currently on screen
    pub fn activate_current(&mut self) -> Vec<NetworkCommand> {
        match self.active_view {
            View::Repos => self.repos.on_activate(&mut self.ids),
            View::Friends => self.friends.on_activate(&mut self.ids),
        }
    }

    /// Deactivate the view on screen and activate `view`
    pub fn switch_view(&mut self, view: View) -> Vec<NetworkCommand> {
        if view == self.active_view {
            return Vec::new();
        }

        let mut commands: Vec<NetworkCommand> = match self.active_view {
            View::Repos => self.repos.on_deactivate(),
            View::Friends => self.friends.on_deactivate(),
        }
        .into_iter()
        .collect();

        self.active_view = view;
        commands.extend(self.activate_current());
        commands
    }

    pub fn next_view(&mut self) -> Vec<NetworkCommand> {
        self.switch_view(self.active_view.next())
    }

    /// Deactivate everything before shutdown
    pub fn deactivate_all(&mut self) -> Vec<NetworkCommand> {
        self.repos
            .on_deactivate()
            .into_iter()
            .chain(self.friends.on_deactivate())
            .collect()
    }

    // ========================
    // Repos view
    // ========================

    pub fn select_language(&mut self, lang: &str) -> Vec<NetworkCommand> {
        self.repos.select_language(lang, &mut self.ids)
    }

    pub fn next_language(&mut self) -> Vec<NetworkCommand> {
        self.repos.next_language(&mut self.ids)
    }

    pub fn prev_language(&mut self) -> Vec<NetworkCommand> {
        self.repos.prev_language(&mut self.ids)
    }

    // ========================
    // Friends view
    // ========================

    pub fn reset_friends(&mut self) -> Vec<NetworkCommand> {
        self.friends.reset(&mut self.ids)
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Settlement handling
    // ========================

    /// Commit a settlement into the view that is waiting for it.
    ///
    /// Cancellations and settlements for superseded ids are logged and
    /// dropped. Any other failure of a pending fetch is returned to the
    /// caller unhandled.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Result<()> {
        match response {
            NetworkResponse::Repositories { id, repos } => {
                if !self.repos.resolve(id, repos) {
                    tracing::debug!(id, "Discarding stale repositories");
                }
            }
            NetworkResponse::Friends { id, friends } => {
                if !self.friends.resolve(id, friends) {
                    tracing::debug!(id, "Discarding stale friends");
                }
            }
            NetworkResponse::Cancelled { id, reason } => {
                tracing::info!(id, %reason, "Fetch cancelled");
            }
            NetworkResponse::Failed { id, error } => {
                if self.repos.is_pending(id) || self.friends.is_pending(id) {
                    tracing::error!(id, %error, "Fetch failed");
                    return Err(error);
                }
                tracing::debug!(id, %error, "Discarding stale failure");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::{Friend, Language};
    use std::time::Duration;

    #[test]
    fn test_switch_view_deactivates_then_activates() {
        let mut state = AppState::new();
        let first = state.activate_current();
        let repos_id = match first.as_slice() {
            [NetworkCommand::FetchPopularRepos { id, .. }] => *id,
            other => panic!("unexpected commands: {:?}", other),
        };

        let commands = state.switch_view(View::Friends);
        assert!(matches!(
            commands.as_slice(),
            [NetworkCommand::Cancel { id, .. }, NetworkCommand::FetchFriends { .. }] if *id == repos_id
        ));
        assert_eq!(state.active_view, View::Friends);
        assert!(state.switch_view(View::Friends).is_empty());
    }

    #[test]
    fn test_cancelled_settlement_is_swallowed() {
        let mut state = AppState::new();
        state.activate_current();
        let first = state.repos.pending.unwrap();
        state.select_language("javascript");

        let result = state.handle_response(NetworkResponse::Cancelled {
            id: first,
            reason: "Cancelled by new language selection".into(),
        });
        assert!(result.is_ok());
        assert!(state.repos.loading);
        assert_eq!(state.repos.language, Language::JavaScript);
    }

    #[test]
    fn test_pending_failure_propagates() {
        let mut state = AppState::new();
        state.activate_current();
        let id = state.repos.pending.unwrap();

        let result = state.handle_response(NetworkResponse::Failed {
            id,
            error: FetchError::Timeout(Duration::from_secs(10)),
        });
        let error = result.unwrap_err();
        assert!(!error.is_cancelled());
        // No recovery: the view stays in its loading state.
        assert!(state.repos.loading);
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut state = AppState::new();
        state.activate_current();
        let result = state.handle_response(NetworkResponse::Failed {
            id: 999,
            error: FetchError::Aborted,
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_friends_settlement_ignored_by_repos() {
        let mut state = AppState::new();
        state.activate_current();
        let repos_id = state.repos.pending.unwrap();

        state
            .handle_response(NetworkResponse::Friends {
                id: repos_id,
                friends: vec![Friend::new("Al")],
            })
            .unwrap();
        assert!(state.friends.friends.is_empty());
        assert!(state.repos.loading);
    }

    #[test]
    fn test_deactivate_all_cancels_every_pending_fetch() {
        let mut state = AppState::new();
        state.activate_current();
        state.friends.on_activate(&mut state.ids);
        assert_eq!(state.deactivate_all().len(), 2);
        assert!(state.deactivate_all().is_empty());
    }
}
