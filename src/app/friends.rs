//! Friends view - local list edits plus a bulk reset from the mock host

use std::time::Instant;

use crate::app::state::FetchIds;
use crate::constants::{CANCEL_DEACTIVATE, CANCEL_REMOUNT, CANCEL_RESET};
use crate::messages::render::IndicatorFrame;
use crate::messages::ui_events::InputMode;
use crate::messages::NetworkCommand;
use crate::models::Friend;
use crate::pulse::LoadingIndicator;

/// List with `name` appended as an active friend
pub fn with_added(friends: &[Friend], name: &str) -> Vec<Friend> {
    friends
        .iter()
        .cloned()
        .chain(std::iter::once(Friend::new(name)))
        .collect()
}

/// List with the friend at `index` replaced by `edit(friend)`
fn with_replaced(friends: &[Friend], index: usize, edit: impl Fn(&Friend) -> Friend) -> Vec<Friend> {
    friends
        .iter()
        .enumerate()
        .map(|(i, friend)| if i == index { edit(friend) } else { friend.clone() })
        .collect()
}

pub fn with_toggled(friends: &[Friend], index: usize) -> Vec<Friend> {
    with_replaced(friends, index, Friend::toggled)
}

pub fn with_removed(friends: &[Friend], index: usize) -> Vec<Friend> {
    with_replaced(friends, index, Friend::removed)
}

/// Split into (active, inactive), each entry tagged with its list index
pub fn partition(friends: &[Friend]) -> (Vec<(usize, &Friend)>, Vec<(usize, &Friend)>) {
    friends.iter().enumerate().partition(|(_, friend)| friend.active)
}

/// List indices in display order: active friends first, then inactive
pub fn display_order(friends: &[Friend]) -> Vec<usize> {
    let (active, inactive) = partition(friends);
    active.into_iter().chain(inactive).map(|(i, _)| i).collect()
}

/// State bag of the friends view
#[derive(Debug, Default)]
pub struct FriendsView {
    pub friends: Vec<Friend>,
    pub loading: bool,
    /// Name being typed for a new friend
    pub input: String,
    pub input_mode: InputMode,
    /// List index of the highlighted friend
    pub selected: usize,
    pub pending: Option<u64>,
    indicator: Option<LoadingIndicator>,
}

impl FriendsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_activate(&mut self, ids: &mut FetchIds) -> Vec<NetworkCommand> {
        tracing::info!("Friends view activated");
        self.reload(ids, CANCEL_REMOUNT)
    }

    pub fn on_deactivate(&mut self) -> Option<NetworkCommand> {
        self.indicator = None;
        self.input_mode = InputMode::Normal;
        self.cancel_pending(CANCEL_DEACTIVATE)
    }

    /// Discard local edits and re-fetch the bulk list
    pub fn reset(&mut self, ids: &mut FetchIds) -> Vec<NetworkCommand> {
        self.reload(ids, CANCEL_RESET)
    }

    pub fn resolve(&mut self, id: u64, friends: Vec<Friend>) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        tracing::info!(id, count = friends.len(), "Friends loaded");
        self.friends = friends;
        self.loading = false;
        self.pending = None;
        self.selected = display_order(&self.friends).first().copied().unwrap_or(0);
        true
    }

    pub fn is_pending(&self, id: u64) -> bool {
        self.pending == Some(id)
    }

    // ========================
    // Local edits
    // ========================

    /// Add the typed name. Blank names are ignored.
    pub fn add_friend(&mut self) {
        let name = self.input.trim();
        if !name.is_empty() {
            self.friends = with_added(&self.friends, name);
            tracing::debug!(name, "Friend added");
        }
        self.input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_friend(&mut self) {
        if let Some(index) = self.selected_index() {
            self.friends = with_toggled(&self.friends, index);
        }
    }

    pub fn remove_friend(&mut self) {
        if let Some(index) = self.selected_index() {
            self.friends = with_removed(&self.friends, index);
        }
    }

    /// List index of the highlighted friend
    pub fn selected_index(&self) -> Option<usize> {
        (self.selected < self.friends.len()).then_some(self.selected)
    }

    /// Move the highlight one row down the screen, wrapping
    pub fn next_friend(&mut self) {
        self.step_selection(|position, len| (position + 1) % len);
    }

    /// Move the highlight one row up the screen, wrapping
    pub fn prev_friend(&mut self) {
        self.step_selection(|position, len| position.checked_sub(1).unwrap_or(len - 1));
    }

    fn step_selection(&mut self, step: impl Fn(usize, usize) -> usize) {
        let order = display_order(&self.friends);
        if order.is_empty() {
            return;
        }
        let position = order.iter().position(|&i| i == self.selected).unwrap_or(0);
        self.selected = order[step(position, order.len())];
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn delete_char(&mut self) {
        self.input.pop();
    }

    // ========================
    // Loading indicator
    // ========================

    pub fn shows_loading(&self) -> bool {
        self.loading || self.friends.is_empty()
    }

    pub fn sync_indicator(&mut self, now: Instant) {
        if self.shows_loading() {
            self.indicator.get_or_insert_with(|| LoadingIndicator::activate(now));
        } else {
            self.indicator = None;
        }
    }

    pub fn drop_indicator(&mut self) {
        self.indicator = None;
    }

    pub fn has_indicator(&self) -> bool {
        self.indicator.is_some()
    }

    pub fn indicator_frame(&self, now: Instant) -> IndicatorFrame {
        self.indicator
            .map(|indicator| IndicatorFrame {
                text: indicator.text(now),
                progress: indicator.progress(now),
            })
            .unwrap_or_default()
    }

    fn reload(&mut self, ids: &mut FetchIds, cancel_reason: &str) -> Vec<NetworkCommand> {
        let mut commands: Vec<NetworkCommand> = self.cancel_pending(cancel_reason).into_iter().collect();

        let id = ids.next();
        self.loading = true;
        self.friends.clear();
        self.selected = 0;
        self.pending = Some(id);

        tracing::info!(id, "Fetching friends");
        commands.push(NetworkCommand::FetchFriends { id });
        commands
    }

    fn cancel_pending(&mut self, reason: &str) -> Option<NetworkCommand> {
        self.pending.take().map(|id| NetworkCommand::Cancel {
            id,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friend(name: &str, active: bool, deleted: bool) -> Friend {
        Friend { name: name.into(), active, deleted }
    }

    fn loaded(friends: Vec<Friend>) -> FriendsView {
        let mut ids = FetchIds::default();
        let mut view = FriendsView::new();
        view.on_activate(&mut ids);
        view.resolve(view.pending.unwrap(), friends);
        view
    }

    #[test]
    fn test_toggle_flips_only_active() {
        let list = vec![friend("Al", true, false), friend("Bo", false, true)];
        let toggled = with_toggled(&list, 1);
        assert_eq!(toggled[0], list[0]);
        assert_eq!(toggled[1], friend("Bo", true, true));
    }

    #[test]
    fn test_remove_marks_deleted_and_inactive() {
        let list = vec![friend("Al", true, false)];
        let removed = with_removed(&list, 0);
        assert_eq!(removed, vec![friend("Al", false, true)]);

        let (active, inactive) = partition(&removed);
        assert!(active.is_empty());
        assert_eq!(inactive.len(), 1);
        assert!(inactive[0].1.deleted);
    }

    #[test]
    fn test_out_of_range_edit_keeps_list() {
        let list = vec![friend("Al", true, false)];
        assert_eq!(with_toggled(&list, 5), list);
    }

    #[test]
    fn test_display_order_puts_active_first() {
        let list = vec![
            friend("Al", false, false),
            friend("Bo", true, false),
            friend("Cy", false, true),
            friend("Di", true, false),
        ];
        assert_eq!(display_order(&list), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_add_from_input() {
        let mut view = loaded(vec![friend("Al", true, false)]);
        view.start_editing();
        for c in "  Bo ".chars() {
            view.enter_char(c);
        }
        view.add_friend();

        assert_eq!(view.friends.last(), Some(&friend("Bo", true, false)));
        assert!(view.input.is_empty());
        assert_eq!(view.input_mode, InputMode::Normal);
        assert!(!view.loading);
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let mut view = loaded(vec![friend("Al", true, false)]);
        view.enter_char(' ');
        view.add_friend();
        assert_eq!(view.friends.len(), 1);
    }

    #[test]
    fn test_selection_starts_at_top_of_display_order() {
        let mut view = loaded(vec![friend("Al", false, false), friend("Bo", true, false)]);
        assert_eq!(view.selected_index(), Some(1));

        // Moving down from the active Bo lands on the inactive Al.
        view.next_friend();
        assert_eq!(view.selected_index(), Some(0));
        view.next_friend();
        assert_eq!(view.selected_index(), Some(1));
        view.prev_friend();
        assert_eq!(view.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_stays_on_edited_friend() {
        let original = vec![friend("Al", true, false), friend("Bo", true, false)];
        let mut view = loaded(original.clone());
        assert_eq!(view.selected_index(), Some(0));

        // Al moves to the inactive list but stays highlighted.
        view.toggle_friend();
        assert_eq!(view.selected_index(), Some(0));
        view.toggle_friend();
        assert_eq!(view.friends, original);

        view.remove_friend();
        assert_eq!(view.friends[0], friend("Al", false, true));
        assert_eq!(view.friends[1], friend("Bo", true, false));
    }

    #[test]
    fn test_add_keeps_highlight() {
        let mut view = loaded(vec![friend("Al", true, false), friend("Bo", false, false)]);
        view.next_friend();
        assert_eq!(view.selected_index(), Some(1));

        for c in "Cy".chars() {
            view.enter_char(c);
        }
        view.add_friend();
        assert_eq!(view.selected_index(), Some(1));
    }

    #[test]
    fn test_reset_cancels_and_reloads() {
        let mut ids = FetchIds::default();
        let mut view = FriendsView::new();
        view.on_activate(&mut ids);
        let first = view.pending.unwrap();

        let commands = view.reset(&mut ids);
        match commands.as_slice() {
            [NetworkCommand::Cancel { id, reason }, NetworkCommand::FetchFriends { id: second }] => {
                assert_eq!(*id, first);
                assert_eq!(reason, CANCEL_RESET);
                assert_ne!(*second, first);
            }
            other => panic!("unexpected commands: {:?}", other),
        }
        assert!(view.loading);
        assert!(!view.resolve(first, vec![friend("Old", true, false)]));
        assert!(view.friends.is_empty());
    }

    #[test]
    fn test_remount_cancels_with_remount_reason() {
        let mut ids = FetchIds::default();
        let mut view = FriendsView::new();
        view.on_activate(&mut ids);
        let first = view.pending.unwrap();

        match view.on_activate(&mut ids).as_slice() {
            [NetworkCommand::Cancel { id, reason }, NetworkCommand::FetchFriends { .. }] => {
                assert_eq!(*id, first);
                assert_eq!(reason, CANCEL_REMOUNT);
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }
}
