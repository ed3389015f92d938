//! Popular repositories view - language selection and search lifecycle

use std::time::Instant;

use crate::app::state::FetchIds;
use crate::constants::{CANCEL_DEACTIVATE, CANCEL_LANGUAGE_SWITCH, CANCEL_REMOUNT};
use crate::messages::render::IndicatorFrame;
use crate::messages::NetworkCommand;
use crate::models::{Language, Repository};
use crate::pulse::LoadingIndicator;

/// State bag of the repos view
#[derive(Debug, Default)]
pub struct ReposView {
    pub repos: Vec<Repository>,
    pub loading: bool,
    pub language: Language,
    /// Id of the one fetch allowed to settle into this view
    pub pending: Option<u64>,
    indicator: Option<LoadingIndicator>,
}

impl ReposView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount: clear results and search the current language
    pub fn on_activate(&mut self, ids: &mut FetchIds) -> Vec<NetworkCommand> {
        tracing::info!(language = %self.language, "Repos view activated");
        self.reload(ids, CANCEL_REMOUNT)
    }

    /// Unmount: drop the in-flight search and the indicator
    pub fn on_deactivate(&mut self) -> Option<NetworkCommand> {
        self.indicator = None;
        self.cancel_pending(CANCEL_DEACTIVATE)
    }

    /// Switch the search language.
    ///
    /// Ignored when `lang` is the current selection or not a known language.
    pub fn select_language(&mut self, lang: &str, ids: &mut FetchIds) -> Vec<NetworkCommand> {
        let language = match lang.parse::<Language>() {
            Ok(language) => language,
            Err(_) => {
                tracing::debug!(lang, "Ignoring unrecognized language");
                return Vec::new();
            }
        };
        if language == self.language {
            return Vec::new();
        }

        self.language = language;
        self.reload(ids, CANCEL_LANGUAGE_SWITCH)
    }

    pub fn next_language(&mut self, ids: &mut FetchIds) -> Vec<NetworkCommand> {
        let next = self.language.next();
        self.select_language(next.as_str(), ids)
    }

    pub fn prev_language(&mut self, ids: &mut FetchIds) -> Vec<NetworkCommand> {
        let prev = self.language.prev();
        self.select_language(prev.as_str(), ids)
    }

    /// Commit a search result. Returns false if `id` is not the pending fetch.
    pub fn resolve(&mut self, id: u64, repos: Vec<Repository>) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        tracing::info!(id, count = repos.len(), language = %self.language, "Repositories loaded");
        self.repos = repos;
        self.loading = false;
        self.pending = None;
        true
    }

    pub fn is_pending(&self, id: u64) -> bool {
        self.pending == Some(id)
    }

    /// An empty result keeps the indicator up, same as loading
    pub fn shows_loading(&self) -> bool {
        self.loading || self.repos.is_empty()
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
        self.repos.clear();
        self.pending = Some(id);

        tracing::info!(id, language = %self.language, "Fetching popular repositories");
        commands.push(NetworkCommand::FetchPopularRepos { id, language: self.language });
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
    use crate::models::Owner;

    fn repo(id: u64) -> Repository {
        Repository {
            id,
            name: format!("repo-{}", id),
            html_url: format!("https://github.com/o/repo-{}", id),
            owner: Owner { login: "o".into() },
            stargazers_count: 10,
        }
    }

    fn activated() -> (ReposView, FetchIds) {
        let mut ids = FetchIds::default();
        let mut view = ReposView::new();
        view.on_activate(&mut ids);
        (view, ids)
    }

    #[test]
    fn test_activate_issues_fetch_for_all() {
        let mut ids = FetchIds::default();
        let mut view = ReposView::new();
        let commands = view.on_activate(&mut ids);

        assert!(view.loading);
        assert_eq!(view.language, Language::All);
        assert!(matches!(
            commands.as_slice(),
            [NetworkCommand::FetchPopularRepos { language: Language::All, .. }]
        ));
    }

    #[test]
    fn test_selecting_current_language_is_noop() {
        for lang in Language::ALL {
            let (mut view, mut ids) = activated();
            view.language = lang;
            let pending = view.pending;
            assert!(view.select_language(lang.as_str(), &mut ids).is_empty());
            assert_eq!(view.pending, pending);
        }
    }

    #[test]
    fn test_unrecognized_language_is_noop() {
        let (mut view, mut ids) = activated();
        view.resolve(view.pending.unwrap(), vec![repo(1)]);

        assert!(view.select_language("cobol", &mut ids).is_empty());
        assert_eq!(view.language, Language::All);
        assert_eq!(view.repos.len(), 1);
        assert!(!view.loading);
    }

    #[test]
    fn test_switch_cancels_then_fetches() {
        let (mut view, mut ids) = activated();
        let first = view.pending.unwrap();

        let commands = view.select_language("python", &mut ids);
        match commands.as_slice() {
            [NetworkCommand::Cancel { id, reason }, NetworkCommand::FetchPopularRepos { id: second, language: Language::Python }] => {
                assert_eq!(*id, first);
                assert_eq!(reason, CANCEL_LANGUAGE_SWITCH);
                assert_eq!(view.pending, Some(*second));
            }
            other => panic!("unexpected commands: {:?}", other),
        }
        assert!(view.loading);
        assert!(view.repos.is_empty());
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let (mut view, mut ids) = activated();
        let first = view.pending.unwrap();
        view.select_language("ruby", &mut ids);
        let second = view.pending.unwrap();

        assert!(!view.resolve(first, vec![repo(1)]));
        assert!(view.repos.is_empty());
        assert!(view.loading);

        assert!(view.resolve(second, vec![repo(2)]));
        assert_eq!(view.repos, vec![repo(2)]);
        assert!(!view.loading);
    }

    #[test]
    fn test_empty_result_keeps_loading_display() {
        let (mut view, _ids) = activated();
        view.resolve(view.pending.unwrap(), Vec::new());
        assert!(!view.loading);
        assert!(view.shows_loading());

        view.sync_indicator(Instant::now());
        assert!(view.has_indicator());
    }

    #[test]
    fn test_indicator_follows_loading_display() {
        let (mut view, _ids) = activated();
        view.sync_indicator(Instant::now());
        assert!(view.has_indicator());

        view.resolve(view.pending.unwrap(), vec![repo(3)]);
        view.sync_indicator(Instant::now());
        assert!(!view.has_indicator());
    }

    #[test]
    fn test_remount_cancels_with_remount_reason() {
        let (mut view, mut ids) = activated();
        let first = view.pending.unwrap();

        match view.on_activate(&mut ids).as_slice() {
            [NetworkCommand::Cancel { id, reason }, NetworkCommand::FetchPopularRepos { .. }] => {
                assert_eq!(*id, first);
                assert_eq!(reason, CANCEL_REMOUNT);
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn test_deactivate_cancels_pending() {
        let (mut view, _ids) = activated();
        let id = view.pending.unwrap();
        let command = view.on_deactivate();
        assert!(matches!(command, Some(NetworkCommand::Cancel { id: cancelled, .. }) if cancelled == id));
        assert_eq!(view.pending, None);
        assert!(view.on_deactivate().is_none());
    }
}
