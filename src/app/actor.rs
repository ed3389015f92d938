//! App actor - message loop processing UI events, settlements and ticks

use std::time::Instant;

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::app::ticker::Ticker;
use crate::constants::LOADING_TICK;
use crate::error::Result;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns all view state
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    tick_tx: mpsc::UnboundedSender<()>,
    tick_rx: mpsc::UnboundedReceiver<()>,
    ticker: Option<Ticker>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
            tick_tx,
            tick_rx,
            ticker: None,
        }
    }

    /// Run the actor message loop.
    ///
    /// Returns the first fetch failure that is not a cancellation.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) -> Result<()> {
        let commands = self.state.activate_current();
        self.dispatch(commands);
        self.refresh();

        loop {
            tokio::select! {
                biased;

                // Settlements first so a queued result lands before later input
                Some(response) = net_rx.recv() => {
                    tracing::debug!(id = response.id(), "Settlement received");
                    if let Err(error) = self.state.handle_response(response) {
                        self.shutdown();
                        return Err(error);
                    }
                    self.refresh();
                }
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        self.shutdown();
                        break;
                    }
                    self.refresh();
                }
                Some(()) = self.tick_rx.recv() => {
                    self.render();
                }
                else => break,
            }
        }

        Ok(())
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let commands = match event {
            // View navigation
            UiEvent::SwitchView(view) => self.state.switch_view(view),
            UiEvent::NextView => self.state.next_view(),

            // Repos view
            UiEvent::SelectLanguage(lang) => self.state.select_language(&lang),
            UiEvent::NextLanguage => self.state.next_language(),
            UiEvent::PrevLanguage => self.state.prev_language(),

            // Friends view
            UiEvent::ResetFriends => self.state.reset_friends(),
            UiEvent::NextFriend => {
                self.state.friends.next_friend();
                Vec::new()
            }
            UiEvent::PrevFriend => {
                self.state.friends.prev_friend();
                Vec::new()
            }
            UiEvent::ToggleFriend => {
                self.state.friends.toggle_friend();
                Vec::new()
            }
            UiEvent::RemoveFriend => {
                self.state.friends.remove_friend();
                Vec::new()
            }

            // Input editing
            UiEvent::StartEditing => {
                self.state.friends.start_editing();
                Vec::new()
            }
            UiEvent::StopEditing => {
                self.state.friends.stop_editing();
                Vec::new()
            }
            UiEvent::CharInput(c) => {
                self.state.friends.enter_char(c);
                Vec::new()
            }
            UiEvent::Backspace => {
                self.state.friends.delete_char();
                Vec::new()
            }
            UiEvent::AddFriend => {
                self.state.friends.add_friend();
                Vec::new()
            }

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                Vec::new()
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                Vec::new()
            }

            // System
            UiEvent::Quit => return true,
        };

        self.dispatch(commands);
        false
    }

    fn dispatch(&self, commands: Vec<NetworkCommand>) {
        for command in commands {
            let _ = self.network_tx.send(command);
        }
    }

    /// Start or stop the indicator timer to match the state, then render
    fn refresh(&mut self) {
        self.state.sync_indicators(Instant::now());
        match (self.state.indicator_live(), self.ticker.is_some()) {
            (true, false) => {
                self.ticker = Some(Ticker::start(LOADING_TICK, self.tick_tx.clone()));
            }
            (false, true) => {
                // Dropping aborts the timer task; ticks already queued are stale.
                self.ticker = None;
                while self.tick_rx.try_recv().is_ok() {}
            }
            _ => {}
        }
        self.render();
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state(Instant::now()));
    }

    fn shutdown(&mut self) {
        self.ticker = None;
        let commands = self.state.deactivate_all();
        self.dispatch(commands);
        let _ = self.network_tx.send(NetworkCommand::Shutdown);
    }
}
