//! Network actor - runs fetches on the Tokio runtime and tracks their cancel handles

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::cancellable::{CancellableFetch, Canceller};
use crate::network::client::{create_client, fetch_friends, fetch_popular_repos};

/// Network actor that processes fetch commands
pub struct NetworkActor {
    client: reqwest::Client,
    config: Arc<Config>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_fetches: JoinSet<u64>,
    cancellers: HashMap<u64, Canceller>,
}

impl NetworkActor {
    pub fn new(config: Config, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        Self::with_client(create_client(), config, response_tx)
    }

    pub fn with_client(
        client: reqwest::Client,
        config: Config,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            client,
            config: Arc::new(config),
            response_tx,
            active_fetches: JoinSet::new(),
            cancellers: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchPopularRepos { id, language }) => {
                            let client = self.client.clone();
                            let config = Arc::clone(&self.config);
                            tracing::info!(id, %language, "Executing repository search");

                            let fetch = CancellableFetch::spawn(async move {
                                fetch_popular_repos(&client, &config, language).await
                            });
                            self.track(id, fetch, |id, repos| NetworkResponse::Repositories { id, repos });
                        }

                        Some(NetworkCommand::FetchFriends { id }) => {
                            let client = self.client.clone();
                            let config = Arc::clone(&self.config);
                            tracing::info!(id, url = %config.friends_url, "Executing friends fetch");

                            let fetch = CancellableFetch::spawn(async move {
                                fetch_friends(&client, &config).await
                            });
                            self.track(id, fetch, |id, friends| NetworkResponse::Friends { id, friends });
                        }

                        Some(NetworkCommand::Cancel { id, reason }) => {
                            if let Some(mut canceller) = self.cancellers.remove(&id) {
                                tracing::info!(id, %reason, "Cancelling fetch");
                                canceller.cancel(reason);
                            }
                        }

                        Some(NetworkCommand::Shutdown) => {
                            for (_, mut canceller) in self.cancellers.drain() {
                                canceller.cancel("Shutting down");
                            }
                            break;
                        }

                        None => break,
                    }
                }

                // Forget cancel handles of settled fetches
                Some(joined) = self.active_fetches.join_next() => {
                    if let Ok(id) = joined {
                        self.cancellers.remove(&id);
                    }
                }
            }
        }
    }

    /// Keep the cancel side and forward the settlement to the App layer
    fn track<T: Send + 'static>(
        &mut self,
        id: u64,
        fetch: CancellableFetch<T>,
        wrap: fn(u64, T) -> NetworkResponse,
    ) {
        let (canceller, settlement) = fetch.into_parts();
        self.cancellers.insert(id, canceller);

        let response_tx = self.response_tx.clone();
        self.active_fetches.spawn(async move {
            let response = match settlement.wait().await {
                Ok(value) => wrap(id, value),
                Err(error) => {
                    if !error.is_cancelled() {
                        tracing::warn!(id, %error, "Fetch failed");
                    }
                    NetworkResponse::from_error(id, error)
                }
            };
            tracing::debug!(id, "Fetch settled");
            let _ = response_tx.send(response);
            id
        });
    }
}
