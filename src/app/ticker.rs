//! Repeating timer driving the loading indicator

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Sends `()` every `period` until dropped
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn start(period: Duration, tick_tx: mpsc::UnboundedSender<()>) -> Self {
        let handle = tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately.
            timer.tick().await;
            loop {
                timer.tick().await;
                if tick_tx.send(()).is_err() {
                    break;
                }
            }
        });
        Ticker { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_until_dropped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::start(Duration::from_millis(5), tx);

        rx.recv().await.unwrap();
        rx.recv().await.unwrap();

        drop(ticker);
        // The aborted task drops its sender, closing the channel.
        while rx.recv().await.is_some() {}
    }
}
