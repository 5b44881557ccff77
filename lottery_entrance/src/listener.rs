use std::{future::Future, sync::Arc};

use log::{error, info, warn};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    contracts::{LotteryContract, WinnerPicked, WINNER_EVENT_BUFFER},
    error::Result,
};

/// A live `WinnerPicked` subscription.
///
/// Every event is handed to the handler on its own; a failing handler is
/// logged and the next event is still delivered. Dropping the subscription
/// stops it.
#[derive(Debug)]
pub struct WinnerSubscription {
    watcher: JoinHandle<()>,
    handler: JoinHandle<()>,
}

impl WinnerSubscription {
    pub fn spawn<C, F, Fut>(contract: Arc<C>, mut on_winner: F) -> Self
    where
        C: LotteryContract,
        F: FnMut(WinnerPicked) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let (sink, mut events) = mpsc::channel(WINNER_EVENT_BUFFER);

        info!("Waiting for a winner ...");

        let watcher = tokio::spawn(async move {
            match contract.watch_winners(sink).await {
                Ok(()) => info!("WinnerPicked watch finished"),
                Err(e) => error!("WinnerPicked watch failed: {e}"),
            }
        });

        let handler = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Skipping WinnerPicked event: {e}");
                        continue;
                    }
                };

                match on_winner(event).await {
                    Ok(()) => info!("We got a winner! {:?}", event.winner),
                    Err(e) => warn!("Failed to handle winner {:?}: {e}", event.winner),
                }
            }
        });

        Self { watcher, handler }
    }

    /// False once the event source has ended and every delivered event was handled.
    pub fn is_active(&self) -> bool {
        !self.handler.is_finished()
    }

    pub fn unsubscribe(self) {
        drop(self)
    }
}

impl Drop for WinnerSubscription {
    fn drop(&mut self) {
        self.watcher.abort();
        self.handler.abort();
    }
}
