//! Per-viewer change feed.
//!
//! A [`ChangeFeed`] polls the stored record of one match at a fixed cadence
//! and emits the viewer's [`MatchView`] whenever the stored bytes change.
//! Reads never enter the exclusive region, so a feed may observe any
//! committed state. Identical records are never emitted twice in a row.
//!
//! The polling task stops when the receiver is closed or dropped, when the
//! match disappears, or on the first error. Every stop is final.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use werewolf_core::{Match, MatchError, MatchView};

use crate::config::FeedConfig;
use crate::repository::MatchStore;

/// Item delivered to a feed's consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    /// The match changed (or this is the first observation).
    Snapshot(MatchView),
    /// Nothing changed for a while; sent to keep idle transports open.
    KeepAlive,
    /// The match no longer exists. Terminal.
    NotFound,
    /// The projection was refused for this viewer. Terminal.
    Rejected(MatchError),
    /// The stored record could not be read or decoded. Terminal.
    Failed(String),
}

impl FeedEvent {
    /// Whether the feed ends after this event.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FeedEvent::NotFound | FeedEvent::Rejected(_) | FeedEvent::Failed(_)
        )
    }
}

/// Receiving end of a running change feed.
///
/// Dropping the feed cancels the polling task.
pub struct ChangeFeed {
    events: mpsc::Receiver<FeedEvent>,
    task: Option<JoinHandle<()>>,
}

impl ChangeFeed {
    /// Starts polling `code` on behalf of `viewer`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        store: Arc<MatchStore>,
        code: impl Into<String>,
        viewer: Option<String>,
        config: FeedConfig,
    ) -> Self {
        let (tx, events) = mpsc::channel(config.buffer_size.max(1));
        let poller = Poller {
            store,
            code: code.into(),
            viewer,
            config,
            tx,
        };
        let task = tokio::spawn(poller.run());

        Self {
            events,
            task: Some(task),
        }
    }

    /// Waits for the next event. Returns `None` once the feed has ended.
    pub async fn recv(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    /// Stops the feed and waits for the polling task to exit.
    pub async fn close(mut self) {
        self.events.close();
        if let Some(task) = self.task.take() {
            // The task only ends by returning or by abort.
            let _ = task.await;
        }
    }
}

impl Drop for ChangeFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct Poller {
    store: Arc<MatchStore>,
    code: String,
    viewer: Option<String>,
    config: FeedConfig,
    tx: mpsc::Sender<FeedEvent>,
}

impl Poller {
    async fn run(self) {
        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last: Option<String> = None;
        let mut idle_cycles = 0u32;

        debug!(target: "werewolf::feed", code = %self.code, viewer = ?self.viewer, "feed opened");

        loop {
            tokio::select! {
                biased;
                _ = self.tx.closed() => break,
                _ = interval.tick() => {}
            }

            let event = match self.store.load_raw(&self.code) {
                Ok(None) => FeedEvent::NotFound,
                Ok(Some(raw)) if last.as_deref() == Some(raw.as_str()) => {
                    idle_cycles += 1;
                    if idle_cycles < self.config.keepalive_cycles {
                        continue;
                    }
                    idle_cycles = 0;
                    FeedEvent::KeepAlive
                }
                Ok(Some(raw)) => {
                    idle_cycles = 0;
                    let event = self.project(&raw);
                    last = Some(raw);
                    event
                }
                Err(e) => {
                    warn!(target: "werewolf::feed", code = %self.code, error = %e, "feed read failed");
                    FeedEvent::Failed(e.to_string())
                }
            };

            let terminal = event.is_terminal();
            debug!(target: "werewolf::feed", code = %self.code, ?event, "feed emit");
            if self.tx.send(event).await.is_err() || terminal {
                break;
            }
        }

        debug!(target: "werewolf::feed", code = %self.code, "feed closed");
    }

    fn project(&self, raw: &str) -> FeedEvent {
        let game = match Match::decode(raw) {
            Ok(game) => game,
            Err(e) => return FeedEvent::Failed(e.to_string()),
        };
        match game.overview(self.viewer.as_deref()) {
            Ok(view) => FeedEvent::Snapshot(view),
            Err(e) => FeedEvent::Rejected(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config() -> FeedConfig {
        FeedConfig {
            poll_interval: Duration::from_millis(100),
            keepalive_cycles: 3,
            buffer_size: 4,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_code_ends_with_not_found() {
        let store = Arc::new(MatchStore::in_memory());
        let mut feed = ChangeFeed::spawn(store, "nope", None, config());

        assert_eq!(feed.recv().await, Some(FeedEvent::NotFound));
        assert_eq!(feed.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stranger_is_rejected() {
        let store = Arc::new(MatchStore::in_memory());
        store.exclusive().await.create("abc").unwrap();

        let mut feed = ChangeFeed::spawn(store, "abc", Some("Ghost".into()), config());
        assert_eq!(
            feed.recv().await,
            Some(FeedEvent::Rejected(MatchError::PlayerNotFound {
                name: "Ghost".into()
            }))
        );
        assert_eq!(feed.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_feed_sends_keepalives() {
        let store = Arc::new(MatchStore::in_memory());
        store.exclusive().await.create("abc").unwrap();

        let mut feed = ChangeFeed::spawn(store, "abc", None, config());
        assert!(matches!(feed.recv().await, Some(FeedEvent::Snapshot(_))));
        assert_eq!(feed.recv().await, Some(FeedEvent::KeepAlive));
        assert_eq!(feed.recv().await, Some(FeedEvent::KeepAlive));
        feed.close().await;
    }
}
