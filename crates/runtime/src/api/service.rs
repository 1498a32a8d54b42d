//! Cloneable match service.
//!
//! [`MatchService`] is the boundary every collaborator goes through. Each
//! mutating call runs inside the store's exclusive region, and an event is
//! published only after the mutation has been saved.
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use werewolf_core::{
    ActionOutcome, ActionPayload, Activity, ActivityView, MatchError, MatchView, Team,
};

use super::code;
use super::errors::{Result, ServiceError};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, LobbyEvent, PlayEvent, Topic};
use crate::feed::ChangeFeed;
use crate::repository::MatchStore;

/// A freshly created match and the name its creator joined under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Created {
    pub code: String,
    pub player: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Matches currently stored.
    pub active: usize,
    /// Matches created by this service since it was built.
    pub total_created: u64,
}

/// Client-facing handle to the match store
#[derive(Clone)]
pub struct MatchService {
    store: Arc<MatchStore>,
    event_bus: EventBus,
    config: Arc<RuntimeConfig>,
    created: Arc<AtomicU64>,
}

impl MatchService {
    pub(crate) fn new(store: Arc<MatchStore>, config: RuntimeConfig) -> Self {
        Self {
            store,
            event_bus: EventBus::with_capacity(config.event_buffer_size),
            config: Arc::new(config),
            created: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn store(&self) -> &Arc<MatchStore> {
        &self.store
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Creates a match under a fresh code and joins `name` as its first player.
    pub async fn create(&self, name: &str) -> Result<Created> {
        let region = self.store.exclusive().await;

        let mut fresh = None;
        for _ in 0..code::MAX_ATTEMPTS {
            let candidate = code::generate(&mut rand::thread_rng(), self.config.code_length);
            if !region.contains(&candidate)? {
                fresh = Some(candidate);
                break;
            }
        }
        let Some(code) = fresh else {
            warn!(
                target: "werewolf::service",
                length = self.config.code_length,
                attempts = code::MAX_ATTEMPTS,
                "no free match code found"
            );
            return Err(ServiceError::CodeSpaceExhausted {
                attempts: code::MAX_ATTEMPTS,
            });
        };

        let mut game = region.create(&code)?;
        let player = match game.add_player(name) {
            Ok(player) => player,
            Err(e) => {
                region.remove(&code)?;
                return Err(e.into());
            }
        };
        region.save(&code, &game)?;
        drop(region);

        self.created.fetch_add(1, Ordering::Relaxed);
        info!(target: "werewolf::service", code = %code, player = %player, "match created");
        self.event_bus.publish(Event::Lobby(LobbyEvent::Created {
            code: code.clone(),
            host: player.clone(),
        }));

        Ok(Created { code, player })
    }

    /// Adds `name` to a waiting match.
    ///
    /// `identity` is the name the caller already holds for this match, if
    /// any. It only decides how a taken name is reported.
    pub async fn join(&self, code: &str, name: &str, identity: Option<&str>) -> Result<String> {
        let player = self
            .store
            .transaction(code, |game| {
                let trimmed = name.trim();
                if game.contains(trimmed) {
                    return Err(match identity {
                        Some(_) => ServiceError::AlreadyJoined {
                            code: code.to_owned(),
                        },
                        None => ServiceError::NameTaken {
                            name: trimmed.to_owned(),
                        },
                    });
                }
                if game.is_started() {
                    return Err(ServiceError::AlreadyStarted {
                        code: code.to_owned(),
                    });
                }
                Ok(game.add_player(trimmed)?)
            })
            .await?;

        if let Some(previous) = identity {
            warn!(
                target: "werewolf::service",
                code = %code,
                player = %player,
                previous = %previous,
                "caller already held an identity for this match but joined under a new name"
            );
        }
        debug!(target: "werewolf::service", code = %code, player = %player, "player joined");
        self.event_bus.publish(Event::Lobby(LobbyEvent::PlayerJoined {
            code: code.to_owned(),
            player: player.clone(),
        }));

        Ok(player)
    }

    /// Assigns roles and opens the first night.
    pub async fn start(&self, code: &str) -> Result<()> {
        let players = self
            .store
            .transaction(code, |game| {
                if game.is_started() {
                    return Err(ServiceError::AlreadyStarted {
                        code: code.to_owned(),
                    });
                }
                game.start(&mut rand::thread_rng())
                    .map_err(|e| match e {
                        MatchError::NotEnoughPlayers { required, joined } => {
                            ServiceError::NotEnoughPlayers { required, joined }
                        }
                        other => other.into(),
                    })?;
                Ok(game.roster().len())
            })
            .await?;

        info!(target: "werewolf::service", code = %code, players, "match started");
        self.event_bus.publish(Event::Lobby(LobbyEvent::Started {
            code: code.to_owned(),
            players,
        }));
        Ok(())
    }

    /// Applies an action on behalf of `player`.
    ///
    /// When `activity` is given the action is rejected unless it names the
    /// current activity.
    pub async fn act(
        &self,
        code: &str,
        player: &str,
        activity: Option<Activity>,
        payload: &ActionPayload,
    ) -> Result<ActionOutcome> {
        let (during, outcome, winners) = self
            .store
            .transaction(code, |game| {
                let during = game.activity();
                let outcome = match activity {
                    Some(activity) => game.perform_activity_action(player, activity, payload)?,
                    None => game.perform_action(player, payload)?,
                };
                Ok::<_, ServiceError>((during, outcome, game.winners()))
            })
            .await?;

        debug!(
            target: "werewolf::service",
            code = %code,
            player = %player,
            %during,
            activity = %outcome.activity,
            "action applied"
        );
        self.publish_outcome(code, player, during, &outcome, winners);
        Ok(outcome)
    }

    fn publish_outcome(
        &self,
        code: &str,
        player: &str,
        during: Activity,
        outcome: &ActionOutcome,
        winners: Option<Team>,
    ) {
        let voter = (during == Activity::Vote).then(|| player.to_owned());
        self.event_bus.publish(Event::Play(PlayEvent::BallotCast {
            code: code.to_owned(),
            activity: during,
            voter,
        }));

        if let Some(eliminated) = &outcome.eliminated {
            self.event_bus.publish(Event::Play(PlayEvent::PlayerEliminated {
                code: code.to_owned(),
                player: eliminated.clone(),
                during,
            }));
        }

        if let Some(winners) = winners
            && outcome.activity == Activity::Finished
        {
            info!(target: "werewolf::service", code = %code, %winners, "match finished");
            self.event_bus.publish(Event::Play(PlayEvent::Finished {
                code: code.to_owned(),
                winners,
            }));
        }
    }

    /// Overview of a match; the activity state is included for an identified
    /// viewer and for finished matches.
    pub async fn info(&self, code: &str, viewer: Option<&str>) -> Result<MatchView> {
        let game = self.load(code)?;
        Ok(game.overview(viewer)?)
    }

    /// Projection of an explicitly named activity for `player`.
    pub async fn activity_info(
        &self,
        code: &str,
        player: &str,
        activity: Activity,
    ) -> Result<ActivityView> {
        let game = self.load(code)?;
        Ok(game.activity_info(player, activity)?)
    }

    /// Opens a change feed for `code`. An unknown code ends the feed with
    /// [`crate::FeedEvent::NotFound`].
    pub fn stream(&self, code: &str, viewer: Option<String>) -> ChangeFeed {
        ChangeFeed::spawn(
            Arc::clone(&self.store),
            code,
            viewer,
            self.config.feed.clone(),
        )
    }

    pub fn status(&self) -> Result<Status> {
        Ok(Status {
            active: self.store.len()?,
            total_created: self.created.load(Ordering::Relaxed),
        })
    }

    /// Deletes a match. Returns `false` if it did not exist.
    pub async fn remove(&self, code: &str) -> Result<bool> {
        let removed = self.store.exclusive().await.remove(code)?;
        if removed {
            info!(target: "werewolf::service", code = %code, "match removed");
            self.event_bus.publish(Event::Lobby(LobbyEvent::Removed {
                code: code.to_owned(),
            }));
        }
        Ok(removed)
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    fn load(&self, code: &str) -> Result<werewolf_core::Match> {
        self.store
            .load(code)?
            .ok_or_else(|| ServiceError::NotFound {
                code: code.to_owned(),
            })
    }
}
