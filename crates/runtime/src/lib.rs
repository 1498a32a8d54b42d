//! Persistence, concurrency, and change notification for werewolf matches.
//!
//! This crate wraps the pure engine from `werewolf-core` with everything that
//! touches the outside world. Consumers build a [`MatchService`] and drive
//! matches through it, subscribe to lobby and play events, or open a
//! [`ChangeFeed`] to follow one match as a viewer.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the service, its builder, and boundary errors
//! - [`repository`] stores match records and owns the exclusive region
//! - [`feed`] polls a stored match and emits per-viewer snapshots
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`config`] holds runtime-tunable settings
pub mod api;
pub mod config;
pub mod events;
pub mod feed;
pub mod repository;

pub use api::{Created, MatchService, Result, ServiceBuilder, ServiceError, Status};
pub use config::{FeedConfig, RuntimeConfig};
pub use events::{Event, EventBus, LobbyEvent, PlayEvent, Topic};
pub use feed::{ChangeFeed, FeedEvent};
pub use repository::{
    Exclusive, FileMatchRepository, InMemoryMatchRepo, MatchRepository, MatchStore,
    RepositoryError,
};
