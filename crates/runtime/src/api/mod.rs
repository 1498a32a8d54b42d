//! Public runtime API surface.
//!
//! Everything a collaborator needs to drive matches: the service, its
//! builder, and the errors it reports.

mod builder;
mod code;
pub mod errors;
pub mod service;

pub use builder::ServiceBuilder;
pub use errors::{Result, ServiceError};
pub use service::{Created, MatchService, Status};
