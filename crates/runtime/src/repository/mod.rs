//! Persistence for match records.
//!
//! Repositories are dumb keyed text-blob stores; [`MatchStore`] layers the
//! match codec and the exclusive region for read-modify-write cycles on top.

mod error;
mod file;
mod memory;
mod store;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileMatchRepository;
pub use memory::InMemoryMatchRepo;
pub use store::{Exclusive, MatchStore};
pub use traits::MatchRepository;
