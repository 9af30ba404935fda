//! Shared application state.

use domain_users::{InMemoryUserRepository, UserDirectory};

/// State built once at startup and handed to the route builders.
///
/// The directory is the only owner of the user table; clones share it.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub users: UserDirectory<InMemoryUserRepository>,
}
