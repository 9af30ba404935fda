//! Users Domain
//!
//! An in-memory user directory with CRUD over HTTP.
//!
//! # Rules
//!
//! - Ids are assigned by the directory, start at 1 and are never reused
//! - Names and emails are stored trimmed; roles trimmed and upper-cased
//! - Emails are unique ignoring case
//! - Roles come from the closed set `{ADMIN, USER, MANAGER}`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status codes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Directory  │  ← Sanitization, business validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Table, id counter, email uniqueness
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, UserRequest, Role
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserDirectory,
//! };
//!
//! let repository = InMemoryUserRepository::new();
//! let directory = UserDirectory::new(repository);
//!
//! let router: axum::Router = handlers::router(directory);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{NewUser, Role, SanitizedUser, User, UserRequest, sanitize, validate};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserDirectory;
