//! Users Domain
//!
//! User directory with credential authentication.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Handlers   │  ← HTTP endpoints (login + CRUD)
//! └──────┬───────┘
//!        │            ┌─────────────┐
//! ┌──────▼───────┐    │ Interceptor │  ← rewrites plaintext passwords
//! │   Service    │    └─────────────┘    into bcrypt hashes ahead of
//! └──────┬───────┘                       the write handlers
//!        │
//! ┌──────▼───────┐
//! │  Repository  │  ← record store contract (trait + in-memory impl)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Models    │  ← entities, DTOs, enums
//! └──────────────┘
//! ```
//!
//! The service never sees a plaintext password on a write path: the
//! interceptor replaces the `password` field of inbound create/update
//! bodies with its hash before deserialization happens. Authentication
//! verifies a candidate against the stored hash and mints a signed token.

pub mod error;
pub mod handlers;
pub mod interceptor;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{CreateUser, Credentials, LoginResponse, Role, UpdateUser, User, UserResponse};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
