//! User lookup and creation, the only persistence the authentication core consumes.
//!
//! `CredentialVerifier` and `TokenGate` receive an `Arc<dyn UserStore>` at construction
//! and never know which backend sits behind it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, User};

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by an already-normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Persists a new user.
    ///
    /// Emails are unique; a duplicate must fail with `AppError::Conflict`.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;
}
