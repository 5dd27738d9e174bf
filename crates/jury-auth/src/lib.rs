//! # jury-auth
//!
//! Authentication seam for the jury space.
//!
//! The sign-in handshake itself belongs to the managed backend. This crate
//! defines what the jury workflow needs from it ([`JuryAuthenticator`]), the
//! credential normalisation applied before sign-in, and the gate that turns
//! an authenticated user into a [`JurorIdentity`](jury_core::identity::JurorIdentity).

pub mod credentials;
pub mod error;
pub mod gate;

use async_trait::async_trait;
use jury_core::identity::AuthUser;

pub use credentials::Credentials;
pub use error::AuthError;
pub use gate::{authorize_juror, login};

/// Auth collaborator backed by the managed service.
#[async_trait]
pub trait JuryAuthenticator: Send + Sync {
    /// The currently signed-in user, if any.
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError>;

    /// Sign in with normalised credentials.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;

    /// Jury member ID for `user_id`, or `None` if the user is not on the jury.
    async fn jury_member_id(&self, user_id: &str) -> Result<Option<String>, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn is_jury_member(&self, user_id: &str) -> Result<bool, AuthError> {
        Ok(self.jury_member_id(user_id).await?.is_some())
    }
}
