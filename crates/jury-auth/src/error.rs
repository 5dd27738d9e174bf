use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: sign in to the jury space")]
    NotAuthenticated,

    #[error("account is not authorised for the jury space")]
    NotJuryMember,

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("auth provider error: {0}")]
    Provider(String),
}
