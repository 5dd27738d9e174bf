//! Sign-in credentials.

use std::fmt;

use crate::AuthError;

/// E-mail and password as submitted to the auth provider.
///
/// The e-mail is trimmed and lower-cased so lookups are case-insensitive.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Normalise and validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the e-mail or password is empty.
    pub fn new(email: &str, password: impl Into<String>) -> Result<Self, AuthError> {
        let email = email.trim().to_lowercase();
        let password = password.into();
        if email.is_empty() {
            return Err(AuthError::InvalidCredentials("email is required".into()));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials("password is required".into()));
        }
        Ok(Self { email, password })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let creds = Credentials::new("  Marie.Louis@Jury.HT ", "s3cret").unwrap();
        assert_eq!(creds.email(), "marie.louis@jury.ht");
        assert_eq!(creds.password(), "s3cret");
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(
            Credentials::new("   ", "s3cret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("a@b.c", ""),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("a@b.c", "hunter2").unwrap();
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("a@b.c"));
    }
}
