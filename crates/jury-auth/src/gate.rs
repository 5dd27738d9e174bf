//! Jury-membership gate.
//!
//! Every entry into the jury space goes through here: a user must be signed
//! in and must resolve to a jury member ID. A signed-in non-juror is signed
//! out again before the refusal is returned.

use jury_core::identity::{AuthUser, JurorIdentity};

use crate::{AuthError, Credentials, JuryAuthenticator};

/// Resolve the current user into a juror identity.
///
/// Performs no data access beyond the two auth calls.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` without a signed-in user,
/// `AuthError::NotJuryMember` if the user is not on the jury, or the
/// provider's error if a lookup fails.
pub async fn authorize_juror<A>(auth: &A) -> Result<JurorIdentity, AuthError>
where
    A: JuryAuthenticator + ?Sized,
{
    let Some(user) = auth.current_user().await? else {
        tracing::debug!("jury gate: no signed-in user");
        return Err(AuthError::NotAuthenticated);
    };
    resolve_juror(auth, &user).await
}

/// Sign in with e-mail and password, then apply the jury gate.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for empty input, the provider's
/// error if sign-in fails, or `AuthError::NotJuryMember` if the account is
/// not on the jury.
pub async fn login<A>(auth: &A, email: &str, password: &str) -> Result<JurorIdentity, AuthError>
where
    A: JuryAuthenticator + ?Sized,
{
    let credentials = Credentials::new(email, password)?;
    let user = auth.sign_in(&credentials).await?;
    tracing::debug!(user = %user.id, "jury login: signed in");
    resolve_juror(auth, &user).await
}

async fn resolve_juror<A>(auth: &A, user: &AuthUser) -> Result<JurorIdentity, AuthError>
where
    A: JuryAuthenticator + ?Sized,
{
    match auth.jury_member_id(&user.id).await {
        Ok(Some(jury_member_id)) => {
            tracing::info!(user = %user.id, juror = %jury_member_id, "jury gate: access granted");
            return Ok(JurorIdentity::new(user, jury_member_id));
        }
        Ok(None) => tracing::warn!(user = %user.id, "jury gate: not a jury member"),
        Err(error) => {
            tracing::warn!(user = %user.id, %error, "jury gate: membership lookup failed");
        }
    }

    if let Err(sign_out_error) = auth.sign_out().await {
        tracing::error!(
            user = %user.id,
            %sign_out_error,
            "jury gate: failed to sign out refused user"
        );
    }
    Err(AuthError::NotJuryMember)
}
