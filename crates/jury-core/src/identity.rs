use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fallback display name when the account e-mail has no usable local part.
pub const DEFAULT_JUROR_NAME: &str = "Jury member";

/// An authenticated account as reported by the auth collaborator.
///
/// Carries no jury knowledge; membership is resolved separately.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// A user confirmed as a jury member.
///
/// Produced by `jury-auth`, consumed by `jury-session` to key vote writes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct JurorIdentity {
    /// Auth account ID.
    pub user_id: String,
    /// Jury member ID used as the vote key.
    pub jury_member_id: String,
    pub display_name: String,
    pub email: Option<String>,
}

impl JurorIdentity {
    /// Build the identity for `user`, deriving the display name from the
    /// local part of the e-mail.
    #[must_use]
    pub fn new(user: &AuthUser, jury_member_id: impl Into<String>) -> Self {
        Self {
            user_id: user.id.clone(),
            jury_member_id: jury_member_id.into(),
            display_name: display_name_for(user.email.as_deref()),
            email: user.email.clone(),
        }
    }
}

fn display_name_for(email: Option<&str>) -> String {
    email
        .and_then(|email| email.split('@').next())
        .filter(|local| !local.is_empty())
        .map_or_else(|| DEFAULT_JUROR_NAME.to_string(), ToString::to_string)
}
