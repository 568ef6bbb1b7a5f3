//! Persisted session: token pair plus the account they belong to.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, UserAccount},
};

/// Client-held session persisted by the [`SessionStore`](crate::store::SessionStore).
///
/// Invariant: the access token and the account are either both present and
/// valid or the whole session is absent. [`Session::validate`] enforces the
/// shape; callers that observe a violation must clear the store rather than
/// patch individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	/// Short-lived bearer credential attached to every authenticated call.
	pub access_token: TokenSecret,
	/// Long-lived credential exchanged for fresh access tokens.
	pub refresh_token: TokenSecret,
	/// Account the tokens were issued for.
	pub user: UserAccount,
}
impl Session {
	/// Assembles a session from freshly issued credentials.
	pub fn new(
		access_token: impl Into<TokenSecret>,
		refresh_token: impl Into<TokenSecret>,
		user: UserAccount,
	) -> Self {
		Self { access_token: access_token.into(), refresh_token: refresh_token.into(), user }
	}

	/// Checks the all-or-nothing shape invariant.
	pub fn validate(&self) -> Result<(), SessionIssue> {
		if self.access_token.is_empty() {
			return Err(SessionIssue::MissingAccessToken);
		}

		self.user.shape_check()
	}

	/// Returns the session with only the access token replaced.
	///
	/// Token refresh rotates the short-lived credential and must leave the
	/// refresh token and account untouched.
	pub fn with_access_token(mut self, access_token: impl Into<TokenSecret>) -> Self {
		self.access_token = access_token.into();

		self
	}
}

/// Shape violations detected on a stored session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum SessionIssue {
	/// Access token slot is empty.
	#[error("Session access token is empty.")]
	MissingAccessToken,
	/// Stored account is missing a required field.
	#[error("Session user is missing the `{field}` field.")]
	IncompleteUser {
		/// Name of the absent field.
		field: &'static str,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn user() -> UserAccount {
		UserAccount {
			id: "64aa01".into(),
			name: "Ada N.".into(),
			email: "ada@example.com".into(),
			phone: None,
			role: None,
			wallet_balance: None,
		}
	}

	#[test]
	fn validate_accepts_a_complete_session() {
		let session = Session::new("access-1", "refresh-1", user());

		assert!(session.validate().is_ok());
	}

	#[test]
	fn validate_rejects_an_empty_access_token() {
		let session = Session::new("", "refresh-1", user());

		assert_eq!(session.validate(), Err(SessionIssue::MissingAccessToken));
	}

	#[test]
	fn validate_rejects_a_corrupt_user_object() {
		let mut bad_user = user();

		bad_user.email = String::new();

		let session = Session::new("access-1", "refresh-1", bad_user);

		assert_eq!(session.validate(), Err(SessionIssue::IncompleteUser { field: "email" }));
	}

	#[test]
	fn rotation_touches_only_the_access_token() {
		let session = Session::new("access-1", "refresh-1", user());
		let rotated = session.clone().with_access_token("access-2");

		assert_eq!(rotated.access_token.expose(), "access-2");
		assert_eq!(rotated.refresh_token, session.refresh_token);
		assert_eq!(rotated.user, session.user);
	}

	#[test]
	fn session_uses_the_persisted_key_names() {
		let session = Session::new("access-1", "refresh-1", user());
		let json = serde_json::to_value(&session).expect("Session should serialize to JSON.");

		assert!(json.get("accessToken").is_some());
		assert!(json.get("refreshToken").is_some());
		assert!(json.get("user").is_some());
	}
}
