//! Account profile attached to a session.

// self
use crate::{_prelude::*, auth::SessionIssue};

/// Account profile returned by the backend and persisted alongside the tokens.
///
/// Unknown fields are ignored so server-side additions never break stored
/// sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
	/// Server-assigned account identifier.
	#[serde(alias = "_id")]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Account email; doubles as the referral code.
	pub email: String,
	/// Phone number on file, when set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Server-assigned role label (`admin` unlocks the admin surface).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Last known wallet balance, when the payload carries one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub wallet_balance: Option<f64>,
}
impl UserAccount {
	/// Validates the minimal shape a stored account must satisfy.
	pub fn shape_check(&self) -> Result<(), SessionIssue> {
		if self.id.trim().is_empty() {
			return Err(SessionIssue::IncompleteUser { field: "id" });
		}
		if self.email.trim().is_empty() {
			return Err(SessionIssue::IncompleteUser { field: "email" });
		}

		Ok(())
	}

	/// Referral code shared with invitees.
	pub fn referral_code(&self) -> &str {
		&self.email
	}

	/// True when the account may call the admin endpoints.
	pub fn is_admin(&self) -> bool {
		self.role.as_deref() == Some("admin")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn account() -> UserAccount {
		UserAccount {
			id: "64aa01".into(),
			name: "Ada N.".into(),
			email: "ada@example.com".into(),
			phone: Some("08031234567".into()),
			role: None,
			wallet_balance: Some(12_500.0),
		}
	}

	#[test]
	fn shape_check_requires_id_and_email() {
		assert!(account().shape_check().is_ok());

		let mut missing_id = account();

		missing_id.id = "  ".into();

		assert!(matches!(
			missing_id.shape_check(),
			Err(SessionIssue::IncompleteUser { field: "id" }),
		));

		let mut missing_email = account();

		missing_email.email = String::new();

		assert!(matches!(
			missing_email.shape_check(),
			Err(SessionIssue::IncompleteUser { field: "email" }),
		));
	}

	#[test]
	fn mongo_style_identifier_alias_is_accepted() {
		let parsed: UserAccount = serde_json::from_str(
			r#"{"_id":"64aa02","name":"Bola","email":"bola@example.com","walletBalance":300}"#,
		)
		.expect("Account with `_id` should deserialize.");

		assert_eq!(parsed.id, "64aa02");
		assert_eq!(parsed.wallet_balance, Some(300.0));
	}

	#[test]
	fn referral_code_is_the_email() {
		assert_eq!(account().referral_code(), "ada@example.com");
	}

	#[test]
	fn admin_role_gates_the_admin_surface() {
		assert!(!account().is_admin());

		let mut admin = account();

		admin.role = Some("admin".into());

		assert!(admin.is_admin());
	}
}
