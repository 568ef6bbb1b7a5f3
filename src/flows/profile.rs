//! Profile reads and updates, plus the signed-in password change.

// self
use crate::{
	_prelude::*,
	api::{ApiCall, models::ProfilePayload},
	auth::UserAccount,
	flows::{Client, common},
	http::HttpTransport,
	obs::Operation,
	validate::{FormIssues, is_acceptable_password, is_valid_nigerian_phone},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the account as the backend currently sees it.
	pub async fn profile(&self) -> Result<UserAccount> {
		let call = ApiCall::get("/api/user/profile");

		self.coalesced(Operation::Profile, async {
			let response = self.send_authenticated(&call).await?;

			common::payload::<ProfilePayload>(&response, "Failed to load profile")
				.map(|payload| payload.user)
		})
		.await
	}

	/// Updates the display name and phone number, patching the stored session in place.
	pub async fn update_profile(&self, name: &str, phone: &str) -> Result<UserAccount> {
		let mut issues = FormIssues::new();

		issues.require("name", name, "Name is required");

		if issues.require("phone", phone, "Phone number is required")
			&& !is_valid_nigerian_phone(phone.trim())
		{
			issues.push("phone", "Please enter a valid Nigerian phone number");
		}

		issues.into_result()?;

		self.submit(Operation::UpdateProfile, None, async {
			let call = ApiCall::put("/api/user/profile").with_body(serde_json::json!({
				"name": name.trim(),
				"phone": phone.trim(),
			}));
			let response = self.send_authenticated(&call).await?;
			let updated = common::payload::<ProfilePayload>(&response, "Failed to update profile")?
				.user;

			// Keep the persisted session in step with the backend; tokens are
			// untouched.
			if let Some(session) = self.store.load().await? {
				let mut session = session;

				session.user = updated.clone();

				self.store.save(session).await?;
			}

			Ok(updated)
		})
		.await
	}

	/// Changes the password of the signed-in account.
	pub async fn change_password(
		&self,
		current: &str,
		new: &str,
		confirm: &str,
	) -> Result<Option<String>> {
		let mut issues = FormIssues::new();

		issues.require("currentPassword", current, "Current password is required");

		if issues.require("newPassword", new, "New password is required")
			&& !is_acceptable_password(new)
		{
			issues.push("newPassword", "Password must be at least 8 characters");
		}
		if confirm != new {
			issues.push("confirmPassword", "Passwords do not match");
		}

		issues.into_result()?;

		self.submit(Operation::ChangePassword, None, async {
			let call = ApiCall::post(
				"/api/user/change-password",
				serde_json::json!({ "currentPassword": current, "newPassword": new }),
			);
			let response = self.send_authenticated(&call).await?;

			common::acknowledged(&response, "Failed to change the password")
		})
		.await
	}
}
