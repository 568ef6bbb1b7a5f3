//! Sign-up, sign-in, and password recovery against the public auth endpoints.

// self
use crate::{
	_prelude::*,
	api::{ApiCall, models::AuthPayload},
	auth::{Session, UserAccount},
	flows::{Client, common},
	http::HttpTransport,
	obs::Operation,
	validate::{FormIssues, is_acceptable_password, is_valid_email, is_valid_nigerian_phone},
};

/// Credentials submitted by the login form.
#[derive(Clone)]
pub struct LoginForm {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl LoginForm {
	fn validate(&self) -> Result<(), FormIssues> {
		let mut issues = FormIssues::new();

		if issues.require("email", &self.email, "Email is required")
			&& !is_valid_email(self.email.trim())
		{
			issues.push("email", "Please enter a valid email address");
		}

		issues.require("password", &self.password, "Password is required");

		issues.into_result()
	}
}
impl Debug for LoginForm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginForm").field("email", &self.email).finish_non_exhaustive()
	}
}

/// Fields submitted by the signup form.
#[derive(Clone)]
pub struct SignupForm {
	/// Display name.
	pub name: String,
	/// Account email.
	pub email: String,
	/// Nigerian mobile number.
	pub phone: String,
	/// Chosen password.
	pub password: String,
	/// Password typed a second time.
	pub confirm_password: String,
	/// Whether the terms checkbox was ticked.
	pub accepted_terms: bool,
}
impl SignupForm {
	fn validate(&self) -> Result<(), FormIssues> {
		let mut issues = FormIssues::new();

		issues.require("name", &self.name, "Name is required");

		if issues.require("email", &self.email, "Email is required")
			&& !is_valid_email(self.email.trim())
		{
			issues.push("email", "Please enter a valid email address");
		}
		if issues.require("phone", &self.phone, "Phone number is required")
			&& !is_valid_nigerian_phone(self.phone.trim())
		{
			issues.push("phone", "Please enter a valid Nigerian phone number");
		}
		if issues.require("password", &self.password, "Password is required")
			&& !is_acceptable_password(&self.password)
		{
			issues.push("password", "Password must be at least 8 characters");
		}
		if self.confirm_password != self.password {
			issues.push("confirmPassword", "Passwords do not match");
		}
		if !self.accepted_terms {
			issues.push("terms", "You must accept the terms and conditions");
		}

		issues.into_result()
	}
}
impl Debug for SignupForm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignupForm")
			.field("name", &self.name)
			.field("email", &self.email)
			.field("phone", &self.phone)
			.finish_non_exhaustive()
	}
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Signs in and persists the issued session.
	pub async fn login(&self, form: LoginForm) -> Result<UserAccount> {
		form.validate()?;

		self.submit(Operation::Login, None, async {
			let call = ApiCall::post(
				"/api/auth/login",
				serde_json::json!({
					"email": form.email.trim(),
					"password": form.password,
				}),
			);
			let response = self.send_public(&call).await?;
			let payload = common::payload::<AuthPayload>(&response, "Login failed")?;

			self.adopt_session(payload, "Login failed").await
		})
		.await
	}

	/// Creates an account and persists the issued session.
	pub async fn register(&self, form: SignupForm) -> Result<UserAccount> {
		form.validate()?;

		self.submit(Operation::Register, None, async {
			let call = ApiCall::post(
				"/api/auth/register",
				serde_json::json!({
					"name": form.name.trim(),
					"email": form.email.trim(),
					"password": form.password,
					"phone": form.phone.trim(),
				}),
			);
			let response = self.send_public(&call).await?;
			let payload = common::payload::<AuthPayload>(&response, "Registration failed")?;

			self.adopt_session(payload, "Registration failed").await
		})
		.await
	}

	/// Clears the session and every piece of session-scoped state. No network call.
	pub async fn logout(&self) -> Result<()> {
		self.teardown().await;

		Ok(())
	}

	/// Returns the stored account, clearing a session that fails the shape check.
	///
	/// The all-or-nothing invariant: a stored session whose account is missing
	/// its identifier or email is corrupt, and all three keys go together.
	pub async fn current_user(&self) -> Result<Option<UserAccount>> {
		match self.store.load().await? {
			Some(session) =>
				if session.validate().is_ok() {
					Ok(Some(session.user))
				} else {
					self.teardown().await;

					Ok(None)
				},
			None => Ok(None),
		}
	}

	/// Requests a password reset link; yields the server's confirmation message.
	pub async fn forgot_password(&self, email: &str) -> Result<Option<String>> {
		let mut issues = FormIssues::new();

		if issues.require("email", email, "Email is required") && !is_valid_email(email.trim()) {
			issues.push("email", "Please enter a valid email address");
		}

		issues.into_result()?;

		self.submit(Operation::ForgotPassword, None, async {
			let call = ApiCall::post(
				"/api/auth/forgot-password",
				serde_json::json!({ "email": email.trim() }),
			);
			let response = self.send_public(&call).await?;

			common::acknowledged(&response, "Failed to send the reset link")
		})
		.await
	}

	/// Completes a password reset with the emailed token.
	pub async fn reset_password(
		&self,
		token: &str,
		password: &str,
		confirm: &str,
	) -> Result<Option<String>> {
		let mut issues = FormIssues::new();

		issues.require("token", token, "Reset token is required");

		if issues.require("password", password, "Password is required")
			&& !is_acceptable_password(password)
		{
			issues.push("password", "Password must be at least 8 characters");
		}
		if confirm != password {
			issues.push("confirmPassword", "Passwords do not match");
		}

		issues.into_result()?;

		self.submit(Operation::ResetPassword, None, async {
			let call = ApiCall::post(
				"/api/auth/reset-password",
				serde_json::json!({ "token": token, "password": password }),
			);
			let response = self.send_public(&call).await?;

			common::acknowledged(&response, "Failed to reset the password")
		})
		.await
	}

	async fn adopt_session(&self, payload: AuthPayload, fallback: &str) -> Result<UserAccount> {
		let session = Session::new(payload.access_token, payload.refresh_token, payload.user);

		if session.validate().is_err() {
			return Err(Error::Api { message: fallback.into(), status: None });
		}

		self.store.save(session.clone()).await?;

		Ok(session.user)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn login_forms_require_both_fields() {
		let form = LoginForm { email: "  ".into(), password: String::new() };
		let issues = form.validate().expect_err("Empty form should be rejected.");

		assert_eq!(issues.issues().len(), 2);

		let form = LoginForm { email: "ada@example".into(), password: "hunter22".into() };

		assert!(form.validate().is_err());

		let form = LoginForm { email: "ada@example.com".into(), password: "hunter22".into() };

		assert!(form.validate().is_ok());
	}

	#[test]
	fn signup_forms_enforce_every_rule() {
		let form = SignupForm {
			name: "Ada Obi".into(),
			email: "ada@example.com".into(),
			phone: "08031234567".into(),
			password: "Abcdefg1".into(),
			confirm_password: "Abcdefg1".into(),
			accepted_terms: true,
		};

		assert!(form.validate().is_ok());

		let mut mismatched = form.clone();

		mismatched.confirm_password = "different1".into();

		let issues = mismatched.validate().expect_err("Mismatch should be rejected.");

		assert!(issues.to_string().contains("Passwords do not match"));

		let mut unaccepted = form.clone();

		unaccepted.accepted_terms = false;

		assert!(unaccepted.validate().is_err());

		let mut short = form;

		short.password = "Ab1".into();
		short.confirm_password = "Ab1".into();

		let issues = short.validate().expect_err("Short password should be rejected.");

		assert!(issues.to_string().contains("at least 8 characters"));
	}

	#[test]
	fn form_debug_never_prints_passwords() {
		let form = LoginForm { email: "ada@example.com".into(), password: "hunter22".into() };

		assert!(!format!("{form:?}").contains("hunter22"));

		let form = SignupForm {
			name: "Ada".into(),
			email: "ada@example.com".into(),
			phone: "08031234567".into(),
			password: "hunter22".into(),
			confirm_password: "hunter22".into(),
			accepted_terms: true,
		};

		assert!(!format!("{form:?}").contains("hunter22"));
	}
}
