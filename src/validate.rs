//! Client-side form validation primitives.
//!
//! Forms collect their problems into [`FormIssues`] before any network call;
//! a non-empty collection converts into [`Error::Validation`] and the request
//! is never issued. The predicates mirror the rules the backend enforces.

// self
use crate::_prelude::*;

/// One rejected form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldIssue {
	/// Field identifier, e.g. `email`.
	pub field: &'static str,
	/// Message suitable for direct display next to the field.
	pub message: &'static str,
}

/// Collected validation problems for one form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, ThisError)]
#[error("{}", render_issues(.issues))]
pub struct FormIssues {
	issues: Vec<FieldIssue>,
}
impl FormIssues {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a problem for `field`.
	pub fn push(&mut self, field: &'static str, message: &'static str) {
		self.issues.push(FieldIssue { field, message });
	}

	/// Records `message` when `value` is blank, returning whether it was present.
	///
	/// The return value lets format checks chain only behind presence checks.
	pub fn require(&mut self, field: &'static str, value: &str, message: &'static str) -> bool {
		let present = !value.trim().is_empty();

		if !present {
			self.push(field, message);
		}

		present
	}

	/// Recorded problems in submission order.
	pub fn issues(&self) -> &[FieldIssue] {
		&self.issues
	}

	/// True when every check passed.
	pub fn is_empty(&self) -> bool {
		self.issues.is_empty()
	}

	/// Converts the collection into a result for `?` propagation.
	pub fn into_result(self) -> Result<(), Self> {
		if self.is_empty() { Ok(()) } else { Err(self) }
	}
}

fn render_issues(issues: &[FieldIssue]) -> String {
	issues.iter().map(|issue| issue.message).collect::<Vec<_>>().join("; ")
}

/// Checks the `local@domain.tld` shape: exactly one `@`, no whitespace, a
/// non-empty local part, and a dot inside the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
	if email.chars().any(char::is_whitespace) {
		return false;
	}

	let mut parts = email.splitn(2, '@');
	let local = parts.next().unwrap_or_default();
	let Some(domain) = parts.next() else {
		return false;
	};

	if local.is_empty() || domain.contains('@') {
		return false;
	}

	let chars = domain.chars().collect::<Vec<_>>();

	chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

/// Checks Nigerian mobile numbers: `0` or `234`, then `7`/`8`/`9`, then
/// `0`/`1`, then eight digits.
pub fn is_valid_nigerian_phone(phone: &str) -> bool {
	let rest = if let Some(rest) = phone.strip_prefix("234") {
		rest
	} else if let Some(rest) = phone.strip_prefix('0') {
		rest
	} else {
		return false;
	};
	let bytes = rest.as_bytes();

	bytes.len() == 10
		&& matches!(bytes[0], b'7' | b'8' | b'9')
		&& matches!(bytes[1], b'0' | b'1')
		&& bytes[2..].iter().all(u8::is_ascii_digit)
}

/// Minimum length accepted for any password.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Checks the only hard password rule, the minimum length.
pub fn is_acceptable_password(password: &str) -> bool {
	password.chars().count() >= MIN_PASSWORD_CHARS
}

/// Scores a password for the signup strength meter, in 25-point steps.
///
/// Length, a lowercase letter, an uppercase letter, and a digit each add 25.
pub fn password_strength(password: &str) -> u8 {
	let mut strength = 0;

	if is_acceptable_password(password) {
		strength += 25;
	}
	if password.chars().any(|c| c.is_ascii_lowercase()) {
		strength += 25;
	}
	if password.chars().any(|c| c.is_ascii_uppercase()) {
		strength += 25;
	}
	if password.chars().any(|c| c.is_ascii_digit()) {
		strength += 25;
	}

	strength
}

/// Strength meter band shown next to the signup password field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthBand {
	/// Score of 25 or less.
	Weak,
	/// Score of 50 or less.
	Fair,
	/// Score of 75 or less.
	Good,
	/// Full score.
	Strong,
}
impl StrengthBand {
	/// Classifies a [`password_strength`] score.
	pub const fn from_percent(percent: u8) -> Self {
		match percent {
			0..=25 => Self::Weak,
			26..=50 => Self::Fair,
			51..=75 => Self::Good,
			_ => Self::Strong,
		}
	}

	/// Label shown next to the meter.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Weak => "Weak",
			Self::Fair => "Fair",
			Self::Good => "Good",
			Self::Strong => "Strong",
		}
	}
}
impl Display for StrengthBand {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn emails_need_one_at_sign_and_a_dotted_domain() {
		assert!(is_valid_email("ada@example.com"));
		assert!(is_valid_email("ada.obi@mail.example.co"));
		assert!(!is_valid_email("adaexample.com"));
		assert!(!is_valid_email("@example.com"));
		assert!(!is_valid_email("ada@example"));
		assert!(!is_valid_email("ada@example."));
		assert!(!is_valid_email("ada@.com"));
		assert!(!is_valid_email("ada obi@example.com"));
		assert!(!is_valid_email("ada@exa@mple.com"));
	}

	#[test]
	fn phone_numbers_accept_both_national_and_country_prefixes() {
		assert!(is_valid_nigerian_phone("08012345678"));
		assert!(is_valid_nigerian_phone("07112345678"));
		assert!(is_valid_nigerian_phone("09012345678"));
		assert!(is_valid_nigerian_phone("2348012345678"));
		assert!(!is_valid_nigerian_phone("08212345678"));
		assert!(!is_valid_nigerian_phone("0801234567"));
		assert!(!is_valid_nigerian_phone("080123456789"));
		assert!(!is_valid_nigerian_phone("+2348012345678"));
		assert!(!is_valid_nigerian_phone("180123456789"));
	}

	#[test]
	fn strength_climbs_in_quarter_steps() {
		assert_eq!(password_strength(""), 0);
		assert_eq!(password_strength("abcdefgh"), 50);
		assert_eq!(password_strength("Ab1"), 75);
		assert_eq!(password_strength("Abcdefg1"), 100);
	}

	#[test]
	fn bands_cover_the_whole_scale() {
		assert_eq!(StrengthBand::from_percent(0), StrengthBand::Weak);
		assert_eq!(StrengthBand::from_percent(25), StrengthBand::Weak);
		assert_eq!(StrengthBand::from_percent(50), StrengthBand::Fair);
		assert_eq!(StrengthBand::from_percent(75), StrengthBand::Good);
		assert_eq!(StrengthBand::from_percent(100), StrengthBand::Strong);
	}

	#[test]
	fn issues_render_in_submission_order() {
		let mut issues = FormIssues::new();

		assert!(!issues.require("name", "  ", "Name is required"));
		assert!(issues.require("email", "ada@", "Email is required"));

		issues.push("email", "Please enter a valid email");

		assert_eq!(issues.to_string(), "Name is required; Please enter a valid email");
		assert!(issues.into_result().is_err());
	}
}
