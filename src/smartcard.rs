//! Smartcard format rules and the debounced verification pipeline.

pub mod pipeline;

pub use pipeline::*;

// self
use crate::_prelude::*;

/// TV provider selected on the subscription form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TvProvider {
	/// DStv decoders, 10-11 digit smartcards.
	Dstv,
	/// GOtv decoders, exactly 10 digit smartcards.
	Gotv,
	/// StarTimes decoders, 10-12 digit smartcards.
	Startimes,
	/// Any other provider, validated with the generic 8-15 digit rule.
	Other(String),
}
impl TvProvider {
	/// Parses a form value, case-insensitively for the known providers.
	pub fn parse(value: &str) -> Self {
		match value.to_lowercase().as_str() {
			"dstv" => Self::Dstv,
			"gotv" => Self::Gotv,
			"startimes" => Self::Startimes,
			_ => Self::Other(value.into()),
		}
	}

	/// Wire value sent in query strings and purchase bodies.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Dstv => "dstv",
			Self::Gotv => "gotv",
			Self::Startimes => "startimes",
			Self::Other(value) => value,
		}
	}
}
impl Display for TvProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for TvProvider {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(s))
	}
}

/// Outcome of checking a smartcard number against a provider's format rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatCheck {
	/// No number was entered.
	Missing,
	/// The number does not fit the provider's rule.
	Invalid(&'static str),
	/// The number fits; `normalized` has spaces and dashes stripped.
	Valid {
		/// Digits-only form submitted to the backend.
		normalized: String,
	},
}
impl FormatCheck {
	/// Message describing the outcome.
	pub fn message(&self) -> &'static str {
		match self {
			Self::Missing => "Smartcard number is required",
			Self::Invalid(message) => message,
			Self::Valid { .. } => "Valid format",
		}
	}

	/// True when the number may be submitted.
	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid { .. })
	}
}

/// Checks `raw` against `provider`'s smartcard rule.
///
/// Spaces and dashes are stripped before the length rules apply: DStv takes
/// 10-11 digits, GOtv exactly 10, StarTimes 10-12, anything else 8-15.
pub fn check_format(provider: &TvProvider, raw: &str) -> FormatCheck {
	if raw.trim().is_empty() {
		return FormatCheck::Missing;
	}

	let normalized =
		raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect::<String>();
	let digits = normalized.chars().count();
	let all_digits = !normalized.is_empty() && normalized.chars().all(|c| c.is_ascii_digit());
	let fits = |lo: usize, hi: usize| all_digits && (lo..=hi).contains(&digits);

	match provider {
		TvProvider::Dstv if !fits(10, 11) =>
			FormatCheck::Invalid("DStv smartcard must be 10-11 digits"),
		TvProvider::Gotv if !fits(10, 10) =>
			FormatCheck::Invalid("GOtv smartcard must be 10 digits"),
		TvProvider::Startimes if !fits(10, 12) =>
			FormatCheck::Invalid("StarTimes smartcard must be 10-12 digits"),
		TvProvider::Other(_) if !fits(8, 15) =>
			FormatCheck::Invalid("Invalid smartcard number format"),
		_ => FormatCheck::Valid { normalized },
	}
}
