//! View models and formatting for host UIs.
//!
//! Flows return typed payloads; this module turns them into display-ready
//! strings, list view models with fixed empty-state placeholders, pagination
//! affordances, and auto-expiring alerts. Nothing here touches the network.

pub mod rows;

pub use rows::*;

// crates.io
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{_prelude::*, api::models::{PageMeta, Transaction}};

/// Balance label shown before the first successful balance read.
pub const EMPTY_BALANCE: &str = "₦0.00";

const DISPLAY_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
	"[month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period case:upper]"
);
const STATEMENT_FORMAT: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats an amount as naira currency with two decimals, e.g. `₦12,500.00`.
pub fn format_naira(amount: f64) -> String {
	let sign = if amount < 0. { "-" } else { "" };
	let cents = (amount.abs() * 100.).round() as u64;

	format!("{sign}₦{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Formats an amount as naira with separators and no trailing zeros, e.g.
/// `₦12,500` or `₦1,500.5`.
pub fn format_naira_grouped(amount: f64) -> String {
	let sign = if amount < 0. { "-" } else { "" };
	let mills = (amount.abs() * 1_000.).round() as u64;
	let mut label = format!("{sign}₦{}", group_thousands(mills / 1_000));
	let fraction = mills % 1_000;

	if fraction != 0 {
		label.push('.');
		label.push_str(format!("{fraction:03}").trim_end_matches('0'));
	}

	label
}

/// Label for a wallet balance that may not have loaded yet.
pub fn balance_label(balance: Option<f64>) -> String {
	balance.map_or_else(|| EMPTY_BALANCE.into(), format_naira_grouped)
}

/// Renders a backend timestamp for display, e.g. `Mar 2, 2025, 9:15 AM`.
///
/// Timestamps render in UTC; a value that does not parse as RFC 3339 is
/// returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
	OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
		.ok()
		.and_then(|moment| moment.format(DISPLAY_FORMAT).ok())
		.unwrap_or_else(|| raw.into())
}

fn statement_timestamp(raw: &str) -> String {
	OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
		.ok()
		.and_then(|moment| moment.format(STATEMENT_FORMAT).ok())
		.unwrap_or_else(|| raw.into())
}

fn group_thousands(value: u64) -> String {
	let digits = value.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

	for (i, digit) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}

		grouped.push(digit);
	}

	grouped
}

/// Builds the CSV wallet statement: a fixed header and one row per transaction.
pub fn statement_csv(transactions: &[Transaction]) -> String {
	let mut csv = String::from("Reference,Type,Amount,Status,Date\n");

	for tx in transactions {
		csv.push_str(&format!(
			"{},{},{},{},{}\n",
			tx.reference,
			tx.kind,
			tx.amount,
			tx.status,
			statement_timestamp(&tx.created_at),
		));
	}

	csv
}

/// File name the statement downloads under, dated with the current UTC day.
pub fn statement_filename(now: OffsetDateTime) -> String {
	format!(
		"wallet-statement-{:04}-{:02}-{:02}.csv",
		now.year(),
		u8::from(now.month()),
		now.day(),
	)
}

/// Pagination affordances derived from a server pagination block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
	/// 1-based page currently shown.
	pub page: u32,
	/// Total pages available.
	pub pages: u32,
}
impl Pager {
	/// Derives the affordances from a server pagination block.
	pub fn from_meta(meta: &PageMeta) -> Self {
		Self { page: meta.page.max(1), pages: meta.pages.max(1) }
	}

	/// Page the "Previous" affordance loads; `None` disables it.
	pub fn previous_page(&self) -> Option<u32> {
		(self.page > 1).then(|| self.page - 1)
	}

	/// Page the "Next" affordance loads; `None` disables it.
	pub fn next_page(&self) -> Option<u32> {
		(self.page < self.pages).then(|| self.page + 1)
	}

	/// Position label, e.g. `Page 2 of 5`.
	pub fn label(&self) -> String {
		format!("Page {} of {}", self.page, self.pages)
	}
}

/// A rendered list: rows with optional paging, or a single placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum ListView<R> {
	/// Empty result; show the placeholder instead of an empty container.
	Placeholder(&'static str),
	/// Non-empty result.
	Rows {
		/// Row view models in server order.
		rows: Vec<R>,
		/// Paging affordances, when the server paginated.
		pager: Option<Pager>,
	},
}
impl<R> ListView<R> {
	/// Builds the view, collapsing an empty row set into the placeholder.
	pub fn build(rows: Vec<R>, placeholder: &'static str, pager: Option<Pager>) -> Self {
		if rows.is_empty() { Self::Placeholder(placeholder) } else { Self::Rows { rows, pager } }
	}

	/// Rows to render; empty for a placeholder view.
	pub fn rows(&self) -> &[R] {
		match self {
			Self::Placeholder(_) => &[],
			Self::Rows { rows, .. } => rows,
		}
	}

	/// Placeholder text, when there is nothing to list.
	pub fn placeholder(&self) -> Option<&'static str> {
		match self {
			Self::Placeholder(text) => Some(text),
			Self::Rows { .. } => None,
		}
	}
}

/// Severity of a transient alert banner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertSeverity {
	#[default]
	/// Red banner.
	Error,
	/// Green banner.
	Success,
}

/// A dismissible banner that expires on its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
	/// Text shown in the banner.
	pub message: String,
	/// Banner color.
	pub severity: AlertSeverity,
	/// How long the banner stays up before dismissing itself.
	pub expires_after: Duration,
}
impl Alert {
	/// Builds a success banner.
	pub fn success(message: impl Into<String>, expires_after: Duration) -> Self {
		Self { message: message.into(), severity: AlertSeverity::Success, expires_after }
	}

	/// Builds an error banner.
	pub fn error(message: impl Into<String>, expires_after: Duration) -> Self {
		Self { message: message.into(), severity: AlertSeverity::Error, expires_after }
	}

	/// Builds the banner for a failed operation.
	///
	/// Superseded operations yield `None`: an aborted request must not
	/// produce any user-visible update.
	pub fn from_error(error: &Error, fallback: &str, expires_after: Duration) -> Option<Self> {
		if error.is_aborted() {
			None
		} else {
			Some(Self::error(error.user_message(fallback), expires_after))
		}
	}
}
