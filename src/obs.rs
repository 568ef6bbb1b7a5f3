//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `easysub_client.op` with the `operation`
//!   (catalog entry) and `stage` (call site) fields; the `outcome` field is filled in once the
//!   operation settles.
//! - Enable `metrics` to increment the `easysub_client_request_total` counter for every
//!   attempt/success/failure/abort, labeled by `operation` + `outcome`, and the
//!   `easysub_client_session_teardown_total` counter whenever the session is force-cleared.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Backend operations observed by the client.
///
/// One variant per catalog entry; the in-flight registry and busy latch key
/// their slots by it, and spans and metrics use its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Credential sign-in.
	Login,
	/// Account creation.
	Register,
	/// Password reset link request.
	ForgotPassword,
	/// Password reset completion.
	ResetPassword,
	/// Password change from the profile page.
	ChangePassword,
	/// Access token refresh.
	RefreshSession,
	/// Profile read.
	Profile,
	/// Profile update.
	UpdateProfile,
	/// Wallet balance read.
	Balance,
	/// Transaction history page read.
	Transactions,
	/// Wallet statement export.
	ExportStatement,
	/// Wallet funding request submission.
	FundRequest,
	/// Funding request history read.
	FundRequests,
	/// Airtime, data, TV, or electricity purchase.
	Purchase,
	/// TV bouquet catalog read.
	TvVariations,
	/// Smartcard customer lookup.
	CustomerLookup,
	/// Smartcard field verification pass.
	SmartcardVerification,
	/// Notification list read.
	Notifications,
	/// Unread notification count read.
	UnreadCount,
	/// Single notification read receipt.
	MarkNotificationRead,
	/// Bulk notification read receipt.
	MarkAllNotificationsRead,
	/// Admin dashboard statistics read.
	AdminStats,
	/// Admin funding request review read.
	AdminFundRequests,
	/// Admin funding request approval.
	ApproveFundRequest,
	/// Admin funding request rejection.
	RejectFundRequest,
	/// Admin direct wallet funding.
	AdminFundWallet,
	/// Admin user search.
	UserSearch,
	/// Backend health probe.
	HealthProbe,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Login => "login",
			Operation::Register => "register",
			Operation::ForgotPassword => "forgot_password",
			Operation::ResetPassword => "reset_password",
			Operation::ChangePassword => "change_password",
			Operation::RefreshSession => "refresh_session",
			Operation::Profile => "profile",
			Operation::UpdateProfile => "update_profile",
			Operation::Balance => "balance",
			Operation::Transactions => "transactions",
			Operation::ExportStatement => "export_statement",
			Operation::FundRequest => "fund_request",
			Operation::FundRequests => "fund_requests",
			Operation::Purchase => "purchase",
			Operation::TvVariations => "tv_variations",
			Operation::CustomerLookup => "customer_lookup",
			Operation::SmartcardVerification => "smartcard_verification",
			Operation::Notifications => "notifications",
			Operation::UnreadCount => "unread_count",
			Operation::MarkNotificationRead => "mark_notification_read",
			Operation::MarkAllNotificationsRead => "mark_all_notifications_read",
			Operation::AdminStats => "admin_stats",
			Operation::AdminFundRequests => "admin_fund_requests",
			Operation::ApproveFundRequest => "approve_fund_request",
			Operation::RejectFundRequest => "reject_fund_request",
			Operation::AdminFundWallet => "admin_fund_wallet",
			Operation::UserSearch => "user_search",
			Operation::HealthProbe => "health_probe",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Superseded by a newer request for the same operation.
	Aborted,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
			OpOutcome::Aborted => "aborted",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
