//! Row view models and the list builders that produce them.

// self
use crate::{
	api::models::{AdminUser, NotificationPage, Transaction, TransactionPage},
	view::{ListView, Pager, format_naira, format_timestamp},
};

/// Placeholder for an empty transaction history.
pub const NO_TRANSACTIONS: &str = "No transactions found";
/// Placeholder for an empty notification list.
pub const NO_NOTIFICATIONS: &str = "No notifications";
/// Placeholder for an empty funding-request list.
pub const NO_FUND_REQUESTS: &str = "No funding requests found";
/// Placeholder for an empty user search result.
pub const NO_USERS: &str = "No users found";

/// One rendered transaction-history row.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRow {
	/// Backend reference shown on the row.
	pub reference: String,
	/// Category, e.g. `funding`, `airtime`.
	pub kind: String,
	/// Formatted amount; funding rows carry a leading `+`.
	pub amount: String,
	/// Lifecycle state, e.g. `pending`, `success`.
	pub status: String,
	/// Display timestamp.
	pub date: String,
	/// Channel shown on funding rows, e.g. `bank_transfer`.
	pub payment_method: Option<String>,
}
impl TransactionRow {
	fn from_tx(tx: &Transaction) -> Self {
		let is_funding = tx.kind == "funding";
		let amount = if is_funding && tx.amount > 0. {
			format!("+{}", format_naira(tx.amount))
		} else {
			format_naira(tx.amount)
		};

		Self {
			reference: tx.reference.clone(),
			kind: tx.kind.clone(),
			amount,
			status: tx.status.clone(),
			date: format_timestamp(&tx.created_at),
			payment_method: is_funding
				.then(|| tx.metadata.as_ref().and_then(|m| m.payment_method.clone()))
				.flatten(),
		}
	}
}

/// One rendered notification row.
#[derive(Clone, Debug, PartialEq)]
pub struct NotificationRow {
	/// Backend identifier, used to mark the row read.
	pub id: String,
	/// Headline.
	pub title: String,
	/// Body text.
	pub message: String,
	/// Whether to show the unread marker.
	pub unread: bool,
	/// Display timestamp.
	pub date: String,
}

/// One rendered funding-request row.
#[derive(Clone, Debug, PartialEq)]
pub struct FundRequestRow {
	/// Backend identifier, used for admin decisions.
	pub id: String,
	/// Formatted amount.
	pub amount: String,
	/// Status badge text, e.g. `pending`, `approved`.
	pub status: String,
	/// Channel the funds were supplied through.
	pub payment_method: Option<String>,
	/// Payment reference quoted by the requester.
	pub reference: String,
	/// Display timestamp.
	pub date: String,
	/// Whether the approve and reject affordances render.
	pub decidable: bool,
	/// Requester display name; populated on admin review rows.
	pub requester_name: Option<String>,
	/// Requester email; populated on admin review rows.
	pub requester_email: Option<String>,
}
impl FundRequestRow {
	fn from_tx(tx: &Transaction) -> Self {
		Self {
			id: tx.id.clone(),
			amount: format_naira(tx.amount),
			status: tx.status.clone(),
			payment_method: tx.metadata.as_ref().and_then(|m| m.payment_method.clone()),
			reference: tx.reference.clone(),
			date: format_timestamp(&tx.created_at),
			decidable: tx.is_decidable(),
			requester_name: tx.user.as_ref().map(|u| u.name.clone()),
			requester_email: tx.user.as_ref().map(|u| u.email.clone()),
		}
	}
}

/// One rendered user search result.
#[derive(Clone, Debug, PartialEq)]
pub struct UserRow {
	/// Backend identifier, used to fund the wallet.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Login email.
	pub email: String,
	/// Formatted wallet balance.
	pub balance: String,
}

/// Renders one page of transaction history.
pub fn transaction_list(page: &TransactionPage) -> ListView<TransactionRow> {
	ListView::build(
		page.transactions.iter().map(TransactionRow::from_tx).collect(),
		NO_TRANSACTIONS,
		page.pagination.as_ref().map(Pager::from_meta),
	)
}

/// Renders one page of notifications, preserving server order.
pub fn notification_list(page: &NotificationPage) -> ListView<NotificationRow> {
	ListView::build(
		page.notifications
			.iter()
			.map(|n| NotificationRow {
				id: n.id.clone(),
				title: n.title.clone(),
				message: n.message.clone(),
				unread: !n.is_read,
				date: format_timestamp(&n.created_at),
			})
			.collect(),
		NO_NOTIFICATIONS,
		page.pagination.as_ref().map(Pager::from_meta),
	)
}

/// Renders one page of funding requests, for the account view or admin review.
pub fn fund_request_list(page: &TransactionPage) -> ListView<FundRequestRow> {
	ListView::build(
		page.transactions.iter().map(FundRequestRow::from_tx).collect(),
		NO_FUND_REQUESTS,
		page.pagination.as_ref().map(Pager::from_meta),
	)
}

/// Renders the admin user search results.
pub fn user_search_list(users: &[AdminUser]) -> ListView<UserRow> {
	ListView::build(
		users
			.iter()
			.map(|user| UserRow {
				id: user.id.clone(),
				name: user.name.clone(),
				email: user.email.clone(),
				balance: format_naira(user.wallet_balance),
			})
			.collect(),
		NO_USERS,
		None,
	)
}
