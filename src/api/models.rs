//! Typed payloads carried inside the response envelope.
//!
//! Field names mirror the backend wire format. Most endpoints speak
//! camelCase with Mongo-style `_id` identifiers; the TV variation catalog is
//! the one snake_case holdout.

// self
use crate::{_prelude::*, auth::{TokenSecret, UserAccount}};

/// Payload of login and register.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
	/// Bearer token for authenticated calls.
	pub access_token: TokenSecret,
	/// Long-lived token exchanged during refresh.
	pub refresh_token: TokenSecret,
	/// Account owning the session.
	pub user: UserAccount,
}

/// Payload of the token refresh endpoint.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
	/// Replacement bearer token; the refresh token itself is not rotated.
	pub access_token: TokenSecret,
}

/// Payload of profile reads and updates.
#[derive(Clone, Debug, Deserialize)]
pub struct ProfilePayload {
	/// Account as the backend now sees it.
	pub user: UserAccount,
}

/// Payload of the wallet balance endpoint.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct BalancePayload {
	/// Spendable balance in naira.
	pub balance: f64,
}

/// Pagination block attached to list payloads.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageMeta {
	/// 1-based page the payload covers.
	pub page: u32,
	/// Rows per page the backend applied.
	#[serde(default)]
	pub limit: u32,
	/// Total pages available.
	pub pages: u32,
	/// Total rows across all pages.
	#[serde(default)]
	pub total: u64,
}

/// One wallet transaction or funding request.
///
/// The backend serves funding requests from the same collection, so admin
/// review rows reuse this shape with [`Transaction::user`] populated.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	/// Backend identifier.
	#[serde(default, alias = "_id")]
	pub id: String,
	/// Category, e.g. `funding`, `airtime`, `data`, `tv`, `electricity`.
	#[serde(default, rename = "type")]
	pub kind: String,
	/// Amount in naira.
	pub amount: f64,
	/// Lifecycle state, e.g. `pending`, `success`, `failed`, `approved`.
	#[serde(default)]
	pub status: String,
	/// Backend reference shown on receipts.
	#[serde(default)]
	pub reference: String,
	/// Creation timestamp as the backend serialized it.
	#[serde(default)]
	pub created_at: String,
	/// Channel details attached to funding rows.
	#[serde(default)]
	pub metadata: Option<TxMetadata>,
	/// Requesting account, populated on admin review rows.
	#[serde(default, rename = "userId")]
	pub user: Option<RequesterRef>,
}
impl Transaction {
	/// Whether an admin can still decide this funding request.
	pub fn is_decidable(&self) -> bool {
		self.status == "pending"
	}
}

/// Channel metadata on funding transactions.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxMetadata {
	/// How the funds were supplied, e.g. `bank_transfer`.
	#[serde(default)]
	pub payment_method: Option<String>,
}

/// Account reference embedded in admin review rows.
#[derive(Clone, Debug, Deserialize)]
pub struct RequesterRef {
	/// Backend identifier.
	#[serde(default, alias = "_id")]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Login email.
	#[serde(default)]
	pub email: String,
}

/// Payload of transaction history, wallet statement, and funding request lists.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransactionPage {
	/// Rows for the requested page.
	#[serde(default)]
	pub transactions: Vec<Transaction>,
	/// Pagination block, absent on unpaginated responses.
	#[serde(default)]
	pub pagination: Option<PageMeta>,
}

/// One notification row.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
	/// Backend identifier.
	#[serde(default, alias = "_id")]
	pub id: String,
	/// Headline.
	#[serde(default)]
	pub title: String,
	/// Body text.
	#[serde(default)]
	pub message: String,
	/// Whether the account has opened it.
	#[serde(default)]
	pub is_read: bool,
	/// Creation timestamp as the backend serialized it.
	#[serde(default)]
	pub created_at: String,
}

/// Payload of the notification list and unread count endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
	/// Rows for the requested page; empty on count-only responses.
	#[serde(default)]
	pub notifications: Vec<Notification>,
	/// Unread total, served by the count endpoint.
	#[serde(default)]
	pub unread_count: Option<u32>,
	/// Pagination block, absent on count-only responses.
	#[serde(default)]
	pub pagination: Option<PageMeta>,
}
impl NotificationPage {
	/// Unread total, counting locally when the backend omitted it.
	pub fn badge_count(&self) -> u32 {
		self.unread_count
			.unwrap_or_else(|| self.notifications.iter().filter(|n| !n.is_read).count() as _)
	}
}

/// One TV bouquet offer.
///
/// Served snake_case by the variation catalog, unlike the rest of the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TvVariation {
	/// Provider-side identifier submitted back on purchase.
	pub variation_id: String,
	/// Bouquet display name.
	pub package_bouquet: String,
	/// Price in naira.
	pub price: f64,
}

/// Payload of the smartcard customer lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvCustomer {
	/// Name registered to the smartcard.
	#[serde(default)]
	pub customer_name: Option<String>,
	/// Bouquet currently active on the smartcard.
	#[serde(default)]
	pub current_plan: Option<String>,
}

/// Receipt attached to successful purchase responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PurchaseReceipt {
	/// Backend reference, used to confirm TV payments.
	#[serde(default)]
	pub reference: Option<String>,
	/// Prepaid electricity token, when the purchase produced one.
	#[serde(default)]
	pub token: Option<String>,
}

/// One account row in the admin user search.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
	/// Backend identifier.
	#[serde(default, alias = "_id")]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Login email.
	#[serde(default)]
	pub email: String,
	/// Spendable balance in naira.
	#[serde(default)]
	pub wallet_balance: f64,
}

/// Payload of the admin user search.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserSearchPage {
	/// Accounts matching the query.
	#[serde(default)]
	pub users: Vec<AdminUser>,
}

/// Payload of the admin dashboard statistics endpoint.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
	/// Registered accounts.
	#[serde(default)]
	pub total_users: u64,
	/// Transactions across all accounts.
	#[serde(default)]
	pub total_transactions: u64,
	/// Lifetime revenue in naira.
	#[serde(default)]
	pub total_revenue: f64,
	/// Funding requests awaiting a decision.
	#[serde(default)]
	pub pending_fund_requests: u64,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn transactions_map_the_wire_type_field() {
		let page: TransactionPage = serde_json::from_str(
			r#"{
				"transactions": [{
					"_id": "tx-1",
					"type": "funding",
					"amount": 5000,
					"status": "pending",
					"reference": "ES-REF-1",
					"createdAt": "2025-03-02T09:15:00.000Z",
					"metadata": { "paymentMethod": "bank_transfer" }
				}],
				"pagination": { "page": 1, "limit": 10, "pages": 3, "total": 27 }
			}"#,
		)
		.expect("Transaction page fixture should parse.");
		let row = &page.transactions[0];

		assert_eq!(row.id, "tx-1");
		assert_eq!(row.kind, "funding");
		assert!(row.is_decidable());
		assert_eq!(
			row.metadata.as_ref().and_then(|m| m.payment_method.as_deref()),
			Some("bank_transfer"),
		);
		assert_eq!(page.pagination.map(|p| p.pages), Some(3));
	}

	#[test]
	fn admin_review_rows_carry_the_requester() {
		let page: TransactionPage = serde_json::from_str(
			r#"{
				"transactions": [{
					"_id": "tx-9",
					"type": "funding",
					"amount": 20000,
					"status": "approved",
					"userId": { "_id": "u-4", "name": "Ada Obi", "email": "ada@example.com" }
				}]
			}"#,
		)
		.expect("Review page fixture should parse.");
		let row = &page.transactions[0];

		assert!(!row.is_decidable());
		assert_eq!(row.user.as_ref().map(|u| u.name.as_str()), Some("Ada Obi"));
	}

	#[test]
	fn tv_variations_keep_their_snake_case_wire_names() {
		let plans: Vec<TvVariation> = serde_json::from_str(
			r#"[{ "variation_id": "gotv-max", "package_bouquet": "GOtv Max", "price": 8500 }]"#,
		)
		.expect("Variation fixture should parse.");

		assert_eq!(
			plans[0],
			TvVariation {
				variation_id: "gotv-max".into(),
				package_bouquet: "GOtv Max".into(),
				price: 8_500.0,
			},
		);
	}

	#[test]
	fn notification_badge_counts_fall_back_to_the_rows() {
		let counted: NotificationPage =
			serde_json::from_str(r#"{ "unreadCount": 7 }"#).expect("Count fixture should parse.");
		let listed: NotificationPage = serde_json::from_str(
			r#"{
				"notifications": [
					{ "_id": "n-1", "title": "Wallet funded", "isRead": false },
					{ "_id": "n-2", "title": "Data delivered", "isRead": true }
				]
			}"#,
		)
		.expect("List fixture should parse.");

		assert_eq!(counted.badge_count(), 7);
		assert_eq!(listed.badge_count(), 1);
	}

	#[test]
	fn admin_stats_tolerate_missing_fields() {
		let stats: AdminStats = serde_json::from_str(r#"{ "totalUsers": 120 }"#)
			.expect("Partial stats fixture should parse.");

		assert_eq!(stats.total_users, 120);
		assert_eq!(stats.pending_fund_requests, 0);
	}

	#[test]
	fn user_search_rows_parse_mongo_identifiers() {
		let page: UserSearchPage = serde_json::from_str(
			r#"{ "users": [{ "_id": "u-1", "name": "Ada", "email": "ada@example.com", "walletBalance": 1500.5 }] }"#,
		)
		.expect("Search fixture should parse.");

		assert_eq!(page.users[0].wallet_balance, 1_500.5);
	}
}
