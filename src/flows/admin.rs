//! Admin console operations: dashboard statistics, the debounced user
//! search, funding-request decisions, and manual wallet credits.

// self
use crate::{
	_prelude::*,
	api::{
		ApiCall,
		models::{AdminStats, AdminUser, TransactionPage, UserSearchPage},
	},
	flows::{Client, common, wallet::RequestStatus},
	http::HttpTransport,
	obs::Operation,
	validate::FormIssues,
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the admin dashboard statistics.
	pub async fn admin_stats(&self) -> Result<AdminStats> {
		let call = ApiCall::get("/api/admin/stats");

		self.coalesced(Operation::AdminStats, async {
			let response = self.send_authenticated(&call).await?;

			common::payload(&response, "Failed to load dashboard statistics")
		})
		.await
	}

	/// Searches accounts by name or email, debounced across rapid calls.
	///
	/// A query shorter than the configured minimum yields an empty result
	/// without touching the network. When a newer search supersedes this one
	/// during the quiet period the call ends with [`Error::Aborted`].
	pub async fn search_users(&self, query: &str) -> Result<Vec<AdminUser>> {
		let query = query.trim();

		if query.chars().count() < self.config.search_min_chars {
			return Ok(Vec::new());
		}
		if !self.search_debouncer.arm().settle().await {
			return Err(Error::Aborted);
		}

		let call = ApiCall::get("/api/admin/users").with_query("search", query);

		self.coalesced(Operation::UserSearch, async {
			let response = self.send_authenticated(&call).await?;

			common::payload::<UserSearchPage>(&response, "User search failed")
				.map(|page| page.users)
		})
		.await
	}

	/// Fetches one page of funding requests across all accounts.
	pub async fn admin_fund_requests(
		&self,
		status: Option<RequestStatus>,
		page: u32,
	) -> Result<TransactionPage> {
		let mut call = ApiCall::get("/api/admin/fund-requests").with_query("page", page.to_string());

		if let Some(status) = status {
			call = call.with_query("status", status.as_str());
		}

		self.coalesced(Operation::AdminFundRequests, async {
			let response = self.send_authenticated(&call).await?;

			common::payload(&response, "Failed to load funding requests")
		})
		.await
	}

	/// Approves a funding request, crediting the requester's wallet.
	pub async fn approve_fund_request(
		&self,
		id: &str,
		note: Option<&str>,
	) -> Result<Option<String>> {
		self.submit(Operation::ApproveFundRequest, Some(id), async {
			let call = ApiCall::put(format!("/api/admin/fund-request/{id}/approve"))
				.with_body(serde_json::json!({ "note": note.unwrap_or("") }));
			let response = self.send_authenticated(&call).await?;

			common::acknowledged(&response, "Failed to approve the funding request")
		})
		.await
	}

	/// Rejects a funding request; the reason is mandatory.
	pub async fn reject_fund_request(&self, id: &str, reason: &str) -> Result<Option<String>> {
		let mut issues = FormIssues::new();

		issues.require("reason", reason, "Reason is required to reject a funding request");
		issues.into_result()?;

		self.submit(Operation::RejectFundRequest, Some(id), async {
			let call = ApiCall::put(format!("/api/admin/fund-request/{id}/reject"))
				.with_body(serde_json::json!({ "reason": reason.trim() }));
			let response = self.send_authenticated(&call).await?;

			common::acknowledged(&response, "Failed to reject the funding request")
		})
		.await
	}

	/// Credits a user's wallet directly, outside the funding-request flow.
	pub async fn fund_user_wallet(
		&self,
		user_id: &str,
		amount: f64,
		note: Option<&str>,
	) -> Result<Option<String>> {
		let mut issues = FormIssues::new();

		issues.require("userId", user_id, "Select a user to fund");

		if !(amount.is_finite() && amount > 0.) {
			issues.push("amount", "Please enter a valid amount");
		}

		issues.into_result()?;

		self.submit(Operation::AdminFundWallet, Some(user_id), async {
			let call = ApiCall::post(
				"/api/admin/fund-wallet",
				serde_json::json!({
					"userId": user_id,
					"amount": amount,
					"note": note.unwrap_or(""),
				}),
			);
			let response = self.send_authenticated(&call).await?;

			common::acknowledged(&response, "Failed to fund the wallet")
		})
		.await
	}
}
