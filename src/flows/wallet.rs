//! Wallet balance, transaction history, the statement export, and funding requests.

// self
use crate::{
	_prelude::*,
	api::{
		ApiCall,
		models::{BalancePayload, TransactionPage},
	},
	flows::{Client, common},
	http::HttpTransport,
	obs::Operation,
	validate::FormIssues,
};

/// Transaction-history filter values the client emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionFilter {
	/// Wallet funding rows.
	Funding,
	/// Airtime purchases.
	Airtime,
	/// Data purchases.
	Data,
	/// Electricity payments.
	Electricity,
	/// TV subscriptions.
	Tv,
}
impl TransactionFilter {
	/// Wire value sent as the `type` query parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Funding => "funding",
			Self::Airtime => "airtime",
			Self::Data => "data",
			Self::Electricity => "electricity",
			Self::Tv => "tv",
		}
	}
}
impl Display for TransactionFilter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Funding-request status filter values the client emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
	/// Awaiting an admin decision.
	Pending,
	/// Approved and credited.
	Approved,
	/// Rejected with a reason.
	Rejected,
}
impl RequestStatus {
	/// Wire value sent as the `status` query parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		}
	}
}
impl Display for RequestStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fields submitted by the wallet funding request form.
#[derive(Clone, Debug)]
pub struct FundRequestForm {
	/// Amount in naira.
	pub amount: f64,
	/// Channel the funds were supplied through, e.g. `bank_transfer`.
	pub payment_method: String,
	/// Payment reference quoted by the user.
	pub reference: String,
}
impl FundRequestForm {
	fn validate(&self) -> Result<(), FormIssues> {
		let mut issues = FormIssues::new();

		if !(self.amount.is_finite() && self.amount > 0.) {
			issues.push("amount", "Please enter a valid amount");
		}

		issues.require("paymentMethod", &self.payment_method, "Payment method is required");
		issues.require("reference", &self.reference, "Payment reference is required");

		issues.into_result()
	}
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the spendable wallet balance in naira.
	///
	/// On failure the caller renders the zero-balance label instead of stale
	/// text; see [`balance_label`](crate::view::balance_label).
	pub async fn wallet_balance(&self) -> Result<f64> {
		let call = ApiCall::get("/api/wallet/balance");

		self.coalesced(Operation::Balance, async {
			let response = self.send_authenticated(&call).await?;

			common::payload::<BalancePayload>(&response, "Failed to fetch wallet balance")
				.map(|payload| payload.balance)
		})
		.await
	}

	/// Fetches one page of transaction history, optionally filtered by type.
	pub async fn transactions(
		&self,
		filter: Option<TransactionFilter>,
		page: u32,
	) -> Result<TransactionPage> {
		let mut call = ApiCall::get("/api/transactions").with_query("page", page.to_string());

		if let Some(filter) = filter {
			call = call.with_query("type", filter.as_str());
		}

		self.coalesced(Operation::Transactions, async {
			let response = self.send_authenticated(&call).await?;

			common::payload(&response, "Failed to load transactions")
		})
		.await
	}

	/// Fetches the full wallet statement for the CSV export.
	///
	/// [`statement_csv`](crate::view::statement_csv) turns the rows into the
	/// downloadable file.
	pub async fn wallet_statement(&self) -> Result<TransactionPage> {
		let call = ApiCall::get("/api/wallet/transactions");

		self.coalesced(Operation::ExportStatement, async {
			let response = self.send_authenticated(&call).await?;

			common::payload(&response, "Failed to export the wallet statement")
		})
		.await
	}

	/// Submits a wallet funding request; yields the server's confirmation message.
	pub async fn submit_fund_request(&self, form: FundRequestForm) -> Result<Option<String>> {
		form.validate()?;

		self.submit(Operation::FundRequest, None, async {
			let call = ApiCall::post(
				"/api/user/fund-request",
				serde_json::json!({
					"amount": form.amount,
					"paymentMethod": form.payment_method,
					"reference": form.reference,
				}),
			);
			let response = self.send_authenticated(&call).await?;

			common::acknowledged(&response, "Funding request failed")
		})
		.await
	}

	/// Fetches one page of the account's funding requests.
	pub async fn fund_requests(
		&self,
		status: Option<RequestStatus>,
		page: u32,
	) -> Result<TransactionPage> {
		let mut call = ApiCall::get("/api/user/fund-requests").with_query("page", page.to_string());

		if let Some(status) = status {
			call = call.with_query("status", status.as_str());
		}

		self.coalesced(Operation::FundRequests, async {
			let response = self.send_authenticated(&call).await?;

			common::payload(&response, "Failed to load funding requests")
		})
		.await
	}
}
