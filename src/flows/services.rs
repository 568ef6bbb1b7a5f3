//! Airtime, data, and electricity purchases.

// self
use crate::{
	_prelude::*,
	api::{ApiCall, models::PurchaseReceipt},
	flows::{Client, common},
	http::HttpTransport,
	obs::Operation,
	validate::{FormIssues, is_valid_email, is_valid_nigerian_phone},
};

/// Result of a successful purchase: the server message plus any receipt data.
#[derive(Clone, Debug, Default)]
pub struct PurchaseOutcome {
	/// Server confirmation message, when one was sent.
	pub message: Option<String>,
	/// Backend reference for the purchase, when one was issued.
	pub reference: Option<String>,
	/// Prepaid electricity token; must be surfaced alongside the message.
	pub token: Option<String>,
}

/// Fields submitted by the airtime purchase form.
#[derive(Clone, Debug)]
pub struct AirtimeForm {
	/// Mobile network, e.g. `mtn`.
	pub network: String,
	/// Recipient phone number.
	pub phone: String,
	/// Amount in naira.
	pub amount: f64,
}
impl AirtimeForm {
	fn validate(&self) -> Result<(), FormIssues> {
		let mut issues = FormIssues::new();

		issues.require("network", &self.network, "Please select a network");

		if issues.require("phone", &self.phone, "Phone number is required")
			&& !is_valid_nigerian_phone(self.phone.trim())
		{
			issues.push("phone", "Please enter a valid Nigerian phone number");
		}
		if !(self.amount.is_finite() && self.amount > 0.) {
			issues.push("amount", "Please enter a valid amount");
		}

		issues.into_result()
	}
}

/// Fields submitted by the data purchase form.
#[derive(Clone, Debug)]
pub struct DataForm {
	/// Mobile network, e.g. `mtn`.
	pub network: String,
	/// Recipient phone number.
	pub phone: String,
	/// Provider-side plan identifier.
	pub plan: String,
}
impl DataForm {
	fn validate(&self) -> Result<(), FormIssues> {
		let mut issues = FormIssues::new();

		issues.require("network", &self.network, "Please select a network");

		if issues.require("phone", &self.phone, "Phone number is required")
			&& !is_valid_nigerian_phone(self.phone.trim())
		{
			issues.push("phone", "Please enter a valid Nigerian phone number");
		}

		issues.require("plan", &self.plan, "Please select a data plan");

		issues.into_result()
	}
}

/// Fields submitted by the electricity payment form.
#[derive(Clone, Debug)]
pub struct ElectricityForm {
	/// Distribution company, e.g. `ikeja-electric`.
	pub disco: String,
	/// Meter number.
	pub meter: String,
	/// `prepaid` or `postpaid`.
	pub meter_type: String,
	/// Amount in naira.
	pub amount: f64,
	/// Contact phone number.
	pub phone: String,
	/// Contact email the receipt is sent to.
	pub email: String,
}
impl ElectricityForm {
	fn validate(&self) -> Result<(), FormIssues> {
		let mut issues = FormIssues::new();

		issues.require("disco", &self.disco, "Please select a distribution company");
		issues.require("meter", &self.meter, "Meter number is required");
		issues.require("meterType", &self.meter_type, "Please select a meter type");

		if !(self.amount.is_finite() && self.amount > 0.) {
			issues.push("amount", "Please enter a valid amount");
		}
		if issues.require("phone", &self.phone, "Phone number is required")
			&& !is_valid_nigerian_phone(self.phone.trim())
		{
			issues.push("phone", "Please enter a valid Nigerian phone number");
		}
		if issues.require("email", &self.email, "Email address is required")
			&& !is_valid_email(self.email.trim())
		{
			issues.push("email", "Please enter a valid email address");
		}

		issues.into_result()
	}
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Buys airtime for the given number.
	pub async fn buy_airtime(&self, form: AirtimeForm) -> Result<PurchaseOutcome> {
		form.validate()?;

		let body = serde_json::json!({
			"network": form.network,
			"phone": form.phone.trim(),
			"amount": form.amount,
		});

		self.purchase("/api/services/airtime", body, "Airtime purchase failed").await
	}

	/// Buys a data plan for the given number.
	pub async fn buy_data(&self, form: DataForm) -> Result<PurchaseOutcome> {
		form.validate()?;

		let body = serde_json::json!({
			"network": form.network,
			"phone": form.phone.trim(),
			"plan": form.plan,
		});

		self.purchase("/api/services/data", body, "Data purchase failed").await
	}

	/// Pays an electricity bill; a prepaid meter yields a token in the outcome.
	pub async fn pay_electricity(&self, form: ElectricityForm) -> Result<PurchaseOutcome> {
		form.validate()?;

		let body = serde_json::json!({
			"disco": form.disco,
			"meter": form.meter.trim(),
			"meterType": form.meter_type,
			"amount": form.amount,
			"phone": form.phone.trim(),
			"email": form.email.trim(),
		});

		self.purchase("/api/services/electricity", body, "Electricity payment failed").await
	}

	pub(crate) async fn purchase(
		&self,
		path: &str,
		body: serde_json::Value,
		fallback: &str,
	) -> Result<PurchaseOutcome> {
		self.submit(Operation::Purchase, Some(path), async {
			let call = ApiCall::post(path, body);
			let response = self.send_authenticated(&call).await?;
			let envelope = common::envelope_of::<PurchaseReceipt>(&response, fallback)?;
			let receipt = envelope.data.unwrap_or_default();

			Ok(PurchaseOutcome {
				message: envelope.message,
				reference: receipt.reference,
				token: receipt.token,
			})
		})
		.await
	}
}
