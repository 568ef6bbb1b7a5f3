//! TV subscriptions: the cached catalog and customer lookup, the two-step
//! submit-then-confirm flow, and the smartcard pipeline wiring.

// self
use crate::{
	_prelude::*,
	api::{
		ApiCall,
		models::{TvCustomer, TvVariation},
	},
	cache::{customer_details_key, tv_variations_key},
	flows::{Client, PurchaseOutcome, common},
	http::HttpTransport,
	obs::Operation,
	smartcard::{CustomerLookup, LookupFuture, SmartcardPipeline, TvProvider, check_format},
	validate::{FormIssues, is_valid_email, is_valid_nigerian_phone},
};

/// Fields submitted by the TV subscription form.
#[derive(Clone, Debug)]
pub struct TvForm {
	/// Selected provider.
	pub provider: TvProvider,
	/// Smartcard number as typed.
	pub smartcard: String,
	/// Selected bouquet, when one was chosen.
	pub plan: Option<TvVariation>,
	/// Contact phone number.
	pub phone: String,
	/// Contact email the receipt is sent to.
	pub email: String,
	/// Payment method; defaults to `wallet` when absent.
	pub payment_method: Option<String>,
}

/// Submission stashed between the service form and the confirmation step.
///
/// Present while a subscription awaits confirmation; the unsaved-work probe
/// reports it so a host can warn before discarding the tab or window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTvSubscription {
	/// Provider wire value.
	pub provider: String,
	/// Digits-only smartcard number.
	pub smartcard: String,
	/// Provider-side bouquet identifier.
	pub plan: String,
	/// Bouquet display name shown on the confirmation step.
	pub plan_name: String,
	/// Price in naira shown on the confirmation step.
	pub price: f64,
	/// Contact phone number.
	pub phone: String,
	/// Contact email.
	pub email: String,
	/// Payment method, `wallet` unless the form chose otherwise.
	pub payment_method: String,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the bouquet catalog for `provider`, cached for the configured TTL.
	pub async fn tv_variations(&self, provider: &TvProvider) -> Result<Vec<TvVariation>> {
		let key = tv_variations_key(provider.as_str());
		let call = ApiCall::get("/api/services/tv-variations")
			.with_query("provider", provider.as_str());

		self.cache
			.get_or_fetch(&key, self.config.variations_ttl, || {
				self.coalesced(Operation::TvVariations, async {
					let response = self.send_authenticated(&call).await?;

					common::payload(&response, "Failed to load subscription plans")
				})
			})
			.await
	}

	/// Looks up the customer registered to a smartcard, cached for the configured TTL.
	pub async fn lookup_tv_customer(
		&self,
		provider: &TvProvider,
		smartcard: &str,
	) -> Result<TvCustomer> {
		let key = customer_details_key(provider.as_str(), smartcard);
		let call = ApiCall::get("/api/services/tv-customer")
			.with_query("provider", provider.as_str())
			.with_query("smartcard", smartcard);

		self.cache
			.get_or_fetch(&key, self.config.customer_ttl, || {
				self.coalesced(Operation::CustomerLookup, async {
					let response = self.send_authenticated(&call).await?;

					common::payload(&response, "Could not verify the smartcard")
				})
			})
			.await
	}

	/// Validates the TV form and stashes the submission for confirmation. No network call.
	pub async fn begin_tv_subscription(&self, form: TvForm) -> Result<PendingTvSubscription> {
		let mut issues = FormIssues::new();
		let normalized = match check_format(&form.provider, &form.smartcard) {
			crate::smartcard::FormatCheck::Valid { normalized } => normalized,
			rejected => {
				issues.push("smartcard", rejected.message());

				// Unobservable: the recorded issue fails the form below.
				String::new()
			},
		};

		if issues.require("phone", &form.phone, "Phone number is required")
			&& !is_valid_nigerian_phone(form.phone.trim())
		{
			issues.push("phone", "Please enter a valid Nigerian phone number");
		}
		if issues.require("email", &form.email, "Email address is required")
			&& !is_valid_email(form.email.trim())
		{
			issues.push("email", "Please enter a valid email address");
		}

		let Some(plan) = form.plan else {
			issues.push("plan", "Please select a subscription plan");

			return Err(issues.into());
		};

		issues.into_result()?;

		let pending = PendingTvSubscription {
			provider: form.provider.as_str().into(),
			smartcard: normalized,
			plan: plan.variation_id,
			plan_name: plan.package_bouquet,
			price: plan.price,
			phone: form.phone.trim().into(),
			email: form.email.trim().into(),
			payment_method: form.payment_method.unwrap_or_else(|| "wallet".into()),
		};

		*self.pending_tv.write() = Some(pending.clone());

		Ok(pending)
	}

	/// Posts the stashed submission; success stores the transaction reference
	/// and clears the stash. A failed confirmation keeps the stash for retry.
	pub async fn confirm_tv_subscription(&self) -> Result<PurchaseOutcome> {
		let Some(pending) = self.pending_tv.read().clone() else {
			let mut issues = FormIssues::new();

			issues.push("plan", "There is no TV subscription awaiting confirmation");

			return Err(issues.into());
		};
		let body = serde_json::json!({
			"provider": pending.provider,
			"smartcard": pending.smartcard,
			"plan": pending.plan,
			"phone": pending.phone,
			"email": pending.email,
			"paymentMethod": pending.payment_method,
		});
		let outcome = self.purchase("/api/services/tv", body, "TV subscription failed").await?;

		*self.tv_reference.write() = outcome.reference.clone();
		*self.pending_tv.write() = None;

		Ok(outcome)
	}

	/// Discards the stashed submission without a network call.
	pub fn cancel_tv_subscription(&self) {
		*self.pending_tv.write() = None;
	}

	/// The unsaved-work probe: the stashed submission still awaiting confirmation.
	pub fn unsaved_submission(&self) -> Option<PendingTvSubscription> {
		self.pending_tv.read().clone()
	}

	/// Reference issued by the last confirmed TV subscription, when any.
	pub fn tv_transaction_reference(&self) -> Option<String> {
		self.tv_reference.read().clone()
	}
}
impl<T> Client<T>
where
	T: HttpTransport,
{
	/// Builds the smartcard field controller backed by this client.
	///
	/// The pipeline holds its own verification slot in the client's in-flight
	/// registry, while the lookups it issues coalesce with direct
	/// [`Client::lookup_tv_customer`] calls under the lookup slot.
	pub fn smartcard_pipeline(self: &Arc<Self>) -> SmartcardPipeline<Arc<Self>> {
		SmartcardPipeline::new(
			self.clone(),
			self.config.smartcard_debounce,
			self.registry.clone(),
		)
	}
}
impl<T> CustomerLookup for Arc<Client<T>>
where
	T: HttpTransport,
{
	fn lookup<'a>(&'a self, provider: &'a TvProvider, smartcard: &'a str) -> LookupFuture<'a> {
		Box::pin(self.lookup_tv_customer(provider, smartcard))
	}
}
