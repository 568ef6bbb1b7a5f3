//! Demonstrates the two-step TV subscription flow against a mock backend:
//! catalog read, smartcard verification, stash, and confirmation.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use easysub_client::{
	auth::{Session, UserAccount},
	config::ClientConfig,
	flows::{DefaultClient, TvForm},
	smartcard::TvProvider,
	store::{MemorySessionStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/services/tv-variations");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"data": [
					{ "variation_id": "gotv-max", "package_bouquet": "GOtv Max", "price": 8500 },
				],
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/services/tv-customer");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"data": { "customerName": "Ada Obi", "currentPlan": "GOtv Jolli" },
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/services/tv");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"message": "Subscription successful",
				"data": { "reference": "ES-TV-DEMO" },
			}));
		})
		.await;

	let backend = Arc::new(MemorySessionStore::default());
	let user = UserAccount {
		id: "64aa01".into(),
		name: "Ada Obi".into(),
		email: "ada@example.com".into(),
		phone: Some("08031234567".into()),
		role: None,
		wallet_balance: Some(12_500.),
	};

	backend.save(Session::new("demo-access", "demo-refresh", user)).await?;

	let store: Arc<dyn SessionStore> = backend;
	let config = ClientConfig::builder().endpoints([Url::parse(&server.base_url())?]).build()?;
	let client = Arc::new(DefaultClient::new(config, store));
	let catalog = client.tv_variations(&TvProvider::Gotv).await?;

	println!("Catalog: {} bouquet(s), first is {}.", catalog.len(), catalog[0].package_bouquet);

	let pipeline = client.smartcard_pipeline();

	pipeline.select_provider(Some(TvProvider::Gotv)).await;

	let state = pipeline.edit("1234567890").await;

	if let Some(customer) = state.customer() {
		println!("Smartcard verified for {}.", customer.customer_name.as_deref().unwrap_or("?"));
	}

	let pending = client
		.begin_tv_subscription(TvForm {
			provider: TvProvider::Gotv,
			smartcard: "1234567890".into(),
			plan: Some(catalog[0].clone()),
			phone: "08031234567".into(),
			email: "ada@example.com".into(),
			payment_method: None,
		})
		.await?;

	println!("Awaiting confirmation: {} at ₦{}.", pending.plan_name, pending.price);

	let outcome = client.confirm_tv_subscription().await?;

	println!(
		"{} Reference: {}.",
		outcome.message.as_deref().unwrap_or("Done."),
		outcome.reference.as_deref().unwrap_or("-"),
	);

	Ok(())
}
