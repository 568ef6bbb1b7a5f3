//! Demonstrates signing in against a mock backend, reading the wallet balance
//! through the authenticated send core, and rendering the balance label.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use easysub_client::{
	config::ClientConfig,
	flows::{DefaultClient, LoginForm},
	store::{MemorySessionStore, SessionStore},
	view,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"data": {
					"accessToken": "demo-access",
					"refreshToken": "demo-refresh",
					"user": { "_id": "64aa01", "name": "Ada Obi", "email": "ada@example.com" },
				},
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/wallet/balance");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "data": { "balance": 12_500.0 } }));
		})
		.await;

	let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::default());
	let config = ClientConfig::builder().endpoints([Url::parse(&server.base_url())?]).build()?;
	let client = DefaultClient::new(config, store);
	let user = client
		.login(LoginForm { email: "ada@example.com".into(), password: "hunter22".into() })
		.await?;

	println!("Signed in as {} <{}>.", user.name, user.email);

	let balance = client.wallet_balance().await?;

	println!("Wallet balance: {}.", view::balance_label(Some(balance)));

	Ok(())
}
