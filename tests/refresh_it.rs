#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use easysub_client::{_preludet::*, store::SessionStore};

fn endpoint(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock server URL should parse.")
}

fn balance_body(balance: f64) -> serde_json::Value {
	json!({ "success": true, "data": { "balance": balance } })
}

#[tokio::test]
async fn an_expired_bearer_recovers_with_exactly_one_refresh() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let stale = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/wallet/balance")
				.header("authorization", "Bearer access-seed");
			then.status(401)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false, "message": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh-token")
				.json_body(json!({ "refreshToken": "refresh-seed" }));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "data": { "accessToken": "access-new" } }));
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/wallet/balance")
				.header("authorization", "Bearer access-new");
			then.status(200).header("content-type", "application/json").json_body(balance_body(12_500.));
		})
		.await;
	let balance = client
		.wallet_balance()
		.await
		.expect("The balance read should recover through the refresh.");

	assert_eq!(balance, 12_500.);

	stale.assert_async().await;
	refresh.assert_async().await;
	fresh.assert_async().await;

	let session = store
		.load()
		.await
		.expect("Session store load should succeed.")
		.expect("The refreshed session should remain stored.");

	assert_eq!(session.access_token.expose(), "access-new");
	assert_eq!(session.refresh_token.expose(), "refresh-seed");
}

#[tokio::test]
async fn a_second_401_tears_the_session_down() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/wallet/balance");
			then.status(401)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false, "message": "Token expired" }));
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "data": { "accessToken": "access-new" } }));
		})
		.await;
	let err = client
		.wallet_balance()
		.await
		.expect_err("A retry that is still unauthorized should fail.");

	assert!(matches!(err, Error::SessionExpired));
	assert!(err.requires_login());

	refresh.assert_async().await;

	assert!(store.load().await.expect("Session store load should succeed.").is_none());
}

#[tokio::test]
async fn forbidden_clears_the_session_with_zero_refresh_calls() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/wallet/balance");
			then.status(403)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false, "message": "Account disabled" }));
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token");
			then.status(200);
		})
		.await;
	let err = client.wallet_balance().await.expect_err("A 403 should not be retried.");

	assert!(matches!(err, Error::Forbidden));

	refresh.assert_calls_async(0).await;

	assert!(store.load().await.expect("Session store load should succeed.").is_none());
}

#[tokio::test]
async fn a_failed_refresh_ends_the_session() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/wallet/balance");
			then.status(401)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token");
			then.status(403)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false, "message": "Invalid refresh token" }));
		})
		.await;

	let err = client.wallet_balance().await.expect_err("A rejected refresh should end the session.");

	assert!(matches!(err, Error::SessionExpired));
	assert!(store.load().await.expect("Session store load should succeed.").is_none());
	assert_eq!(client.refresh_metrics.failures(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_401s_share_one_refresh_call() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/wallet/balance")
				.header("authorization", "Bearer access-seed");
			then.status(401)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/user/profile")
				.header("authorization", "Bearer access-seed");
			then.status(401)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false }));
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh-token")
				.json_body(json!({ "refreshToken": "refresh-seed" }));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "data": { "accessToken": "access-new" } }));
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/wallet/balance")
				.header("authorization", "Bearer access-new");
			then.status(200).header("content-type", "application/json").json_body(balance_body(750.));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/user/profile")
				.header("authorization", "Bearer access-new");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"data": {
					"user": { "_id": "64aa01", "name": "Ada Obi", "email": "ada@example.com" },
				},
			}));
		})
		.await;

	let (balance, profile) = tokio::join!(client.wallet_balance(), client.profile());

	assert_eq!(balance.expect("The balance read should recover."), 750.);
	assert_eq!(profile.expect("The profile read should recover.").id, "64aa01");

	refresh.assert_calls_async(1).await;

	assert_eq!(client.refresh_metrics.attempts(), 1);
	assert_eq!(client.refresh_metrics.successes(), 1);
	assert_eq!(client.refresh_metrics.reuses(), 1);
}
