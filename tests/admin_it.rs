#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use easysub_client::{_preludet::*, view::user_search_list};

fn endpoint(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock server URL should parse.")
}

#[tokio::test]
async fn dashboard_statistics_decode_the_admin_payload() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/admin/stats");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"data": {
					"totalUsers": 420,
					"totalTransactions": 9_001,
					"totalRevenue": 1_250_000.5,
					"pendingFundRequests": 7,
				},
			}));
		})
		.await;

	let stats = client.admin_stats().await.expect("The statistics read should succeed.");

	assert_eq!(stats.total_users, 420);
	assert_eq!(stats.pending_fund_requests, 7);
}

#[tokio::test]
async fn short_queries_skip_the_network_entirely() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/admin/users");
			then.status(200);
		})
		.await;
	let users = client.search_users("  ad  ").await.expect("A short query should short-circuit.");

	assert!(users.is_empty());

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn searches_debounce_and_render_result_rows() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/admin/users").query_param("search", "adanna");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"data": {
					"users": [{
						"_id": "64aa07",
						"name": "Adanna Eze",
						"email": "adanna@example.com",
						"walletBalance": 3200,
					}],
				},
			}));
		})
		.await;
	// The second query supersedes the first during the quiet period.
	let (stale, fresh) = tokio::join!(client.search_users("adaeze"), client.search_users("adanna"));
	let err = stale.expect_err("The superseded search should abort.");

	assert!(err.is_aborted());

	let users = fresh.expect("The surviving search should succeed.");

	assert_eq!(users.len(), 1);

	mock.assert_calls_async(1).await;

	let listed = user_search_list(&users);
	let rows = listed.rows();

	assert_eq!(rows[0].name, "Adanna Eze");
	assert_eq!(rows[0].balance, "₦3,200.00");
}

#[tokio::test]
async fn rejections_without_a_reason_never_reach_the_network() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/admin/fund-request/fr-1/reject");
			then.status(200);
		})
		.await;
	let err = client
		.reject_fund_request("fr-1", "  ")
		.await
		.expect_err("A blank reason should be blocked.");

	assert!(err.to_string().contains("Reason is required to reject a funding request"));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn decisions_hit_their_request_scoped_routes() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let approve = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/admin/fund-request/fr-1/approve")
				.json_body(json!({ "note": "" }));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "message": "Request approved" }));
		})
		.await;
	let reject = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/admin/fund-request/fr-2/reject")
				.json_body(json!({ "reason": "Reference not found" }));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "message": "Request rejected" }));
		})
		.await;
	let approved = client
		.approve_fund_request("fr-1", None)
		.await
		.expect("The approval should succeed.");

	assert_eq!(approved.as_deref(), Some("Request approved"));

	let rejected = client
		.reject_fund_request("fr-2", "Reference not found")
		.await
		.expect("The rejection should succeed.");

	assert_eq!(rejected.as_deref(), Some("Request rejected"));

	approve.assert_async().await;
	reject.assert_async().await;
}

#[tokio::test]
async fn manual_wallet_funding_validates_before_posting() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/admin/fund-wallet").json_body(json!({
				"userId": "64aa07",
				"amount": 2_000.0,
				"note": "Promo credit",
			}));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "message": "Wallet funded" }));
		})
		.await;
	let err = client
		.fund_user_wallet("64aa07", 0., None)
		.await
		.expect_err("A non-positive amount should be blocked.");

	assert!(err.to_string().contains("Please enter a valid amount"));

	mock.assert_calls_async(0).await;

	let message = client
		.fund_user_wallet("64aa07", 2_000., Some("Promo credit"))
		.await
		.expect("The funding call should succeed.");

	assert_eq!(message.as_deref(), Some("Wallet funded"));

	mock.assert_calls_async(1).await;
}
