#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use easysub_client::{
	_preludet::*,
	flows::{FundRequestForm, TransactionFilter},
	view::{self, transaction_list},
};

fn endpoint(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock server URL should parse.")
}

fn form() -> FundRequestForm {
	FundRequestForm {
		amount: 5_000.,
		payment_method: "bank_transfer".into(),
		reference: "REF123".into(),
	}
}

#[tokio::test]
async fn funding_requests_post_the_exact_body() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/user/fund-request")
				.header("authorization", "Bearer access-seed")
				.json_body(json!({
					"amount": 5_000.0,
					"paymentMethod": "bank_transfer",
					"reference": "REF123",
				}));
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"message": "Funding request submitted",
			}));
		})
		.await;
	let message = client
		.submit_fund_request(form())
		.await
		.expect("The funding request should be accepted.");

	mock.assert_async().await;

	assert_eq!(message.as_deref(), Some("Funding request submitted"));
}

#[tokio::test]
async fn a_rejected_request_surfaces_its_message_and_releases_the_latch() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/user/fund-request");
			then.status(400)
				.header("content-type", "application/json")
				.json_body(json!({ "success": false, "message": "Daily limit exceeded" }));
		})
		.await;

	let err = client
		.submit_fund_request(form())
		.await
		.expect_err("The backend rejection should surface.");

	assert_eq!(err.user_message("Funding request failed"), "Daily limit exceeded");

	// A failure must not leave the busy latch held.
	let err = client
		.submit_fund_request(form())
		.await
		.expect_err("The second submission should reach the backend again.");

	assert!(!err.is_aborted());
}

#[tokio::test]
async fn history_reads_pass_the_filter_and_render_rows() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client([endpoint(&server)]);

	sign_in(&store).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/transactions")
				.query_param("page", "2")
				.query_param("type", "funding");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"data": {
					"transactions": [{
						"_id": "tx-1",
						"type": "funding",
						"amount": 5000,
						"status": "approved",
						"reference": "ES-1",
						"createdAt": "2025-03-02T09:15:00.000Z",
						"metadata": { "paymentMethod": "bank_transfer" },
					}],
					"pagination": { "page": 2, "limit": 10, "pages": 3, "total": 27 },
				},
			}));
		})
		.await;
	let page = client
		.transactions(Some(TransactionFilter::Funding), 2)
		.await
		.expect("The history read should succeed.");

	mock.assert_async().await;

	let listed = transaction_list(&page);
	let rows = listed.rows();

	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].amount, "+₦5,000.00");
	assert_eq!(rows[0].payment_method.as_deref(), Some("bank_transfer"));
}

#[tokio::test]
async fn an_unreachable_backend_falls_back_to_the_zero_balance_label() {
	// Nothing listens on this port; the transport fails without a response.
	let dead = Url::parse("http://127.0.0.1:9/").expect("Dead endpoint URL should parse.");
	let (client, store) = build_test_client([dead]);

	sign_in(&store).await;

	let err = client.wallet_balance().await.expect_err("The balance read should fail.");

	assert!(matches!(err, Error::Transport(_)));
	assert_eq!(view::balance_label(None), "₦0.00");
}

#[tokio::test]
async fn a_dead_primary_falls_over_once_and_sticks() {
	let server = MockServer::start_async().await;
	let dead = Url::parse("http://127.0.0.1:9/").expect("Dead endpoint URL should parse.");
	let (client, store) = build_test_client([dead, endpoint(&server)]);

	sign_in(&store).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/wallet/balance");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "data": { "balance": 750.5 } }));
		})
		.await;
	let first = client.wallet_balance().await.expect("The fallback hop should succeed.");

	assert_eq!(first, 750.5);
	// The pool adopted the fallback; the next call goes there directly.
	assert_eq!(client.pool.active().0, 1);

	let second = client.wallet_balance().await.expect("The adopted endpoint should serve directly.");

	assert_eq!(second, 750.5);

	mock.assert_calls_async(2).await;
}
