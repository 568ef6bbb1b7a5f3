//! Single-flight access token rotation.
//!
//! Every 401 recovery funnels through [`Client::refresh_session`]. Overlapping
//! callers serialize on one guard and adopt the winner's outcome through a
//! rotation epoch: a caller that acquires the guard after another caller
//! already rotated the token returns success without a second network call,
//! and a caller that acquires it after a failed rotation finds the session
//! cleared and fails without one.

mod metrics;

pub use metrics::RefreshMetrics;

// std
use std::sync::atomic::Ordering;
// self
use crate::{
	_prelude::*,
	api::{ApiCall, models::RefreshPayload},
	flows::{Client, common},
	http::HttpTransport,
	obs::{self, OpOutcome, OpSpan, Operation},
};

const FALLBACK: &str = "Session could not be refreshed";

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Exchanges the refresh token for a new access token.
	///
	/// On success only the access token in the stored session is replaced.
	/// On any failure, including a missing refresh token, the session is
	/// destroyed and the caller must route to the login entry point.
	pub async fn refresh_session(&self) -> Result<()> {
		const OP: Operation = Operation::RefreshSession;

		let span = OpSpan::new(OP, "refresh_session");

		obs::record_op_outcome(OP, OpOutcome::Attempt);

		let result = span
			.instrument(async {
				let observed = self.refresh_epoch.load(Ordering::Acquire);
				let _singleflight = self.refresh_guard.lock().await;

				// Another caller rotated the token while this one waited.
				if self.refresh_epoch.load(Ordering::Acquire) != observed {
					self.refresh_metrics.record_reuse();

					return Ok(());
				}

				self.refresh_metrics.record_attempt();

				let Some(session) = self.store.load().await? else {
					// A failed rotation ahead of this caller already cleared
					// the session; fail without a network call.
					self.refresh_metrics.record_failure();

					return Err(Error::SessionExpired);
				};
				let call = ApiCall::post(
					"/api/auth/refresh-token",
					serde_json::json!({ "refreshToken": session.refresh_token.expose() }),
				);
				let response = match self.dispatch(&call, None).await {
					Ok(response) => response,
					Err(_) => return self.fail_refresh().await,
				};

				if !response.is_success() {
					// 403 means the refresh token itself is rejected; any
					// other failure ends the same way, with no retry.
					return self.fail_refresh().await;
				}

				let Ok(payload) = common::payload::<RefreshPayload>(&response, FALLBACK) else {
					return self.fail_refresh().await;
				};

				match self.store.replace_access_token(payload.access_token.expose()).await? {
					Some(_) => {
						self.refresh_epoch.fetch_add(1, Ordering::Release);
						self.refresh_metrics.record_success();

						Ok(())
					},
					// The session vanished mid-rotation; nothing to patch.
					None => self.fail_refresh().await,
				}
			})
			.await;

		let label = if result.is_ok() { OpOutcome::Success } else { OpOutcome::Failure };

		span.record_outcome(label);
		obs::record_op_outcome(OP, label);

		result
	}

	async fn fail_refresh(&self) -> Result<()> {
		self.teardown().await;
		self.refresh_metrics.record_failure();
		obs::record_session_teardown();

		Err(Error::SessionExpired)
	}
}
