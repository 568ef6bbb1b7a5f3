//! The authenticated fetch wrapper: bearer attach, one refresh-and-retry on
//! 401, session teardown on 403, and a single endpoint-fallback hop on
//! transport failure. Implemented once here; every operation module rides it.

// self
use crate::{
	_prelude::*,
	api::{ApiCall, Envelope, decode_envelope},
	auth::TokenSecret,
	endpoints::HEALTH_PATH,
	flows::Client,
	http::{ApiRequest, HttpTransport, Method, RawResponse},
	obs::{self, OpOutcome, OpSpan, Operation},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Probes `GET /health` down the candidate list and adopts the first
	/// reachable endpoint for the rest of the session.
	pub async fn check_backend(&self) -> bool {
		let span = OpSpan::new(Operation::HealthProbe, "check_backend");

		obs::record_op_outcome(Operation::HealthProbe, OpOutcome::Attempt);

		let reachable = span
			.instrument(async {
				for index in 0..self.pool.candidates().len() {
					let Ok(url) = self.pool.candidates()[index].join(HEALTH_PATH) else {
						continue;
					};
					let request =
						ApiRequest::new(Method::Get, url, self.config.request_timeout);

					if let Ok(response) = self.transport.execute(request).await
						&& response.is_success()
					{
						self.pool.adopt(index);

						return true;
					}
				}

				false
			})
			.await;

		let label = if reachable { OpOutcome::Success } else { OpOutcome::Failure };

		span.record_outcome(label);
		obs::record_op_outcome(Operation::HealthProbe, label);

		reachable
	}

	/// Executes `call` without credentials (auth endpoints, public reads).
	pub(crate) async fn send_public(&self, call: &ApiCall) -> Result<RawResponse> {
		self.dispatch(call, None).await
	}

	/// Executes `call` under the retry contract: attach the current bearer,
	/// recover a 401 with exactly one refresh-and-retry, and tear the session
	/// down on 403 or on a retry that still comes back unauthorized.
	pub(crate) async fn send_authenticated(&self, call: &ApiCall) -> Result<RawResponse> {
		let Some(session) = self.store.load().await? else {
			return Err(Error::Unauthenticated);
		};
		let response = self.dispatch(call, Some(session.access_token)).await?;

		match response.status {
			401 => {
				self.refresh_session().await?;

				let session = self.store.load().await?.ok_or(Error::SessionExpired)?;
				let retried = self.dispatch(call, Some(session.access_token)).await?;

				match retried.status {
					// Never loop: a second 401 means the freshly rotated
					// token is also rejected.
					401 => {
						self.teardown().await;
						obs::record_session_teardown();

						Err(Error::SessionExpired)
					},
					403 => {
						self.teardown().await;
						obs::record_session_teardown();

						Err(Error::Forbidden)
					},
					_ => Ok(retried),
				}
			},
			403 => {
				self.teardown().await;
				obs::record_session_teardown();

				Err(Error::Forbidden)
			},
			_ => Ok(response),
		}
	}

	/// Runs `fut` as the sole in-flight attempt for `operation`.
	///
	/// Beginning the attempt cancels any previous one for the same operation;
	/// if a newer attempt begins while `fut` is pending, the outcome is
	/// discarded as [`Error::Aborted`] and nothing is surfaced.
	pub(crate) async fn coalesced<U>(
		&self,
		operation: Operation,
		fut: impl Future<Output = Result<U>>,
	) -> Result<U> {
		let span = OpSpan::new(operation, "coalesced");

		obs::record_op_outcome(operation, OpOutcome::Attempt);

		let guard = self.registry.begin(operation);
		let outcome = span
			.instrument(async {
				let outcome = tokio::select! {
					outcome = fut => outcome,
					_ = guard.superseded() => Err(Error::Aborted),
				};

				// A completion that raced its own supersession still loses.
				if guard.is_superseded() { Err(Error::Aborted) } else { outcome }
			})
			.await;

		record_outcome(&span, operation, &outcome);

		outcome
	}

	/// Runs `fut` under the busy latch for `operation`.
	///
	/// A duplicate submission while the latch is held resolves as
	/// [`Error::Aborted`] without reaching the network; the latch is released
	/// on every path, success and failure alike.
	pub(crate) async fn submit<U>(
		&self,
		operation: Operation,
		subject: Option<&str>,
		fut: impl Future<Output = Result<U>>,
	) -> Result<U> {
		let _hold = match subject {
			None => self.busy.try_hold(operation),
			Some(subject) => self.busy.try_hold_scoped(operation, subject),
		}
		.ok_or(Error::Aborted)?;
		let span = OpSpan::new(operation, "submit");

		obs::record_op_outcome(operation, OpOutcome::Attempt);

		let outcome = span.instrument(fut).await;

		record_outcome(&span, operation, &outcome);

		outcome
	}

	/// Clears the session, the response cache, and the pending TV submission.
	pub(crate) async fn teardown(&self) {
		let _ = self.store.clear().await;

		self.cache.clear();
		*self.pending_tv.write() = None;
		*self.tv_reference.write() = None;
	}

	/// Resolves and executes `call` against the active endpoint, spending the
	/// single fallback hop a transport failure is allowed.
	pub(crate) async fn dispatch(
		&self,
		call: &ApiCall,
		bearer: Option<TokenSecret>,
	) -> Result<RawResponse> {
		let (index, base) = {
			let (index, url) = self.pool.active();

			(index, url.clone())
		};
		let request = self.resolve(call, &base, bearer.clone())?;

		match self.transport.execute(request).await {
			Ok(response) => Ok(response),
			Err(failure) => {
				// One attempt against the next untried candidate; a second
				// failure surfaces and the pool stays where it was.
				let Some((next_index, next_base)) =
					self.pool.next_after(index).map(|(i, url)| (i, url.clone()))
				else {
					return Err(failure.into());
				};
				let request = self.resolve(call, &next_base, bearer)?;
				let response = self.transport.execute(request).await.map_err(Error::from)?;

				self.pool.adopt(next_index);

				Ok(response)
			},
		}
	}

	fn resolve(
		&self,
		call: &ApiCall,
		base: &Url,
		bearer: Option<TokenSecret>,
	) -> Result<ApiRequest> {
		let mut request = call.resolve(base, self.config.request_timeout)?;

		if let Some(bearer) = bearer {
			request = request.with_bearer(bearer);
		}

		Ok(request)
	}
}

fn record_outcome<U>(span: &OpSpan, operation: Operation, outcome: &Result<U>) {
	let label = match outcome {
		Ok(_) => OpOutcome::Success,
		Err(e) if e.is_aborted() => OpOutcome::Aborted,
		Err(_) => OpOutcome::Failure,
	};

	span.record_outcome(label);
	obs::record_op_outcome(operation, label);
}

/// Collapses a raw response into the typed payload of a data-bearing endpoint.
///
/// A non-2xx response whose body is not the JSON envelope (gateway errors,
/// empty bodies) degrades to [`Error::Api`] with the per-operation fallback
/// message instead of a decode failure.
pub(crate) fn payload<P>(response: &RawResponse, fallback: &str) -> Result<P>
where
	P: serde::de::DeserializeOwned,
{
	match decode_envelope::<P>(response) {
		Ok(envelope) => envelope.require_data(response.status, fallback),
		Err(e) if response.is_success() => Err(e),
		Err(_) => Err(Error::Api { message: fallback.into(), status: Some(response.status) }),
	}
}

/// Collapses an acknowledgement-style response, yielding the server message.
pub(crate) fn acknowledged(response: &RawResponse, fallback: &str) -> Result<Option<String>> {
	match decode_envelope::<serde_json::Value>(response) {
		Ok(envelope) => envelope.acknowledge(response.status, fallback),
		Err(e) if response.is_success() => Err(e),
		Err(_) => Err(Error::Api { message: fallback.into(), status: Some(response.status) }),
	}
}

/// Decodes the envelope of a response that may legally carry no payload,
/// yielding the message and optional data together.
pub(crate) fn envelope_of<P>(response: &RawResponse, fallback: &str) -> Result<Envelope<P>>
where
	P: serde::de::DeserializeOwned,
{
	match decode_envelope::<P>(response) {
		Ok(envelope) if envelope.success => Ok(envelope),
		Ok(envelope) => Err(Error::Api {
			message: envelope
				.message
				.filter(|m| !m.is_empty())
				.unwrap_or_else(|| fallback.into()),
			status: Some(response.status),
		}),
		Err(e) if response.is_success() => Err(e),
		Err(_) => Err(Error::Api { message: fallback.into(), status: Some(response.status) }),
	}
}
