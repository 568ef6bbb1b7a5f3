// self
use crate::obs::{OpOutcome, Operation};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_op_outcome(operation: Operation, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"easysub_client_request_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records a session teardown via the global metrics recorder (when enabled).
///
/// Counts every path that force-clears the session: a 403, a retry that is
/// still unauthorized, or a failed token refresh.
pub fn record_session_teardown() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("easysub_client_session_teardown_total").increment(1);
	}
}
