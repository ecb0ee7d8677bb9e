//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `fireblocks_api.call` with the `call`
//!   (operation), `path`, and `status` fields.
//! - Enable `metrics` to increment the `fireblocks_api_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod tracing;

pub use tracing::*;

// self
use crate::_prelude::*;

/// Operation kinds exposed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Read a resource (`GET`).
	Fetch,
	/// Delete a resource (`DELETE`).
	Remove,
	/// Create a resource (`POST`).
	Create,
	/// Replace a resource (`PUT`).
	Replace,
	/// Partially update a resource (`PATCH`).
	Modify,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Fetch => "fetch",
			CallKind::Remove => "remove",
			CallKind::Create => "create",
			CallKind::Replace => "replace",
			CallKind::Modify => "modify",
		}
	}

	/// HTTP verb used on the wire.
	pub fn method(self) -> Method {
		match self {
			CallKind::Fetch => Method::GET,
			CallKind::Remove => Method::DELETE,
			CallKind::Create => Method::POST,
			CallKind::Replace => Method::PUT,
			CallKind::Modify => Method::PATCH,
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Normalized success value returned.
	Success,
	/// Error propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Increments `fireblocks_api_call_total` for `kind` and `outcome` when `metrics` is enabled.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!("fireblocks_api_call_total", "call" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}
