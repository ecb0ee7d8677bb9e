//! Per-call request descriptors.

// self
use crate::{_prelude::*, obs::CallKind};

/// Everything the client needs to sign and dispatch one call.
///
/// Built fresh for every operation and consumed by the dispatch step.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
	/// Operation kind (and therefore HTTP verb).
	pub kind: CallKind,
	/// Final request path, query string included.
	pub path: String,
	/// Optional JSON body.
	pub body: Option<Value>,
	/// Optional idempotency key for create calls.
	pub idempotency_key: Option<String>,
}
impl RequestDescriptor {
	/// Creates a body-less descriptor for `path`.
	pub fn new(kind: CallKind, path: impl Into<String>) -> Self {
		Self { kind, path: path.into(), body: None, idempotency_key: None }
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: Value) -> Self {
		self.body = Some(body);

		self
	}

	/// Attaches an idempotency key; empty keys are ignored.
	pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
		let key = key.into();

		self.idempotency_key = if key.is_empty() { None } else { Some(key) };

		self
	}

	/// Whether the verb carries an explicit JSON content type.
	pub fn sends_explicit_content_type(&self) -> bool {
		matches!(self.kind, CallKind::Replace | CallKind::Modify)
	}
}
