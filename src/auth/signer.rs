//! Token signing contract consumed by the client.

// self
use crate::{_prelude::*, auth::SignedToken, error::SigningError};

/// Produces a bearer token bound to a request's exact path and body.
///
/// Implementations must embed a timestamp or expiry so that identical inputs signed at
/// different instants yield different tokens. The client calls [`sign`](TokenSigner::sign)
/// once per request, after the final path (query string included) is known, and never
/// reuses the result.
pub trait TokenSigner
where
	Self: 'static + Send + Sync,
{
	/// Signs `path` and the optional JSON `body`.
	fn sign(&self, path: &str, body: Option<&Value>) -> Result<SignedToken, SigningError>;
}
