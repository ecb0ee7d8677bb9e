//! Transport primitives the client dispatches signed requests through.
//!
//! [`ApiTransport`] is the crate's only dependency on an HTTP stack. The client hands it a
//! fully assembled [`TransportRequest`] (verb, signed path, headers, optional JSON body) and
//! expects a [`TransportResponse`] carrying the raw status, headers, and body bytes back.
//! Failures raised by the transport are surfaced to callers untranslated.

// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Boxed future returned by [`ApiTransport::send`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing one request and returning the raw
/// response.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back a client shared
/// across tasks. Each call is independent; implementations must not carry request-scoped
/// state between calls.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type Error: 'static + Send + Sync + StdError;

	/// Issues `request` and resolves to the raw response.
	fn send(&self, request: TransportRequest) -> TransportFuture<'_, Self::Error>;
}

/// Fully assembled outbound request.
#[derive(Clone, Debug)]
pub struct TransportRequest {
	/// HTTP verb.
	pub method: Method,
	/// Request path relative to the base URL, query string included.
	pub path: String,
	/// Headers to send verbatim.
	pub headers: HeaderMap,
	/// Optional JSON body.
	pub body: Option<Value>,
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers (case-insensitive lookup).
	pub headers: HeaderMap,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl TransportResponse {
	/// Creates a response with no headers.
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Adds a header, keeping any existing values for the same name.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.append(name, value);

		self
	}
}

/// Reqwest-backed transport resolving request paths against a fixed base URL.
///
/// Redirects are not followed so the signed path is always the one the server sees.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	base_url: Url,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport from the client configuration (base URL and timeout).
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none());

		if let Some(timeout) = config.timeout() {
			builder = builder.timeout(timeout.unsigned_abs());
		}

		let client = builder.build().map_err(ConfigError::http_client_build)?;

		Ok(Self::with_client(client, config.base_url().clone()))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient, base_url: Url) -> Self {
		Self { client, base_url }
	}

	/// Base URL request paths are appended to.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn resolve(&self, path: &str) -> Result<Url, ReqwestTransportError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let joined = if path.starts_with('/') {
			format!("{base}{path}")
		} else {
			format!("{base}/{path}")
		};

		Url::parse(&joined).map_err(|source| ReqwestTransportError::Url { path: path.into(), source })
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	type Error = ReqwestTransportError;

	fn send(&self, request: TransportRequest) -> TransportFuture<'_, Self::Error> {
		Box::pin(async move {
			let url = self.resolve(&request.path)?;
			let mut builder = self.client.request(request.method, url).headers(request.headers);

			// `json` keeps an explicit content type and only fills in the default otherwise.
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response = builder.send().await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();

			Ok(TransportResponse { status, headers, body })
		})
	}
}

/// Failures raised by [`ReqwestTransport`].
#[cfg(feature = "reqwest")]
#[derive(Debug, ThisError)]
pub enum ReqwestTransportError {
	/// The signed path could not be joined onto the base URL.
	#[error("Request path `{path}` does not form a valid URL.")]
	Url {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Reqwest reported a network, timeout, or body failure.
	#[error(transparent)]
	Request(#[from] ReqwestError),
}
