//! Authenticated API client exposing one operation per HTTP verb.
//!
//! Every operation follows the same pipeline: build the final path (query string
//! included), ask the [`TokenSigner`] for a fresh token over that path and the body,
//! assemble headers, dispatch through the [`ApiTransport`], and run the raw response
//! through [`response::normalize_value`] or [`response::normalize_page`]. Nothing is cached between calls, so one client can be
//! shared freely across tasks.

pub mod headers;
pub mod query;
pub mod request;

pub use headers::*;
pub use query::*;
pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, JwtTokenSigner, TokenSigner},
	config::ClientConfig,
	error::{ApiError, TransportError},
	obs::{self, CallKind, CallOutcome, CallSpan},
	response::{self, ApiResponse, PagedResult},
	transport::{ApiTransport, TransportRequest, TransportResponse},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;

type Normalizer<R> = fn(TransportResponse) -> Result<R, ApiError>;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport and RS256 signer.
pub type ReqwestApiClient = ApiClient<ReqwestTransport, JwtTokenSigner>;

/// Signs, dispatches, and normalizes calls against the custody API.
///
/// The client holds only immutable state: the API key, the signer, and the transport.
pub struct ApiClient<T, S = JwtTokenSigner>
where
	T: ?Sized + ApiTransport,
	S: ?Sized + TokenSigner,
{
	transport: Arc<T>,
	signer: Arc<S>,
	api_key: ApiKey,
}
impl<T, S> ApiClient<T, S>
where
	T: ?Sized + ApiTransport,
	S: ?Sized + TokenSigner,
{
	/// Creates a client from caller-provided signer and transport collaborators.
	pub fn with_parts(
		config: &ClientConfig,
		signer: impl Into<Arc<S>>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			signer: signer.into(),
			api_key: config.api_key().clone(),
		}
	}

	/// API key attached to every request.
	pub fn api_key(&self) -> &ApiKey {
		&self.api_key
	}

	/// Transport used for dispatch.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Signer used to mint per-request tokens.
	pub fn signer(&self) -> &Arc<S> {
		&self.signer
	}

	/// Reads `path` and returns the decoded body.
	pub async fn fetch(&self, path: &str, query: Option<&QueryParams>) -> Result<Value> {
		self.dispatch(fetch_request(path, query), response::normalize_value).await
	}

	/// Reads `path` and returns the decoded body together with its pagination cursors.
	pub async fn fetch_page(&self, path: &str, query: Option<&QueryParams>) -> Result<PagedResult> {
		self.dispatch(fetch_request(path, query), response::normalize_page).await
	}

	/// Reads `path`, returning the shape selected by `page_mode`.
	///
	/// A non-empty `query` is encoded onto the path before signing so the token covers the
	/// exact URI the server receives.
	pub async fn fetch_with(
		&self,
		path: &str,
		page_mode: bool,
		query: Option<&QueryParams>,
	) -> Result<ApiResponse> {
		if page_mode {
			self.fetch_page(path, query).await.map(ApiResponse::Paged)
		} else {
			self.fetch(path, query).await.map(ApiResponse::Value)
		}
	}

	/// Deletes `path`. The token covers the path only.
	pub async fn remove(&self, path: &str) -> Result<Value> {
		self.dispatch(RequestDescriptor::new(CallKind::Remove, path), response::normalize_value)
			.await
	}

	/// Creates a resource at `path`.
	///
	/// A non-empty `idempotency_key` is sent as `Idempotency-Key`; otherwise the header is
	/// left out entirely.
	pub async fn create(
		&self,
		path: &str,
		body: &Value,
		idempotency_key: Option<&str>,
	) -> Result<Value> {
		let mut request = RequestDescriptor::new(CallKind::Create, path).with_body(body.clone());

		if let Some(key) = idempotency_key {
			request = request.with_idempotency_key(key);
		}

		self.dispatch(request, response::normalize_value).await
	}

	/// Replaces the resource at `path`, always sending an explicit JSON content type.
	pub async fn replace(&self, path: &str, body: &Value) -> Result<Value> {
		let request = RequestDescriptor::new(CallKind::Replace, path).with_body(body.clone());

		self.dispatch(request, response::normalize_value).await
	}

	/// Partially updates the resource at `path`, always sending an explicit JSON content type.
	pub async fn modify(&self, path: &str, body: &Value) -> Result<Value> {
		let request = RequestDescriptor::new(CallKind::Modify, path).with_body(body.clone());

		self.dispatch(request, response::normalize_value).await
	}

	async fn dispatch<R>(&self, request: RequestDescriptor, normalize: Normalizer<R>) -> Result<R> {
		let kind = request.kind;
		let span = CallSpan::new(kind, &request.path);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span.instrument(self.execute(request, normalize, &span)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}

	async fn execute<R>(
		&self,
		request: RequestDescriptor,
		normalize: Normalizer<R>,
		span: &CallSpan,
	) -> Result<R> {
		// Signing happens last, right before dispatch, over the final path.
		let token = self.signer.sign(&request.path, request.body.as_ref())?;
		let headers = assemble_headers(&self.api_key, &token, &request)?;
		let RequestDescriptor { kind, path, body, .. } = request;
		let response = self
			.transport
			.send(TransportRequest { method: kind.method(), path, headers, body })
			.await
			.map_err(TransportError::network)?;

		span.record_status(response.status.as_u16());

		Ok(normalize(response)?)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport, JwtTokenSigner> {
	/// Creates a reqwest-backed client that signs with the PEM-encoded RSA `private_key`.
	pub fn new(config: &ClientConfig, private_key: &[u8]) -> Result<Self> {
		let signer = JwtTokenSigner::from_rsa_pem(private_key, config.api_key().clone())?
			.with_validity(config.token_validity())?;
		let transport = ReqwestTransport::from_config(config)?;

		Ok(Self::with_parts(config, signer, transport))
	}
}
impl<T, S> Clone for ApiClient<T, S>
where
	T: ?Sized + ApiTransport,
	S: ?Sized + TokenSigner,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			signer: Arc::clone(&self.signer),
			api_key: self.api_key.clone(),
		}
	}
}
impl<T, S> Debug for ApiClient<T, S>
where
	T: ?Sized + ApiTransport,
	S: ?Sized + TokenSigner,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("api_key", &self.api_key).finish_non_exhaustive()
	}
}

fn fetch_request(path: &str, query: Option<&QueryParams>) -> RequestDescriptor {
	let path = match query {
		Some(params) => append_query(path, params),
		None => path.to_owned(),
	};

	RequestDescriptor::new(CallKind::Fetch, path)
}
