//! Recording fakes shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use fireblocks_api_client::{
	auth::{SignedToken, TokenSigner},
	client::ApiClient,
	config::ClientConfig,
	error::SigningError,
	http::StatusCode,
	serde_json::Value,
	transport::{ApiTransport, TransportFuture, TransportRequest, TransportResponse},
};

pub const API_KEY: &str = "it-api-key";

pub type FakeClient = ApiClient<FakeTransport, RecordingSigner>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FakeTransportError {
	ConnectionRefused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionRefused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Transport that replays queued responses and records every request it receives.
#[derive(Default)]
pub struct FakeTransport {
	responses: Mutex<VecDeque<Result<TransportResponse, FakeTransportError>>>,
	requests: Mutex<Vec<TransportRequest>>,
}
impl FakeTransport {
	pub fn respond(self, response: TransportResponse) -> Self {
		self.responses.lock().push_back(Ok(response));

		self
	}

	pub fn fail(self, error: FakeTransportError) -> Self {
		self.responses.lock().push_back(Err(error));

		self
	}

	pub fn requests(&self) -> Vec<TransportRequest> {
		self.requests.lock().clone()
	}

	pub fn last_request(&self) -> TransportRequest {
		self.requests.lock().last().cloned().expect("Transport should have received a request.")
	}
}
impl ApiTransport for FakeTransport {
	type Error = FakeTransportError;

	fn send(&self, request: TransportRequest) -> TransportFuture<'_, Self::Error> {
		self.requests.lock().push(request);

		let next = self
			.responses
			.lock()
			.pop_front()
			.unwrap_or_else(|| Ok(TransportResponse::new(StatusCode::NO_CONTENT, Vec::new())));

		Box::pin(async move { next })
	}
}

/// Signer that records its inputs and hands out sequential tokens.
#[derive(Default)]
pub struct RecordingSigner {
	calls: Mutex<Vec<(String, Option<Value>)>>,
}
impl RecordingSigner {
	pub fn calls(&self) -> Vec<(String, Option<Value>)> {
		self.calls.lock().clone()
	}
}
impl TokenSigner for RecordingSigner {
	fn sign(&self, path: &str, body: Option<&Value>) -> Result<SignedToken, SigningError> {
		let mut calls = self.calls.lock();

		calls.push((path.to_owned(), body.cloned()));

		Ok(SignedToken::new(format!("token-{}", calls.len())))
	}
}

pub fn config() -> ClientConfig {
	ClientConfig::builder(API_KEY).build().expect("Integration config should validate.")
}

pub fn fake_client(transport: FakeTransport) -> FakeClient {
	ApiClient::with_parts(&config(), Arc::new(RecordingSigner::default()), Arc::new(transport))
}

pub fn json_response(status: u16, body: &str) -> TransportResponse {
	TransportResponse::new(
		StatusCode::from_u16(status).expect("Status fixture should be valid."),
		body.as_bytes().to_vec(),
	)
}

pub fn header<'a>(request: &'a TransportRequest, name: &str) -> Option<&'a str> {
	request.headers.get(name).and_then(|value| value.to_str().ok())
}
