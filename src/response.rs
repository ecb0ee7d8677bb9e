//! Response normalization shared by every client operation.
//!
//! [`normalize`] (or its per-shape halves [`normalize_value`] and [`normalize_page`]) turns a
//! raw [`TransportResponse`] into one of two success shapes or an [`ApiError`]:
//!
//! 1. The body is decoded as JSON; any decoding failure yields [`Value::Null`] instead of an
//!    error, which is how empty `204` bodies become successful `null` payloads.
//! 2. Statuses of 300 and above become an [`ApiError`] that embeds the raw body text and, when
//!    the decoded body is an object with a non-null `code`, that code.
//! 3. Statuses below 300 return the decoded value, wrapped in a [`PagedResult`] with the
//!    `prev-page`/`next-page` headers when the caller asked for page mode.

// self
use crate::{_prelude::*, error::ApiError, transport::TransportResponse};

/// Header carrying the previous-page cursor.
pub const PREV_PAGE_HEADER: &str = "prev-page";
/// Header carrying the next-page cursor.
pub const NEXT_PAGE_HEADER: &str = "next-page";

/// Success shape selected explicitly by the caller's page-mode flag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
	/// Decoded body returned as-is.
	Value(Value),
	/// Decoded body plus pagination cursors.
	Paged(PagedResult),
}
impl ApiResponse {
	/// Returns the decoded payload regardless of the shape.
	pub fn items(&self) -> &Value {
		match self {
			Self::Value(value) => value,
			Self::Paged(page) => &page.items,
		}
	}

	/// Unwraps the plain shape, discarding pagination details if present.
	pub fn into_value(self) -> Value {
		match self {
			Self::Value(value) => value,
			Self::Paged(page) => page.items,
		}
	}

	/// Returns the paged shape, if this response was fetched in page mode.
	pub fn into_paged(self) -> Option<PagedResult> {
		match self {
			Self::Paged(page) => Some(page),
			Self::Value(_) => None,
		}
	}
}

/// Payload together with the pagination cursors the server advertised.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult {
	/// Decoded body (may be `null`).
	#[serde(rename = "transactions")]
	pub items: Value,
	/// Cursors read from the response headers.
	pub page_details: PageDetails,
}
impl PagedResult {
	/// First previous-page cursor, if the server sent one.
	pub fn prev_cursor(&self) -> Option<&str> {
		self.page_details.prev_page.first().map(String::as_str)
	}

	/// First next-page cursor, if the server sent one.
	pub fn next_cursor(&self) -> Option<&str> {
		self.page_details.next_page.first().map(String::as_str)
	}
}

/// Header values exactly as received; an absent header leaves its list empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetails {
	/// Values of the `prev-page` header.
	pub prev_page: Vec<String>,
	/// Values of the `next-page` header.
	pub next_page: Vec<String>,
}
impl PageDetails {
	/// Reads both cursor headers from `headers`.
	pub fn from_headers(headers: &HeaderMap) -> Self {
		Self {
			prev_page: header_values(headers, PREV_PAGE_HEADER),
			next_page: header_values(headers, NEXT_PAGE_HEADER),
		}
	}
}

/// Converts a raw transport response into a success shape or an [`ApiError`].
pub fn normalize(response: TransportResponse, page_mode: bool) -> Result<ApiResponse, ApiError> {
	if page_mode {
		normalize_page(response).map(ApiResponse::Paged)
	} else {
		normalize_value(response).map(ApiResponse::Value)
	}
}

/// Plain-mode normalization: the decoded body on success.
pub fn normalize_value(response: TransportResponse) -> Result<Value, ApiError> {
	classify(&response)
}

/// Page-mode normalization: the decoded body plus the cursor headers on success.
pub fn normalize_page(response: TransportResponse) -> Result<PagedResult, ApiError> {
	let items = classify(&response)?;

	Ok(PagedResult { items, page_details: PageDetails::from_headers(&response.headers) })
}

fn classify(response: &TransportResponse) -> Result<Value, ApiError> {
	let decoded = decode_body(&response.body);

	if response.status.as_u16() >= 300 {
		let code = error_code(&decoded);
		let body = String::from_utf8_lossy(&response.body);

		return Err(ApiError::new(response.status.as_u16(), &body, code));
	}

	Ok(decoded)
}

/// Decodes `body` as JSON, treating any failure as `null`.
pub fn decode_body(body: &[u8]) -> Value {
	serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn error_code(decoded: &Value) -> Option<String> {
	match decoded.get("code")? {
		Value::Null => None,
		Value::String(code) => Some(code.clone()),
		other => Some(other.to_string()),
	}
}

fn header_values(headers: &HeaderMap, name: &str) -> Vec<String> {
	headers
		.get_all(name)
		.iter()
		.map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
		.collect()
}
