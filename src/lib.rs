//! Signed, transport-agnostic HTTP client for the Fireblocks custody API.
//!
//! Every call carries a fresh JWT bound to its own path and body, and every response is
//! normalized into one shape.
//!
//! The crate is split along the request lifecycle:
//!
//! - [`auth`] derives the per-request bearer token ([`auth::TokenSigner`]).
//! - [`client`] assembles headers and exposes the five operations on [`client::ApiClient`].
//! - [`transport`] is the only dependency on an HTTP stack ([`transport::ApiTransport`]).
//! - [`response`] turns raw status/headers/body triples into values or [`error::ApiError`]s.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod obs;
pub mod response;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
