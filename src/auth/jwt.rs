//! RS256 JWT signer binding each token to the request URI and a body hash.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rand::Rng;
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::{ApiKey, SignedToken, TokenSigner},
	error::{ConfigError, SigningError},
};

/// Default lifetime of a freshly signed token.
pub const DEFAULT_TOKEN_VALIDITY: Duration = Duration::seconds(55);
/// Longest token lifetime a signer accepts.
pub const MAX_TOKEN_VALIDITY: Duration = Duration::hours(1);

const NONCE_LEN: usize = 16;

/// Claims carried by every token minted by [`JwtTokenSigner`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
	/// Signed request path, query string included.
	pub uri: String,
	/// Random per-token value.
	pub nonce: String,
	/// Issue time in unix seconds.
	pub iat: i64,
	/// Expiry in unix seconds.
	pub exp: i64,
	/// API key of the caller.
	pub sub: String,
	/// Lowercase hex SHA-256 of the serialized body (or of the empty string).
	pub body_hash: String,
}
impl TokenClaims {
	/// Builds the claim set for one request at `issued_at`.
	pub fn new(
		api_key: &ApiKey,
		path: &str,
		body: Option<&Value>,
		issued_at: OffsetDateTime,
		validity: Duration,
	) -> Result<Self, SigningError> {
		let iat = issued_at.unix_timestamp();
		let exp = iat
			.checked_add(validity.whole_seconds())
			.ok_or(SigningError::ExpiryOverflow { validity })?;

		Ok(Self {
			uri: path.to_owned(),
			nonce: random_nonce(),
			iat,
			exp,
			sub: api_key.expose().to_owned(),
			body_hash: body_hash(body)?,
		})
	}
}

/// Token signer backed by an RSA private key.
#[derive(Clone)]
pub struct JwtTokenSigner {
	key: EncodingKey,
	api_key: ApiKey,
	validity: Duration,
}
impl JwtTokenSigner {
	/// Loads a PEM-encoded RSA private key for `api_key`.
	pub fn from_rsa_pem(pem: &[u8], api_key: ApiKey) -> Result<Self, SigningError> {
		let key =
			EncodingKey::from_rsa_pem(pem).map_err(|source| SigningError::InvalidKey { source })?;

		Ok(Self { key, api_key, validity: DEFAULT_TOKEN_VALIDITY })
	}

	/// Overrides the token lifetime (defaults to 55 seconds).
	///
	/// The window must be positive and no longer than [`MAX_TOKEN_VALIDITY`].
	pub fn with_validity(mut self, validity: Duration) -> Result<Self, ConfigError> {
		validate_token_validity(validity)?;

		self.validity = validity;

		Ok(self)
	}

	/// Returns the configured token lifetime.
	pub fn validity(&self) -> Duration {
		self.validity
	}

	/// Signs `path` and `body` as if the current time were `now`.
	pub fn sign_at(
		&self,
		path: &str,
		body: Option<&Value>,
		now: OffsetDateTime,
	) -> Result<SignedToken, SigningError> {
		let claims = TokenClaims::new(&self.api_key, path, body, now, self.validity)?;
		let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
			.map_err(|source| SigningError::Encode { source })?;

		Ok(SignedToken::new(token))
	}
}
impl TokenSigner for JwtTokenSigner {
	fn sign(&self, path: &str, body: Option<&Value>) -> Result<SignedToken, SigningError> {
		self.sign_at(path, body, OffsetDateTime::now_utc())
	}
}
impl Debug for JwtTokenSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("JwtTokenSigner")
			.field("key", &"<redacted>")
			.field("api_key", &self.api_key)
			.field("validity", &self.validity)
			.finish()
	}
}

/// Hashes the exact bytes the transport will send for `body`.
pub fn body_hash(body: Option<&Value>) -> Result<String, SigningError> {
	let bytes = match body {
		Some(value) => serde_json::to_vec(value)?,
		None => Vec::new(),
	};
	let digest = Sha256::digest(&bytes);

	Ok(format!("{digest:x}"))
}

/// Checks that `validity` is positive and within [`MAX_TOKEN_VALIDITY`].
pub fn validate_token_validity(validity: Duration) -> Result<(), ConfigError> {
	if validity <= Duration::ZERO {
		return Err(ConfigError::NonPositiveTokenValidity);
	}
	if validity > MAX_TOKEN_VALIDITY {
		return Err(ConfigError::TokenValidityTooLong { max: MAX_TOKEN_VALIDITY });
	}

	Ok(())
}

fn random_nonce() -> String {
	let bytes: [u8; NONCE_LEN] = rand::rng().random();

	URL_SAFE_NO_PAD.encode(bytes)
}
