//! Lists vault accounts one page at a time against a live (or sandbox) Fireblocks workspace.
//!
//! 1. Export `FIREBLOCKS_API_KEY` and `FIREBLOCKS_SECRET_KEY_PATH` (path to the RSA private key
//!    registered for that key). `FIREBLOCKS_BASE_URL` optionally points at a sandbox.
//! 2. Build a [`ClientConfig`] and a reqwest-backed [`ReqwestApiClient`].
//! 3. Follow the `next-page` cursor until the server stops advertising one.

// std
use std::{env, fs};
// crates.io
use color_eyre::{Result, eyre::eyre};
use time::Duration;
use url::Url;
// self
use fireblocks_api_client::{
	client::{QueryParams, ReqwestApiClient},
	config::ClientConfig,
};

const PAGE_LIMIT: &str = "50";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let api_key = env::var("FIREBLOCKS_API_KEY")
		.map_err(|_| eyre!("`FIREBLOCKS_API_KEY` must be set to run this demo."))?;
	let key_path = env::var("FIREBLOCKS_SECRET_KEY_PATH")
		.map_err(|_| eyre!("`FIREBLOCKS_SECRET_KEY_PATH` must be set to run this demo."))?;
	let private_key = fs::read(&key_path)?;
	let mut builder = ClientConfig::builder(api_key).timeout(Duration::seconds(30));

	if let Ok(base_url) = env::var("FIREBLOCKS_BASE_URL") {
		builder = builder.base_url(Url::parse(&base_url)?);
	}

	let config = builder.build()?;
	let client = ReqwestApiClient::new(&config, &private_key)?;
	let mut query = QueryParams::new();
	let mut page_number = 1;

	query.insert("limit".into(), PAGE_LIMIT.into());

	loop {
		let page = client.fetch_page("/v1/vault/accounts_paged", Some(&query)).await?;

		println!("page {page_number}: {}", serde_json::to_string_pretty(&page.items)?);

		let Some(next) = page.next_cursor().filter(|cursor| !cursor.is_empty()) else {
			break;
		};

		query.insert("after".into(), next.to_owned());

		page_number += 1;
	}

	Ok(())
}
