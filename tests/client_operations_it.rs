mod common;

// crates.io
use serde_json::{Value, json};
// self
use common::*;
use fireblocks_api_client::{
	client::QueryParams,
	error::Error,
	http::{HeaderName, HeaderValue, Method},
	response::ApiResponse,
};

fn query(pairs: &[(&str, &str)]) -> QueryParams {
	pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[tokio::test]
async fn fetch_signs_path_including_query_string() {
	let client = fake_client(FakeTransport::default().respond(json_response(200, "[]")));
	let params = query(&[("status", "COMPLETED"), ("limit", "10")]);

	client
		.fetch("/v1/transactions", Some(&params))
		.await
		.expect("Fetch with query parameters should succeed.");

	let signed = client.signer().calls();
	let sent = client.transport().last_request();

	assert_eq!(signed, vec![("/v1/transactions?limit=10&status=COMPLETED".to_owned(), None)]);
	assert_eq!(sent.path, "/v1/transactions?limit=10&status=COMPLETED");
	assert_eq!(sent.method, Method::GET);
	assert_eq!(header(&sent, "authorization"), Some("Bearer token-1"));
	assert_eq!(header(&sent, "x-api-key"), Some(API_KEY));
	assert!(sent.body.is_none());
}

#[tokio::test]
async fn fetch_with_empty_query_keeps_path() {
	let client = fake_client(
		FakeTransport::default()
			.respond(json_response(200, "{}"))
			.respond(json_response(200, "{}")),
	);

	client
		.fetch("/v1/vault/accounts", Some(&QueryParams::new()))
		.await
		.expect("Fetch with empty query should succeed.");
	client.fetch("/v1/vault/accounts", None).await.expect("Fetch without query should succeed.");

	for request in client.transport().requests() {
		assert_eq!(request.path, "/v1/vault/accounts");
	}
	for (path, _) in client.signer().calls() {
		assert_eq!(path, "/v1/vault/accounts");
	}
}

#[tokio::test]
async fn create_omits_idempotency_header_without_key() {
	let client = fake_client(FakeTransport::default().respond(json_response(200, "{\"id\":\"1\"}")));
	let body = json!({ "assetId": "ETH", "amount": "0.1" });

	client.create("/v1/transactions", &body, None).await.expect("Create should succeed.");

	let sent = client.transport().last_request();

	assert_eq!(sent.method, Method::POST);
	assert!(sent.headers.get("idempotency-key").is_none());
	assert!(sent.headers.get("content-type").is_none());
	assert_eq!(sent.body, Some(body.clone()));
	assert_eq!(client.signer().calls(), vec![("/v1/transactions".to_owned(), Some(body))]);
}

#[tokio::test]
async fn create_forwards_idempotency_key_verbatim() {
	let client = fake_client(
		FakeTransport::default()
			.respond(json_response(200, "{\"id\":\"1\"}"))
			.respond(json_response(200, "{\"id\":\"1\"}")),
	);
	let body = json!({ "assetId": "ETH" });

	client
		.create("/v1/transactions", &body, Some("9b1d-idem"))
		.await
		.expect("Create with an idempotency key should succeed.");

	assert_eq!(header(&client.transport().last_request(), "Idempotency-Key"), Some("9b1d-idem"));

	client
		.create("/v1/transactions", &body, Some(""))
		.await
		.expect("Create with an empty idempotency key should succeed.");

	assert!(client.transport().last_request().headers.get("idempotency-key").is_none());
}

#[tokio::test]
async fn replace_and_modify_send_explicit_content_type() {
	let client = fake_client(
		FakeTransport::default()
			.respond(json_response(200, "{\"ok\":true}"))
			.respond(json_response(200, "{\"ok\":true}")),
	);
	let body = json!({ "name": "Treasury" });

	client.replace("/v1/vault/accounts/0", &body).await.expect("Replace should succeed.");
	client.modify("/v1/vault/accounts/0", &body).await.expect("Modify should succeed.");

	let requests = client.transport().requests();

	assert_eq!(requests.len(), 2);
	assert_eq!(requests[0].method, Method::PUT);
	assert_eq!(requests[1].method, Method::PATCH);

	for request in &requests {
		assert_eq!(header(request, "content-type"), Some("application/json"));
		assert_eq!(request.body.as_ref(), Some(&body));
	}
	for (path, signed_body) in client.signer().calls() {
		assert_eq!(path, "/v1/vault/accounts/0");
		assert_eq!(signed_body.as_ref(), Some(&body));
	}
}

#[tokio::test]
async fn remove_signs_path_only() {
	let client = fake_client(FakeTransport::default().respond(json_response(200, "{\"ok\":true}")));
	let value = client.remove("/v1/webhooks/7").await.expect("Remove should succeed.");
	let sent = client.transport().last_request();

	assert_eq!(value, json!({ "ok": true }));
	assert_eq!(sent.method, Method::DELETE);
	assert!(sent.body.is_none());
	assert!(sent.headers.get("content-type").is_none());
	assert_eq!(client.signer().calls(), vec![("/v1/webhooks/7".to_owned(), None)]);
}

#[tokio::test]
async fn error_status_with_code_raises_api_error() {
	let body = "{\"code\":\"E1001\",\"message\":\"not found\"}";
	let client = fake_client(FakeTransport::default().respond(json_response(404, body)));
	let err = client
		.fetch("/v1/vault/accounts/404", None)
		.await
		.expect_err("404 responses should raise an API error.");

	match err {
		Error::Api(api) => {
			assert_eq!(api.status, 404);
			assert_eq!(api.code.as_deref(), Some("E1001"));
			assert!(api.message.contains(body));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn error_status_with_unparseable_body_has_no_code() {
	let client = fake_client(
		FakeTransport::default().respond(json_response(500, "upstream exploded; not json")),
	);
	let err = client
		.fetch("/v1/transactions", None)
		.await
		.expect_err("500 responses should raise an API error.");
	let api = err.as_api().expect("Error should be an API error.");

	assert_eq!(api.code, None);
	assert!(api.message.contains("upstream exploded; not json"));
}

#[tokio::test]
async fn success_returns_decoded_value_without_wrapping() {
	let client = fake_client(FakeTransport::default().respond(json_response(200, "{\"a\":1}")));
	let value = client.fetch("/v1/users", None).await.expect("Fetch should succeed.");

	assert_eq!(value, json!({ "a": 1 }));
}

#[tokio::test]
async fn page_mode_surfaces_cursor_headers() {
	let response = json_response(200, "[1,2,3]")
		.with_header(HeaderName::from_static("next-page"), HeaderValue::from_static("abc"));
	let client = fake_client(FakeTransport::default().respond(response));
	let page = client
		.fetch_page("/v1/vault/accounts_paged", None)
		.await
		.expect("Paged fetch should succeed.");

	assert_eq!(page.items, json!([1, 2, 3]));
	assert!(page.page_details.prev_page.is_empty());
	assert_eq!(page.next_cursor(), Some("abc"));
}

#[tokio::test]
async fn fetch_with_selects_shape_from_flag() {
	let client = fake_client(
		FakeTransport::default()
			.respond(json_response(200, "[1]"))
			.respond(json_response(200, "[1]")),
	);
	let plain = client.fetch_with("/v1/assets", false, None).await.expect("Fetch should succeed.");
	let paged = client.fetch_with("/v1/assets", true, None).await.expect("Fetch should succeed.");

	assert!(matches!(plain, ApiResponse::Value(_)));
	assert!(matches!(paged, ApiResponse::Paged(_)));
}

#[tokio::test]
async fn no_content_is_a_null_success_for_every_operation() {
	let transport = (0..5).fold(FakeTransport::default(), |transport, _| {
		transport.respond(json_response(204, ""))
	});
	let client = fake_client(transport);
	let body = json!({ "k": "v" });

	assert_eq!(client.fetch("/v1/a", None).await.expect("Fetch should succeed."), Value::Null);
	assert_eq!(client.remove("/v1/a").await.expect("Remove should succeed."), Value::Null);
	assert_eq!(
		client.create("/v1/a", &body, None).await.expect("Create should succeed."),
		Value::Null,
	);
	assert_eq!(client.replace("/v1/a", &body).await.expect("Replace should succeed."), Value::Null);
	assert_eq!(client.modify("/v1/a", &body).await.expect("Modify should succeed."), Value::Null);
}

#[tokio::test]
async fn transport_failures_propagate_untranslated() {
	let client = fake_client(FakeTransport::default().fail(FakeTransportError::ConnectionRefused));
	let err = client
		.fetch("/v1/vault/accounts", None)
		.await
		.expect_err("Transport failures should surface to the caller.");

	match err {
		Error::Transport(transport) => {
			let inner = transport.into_inner();

			assert_eq!(
				inner.downcast_ref::<FakeTransportError>(),
				Some(&FakeTransportError::ConnectionRefused),
			);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn identical_requests_are_signed_separately() {
	let client = fake_client(
		FakeTransport::default()
			.respond(json_response(200, "{}"))
			.respond(json_response(200, "{}")),
	);
	let (first, second) =
		tokio::join!(client.fetch("/v1/vault/accounts", None), client.fetch("/v1/vault/accounts", None));

	first.expect("First concurrent fetch should succeed.");
	second.expect("Second concurrent fetch should succeed.");

	let mut tokens = client
		.transport()
		.requests()
		.iter()
		.filter_map(|request| header(request, "authorization").map(str::to_owned))
		.collect::<Vec<_>>();

	tokens.sort();

	assert_eq!(client.signer().calls().len(), 2);
	assert_eq!(tokens, vec!["Bearer token-1".to_owned(), "Bearer token-2".to_owned()]);
}
