#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use humanity_sdk::{
	auth::TokenSecret,
	client::{
		ClientUserTokenOptions, HumanityClient, IdentifierKind, RefreshOptions,
		ReqwestHumanityClient, UserIdentifier,
	},
	error::{Error, ValidationError},
	wire::{RevokeRequest, TokenTypeHint},
};

const CLIENT_ID: &str = "client-flows";
const CLIENT_SECRET: &str = "secret-flows";
const REDIRECT_URI: &str = "https://app.example.com/humanity/callback";

fn build_client(server: &MockServer) -> ReqwestHumanityClient {
	HumanityClient::builder(
		CLIENT_ID,
		Url::parse(REDIRECT_URI).expect("Redirect URI should parse successfully."),
	)
	.base_url(Url::parse(&server.base_url()).expect("Mock base URL should parse successfully."))
	.client_secret(CLIENT_SECRET)
	.build()
	.expect("Client should build successfully.")
}

fn token_body() -> serde_json::Value {
	json!({
		"access_token": "hp_at_1",
		"token_type": "Bearer",
		"expires_in": 3600,
		"scope": "openid hp:presets.is_human",
		"granted_scopes": ["openid", "hp:presets.is_human"],
		"authorization_id": "auth-1",
		"app_scoped_user_id": "asu-1",
		"issued_at": "2026-01-01T00:00:00Z",
		"refresh_token": "hp_rt_1",
		"refresh_token_expires_in": 86400,
	})
}

#[tokio::test]
async fn code_exchange_posts_the_exact_grant_body() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").json_body(json!({
				"grant_type": "authorization_code",
				"code": "auth-code-1",
				"code_verifier": "verifier-1",
				"redirect_uri": REDIRECT_URI,
				"client_id": CLIENT_ID,
			}));
			then.status(200)
				.header("content-type", "application/json")
				.header("x-ratelimit-limit", "120")
				.header("x-ratelimit-remaining", "119")
				.json_body(token_body());
		})
		.await;
	let grant = client
		.exchange_code("auth-code-1", "verifier-1")
		.await
		.expect("Code exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(grant.access_token.expose(), "hp_at_1");
	assert_eq!(grant.granted_scopes, ["openid", "hp:presets.is_human"]);
	assert_eq!(grant.preset_keys, ["openid", "isHuman"]);
	assert_eq!(grant.refresh_token.as_ref().map(TokenSecret::expose), Some("hp_rt_1"));
	assert_eq!(grant.rate_limit.and_then(|info| info.limit), Some(120));
	assert_eq!(grant.rate_limit.and_then(|info| info.remaining), Some(119));
}

#[tokio::test]
async fn refresh_narrows_scope_without_translating_it() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").json_body(json!({
				"grant_type": "refresh_token",
				"refresh_token": "hp_rt_1",
				"scope": "isHuman is18Plus",
				"client_id": CLIENT_ID,
			}));
			then.status(200).header("content-type", "application/json").json_body(token_body());
		})
		.await;
	let grant = client
		.refresh_access_token("hp_rt_1", RefreshOptions::new().scopes(["isHuman", "is18Plus"]))
		.await
		.expect("Refresh should succeed.");

	mock.assert_async().await;

	assert_eq!(grant.authorization_id, "auth-1");

	let err = client
		.refresh_access_token("", RefreshOptions::new())
		.await
		.expect_err("Empty refresh tokens should be rejected locally.");

	assert!(matches!(err, Error::Validation(ValidationError::MissingRefreshToken)));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn client_user_tokens_post_the_compound_identifier() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/client/user-token").json_body(json!({
				"client_id": CLIENT_ID,
				"client_secret": CLIENT_SECRET,
				"identifier": "evm_addr|0xabc123",
			}));
			then.status(200).header("content-type", "application/json").json_body(json!({
				"access_token": "hp_cut_1",
				"token_type": "Bearer",
				"expires_in": 900,
				"issued_at": "2026-01-01T00:00:00Z",
				"user_id": "user-1",
				"client_id": CLIENT_ID,
				"authorization_id": "auth-1",
				"scopes": ["hp:presets.is_human"],
			}));
		})
		.await;
	let grant = client
		.client_user_token(
			ClientUserTokenOptions::new()
				.identifier(UserIdentifier::new(IdentifierKind::EvmAddr, "0xabc123")),
		)
		.await
		.expect("Issuance should succeed.");

	mock.assert_async().await;

	assert_eq!(grant.access_token.expose(), "hp_cut_1");
	assert_eq!(grant.user_id, "user-1");
	assert_eq!(grant.scopes, ["hp:presets.is_human"]);
}

#[tokio::test]
async fn revocation_maps_per_entry_details() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/revoke").json_body(json!({
				"client_id": CLIENT_ID,
				"tokens": ["hp_rt_1", "hp_rt_2"],
				"token_type_hint": "refresh_token",
				"cascade": true,
			}));
			then.status(200)
				.header("content-type", "application/json")
				.header("x-ratelimit-remaining", "58")
				.json_body(json!({
					"revoked": true,
					"revoked_count": 1,
					"details": [
						{"subject": "token", "token_type": "refresh_token", "status": "revoked"},
						{"subject": "token", "status": "not_found", "reason": "Unknown token."},
					],
				}));
		})
		.await;
	let outcome = client
		.revoke_tokens(
			RevokeRequest::new()
				.with_tokens(["hp_rt_1", "hp_rt_2"])
				.with_token_type_hint(TokenTypeHint::RefreshToken)
				.with_cascade(true),
		)
		.await
		.expect("Revocation should succeed.");

	mock.assert_async().await;

	assert!(outcome.revoked);
	assert_eq!(outcome.revoked_count, 1);
	assert_eq!(outcome.details.as_ref().map(Vec::len), Some(2));
	assert_eq!(outcome.rate_limit.and_then(|info| info.remaining), Some(58));
}

#[tokio::test]
async fn api_failures_normalize_into_coded_errors() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(400).header("content-type", "application/json").json_body(json!({
				"error": "invalid_grant",
				"error_code": "E4001",
				"error_description": "Authorization code has expired.",
			}));
		})
		.await;
	let err = client
		.exchange_code("expired-code", "verifier-1")
		.await
		.expect_err("An expired code should fail the exchange.");

	mock.assert_async().await;

	match err {
		Error::Api(api) => {
			assert_eq!(api.status, 400);
			assert_eq!(api.code, "E4001");
			assert_eq!(api.message, "Authorization code has expired.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn malformed_success_bodies_surface_decode_errors() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "access_token": 42 }));
		})
		.await;
	let err = client
		.exchange_code("auth-code-1", "verifier-1")
		.await
		.expect_err("A contract-violating body should fail decoding.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Decode { status: 200, .. }));
}
