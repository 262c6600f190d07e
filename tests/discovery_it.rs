#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use humanity_sdk::client::{AuthorizeOptions, HumanityClient, ReqwestHumanityClient};

const CLIENT_ID: &str = "client-discovery";

fn build_client(server: &MockServer) -> ReqwestHumanityClient {
	HumanityClient::builder(
		CLIENT_ID,
		Url::parse("https://app.example.com/humanity/callback")
			.expect("Redirect URI should parse successfully."),
	)
	.base_url(Url::parse(&server.base_url()).expect("Mock base URL should parse successfully."))
	.build()
	.expect("Client should build successfully.")
}

fn configuration_body() -> serde_json::Value {
	json!({
		"issuer": "https://id.humanity.example",
		"authorization_endpoint": "https://id.humanity.example/oauth/authorize",
		"token_endpoint": "https://id.humanity.example/oauth/token",
		"revoke_endpoint": "https://id.humanity.example/oauth/revoke",
		"consent_presets_endpoint": "https://id.humanity.example/api/v1/consent/presets",
		"presets_endpoint": "https://id.humanity.example/api/v1/presets",
		"presets_batch_endpoint": "https://id.humanity.example/api/v1/presets/batch",
		"credentials_endpoint": "https://id.humanity.example/api/v1/credentials",
		"authorizations_endpoint": "https://id.humanity.example/api/v1/authorizations",
		"hp_configuration_endpoint": "https://id.humanity.example/.well-known/hp-configuration",
		"scopes_supported": ["openid", "hp:verified.human"],
		"scopes_catalog": [],
		"grant_types_supported": ["authorization_code", "refresh_token"],
		"code_challenge_methods_supported": ["S256"],
		"response_types_supported": ["code"],
		"presets_available": [{
			"name": "is_human",
			"scope": "hp:verified.human",
			"type": "boolean",
			"description": "Confirms the user is a verified human.",
			"consent_text": "Share your humanity verification status.",
		}],
		"rate_limit_default": 120,
		"rate_limit_unit": "minute",
	})
}

#[tokio::test]
async fn configuration_caches_and_remaps_preset_scopes() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/hp-configuration");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(configuration_body());
		})
		.await;
	let configuration = client
		.get_configuration(false)
		.await
		.expect("Discovery fetch should succeed.");

	assert_eq!(configuration.issuer.as_str(), "https://id.humanity.example/");

	client.get_configuration(false).await.expect("Cached fetch should succeed.");

	mock.assert_calls_async(1).await;

	// The ingested catalog redirects both the scope mapping and the
	// authorization endpoint.
	let session = client
		.authorize_url(AuthorizeOptions::new(["isHuman"]))
		.expect("Session should compose successfully.");

	assert!(
		session
			.authorize_url
			.as_str()
			.starts_with("https://id.humanity.example/oauth/authorize?")
	);
	assert!(session.authorize_url.query().is_some_and(|query| query.contains("verified.human")));
}

#[tokio::test]
async fn force_refresh_refetches_and_clearing_restores_conventional_endpoints() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/hp-configuration");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(configuration_body());
		})
		.await;

	client.get_configuration(false).await.expect("Discovery fetch should succeed.");
	client.get_configuration(true).await.expect("Forced fetch should succeed.");

	mock.assert_calls_async(2).await;

	client.clear_configuration_cache();

	let session = client
		.authorize_url(AuthorizeOptions::new(["openid"]))
		.expect("Session should compose successfully.");
	let conventional = format!("{}/oauth/authorize?", server.base_url());

	assert!(session.authorize_url.as_str().starts_with(&conventional));
}

#[tokio::test]
async fn health_probes_share_the_discovery_base() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let liveness = server
		.mock_async(|when, then| {
			when.method(GET).path("/health");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"status": "ok",
				"uptime": 123.45,
				"version": "1.4.2",
				"commit": "abc123",
				"timestamp": "2026-01-01T00:00:00Z",
			}));
		})
		.await;
	let readiness = server
		.mock_async(|when, then| {
			when.method(GET).path("/ready");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"status": "ready",
				"checks": [{ "name": "database", "ok": true }],
			}));
		})
		.await;
	let health = client.healthcheck().await.expect("Liveness probe should succeed.");
	let ready = client.readiness().await.expect("Readiness probe should succeed.");

	liveness.assert_async().await;
	readiness.assert_async().await;

	assert_eq!(health.status, "ok");
	assert_eq!(health.commit.as_deref(), Some("abc123"));
	assert_eq!(ready.checks.len(), 1);
	assert!(ready.checks[0].ok);
}
