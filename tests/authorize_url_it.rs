#![cfg(feature = "reqwest")]

// std
use std::collections::HashMap;
// crates.io
use url::Url;
// self
use humanity_sdk::{
	client::{AuthorizeOptions, HumanityClient, ReqwestHumanityClient},
	pkce,
};

const CLIENT_ID: &str = "client-authorize";

fn build_client() -> ReqwestHumanityClient {
	HumanityClient::builder(
		CLIENT_ID,
		Url::parse("https://app.example.com/humanity/callback")
			.expect("Redirect URI should parse successfully."),
	)
	.build()
	.expect("Client should build successfully.")
}

fn query_map(url: &Url) -> HashMap<String, String> {
	url.query_pairs().map(|(key, value)| (key.into_owned(), value.into_owned())).collect()
}

#[test]
fn authorize_urls_translate_preset_keys_and_inject_pkce() {
	let client = build_client();
	let session = client
		.authorize_url(AuthorizeOptions::new(["openid", "isHuman"]))
		.expect("Session should compose successfully.");
	let query = query_map(&session.authorize_url);

	assert!(
		session.authorize_url.as_str().starts_with("https://api.humanity.org/oauth/authorize?")
	);
	assert_eq!(query.get("client_id").map(String::as_str), Some(CLIENT_ID));
	assert_eq!(
		query.get("redirect_uri").map(String::as_str),
		Some("https://app.example.com/humanity/callback"),
	);
	assert_eq!(query.get("response_type").map(String::as_str), Some("code"));
	assert_eq!(query.get("scope").map(String::as_str), Some("openid hp:presets.is_human"));
	assert_eq!(query.get("code_challenge_method").map(String::as_str), Some("S256"));
	assert_eq!(
		query.get("code_challenge").cloned(),
		Some(
			pkce::derive_code_challenge(&session.code_verifier)
				.expect("Challenge should derive successfully."),
		),
	);
	assert!(!query.contains_key("state"));
	assert!(!query.contains_key("nonce"));
}

#[test]
fn literal_scopes_lead_and_mapped_scopes_follow() {
	let client = build_client();
	let session = client
		.authorize_url(AuthorizeOptions::new(["isHuman", "isHuman", "openid", "hp:kyc.basic"]))
		.expect("Session should compose successfully.");
	let query = query_map(&session.authorize_url);

	assert_eq!(
		query.get("scope").map(String::as_str),
		Some("openid hp:kyc.basic hp:presets.is_human"),
	);
}

#[test]
fn snake_case_extras_and_supplied_state_survive_composition() {
	let client = build_client();
	let session = client
		.authorize_url(
			AuthorizeOptions::new(["isHuman"])
				.state("st-1729")
				.nonce("n-42")
				.extra_param("maxAge", "3600")
				.extra_param("uiLocale", "en-GB"),
		)
		.expect("Session should compose successfully.");
	let query = query_map(&session.authorize_url);

	assert_eq!(query.get("state").map(String::as_str), Some("st-1729"));
	assert_eq!(query.get("nonce").map(String::as_str), Some("n-42"));
	assert_eq!(query.get("max_age").map(String::as_str), Some("3600"));
	assert_eq!(query.get("ui_locale").map(String::as_str), Some("en-GB"));
}

#[test]
fn supplied_verifiers_pass_through_unchanged() {
	let client = build_client();
	let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
	let session = client
		.authorize_url(AuthorizeOptions::new(["isHuman"]).code_verifier(verifier))
		.expect("Session should compose successfully.");

	assert_eq!(session.code_verifier, verifier);
}
