//! Demonstrates batch preset verification against a scripted server, splitting
//! verified checks from per-preset failures.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use humanity_sdk::{auth::TokenSecret, client::HumanityClient};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let batch_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/presets/batch");
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"results": [{
						"preset": "is_human",
						"value": true,
						"status": "valid",
						"expires_at": "2027-01-01T00:00:00Z"
					}],
					"errors": [{
						"preset": "is_18_plus",
						"error": {
							"error": "credential_not_found",
							"error_code": "E4042",
							"error_description": "No credential found for preset is_18_plus."
						}
					}]
				}"#,
			);
		})
		.await;
	let client = HumanityClient::builder(
		"demo-client",
		Url::parse("https://app.example.com/humanity/callback")?,
	)
	.base_url(Url::parse(&server.base_url())?)
	.build()?;
	let access_token = TokenSecret::from("demo-access-token");
	let outcome = client.verify_presets(["isHuman", "is18Plus"], &access_token).await?;

	for check in &outcome.results {
		println!("{} is {} until {}.", check.preset, check.value, check.expires_at);
	}
	for failure in &outcome.errors {
		println!("{} failed: {}.", failure.preset, failure.error.error_description);
	}

	batch_mock.assert_async().await;

	Ok(())
}
