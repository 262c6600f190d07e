//! Webhook-free status polling for credential and authorization changes.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	adapter::{AuthorizationUpdates, CredentialUpdates},
	auth::TokenSecret,
	client::HumanityClient,
	error::{ConfigError, ValidationError},
	http::HttpTransport,
	obs::CallKind,
	wire::{AuthorizationStatus, AuthorizationsResponse, CredentialsResponse},
};

/// Largest page size the polling endpoints accept.
pub const MAX_POLL_LIMIT: u32 = 100;

/// Change watermark for incremental polls.
///
/// Callers who persist the server-reported `last_modified` instant feed it
/// back as [`Instant`]; callers holding a pre-rendered timestamp string pass
/// it through as [`Iso`].
///
/// [`Instant`]: Self::Instant
/// [`Iso`]: Self::Iso
#[derive(Clone, Debug, PartialEq)]
pub enum PollWatermark {
	/// Pre-rendered RFC 3339 timestamp, sent verbatim.
	Iso(String),
	/// Instant rendered to RFC 3339 at request time.
	Instant(OffsetDateTime),
}
impl PollWatermark {
	fn render(&self) -> Result<String> {
		match self {
			Self::Iso(value) => Ok(value.clone()),
			Self::Instant(instant) =>
				Ok(instant.format(&Rfc3339).map_err(ConfigError::TimestampFormat)?),
		}
	}
}
impl From<OffsetDateTime> for PollWatermark {
	fn from(instant: OffsetDateTime) -> Self {
		Self::Instant(instant)
	}
}
impl From<String> for PollWatermark {
	fn from(value: String) -> Self {
		Self::Iso(value)
	}
}
impl From<&str> for PollWatermark {
	fn from(value: &str) -> Self {
		Self::Iso(value.into())
	}
}

/// Options accepted by [`poll_credential_updates`](HumanityClient::poll_credential_updates).
#[derive(Clone, Debug, Default)]
pub struct CredentialPollOptions {
	/// Only report changes after this watermark.
	pub updated_since: Option<PollWatermark>,
	/// Page size, `1..=100`.
	pub limit: Option<u32>,
}
impl CredentialPollOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the change watermark.
	pub fn updated_since(mut self, watermark: impl Into<PollWatermark>) -> Self {
		self.updated_since = Some(watermark.into());

		self
	}

	/// Sets the page size.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}
}

/// Options accepted by [`poll_authorization_updates`](HumanityClient::poll_authorization_updates).
#[derive(Clone, Debug, Default)]
pub struct AuthorizationPollOptions {
	/// Only report changes after this watermark.
	pub updated_since: Option<PollWatermark>,
	/// Page size, `1..=100`.
	pub limit: Option<u32>,
	/// Lifecycle state to report; `revoked` when unset.
	pub status: Option<AuthorizationStatus>,
}
impl AuthorizationPollOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the change watermark.
	pub fn updated_since(mut self, watermark: impl Into<PollWatermark>) -> Self {
		self.updated_since = Some(watermark.into());

		self
	}

	/// Sets the page size.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Sets the lifecycle state to report.
	pub fn status(mut self, status: AuthorizationStatus) -> Self {
		self.status = Some(status);

		self
	}
}

impl<T> HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Polls for credential changes since a watermark.
	pub async fn poll_credential_updates(
		&self,
		access_token: &TokenSecret,
		options: CredentialPollOptions,
	) -> Result<CredentialUpdates> {
		validate_limit(options.limit)?;

		let connection = self.conn().core(access_token)?;
		let mut url = connection.endpoint(&["credentials"])?;

		{
			let mut pairs = url.query_pairs_mut();

			if let Some(watermark) = &options.updated_since {
				pairs.append_pair("updated_since", &watermark.render()?);
			}
			if let Some(limit) = options.limit {
				pairs.append_pair("limit", &limit.to_string());
			}
		}

		let request = connection.get(url)?;
		let (response, rate_limit) =
			self.dispatch::<CredentialsResponse>(CallKind::PollCredentials, request).await?;

		Ok(self.status_adapter().from_credentials_response(response, rate_limit))
	}

	/// Polls for authorization lifecycle changes since a watermark.
	///
	/// Reports revocations unless the options name another state.
	pub async fn poll_authorization_updates(
		&self,
		access_token: &TokenSecret,
		options: AuthorizationPollOptions,
	) -> Result<AuthorizationUpdates> {
		validate_limit(options.limit)?;

		let connection = self.conn().core(access_token)?;
		let mut url = connection.endpoint(&["authorizations"])?;

		{
			let mut pairs = url.query_pairs_mut();

			if let Some(watermark) = &options.updated_since {
				pairs.append_pair("updated_since", &watermark.render()?);
			}
			if let Some(limit) = options.limit {
				pairs.append_pair("limit", &limit.to_string());
			}

			pairs.append_pair(
				"status",
				options.status.unwrap_or(AuthorizationStatus::Revoked).as_str(),
			);
		}

		let request = connection.get(url)?;
		let (response, rate_limit) =
			self.dispatch::<AuthorizationsResponse>(CallKind::PollAuthorizations, request).await?;

		Ok(self.status_adapter().from_authorizations_response(response, rate_limit))
	}
}

fn validate_limit(limit: Option<u32>) -> Result<()> {
	if let Some(limit) = limit
		&& !(1..=MAX_POLL_LIMIT).contains(&limit)
	{
		return Err(ValidationError::LimitOutOfRange { limit }.into());
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// crates.io
	use serde_json::json;
	use time::macros::datetime;
	// self
	use super::*;
	use crate::client::tests::test_client;

	fn access_token() -> TokenSecret {
		TokenSecret::from("hp_at_1")
	}

	fn query_map(request: &crate::http::HttpRequest) -> HashMap<String, String> {
		Url::parse(&request.uri().to_string())
			.expect("Request URI should parse successfully.")
			.query_pairs()
			.map(|(key, value)| (key.into_owned(), value.into_owned()))
			.collect()
	}

	#[tokio::test]
	async fn credential_polls_render_watermarks_and_map_records() {
		let client = test_client();

		client.transport.push_json(
			200,
			&json!({
				"items": [{
					"user_id": "asu_1",
					"preset": "is_human",
					"value": true,
					"status": "valid",
					"expires_at": "2026-06-01T00:00:00Z",
					"updated_at": "2026-02-01T00:00:00Z",
				}],
				"last_modified": "2026-02-01T00:00:00Z",
				"has_more": true,
			})
			.to_string(),
		);

		let updates = client
			.poll_credential_updates(
				&access_token(),
				CredentialPollOptions::new()
					.updated_since(datetime!(2026-01-01 00:00:00 UTC))
					.limit(25),
			)
			.await
			.expect("Poll should succeed.");
		let requests = client.transport.take_requests();
		let query = query_map(&requests[0]);

		assert_eq!(requests[0].uri().path(), "/api/v1/credentials");
		assert_eq!(query.get("updated_since").map(String::as_str), Some("2026-01-01T00:00:00Z"));
		assert_eq!(query.get("limit").map(String::as_str), Some("25"));
		assert!(!query.contains_key("status"));
		assert!(updates.has_more);
		assert_eq!(updates.last_modified, Some(datetime!(2026-02-01 00:00:00 UTC)));
		assert_eq!(updates.credentials[0].preset, "isHuman");
	}

	#[tokio::test]
	async fn authorization_polls_default_to_revocations() {
		let client = test_client();

		client.transport.push_json(200, r#"{"items":[]}"#);
		client.transport.push_json(200, r#"{"items":[]}"#);

		client
			.poll_authorization_updates(&access_token(), AuthorizationPollOptions::new())
			.await
			.expect("Poll should succeed.");
		client
			.poll_authorization_updates(
				&access_token(),
				AuthorizationPollOptions::new()
					.status(AuthorizationStatus::Active)
					.updated_since("2026-01-01T00:00:00Z"),
			)
			.await
			.expect("Poll should succeed.");

		let requests = client.transport.take_requests();
		let defaulted = query_map(&requests[0]);
		let explicit = query_map(&requests[1]);

		assert_eq!(requests[0].uri().path(), "/api/v1/authorizations");
		assert_eq!(defaulted.get("status").map(String::as_str), Some("revoked"));
		assert!(!defaulted.contains_key("updated_since"));
		assert_eq!(explicit.get("status").map(String::as_str), Some("active"));
		assert_eq!(
			explicit.get("updated_since").map(String::as_str),
			Some("2026-01-01T00:00:00Z"),
		);
	}

	#[tokio::test]
	async fn out_of_range_limits_fail_before_any_network_call() {
		let client = test_client();

		assert!(matches!(
			client
				.poll_credential_updates(&access_token(), CredentialPollOptions::new().limit(0))
				.await,
			Err(Error::Validation(ValidationError::LimitOutOfRange { limit: 0 })),
		));
		assert!(matches!(
			client
				.poll_authorization_updates(
					&access_token(),
					AuthorizationPollOptions::new().limit(101),
				)
				.await,
			Err(Error::Validation(ValidationError::LimitOutOfRange { limit: 101 })),
		));
		assert_eq!(client.transport.request_count(), 0);
	}

	#[test]
	fn watermarks_convert_from_instants_and_strings() {
		assert_eq!(
			PollWatermark::from(datetime!(2026-01-01 00:00:00 UTC))
				.render()
				.expect("Instant should render successfully."),
			"2026-01-01T00:00:00Z",
		);
		assert_eq!(
			PollWatermark::from("2026-01-01T00:00:00+02:00")
				.render()
				.expect("String should pass through."),
			"2026-01-01T00:00:00+02:00",
		);
	}
}
