//! High-level Humanity API client and its per-endpoint operations.

pub mod authorize;
pub mod discovery;
pub mod presets;
pub mod status;
pub mod token;

mod metrics;

pub use authorize::*;
pub use discovery::*;
pub use metrics::CallMetrics;
pub use presets::*;
pub use status::*;
pub use token::*;

// crates.io
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	adapter::{PresetsAdapter, ScopesAdapter, StatusAdapter},
	auth::TokenSecret,
	conn::ConnectionFactory,
	environment::{EnvironmentDescriptor, EnvironmentRegistry},
	error::{ApiError, ConfigError, TransportError, ValidationError},
	http::{HttpRequest, HttpTransport, RateLimitInfo},
	obs::{self, CallKind, CallOutcome, CallSpan},
	preset::registry::PresetRegistry,
};
#[cfg(feature = "reqwest")]
use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestHumanityClient = HumanityClient<ReqwestHttpClient>;

/// Coordinates every Humanity API operation for one application registration.
///
/// The client owns the HTTP transport, the per-environment connection factory,
/// and the preset registry so individual endpoint calls can focus on their own
/// request and response shapes. Clones share the registry, the discovery
/// cache, and the call metrics, so one client can be handed to many tasks.
#[derive(Clone)]
pub struct HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound API request.
	pub transport: Arc<T>,
	/// OAuth 2.0 client identifier sent with every grant.
	pub client_id: String,
	/// Redirect URI registered for the client.
	pub redirect_uri: Url,
	/// Optional client secret for server-issued user tokens.
	pub client_secret: Option<TokenSecret>,
	/// Preset catalog shared with the translation adapters.
	pub registry: Arc<PresetRegistry>,
	/// Shared metrics recorder for API call outcomes.
	pub call_metrics: Arc<CallMetrics>,
	conn: ConnectionFactory,
	scopes: ScopesAdapter,
	presets: PresetsAdapter,
	status: StatusAdapter,
	configuration_ttl: Duration,
	configuration_cache: Arc<Mutex<Option<CachedConfiguration>>>,
}
impl<T> HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Environment the client talks to.
	pub fn environment(&self) -> &EnvironmentDescriptor {
		self.conn.environment()
	}

	/// Adapter translating developer keys to scopes and back.
	pub fn scopes(&self) -> &ScopesAdapter {
		&self.scopes
	}

	pub(crate) fn conn(&self) -> &ConnectionFactory {
		&self.conn
	}

	pub(crate) fn presets_adapter(&self) -> &PresetsAdapter {
		&self.presets
	}

	pub(crate) fn status_adapter(&self) -> &StatusAdapter {
		&self.status
	}

	/// Executes one request, wrapping it with span, metrics, and outcome
	/// bookkeeping, then decodes the success body.
	///
	/// Non-2xx responses are normalized through [`ApiError::from_response`];
	/// rate-limit headers are captured from success and failure alike, though
	/// only success paths can hand them back.
	pub(crate) async fn dispatch<R>(
		&self,
		kind: CallKind,
		request: HttpRequest,
	) -> Result<(R, Option<RateLimitInfo>)>
	where
		R: DeserializeOwned,
	{
		let span = CallSpan::new(kind, request.uri().path());

		obs::record_call_outcome(kind, CallOutcome::Attempt);
		self.call_metrics.record_attempt();

		let result = span
			.instrument(async move {
				let response =
					self.transport.execute(request).await.map_err(TransportError::network)?;
				let status = response.status().as_u16();
				let rate_limit = RateLimitInfo::from_headers(response.headers());
				let body = response.into_body();

				if !(200..300).contains(&status) {
					return Err(ApiError::from_response(status, &body).into());
				}

				let mut deserializer = serde_json::Deserializer::from_slice(&body);
				let decoded = serde_path_to_error::deserialize(&mut deserializer)
					.map_err(|source| Error::Decode { source, status })?;

				Ok((decoded, rate_limit))
			})
			.await;

		match &result {
			Ok(_) => {
				self.call_metrics.record_success();
				obs::record_call_outcome(kind, CallOutcome::Success);
			},
			Err(error) => {
				if matches!(error, Error::Api(api) if api.status == 429) {
					self.call_metrics.record_throttle();
				}

				self.call_metrics.record_failure();
				obs::record_call_outcome(kind, CallOutcome::Failure);
			},
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl HumanityClient<ReqwestHttpClient> {
	/// Creates a builder whose [`build`](HumanityClientBuilder::build)
	/// provisions the crate's default reqwest transport.
	///
	/// Use [`HumanityClientBuilder::new`] directly when bringing a custom
	/// [`HttpTransport`].
	pub fn builder(client_id: impl Into<String>, redirect_uri: Url) -> HumanityClientBuilder {
		HumanityClientBuilder::new(client_id, redirect_uri)
	}
}
impl<T> Debug for HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HumanityClient")
			.field("environment", self.conn.environment())
			.field("client_id", &self.client_id)
			.field("redirect_uri", &self.redirect_uri.as_str())
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}

/// Builder for [`HumanityClient`] values.
#[derive(Debug)]
pub struct HumanityClientBuilder {
	/// OAuth 2.0 client identifier sent with every grant.
	pub client_id: String,
	/// Redirect URI registered for the client.
	pub redirect_uri: Url,
	/// Optional client secret for server-issued user tokens.
	pub client_secret: Option<TokenSecret>,
	/// Named deployment profile to resolve; `None` resolves to production.
	pub environment: Option<String>,
	/// Base URL override that bypasses profile resolution.
	pub base_url: Option<Url>,
	/// Headers attached to every outbound request.
	pub default_headers: Vec<(String, String)>,
	/// Deployment profiles available for resolution.
	pub environments: EnvironmentRegistry,
	/// How long a fetched discovery document stays fresh.
	pub configuration_ttl: Duration,
}
impl HumanityClientBuilder {
	/// Creates a builder seeded with the client identifier and redirect URI.
	pub fn new(client_id: impl Into<String>, redirect_uri: Url) -> Self {
		Self {
			client_id: client_id.into(),
			redirect_uri,
			client_secret: None,
			environment: None,
			base_url: None,
			default_headers: Vec::new(),
			environments: EnvironmentRegistry::new(),
			configuration_ttl: DEFAULT_CONFIGURATION_TTL,
		}
	}

	/// Selects a named deployment profile.
	pub fn environment(mut self, name: impl Into<String>) -> Self {
		self.environment = Some(name.into());

		self
	}

	/// Points every connection at one base URL, bypassing profile resolution.
	///
	/// The profile name becomes the one set through
	/// [`environment`](Self::environment), or `custom` when none was set.
	pub fn base_url(mut self, base_url: Url) -> Self {
		self.base_url = Some(base_url);

		self
	}

	/// Sets the client secret used for server-issued user tokens.
	pub fn client_secret(mut self, secret: impl Into<TokenSecret>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Attaches a header to every outbound request.
	pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.default_headers.push((name.into(), value.into()));

		self
	}

	/// Replaces the deployment profile registry.
	pub fn environments(mut self, environments: EnvironmentRegistry) -> Self {
		self.environments = environments;

		self
	}

	/// Overrides how long a fetched discovery document stays fresh.
	pub fn configuration_ttl(mut self, ttl: Duration) -> Self {
		self.configuration_ttl = ttl;

		self
	}

	/// Consumes the builder and provisions the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<ReqwestHumanityClient> {
		self.build_with_transport(ReqwestHttpClient::default())
	}

	/// Consumes the builder and validates a client around a caller-provided
	/// transport.
	pub fn build_with_transport<T>(self, transport: impl Into<Arc<T>>) -> Result<HumanityClient<T>>
	where
		T: ?Sized + HttpTransport,
	{
		if self.client_id.trim().is_empty() {
			return Err(ValidationError::MissingClientId.into());
		}

		let environment = match self.base_url {
			Some(base_url) => EnvironmentDescriptor::new(
				self.environment.as_deref().unwrap_or("custom"),
				base_url,
			),
			None => self.environments.resolve(self.environment.as_deref())?.clone(),
		};
		let mut headers = HeaderMap::new();

		for (name, value) in &self.default_headers {
			headers.insert(
				HeaderName::try_from(name.as_str())
					.map_err(|source| ConfigError::invalid_header(name, source))?,
				HeaderValue::from_str(value)
					.map_err(|source| ConfigError::invalid_header(name, source))?,
			);
		}

		let registry = Arc::new(PresetRegistry::default());

		Ok(HumanityClient {
			transport: transport.into(),
			client_id: self.client_id,
			redirect_uri: self.redirect_uri,
			client_secret: self.client_secret,
			scopes: ScopesAdapter::new(registry.clone()),
			presets: PresetsAdapter::new(registry.clone()),
			status: StatusAdapter::new(registry.clone()),
			registry,
			call_metrics: Default::default(),
			conn: ConnectionFactory::new(environment, headers),
			configuration_ttl: self.configuration_ttl,
			configuration_cache: Default::default(),
		})
	}
}
