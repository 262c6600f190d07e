//! Discovery document fetching, caching, and endpoint resolution.

// self
use crate::{
	_prelude::*,
	client::HumanityClient,
	http::HttpTransport,
	obs::CallKind,
	wire::{DiscoveryConfiguration, LivenessResponse, ReadinessResponse},
};

/// How long a fetched discovery document stays fresh unless overridden through
/// [`configuration_ttl`](crate::client::HumanityClientBuilder::configuration_ttl).
pub const DEFAULT_CONFIGURATION_TTL: Duration = Duration::minutes(60);

/// Resolved OAuth endpoint set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OauthEndpoints {
	/// Authorization endpoint the user is redirected to.
	pub authorize: Url,
	/// Token endpoint for exchanges and refreshes.
	pub token: Url,
	/// Revocation endpoint.
	pub revoke: Url,
}

/// Discovery document retained between calls, with its fetch instant.
#[derive(Clone, Debug)]
pub(crate) struct CachedConfiguration {
	pub(crate) configuration: Arc<DiscoveryConfiguration>,
	pub(crate) fetched_at: OffsetDateTime,
}

impl<T> HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Returns the discovery document, fetching it when the cache is stale.
	///
	/// A cached document younger than the configured TTL is returned as-is
	/// unless `force_refresh` is set. A fetched document replaces the cache
	/// and feeds the preset registry, so scope lookups reflect the live
	/// catalog afterwards. Concurrent refreshes race and the last write wins.
	pub async fn get_configuration(
		&self,
		force_refresh: bool,
	) -> Result<Arc<DiscoveryConfiguration>> {
		let cached = if force_refresh { None } else { self.fresh_configuration() };

		if let Some(configuration) = cached {
			return Ok(configuration);
		}

		let connection = self.conn().discovery();
		let request = connection.get(connection.endpoint(&[".well-known", "hp-configuration"])?)?;
		let (configuration, _) =
			self.dispatch::<DiscoveryConfiguration>(CallKind::Discovery, request).await?;
		let configuration = Arc::new(configuration);

		*self.configuration_cache.lock() = Some(CachedConfiguration {
			configuration: configuration.clone(),
			fetched_at: OffsetDateTime::now_utc(),
		});
		self.scopes().ingest_configuration(&configuration);

		Ok(configuration)
	}

	/// Drops the cached discovery document and its timestamp.
	pub fn clear_configuration_cache(&self) {
		*self.configuration_cache.lock() = None;
	}

	/// Resolves the OAuth endpoint set.
	///
	/// A cached discovery document wins regardless of its age; without one,
	/// the conventional `/oauth/*` paths under the API base URL apply.
	pub fn oauth_endpoints(&self) -> Result<OauthEndpoints> {
		let cached =
			self.configuration_cache.lock().as_ref().map(|cached| cached.configuration.clone());

		if let Some(configuration) = cached {
			return Ok(OauthEndpoints {
				authorize: configuration.authorization_endpoint.clone(),
				token: configuration.token_endpoint.clone(),
				revoke: configuration.revoke_endpoint.clone(),
			});
		}

		let root = self.conn().root();

		Ok(OauthEndpoints {
			authorize: root.endpoint(&["oauth", "authorize"])?,
			token: root.endpoint(&["oauth", "token"])?,
			revoke: root.endpoint(&["oauth", "revoke"])?,
		})
	}

	/// Liveness probe against the health base URL.
	pub async fn healthcheck(&self) -> Result<LivenessResponse> {
		let connection = self.conn().health();
		let request = connection.get(connection.endpoint(&["health"])?)?;

		Ok(self.dispatch(CallKind::Healthcheck, request).await?.0)
	}

	/// Readiness probe against the health base URL.
	pub async fn readiness(&self) -> Result<ReadinessResponse> {
		let connection = self.conn().health();
		let request = connection.get(connection.endpoint(&["ready"])?)?;

		Ok(self.dispatch(CallKind::Readiness, request).await?.0)
	}

	fn fresh_configuration(&self) -> Option<Arc<DiscoveryConfiguration>> {
		let cache = self.configuration_cache.lock();
		let cached = cache.as_ref()?;

		if OffsetDateTime::now_utc() - cached.fetched_at < self.configuration_ttl {
			Some(cached.configuration.clone())
		} else {
			None
		}
	}
}
