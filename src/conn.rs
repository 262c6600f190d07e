//! Per-call connection assembly: base URL selection, bearer injection, and
//! default headers.

// crates.io
use http::{HeaderMap, HeaderValue, Method, header};
// self
use crate::{
	_prelude::*, auth::TokenSecret, environment::EnvironmentDescriptor, error::ConfigError,
	http::HttpRequest,
};

/// Builds [`Connection`]s for the different endpoint families of one
/// environment.
///
/// Authenticated API calls go through [`core`](Self::core), OAuth endpoints
/// through [`root`](Self::root), and discovery plus health probes through
/// [`discovery`](Self::discovery) and [`health`](Self::health).
#[derive(Clone, Debug)]
pub struct ConnectionFactory {
	environment: EnvironmentDescriptor,
	default_headers: HeaderMap,
}
impl ConnectionFactory {
	/// Creates a factory for one environment with pre-validated default
	/// headers.
	pub fn new(environment: EnvironmentDescriptor, default_headers: HeaderMap) -> Self {
		Self { environment, default_headers }
	}

	/// Environment the factory serves.
	pub fn environment(&self) -> &EnvironmentDescriptor {
		&self.environment
	}

	/// Connection rooted at `{api}/api/v1` carrying a bearer token.
	pub fn core(&self, access_token: &TokenSecret) -> Result<Connection> {
		let mut base_url = self.environment.api_base_url.clone();

		base_url
			.path_segments_mut()
			.map_err(|()| ConfigError::OpaqueBaseUrl {
				url: self.environment.api_base_url.clone(),
			})?
			.pop_if_empty()
			.extend(["api", "v1"]);

		Ok(Connection::new(base_url, self.bearer_headers(access_token)?))
	}

	/// Unauthenticated connection rooted at the API base URL.
	pub fn root(&self) -> Connection {
		Connection::new(self.environment.api_base_url.clone(), self.default_headers.clone())
	}

	/// Connection rooted at the discovery base URL.
	pub fn discovery(&self) -> Connection {
		Connection::new(self.environment.discovery_base_url.clone(), self.default_headers.clone())
	}

	/// Connection for health probes; same base as discovery.
	pub fn health(&self) -> Connection {
		self.discovery()
	}

	fn bearer_headers(&self, access_token: &TokenSecret) -> Result<HeaderMap> {
		let mut headers = self.default_headers.clone();
		let mut bearer = HeaderValue::from_str(&format!("Bearer {}", access_token.expose()))
			.map_err(|source| ConfigError::InvalidBearerToken { source })?;

		bearer.set_sensitive(true);
		headers.insert(header::AUTHORIZATION, bearer);

		Ok(headers)
	}
}

/// One endpoint family of one environment: a base URL plus the headers every
/// request under it carries.
#[derive(Clone, Debug)]
pub struct Connection {
	base_url: Url,
	headers: HeaderMap,
}
impl Connection {
	fn new(base_url: Url, headers: HeaderMap) -> Self {
		Self { base_url, headers }
	}

	/// Base URL requests are built against.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Joins path segments onto the base URL.
	pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|()| ConfigError::OpaqueBaseUrl { url: self.base_url.clone() })?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}

	/// Builds a GET request for `url` with the connection headers.
	pub fn get(&self, url: Url) -> Result<HttpRequest> {
		self.request(Method::GET, url, None)
	}

	/// Builds a POST request for `url` with a JSON body.
	pub fn post_json(&self, url: Url, body: &impl Serialize) -> Result<HttpRequest> {
		self.request(
			Method::POST,
			url,
			Some(serde_json::to_vec(body).map_err(ConfigError::BodySerialize)?),
		)
	}

	fn request(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<HttpRequest> {
		let has_body = body.is_some();
		let mut request = http::Request::builder()
			.method(method)
			.uri(url.as_str())
			.body(body.unwrap_or_default())
			.map_err(ConfigError::HttpRequest)?;

		*request.headers_mut() = self.headers.clone();

		if has_body {
			request
				.headers_mut()
				.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
		}

		Ok(request)
	}
}
