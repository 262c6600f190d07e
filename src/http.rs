//! Transport primitives for Humanity API calls.
//!
//! The module exposes [`HttpTransport`] alongside [`RateLimitInfo`] so
//! downstream crates can integrate custom HTTP clients without losing the
//! SDK's rate-limit bookkeeping. Transports execute plain [`http`] requests
//! and hand back owned responses; everything above this layer is
//! transport-agnostic.

// std
use std::ops::Deref;
// crates.io
use http::HeaderMap;
// self
use crate::_prelude::*;

/// `x-ratelimit-limit` response header.
pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
/// `x-ratelimit-remaining` response header.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// `x-ratelimit-reset` response header.
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Owned request handed to a transport.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Owned response handed back by a transport.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing Humanity API calls.
///
/// The trait acts as the client's only dependency on an HTTP stack. Callers
/// provide an implementation (typically behind `Arc<T>` where
/// `T: HttpTransport`) at construction time and every endpoint call funnels
/// through [`execute`](Self::execute). Implementations must be
/// `Send + Sync + 'static` so one client can be shared across tasks, and the
/// returned futures must be `Send` so callers can box them freely.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes one request and resolves to the complete response.
	///
	/// Implementations must buffer the body; the client decodes it after
	/// inspecting the status and rate-limit headers. Non-2xx statuses are
	/// regular responses here, never transport errors.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Rate-limit snapshot captured from `x-ratelimit-*` response headers.
///
/// Additional fields may be added in future releases, so downstream code
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
	/// Requests allowed within the current window.
	pub limit: Option<u64>,
	/// Requests remaining within the current window.
	pub remaining: Option<u64>,
	/// Instant the window resets, in epoch seconds.
	pub reset: Option<u64>,
}
impl RateLimitInfo {
	/// Extracts a snapshot from response headers.
	///
	/// Returns `None` when none of the three headers is present. Each header
	/// parses with leading-integer semantics, so `120;window=60` yields `120`
	/// and a non-numeric value leaves its field unset.
	pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
		if !headers.contains_key(RATE_LIMIT_LIMIT)
			&& !headers.contains_key(RATE_LIMIT_REMAINING)
			&& !headers.contains_key(RATE_LIMIT_RESET)
		{
			return None;
		}

		Some(Self {
			limit: parse_leading_integer(headers, RATE_LIMIT_LIMIT),
			remaining: parse_leading_integer(headers, RATE_LIMIT_REMAINING),
			reset: parse_leading_integer(headers, RATE_LIMIT_RESET),
		})
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. The default client follows reqwest's defaults; pass a preconfigured
/// [`ReqwestClient`] through [`with_client`](Self::with_client) to control
/// timeouts, proxies, or TLS settings.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

fn parse_leading_integer(headers: &HeaderMap, name: &str) -> Option<u64> {
	let raw = headers.get(name)?.to_str().ok()?.trim();
	let digits = &raw[..raw.bytes().take_while(u8::is_ascii_digit).count()];

	digits.parse().ok()
}
