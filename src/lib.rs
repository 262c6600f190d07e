//! Rust SDK for the Humanity Protocol API - OAuth 2.0 + PKCE authorization, preset verification,
//! status polling, and discovery-aware scope mapping in one client built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapter;
pub mod auth;
pub mod client;
pub mod conn;
pub mod environment;
pub mod error;
pub mod http;
pub mod obs;
pub mod pkce;
pub mod preset;
pub mod wire;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	// std
	use std::collections::VecDeque;
	// self
	pub use crate::_prelude::*;
	#[cfg(feature = "reqwest")]
	use crate::http::ReqwestHttpClient;
	use crate::http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture};

	/// Error surfaced by [`FakeTransport`] once its scripted responses run out.
	#[derive(Debug, ThisError)]
	#[error("No scripted response is queued for this request.")]
	pub struct ExhaustedTransport;

	/// Scripted in-process transport for exercising call plumbing without sockets.
	///
	/// Responses are served in FIFO order; executed requests are recorded so tests can assert on
	/// methods, URLs, headers, and bodies after the fact.
	#[derive(Debug, Default)]
	pub struct FakeTransport {
		responses: Mutex<VecDeque<HttpResponse>>,
		requests: Mutex<Vec<HttpRequest>>,
	}
	impl FakeTransport {
		/// Queues a JSON response with the given status.
		pub fn push_json(&self, status: u16, body: &str) {
			self.push_json_with_headers(status, body, &[]);
		}

		/// Queues a JSON response carrying extra response headers.
		pub fn push_json_with_headers(&self, status: u16, body: &str, headers: &[(&str, &str)]) {
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = http::StatusCode::from_u16(status)
				.expect("Failed to build status code for scripted response.");

			for (name, value) in headers {
				response.headers_mut().insert(
					http::HeaderName::try_from(*name)
						.expect("Failed to build header name for scripted response."),
					http::HeaderValue::from_str(value)
						.expect("Failed to build header value for scripted response."),
				);
			}

			self.responses.lock().push_back(response);
		}

		/// Number of requests executed so far.
		pub fn request_count(&self) -> usize {
			self.requests.lock().len()
		}

		/// Drains the recorded requests, in execution order.
		pub fn take_requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().drain(..).collect()
		}
	}
	impl HttpTransport for FakeTransport {
		type TransportError = ExhaustedTransport;

		fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
			self.requests.lock().push(request);

			let response = self.responses.lock().pop_front();

			Box::pin(async move { response.ok_or(ExhaustedTransport) })
		}
	}

	#[cfg(feature = "reqwest")]
	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap, HashSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};

	/// JSON object map keyed by strings, as produced by `serde_json`.
	pub type JsonMap = serde_json::Map<String, JsonValue>;
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
