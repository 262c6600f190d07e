//! SDK-level error types shared across the client, adapters, and registry.

// self
use crate::_prelude::*;

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical SDK error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller input rejected before any network call.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Non-success response from the Humanity API, normalized.
	#[error("{0}")]
	Api(
		#[from]
		#[source]
		ApiError,
	),

	/// Successful response carried a body that does not match the contract.
	#[error("Humanity API response could not be decoded.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Single-preset verification answered without a usable result.
	#[error("Preset verification failed: {reason}.")]
	PresetVerification {
		/// Joined server-supplied error descriptions, or a generic message.
		reason: String,
	},
}

/// Caller-input failures raised synchronously, before any network call.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// Client id must be non-empty at construction.
	#[error("Client id must not be empty.")]
	MissingClientId,
	/// Challenge derivation requires a non-empty PKCE verifier.
	#[error("Code verifier must not be empty.")]
	EmptyCodeVerifier,
	/// Verifier length fell outside the RFC 7636 range.
	#[error("Code verifier length {length} is outside the 43..=128 range.")]
	CodeVerifierLength {
		/// Requested verifier length.
		length: usize,
	},
	/// Authorization URLs require at least one scope.
	#[error("At least one scope is required.")]
	EmptyScopes,
	/// Refresh was attempted with an empty refresh token.
	#[error("Refresh token must not be empty.")]
	MissingRefreshToken,
	/// Client-user-token issuance requires a client secret.
	#[error("Client secret is required to issue a client user token.")]
	MissingClientSecret,
	/// Client-user-token issuance requires a user identifier.
	#[error("At least one user identifier is required.")]
	MissingUserIdentifier,
	/// Preset verification requires a non-empty access token.
	#[error("Access token must not be empty.")]
	MissingAccessToken,
	/// Single-preset verification requires a preset name.
	#[error("Preset name must not be empty.")]
	EmptyPresetName,
	/// Batch verification requires at least one preset.
	#[error("At least one preset is required.")]
	NoPresets,
	/// Batch verification exceeds the server-side batch cap.
	#[error("Batch of {count} presets exceeds the server limit of 10.")]
	TooManyPresets {
		/// Number of presets requested.
		count: usize,
	},
	/// Poll page size fell outside the accepted range.
	#[error("Limit {limit} is outside the 1..=100 range.")]
	LimitOutOfRange {
		/// Requested page size.
		limit: u32,
	},
}

/// Configuration failures raised while assembling requests.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Named environment has not been registered.
	#[error("Environment `{name}` is not registered.")]
	UnknownEnvironment {
		/// Environment name as supplied by the caller.
		name: String,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Base URL cannot carry additional path segments.
	#[error("Base URL `{url}` cannot be extended with path segments.")]
	OpaqueBaseUrl {
		/// Offending base URL.
		url: Url,
	},
	/// Default header contains an invalid name or value.
	#[error("Default header `{name}` is invalid.")]
	InvalidHeader {
		/// Header name as supplied by the caller.
		name: String,
		/// Underlying header parsing failure.
		#[source]
		source: BoxError,
	},
	/// Access token is not usable as a bearer header value.
	#[error("Access token cannot be encoded as a bearer header value.")]
	InvalidBearerToken {
		/// Underlying header parsing failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodySerialize(#[from] serde_json::Error),
	/// Timestamp could not be rendered for a query parameter.
	#[error("Timestamp could not be formatted as RFC 3339.")]
	TimestampFormat(#[from] time::error::Format),
}
impl ConfigError {
	/// Wraps a header parsing failure inside [`ConfigError`].
	pub fn invalid_header(
		name: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::InvalidHeader { name: name.into(), source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP transport reported a network failure.
	#[error("Network error occurred while calling the Humanity API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Non-success API response normalized into one shape.
///
/// `code` prefers the server's `error_code`, then `error`, then a synthetic
/// `HTTP_<status>`; `message` prefers `error_description`, then `error`, then
/// a generic fallback. The payload parser tolerates a JSON object body, a
/// double-encoded JSON string body, and a non-JSON body.
#[derive(Debug, ThisError)]
#[error("Humanity API returned `{code}` with status {status}: {message}")]
pub struct ApiError {
	/// HTTP status code of the response.
	pub status: u16,
	/// Machine-readable error code.
	pub code: String,
	/// Human-readable message.
	pub message: String,
	/// Finer-grained code, when the server distinguishes one.
	pub subcode: Option<String>,
	/// Structured context attached by the server.
	pub context: Option<JsonMap>,
}
impl ApiError {
	/// Normalizes a non-success response body.
	pub fn from_response(status: u16, body: &[u8]) -> Self {
		let payload = parse_error_payload(body);
		let field = |name: &str| {
			payload
				.as_ref()
				.and_then(|payload| payload.get(name))
				.and_then(JsonValue::as_str)
				.map(str::to_owned)
		};

		Self {
			status,
			code: field("error_code")
				.or_else(|| field("error"))
				.unwrap_or_else(|| format!("HTTP_{status}")),
			message: field("error_description").or_else(|| field("error")).unwrap_or_else(|| {
				format!("Humanity API request failed with status {status}")
			}),
			subcode: field("error_subcode"),
			context: payload
				.as_ref()
				.and_then(|payload| payload.get("context"))
				.and_then(JsonValue::as_object)
				.cloned(),
		}
	}
}

fn parse_error_payload(body: &[u8]) -> Option<JsonMap> {
	match serde_json::from_slice::<JsonValue>(body).ok()? {
		JsonValue::Object(payload) => Some(payload),
		// Some gateways re-encode the upstream JSON body as a string.
		JsonValue::String(inner) => match serde_json::from_str::<JsonValue>(&inner).ok()? {
			JsonValue::Object(payload) => Some(payload),
			_ => None,
		},
		_ => None,
	}
}
