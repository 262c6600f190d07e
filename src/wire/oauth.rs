//! Token, revocation, and client-user-token wire contracts.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Grant type carried in a token request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantKind {
	/// Authorization-code exchange (PKCE).
	AuthorizationCode,
	/// Refresh-token rotation.
	RefreshToken,
}

/// JSON body POSTed to the token endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenRequest {
	/// Grant being exercised.
	pub grant_type: GrantKind,
	/// Authorization code, for the authorization-code grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// PKCE verifier matching the challenge sent on the authorize URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code_verifier: Option<String>,
	/// Redirect URI the authorization code was issued against.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<Url>,
	/// Refresh token, for the refresh-token grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Space-joined scope narrowing request.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// OAuth client identifier.
	pub client_id: String,
}
impl TokenRequest {
	/// Builds an authorization-code exchange body.
	pub fn authorization_code(
		code: impl Into<String>,
		code_verifier: impl Into<String>,
		redirect_uri: Url,
		client_id: impl Into<String>,
	) -> Self {
		Self {
			grant_type: GrantKind::AuthorizationCode,
			code: Some(code.into()),
			code_verifier: Some(code_verifier.into()),
			redirect_uri: Some(redirect_uri),
			refresh_token: None,
			scope: None,
			client_id: client_id.into(),
		}
	}

	/// Builds a refresh-token rotation body.
	pub fn refresh(refresh_token: impl Into<TokenSecret>, client_id: impl Into<String>) -> Self {
		Self {
			grant_type: GrantKind::RefreshToken,
			code: None,
			code_verifier: None,
			redirect_uri: None,
			refresh_token: Some(refresh_token.into()),
			scope: None,
			client_id: client_id.into(),
		}
	}

	/// Attaches a space-joined scope narrowing request.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}
}

/// Granted-scopes field that tolerates both wire encodings.
///
/// The contract declares a string list, but deployments have answered with a
/// single space-joined string; both decode here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GrantedScopes {
	/// Scope list form.
	List(Vec<String>),
	/// Space-joined string form.
	Joined(String),
}
impl GrantedScopes {
	/// Individual scope tokens in wire order; the joined form splits on
	/// whitespace.
	pub fn to_vec(&self) -> Vec<String> {
		match self {
			Self::List(scopes) => scopes.clone(),
			Self::Joined(joined) => joined.split_whitespace().map(str::to_owned).collect(),
		}
	}

	/// Returns `true` when no scope tokens are present.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::List(scopes) => scopes.is_empty(),
			Self::Joined(joined) => joined.trim().is_empty(),
		}
	}
}
impl Default for GrantedScopes {
	fn default() -> Self {
		Self::List(Vec::new())
	}
}
impl From<Vec<String>> for GrantedScopes {
	fn from(scopes: Vec<String>) -> Self {
		Self::List(scopes)
	}
}

/// Successful token endpoint response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Issued access token.
	pub access_token: TokenSecret,
	/// Token type, `Bearer` in practice.
	pub token_type: String,
	/// Access token lifetime in seconds.
	pub expires_in: u64,
	/// Space-joined scope string echoed by the server.
	pub scope: String,
	/// Scopes actually granted.
	#[serde(default)]
	pub granted_scopes: GrantedScopes,
	/// Authorization record backing the token.
	pub authorization_id: String,
	/// User identifier scoped to the requesting application.
	pub app_scoped_user_id: String,
	/// Access token issue instant.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub issued_at: Option<OffsetDateTime>,
	/// Refresh token, when the grant produced one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Refresh token lifetime in seconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token_expires_in: Option<u64>,
	/// Refresh token issue instant.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub refresh_issued_at: Option<OffsetDateTime>,
	/// OpenID Connect ID token, when `openid` was granted.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
}

/// Hint narrowing what a revocation request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
	/// Revoke an access token.
	AccessToken,
	/// Revoke a refresh token.
	RefreshToken,
	/// Revoke an entire authorization.
	Authorization,
}

/// Caller-facing revocation parameters, sans the SDK-managed client id.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RevokeRequest {
	/// Single token to revoke.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<TokenSecret>,
	/// Several tokens to revoke in one call.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tokens: Option<Vec<TokenSecret>>,
	/// Hint narrowing the token type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token_type_hint: Option<TokenTypeHint>,
	/// Authorization to revoke wholesale.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authorization_id: Option<String>,
	/// Cascade the revocation to derived tokens; omitted when unset so the
	/// server default applies.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cascade: Option<bool>,
}
impl RevokeRequest {
	/// Empty request; combine with the `with_*` setters.
	pub fn new() -> Self {
		Self::default()
	}

	/// Targets a single token.
	pub fn with_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Targets several tokens at once.
	pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<TokenSecret>,
	{
		self.tokens = Some(tokens.into_iter().map(Into::into).collect());

		self
	}

	/// Narrows the token type.
	pub fn with_token_type_hint(mut self, hint: TokenTypeHint) -> Self {
		self.token_type_hint = Some(hint);

		self
	}

	/// Targets an authorization record.
	pub fn with_authorization_id(mut self, authorization_id: impl Into<String>) -> Self {
		self.authorization_id = Some(authorization_id.into());

		self
	}

	/// Sets the cascade flag explicitly.
	pub fn with_cascade(mut self, cascade: bool) -> Self {
		self.cascade = Some(cascade);

		self
	}
}

/// Full revocation body POSTed to the revoke endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevokeBody {
	/// OAuth client identifier.
	pub client_id: String,
	/// Caller-supplied revocation parameters.
	#[serde(flatten)]
	pub request: RevokeRequest,
}

/// Revocation outcome for one targeted token or authorization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevokedTokenDetail {
	/// What the entry refers to.
	pub subject: RevokedSubject,
	/// Token type, when the subject is a token.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token_type: Option<RevokedTokenType>,
	/// Authorization the entry belongs to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authorization_id: Option<String>,
	/// Client the entry belongs to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// User the entry belongs to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// Per-entry revocation status.
	pub status: RevocationStatus,
	/// Server-supplied explanation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
}

/// Subject of a revocation detail entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokedSubject {
	/// A single token.
	Token,
	/// An authorization record.
	Authorization,
}

/// Token type named by a revocation detail entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokedTokenType {
	/// Access token.
	AccessToken,
	/// Refresh token.
	RefreshToken,
}

/// Per-entry revocation status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationStatus {
	/// The target was revoked.
	Revoked,
	/// The target was not found.
	NotFound,
	/// The target was not a revocable subject.
	Invalid,
}

/// Revoke endpoint response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevokeResponse {
	/// Whether anything was revoked.
	pub revoked: bool,
	/// Number of revoked entries.
	pub revoked_count: u64,
	/// Per-entry outcomes, when the server reports them.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Vec<RevokedTokenDetail>>,
}

/// JSON body POSTed to the client-user-token endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClientUserTokenRequest {
	/// OAuth client identifier.
	pub client_id: String,
	/// Client secret authenticating the server-to-server call.
	pub client_secret: TokenSecret,
	/// Compound `type|value` identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub identifier: Option<String>,
	/// Direct user id lookup.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// User email lookup.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// User EVM wallet address lookup.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub evm_address: Option<String>,
}

/// Client-user-token endpoint response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientUserTokenResponse {
	/// Issued access token.
	pub access_token: TokenSecret,
	/// Token type, `Bearer` in practice.
	pub token_type: String,
	/// Token lifetime in seconds.
	pub expires_in: u64,
	/// Issue instant.
	#[serde(with = "time::serde::rfc3339")]
	pub issued_at: OffsetDateTime,
	/// User the token was issued for.
	pub user_id: String,
	/// Client the token was issued to.
	pub client_id: String,
	/// Authorization backing the token.
	pub authorization_id: String,
	/// Scopes granted to the token.
	pub scopes: Vec<String>,
}
