//! Normalized grant records handed back to SDK callers.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	http::RateLimitInfo,
	wire::{ClientUserTokenResponse, RevokedTokenDetail, TokenResponse},
};

/// Normalized outcome of a code exchange or refresh.
///
/// Wire fields are lifted to the top level with scopes split into tokens and
/// re-expressed as developer keys; the untouched response stays in [`raw`].
///
/// [`raw`]: Self::raw
#[derive(Clone, Debug)]
pub struct TokenGrant {
	/// Issued access token.
	pub access_token: TokenSecret,
	/// Token type, `Bearer` in practice.
	pub token_type: String,
	/// Access token lifetime in seconds.
	pub expires_in: u64,
	/// Space-joined scope string echoed by the server.
	pub scope: String,
	/// Granted scopes as individual tokens.
	pub granted_scopes: Vec<String>,
	/// Granted scopes re-expressed as camelCase developer keys.
	pub preset_keys: Vec<String>,
	/// Authorization record backing the token.
	pub authorization_id: String,
	/// User identifier scoped to the requesting application.
	pub app_scoped_user_id: String,
	/// Access token issue instant.
	pub issued_at: Option<OffsetDateTime>,
	/// Refresh token, when the grant produced one.
	pub refresh_token: Option<TokenSecret>,
	/// Refresh token lifetime in seconds.
	pub refresh_token_expires_in: Option<u64>,
	/// Refresh token issue instant.
	pub refresh_issued_at: Option<OffsetDateTime>,
	/// OpenID Connect ID token, when `openid` was granted.
	pub id_token: Option<String>,
	/// Untranslated response body.
	pub raw: TokenResponse,
	/// Rate limit headers captured from the response.
	pub rate_limit: Option<RateLimitInfo>,
}

/// Normalized outcome of a server-to-server user token issuance.
#[derive(Clone, Debug)]
pub struct ClientUserTokenGrant {
	/// Issued access token.
	pub access_token: TokenSecret,
	/// Token type, `Bearer` in practice.
	pub token_type: String,
	/// Token lifetime in seconds.
	pub expires_in: u64,
	/// Issue instant.
	pub issued_at: OffsetDateTime,
	/// User the token was issued for.
	pub user_id: String,
	/// Client the token was issued to.
	pub client_id: String,
	/// Authorization backing the token.
	pub authorization_id: String,
	/// Scopes granted to the token.
	pub scopes: Vec<String>,
	/// Untranslated response body.
	pub raw: ClientUserTokenResponse,
	/// Rate limit headers captured from the response.
	pub rate_limit: Option<RateLimitInfo>,
}

/// Revocation outcome.
#[derive(Clone, Debug)]
pub struct RevokeOutcome {
	/// Whether anything was revoked.
	pub revoked: bool,
	/// Number of revoked entries.
	pub revoked_count: u64,
	/// Per-entry outcomes, when the server reports them.
	pub details: Option<Vec<RevokedTokenDetail>>,
	/// Rate limit headers captured from the response.
	pub rate_limit: Option<RateLimitInfo>,
}
