//! Token lifecycle operations: exchange, refresh, issuance, and revocation.

// self
use crate::{
	_prelude::*,
	auth::{ClientUserTokenGrant, RevokeOutcome, TokenGrant, TokenSecret},
	client::HumanityClient,
	error::ValidationError,
	http::{HttpTransport, RateLimitInfo},
	obs::CallKind,
	wire::{
		ClientUserTokenRequest, ClientUserTokenResponse, RevokeBody, RevokeRequest, RevokeResponse,
		TokenRequest, TokenResponse,
	},
};

/// Identifier namespaces accepted by the client-user-token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
	/// Canonical user id.
	Id,
	/// Alias for the canonical user id.
	User,
	/// Explicit `user_id` namespace.
	UserId,
	/// Email address.
	Email,
	/// EVM wallet address.
	Evm,
	/// Alias for the EVM wallet address.
	EvmAddr,
	/// Wallet address.
	Wallet,
}
impl IdentifierKind {
	/// Wire representation.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Id => "id",
			Self::User => "user",
			Self::UserId => "user_id",
			Self::Email => "email",
			Self::Evm => "evm",
			Self::EvmAddr => "evm_addr",
			Self::Wallet => "wallet",
		}
	}
}
impl Display for IdentifierKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Compound `type|value` user identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserIdentifier {
	/// Identifier namespace.
	pub kind: IdentifierKind,
	/// Identifier value within that namespace.
	pub value: String,
}
impl UserIdentifier {
	/// Creates an identifier.
	pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
		Self { kind, value: value.into() }
	}
}
impl Display for UserIdentifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}|{}", self.kind, self.value)
	}
}

/// Options accepted by [`refresh_access_token`](HumanityClient::refresh_access_token).
#[derive(Clone, Debug, Default)]
pub struct RefreshOptions {
	/// Space-joined scope narrowing for the refreshed token; scopes pass to
	/// the server verbatim, without developer-key translation.
	pub scope: Option<String>,
	/// Client id override for tokens issued to a different registration.
	pub client_id: Option<String>,
}
impl RefreshOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the scope as one pre-joined string.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Sets the scope from individual tokens; an empty iterator leaves it
	/// unset.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let joined = scopes.into_iter().map(Into::into).collect::<Vec<_>>().join(" ");

		self.scope = if joined.is_empty() { None } else { Some(joined) };

		self
	}

	/// Overrides the client id for this refresh.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}
}

/// Options accepted by [`client_user_token`](HumanityClient::client_user_token).
///
/// At least one of the lookup fields must be set.
#[derive(Clone, Debug, Default)]
pub struct ClientUserTokenOptions {
	/// Client secret override; the builder-configured secret applies when
	/// unset.
	pub client_secret: Option<TokenSecret>,
	/// Compound identifier lookup.
	pub identifier: Option<UserIdentifier>,
	/// Direct user id lookup.
	pub user_id: Option<String>,
	/// Email lookup.
	pub email: Option<String>,
	/// EVM wallet address lookup.
	pub evm_address: Option<String>,
}
impl ClientUserTokenOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the client secret for this call.
	pub fn client_secret(mut self, secret: impl Into<TokenSecret>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Looks the user up by compound identifier.
	pub fn identifier(mut self, identifier: UserIdentifier) -> Self {
		self.identifier = Some(identifier);

		self
	}

	/// Looks the user up by id.
	pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());

		self
	}

	/// Looks the user up by email.
	pub fn email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());

		self
	}

	/// Looks the user up by EVM wallet address.
	pub fn evm_address(mut self, address: impl Into<String>) -> Self {
		self.evm_address = Some(address.into());

		self
	}
}

impl<T> HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Exchanges an authorization code plus its PKCE verifier for tokens.
	pub async fn exchange_code(
		&self,
		code: impl Into<String>,
		code_verifier: impl Into<String>,
	) -> Result<TokenGrant> {
		let request = TokenRequest::authorization_code(
			code,
			code_verifier,
			self.redirect_uri.clone(),
			self.client_id.as_str(),
		);

		self.token_call(CallKind::TokenExchange, &request).await
	}

	/// Refreshes an access token from its refresh token.
	pub async fn refresh_access_token(
		&self,
		refresh_token: impl Into<TokenSecret>,
		options: RefreshOptions,
	) -> Result<TokenGrant> {
		let refresh_token = refresh_token.into();

		if refresh_token.is_empty() {
			return Err(ValidationError::MissingRefreshToken.into());
		}

		let client_id = options.client_id.as_deref().unwrap_or(self.client_id.as_str());
		let mut request = TokenRequest::refresh(refresh_token, client_id);

		if let Some(scope) = options.scope {
			request = request.with_scope(scope);
		}

		self.token_call(CallKind::TokenRefresh, &request).await
	}

	/// Issues a user token server-to-server, without user interaction.
	///
	/// The target user must hold an active authorization for this client.
	/// Requires a client secret, per-call or builder-configured, plus at
	/// least one lookup field.
	pub async fn client_user_token(
		&self,
		options: ClientUserTokenOptions,
	) -> Result<ClientUserTokenGrant> {
		let client_secret = match options.client_secret.or_else(|| self.client_secret.clone()) {
			Some(secret) if !secret.is_empty() => secret,
			_ => return Err(ValidationError::MissingClientSecret.into()),
		};

		if options.identifier.is_none()
			&& options.user_id.is_none()
			&& options.email.is_none()
			&& options.evm_address.is_none()
		{
			return Err(ValidationError::MissingUserIdentifier.into());
		}

		let body = ClientUserTokenRequest {
			client_id: self.client_id.clone(),
			client_secret,
			identifier: options.identifier.map(|identifier| identifier.to_string()),
			user_id: options.user_id,
			email: options.email,
			evm_address: options.evm_address,
		};
		let connection = self.conn().root();
		let request =
			connection.post_json(connection.endpoint(&["oauth", "client", "user-token"])?, &body)?;
		let (response, rate_limit) =
			self.dispatch::<ClientUserTokenResponse>(CallKind::ClientUserToken, request).await?;

		Ok(ClientUserTokenGrant {
			access_token: response.access_token.clone(),
			token_type: response.token_type.clone(),
			expires_in: response.expires_in,
			issued_at: response.issued_at,
			user_id: response.user_id.clone(),
			client_id: response.client_id.clone(),
			authorization_id: response.authorization_id.clone(),
			scopes: response.scopes.clone(),
			raw: response,
			rate_limit,
		})
	}

	/// Revokes tokens or whole authorizations.
	pub async fn revoke_tokens(&self, request: RevokeRequest) -> Result<RevokeOutcome> {
		let body = RevokeBody { client_id: self.client_id.clone(), request };
		let connection = self.conn().root();
		let http_request = connection.post_json(self.oauth_endpoints()?.revoke, &body)?;
		let (response, rate_limit) =
			self.dispatch::<RevokeResponse>(CallKind::TokenRevoke, http_request).await?;

		Ok(RevokeOutcome {
			revoked: response.revoked,
			revoked_count: response.revoked_count,
			details: response.details,
			rate_limit,
		})
	}

	async fn token_call(&self, kind: CallKind, body: &TokenRequest) -> Result<TokenGrant> {
		let connection = self.conn().root();
		let request = connection.post_json(self.oauth_endpoints()?.token, body)?;
		let (response, rate_limit) = self.dispatch::<TokenResponse>(kind, request).await?;

		Ok(self.map_token_grant(response, rate_limit))
	}

	fn map_token_grant(
		&self,
		response: TokenResponse,
		rate_limit: Option<RateLimitInfo>,
	) -> TokenGrant {
		let preset_keys = self.scopes().from_granted_scopes(&response.granted_scopes);

		TokenGrant {
			access_token: response.access_token.clone(),
			token_type: response.token_type.clone(),
			expires_in: response.expires_in,
			scope: response.scope.clone(),
			granted_scopes: response.granted_scopes.to_vec(),
			preset_keys,
			authorization_id: response.authorization_id.clone(),
			app_scoped_user_id: response.app_scoped_user_id.clone(),
			issued_at: response.issued_at,
			refresh_token: response.refresh_token.clone(),
			refresh_token_expires_in: response.refresh_token_expires_in,
			refresh_issued_at: response.refresh_issued_at,
			id_token: response.id_token.clone(),
			raw: response,
			rate_limit,
		}
	}
}
