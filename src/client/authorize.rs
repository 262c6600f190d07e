//! Authorization redirect construction with PKCE.

// self
use crate::{
	_prelude::*,
	client::HumanityClient,
	error::ValidationError,
	http::HttpTransport,
	pkce,
	preset::casing::camel_to_snake,
};

/// Scope tokens that pass through scope composition without developer-key
/// translation.
pub const LITERAL_SCOPE_KEYWORDS: &[&str] = &["openid"];

/// Options accepted by [`authorize_url`](HumanityClient::authorize_url).
#[derive(Clone, Debug)]
pub struct AuthorizeOptions {
	/// Requested scopes, as developer keys or literal scope strings.
	pub scopes: Vec<String>,
	/// Opaque CSRF token echoed back on the redirect.
	pub state: Option<String>,
	/// OpenID Connect nonce bound into the ID token.
	pub nonce: Option<String>,
	/// Caller-supplied PKCE verifier; one is generated when absent.
	pub code_verifier: Option<String>,
	/// Length of the generated verifier when none is supplied.
	pub code_verifier_length: Option<usize>,
	/// Extra query parameters; camelCase keys are rewritten to snake_case.
	pub extra_params: BTreeMap<String, String>,
}
impl AuthorizeOptions {
	/// Creates options requesting the given scopes.
	pub fn new<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			scopes: scopes.into_iter().map(Into::into).collect(),
			state: None,
			nonce: None,
			code_verifier: None,
			code_verifier_length: None,
			extra_params: BTreeMap::new(),
		}
	}

	/// Sets the `state` parameter.
	pub fn state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Sets the `nonce` parameter.
	pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = Some(nonce.into());

		self
	}

	/// Supplies the PKCE verifier instead of generating one.
	pub fn code_verifier(mut self, verifier: impl Into<String>) -> Self {
		self.code_verifier = Some(verifier.into());

		self
	}

	/// Sets the length of the generated verifier.
	pub fn code_verifier_length(mut self, length: usize) -> Self {
		self.code_verifier_length = Some(length);

		self
	}

	/// Adds one extra query parameter.
	pub fn extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_params.insert(key.into(), value.into());

		self
	}
}

/// Prepared authorization redirect.
///
/// The verifier is never stored by the SDK; callers persist it themselves and
/// hand it back to [`exchange_code`](HumanityClient::exchange_code).
#[derive(Clone)]
pub struct AuthorizationSession {
	/// Fully assembled authorization URL.
	pub authorize_url: Url,
	/// PKCE verifier backing the URL's challenge.
	pub code_verifier: String,
}
impl Debug for AuthorizationSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationSession")
			.field("authorize_url", &self.authorize_url.as_str())
			.field("code_verifier", &"<redacted>")
			.finish()
	}
}

impl<T> HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Builds the authorization redirect URL and the PKCE verifier behind it.
	///
	/// Scopes may be camelCase developer keys, translated through the preset
	/// registry, or literal scope strings, which pass through untouched.
	/// Literal scopes keep their first-seen order, translated scopes follow,
	/// and duplicates collapse. Empty `state`/`nonce` values are skipped.
	pub fn authorize_url(&self, options: AuthorizeOptions) -> Result<AuthorizationSession> {
		if options.scopes.is_empty() {
			return Err(ValidationError::EmptyScopes.into());
		}

		let code_verifier = match options.code_verifier {
			Some(verifier) => verifier,
			None => pkce::generate_code_verifier(
				options.code_verifier_length.unwrap_or(pkce::DEFAULT_CODE_VERIFIER_LENGTH),
			)?,
		};
		let code_challenge = pkce::derive_code_challenge(&code_verifier)?;
		let scope = self.compose_authorization_scopes(&options.scopes).join(" ");
		let mut authorize_url = self.oauth_endpoints()?.authorize;

		set_query_param(&mut authorize_url, "client_id", &self.client_id);
		set_query_param(&mut authorize_url, "redirect_uri", self.redirect_uri.as_str());
		set_query_param(&mut authorize_url, "response_type", "code");
		set_query_param(&mut authorize_url, "scope", &scope);
		set_query_param(&mut authorize_url, "code_challenge", &code_challenge);
		set_query_param(&mut authorize_url, "code_challenge_method", "S256");

		if let Some(state) = options.state.as_deref().filter(|state| !state.is_empty()) {
			set_query_param(&mut authorize_url, "state", state);
		}
		if let Some(nonce) = options.nonce.as_deref().filter(|nonce| !nonce.is_empty()) {
			set_query_param(&mut authorize_url, "nonce", nonce);
		}
		for (key, value) in &options.extra_params {
			set_query_param(&mut authorize_url, &camel_to_snake(key), value);
		}

		Ok(AuthorizationSession { authorize_url, code_verifier })
	}

	fn compose_authorization_scopes(&self, scopes: &[String]) -> Vec<String> {
		let mut seen = HashSet::new();
		let mut composed = Vec::new();
		let mut developer_keys = Vec::new();

		for scope in scopes {
			let scope = scope.trim();

			if scope.is_empty() {
				continue;
			}
			if is_literal_scope(scope) {
				if seen.insert(scope.to_owned()) {
					composed.push(scope.to_owned());
				}
			} else {
				developer_keys.push(scope);
			}
		}
		for scope in self.scopes().to_authorization_scopes(developer_keys) {
			if seen.insert(scope.clone()) {
				composed.push(scope);
			}
		}

		composed
	}
}

/// Classifies a scope token as literal (passed through) or as a developer key
/// (translated through the preset registry).
///
/// A token is literal when it contains `:` or `.`, or matches one of
/// [`LITERAL_SCOPE_KEYWORDS`] case-insensitively.
pub fn is_literal_scope(scope: &str) -> bool {
	if scope.is_empty() {
		return false;
	}
	if scope.contains(':') || scope.contains('.') {
		return true;
	}

	let normalized = scope.trim().to_ascii_lowercase();

	LITERAL_SCOPE_KEYWORDS.contains(&normalized.as_str())
}

// `Url::query_pairs_mut` appends; authorization parameters replace instead so
// an endpoint that already carries a query cannot end up with duplicates.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
	let retained = url
		.query_pairs()
		.filter(|(existing, _)| existing.as_ref() != key)
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect::<Vec<_>>();
	let mut pairs = url.query_pairs_mut();

	pairs.clear();

	for (key, value) in &retained {
		pairs.append_pair(key, value);
	}

	pairs.append_pair(key, value);
}
