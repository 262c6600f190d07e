//! Polling response mapping for credential and authorization updates.

// self
use crate::{
	_prelude::*,
	http::RateLimitInfo,
	preset::registry::PresetRegistry,
	wire::{
		AuthorizationUpdate, AuthorizationsResponse, CredentialItem, CredentialsResponse,
		PresetStatus,
	},
};

/// One credential change, keyed the way developers address the preset.
#[derive(Clone, Debug)]
pub struct CredentialRecord {
	/// camelCase developer key.
	pub preset: String,
	/// snake_case wire name the API reported.
	pub wire_name: String,
	/// Authorization scope backing this preset.
	pub scope: String,
	/// Credential value.
	pub value: JsonValue,
	/// Credential status.
	pub status: PresetStatus,
	/// App-scoped user the credential belongs to.
	pub user_id: String,
	/// When the credential expires.
	pub expires_at: OffsetDateTime,
	/// When the credential last changed.
	pub updated_at: OffsetDateTime,
}

/// A page of credential changes.
#[derive(Clone, Debug)]
pub struct CredentialUpdates {
	/// Translated credential records.
	pub credentials: Vec<CredentialRecord>,
	/// Watermark to feed into the next poll.
	pub last_modified: Option<OffsetDateTime>,
	/// Whether more pages are available right now.
	pub has_more: bool,
	/// Untranslated response body.
	pub raw: CredentialsResponse,
	/// Rate limit headers captured from the response.
	pub rate_limit: Option<RateLimitInfo>,
}

/// A page of authorization changes.
#[derive(Clone, Debug)]
pub struct AuthorizationUpdates {
	/// Authorization change records.
	pub authorizations: Vec<AuthorizationUpdate>,
	/// Watermark to feed into the next poll.
	pub last_modified: Option<OffsetDateTime>,
	/// Whether more pages are available right now.
	pub has_more: bool,
	/// Untranslated response body.
	pub raw: AuthorizationsResponse,
	/// Rate limit headers captured from the response.
	pub rate_limit: Option<RateLimitInfo>,
}

/// Translates polling payloads into paged update sets.
#[derive(Clone, Debug)]
pub struct StatusAdapter {
	registry: Arc<PresetRegistry>,
}
impl StatusAdapter {
	/// Creates an adapter over a shared registry.
	pub fn new(registry: Arc<PresetRegistry>) -> Self {
		Self { registry }
	}

	/// Maps a credentials polling response.
	pub fn from_credentials_response(
		&self,
		response: CredentialsResponse,
		rate_limit: Option<RateLimitInfo>,
	) -> CredentialUpdates {
		let credentials = response.items.iter().map(|item| self.map_credential(item)).collect();

		CredentialUpdates {
			credentials,
			last_modified: response.last_modified,
			has_more: response.has_more.unwrap_or(false),
			raw: response,
			rate_limit,
		}
	}

	/// Maps an authorizations polling response.
	pub fn from_authorizations_response(
		&self,
		response: AuthorizationsResponse,
		rate_limit: Option<RateLimitInfo>,
	) -> AuthorizationUpdates {
		AuthorizationUpdates {
			authorizations: response.items.clone(),
			last_modified: response.last_modified,
			has_more: response.has_more.unwrap_or(false),
			raw: response,
			rate_limit,
		}
	}

	fn map_credential(&self, item: &CredentialItem) -> CredentialRecord {
		let descriptor = self.registry.resolve_by_wire_name(&item.preset);

		CredentialRecord {
			preset: descriptor.developer_key.clone(),
			wire_name: descriptor.wire_name.clone(),
			scope: descriptor.scope.clone(),
			value: item.value.clone(),
			status: item.status,
			user_id: item.user_id.clone(),
			expires_at: item.expires_at,
			updated_at: item.updated_at,
		}
	}
}
