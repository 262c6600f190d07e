//! Credential and authorization polling wire contracts.

// self
use crate::_prelude::*;

/// Lifecycle state of an authorization record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
	/// Authorization is live.
	Active,
	/// Authorization has been revoked.
	Revoked,
}
impl AuthorizationStatus {
	/// Wire representation.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Active => "active",
			Self::Revoked => "revoked",
		}
	}
}
impl Display for AuthorizationStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One credential snapshot from the credentials poll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CredentialItem {
	/// User the credential belongs to.
	pub user_id: String,
	/// Wire name of the preset the credential backs.
	pub preset: String,
	/// Verified value; shape depends on the preset kind.
	pub value: JsonValue,
	/// Verification state.
	pub status: super::presets::PresetStatus,
	/// Credential expiry instant.
	#[serde(with = "time::serde::rfc3339")]
	pub expires_at: OffsetDateTime,
	/// Last update instant.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Credentials poll response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialsResponse {
	/// Credential snapshots.
	#[serde(default)]
	pub items: Vec<CredentialItem>,
	/// Most recent change instant across the listed credentials.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub last_modified: Option<OffsetDateTime>,
	/// Whether more items exist beyond the requested page.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_more: Option<bool>,
}

/// One authorization change from the authorizations poll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationUpdate {
	/// Authorization record the update refers to.
	pub authorization_id: String,
	/// Organization owning the client.
	pub organization_id: String,
	/// User identifier scoped to the requesting application.
	pub app_scoped_user_id: String,
	/// Lifecycle state after the change.
	pub status: AuthorizationStatus,
	/// Change instant.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Authorizations poll response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationsResponse {
	/// Authorization changes.
	#[serde(default)]
	pub items: Vec<AuthorizationUpdate>,
	/// Most recent change instant across the listed authorizations.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub last_modified: Option<OffsetDateTime>,
	/// Whether more items exist beyond the requested page.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_more: Option<bool>,
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn authorization_update_decodes_both_statuses() {
		let revoked: AuthorizationUpdate = serde_json::from_value(json!({
			"authorization_id": "auth-123",
			"organization_id": "org-123",
			"app_scoped_user_id": "user-123",
			"status": "revoked",
			"updated_at": "2025-01-01T00:00:00Z",
		}))
		.expect("Revoked update should deserialize successfully.");

		assert_eq!(revoked.status, AuthorizationStatus::Revoked);
		assert_eq!(revoked.status.to_string(), "revoked");

		let active: AuthorizationUpdate = serde_json::from_value(json!({
			"authorization_id": "auth-123",
			"organization_id": "org-123",
			"app_scoped_user_id": "user-123",
			"status": "active",
			"updated_at": "2025-01-01T00:00:00Z",
		}))
		.expect("Active update should deserialize successfully.");

		assert_eq!(active.status, AuthorizationStatus::Active);
	}

	#[test]
	fn credentials_response_tolerates_missing_pagination() {
		let response: CredentialsResponse = serde_json::from_value(json!({
			"items": [{
				"user_id": "user-123",
				"preset": "is_human",
				"value": true,
				"status": "valid",
				"expires_at": "2025-06-01T00:00:00Z",
				"updated_at": "2025-01-01T00:00:00Z",
			}],
		}))
		.expect("Credentials response should deserialize successfully.");

		assert_eq!(response.items.len(), 1);
		assert_eq!(response.items[0].value, json!(true));
		assert!(response.last_modified.is_none());
		assert!(response.has_more.is_none());

		let empty: AuthorizationsResponse = serde_json::from_value(json!({ "items": [] }))
			.expect("Empty poll response should deserialize successfully.");

		assert!(empty.items.is_empty());
	}
}
