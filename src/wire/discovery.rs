//! Discovery document wire contract.

// self
use crate::{_prelude::*, preset::PresetValueKind};

/// One scope entry from the discovery scope catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScopeDescriptor {
	/// Scope identifier, e.g. `hp:presets.is_human`.
	pub id: String,
	/// Human-readable scope name.
	pub display_name: String,
	/// Human-readable explanation.
	pub description: String,
	/// Catalog category the scope belongs to.
	pub category: String,
	/// Scopes implicitly granted alongside this one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub implied_scopes: Option<Vec<String>>,
	/// Whether the scope is granted without an explicit request.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_default: Option<bool>,
}

/// One preset entry from the discovery preset catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryPreset {
	/// Wire name of the preset.
	pub name: String,
	/// Scope that grants access to the preset.
	pub scope: String,
	/// Value kind the preset verifies to.
	#[serde(rename = "type")]
	pub kind: PresetValueKind,
	/// Human-readable explanation.
	pub description: String,
	/// Consent text shown to the user during authorization.
	pub consent_text: String,
}

/// Discovery document served from `/.well-known/hp-configuration`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfiguration {
	/// Issuer identifier.
	pub issuer: String,
	/// Authorization endpoint.
	pub authorization_endpoint: Url,
	/// Token endpoint.
	pub token_endpoint: Url,
	/// Revocation endpoint.
	pub revoke_endpoint: Url,
	/// Consent preset submission endpoint.
	pub consent_presets_endpoint: Url,
	/// Single preset verification endpoint.
	pub presets_endpoint: Url,
	/// Batch preset verification endpoint.
	pub presets_batch_endpoint: Url,
	/// Credentials poll endpoint.
	pub credentials_endpoint: Url,
	/// Authorizations poll endpoint.
	pub authorizations_endpoint: Url,
	/// Location this document was served from.
	pub hp_configuration_endpoint: Url,
	/// Scope identifiers the deployment supports.
	pub scopes_supported: Vec<String>,
	/// Scope catalog with per-scope metadata.
	pub scopes_catalog: Vec<ScopeDescriptor>,
	/// Supported OAuth grant types.
	pub grant_types_supported: Vec<String>,
	/// Supported PKCE challenge methods.
	pub code_challenge_methods_supported: Vec<String>,
	/// Supported OAuth response types.
	pub response_types_supported: Vec<String>,
	/// Preset catalog with per-preset metadata.
	pub presets_available: Vec<DiscoveryPreset>,
	/// Default rate limit applied to clients.
	pub rate_limit_default: u32,
	/// Unit the rate limit is expressed in.
	pub rate_limit_unit: String,
}
