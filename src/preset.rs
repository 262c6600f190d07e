//! Preset domain model.
//!
//! A preset is a named verifiable claim about a user (age threshold,
//! accreditation status, palm verification, ...) exposed through an OAuth
//! scope. This module holds the descriptor type shared across the SDK, the
//! reserved scope prefixes, and the catalog compiled into the crate as a
//! fallback for servers whose discovery document has not been fetched yet.

pub mod casing;
pub mod registry;

// self
use crate::_prelude::*;
use casing::snake_to_camel;

/// Scope namespace reserved by the Humanity API.
pub const SCOPE_NAMESPACE: &str = "hp:";
/// Prefix shared by every preset-backed scope.
pub const PRESET_SCOPE_PREFIX: &str = "hp:presets.";

/// Compiled-in preset catalog as `(wire name, scope)` pairs.
///
/// The live discovery catalog takes precedence over this table; it exists so
/// lookups keep working before [`get_configuration`](crate::client::HumanityClient::get_configuration)
/// has ever been called.
pub const DEFAULT_PRESETS: &[(&str, &str)] = &[
	("is_human", "hp:presets.is_human"),
	("is_18_plus", "hp:presets.is_18_plus"),
	("is_21_plus", "hp:presets.is_21_plus"),
	("is_accredited_investor", "hp:presets.is_accredited_investor"),
	("is_qualified_purchaser", "hp:presets.is_qualified_purchaser"),
	("is_institutional_investor", "hp:presets.is_institutional_investor"),
	("palm_verified", "hp:presets.palm_verified"),
	("age_gate_alcohol", "hp:presets.age_gate_alcohol"),
	("age_gate_gambling", "hp:presets.age_gate_gambling"),
	("investment_gate", "hp:presets.investment_gate"),
];

/// Value kind a preset evaluates to, as advertised by the discovery catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetValueKind {
	/// Boolean check.
	Boolean,
	/// One value out of a fixed set.
	Enum,
	/// Composite of several other presets.
	Bundled,
}

/// A preset definition known to the SDK.
///
/// `developer_key` and `wire_name` are deterministic case transforms of each
/// other unless a caller registers an explicit override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetDescriptor {
	/// camelCase identifier used by application code.
	pub developer_key: String,
	/// snake_case identifier used on the wire.
	pub wire_name: String,
	/// OAuth scope granting access to the preset.
	pub scope: String,
	/// Value kind advertised by the discovery catalog.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<PresetValueKind>,
	/// Consent text shown to the user during authorization.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub consent_text: Option<String>,
	/// Human-readable description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Scopes implied when this preset's scope is granted.
	#[serde(default)]
	pub implied_scopes: Vec<String>,
}
impl PresetDescriptor {
	/// Creates a descriptor from explicit identifiers.
	pub fn new(
		developer_key: impl Into<String>,
		wire_name: impl Into<String>,
		scope: impl Into<String>,
	) -> Self {
		Self {
			developer_key: developer_key.into(),
			wire_name: wire_name.into(),
			scope: scope.into(),
			kind: None,
			consent_text: None,
			description: None,
			implied_scopes: Vec::new(),
		}
	}

	/// Creates a descriptor from a wire name, deriving the developer key.
	pub fn from_wire_name(wire_name: impl Into<String>, scope: impl Into<String>) -> Self {
		let wire_name = wire_name.into();
		let developer_key = snake_to_camel(&wire_name);

		Self::new(developer_key, wire_name, scope)
	}

	/// Sets the value kind.
	pub fn with_kind(mut self, kind: PresetValueKind) -> Self {
		self.kind = Some(kind);

		self
	}

	/// Sets the consent text.
	pub fn with_consent_text(mut self, consent_text: impl Into<String>) -> Self {
		self.consent_text = Some(consent_text.into());

		self
	}

	/// Sets the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the implied scopes.
	pub fn with_implied_scopes<I, S>(mut self, implied_scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.implied_scopes = implied_scopes.into_iter().map(Into::into).collect();

		self
	}
}

/// Returns the compiled-in scope for a wire name, if the catalog has one.
pub fn default_scope_for(wire_name: &str) -> Option<&'static str> {
	DEFAULT_PRESETS.iter().find(|(name, _)| *name == wire_name).map(|(_, scope)| *scope)
}

/// Builds descriptors for the compiled-in catalog.
pub fn default_descriptors() -> Vec<PresetDescriptor> {
	DEFAULT_PRESETS
		.iter()
		.map(|(wire_name, scope)| PresetDescriptor::from_wire_name(*wire_name, *scope))
		.collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_catalog_is_prefixed_and_derivable() {
		for descriptor in default_descriptors() {
			assert_eq!(
				descriptor.scope,
				format!("{PRESET_SCOPE_PREFIX}{}", descriptor.wire_name),
				"Catalog scope must follow the preset prefix convention.",
			);
			assert_eq!(descriptor.developer_key, snake_to_camel(&descriptor.wire_name));
			assert!(descriptor.implied_scopes.is_empty());
		}
	}

	#[test]
	fn default_scope_lookup_hits_and_misses() {
		assert_eq!(default_scope_for("is_human"), Some("hp:presets.is_human"));
		assert_eq!(default_scope_for("unknown_preset"), None);
	}

	#[test]
	fn value_kind_uses_lowercase_wire_names() {
		let kind: PresetValueKind =
			serde_json::from_str("\"enum\"").expect("Kind should deserialize successfully.");

		assert_eq!(kind, PresetValueKind::Enum);
		assert_eq!(
			serde_json::to_string(&PresetValueKind::Bundled)
				.expect("Kind should serialize successfully."),
			"\"bundled\"",
		);
	}

	#[test]
	fn descriptor_serde_skips_absent_metadata() {
		let descriptor = PresetDescriptor::from_wire_name("is_human", "hp:presets.is_human");
		let value =
			serde_json::to_value(&descriptor).expect("Descriptor should serialize successfully.");

		assert!(value.get("kind").is_none());
		assert!(value.get("consent_text").is_none());
		assert_eq!(value["developer_key"], "isHuman");
	}
}
