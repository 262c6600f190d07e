//! Developer-key to scope translation, both directions.

// self
use crate::{
	_prelude::*,
	preset::{
		PRESET_SCOPE_PREFIX,
		casing::{camel_to_snake, snake_to_camel},
		registry::PresetRegistry,
	},
	wire::{DiscoveryConfiguration, GrantedScopes},
};

/// Translates between camelCase developer keys and OAuth scope strings,
/// delegating lookups to the shared [`PresetRegistry`].
#[derive(Clone, Debug)]
pub struct ScopesAdapter {
	registry: Arc<PresetRegistry>,
}
impl ScopesAdapter {
	/// Creates an adapter over a shared registry.
	pub fn new(registry: Arc<PresetRegistry>) -> Self {
		Self { registry }
	}

	/// Feeds a discovery document's preset catalog into the registry.
	pub fn ingest_configuration(&self, configuration: &DiscoveryConfiguration) {
		self.registry.sync_from_configuration(configuration);
	}

	/// Maps developer keys to their authorization scopes.
	///
	/// Keys are trimmed, empties dropped, and duplicates collapsed in
	/// first-seen order before resolution.
	pub fn to_authorization_scopes<I, S>(&self, keys: I) -> Vec<String>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut seen = HashSet::new();
		let mut scopes = Vec::new();

		for key in keys {
			let key = key.as_ref().trim();

			if key.is_empty() || !seen.insert(key.to_owned()) {
				continue;
			}

			scopes.push(self.registry.resolve_by_developer_key(key).scope.clone());
		}

		scopes
	}

	/// Maps a developer key to its wire name.
	pub fn to_wire_name(&self, key: &str) -> String {
		self.registry.resolve_by_developer_key(key).wire_name.clone()
	}

	/// Maps a wire name to its developer key.
	pub fn to_developer_key(&self, wire_name: &str) -> String {
		self.registry.resolve_by_wire_name(wire_name).developer_key.clone()
	}

	/// Derives developer keys from a token response's granted scopes.
	///
	/// Every scope token maps to exactly one output entry, preserving order
	/// and count; scopes that normalize to the same developer key are not
	/// collapsed here.
	pub fn from_granted_scopes(&self, scopes: &GrantedScopes) -> Vec<String> {
		scopes
			.to_vec()
			.iter()
			.map(|scope| scope.trim())
			.filter(|scope| !scope.is_empty())
			.map(|scope| {
				if let Some(descriptor) = self.registry.resolve_by_scope(scope) {
					return descriptor.developer_key.clone();
				}
				if let Some(stripped) = scope.strip_prefix(PRESET_SCOPE_PREFIX) {
					return snake_to_camel(stripped);
				}
				if camel_to_snake(scope) == scope {
					snake_to_camel(scope)
				} else {
					scope.to_owned()
				}
			})
			.collect()
	}
}
