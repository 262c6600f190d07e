//! Preset registry with placeholder synthesis for unknown identifiers.
//!
//! The registry keeps three indexes over the same descriptors so lookups by
//! developer key, wire name, or scope all land on one record. Unknown
//! identifiers never fail resolution; they synthesize a placeholder
//! descriptor and persist it, trading strict validation for availability.
//! That keeps calls working when the live catalog outruns the compiled-in
//! table, but it can also mask a typo in a developer key.

// self
use crate::{
	_prelude::*,
	preset::{
		self, PRESET_SCOPE_PREFIX, PresetDescriptor, SCOPE_NAMESPACE,
		casing::{camel_to_snake, snake_to_camel},
	},
	wire::DiscoveryConfiguration,
};

#[derive(Debug, Default)]
struct Indexes {
	by_developer_key: HashMap<String, Arc<PresetDescriptor>>,
	by_wire_name: HashMap<String, Arc<PresetDescriptor>>,
	by_scope: HashMap<String, Arc<PresetDescriptor>>,
}

/// Thread-safe descriptor index shared by one client instance.
///
/// Writes follow a last-write-wins model; concurrent registrations race and
/// whichever completes last owns the indexes.
#[derive(Debug)]
pub struct PresetRegistry {
	indexes: RwLock<Indexes>,
}
impl PresetRegistry {
	/// Creates an empty registry with no compiled-in descriptors.
	pub fn new() -> Self {
		Self { indexes: RwLock::new(Indexes::default()) }
	}

	/// Creates a registry seeded with the given descriptors.
	pub fn with_descriptors(descriptors: impl IntoIterator<Item = PresetDescriptor>) -> Self {
		let registry = Self::new();

		for descriptor in descriptors {
			registry.register(descriptor);
		}

		registry
	}

	/// Registers a descriptor under all three indexes and returns the stored
	/// record.
	///
	/// An empty `developer_key` or `wire_name` is derived from its
	/// counterpart. Re-registering replaces the primary entries; an entry
	/// indexed under a superseded scope stays until overwritten.
	pub fn register(&self, mut descriptor: PresetDescriptor) -> Arc<PresetDescriptor> {
		if descriptor.developer_key.is_empty() {
			descriptor.developer_key = snake_to_camel(&descriptor.wire_name);
		}
		if descriptor.wire_name.is_empty() {
			descriptor.wire_name = camel_to_snake(&descriptor.developer_key);
		}

		let descriptor = Arc::new(descriptor);
		let mut indexes = self.indexes.write();

		indexes.by_developer_key.insert(descriptor.developer_key.clone(), Arc::clone(&descriptor));
		indexes.by_wire_name.insert(descriptor.wire_name.clone(), Arc::clone(&descriptor));
		indexes.by_scope.insert(descriptor.scope.clone(), Arc::clone(&descriptor));

		descriptor
	}

	/// Resolves a camelCase developer key, synthesizing a placeholder when
	/// the key is unknown.
	pub fn resolve_by_developer_key(&self, key: &str) -> Arc<PresetDescriptor> {
		{
			let indexes = self.indexes.read();

			if let Some(descriptor) = indexes
				.by_developer_key
				.get(key)
				.or_else(|| indexes.by_wire_name.get(&camel_to_snake(key)))
			{
				return Arc::clone(descriptor);
			}
		}

		self.synthesize(key)
	}

	/// Resolves a snake_case wire name, synthesizing a placeholder when the
	/// name is unknown.
	pub fn resolve_by_wire_name(&self, name: &str) -> Arc<PresetDescriptor> {
		{
			let indexes = self.indexes.read();

			if let Some(descriptor) = indexes
				.by_wire_name
				.get(name)
				.or_else(|| indexes.by_developer_key.get(&snake_to_camel(name)))
			{
				return Arc::clone(descriptor);
			}
		}

		self.synthesize(name)
	}

	/// Resolves a scope string.
	///
	/// Only scopes under the preset namespace synthesize placeholders; any
	/// other unknown scope resolves to `None`.
	pub fn resolve_by_scope(&self, scope: &str) -> Option<Arc<PresetDescriptor>> {
		let stripped = scope.strip_prefix(PRESET_SCOPE_PREFIX);

		{
			let indexes = self.indexes.read();

			if let Some(descriptor) = indexes
				.by_scope
				.get(scope)
				.or_else(|| stripped.and_then(|wire_name| indexes.by_wire_name.get(wire_name)))
			{
				return Some(Arc::clone(descriptor));
			}
		}

		stripped.map(|wire_name| self.synthesize(wire_name))
	}

	/// Returns every registered descriptor.
	pub fn list(&self) -> Vec<Arc<PresetDescriptor>> {
		self.indexes.read().by_developer_key.values().cloned().collect()
	}

	/// Upserts descriptors from a discovery document's preset catalog.
	///
	/// The document's scope wins over any compiled-in mapping for the same
	/// wire name.
	pub fn sync_from_configuration(&self, configuration: &DiscoveryConfiguration) {
		for preset in &configuration.presets_available {
			self.register(
				PresetDescriptor::from_wire_name(preset.name.clone(), preset.scope.clone())
					.with_kind(preset.kind)
					.with_description(preset.description.clone())
					.with_consent_text(preset.consent_text.clone()),
			);
		}
	}

	fn synthesize(&self, identifier: &str) -> Arc<PresetDescriptor> {
		let derived = identifier.strip_prefix(PRESET_SCOPE_PREFIX).unwrap_or(identifier);
		let wire_name =
			if derived.contains('_') { derived.to_owned() } else { camel_to_snake(derived) };
		let scope = preset::default_scope_for(&wire_name).map(str::to_owned).unwrap_or_else(|| {
			if identifier.starts_with(SCOPE_NAMESPACE) {
				identifier.to_owned()
			} else {
				format!("{PRESET_SCOPE_PREFIX}{wire_name}")
			}
		});

		self.register(PresetDescriptor::from_wire_name(wire_name, scope))
	}
}
impl Default for PresetRegistry {
	/// Seeds the registry with the compiled-in preset catalog.
	fn default() -> Self {
		Self::with_descriptors(preset::default_descriptors())
	}
}
