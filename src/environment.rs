//! Named deployment profiles and their base URLs.

// self
use crate::{_prelude::*, error::ConfigError};

/// Built-in production environment name.
pub const PRODUCTION: &str = "production";
/// Built-in staging environment name.
pub const STAGING: &str = "staging";
/// Built-in testnet environment name.
pub const TESTNET: &str = "testnet";

/// One deployment profile: a name plus its API and discovery base URLs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
	/// Profile name used for lookups.
	pub name: String,
	/// Base URL for API and OAuth calls.
	pub api_base_url: Url,
	/// Base URL for discovery and health probes.
	pub discovery_base_url: Url,
}
impl EnvironmentDescriptor {
	/// Creates a profile whose discovery base defaults to the API base.
	pub fn new(name: impl Into<String>, api_base_url: Url) -> Self {
		let discovery_base_url = api_base_url.clone();

		Self { name: name.into(), api_base_url, discovery_base_url }
	}

	/// Points discovery and health probes at a separate base URL.
	pub fn with_discovery_base_url(mut self, discovery_base_url: Url) -> Self {
		self.discovery_base_url = discovery_base_url;

		self
	}
}

/// Registry of deployment profiles keyed by name.
///
/// Always contains the three built-in profiles; caller-registered profiles
/// may shadow them. Lookups are case-sensitive first with a case-insensitive
/// fallback scan.
#[derive(Clone, Debug)]
pub struct EnvironmentRegistry {
	descriptors: BTreeMap<String, EnvironmentDescriptor>,
}
impl EnvironmentRegistry {
	/// Creates a registry holding only the built-in profiles.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry holding the built-ins plus the given profiles.
	pub fn with_environments(environments: impl IntoIterator<Item = EnvironmentDescriptor>) -> Self {
		let mut registry = Self::default();

		for descriptor in environments {
			registry.register(descriptor);
		}

		registry
	}

	/// Registers a profile, replacing any existing one with the same name.
	pub fn register(&mut self, descriptor: EnvironmentDescriptor) {
		self.descriptors.insert(descriptor.name.clone(), descriptor);
	}

	/// Resolves a profile by name; `None` resolves to production.
	pub fn resolve(&self, name: Option<&str>) -> Result<&EnvironmentDescriptor> {
		let name = name.unwrap_or(PRODUCTION);

		if let Some(descriptor) = self.descriptors.get(name) {
			return Ok(descriptor);
		}
		if let Some(descriptor) =
			self.descriptors.values().find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
		{
			return Ok(descriptor);
		}

		Err(ConfigError::UnknownEnvironment { name: name.into() }.into())
	}

	/// Iterates every registered profile.
	pub fn list(&self) -> impl Iterator<Item = &EnvironmentDescriptor> {
		self.descriptors.values()
	}
}
impl Default for EnvironmentRegistry {
	fn default() -> Self {
		let mut descriptors = BTreeMap::new();

		for (name, base) in [
			(PRODUCTION, "https://api.humanity.org"),
			(STAGING, "https://api-staging.humanity.org"),
			(TESTNET, "https://api-testnet.humanity.org"),
		] {
			let descriptor = EnvironmentDescriptor::new(
				name,
				Url::parse(base).expect("Built-in base URL should parse successfully."),
			);

			descriptors.insert(descriptor.name.clone(), descriptor);
		}

		Self { descriptors }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builtins_are_always_present() {
		let registry = EnvironmentRegistry::new();

		assert_eq!(registry.list().count(), 3);
		assert_eq!(
			registry
				.resolve(Some(TESTNET))
				.expect("Testnet should resolve successfully.")
				.api_base_url
				.as_str(),
			"https://api-testnet.humanity.org/",
		);
	}

	#[test]
	fn missing_name_resolves_to_production() {
		let registry = EnvironmentRegistry::new();
		let descriptor = registry.resolve(None).expect("Production should resolve successfully.");

		assert_eq!(descriptor.name, PRODUCTION);
	}

	#[test]
	fn lookup_falls_back_to_case_insensitive_match() {
		let registry = EnvironmentRegistry::new();
		let descriptor =
			registry.resolve(Some("Staging")).expect("Mixed-case name should resolve successfully.");

		assert_eq!(descriptor.name, STAGING);
		assert!(matches!(
			registry.resolve(Some("devnet")),
			Err(Error::Config(ConfigError::UnknownEnvironment { .. })),
		));
	}

	#[test]
	fn registered_profiles_shadow_builtins() {
		let api = Url::parse("https://api.acme.test").expect("URL should parse successfully.");
		let discovery =
			Url::parse("https://discovery.acme.test").expect("URL should parse successfully.");
		let registry = EnvironmentRegistry::with_environments([EnvironmentDescriptor::new(
			STAGING, api,
		)
		.with_discovery_base_url(discovery.clone())]);
		let descriptor =
			registry.resolve(Some(STAGING)).expect("Override should resolve successfully.");

		assert_eq!(descriptor.api_base_url.as_str(), "https://api.acme.test/");
		assert_eq!(descriptor.discovery_base_url, discovery);
	}
}
