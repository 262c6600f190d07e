//! Verification response mapping, wire results into developer-facing checks.

// self
use crate::{
	_prelude::*,
	http::RateLimitInfo,
	preset::registry::PresetRegistry,
	wire::{PresetError, PresetErrorEntry, PresetResult, PresetStatus, VerifyPresetsResponse},
};

/// One successfully verified preset, keyed the way developers address it.
#[derive(Clone, Debug)]
pub struct PresetCheck {
	/// camelCase developer key.
	pub preset: String,
	/// snake_case wire name the API reported.
	pub wire_name: String,
	/// Authorization scope backing this preset.
	pub scope: String,
	/// Verified value.
	pub value: JsonValue,
	/// Verification status.
	pub status: PresetStatus,
	/// When the verification expires.
	pub expires_at: OffsetDateTime,
	/// When the verification was performed.
	pub verified_at: Option<OffsetDateTime>,
	/// Attestation evidence, when the API includes it.
	pub evidence: Option<JsonMap>,
	/// Rate limit headers captured from the response.
	pub rate_limit: Option<RateLimitInfo>,
}

/// A preset the API could not verify.
#[derive(Clone, Debug)]
pub struct PresetCheckFailure {
	/// camelCase developer key.
	pub preset: String,
	/// snake_case wire name the API reported.
	pub wire_name: String,
	/// Authorization scope backing this preset.
	pub scope: String,
	/// The API's error detail.
	pub error: PresetError,
}

/// Outcome of a batch verification, splitting per-preset results from
/// per-preset failures.
#[derive(Clone, Debug)]
pub struct PresetBatchOutcome {
	/// Successfully verified presets.
	pub results: Vec<PresetCheck>,
	/// Presets the API rejected.
	pub errors: Vec<PresetCheckFailure>,
	/// Untranslated response body.
	pub raw: VerifyPresetsResponse,
	/// Rate limit headers captured from the response.
	pub rate_limit: Option<RateLimitInfo>,
}

/// Translates verification payloads, attaching registry metadata to every
/// entry.
#[derive(Clone, Debug)]
pub struct PresetsAdapter {
	registry: Arc<PresetRegistry>,
}
impl PresetsAdapter {
	/// Creates an adapter over a shared registry.
	pub fn new(registry: Arc<PresetRegistry>) -> Self {
		Self { registry }
	}

	/// Maps a batch verification response.
	pub fn from_batch_response(
		&self,
		response: VerifyPresetsResponse,
		rate_limit: Option<RateLimitInfo>,
	) -> PresetBatchOutcome {
		let results =
			response.results.iter().map(|result| self.map_result(result, rate_limit)).collect();
		let errors = response.errors.iter().map(|entry| self.map_error(entry)).collect();

		PresetBatchOutcome { results, errors, raw: response, rate_limit }
	}

	/// Maps a single-preset verification response, expecting exactly one
	/// result.
	///
	/// A response without results becomes an error carrying the API's
	/// per-preset failure descriptions.
	pub fn from_single_response(
		&self,
		response: VerifyPresetsResponse,
		rate_limit: Option<RateLimitInfo>,
	) -> Result<PresetCheck> {
		let PresetBatchOutcome { results, errors, .. } =
			self.from_batch_response(response, rate_limit);

		if let Some(check) = results.into_iter().next() {
			return Ok(check);
		}

		let reason = if errors.is_empty() {
			"no results were returned".into()
		} else {
			errors
				.iter()
				.map(|failure| {
					if failure.error.error_description.is_empty() {
						failure.error.error.as_str()
					} else {
						failure.error.error_description.as_str()
					}
				})
				.collect::<Vec<_>>()
				.join("; ")
		};

		Err(Error::PresetVerification { reason })
	}

	fn map_result(&self, result: &PresetResult, rate_limit: Option<RateLimitInfo>) -> PresetCheck {
		let descriptor = self.registry.resolve_by_wire_name(&result.preset);

		PresetCheck {
			preset: descriptor.developer_key.clone(),
			wire_name: descriptor.wire_name.clone(),
			scope: descriptor.scope.clone(),
			value: result.value.clone(),
			status: result.status,
			expires_at: result.expires_at,
			verified_at: result.verified_at,
			evidence: result.evidence.clone(),
			rate_limit,
		}
	}

	fn map_error(&self, entry: &PresetErrorEntry) -> PresetCheckFailure {
		let descriptor = self.registry.resolve_by_wire_name(&entry.preset);

		PresetCheckFailure {
			preset: descriptor.developer_key.clone(),
			wire_name: descriptor.wire_name.clone(),
			scope: descriptor.scope.clone(),
			error: entry.error.clone(),
		}
	}
}
