//! Preset verification, single checks and batches.

// self
use crate::{
	_prelude::*,
	adapter::{PresetBatchOutcome, PresetCheck},
	auth::TokenSecret,
	client::HumanityClient,
	error::ValidationError,
	http::HttpTransport,
	obs::CallKind,
	wire::{PresetResult, VerifyPresetsRequest, VerifyPresetsResponse},
};

/// Server-side cap on presets per batch request.
pub const MAX_PRESET_BATCH: usize = 10;

impl<T> HumanityClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Verifies one preset for the token's user.
	///
	/// Accepts a camelCase developer key or a snake_case wire name; either
	/// resolves through the shared registry before the request goes out.
	pub async fn verify_preset(
		&self,
		preset: &str,
		access_token: &TokenSecret,
	) -> Result<PresetCheck> {
		if access_token.is_empty() {
			return Err(ValidationError::MissingAccessToken.into());
		}

		let preset = preset.trim();

		if preset.is_empty() {
			return Err(ValidationError::EmptyPresetName.into());
		}

		let wire_name = self.scopes().to_wire_name(preset);
		let connection = self.conn().core(access_token)?;
		let request = connection.get(connection.endpoint(&["presets", &wire_name])?)?;
		let (result, rate_limit) =
			self.dispatch::<PresetResult>(CallKind::VerifyPreset, request).await?;
		// The single-preset endpoint answers with a bare result; wrapping it
		// lets both shapes flow through one mapping path.
		let response = VerifyPresetsResponse { results: vec![result], errors: Vec::new() };

		self.presets_adapter().from_single_response(response, rate_limit)
	}

	/// Verifies up to [`MAX_PRESET_BATCH`] presets in one round trip.
	///
	/// Per-preset failures come back inside the outcome instead of failing the
	/// whole call.
	pub async fn verify_presets<I, S>(
		&self,
		presets: I,
		access_token: &TokenSecret,
	) -> Result<PresetBatchOutcome>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		if access_token.is_empty() {
			return Err(ValidationError::MissingAccessToken.into());
		}

		let presets = presets.into_iter().collect::<Vec<_>>();

		if presets.is_empty() {
			return Err(ValidationError::NoPresets.into());
		}
		if presets.len() > MAX_PRESET_BATCH {
			return Err(ValidationError::TooManyPresets { count: presets.len() }.into());
		}

		let body = VerifyPresetsRequest {
			presets: presets
				.iter()
				.map(|preset| self.scopes().to_wire_name(preset.as_ref()))
				.collect(),
		};
		let connection = self.conn().core(access_token)?;
		let request = connection.post_json(connection.endpoint(&["presets", "batch"])?, &body)?;
		let (response, rate_limit) =
			self.dispatch::<VerifyPresetsResponse>(CallKind::VerifyPresetBatch, request).await?;

		Ok(self.presets_adapter().from_batch_response(response, rate_limit))
	}
}
