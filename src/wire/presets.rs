//! Preset verification wire contracts.

// self
use crate::_prelude::*;

/// Verification state of a preset result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetStatus {
	/// Credential exists and has not expired.
	Valid,
	/// Credential exists but has expired.
	Expired,
	/// Verification is still in progress.
	Pending,
	/// No credential backs this preset.
	Unavailable,
}
impl PresetStatus {
	/// Wire representation.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Valid => "valid",
			Self::Expired => "expired",
			Self::Pending => "pending",
			Self::Unavailable => "unavailable",
		}
	}
}
impl Display for PresetStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// JSON body POSTed to the preset batch endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerifyPresetsRequest {
	/// Wire names of the presets to verify.
	pub presets: Vec<String>,
}

/// One verified preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetResult {
	/// Wire name the result answers for.
	pub preset: String,
	/// Verified value; shape depends on the preset kind.
	pub value: JsonValue,
	/// Verification state.
	pub status: PresetStatus,
	/// Credential expiry instant.
	#[serde(with = "time::serde::rfc3339")]
	pub expires_at: OffsetDateTime,
	/// Instant the credential was verified.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub verified_at: Option<OffsetDateTime>,
	/// Evidence attached by the verifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub evidence: Option<JsonMap>,
}

/// Failure detail for one preset in a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetError {
	/// Short error name.
	pub error: String,
	/// Stable machine-readable code, `E4042` and friends.
	pub error_code: String,
	/// Human-readable explanation.
	pub error_description: String,
	/// Finer-grained code, when the server distinguishes one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_subcode: Option<String>,
	/// Structured context attached by the server.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub context: Option<JsonMap>,
}

/// Preset paired with the error it produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetErrorEntry {
	/// Wire name of the failed preset.
	pub preset: String,
	/// Failure detail.
	pub error: PresetError,
}

/// Preset verification response, single and batch alike.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyPresetsResponse {
	/// Successfully verified presets.
	#[serde(default)]
	pub results: Vec<PresetResult>,
	/// Presets that failed, paired with their errors.
	#[serde(default)]
	pub errors: Vec<PresetErrorEntry>,
}
