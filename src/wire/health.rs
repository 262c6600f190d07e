//! Liveness and readiness wire contracts.

// self
use crate::_prelude::*;

/// Liveness probe response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LivenessResponse {
	/// Literal `ok` while the process is up.
	pub status: String,
	/// Process uptime in seconds.
	pub uptime: f64,
	/// Deployed version string.
	pub version: String,
	/// Deployed commit hash; `null` outside release builds.
	pub commit: Option<String>,
	/// Instant the probe answered.
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}

/// Overall readiness verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
	/// All checks passed.
	Ready,
	/// At least one check failed.
	NotReady,
}
impl ReadinessStatus {
	/// Wire representation.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Ready => "ready",
			Self::NotReady => "not_ready",
		}
	}
}
impl Display for ReadinessStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One readiness check result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadinessCheck {
	/// Check name, e.g. `database`.
	pub name: String,
	/// Whether the check passed.
	pub ok: bool,
	/// Structured detail attached by the probe.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<JsonValue>,
}

/// Readiness probe response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResponse {
	/// Overall verdict.
	pub status: ReadinessStatus,
	/// Individual check results.
	#[serde(default)]
	pub checks: Vec<ReadinessCheck>,
}
