//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `humanity_sdk.call` with the `call`
//!   (operation) and `path` (request path) fields.
//! - Enable `metrics` to increment the `humanity_sdk_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// API operations observed by the SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Authorization-code exchange at the token endpoint.
	TokenExchange,
	/// Refresh-token rotation at the token endpoint.
	TokenRefresh,
	/// Server-to-server user token issuance.
	ClientUserToken,
	/// Token or authorization revocation.
	TokenRevoke,
	/// Single-preset verification.
	VerifyPreset,
	/// Batch preset verification.
	VerifyPresetBatch,
	/// Credential update polling.
	PollCredentials,
	/// Authorization update polling.
	PollAuthorizations,
	/// Discovery document fetch.
	Discovery,
	/// Liveness probe.
	Healthcheck,
	/// Readiness probe.
	Readiness,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenExchange => "token_exchange",
			CallKind::TokenRefresh => "token_refresh",
			CallKind::ClientUserToken => "client_user_token",
			CallKind::TokenRevoke => "token_revoke",
			CallKind::VerifyPreset => "verify_preset",
			CallKind::VerifyPresetBatch => "verify_preset_batch",
			CallKind::PollCredentials => "poll_credentials",
			CallKind::PollAuthorizations => "poll_authorizations",
			CallKind::Discovery => "discovery",
			CallKind::Healthcheck => "healthcheck",
			CallKind::Readiness => "readiness",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to an SDK operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
