//! PKCE verifier and challenge helpers (RFC 7636, S256 only).

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, error::ValidationError};

/// Shortest verifier RFC 7636 allows.
pub const MIN_CODE_VERIFIER_LENGTH: usize = 43;
/// Longest verifier RFC 7636 allows.
pub const MAX_CODE_VERIFIER_LENGTH: usize = 128;
/// Verifier length used when the caller does not choose one.
pub const DEFAULT_CODE_VERIFIER_LENGTH: usize = 64;

/// Generates a cryptographically random, URL-safe code verifier of exactly
/// `length` characters.
pub fn generate_code_verifier(length: usize) -> Result<String> {
	if !(MIN_CODE_VERIFIER_LENGTH..=MAX_CODE_VERIFIER_LENGTH).contains(&length) {
		return Err(ValidationError::CodeVerifierLength { length }.into());
	}

	// Encoding expands 3 bytes into 4 characters; over-provision and trim.
	let mut bytes = vec![0_u8; (length * 3).div_ceil(4)];

	rand::rng().fill_bytes(&mut bytes);

	let mut verifier = URL_SAFE_NO_PAD.encode(bytes);

	verifier.truncate(length);

	Ok(verifier)
}

/// Derives the S256 code challenge for a verifier.
pub fn derive_code_challenge(verifier: &str) -> Result<String> {
	if verifier.is_empty() {
		return Err(ValidationError::EmptyCodeVerifier.into());
	}

	Ok(URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes())))
}

/// Generates an opaque `state` value for an authorization request.
///
/// Lengths below the verifier minimum are raised to it.
pub fn generate_state(length: usize) -> Result<String> {
	generate_code_verifier(length.max(MIN_CODE_VERIFIER_LENGTH))
}

/// Generates an OpenID Connect `nonce` value.
pub fn generate_nonce(length: usize) -> Result<String> {
	generate_code_verifier(length.max(MIN_CODE_VERIFIER_LENGTH))
}

/// Compares an expected `state` against the value echoed on the redirect.
///
/// Empty or missing values never verify.
pub fn verify_state(expected: &str, received: Option<&str>) -> bool {
	match received {
		Some(received) => !expected.is_empty() && !received.is_empty() && expected == received,
		None => false,
	}
}

/// Compares an expected `nonce` against the value carried in the ID token.
pub fn verify_nonce(expected: &str, received: Option<&str>) -> bool {
	verify_state(expected, received)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn verifier_has_requested_length_and_charset() {
		for length in [MIN_CODE_VERIFIER_LENGTH, DEFAULT_CODE_VERIFIER_LENGTH, MAX_CODE_VERIFIER_LENGTH] {
			let verifier =
				generate_code_verifier(length).expect("Verifier should generate successfully.");

			assert_eq!(verifier.len(), length);
			assert!(
				verifier
					.chars()
					.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
			);
		}
	}

	#[test]
	fn out_of_range_lengths_are_rejected() {
		assert!(matches!(
			generate_code_verifier(42),
			Err(Error::Validation(ValidationError::CodeVerifierLength { length: 42 })),
		));
		assert!(matches!(
			generate_code_verifier(129),
			Err(Error::Validation(ValidationError::CodeVerifierLength { length: 129 })),
		));
	}

	#[test]
	fn challenge_matches_rfc_7636_vector() {
		let challenge = derive_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk")
			.expect("Challenge should derive successfully.");

		assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
	}

	#[test]
	fn empty_verifier_cannot_derive_a_challenge() {
		assert!(matches!(
			derive_code_challenge(""),
			Err(Error::Validation(ValidationError::EmptyCodeVerifier)),
		));
	}

	#[test]
	fn short_state_lengths_are_raised_to_the_minimum() {
		let state = generate_state(32).expect("State should generate successfully.");

		assert_eq!(state.len(), MIN_CODE_VERIFIER_LENGTH);
	}

	#[test]
	fn state_verification_requires_matching_non_empty_values() {
		assert!(verify_state("abc", Some("abc")));
		assert!(!verify_state("abc", Some("abd")));
		assert!(!verify_state("abc", None));
		assert!(!verify_state("", Some("")));
		assert!(verify_nonce("n-1", Some("n-1")));
	}
}
