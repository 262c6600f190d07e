//! Secret wrapper keeping token material out of logs.

// self
use crate::_prelude::*;

/// Redacted wrapper around access tokens, refresh tokens, and client secrets.
///
/// Serializes transparently as the inner string so wire payloads keep their
/// shape, while `Debug`/`Display` render `<redacted>`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the wrapped value is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Consumes the wrapper and returns the inner string.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.into())
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("hp_at_123");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "hp_at_123");
	}

	#[test]
	fn secret_serializes_as_plain_string() {
		let secret = TokenSecret::from("hp_at_123");
		let json = serde_json::to_string(&secret).expect("Secret should serialize successfully.");

		assert_eq!(json, "\"hp_at_123\"");

		let parsed: TokenSecret =
			serde_json::from_str(&json).expect("Secret should deserialize successfully.");

		assert_eq!(parsed, secret);
		assert!(!parsed.is_empty());
		assert!(TokenSecret::default().is_empty());
	}
}
