//! Bidirectional case conversion between wire names and developer keys.
//!
//! The Humanity API identifies presets with snake_case wire names while the
//! SDK surface uses camelCase developer keys. Both transforms are pure and
//! total; [`camel_to_snake`] additionally folds hyphen/whitespace runs into a
//! single underscore so human-entered identifiers normalize cleanly.

/// Converts a snake_case (or kebab-case) identifier into camelCase.
///
/// A `-` or `_` followed by an ASCII lowercase letter or digit is dropped and
/// the follower is uppercased; any other separator is kept as-is.
pub fn snake_to_camel(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	let mut chars = value.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch == '-' || ch == '_' {
			if let Some(follow) = chars.next_if(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
				out.push(follow.to_ascii_uppercase());

				continue;
			}
		}

		out.push(ch);
	}

	out
}

/// Converts a camelCase identifier into snake_case.
///
/// An underscore is inserted at every lowercase/digit-to-uppercase boundary,
/// hyphen and whitespace runs collapse into a single underscore, and the
/// result is lowercased.
///
/// The transform is not a strict inverse of [`snake_to_camel`] for names
/// carrying a digit right after a separator: `is_18_plus` camelizes to
/// `is18Plus`, which snakes back to `is18_plus`. The preset registry resolves
/// through both index spaces, so such names still round-trip at the lookup
/// level.
pub fn camel_to_snake(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 4);
	let mut prev = None;
	let mut pending_separator = false;

	for ch in value.chars() {
		if ch == '-' || ch.is_whitespace() {
			pending_separator = true;
			prev = Some(ch);

			continue;
		}
		if pending_separator {
			out.push('_');

			pending_separator = false;
		} else if ch.is_ascii_uppercase()
			&& prev.is_some_and(|p: char| p.is_ascii_lowercase() || p.is_ascii_digit())
		{
			out.push('_');
		}

		out.extend(ch.to_lowercase());

		prev = Some(ch);
	}

	if pending_separator {
		out.push('_');
	}

	out
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn snake_to_camel_uppercases_after_separators() {
		assert_eq!(snake_to_camel("is_human"), "isHuman");
		assert_eq!(snake_to_camel("age_gate_alcohol"), "ageGateAlcohol");
		assert_eq!(snake_to_camel("palm-verified"), "palmVerified");
		assert_eq!(snake_to_camel("is_18_plus"), "is18Plus");
	}

	#[test]
	fn snake_to_camel_keeps_unmatched_separators() {
		assert_eq!(snake_to_camel("is__human"), "is_Human");
		assert_eq!(snake_to_camel("is_Human"), "is_Human");
		assert_eq!(snake_to_camel("trailing_"), "trailing_");
		assert_eq!(snake_to_camel(""), "");
	}

	#[test]
	fn camel_to_snake_splits_case_boundaries() {
		assert_eq!(camel_to_snake("isHuman"), "is_human");
		assert_eq!(camel_to_snake("ageGateAlcohol"), "age_gate_alcohol");
		assert_eq!(camel_to_snake("investmentGate"), "investment_gate");
		assert_eq!(camel_to_snake("a1B"), "a1_b");
	}

	#[test]
	fn camel_to_snake_collapses_separator_runs() {
		assert_eq!(camel_to_snake("palm-verified"), "palm_verified");
		assert_eq!(camel_to_snake("Palm Verified"), "palm_verified");
		assert_eq!(camel_to_snake("a - b"), "a_b");
		assert_eq!(camel_to_snake("dangling-"), "dangling_");
	}

	#[test]
	fn round_trip_holds_without_digit_boundaries() {
		for wire in ["is_human", "is_accredited_investor", "palm_verified", "age_gate_gambling"] {
			assert_eq!(camel_to_snake(&snake_to_camel(wire)), wire);
		}
	}

	#[test]
	fn digit_boundaries_are_documented_non_bijective() {
		assert_eq!(snake_to_camel("is_18_plus"), "is18Plus");
		assert_eq!(camel_to_snake("is18Plus"), "is18_plus");
	}
}
