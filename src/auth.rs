//! Grant records and the secret material inside them.

pub mod grant;
pub use grant::*;

pub mod secret;
pub use secret::*;
