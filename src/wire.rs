//! Wire-format contracts of the Humanity API.
//!
//! Requests serialize to the JSON bodies the API expects; responses mirror
//! the documented payloads and tolerate the optional fields deployments are
//! known to omit.

pub mod discovery;
pub use discovery::*;

pub mod health;
pub use health::*;

pub mod oauth;
pub use oauth::*;

pub mod presets;
pub use presets::*;

pub mod status;
pub use status::*;
