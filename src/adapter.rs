//! Translation layer between wire payloads and developer-facing records.

pub mod presets;
pub use presets::*;

pub mod scopes;
pub use scopes::*;

pub mod status;
pub use status::*;
