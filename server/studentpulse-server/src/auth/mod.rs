//! Authentication support

pub mod tokens;

pub use tokens::{TokenClaims, TokenService};
