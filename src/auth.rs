//! Credentials and per-request bearer token derivation.

pub mod jwt;
pub mod key;
pub mod signer;
pub mod token;

pub use jwt::*;
pub use key::*;
pub use signer::*;
pub use token::*;
