//! `tonecart-auth` — bearer-token boundary.
//!
//! Session issuance lives in an external auth service; this crate only
//! models claims and verifies tokens presented to the order core.

pub mod claims;
pub mod jwt;
pub mod roles;

pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use jwt::{AuthError, Hs256JwtValidator, JwtValidator};
pub use roles::Role;
