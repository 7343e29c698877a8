//! Authentication infrastructure
//!
//! Argon2 password hashing and HS256 JWT issuing for patients and doctors.

mod jwt;
mod password;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
pub use password::{Argon2Hasher, PasswordHasher};
