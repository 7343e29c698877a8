//! Account domain
//!
//! Roles, authenticated principals and registration validation shared by
//! the patient and doctor tables.

mod principal;
mod validation;

pub use principal::{Principal, Role};
pub use validation::{validate_email, validate_name, validate_password, AccountValidationError};
