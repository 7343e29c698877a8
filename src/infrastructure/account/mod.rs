//! Account registration and login across the patient and doctor tables

mod service;

pub use service::{AccountService, RegisterRequest};
