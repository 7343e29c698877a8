//! Infrastructure layer - Persistence, external collaborators and services

pub mod account;
pub mod advice;
pub mod appointment;
pub mod auth;
pub mod completion;
pub mod doctor;
pub mod geocoding;
pub mod http_client;
pub mod logging;
pub mod observability;
pub mod patient;
pub mod storage;
