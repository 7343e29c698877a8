//! Cached advice and free chat

mod chat;
mod postgres_repository;
mod repository;
mod service;

pub use chat::ChatService;
pub use postgres_repository::{AdviceTable, PostgresAdviceStore};
pub use repository::InMemoryAdviceStore;
pub use service::{AdviceConfig, AdviceService};
