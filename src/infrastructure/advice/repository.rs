//! In-memory advice store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{AdviceEntry, AdviceStore, DomainError, MatchPolicy};

/// Append-only in-memory store; entries keep insertion order
#[derive(Debug, Default)]
pub struct InMemoryAdviceStore {
    entries: Arc<RwLock<Vec<AdviceEntry>>>,
}

impl InMemoryAdviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl AdviceStore for InMemoryAdviceStore {
    async fn find(
        &self,
        query: &str,
        policy: MatchPolicy,
    ) -> Result<Option<AdviceEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|entry| policy.matches(&entry.key, query))
            .cloned())
    }

    async fn insert(&self, mut entry: AdviceEntry) -> Result<AdviceEntry, DomainError> {
        let mut entries = self.entries.write().await;
        entry.id = entries.len() as i64 + 1;
        entries.push(entry.clone());
        Ok(entry)
    }
}
