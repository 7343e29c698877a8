use async_trait::async_trait;
use std::fmt::Debug;

use super::entry::{AdviceEntry, MatchPolicy};
use crate::domain::DomainError;

/// Persistent key/answer storage backing a cached advice endpoint
#[async_trait]
pub trait AdviceStore: Send + Sync + Debug {
    /// The first stored entry (oldest first) whose key matches `query`
    async fn find(
        &self,
        query: &str,
        policy: MatchPolicy,
    ) -> Result<Option<AdviceEntry>, DomainError>;

    /// Plain insert; duplicates of an existing key are allowed
    async fn insert(&self, entry: AdviceEntry) -> Result<AdviceEntry, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// Store double that records how it was used
    #[derive(Debug, Default)]
    pub struct MockAdviceStore {
        entries: RwLock<Vec<AdviceEntry>>,
        finds: AtomicUsize,
        inserts: AtomicUsize,
        fail_inserts: bool,
    }

    impl MockAdviceStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry(mut self, key: &str, answer: &str) -> Self {
            let entries = self.entries.get_mut();
            let mut entry = AdviceEntry::new(key, answer);
            entry.id = entries.len() as i64 + 1;
            entries.push(entry);
            self
        }

        pub fn failing_inserts(mut self) -> Self {
            self.fail_inserts = true;
            self
        }

        pub fn finds(&self) -> usize {
            self.finds.load(Ordering::SeqCst)
        }

        pub fn inserts(&self) -> usize {
            self.inserts.load(Ordering::SeqCst)
        }

        pub async fn entries(&self) -> Vec<AdviceEntry> {
            self.entries.read().await.clone()
        }
    }

    #[async_trait]
    impl AdviceStore for MockAdviceStore {
        async fn find(
            &self,
            query: &str,
            policy: MatchPolicy,
        ) -> Result<Option<AdviceEntry>, DomainError> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            let entries = self.entries.read().await;
            Ok(entries.iter().find(|e| policy.matches(&e.key, query)).cloned())
        }

        async fn insert(&self, mut entry: AdviceEntry) -> Result<AdviceEntry, DomainError> {
            if self.fail_inserts {
                return Err(DomainError::storage("Mock store configured to fail"));
            }

            self.inserts.fetch_add(1, Ordering::SeqCst);
            let mut entries = self.entries.write().await;
            entry.id = entries.len() as i64 + 1;
            entries.push(entry.clone());
            Ok(entry)
        }
    }
}
