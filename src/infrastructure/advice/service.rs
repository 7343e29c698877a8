//! Lookup-or-fetch advice service
//!
//! A query is answered from the store when a matching entry exists; otherwise
//! the completer is asked and its answer is persisted before returning.
//! Lookups for the same key are serialized, so concurrent misses in one
//! process produce a single completion and a single insert.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::domain::{
    Advice, AdviceEntry, AdviceStore, DomainError, MatchPolicy, TextCompleter,
};
use crate::infrastructure::observability::record_advice_lookup;

const KEY_PLACEHOLDER: &str = "{key}";

const HEALTH_PERSONA: &str = "You are an expert doctor. Always reply only in English. \
    Solve the user's health problem in a maximum of 50 words. Be precise, empathetic, and \
    solution-oriented. Do not add unnecessary details, focus only on direct and helpful \
    medical advice.";

const MEDICINE_PERSONA: &str = "You are an expert medicine adviser. Always reply only in \
    English. Provide safe and practical medicine or home remedy suggestions in a maximum of \
    50 words. Keep the tone helpful, avoid long explanations, and never suggest harmful or \
    unsafe treatments. If the symptom is unclear or not health-related, politely inform the \
    user that you can only assist with health-related queries.";

/// Per-site behaviour of the advice service
#[derive(Debug, Clone)]
pub struct AdviceConfig {
    /// Label used in logs and metrics
    pub site: &'static str,
    pub policy: MatchPolicy,
    pub system_instruction: String,
    /// Prompt sent on a miss; `{key}` is replaced by the query
    pub prompt_template: String,
}

impl AdviceConfig {
    /// Free-form health questions, matched exactly
    pub fn health() -> Self {
        Self {
            site: "health",
            policy: MatchPolicy::Exact,
            system_instruction: HEALTH_PERSONA.to_string(),
            prompt_template: KEY_PLACEHOLDER.to_string(),
        }
    }

    /// Symptom lookups for remedies, matched by containment
    pub fn medicine() -> Self {
        Self {
            site: "medicine",
            policy: MatchPolicy::Contains,
            system_instruction: MEDICINE_PERSONA.to_string(),
            prompt_template: format!("Suggest remedies for {}", KEY_PLACEHOLDER),
        }
    }

    pub fn prompt_for(&self, key: &str) -> String {
        self.prompt_template.replace(KEY_PLACEHOLDER, key)
    }
}

type KeyLocks = Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>;

/// A claim on one key's lock. Dropping it, on completion or cancellation,
/// removes the table entry once no other request holds or awaits the lock.
struct KeySlot<'a> {
    locks: &'a KeyLocks,
    key: String,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for KeySlot<'_> {
    fn drop(&mut self) {
        let Ok(mut locks) = self.locks.lock() else {
            return;
        };

        // One reference in the table, one held here
        let idle = locks
            .get(&self.key)
            .is_some_and(|current| Arc::ptr_eq(current, &self.lock))
            && Arc::strong_count(&self.lock) <= 2;

        if idle {
            locks.remove(&self.key);
        }
    }
}

#[derive(Debug)]
pub struct AdviceService {
    config: AdviceConfig,
    store: Arc<dyn AdviceStore>,
    completer: Arc<dyn TextCompleter>,
    locks: KeyLocks,
}

impl AdviceService {
    pub fn new(
        config: AdviceConfig,
        store: Arc<dyn AdviceStore>,
        completer: Arc<dyn TextCompleter>,
    ) -> Self {
        Self {
            config,
            store,
            completer,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &AdviceConfig {
        &self.config
    }

    /// Answer `key`, from the store when possible.
    ///
    /// Blank keys are rejected before touching the store or the completer.
    /// A completer failure is returned as-is and nothing is stored.
    pub async fn answer(&self, key: &str, asked_by: Option<i64>) -> Result<Advice, DomainError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::invalid_input("Query cannot be empty"));
        }

        let site = self.config.site;
        let result = {
            let slot = self.lock_for(key)?;
            let _guard = slot.lock.lock().await;
            self.lookup_or_fetch(key, asked_by).await
        };

        match &result {
            Ok(advice) => record_advice_lookup(site, advice.source.as_str()),
            Err(e) => {
                record_advice_lookup(site, "error");
                warn!(site, error = %e, "Advice lookup failed");
            }
        }

        result
    }

    async fn lookup_or_fetch(&self, key: &str, asked_by: Option<i64>) -> Result<Advice, DomainError> {
        let site = self.config.site;

        if let Some(entry) = self.store.find(key, self.config.policy).await? {
            debug!(site, entry_id = entry.id, "Advice served from store");
            return Ok(Advice::stored(entry.answer));
        }

        let prompt = self.config.prompt_for(key);
        let answer = self
            .completer
            .complete(&prompt, Some(&self.config.system_instruction))
            .await?;

        let entry = self
            .store
            .insert(AdviceEntry::new(key, &answer).asked_by(asked_by))
            .await?;

        info!(
            site,
            entry_id = entry.id,
            provider = self.completer.provider_name(),
            "Generated and stored new advice"
        );

        Ok(Advice::generated(answer))
    }

    /// Keys are compared the way the match policy compares them
    fn lock_key(&self, key: &str) -> String {
        match self.config.policy {
            MatchPolicy::Exact => key.to_string(),
            MatchPolicy::Contains => key.to_lowercase(),
        }
    }

    fn lock_for(&self, key: &str) -> Result<KeySlot<'_>, DomainError> {
        let key = self.lock_key(key);
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| DomainError::internal("Advice lock table poisoned"))?;
        let lock = locks.entry(key.clone()).or_default().clone();

        Ok(KeySlot {
            locks: &self.locks,
            key,
            lock,
        })
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockAdviceStore, MockTextCompleter, Provenance};
    use std::time::Duration;

    fn service(
        config: AdviceConfig,
        store: Arc<MockAdviceStore>,
        completer: Arc<MockTextCompleter>,
    ) -> Arc<AdviceService> {
        Arc::new(AdviceService::new(config, store, completer))
    }

    #[tokio::test]
    async fn test_hit_never_calls_completer() {
        let store = Arc::new(MockAdviceStore::new().with_entry("I have a headache", "Drink water"));
        let completer = Arc::new(MockTextCompleter::new().with_response("unused"));
        let service = service(AdviceConfig::health(), store.clone(), completer.clone());

        let advice = service.answer("I have a headache", None).await.unwrap();

        assert_eq!(advice.answer, "Drink water");
        assert_eq!(advice.source, Provenance::Stored);
        assert_eq!(completer.calls(), 0);
        assert_eq!(store.inserts(), 0);
    }

    #[tokio::test]
    async fn test_miss_generates_and_persists_once() {
        let store = Arc::new(MockAdviceStore::new());
        let completer = Arc::new(MockTextCompleter::new().with_response("Rest and hydrate"));
        let service = service(AdviceConfig::health(), store.clone(), completer.clone());

        let advice = service.answer("I feel tired", Some(4)).await.unwrap();

        assert_eq!(advice.source, Provenance::Generated);
        assert_eq!(advice.answer, "Rest and hydrate");
        assert_eq!(completer.calls(), 1);
        assert_eq!(store.inserts(), 1);

        let entries = store.entries().await;
        assert_eq!(entries[0].key, "I feel tired");
        assert_eq!(entries[0].asked_by, Some(4));

        let again = service.answer("I feel tired", None).await.unwrap();
        assert_eq!(again.source, Provenance::Stored);
        assert_eq!(completer.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_and_persona_per_site() {
        let store = Arc::new(MockAdviceStore::new());
        let completer = Arc::new(MockTextCompleter::new().with_response("Ginger tea"));
        let service = service(AdviceConfig::medicine(), store, completer.clone());

        service.answer("cough", None).await.unwrap();

        let (prompt, system) = completer.last_request().unwrap();
        assert_eq!(prompt, "Suggest remedies for cough");
        assert!(system.unwrap().starts_with("You are an expert medicine adviser"));
    }

    #[tokio::test]
    async fn test_completer_failure_persists_nothing() {
        let store = Arc::new(MockAdviceStore::new());
        let completer = Arc::new(MockTextCompleter::new().with_error("quota exceeded"));
        let service = service(AdviceConfig::health(), store.clone(), completer);

        let err = service.answer("I have a rash", None).await.unwrap_err();

        assert!(matches!(err, DomainError::CompletionFailed { .. }));
        assert_eq!(store.inserts(), 0);
        assert!(store.entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_key_touches_nothing() {
        let store = Arc::new(MockAdviceStore::new());
        let completer = Arc::new(MockTextCompleter::new().with_response("unused"));
        let service = service(AdviceConfig::medicine(), store.clone(), completer.clone());

        for blank in ["", "   ", "\n\t"] {
            let err = service.answer(blank, None).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput { .. }));
        }

        assert_eq!(store.finds(), 0);
        assert_eq!(completer.calls(), 0);
    }

    #[tokio::test]
    async fn test_insert_failure_is_reported() {
        let store = Arc::new(MockAdviceStore::new().failing_inserts());
        let completer = Arc::new(MockTextCompleter::new().with_response("answer"));
        let service = service(AdviceConfig::health(), store, completer);

        let err = service.answer("question", None).await.unwrap_err();
        assert!(matches!(err, DomainError::StorageFailed { .. }));
    }

    #[tokio::test]
    async fn test_contains_policy_matches_longer_query() {
        let store = Arc::new(MockAdviceStore::new().with_entry("fever", "Paracetamol and rest"));
        let completer = Arc::new(MockTextCompleter::new().with_response("unused"));
        let service = service(AdviceConfig::medicine(), store, completer.clone());

        let advice = service.answer("mild fever and chills", None).await.unwrap();

        assert_eq!(advice.source, Provenance::Stored);
        assert_eq!(advice.answer, "Paracetamol and rest");
        assert_eq!(completer.calls(), 0);
    }

    #[tokio::test]
    async fn test_exact_policy_misses_longer_query() {
        let store = Arc::new(MockAdviceStore::new().with_entry("fever", "stored"));
        let completer = Arc::new(MockTextCompleter::new().with_response("generated"));
        let service = service(AdviceConfig::health(), store, completer.clone());

        let advice = service.answer("mild fever and chills", None).await.unwrap();

        assert_eq!(advice.source, Provenance::Generated);
        assert_eq!(completer.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_fetch_once() {
        let store = Arc::new(MockAdviceStore::new());
        let completer = Arc::new(
            MockTextCompleter::new()
                .with_response("Stay hydrated")
                .with_delay(Duration::from_millis(50)),
        );
        let service = service(AdviceConfig::health(), store.clone(), completer.clone());

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.answer("dehydration", None).await })
            })
            .collect();

        let mut generated = 0;
        for handle in handles {
            let advice = handle.await.unwrap().unwrap();
            assert_eq!(advice.answer, "Stay hydrated");
            if advice.source == Provenance::Generated {
                generated += 1;
            }
        }

        assert_eq!(generated, 1);
        assert_eq!(completer.calls(), 1);
        assert_eq!(store.inserts(), 1);
        assert_eq!(service.tracked_keys(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_lookups_release_their_keys() {
        let store = Arc::new(MockAdviceStore::new());
        let completer = Arc::new(
            MockTextCompleter::new()
                .with_response("late answer")
                .with_delay(Duration::from_millis(200)),
        );
        let service = service(AdviceConfig::health(), store.clone(), completer.clone());

        for i in 0..3 {
            let question = format!("question {}", i);
            let result =
                tokio::time::timeout(Duration::from_millis(10), service.answer(&question, None))
                    .await;
            assert!(result.is_err());
        }

        assert_eq!(completer.calls(), 3);
        assert_eq!(store.inserts(), 0);
        assert_eq!(service.tracked_keys(), 0);
    }

    #[tokio::test]
    async fn test_keys_are_trimmed() {
        let store = Arc::new(MockAdviceStore::new());
        let completer = Arc::new(MockTextCompleter::new().with_response("answer"));
        let service = service(AdviceConfig::health(), store.clone(), completer.clone());

        service.answer("  back pain  ", None).await.unwrap();
        let advice = service.answer("back pain", None).await.unwrap();

        assert_eq!(advice.source, Provenance::Stored);
        assert_eq!(store.entries().await[0].key, "back pain");
    }
}
