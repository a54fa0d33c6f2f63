use crate::error::StoreError;
use crate::model::UrlMapping;
use crate::utils::generate_short_code;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory map of short codes to url mappings, shared between handlers.
///
/// Backed by a sharded `DashMap`, so lookups and clicks on different codes do
/// not contend. Cloning the store hands out another reference to the same map.
#[derive(Clone, Default)]
pub struct UrlStore {
    mappings: Arc<DashMap<String, UrlMapping>>,
}

impl UrlStore {
    pub fn new() -> Self {
        Self {
            mappings: Arc::new(DashMap::new()),
        }
    }

    pub fn add_mapping(
        &self,
        short_code: &str,
        original_url: &str,
    ) -> Result<UrlMapping, StoreError> {
        match self.mappings.entry(short_code.to_string()) {
            Entry::Occupied(_) => Err(StoreError::CodeTaken(short_code.to_string())),
            Entry::Vacant(entry) => {
                let mapping = UrlMapping::new(short_code.to_string(), original_url.to_string());
                Ok(entry.insert(mapping).value().clone())
            }
        }
    }

    /// Stores `original_url` under the first generated code that is not taken yet.
    ///
    /// The vacancy check and the insert happen under the same shard lock, so two
    /// callers can never be handed the same code.
    pub fn create_mapping(
        &self,
        original_url: &str,
        code_length: usize,
        max_attempts: u32,
    ) -> Result<UrlMapping, StoreError> {
        for attempt in 1..=max_attempts {
            let short_code = generate_short_code(code_length);
            if let Entry::Vacant(entry) = self.mappings.entry(short_code) {
                let mapping = UrlMapping::new(entry.key().clone(), original_url.to_string());
                if attempt > 1 {
                    tracing::debug!("Found free short code after {} attempts", attempt);
                }
                return Ok(entry.insert(mapping).value().clone());
            }
        }
        Err(StoreError::CodeSpaceExhausted(max_attempts))
    }

    pub fn get_mapping(&self, short_code: &str) -> Option<UrlMapping> {
        self.mappings
            .get(short_code)
            .map(|mapping| mapping.value().clone())
    }

    pub fn increment_clicks(&self, short_code: &str) -> bool {
        self.record_click(short_code).is_some()
    }

    /// Counts a click and returns the updated mapping, `None` for unknown codes.
    pub fn record_click(&self, short_code: &str) -> Option<UrlMapping> {
        let mut mapping = self.mappings.get_mut(short_code)?;
        mapping.click_count = mapping.click_count.saturating_add(1);
        Some(mapping.value().clone())
    }

    pub fn code_exists(&self, short_code: &str) -> bool {
        self.mappings.contains_key(short_code)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn added_mapping_starts_without_clicks() {
        let store = UrlStore::new();
        let mapping = store.add_mapping("abc123", "https://example.com").unwrap();
        assert_eq!(mapping.short_code, "abc123");
        assert_eq!(mapping.original_url, "https://example.com");
        assert_eq!(mapping.click_count, 0);
        assert_eq!(store.get_mapping("abc123"), Some(mapping));
    }

    #[test]
    fn duplicate_code_is_rejected_and_original_kept() {
        let store = UrlStore::new();
        store.add_mapping("abc123", "https://example.com").unwrap();
        assert_eq!(
            store.add_mapping("abc123", "https://other.com"),
            Err(StoreError::CodeTaken("abc123".to_string()))
        );
        assert_eq!(
            store.get_mapping("abc123").unwrap().original_url,
            "https://example.com"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_codes_are_absent() {
        let store = UrlStore::new();
        assert!(store.is_empty());
        assert!(!store.code_exists("nope"));
        assert_eq!(store.get_mapping("nope"), None);
        assert!(!store.increment_clicks("nope"));
        assert_eq!(store.record_click("nope"), None);
    }

    #[test]
    fn clicks_are_counted_without_touching_creation_time() {
        let store = UrlStore::new();
        let created = store.add_mapping("abc123", "https://example.com").unwrap();
        assert!(store.increment_clicks("abc123"));
        let after = store.record_click("abc123").unwrap();
        assert_eq!(after.click_count, 2);
        assert_eq!(after.created_at, created.created_at);
        assert_eq!(store.get_mapping("abc123").unwrap().click_count, 2);
    }

    #[test]
    fn created_mappings_get_distinct_codes() {
        let store = UrlStore::new();
        let codes: HashSet<String> = (0..200)
            .map(|_| {
                store
                    .create_mapping("https://example.com", 6, 100)
                    .unwrap()
                    .short_code
            })
            .collect();
        assert_eq!(codes.len(), 200);
        assert_eq!(store.len(), 200);
        assert!(codes.iter().all(|code| code.len() == 6 && store.code_exists(code)));
    }

    #[test]
    fn create_mapping_fails_when_code_space_is_full() {
        let store = UrlStore::new();
        for c in ('0'..='9').chain('A'..='Z').chain('a'..='z') {
            store.add_mapping(&c.to_string(), "https://example.com").unwrap();
        }
        assert_eq!(
            store.create_mapping("https://example.com", 1, 50),
            Err(StoreError::CodeSpaceExhausted(50))
        );
        assert_eq!(store.len(), 62);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_clicks_are_all_counted() {
        let store = UrlStore::new();
        store.add_mapping("abc123", "https://example.com").unwrap();
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    for _ in 0..250 {
                        store.record_click("abc123");
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.get_mapping("abc123").unwrap().click_count, 2000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creation_never_reuses_a_code() {
        let store = UrlStore::new();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    (0..100)
                        .map(|_| {
                            store
                                .create_mapping(&format!("https://example{i}.com"), 4, 100)
                                .unwrap()
                                .short_code
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let mut codes = HashSet::new();
        for task in tasks {
            codes.extend(task.await.unwrap());
        }
        assert_eq!(codes.len(), 800);
        assert_eq!(store.len(), 800);
    }
}
