use super::doc_store::DocumentStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = DocumentStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        DocumentStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ResumeDocument, SequentialIds};
    use crate::store::DataStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Seeds the store with a starter document whose ids come from `prefix`.
        pub fn with_saved_template(self, prefix: &str) -> Self {
            let doc = ResumeDocument::template(&mut SequentialIds::new(prefix));
            self.store.save(&doc).unwrap();
            self
        }

        pub fn with_raw(self, data: &str) -> Self {
            let key = self.store.key().to_string();
            self.store.backend().put_raw(&key, data);
            self
        }

        pub fn failing_writes(self) -> Self {
            self.store.backend().set_simulate_write_error(true);
            self
        }
    }
}
