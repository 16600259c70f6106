use parking_lot::RwLock;

use crate::{
    autocomplete::{normalize_word, Trie},
    store::Store,
};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    #[error("word is empty")]
    Empty,
    #[error("word already exists")]
    Duplicate,
}

/// Word list and the trie built over it. Every index held by a trie node
/// is a valid position in `words`.
struct State {
    words: Vec<String>,
    trie: Trie,
}

impl State {
    /// Append a normalized word to the word list and index it.
    fn push(&mut self, word: String) -> Result<usize, InsertError> {
        if word.is_empty() {
            return Err(InsertError::Empty);
        }
        if self.words.iter().any(|w| *w == word) {
            return Err(InsertError::Duplicate);
        }

        let idx = self.words.len();
        self.trie.insert(&word, idx);
        debug_assert!(self.trie.contains(&word));
        self.words.push(word);
        Ok(idx)
    }
}

/// Prefix index over an append-only vocabulary, persisted through a `Store`.
pub struct PrefixIndex {
    state: RwLock<State>,
    store: Box<dyn Store>,
}

impl PrefixIndex {
    /// Load the word list from the store and build the trie over it.
    /// A missing or unreadable store starts an empty index.
    pub fn open(store: impl Store + 'static) -> Self {
        let words: Vec<String> = match store.load() {
            Ok(Some(words)) => words.iter().map(|w| w.to_lowercase()).collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("error loading word store, starting empty: {}", e);
                Vec::new()
            }
        };

        let mut trie = Trie::new();
        for (idx, w) in words.iter().enumerate() {
            trie.insert(w, idx);
        }

        log::info!(
            "loaded {} words ({} trie nodes)",
            words.len(),
            trie.num_nodes()
        );

        Self {
            state: RwLock::new(State { words, trie }),
            store: Box::new(store),
        }
    }

    /// Insert a word and return its word-list index.
    ///
    /// The word is trimmed and lowercased first. The full word list is written
    /// to the store on success; a failed write is logged but does not fail the
    /// insert.
    pub fn try_insert(&self, raw: &str) -> Result<usize, InsertError> {
        let mut st = self.state.write();
        let idx = st.push(normalize_word(raw))?;
        self.persist(&st.words);
        Ok(idx)
    }

    /// Insert many words under a single write lock and persist once at the
    /// end. Returns the number of words inserted and skipped.
    pub fn insert_batch<I, S>(&self, words: I) -> (usize, usize)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut st = self.state.write();
        let (mut inserted, mut skipped) = (0, 0);
        for w in words {
            match st.push(normalize_word(w.as_ref())) {
                Ok(_) => inserted += 1,
                Err(_) => skipped += 1,
            }
        }

        if inserted > 0 {
            self.persist(&st.words);
        }
        (inserted, skipped)
    }

    /// Insert a word. Returns false if it is empty or already present.
    pub fn insert(&self, raw: &str) -> bool {
        self.try_insert(raw).is_ok()
    }

    /// Words starting with `prefix`, in the order they were first inserted.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize_word(prefix);

        let st = self.state.read();
        st.trie
            .lookup(&prefix)
            .into_iter()
            .map(|i| st.words[i].clone())
            .collect()
    }

    fn persist(&self, words: &[String]) {
        if let Err(e) = self.store.save(words) {
            log::error!(
                "error persisting word list ({} words), insert kept in memory only: {}",
                words.len(),
                e
            );
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_nodes(&self) -> usize {
        self.state.read().trie.num_nodes()
    }

    /// Snapshot of the word list in insertion order.
    pub fn words(&self) -> Vec<String> {
        self.state.read().words.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc, thread};

    use parking_lot::Mutex;

    use super::*;
    use crate::store::{JsonStore, StoreError};

    /// In-memory store that records every save.
    #[derive(Clone, Default)]
    struct MemStore {
        saved: Arc<Mutex<Option<Vec<String>>>>,
    }

    impl Store for MemStore {
        fn load(&self) -> Result<Option<Vec<String>>, StoreError> {
            Ok(self.saved.lock().clone())
        }

        fn save(&self, words: &[String]) -> Result<(), StoreError> {
            *self.saved.lock() = Some(words.to_vec());
            Ok(())
        }
    }

    struct FailingStore;

    impl Store for FailingStore {
        fn load(&self) -> Result<Option<Vec<String>>, StoreError> {
            Err(StoreError::NotAnArray)
        }

        fn save(&self, _words: &[String]) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    fn new_index() -> PrefixIndex {
        PrefixIndex::open(MemStore::default())
    }

    #[test]
    fn insert_then_query_is_case_insensitive() {
        let idx = new_index();
        assert!(idx.insert("Apple"));

        let res = idx.autocomplete("app");
        assert_eq!(res, vec!["apple"]);
        assert_eq!(idx.autocomplete("APP"), res);
        assert_eq!(idx.autocomplete("  aPp "), res);
    }

    #[test]
    fn duplicate_is_rejected() {
        let idx = new_index();
        assert!(idx.insert("cat"));
        assert!(!idx.insert("CAT"));
        assert!(!idx.insert("  cat  "));
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.try_insert("Cat"), Err(InsertError::Duplicate));
    }

    #[test]
    fn empty_and_whitespace_are_rejected() {
        let idx = new_index();
        assert!(!idx.insert(""));
        assert!(!idx.insert("   "));
        assert_eq!(idx.try_insert("\t\n"), Err(InsertError::Empty));
        assert!(idx.is_empty());
        assert_eq!(idx.num_nodes(), 1);
    }

    #[test]
    fn try_insert_returns_next_index() {
        let idx = new_index();
        assert_eq!(idx.try_insert("one"), Ok(0));
        assert_eq!(idx.try_insert("two"), Ok(1));
        assert_eq!(idx.try_insert("one"), Err(InsertError::Duplicate));
        assert_eq!(idx.try_insert("three"), Ok(2));
    }

    #[test]
    fn no_match_is_empty() {
        let idx = new_index();
        idx.insert("cat");
        idx.insert("dog");
        assert!(idx.autocomplete("xyz").is_empty());
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        let idx = new_index();
        idx.insert("cat");
        assert!(idx.autocomplete("").is_empty());
        assert!(idx.autocomplete("   ").is_empty());
    }

    #[test]
    fn results_follow_insertion_order() {
        let idx = new_index();
        for w in ["ad", "ab", "ac", "b"] {
            assert!(idx.insert(w));
        }
        assert_eq!(idx.autocomplete("a"), vec!["ad", "ab", "ac"]);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let idx = new_index();
        for w in ["car", "cart", "carbon", "cat"] {
            idx.insert(w);
        }
        assert_eq!(idx.autocomplete("ca"), idx.autocomplete("ca"));
    }

    #[test]
    fn longer_prefix_is_subset() {
        let idx = new_index();
        for w in ["interstellar", "internet", "interval", "into", "in"] {
            idx.insert(w);
        }

        let short = idx.autocomplete("int");
        let long = idx.autocomplete("inter");
        assert!(long.iter().all(|w| short.contains(w)));
        assert_eq!(long, vec!["interstellar", "internet", "interval"]);
        assert_eq!(short.len(), 4);
    }

    #[test]
    fn every_insert_is_saved() {
        let store = MemStore::default();
        let idx = PrefixIndex::open(store.clone());

        idx.insert("b");
        idx.insert("a");
        idx.insert("B");
        assert_eq!(
            *store.saved.lock(),
            Some(vec!["b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn batch_insert_applies_insert_rules() {
        let store = MemStore::default();
        let idx = PrefixIndex::open(store.clone());

        let (inserted, skipped) = idx.insert_batch(["Ab", "ac", "", "AB", "  ad "]);
        assert_eq!((inserted, skipped), (3, 2));
        assert_eq!(idx.autocomplete("a"), vec!["ab", "ac", "ad"]);
        assert_eq!(
            *store.saved.lock(),
            Some(vec!["ab".to_string(), "ac".to_string(), "ad".to_string()])
        );
    }

    #[test]
    fn batch_without_inserts_does_not_save() {
        let store = MemStore::default();
        let idx = PrefixIndex::open(store.clone());
        assert_eq!(idx.insert_batch(Vec::<String>::new()), (0, 0));
        assert_eq!(idx.insert_batch(["", "   "]), (0, 2));
        assert!(store.saved.lock().is_none());
    }

    #[test]
    fn failed_save_still_succeeds() {
        let idx = PrefixIndex::open(FailingStore);
        assert!(idx.is_empty());
        assert!(idx.insert("kept"));
        assert_eq!(idx.autocomplete("ke"), vec!["kept"]);
    }

    #[test]
    fn load_lowercases_and_keeps_duplicates() {
        let store = MemStore::default();
        *store.saved.lock() = Some(vec![
            "Apple".to_string(),
            "apple".to_string(),
            "Apricot".to_string(),
        ]);

        let idx = PrefixIndex::open(store);
        assert_eq!(idx.words(), vec!["apple", "apple", "apricot"]);
        assert_eq!(idx.autocomplete("ap"), vec!["apple", "apple", "apricot"]);
        assert!(!idx.insert("APPLE"));
    }

    #[test]
    fn reopen_gives_same_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let words = ["Banana", "band", "bandwidth", "bank", "Apple", "ape"];

        let before = {
            let idx = PrefixIndex::open(JsonStore::new(&path));
            for w in words {
                assert!(idx.insert(w));
            }
            ["", "a", "ap", "b", "ban", "band", "bank", "z"].map(|p| idx.autocomplete(p))
        };

        let idx = PrefixIndex::open(JsonStore::new(&path));
        assert_eq!(idx.len(), words.len());
        let after = ["", "a", "ap", "b", "ban", "band", "bank", "z"].map(|p| idx.autocomplete(p));
        assert_eq!(before, after);
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "not json").unwrap();

        let idx = PrefixIndex::open(JsonStore::new(&path));
        assert!(idx.is_empty());

        // The next insert replaces the corrupt file.
        assert!(idx.insert("fresh"));
        let idx = PrefixIndex::open(JsonStore::new(&path));
        assert_eq!(idx.words(), vec!["fresh"]);
    }

    #[test]
    fn null_entries_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"["Nope", null, true]"#).unwrap();

        let idx = PrefixIndex::open(JsonStore::new(&path));
        assert_eq!(idx.words(), vec!["nope", "none", "true"]);
        assert_eq!(idx.autocomplete("no"), vec!["nope", "none"]);
    }

    #[test]
    fn concurrent_inserts_and_queries() {
        let idx = Arc::new(new_index());

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let idx = idx.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        assert!(idx.insert(&format!("w{}x{}", t, i)));
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let idx = idx.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        for w in idx.autocomplete("w") {
                            assert!(w.starts_with('w'));
                        }
                    }
                })
            })
            .collect();

        for h in writers.into_iter().chain(readers) {
            h.join().unwrap();
        }

        assert_eq!(idx.len(), 200);
        assert_eq!(idx.autocomplete("w").len(), 200);
        assert_eq!(idx.autocomplete("w2x").len(), 50);
    }
}
