use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, instrument};

use super::cart::{CartLine, OrderDraft};
use super::error::DraftError;
use super::store::OrderDraftStore;

/// Owns the authoritative [`OrderDraft`] for a checkout and writes it back to
/// its store after every mutation.
pub struct DraftManager {
    draft: OrderDraft,
    store: OrderDraftStore,
}

impl DraftManager {
    /// Opens the draft persisted by an earlier session, or an empty one.
    pub fn open(store: OrderDraftStore) -> Result<Self, DraftError> {
        let draft = store.load()?;
        Ok(Self { draft, store })
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn total(&self) -> f64 {
        self.draft.total()
    }

    /// Merges freshly selected lines into the draft. Lines already present
    /// are kept as they are.
    #[instrument(skip(self, new_items))]
    pub fn hydrate(&mut self, new_items: impl IntoIterator<Item = CartLine>) -> Result<usize, DraftError> {
        let added = self.commit(|draft| Ok(draft.merge(new_items)))?;
        debug!(added, lines = self.draft.len(), "Draft hydrated");
        Ok(added)
    }

    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), DraftError> {
        self.commit(|draft| draft.set_quantity(product_id, quantity))
    }

    pub fn set_observed_stock(&mut self, product_id: &str, value: u32) -> Result<(), DraftError> {
        self.commit(|draft| draft.set_observed_stock(product_id, value))
    }

    pub fn remove(&mut self, product_id: &str) -> Result<CartLine, DraftError> {
        self.commit(|draft| draft.remove(product_id))
    }

    #[instrument(skip(self, branch))]
    pub fn select_branch(&mut self, branch: impl Into<String>) -> Result<(), DraftError> {
        let branch = branch.into();
        self.commit(|draft| {
            draft.branch = Some(branch.clone());
            Ok(())
        })?;
        info!(branch = %branch, "Branch selected");
        Ok(())
    }

    pub fn set_stock_order(&mut self, is_stock_order: bool) -> Result<(), DraftError> {
        self.commit(|draft| {
            draft.is_stock_order = is_stock_order;
            Ok(())
        })
    }

    pub fn set_delivery_date(&mut self, date: Option<NaiveDate>) -> Result<(), DraftError> {
        self.commit(|draft| {
            draft.delivery_date = date;
            Ok(())
        })
    }

    pub fn set_delivery_time(&mut self, time: Option<NaiveTime>) -> Result<(), DraftError> {
        self.commit(|draft| {
            draft.delivery_time = time;
            Ok(())
        })
    }

    /// Empties the persisted copy, then the draft. Only called once an order
    /// has been confirmed by the server.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), DraftError> {
        self.store.clear()?;
        self.draft.clear();
        info!("Draft cleared");
        Ok(())
    }

    /// Applies `change` to a copy of the draft and keeps it only once the
    /// copy has been saved.
    fn commit<R>(&mut self, change: impl FnOnce(&mut OrderDraft) -> Result<R, DraftError>) -> Result<R, DraftError> {
        let mut next = self.draft.clone();
        let result = change(&mut next)?;
        self.store.save(&next)?;
        self.draft = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::draft::{DraftStore, MemoryStore, StorageKey, StoreError};

    /// In-memory backend whose writes and removals fail while `failing` is set.
    struct FlakyStore {
        inner: MemoryStore,
        failing: Arc<AtomicBool>,
    }

    impl FlakyStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::Other, "disk unavailable").into());
            }
            Ok(())
        }
    }

    impl DraftStore for FlakyStore {
        fn read(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
            self.inner.read(key)
        }

        fn write(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
            self.check()?;
            self.inner.write(key, value)
        }

        fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
            self.check()?;
            self.inner.remove(key)
        }
    }

    fn flaky_store() -> (OrderDraftStore, Arc<AtomicBool>) {
        let failing = Arc::new(AtomicBool::new(false));
        let store = OrderDraftStore::new(FlakyStore {
            inner: MemoryStore::new(),
            failing: failing.clone(),
        });
        (store, failing)
    }

    fn line(id: &str, price: f64, quantity: u32) -> CartLine {
        CartLine {
            product_id: id.into(),
            name: id.to_uppercase(),
            price,
            quantity,
            observed_stock: Some(1),
        }
    }

    #[test]
    fn hydrate_merges_with_previous_session() {
        let store = OrderDraftStore::in_memory();
        {
            let mut first = DraftManager::open(store.clone()).unwrap();
            first.hydrate([line("a", 10.0, 2)]).unwrap();
            first.select_branch("branch_1").unwrap();
        }

        let mut second = DraftManager::open(store).unwrap();
        assert_eq!(second.draft().branch.as_deref(), Some("branch_1"));
        let added = second.hydrate([line("a", 10.0, 7), line("b", 4.0, 1)]).unwrap();

        assert_eq!(added, 1);
        assert_eq!(second.draft().line("a").unwrap().quantity, 2);
        assert_eq!(second.total(), 24.0);
    }

    #[test]
    fn every_mutation_is_persisted() {
        let store = OrderDraftStore::in_memory();
        let mut manager = DraftManager::open(store.clone()).unwrap();
        manager.hydrate([line("a", 10.0, 2), line("b", 5.0, 1)]).unwrap();

        manager.set_quantity("a", 5).unwrap();
        manager.set_observed_stock("b", 0).unwrap();
        manager.remove("a").unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.line("b").unwrap().observed_stock, Some(0));
        assert_eq!(reloaded.total(), manager.total());
    }

    #[test]
    fn rejected_quantity_leaves_line_and_store_untouched() {
        let store = OrderDraftStore::in_memory();
        let mut manager = DraftManager::open(store.clone()).unwrap();
        manager.hydrate([line("a", 10.0, 2)]).unwrap();
        let before = store.raw(StorageKey::Cart).unwrap();

        assert!(manager.set_quantity("a", 0).is_err());

        assert_eq!(manager.draft().line("a").unwrap().quantity, 2);
        assert_eq!(store.raw(StorageKey::Cart).unwrap(), before);
    }

    #[test]
    fn clear_empties_draft_and_store() {
        let store = OrderDraftStore::in_memory();
        let mut manager = DraftManager::open(store.clone()).unwrap();
        manager.hydrate([line("a", 10.0, 2)]).unwrap();
        manager.select_branch("branch_1").unwrap();

        manager.clear().unwrap();

        assert!(manager.draft().is_empty());
        assert_eq!(manager.draft().branch, None);
        assert_eq!(store.raw(StorageKey::Cart).unwrap(), None);
    }

    #[test]
    fn failed_save_leaves_draft_unchanged() {
        let (store, failing) = flaky_store();
        let mut manager = DraftManager::open(store.clone()).unwrap();
        manager.hydrate([line("a", 10.0, 2)]).unwrap();
        let before = manager.draft().clone();

        failing.store(true, Ordering::SeqCst);

        assert!(matches!(manager.hydrate([line("b", 5.0, 1)]), Err(DraftError::Store(_))));
        assert!(manager.set_quantity("a", 7).is_err());
        assert!(manager.remove("a").is_err());
        assert!(manager.select_branch("branch_1").is_err());
        assert!(manager.set_stock_order(true).is_err());
        assert_eq!(manager.draft(), &before);
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn failed_clear_keeps_draft_in_memory() {
        let (store, failing) = flaky_store();
        let mut manager = DraftManager::open(store.clone()).unwrap();
        manager.hydrate([line("a", 10.0, 2)]).unwrap();

        failing.store(true, Ordering::SeqCst);
        assert!(manager.clear().is_err());
        assert_eq!(manager.draft().len(), 1);

        failing.store(false, Ordering::SeqCst);
        manager.clear().unwrap();
        assert!(manager.draft().is_empty());
        assert!(store.load().unwrap().is_empty());
    }
}
