//! # Product Cache
//!
//! In-process map from `product_id` to the last product this repository
//! read or wrote.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RwLock<{ slots: HashMap<i64, Slot { product, stamp }>, counter }>     │
//! │                                                                         │
//! │  get()     ── read lock  ── many readers at once                       │
//! │  put()     ── write lock ── excludes readers and other writers         │
//! │  remove()  ── write lock                                               │
//! │  fill()    ── write lock ── stamp check and store in one step          │
//! │                                                                         │
//! │  Entries are whole `Product` values swapped under the write lock, so a │
//! │  reader sees either the old record or the new one, never a mix.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read-through fills
//! A database read that misses the cache may only store its row if no write
//! or removal touched that id while the read was in flight. Every `put()` and
//! `remove()` stamps the id with the next value of a counter; a reader takes
//! a [`FillTicket`] before querying and hands it to `fill()`, which refuses
//! when the id's stamp is newer than the ticket.
//!
//! ```text
//!  get_by_id                     delete
//!  ─────────                     ──────
//!  ticket = cache.ticket()  (7)
//!  SELECT ... → row
//!                                DELETE ...
//!                                cache.remove(id)   stamp(id) = 8
//!  cache.fill(id, row, 7)   → refused, 8 > 7
//! ```
//!
//! No eviction, expiry or size bound: an entry lives until `remove()` (after
//! a delete) or until the cache is dropped. Removed ids keep their stamp so a
//! late fill cannot bring them back. The cache is local to one
//! [`Database`](crate::Database) handle and may lag rows changed by other
//! processes; the table stays the source of truth.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use inventory_core::Product;

/// Snapshot of the write counter taken before a database read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FillTicket(u64);

#[derive(Debug, Default)]
struct Slot {
    product: Option<Product>,
    stamp: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    slots: HashMap<i64, Slot>,
    counter: u64,
    /// Stamp assumed for ids without a slot, raised by `clear()`.
    floor: u64,
}

impl CacheState {
    fn stamp(&mut self, product_id: i64, product: Option<Product>) -> Option<Product> {
        self.counter += 1;
        let slot = self.slots.entry(product_id).or_default();
        slot.stamp = self.counter;
        std::mem::replace(&mut slot.product, product)
    }
}

#[derive(Debug, Default)]
pub struct ProductCache {
    state: RwLock<CacheState>,
}

impl ProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached product, if any. Never touches the database.
    pub fn get(&self, product_id: i64) -> Option<Product> {
        // A panic elsewhere can't leave a half-written entry behind (each
        // write is a single map operation), so a poisoned lock is still usable.
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .slots
            .get(&product_id)
            .and_then(|slot| slot.product.clone())
    }

    /// Inserts or overwrites the entry for `product_id` with a value that was
    /// just written to the database.
    pub fn put(&self, product_id: i64, product: Product) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.stamp(product_id, Some(product));
    }

    /// Drops the entry for `product_id`, returning it if present.
    pub fn remove(&self, product_id: i64) -> Option<Product> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.stamp(product_id, None)
    }

    /// Takes a ticket to pass to [`fill`](Self::fill) once the read returns.
    pub fn ticket(&self) -> FillTicket {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        FillTicket(state.counter)
    }

    /// Stores a row read from the database, unless `product_id` was written or
    /// removed after `ticket` was taken. Returns whether the row was stored.
    pub fn fill(&self, product_id: i64, product: Product, ticket: FillTicket) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let floor = state.floor;
        let slot = state.slots.entry(product_id).or_insert_with(|| Slot {
            product: None,
            stamp: floor,
        });
        if slot.stamp > ticket.0 {
            return false;
        }
        slot.product = Some(product);
        true
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.get(product_id).is_some()
    }

    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .slots
            .values()
            .filter(|slot| slot.product.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Fills holding a ticket from before the clear are
    /// refused.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.counter += 1;
        state.floor = state.counter;
        state.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::Money;
    use std::sync::Arc;
    use std::thread;

    fn product(id: i64, generation: i64) -> Product {
        // Every field derives from `generation` so a torn read is detectable.
        Product {
            product_id: id,
            manufacturer: format!("maker-{generation}"),
            sku: format!("sku-{generation}"),
            upc: format!("upc-{generation}"),
            price_per_unit: Money::from_cents(generation),
            quantity_on_hand: generation,
            product_name: format!("name-{generation}"),
        }
    }

    #[test]
    fn test_put_get_remove() {
        let cache = ProductCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(1), None);

        cache.put(1, product(1, 10));
        assert_eq!(cache.get(1), Some(product(1, 10)));
        assert!(cache.contains(1));

        cache.put(1, product(1, 11));
        assert_eq!(cache.get(1).unwrap().quantity_on_hand, 11);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.remove(1), Some(product(1, 11)));
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.remove(1), None);
    }

    #[test]
    fn test_clear() {
        let cache = ProductCache::new();
        cache.put(1, product(1, 1));
        cache.put(2, product(2, 2));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_get_put_same_key_never_tears() {
        let cache = Arc::new(ProductCache::new());
        cache.put(7, product(7, 0));

        let writers: Vec<_> = (0..8)
            .map(|w| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500 {
                        cache.put(7, product(7, w * 1000 + i));
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let seen = cache.get(7).expect("entry is never removed");
                        let generation = seen.quantity_on_hand;
                        assert_eq!(seen, product(7, generation));
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().expect("no thread panicked");
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_fill_after_remove_is_refused() {
        let cache = ProductCache::new();
        let ticket = cache.ticket();

        // A delete lands while the read is in flight.
        cache.remove(3);
        assert!(!cache.fill(3, product(3, 1), ticket));
        assert_eq!(cache.get(3), None);

        // A read that started after the delete may fill.
        let ticket = cache.ticket();
        assert!(cache.fill(3, product(3, 2), ticket));
        assert_eq!(cache.get(3), Some(product(3, 2)));
    }

    #[test]
    fn test_fill_after_put_keeps_written_value() {
        let cache = ProductCache::new();
        let ticket = cache.ticket();

        cache.put(4, product(4, 9));
        assert!(!cache.fill(4, product(4, 1), ticket));
        assert_eq!(cache.get(4), Some(product(4, 9)));
    }

    #[test]
    fn test_writes_to_other_ids_do_not_block_fill() {
        let cache = ProductCache::new();
        let ticket = cache.ticket();

        cache.put(1, product(1, 1));
        cache.remove(2);
        assert!(cache.fill(5, product(5, 5), ticket));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear_refuses_older_fills() {
        let cache = ProductCache::new();
        let ticket = cache.ticket();

        cache.remove(6);
        cache.clear();
        assert!(!cache.fill(6, product(6, 1), ticket));
        assert!(cache.fill(6, product(6, 1), cache.ticket()));
    }
}
