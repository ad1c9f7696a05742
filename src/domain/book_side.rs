// ============================================================================
// Book Side
// Comparator-sorted sequence of orders for one side of the market
// ============================================================================

use crate::error::MergeError;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::comparator::{Comparator, DemandComparator, SupplyComparator};
use super::{Order, OrderId, Side};

/// One side of the order book.
///
/// Orders are kept sorted by the side's comparator and no id appears twice.
/// Readers get a shared snapshot (`Arc<Vec<Order>>`) and never block each
/// other; an update holds the write lock for the whole sort and merge.
pub struct BookSide {
    orders: RwLock<Arc<Vec<Order>>>,
    comparator: Box<dyn Comparator>,
}

impl BookSide {
    pub fn new(comparator: Box<dyn Comparator>) -> Self {
        Self {
            orders: RwLock::new(Arc::new(Vec::new())),
            comparator,
        }
    }

    /// Empty demand side, best bid first
    pub fn demand() -> Self {
        Self::new(Box::new(DemandComparator))
    }

    /// Empty supply side, best ask first
    pub fn supply() -> Self {
        Self::new(Box::new(SupplyComparator))
    }

    pub fn side(&self) -> Side {
        self.comparator.side()
    }

    /// Snapshot of the current sequence in sorted order
    pub fn get_orders(&self) -> Arc<Vec<Order>> {
        Arc::clone(&self.orders.read())
    }

    /// Merge a batch of new or replacement orders into the side.
    ///
    /// An order whose id is already resting replaces the resting version; a
    /// zero-quantity order closes it. On error nothing is committed.
    pub fn update_orders(&self, batch: Vec<Order>) -> Result<(), MergeError> {
        let mut orders = self.orders.write();
        let merged = self.merge_batch(&orders, batch)?;
        *orders = Arc::new(merged);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }

    /// Top of this side
    pub fn best(&self) -> Option<Order> {
        self.orders.read().first().cloned()
    }

    pub fn find(&self, id: OrderId) -> Option<Order> {
        self.orders.read().iter().find(|o| o.id == id).cloned()
    }

    pub fn total_quantity(&self) -> Decimal {
        self.orders.read().iter().map(|o| o.quantity).sum()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Arc<Vec<Order>>> {
        self.orders.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Arc<Vec<Order>>> {
        self.orders.write()
    }

    /// Compute the sequence that results from applying `batch` to `existing`.
    ///
    /// Pure with respect to the side: callers holding the write lock decide
    /// whether to commit the result.
    ///
    /// Comparators that reject orders only inside `compare`, after `admit`
    /// passed, surface as [`MergeError::Sort`] or [`MergeError::Merge`].
    pub(crate) fn merge_batch(
        &self,
        existing: &[Order],
        batch: Vec<Order>,
    ) -> Result<Vec<Order>, MergeError> {
        if batch.is_empty() {
            return Ok(existing.to_vec());
        }

        let batch = self.sort_batch(batch)?;

        // ids touched by the batch close out whatever version is resting
        let superseded: HashSet<OrderId> = batch.iter().map(|o| o.id).collect();

        let mut merged = Vec::with_capacity(existing.len() + batch.len());
        let mut resting = existing
            .iter()
            .filter(|o| !superseded.contains(&o.id))
            .peekable();
        let mut incoming = batch.into_iter().filter(|o| !o.is_filled()).peekable();

        while let (Some(old), Some(new)) = (resting.peek(), incoming.peek()) {
            match self
                .comparator
                .compare(old, new)
                .map_err(MergeError::Merge)?
            {
                // same sort position: the newer entry wins
                Ordering::Equal => {
                    resting.next();
                    merged.extend(incoming.next());
                },
                Ordering::Less => merged.extend(resting.next().cloned()),
                Ordering::Greater => merged.extend(incoming.next()),
            }
        }
        merged.extend(resting.cloned());
        merged.extend(incoming);

        tracing::trace!(
            side = %self.side(),
            before = existing.len(),
            after = merged.len(),
            "merged order batch"
        );

        Ok(merged)
    }

    /// Keep the last entry per id, validate every entry, then sort.
    fn sort_batch(&self, batch: Vec<Order>) -> Result<Vec<Order>, MergeError> {
        let mut seen = HashSet::with_capacity(batch.len());
        let mut batch: Vec<Order> = batch
            .into_iter()
            .rev()
            .filter(|o| seen.insert(o.id))
            .collect();
        batch.reverse();

        let rejected: Vec<_> = batch
            .iter()
            .filter_map(|o| self.comparator.admit(o).err())
            .collect();
        if !rejected.is_empty() {
            return Err(MergeError::Sort(rejected));
        }

        let mut failures = Vec::new();
        batch.sort_by(|a, b| {
            self.comparator.compare(a, b).unwrap_or_else(|err| {
                failures.push(err);
                Ordering::Equal
            })
        });
        if !failures.is_empty() {
            return Err(MergeError::Sort(failures));
        }

        Ok(batch)
    }
}

impl fmt::Debug for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookSide")
            .field("side", &self.side())
            .field("orders", &self.get_orders())
            .finish()
    }
}
