//! Count mutation with low-stock hysteresis.
//!
//! Each call is one store write: the record is read, moved through the
//! [`stock`](stockroom_inventory::stock) state machine and written back
//! atomically. Concurrent decrements on the same record are serialised by
//! the store, so a dip below the threshold fires exactly once.

use core::fmt;

use serde::Serialize;
use tracing::{info, instrument};

use stockroom_core::{ActiveId, Entity, ItemId, PassiveId, StockError, StockResult};
use stockroom_infra::{InventoryStore, RecordStore};
use stockroom_inventory::stock::{self, Stocked, Transition};
use stockroom_inventory::{ActiveComponent, GenericItem, PassiveComponent};

/// Which record a signal is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RecordRef {
    Item(ItemId),
    Passive(PassiveId),
    Active(ActiveId),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Item(id) => write!(f, "item {id}"),
            RecordRef::Passive(id) => write!(f, "passive {id}"),
            RecordRef::Active(id) => write!(f, "active {id}"),
        }
    }
}

/// Result of a decrement.
///
/// `notify` is true only on the call that moved the record into the
/// low-stock state; the caller composes and delivers the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotifySignal {
    pub record: RecordRef,
    pub notify: bool,
    /// Count left after the decrement.
    pub count: i64,
    pub threshold: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StockLedger<S> {
    store: S,
    active_alert_threshold: Option<i64>,
}

type Step<R> = fn(&mut R, i64, Option<i64>) -> StockResult<Transition>;

impl<S: InventoryStore> StockLedger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            active_alert_threshold: None,
        }
    }

    /// Arm low-stock alerts for active components at `threshold`.
    pub fn with_active_alert_threshold(mut self, threshold: Option<i64>) -> Self {
        self.active_alert_threshold = threshold;
        self
    }

    #[instrument(skip(self))]
    pub fn increment_item(&self, id: ItemId, amount: i64) -> StockResult<Transition> {
        let (transition, _) = apply(self.store.items(), id, amount, stock::increment, item_threshold)?;
        if transition.rearmed {
            info!(%id, count = transition.count, "item restocked above threshold; alert re-armed");
        }
        Ok(transition)
    }

    #[instrument(skip(self))]
    pub fn decrement_item(&self, id: ItemId, amount: i64) -> StockResult<NotifySignal> {
        let (transition, threshold) = apply(self.store.items(), id, amount, stock::decrement, item_threshold)?;
        Ok(signal(RecordRef::Item(id), transition, threshold))
    }

    #[instrument(skip(self))]
    pub fn increment_active(&self, id: ActiveId, amount: i64) -> StockResult<Transition> {
        let threshold = |_: &ActiveComponent| self.active_alert_threshold;
        let (transition, _) = apply(self.store.actives(), id, amount, stock::increment, threshold)?;
        if transition.rearmed {
            info!(%id, count = transition.count, "active component restocked; alert re-armed");
        }
        Ok(transition)
    }

    #[instrument(skip(self))]
    pub fn decrement_active(&self, id: ActiveId, amount: i64) -> StockResult<NotifySignal> {
        let threshold = |_: &ActiveComponent| self.active_alert_threshold;
        let (transition, threshold) = apply(self.store.actives(), id, amount, stock::decrement, threshold)?;
        Ok(signal(RecordRef::Active(id), transition, threshold))
    }

    /// Passive components carry no alert flag; only the count moves.
    #[instrument(skip(self))]
    pub fn increment_passive(&self, id: PassiveId, amount: i64) -> StockResult<Transition> {
        let (transition, _) = apply(self.store.passives(), id, amount, stock::increment, no_threshold)?;
        Ok(transition)
    }

    #[instrument(skip(self))]
    pub fn decrement_passive(&self, id: PassiveId, amount: i64) -> StockResult<NotifySignal> {
        let (transition, _) = apply(self.store.passives(), id, amount, stock::decrement, no_threshold)?;
        Ok(signal(RecordRef::Passive(id), transition, None))
    }
}

fn item_threshold(item: &GenericItem) -> Option<i64> {
    Some(item.threshold)
}

fn no_threshold(_: &PassiveComponent) -> Option<i64> {
    None
}

/// Read, step and write back one record inside a single store write.
fn apply<R, T>(
    table: &T,
    id: R::Id,
    amount: i64,
    step: Step<R>,
    threshold: impl Fn(&R) -> Option<i64>,
) -> StockResult<(Transition, Option<i64>)>
where
    R: Entity + Stocked,
    T: RecordStore<R>,
{
    // Rejected before touching the store.
    stock::ensure_positive_amount(amount)?;

    table.write(|tx| -> StockResult<(Transition, Option<i64>)> {
        let mut record = tx.get(id).ok_or(StockError::NotFound)?;
        let threshold = threshold(&record);
        let transition = step(&mut record, amount, threshold)?;
        tx.put(record);
        Ok((transition, threshold))
    })
}

fn signal(record: RecordRef, transition: Transition, threshold: Option<i64>) -> NotifySignal {
    if transition.notify {
        info!(
            %record,
            count = transition.count,
            threshold = ?threshold,
            "stock fell below threshold"
        );
    }
    NotifySignal {
        record,
        notify: transition.notify,
        count: transition.count,
        threshold,
    }
}
