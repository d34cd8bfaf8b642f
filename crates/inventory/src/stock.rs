//! Low-stock hysteresis state machine.
//!
//! A record with an alert flag is either [`AlertState::Normal`] or
//! [`AlertState::LowNotified`]:
//!
//! ```text
//!            decrement, new < threshold (notify)
//!   NORMAL ─────────────────────────────────────▶ LOW_NOTIFIED
//!     ▲                                               │
//!     └────────── increment, new > threshold ─────────┘
//! ```
//!
//! Landing exactly on the threshold never changes state in either
//! direction. Decrements while already `LowNotified` stay silent, so one
//! continuous dip below the threshold yields at most one notify signal.

use serde::{Deserialize, Serialize};

use stockroom_core::{StockError, StockResult};

/// Alert state carried by a stock record (`is_contacted` on disk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Normal,
    LowNotified,
}

impl AlertState {
    pub fn from_contacted(is_contacted: bool) -> Self {
        if is_contacted {
            Self::LowNotified
        } else {
            Self::Normal
        }
    }

    pub fn is_contacted(self) -> bool {
        self == Self::LowNotified
    }
}

/// A record whose count the ledger can move.
pub trait Stocked {
    fn count(&self) -> i64;

    fn set_count(&mut self, count: i64);

    /// Current alert state, or `None` when the record carries no alert flag.
    fn alert(&self) -> Option<AlertState>;

    fn set_alert(&mut self, state: AlertState);
}

/// Outcome of a single count mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub previous_count: i64,
    pub count: i64,
    pub alert: Option<AlertState>,
    /// The record entered `LowNotified` during this call.
    pub notify: bool,
    /// The record left `LowNotified` during this call.
    pub rearmed: bool,
}

/// Amounts are strictly positive; zero and negative amounts are rejected
/// rather than interpreted as the inverse operation.
pub fn ensure_positive_amount(amount: i64) -> StockResult<()> {
    if amount <= 0 {
        return Err(StockError::invalid(format!(
            "amount must be positive (got {amount})"
        )));
    }
    Ok(())
}

/// Add `amount` to the record and re-arm its alert when the new count is
/// strictly above `threshold`.
pub fn increment<R: Stocked>(
    record: &mut R,
    amount: i64,
    threshold: Option<i64>,
) -> StockResult<Transition> {
    ensure_positive_amount(amount)?;

    let previous_count = record.count();
    let count = previous_count
        .checked_add(amount)
        .ok_or_else(|| StockError::invalid("count overflow"))?;

    let before = record.alert();
    let mut rearmed = false;
    if let (Some(state), Some(threshold)) = (before, threshold) {
        if count > threshold {
            rearmed = state == AlertState::LowNotified;
            record.set_alert(AlertState::Normal);
        }
    }
    record.set_count(count);

    Ok(Transition {
        previous_count,
        count,
        alert: record.alert(),
        notify: false,
        rearmed,
    })
}

/// Remove `amount` from the record (clamped at zero) and fire the alert
/// when the count drops strictly below `threshold` from the `Normal` state.
pub fn decrement<R: Stocked>(
    record: &mut R,
    amount: i64,
    threshold: Option<i64>,
) -> StockResult<Transition> {
    ensure_positive_amount(amount)?;

    let previous_count = record.count();
    let count = previous_count.saturating_sub(amount).max(0);

    let mut notify = false;
    if let (Some(AlertState::Normal), Some(threshold)) = (record.alert(), threshold) {
        if count < threshold {
            record.set_alert(AlertState::LowNotified);
            notify = true;
        }
    }
    record.set_count(count);

    Ok(Transition {
        previous_count,
        count,
        alert: record.alert(),
        notify,
        rearmed: false,
    })
}
