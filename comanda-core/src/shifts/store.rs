//! ShiftStore - drawer sessions and closing reconciliation

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::event::{ChangeEvent, PaymentRecorded};
use shared::models::{Shift, ShiftClose, ShiftOpen};

use super::error::ShiftError;
use crate::events::{Listener, Listeners};
use crate::traits::{Clock, NoticeLevel, NotificationSink, PaymentSink};
use crate::validate;
use crate::validate::MAX_NAME_LEN;

/// Shift collection with the single-active-shift invariant
///
/// The only mutation path for running totals is [`on_payment_recorded`],
/// invoked synchronously by the order store on settlement; a payment with
/// no active shift is rejected loudly rather than dropped, so the
/// reconciliation at close can never silently miss money.
///
/// [`on_payment_recorded`]: ShiftStore::on_payment_recorded
pub struct ShiftStore {
    shifts: RwLock<BTreeMap<i64, Shift>>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationSink>,
    listeners: Listeners,
}

impl ShiftStore {
    pub fn new(clock: Arc<dyn Clock>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            shifts: RwLock::new(BTreeMap::new()),
            clock,
            notifier,
            listeners: Listeners::new(),
        }
    }

    /// Rebuild a store from a persisted snapshot.
    ///
    /// Fails on duplicate ids or more than one active shift.
    pub fn restore(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn NotificationSink>,
        shifts: Vec<Shift>,
    ) -> Result<Self, ShiftError> {
        let mut map = BTreeMap::new();
        let mut active = 0usize;
        for shift in shifts {
            if shift.is_active() {
                active += 1;
            }
            if map.insert(shift.id, shift).is_some() {
                return Err(ShiftError::Validation(
                    "snapshot contains duplicate shift ids".to_string(),
                ));
            }
        }
        if active > 1 {
            return Err(ShiftError::Conflict(
                "snapshot contains more than one active shift".to_string(),
            ));
        }
        let store = Self::new(clock, notifier);
        *store.shifts.write() = map;
        Ok(store)
    }

    /// Register a change listener. Listeners run synchronously after each
    /// mutation completes.
    pub fn subscribe(&self, listener: Listener) {
        self.listeners.subscribe(listener);
    }

    // ========== Queries ==========

    pub fn get_shift(&self, shift_id: i64) -> Result<Shift, ShiftError> {
        self.shifts
            .read()
            .get(&shift_id)
            .cloned()
            .ok_or(ShiftError::NotFound(shift_id))
    }

    /// The currently active shift, if any.
    pub fn get_active_shift(&self) -> Option<Shift> {
        self.shifts
            .read()
            .values()
            .find(|shift| shift.is_active())
            .cloned()
    }

    /// Every shift of the session, in id (opening) order.
    pub fn list_shifts(&self) -> Vec<Shift> {
        self.shifts.read().values().cloned().collect()
    }

    // ========== Mutations ==========

    /// Open a new drawer session.
    ///
    /// Rejected with `Conflict` while another shift is active; counters
    /// start at zero.
    pub fn open_shift(&self, input: ShiftOpen) -> Result<Shift, ShiftError> {
        validate::shift_text(&input.operator_name, "operator name", MAX_NAME_LEN)?;
        validate::cash_amount(input.initial_amount, "initial amount")?;
        validate::shift_note(&input.note, "note")?;

        let opened = {
            let mut shifts = self.shifts.write();
            if shifts.values().any(|shift| shift.is_active()) {
                return Err(ShiftError::Conflict("a shift is already open".to_string()));
            }
            let id = next_id(&shifts);
            let shift = Shift::open(id, input, self.clock.now_millis());
            shifts.insert(id, shift.clone());
            shift
        };

        tracing::info!(
            shift_id = opened.id,
            operator = %opened.operator_name,
            initial_amount = %opened.initial_amount,
            "shift opened"
        );
        self.notifier.notify(
            &format!(
                "Shift #{} opened by {}",
                opened.id, opened.operator_name
            ),
            NoticeLevel::Info,
        );
        self.listeners.emit(ChangeEvent::ShiftChanged {
            shift_id: opened.id,
        });
        Ok(opened)
    }

    /// Book one settled payment into the active shift.
    ///
    /// The sole mutation path for running totals. Fails with
    /// `NoActiveShift` when nothing is open - the caller (the order
    /// store) treats that as a failed settlement.
    pub fn on_payment_recorded(&self, event: &PaymentRecorded) -> Result<(), ShiftError> {
        let shift_id = {
            let mut shifts = self.shifts.write();
            let shift = shifts
                .values_mut()
                .find(|shift| shift.is_active())
                .ok_or(ShiftError::NoActiveShift)?;
            shift.record_payment(event.method, event.amount);
            shift.id
        };

        tracing::debug!(
            shift_id,
            order_id = event.order_id,
            amount = %event.amount,
            method = %event.method,
            "payment booked into shift"
        );
        self.listeners.emit(ChangeEvent::ShiftChanged { shift_id });
        Ok(())
    }

    /// Close a shift against the operator's drawer counts.
    ///
    /// Atomic: a rejected call changes nothing. The counted amounts are
    /// stored as reported and the cash variance against the payment
    /// stream is computed alongside.
    pub fn close_shift(&self, shift_id: i64, input: ShiftClose) -> Result<Shift, ShiftError> {
        validate::cash_amount(input.counted_cash, "counted cash")?;
        validate::cash_amount(input.counted_debit, "counted debit")?;
        validate::cash_amount(input.counted_credit, "counted credit")?;
        validate::cash_amount(input.counted_pix, "counted pix")?;
        validate::shift_note(&input.note, "note")?;

        let closed = {
            let mut shifts = self.shifts.write();
            let shift = shifts
                .get_mut(&shift_id)
                .filter(|shift| shift.is_active())
                .ok_or(ShiftError::NotFound(shift_id))?;
            shift.settle(input, self.clock.now_millis());
            shift.clone()
        };

        tracing::info!(
            shift_id,
            transactions = closed.total_transactions,
            closing_amount = %closed.closing_amount.unwrap_or_default(),
            cash_variance = %closed.cash_variance.unwrap_or_default(),
            "shift closed"
        );
        self.notifier.notify(
            &format!(
                "Shift #{} closed: {} transactions, cash variance {}",
                closed.id,
                closed.total_transactions,
                closed.cash_variance.unwrap_or_default()
            ),
            NoticeLevel::Info,
        );
        self.listeners.emit(ChangeEvent::ShiftChanged { shift_id });
        Ok(closed)
    }

    /// Snapshot of every shift, in id order.
    pub fn snapshot(&self) -> Vec<Shift> {
        self.shifts.read().values().cloned().collect()
    }
}

impl PaymentSink for ShiftStore {
    fn on_payment_recorded(&self, event: &PaymentRecorded) -> Result<(), ShiftError> {
        ShiftStore::on_payment_recorded(self, event)
    }
}

/// Next shift id: max existing + 1, or 1 when empty.
fn next_id(shifts: &BTreeMap<i64, Shift>) -> i64 {
    shifts.last_key_value().map(|(id, _)| id + 1).unwrap_or(1)
}
