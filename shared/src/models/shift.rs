//! Shift model
//!
//! One cash-drawer session: opened with a counted float, fed by payment
//! events while active, settled against operator-counted drawer amounts at
//! close. Running totals are derived exclusively from the payment stream;
//! the closing amounts are what the operator actually counted, so the two
//! sides can disagree - that difference is the reconciliation variance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::PaymentMethod;

/// Shift status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShiftStatus {
    #[default]
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "CLOSED")]
    Closed,
}

/// Shift record - one operator cash-drawer session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shift {
    /// Shift ID, assigned by the store (max existing + 1)
    pub id: i64,
    /// Operator display name
    pub operator_name: String,
    pub status: ShiftStatus,
    /// Shift start time (Unix milliseconds)
    pub start_time: i64,
    /// Shift end time, None while active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Operator-counted opening cash float
    pub initial_amount: Decimal,

    // === Running totals (payment stream) ===
    /// Count of all settled payments
    pub total_transactions: u32,
    /// Count of cash payments
    pub cash_transactions: u32,
    /// Count of card payments (credit and debit)
    pub card_transactions: u32,
    /// Count of Pix payments
    pub pix_transactions: u32,
    /// Cash collected
    pub cash_amount: Decimal,
    /// Card amounts collected (credit and debit)
    pub card_amount: Decimal,
    /// Pix amounts collected
    pub pix_amount: Decimal,

    // === Closing reconciliation (operator-counted, set once at close) ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_cash_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_debit_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_credit_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_pix_amount: Option<Decimal>,
    /// Sum of the four counted closing amounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_amount: Option<Decimal>,
    /// Counted cash minus expected cash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_variance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Open-shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftOpen {
    /// Operator display name
    pub operator_name: String,
    /// Opening cash float (default 0)
    #[serde(default)]
    pub initial_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Close-shift payload: the operator's drawer counts per method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftClose {
    pub counted_cash: Decimal,
    pub counted_debit: Decimal,
    pub counted_credit: Decimal,
    pub counted_pix: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ShiftClose {
    /// Total the operator reports across all methods.
    pub fn counted_total(&self) -> Decimal {
        self.counted_cash + self.counted_debit + self.counted_credit + self.counted_pix
    }
}

impl Shift {
    /// Fresh active shift with zeroed counters.
    pub fn open(id: i64, input: ShiftOpen, start_time: i64) -> Self {
        Self {
            id,
            operator_name: input.operator_name,
            status: ShiftStatus::Active,
            start_time,
            end_time: None,
            initial_amount: input.initial_amount,
            total_transactions: 0,
            cash_transactions: 0,
            card_transactions: 0,
            pix_transactions: 0,
            cash_amount: Decimal::ZERO,
            card_amount: Decimal::ZERO,
            pix_amount: Decimal::ZERO,
            closing_cash_amount: None,
            closing_debit_amount: None,
            closing_credit_amount: None,
            closing_pix_amount: None,
            closing_amount: None,
            cash_variance: None,
            note: input.note,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ShiftStatus::Active
    }

    /// Cash that should be in the drawer: opening float plus cash taken.
    pub fn expected_cash(&self) -> Decimal {
        self.initial_amount + self.cash_amount
    }

    /// Everything collected this shift, opening float included.
    pub fn expected_total(&self) -> Decimal {
        self.initial_amount + self.cash_amount + self.card_amount + self.pix_amount
    }

    /// Fold one settled payment into the running totals.
    pub fn record_payment(&mut self, method: PaymentMethod, amount: Decimal) {
        self.total_transactions += 1;
        match method {
            PaymentMethod::Cash => {
                self.cash_transactions += 1;
                self.cash_amount += amount;
            }
            PaymentMethod::Credit | PaymentMethod::Debit => {
                self.card_transactions += 1;
                self.card_amount += amount;
            }
            PaymentMethod::Pix => {
                self.pix_transactions += 1;
                self.pix_amount += amount;
            }
        }
    }

    /// Freeze the shift with the operator's drawer counts.
    ///
    /// The counted amounts are stored as reported; the variance against the
    /// payment stream is computed alongside so a discrepancy stays visible.
    pub fn settle(&mut self, counted: ShiftClose, end_time: i64) {
        self.cash_variance = Some(counted.counted_cash - self.expected_cash());
        self.closing_amount = Some(counted.counted_total());
        self.closing_cash_amount = Some(counted.counted_cash);
        self.closing_debit_amount = Some(counted.counted_debit);
        self.closing_credit_amount = Some(counted.counted_credit);
        self.closing_pix_amount = Some(counted.counted_pix);
        if counted.note.is_some() {
            self.note = counted.note;
        }
        self.status = ShiftStatus::Closed;
        self.end_time = Some(end_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_shift(initial: Decimal) -> Shift {
        Shift::open(
            1,
            ShiftOpen {
                operator_name: "Ana".to_string(),
                initial_amount: initial,
                note: None,
            },
            1_700_000_000_000,
        )
    }

    #[test]
    fn payments_bucket_by_method() {
        let mut shift = open_shift(Decimal::new(10000, 2)); // 100.00

        shift.record_payment(PaymentMethod::Cash, Decimal::new(4598, 2));
        shift.record_payment(PaymentMethod::Credit, Decimal::new(2000, 2));
        shift.record_payment(PaymentMethod::Debit, Decimal::new(1000, 2));
        shift.record_payment(PaymentMethod::Pix, Decimal::new(500, 2));

        assert_eq!(shift.total_transactions, 4);
        assert_eq!(shift.cash_transactions, 1);
        assert_eq!(shift.card_transactions, 2);
        assert_eq!(shift.pix_transactions, 1);
        assert_eq!(shift.cash_amount, Decimal::new(4598, 2));
        assert_eq!(shift.card_amount, Decimal::new(3000, 2));
        assert_eq!(shift.pix_amount, Decimal::new(500, 2));
        // 100.00 float + 45.98 cash
        assert_eq!(shift.expected_cash(), Decimal::new(14598, 2));
        assert_eq!(shift.expected_total(), Decimal::new(19098, 2));
    }

    #[test]
    fn settle_records_counts_and_variance() {
        let mut shift = open_shift(Decimal::new(10000, 2));
        shift.record_payment(PaymentMethod::Cash, Decimal::new(5000, 2));

        shift.settle(
            ShiftClose {
                counted_cash: Decimal::new(14900, 2), // one real short
                counted_debit: Decimal::ZERO,
                counted_credit: Decimal::ZERO,
                counted_pix: Decimal::ZERO,
                note: Some("drawer light".to_string()),
            },
            1_700_000_100_000,
        );

        assert_eq!(shift.status, ShiftStatus::Closed);
        assert_eq!(shift.end_time, Some(1_700_000_100_000));
        assert_eq!(shift.closing_amount, Some(Decimal::new(14900, 2)));
        assert_eq!(shift.cash_variance, Some(Decimal::new(-100, 2)));
        assert_eq!(shift.note.as_deref(), Some("drawer light"));
    }

    #[test]
    fn counters_freeze_as_stored_values() {
        let mut shift = open_shift(Decimal::ZERO);
        shift.record_payment(PaymentMethod::Pix, Decimal::new(999, 2));
        let counted = shift.pix_amount;

        shift.settle(
            ShiftClose {
                counted_cash: Decimal::ZERO,
                counted_debit: Decimal::ZERO,
                counted_credit: Decimal::ZERO,
                counted_pix: counted,
                note: None,
            },
            1,
        );

        assert_eq!(shift.pix_transactions, 1);
        assert_eq!(shift.closing_pix_amount, Some(Decimal::new(999, 2)));
        assert_eq!(shift.cash_variance, Some(Decimal::ZERO));
    }
}
