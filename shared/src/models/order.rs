//! Order model
//!
//! One customer order and its lifecycle. The kitchen progression and the
//! payment status are deliberately separate axes: an order moves
//! `Pending → InProgress → Ready → Delivered` on the kitchen display while
//! the cashier independently takes it from `Unpaid` to `Paid`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Lifecycle enums
// ============================================================================

/// Order service type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Table,
    Pickup,
    Delivery,
}

impl OrderType {
    pub fn is_delivery(&self) -> bool {
        matches!(self, OrderType::Delivery)
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Table => write!(f, "TABLE"),
            OrderType::Pickup => write!(f, "PICKUP"),
            OrderType::Delivery => write!(f, "DELIVERY"),
        }
    }
}

/// Kitchen progression state (KDS axis)
///
/// A strict linear chain with no cycles; `Delivered` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenState {
    #[default]
    Pending,
    InProgress,
    Ready,
    Delivered,
}

impl KitchenState {
    /// The only state reachable from this one, if any.
    pub fn next(&self) -> Option<KitchenState> {
        match self {
            KitchenState::Pending => Some(KitchenState::InProgress),
            KitchenState::InProgress => Some(KitchenState::Ready),
            KitchenState::Ready => Some(KitchenState::Delivered),
            KitchenState::Delivered => None,
        }
    }

    /// Whether the kitchen is done with the order (ready for pickup or
    /// already handed over) - the cashier precondition for payment.
    pub fn is_servable(&self) -> bool {
        matches!(self, KitchenState::Ready | KitchenState::Delivered)
    }
}

impl std::fmt::Display for KitchenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KitchenState::Pending => write!(f, "PENDING"),
            KitchenState::InProgress => write!(f, "IN_PROGRESS"),
            KitchenState::Ready => write!(f, "READY"),
            KitchenState::Delivered => write!(f, "DELIVERED"),
        }
    }
}

/// Payment status (cashier axis)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    #[default]
    Unpaid,
    Paid,
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Credit,
    Debit,
    Pix,
}

impl PaymentMethod {
    /// Credit and debit both settle through the card terminal.
    pub fn is_card(&self) -> bool {
        matches!(self, PaymentMethod::Credit | PaymentMethod::Debit)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "CASH"),
            PaymentMethod::Credit => write!(f, "CREDIT"),
            PaymentMethod::Debit => write!(f, "DEBIT"),
            PaymentMethod::Pix => write!(f, "PIX"),
        }
    }
}

// ============================================================================
// Order lines
// ============================================================================

/// One line of an order
///
/// Lines with the same `(name, notes)` pair are interchangeable and merge by
/// quantity; a differing note keeps the line separate so a customized item
/// is never silently folded into a plain one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product name (catalog key for pricing)
    pub name: String,
    /// Quantity, always >= 1
    pub quantity: i32,
    /// Preparation note ("no onions"), empty when absent
    #[serde(default)]
    pub notes: String,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: i32) -> Self {
        Self {
            name: name.into(),
            quantity,
            notes: String::new(),
        }
    }

    pub fn with_notes(name: impl Into<String>, quantity: i32, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            notes: notes.into(),
        }
    }

    /// Merge key: same product and exactly the same note.
    pub fn merges_with(&self, other: &OrderItem) -> bool {
        self.name == other.name && self.notes == other.notes
    }
}

/// Delivery address details, present only on delivery orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryInfo {
    pub client_name: String,
    pub phone: String,
    pub address: String,
    /// Street number
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    /// Landmark reference for the courier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

// ============================================================================
// Order aggregate
// ============================================================================

/// One customer order
///
/// Orders are append-only for the session: created, advanced through the
/// kitchen, settled by the cashier - never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID, assigned by the store (max existing + 1)
    pub id: i64,
    pub order_type: OrderType,
    /// Free-text label: table number, customer name
    pub identifier: String,
    /// Creation time (Unix milliseconds), immutable
    pub created_at: i64,
    pub kitchen_state: KitchenState,
    pub payment_state: PaymentState,
    /// Order lines in insertion order (receipt printing preserves it)
    pub items: Vec<OrderItem>,
    /// Whether the 10% service surcharge applies; set at creation
    pub has_service_fee: bool,
    /// Present iff `order_type == Delivery`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_info: Option<DeliveryInfo>,
    /// Set exactly once when payment is recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.payment_state == PaymentState::Paid
    }

    pub fn is_delivery(&self) -> bool {
        self.order_type == OrderType::Delivery
    }

    /// Total unit count across all lines.
    pub fn unit_count(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kitchen_chain_is_linear() {
        assert_eq!(KitchenState::Pending.next(), Some(KitchenState::InProgress));
        assert_eq!(KitchenState::InProgress.next(), Some(KitchenState::Ready));
        assert_eq!(KitchenState::Ready.next(), Some(KitchenState::Delivered));
        assert_eq!(KitchenState::Delivered.next(), None);
    }

    #[test]
    fn servable_states() {
        assert!(!KitchenState::Pending.is_servable());
        assert!(!KitchenState::InProgress.is_servable());
        assert!(KitchenState::Ready.is_servable());
        assert!(KitchenState::Delivered.is_servable());
    }

    #[test]
    fn card_methods() {
        assert!(PaymentMethod::Credit.is_card());
        assert!(PaymentMethod::Debit.is_card());
        assert!(!PaymentMethod::Cash.is_card());
        assert!(!PaymentMethod::Pix.is_card());
    }

    #[test]
    fn merge_key_requires_exact_note_match() {
        let plain = OrderItem::new("X-Bacon", 1);
        let plain_again = OrderItem::new("X-Bacon", 3);
        let customized = OrderItem::with_notes("X-Bacon", 1, "no onions");

        assert!(plain.merges_with(&plain_again));
        assert!(!plain.merges_with(&customized));
        assert!(!customized.merges_with(&OrderItem::with_notes("X-Bacon", 1, "No Onions")));
    }

    #[test]
    fn order_serde_round_trip() {
        let order = Order {
            id: 7,
            order_type: OrderType::Delivery,
            identifier: "Maria".to_string(),
            created_at: 1_700_000_000_000,
            kitchen_state: KitchenState::InProgress,
            payment_state: PaymentState::Unpaid,
            items: vec![OrderItem::with_notes("X-Bacon", 2, "extra cheese")],
            has_service_fee: false,
            delivery_info: Some(DeliveryInfo {
                client_name: "Maria".to_string(),
                phone: "11 99999-0000".to_string(),
                address: "Rua das Flores".to_string(),
                number: "120".to_string(),
                complement: None,
                neighborhood: "Centro".to_string(),
                reference: Some("next to the bakery".to_string()),
            }),
            payment_method: None,
        };

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
        // Statuses serialize as closed string tags
        assert!(json.contains("\"IN_PROGRESS\""));
        assert!(json.contains("\"DELIVERY\""));
    }
}
