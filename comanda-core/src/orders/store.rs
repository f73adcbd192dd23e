//! OrderStore - order identity, item merging, lifecycle transitions

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::event::{ChangeEvent, PaymentRecorded};
use shared::models::{
    DeliveryInfo, KitchenState, Order, OrderItem, OrderType, PaymentMethod, PaymentState,
};

use super::error::OrderError;
use crate::events::{Listener, Listeners};
use crate::money;
use crate::traits::{Clock, NoticeLevel, NotificationSink, PaymentSink, PriceLookup};
use crate::validate;

/// Creation payload
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_type: OrderType,
    /// Free-text label: table number, customer name
    pub identifier: String,
    pub items: Vec<OrderItem>,
    pub has_service_fee: bool,
    /// Required for delivery orders, rejected otherwise
    pub delivery_info: Option<DeliveryInfo>,
}

/// Listing filter; `None` fields match everything
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub kitchen_state: Option<KitchenState>,
    pub payment_state: Option<PaymentState>,
    pub order_type: Option<OrderType>,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        self.kitchen_state.is_none_or(|s| order.kitchen_state == s)
            && self.payment_state.is_none_or(|s| order.payment_state == s)
            && self.order_type.is_none_or(|t| order.order_type == t)
    }
}

/// In-memory order collection and its mutation operations
///
/// One instance per session, constructed with its collaborators and passed
/// by reference; tests build fresh stores with fixed clocks and canned
/// catalogs.
pub struct OrderStore {
    orders: RwLock<BTreeMap<i64, Order>>,
    clock: Arc<dyn Clock>,
    catalog: Arc<dyn PriceLookup>,
    payment_sink: Arc<dyn PaymentSink>,
    notifier: Arc<dyn NotificationSink>,
    listeners: Listeners,
}

impl OrderStore {
    pub fn new(
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn PriceLookup>,
        payment_sink: Arc<dyn PaymentSink>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            orders: RwLock::new(BTreeMap::new()),
            clock,
            catalog,
            payment_sink,
            notifier,
            listeners: Listeners::new(),
        }
    }

    /// Rebuild a store from a persisted snapshot.
    ///
    /// Fails on duplicate ids; id assignment self-heals from the loaded
    /// maximum afterwards.
    pub fn restore(
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn PriceLookup>,
        payment_sink: Arc<dyn PaymentSink>,
        notifier: Arc<dyn NotificationSink>,
        orders: Vec<Order>,
    ) -> Result<Self, OrderError> {
        let mut map = BTreeMap::new();
        for order in orders {
            if map.insert(order.id, order).is_some() {
                return Err(OrderError::Validation(
                    "snapshot contains duplicate order ids".to_string(),
                ));
            }
        }
        let store = Self::new(clock, catalog, payment_sink, notifier);
        *store.orders.write() = map;
        Ok(store)
    }

    /// Register a change listener. Listeners run synchronously after each
    /// mutation completes.
    pub fn subscribe(&self, listener: Listener) {
        self.listeners.subscribe(listener);
    }

    // ========== Queries ==========

    pub fn get_order(&self, order_id: i64) -> Result<Order, OrderError> {
        self.orders
            .read()
            .get(&order_id)
            .cloned()
            .ok_or(OrderError::NotFound(order_id))
    }

    /// Orders matching the filter, in id (creation) order.
    pub fn list_orders(&self, filter: &OrderFilter) -> Vec<Order> {
        self.orders
            .read()
            .values()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect()
    }

    /// Current amount to charge for an order.
    pub fn order_total(&self, order_id: i64) -> Result<Decimal, OrderError> {
        let orders = self.orders.read();
        let order = orders.get(&order_id).ok_or(OrderError::NotFound(order_id))?;
        Ok(money::order_total(order, &*self.catalog))
    }

    /// Current subtotal (before service fee) for an order.
    pub fn order_subtotal(&self, order_id: i64) -> Result<Decimal, OrderError> {
        let orders = self.orders.read();
        let order = orders.get(&order_id).ok_or(OrderError::NotFound(order_id))?;
        Ok(money::order_subtotal(order, &*self.catalog))
    }

    // ========== Mutations ==========

    /// Create an order: id assigned as max existing + 1, kitchen `Pending`,
    /// payment `Unpaid`.
    pub fn create_order(&self, input: NewOrder) -> Result<Order, OrderError> {
        validate::validate_new_order(&input)?;

        let created = {
            let mut orders = self.orders.write();
            let id = next_id(&orders);

            // The creation batch goes through the same merge as add_items,
            // so duplicate (name, notes) lines collapse from the start.
            let mut items = Vec::new();
            for item in input.items {
                merge_or_append(&mut items, item);
            }

            let order = Order {
                id,
                order_type: input.order_type,
                identifier: input.identifier,
                created_at: self.clock.now_millis(),
                kitchen_state: KitchenState::Pending,
                payment_state: PaymentState::Unpaid,
                items,
                has_service_fee: input.has_service_fee,
                delivery_info: input.delivery_info,
                payment_method: None,
            };
            orders.insert(id, order.clone());
            order
        };

        tracing::info!(
            order_id = created.id,
            order_type = %created.order_type,
            identifier = %created.identifier,
            "order created"
        );
        self.listeners.emit(ChangeEvent::OrderChanged {
            order_id: created.id,
        });
        Ok(created)
    }

    /// Add items to an existing order.
    ///
    /// An incoming item merges into an existing line only when both the
    /// name and the notes match exactly; otherwise it appends as a new
    /// line. A differently-customized item is never folded away.
    pub fn add_items(&self, order_id: i64, items: Vec<OrderItem>) -> Result<Order, OrderError> {
        validate::validate_items(&items)?;

        let updated = {
            let mut orders = self.orders.write();
            let order = orders
                .get_mut(&order_id)
                .ok_or(OrderError::NotFound(order_id))?;
            if order.is_paid() {
                return Err(OrderError::AlreadyPaid(order_id));
            }
            for item in items {
                merge_or_append(&mut order.items, item);
            }
            order.clone()
        };

        tracing::info!(
            order_id,
            lines = updated.items.len(),
            units = updated.unit_count(),
            "items added"
        );
        self.listeners
            .emit(ChangeEvent::OrderChanged { order_id });
        Ok(updated)
    }

    /// Advance the kitchen state by exactly one step.
    ///
    /// The chain is `Pending → InProgress → Ready → Delivered`; skipping,
    /// moving backward, or leaving `Delivered` is rejected.
    pub fn advance_kitchen_state(
        &self,
        order_id: i64,
        target: KitchenState,
    ) -> Result<Order, OrderError> {
        let updated = {
            let mut orders = self.orders.write();
            let order = orders
                .get_mut(&order_id)
                .ok_or(OrderError::NotFound(order_id))?;
            if order.kitchen_state.next() != Some(target) {
                return Err(OrderError::InvalidTransition {
                    from: order.kitchen_state,
                    to: target,
                });
            }
            order.kitchen_state = target;
            order.clone()
        };

        tracing::info!(order_id, state = %updated.kitchen_state, "kitchen state advanced");
        self.listeners
            .emit(ChangeEvent::OrderChanged { order_id });
        Ok(updated)
    }

    /// Settle an order.
    ///
    /// The payment event is delivered to the shift ledger before the order
    /// is marked paid: if the ledger rejects it (no active shift), the
    /// whole call fails and the order stays unpaid, so no payment can ever
    /// go missing from reconciliation. Calling twice yields `AlreadyPaid`
    /// and the shift counters move exactly once.
    pub fn record_payment(
        &self,
        order_id: i64,
        method: PaymentMethod,
    ) -> Result<Order, OrderError> {
        // Validate and price without holding the lock across the sink call,
        // so shift listeners can freely read this store.
        let amount = {
            let orders = self.orders.read();
            let order = orders.get(&order_id).ok_or(OrderError::NotFound(order_id))?;
            if order.is_paid() {
                return Err(OrderError::AlreadyPaid(order_id));
            }
            if !order.kitchen_state.is_servable() {
                return Err(OrderError::NotPayable {
                    order_id,
                    state: order.kitchen_state,
                });
            }
            money::order_total(order, &*self.catalog)
        };

        let event = PaymentRecorded::new(order_id, amount, method, self.clock.now_millis());
        self.payment_sink.on_payment_recorded(&event)?;

        let paid = {
            let mut orders = self.orders.write();
            let order = orders
                .get_mut(&order_id)
                .ok_or(OrderError::NotFound(order_id))?;
            order.payment_state = PaymentState::Paid;
            order.payment_method = Some(method);
            order.clone()
        };

        tracing::info!(order_id, amount = %amount, method = %method, "payment recorded");
        self.notifier.notify(
            &format!("Order #{order_id} settled: {amount} ({method})"),
            NoticeLevel::Info,
        );
        self.listeners
            .emit(ChangeEvent::OrderChanged { order_id });
        Ok(paid)
    }

    /// Snapshot of every order, in id order.
    pub fn snapshot(&self) -> Vec<Order> {
        self.orders.read().values().cloned().collect()
    }
}

/// Next order id: max existing + 1, or 1 when empty.
///
/// Derived from the current set rather than a separate counter, so the
/// sequence self-heals after a snapshot reload.
fn next_id(orders: &BTreeMap<i64, Order>) -> i64 {
    orders.last_key_value().map(|(id, _)| id + 1).unwrap_or(1)
}

/// Add a line, merging with an existing one when name and notes match.
fn merge_or_append(lines: &mut Vec<OrderItem>, incoming: OrderItem) {
    if let Some(existing) = lines.iter_mut().find(|line| line.merges_with(&incoming)) {
        existing.quantity += incoming.quantity;
    } else {
        lines.push(incoming);
    }
}
