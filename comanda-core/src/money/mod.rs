//! Money calculation using rust_decimal for precision
//!
//! All monetary arithmetic runs on `Decimal`; binary floating point never
//! touches a currency value, so repeated additions across a long session
//! cannot drift off exact cents. Totals are always computed from the live
//! item set and the catalog - never cached on the order - which keeps the
//! service fee consistent even when items are added after creation.

use rust_decimal::prelude::*;
use shared::models::Order;

use crate::traits::PriceLookup;

/// Rounding for monetary values (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Flat service surcharge rate (10%)
pub const SERVICE_FEE_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Round to the monetary scale.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total: unit price times quantity.
#[inline]
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Unit price for a product name, zero when the catalog does not know it.
///
/// A miss is logged so a catalog/order drift is visible in the logs even
/// though the calculation itself carries on.
pub fn unit_price(catalog: &dyn PriceLookup, name: &str) -> Decimal {
    match catalog.price_of(name) {
        Some(price) => price,
        None => {
            tracing::warn!(product = name, "price lookup miss, pricing line at zero");
            Decimal::ZERO
        }
    }
}

/// Sum of line totals over the order's items.
pub fn order_subtotal(order: &Order, catalog: &dyn PriceLookup) -> Decimal {
    order
        .items
        .iter()
        .map(|item| line_total(unit_price(catalog, &item.name), item.quantity))
        .sum()
}

/// Service fee component: 10% of the subtotal when the order carries the
/// fee flag, zero otherwise.
pub fn service_fee(order: &Order, catalog: &dyn PriceLookup) -> Decimal {
    if order.has_service_fee {
        round_money(order_subtotal(order, catalog) * SERVICE_FEE_RATE)
    } else {
        Decimal::ZERO
    }
}

/// Amount to charge: subtotal plus the service fee component.
pub fn order_total(order: &Order, catalog: &dyn PriceLookup) -> Decimal {
    round_money(order_subtotal(order, catalog) + service_fee(order, catalog))
}
