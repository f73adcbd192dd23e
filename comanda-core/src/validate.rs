//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Limits are
//! chosen for receipt printing (80mm thermal width) and reasonable UX
//! bounds on names, notes, and addresses.

use rust_decimal::Decimal;
use shared::models::{DeliveryInfo, OrderItem};

use crate::orders::{NewOrder, OrderError};
use crate::shifts::ShiftError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: products, order identifiers, operator names
pub const MAX_NAME_LEN: usize = 200;

/// Notes and reasons (item note, shift closing note)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, street number, complement
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Maximum quantity per order line
pub const MAX_QUANTITY: i32 = 9999;

// ── Order input validation ──────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub(crate) fn required_text(value: &str, field: &str, max_len: usize) -> Result<(), OrderError> {
    if value.trim().is_empty() {
        return Err(OrderError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(OrderError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub(crate) fn optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), OrderError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(OrderError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate one order line.
pub(crate) fn validate_item(item: &OrderItem) -> Result<(), OrderError> {
    required_text(&item.name, "item name", MAX_NAME_LEN)?;
    if item.quantity < 1 {
        return Err(OrderError::Validation(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(OrderError::Validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
            item.quantity
        )));
    }
    if item.notes.len() > MAX_NOTE_LEN {
        return Err(OrderError::Validation(format!(
            "item notes are too long ({} chars, max {MAX_NOTE_LEN})",
            item.notes.len()
        )));
    }
    Ok(())
}

/// Validate an incoming item batch (creation or add-items).
pub(crate) fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::Validation(
            "order must contain at least one item".to_string(),
        ));
    }
    for item in items {
        validate_item(item)?;
    }
    Ok(())
}

/// Validate delivery address fields.
pub(crate) fn validate_delivery_info(info: &DeliveryInfo) -> Result<(), OrderError> {
    required_text(&info.client_name, "client name", MAX_NAME_LEN)?;
    required_text(&info.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    required_text(&info.address, "address", MAX_ADDRESS_LEN)?;
    required_text(&info.number, "street number", MAX_SHORT_TEXT_LEN)?;
    required_text(&info.neighborhood, "neighborhood", MAX_NAME_LEN)?;
    optional_text(&info.complement, "complement", MAX_SHORT_TEXT_LEN)?;
    optional_text(&info.reference, "reference", MAX_NOTE_LEN)?;
    Ok(())
}

/// Validate a full creation payload: identifier, items, and the
/// delivery-info/type pairing.
pub(crate) fn validate_new_order(input: &NewOrder) -> Result<(), OrderError> {
    required_text(&input.identifier, "identifier", MAX_NAME_LEN)?;
    validate_items(&input.items)?;

    match (&input.delivery_info, input.order_type.is_delivery()) {
        (None, true) => Err(OrderError::Validation(
            "delivery orders require delivery info".to_string(),
        )),
        (Some(_), false) => Err(OrderError::Validation(format!(
            "delivery info is not allowed on {} orders",
            input.order_type
        ))),
        (Some(info), true) => validate_delivery_info(info),
        (None, false) => Ok(()),
    }
}

// ── Shift input validation ──────────────────────────────────────────

/// Validate a cash amount is non-negative.
pub(crate) fn cash_amount(value: Decimal, field: &str) -> Result<(), ShiftError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ShiftError::Validation(format!(
            "{field} cannot be negative: {value}"
        )));
    }
    Ok(())
}

/// Validate a required shift text field.
pub(crate) fn shift_text(value: &str, field: &str, max_len: usize) -> Result<(), ShiftError> {
    if value.trim().is_empty() {
        return Err(ShiftError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(ShiftError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate an optional shift note.
pub(crate) fn shift_note(value: &Option<String>, field: &str) -> Result<(), ShiftError> {
    if let Some(v) = value
        && v.len() > MAX_NOTE_LEN
    {
        return Err(ShiftError::Validation(format!(
            "{field} is too long ({} chars, max {MAX_NOTE_LEN})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_quantity_bounds() {
        assert!(validate_item(&OrderItem::new("X-Bacon", 1)).is_ok());
        assert!(validate_item(&OrderItem::new("X-Bacon", MAX_QUANTITY)).is_ok());
        assert!(matches!(
            validate_item(&OrderItem::new("X-Bacon", 0)),
            Err(OrderError::Validation(_))
        ));
        assert!(matches!(
            validate_item(&OrderItem::new("X-Bacon", -2)),
            Err(OrderError::Validation(_))
        ));
        assert!(matches!(
            validate_item(&OrderItem::new("X-Bacon", MAX_QUANTITY + 1)),
            Err(OrderError::Validation(_))
        ));
    }

    #[test]
    fn blank_names_rejected() {
        assert!(matches!(
            validate_item(&OrderItem::new("   ", 1)),
            Err(OrderError::Validation(_))
        ));
        assert!(required_text("mesa 4", "identifier", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn negative_cash_rejected() {
        assert!(cash_amount(Decimal::ZERO, "initial amount").is_ok());
        assert!(cash_amount(Decimal::new(100, 2), "initial amount").is_ok());
        assert!(matches!(
            cash_amount(Decimal::new(-1, 2), "initial amount"),
            Err(ShiftError::Validation(_))
        ));
    }
}
