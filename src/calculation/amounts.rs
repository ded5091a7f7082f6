//! Overflow-checked money arithmetic.
//!
//! Every operation names the quantity it computes so an overflow surfaces
//! as [`ValidationError::AmountOutOfRange`] instead of a panic.

use rust_decimal::Decimal;

use crate::error::ValidationError;

pub(crate) fn add(
    a: Decimal,
    b: Decimal,
    quantity: &'static str,
) -> Result<Decimal, ValidationError> {
    a.checked_add(b).ok_or(ValidationError::AmountOutOfRange { quantity })
}

pub(crate) fn sub(
    a: Decimal,
    b: Decimal,
    quantity: &'static str,
) -> Result<Decimal, ValidationError> {
    a.checked_sub(b).ok_or(ValidationError::AmountOutOfRange { quantity })
}

pub(crate) fn mul(
    a: Decimal,
    b: Decimal,
    quantity: &'static str,
) -> Result<Decimal, ValidationError> {
    a.checked_mul(b).ok_or(ValidationError::AmountOutOfRange { quantity })
}
